//! quiztui - Main entry point
//!
//! Ten summer questions in the terminal, answered by a recommended track.

use anyhow::Context;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::stdout;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, error, info};

use quiztui::app::App;
use quiztui::cli::{Cli, Commands};
use quiztui::client::HttpRecommender;
use quiztui::config::QuizConfig;
use quiztui::headless::{self, AnswerFile};
use quiztui::logging;
use quiztui::questions::QUESTIONS;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let level = logging::default_level(cli.is_interactive(), cli.log_file.is_some());
    if let Err(e) = logging::init(cli.log_file.as_deref(), level) {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }
    debug!("CLI arguments parsed: {:?}", cli);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    if cli.command == Some(Commands::Questions) {
        print!("{}", headless::format_questions(&QUESTIONS));
        return Ok(ExitCode::SUCCESS);
    }
    if let Some(Commands::Validate { answers }) = &cli.command {
        return validate_answers(answers);
    }

    let config = cli.load_config()?;
    info!("Using recommendation endpoint {}", config.endpoint);

    match &cli.command {
        Some(Commands::Submit { answers }) => submit_answers(answers, &config),
        _ => {
            run_tui(&config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Check an answers file and report what is missing
fn validate_answers(path: &Path) -> anyhow::Result<ExitCode> {
    info!("Validating answers file: {:?}", path);
    let answers = AnswerFile::load(path)?;

    for key in &answers.unknown {
        println!("! Unknown question {}", headless::describe_unknown(key));
    }
    for (id, label) in answers.nonstandard() {
        println!("! {}: '{}' is not one of the standard choices", id, label);
    }

    let missing = answers.missing();
    if missing.is_empty() {
        println!("✓ All {} questions answered", QUESTIONS.len());
        Ok(ExitCode::SUCCESS)
    } else {
        println!("✗ Missing answers:");
        for id in missing {
            println!("  {}", id);
        }
        Ok(ExitCode::FAILURE)
    }
}

/// Submit an answers file without the TUI
fn submit_answers(path: &Path, config: &QuizConfig) -> anyhow::Result<ExitCode> {
    let answers = AnswerFile::load(path)?;
    let recommender = HttpRecommender::new(config).context("Failed to create HTTP client")?;

    match headless::submit_answers(&answers, &recommender) {
        Ok(result) => {
            print!("{}", headless::format_recommendation(&result, &config.embed_base_url));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("Submission failed: {}", e);
            eprintln!("✗ {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Run the interactive questionnaire
fn run_tui(config: &QuizConfig) -> anyhow::Result<()> {
    debug!("Initializing terminal for TUI mode");
    let recommender = HttpRecommender::new(config).context("Failed to create HTTP client")?;

    enable_raw_mode().context("Failed to enable raw mode")?;
    if let Err(e) = crossterm::execute!(stdout(), EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e).context("Failed to enter alternate screen");
    }

    let backend = CrosstermBackend::new(stdout());
    let result = Terminal::new(backend)
        .context("Failed to create terminal")
        .and_then(|mut terminal| {
            let mut app = App::new(Arc::new(recommender), &config.embed_base_url);
            app.run(&mut terminal).map_err(anyhow::Error::from)
        });

    // Cleanup terminal (always attempt cleanup, even if app failed)
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), LeaveAlternateScreen);

    result
}
