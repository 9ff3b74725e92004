use crate::config::QuizConfig;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// quiztui - ten summer questions, one recommended track
#[derive(Parser, Debug)]
#[command(name = "quiztui")]
#[command(about = "Answer ten questions in the terminal and get a track recommendation")]
#[command(version)]
pub struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Recommendation endpoint (overrides the configuration file)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Request timeout in seconds (overrides the configuration file)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Write log output to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the interactive questionnaire (default)
    Run,
    /// Submit answers from a JSON file without the TUI
    Submit {
        /// JSON object mapping question ids to answer labels
        answers: PathBuf,
    },
    /// Check that an answers file covers every question
    Validate {
        /// JSON object mapping question ids to answer labels
        answers: PathBuf,
    },
    /// List the questions and the answer scale
    Questions,
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }

    /// Whether this invocation runs the interactive TUI
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, None | Some(Commands::Run))
    }

    /// Defaults, then the configuration file, then command-line flags
    pub fn load_config(&self) -> anyhow::Result<QuizConfig> {
        let base = match &self.config {
            Some(path) => QuizConfig::load_from_file(path)?,
            None => QuizConfig::default(),
        };
        let config = base.with_overrides(self.endpoint.clone(), self.timeout_secs);
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}
