//! Application module
//!
//! Contains the event loop, key handling and the background submission
//! worker.
//!
//! # Module Structure
//! - `state` - Application state (session plus cursor and overlay flags)
//! - Main module - App struct and event loop

pub mod state;

pub use state::{AppState, SUBMIT_ROW};

use crate::client::Recommender;
use crate::components::keybindings::{KeyAction, KeybindingContext};
use crate::error::{QuizError, Result};
use crate::questions::Choice;
use crate::recommendation::RecommendationResult;
use crate::session::ViewKind;
use crate::ui::UiRenderer;
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::Backend};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Messages sent from the submission thread to the main UI thread
#[derive(Debug)]
pub enum SubmitMessage {
    /// The request finished, successfully or not
    Finished {
        generation: u64,
        outcome: Result<RecommendationResult>,
    },
}

/// Main application struct
pub struct App {
    state: AppState,
    recommender: Arc<dyn Recommender>,
    ui_renderer: UiRenderer,
    /// Keybinding context for navigation hints
    keybinding_context: KeybindingContext,
    /// Channel sender for submission outcomes (cloned to threads)
    submit_tx: Sender<SubmitMessage>,
    /// Channel receiver for submission outcomes (polled in main loop)
    submit_rx: Receiver<SubmitMessage>,
}

impl App {
    /// Create a new application instance
    pub fn new(recommender: Arc<dyn Recommender>, embed_base_url: &str) -> Self {
        info!("Creating new App instance for {}", recommender.endpoint());
        let (submit_tx, submit_rx) = mpsc::channel();

        Self {
            state: AppState::new(embed_base_url),
            recommender,
            ui_renderer: UiRenderer::new(),
            keybinding_context: KeybindingContext::new(),
            submit_tx,
            submit_rx,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Toggle help overlay visibility
    pub fn toggle_help(&mut self) {
        self.state.help_visible = !self.state.help_visible;
    }

    /// Run the main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!("Starting main application loop");

        loop {
            self.poll_submit_messages();

            if crossterm::event::poll(Duration::from_millis(50))? {
                if let Event::Key(key_event) = crossterm::event::read()? {
                    // Windows reports releases too
                    if key_event.kind == KeyEventKind::Press && self.handle_key_event(key_event)? {
                        break;
                    }
                }
            }

            terminal
                .draw(|f| {
                    self.ui_renderer
                        .render(f, &self.state, &self.keybinding_context)
                })
                .map_err(|e| QuizError::terminal(e.to_string()))?;
        }

        info!("Main application loop finished");
        Ok(())
    }

    /// Apply every finished submission without blocking.
    ///
    /// Returns how many outcomes were applied to the session.
    pub fn poll_submit_messages(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(msg) = self.submit_rx.try_recv() {
            match msg {
                SubmitMessage::Finished {
                    generation,
                    outcome,
                } => {
                    let failure = outcome.as_ref().err().map(QuizError::is_remote);
                    if !self.state.session.complete_submit(generation, outcome) {
                        continue;
                    }
                    applied += 1;
                    match failure {
                        None => {
                            self.state.selection = 0;
                            self.state.status_message =
                                "Recommendation received. Press Enter to ask again".to_string();
                        }
                        Some(remote) => {
                            self.state.selection = SUBMIT_ROW;
                            self.state.status_message = if remote {
                                "The recommendation service did not answer. Press S to retry"
                            } else {
                                "Submission failed. Press S to retry"
                            }
                            .to_string();
                        }
                    }
                }
            }
        }
        applied
    }

    /// Handle a key press; returns true when the app should exit
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<bool> {
        let view = self.state.view();
        let Some(action) = self.keybinding_context.action_for(view, &key_event) else {
            return Ok(false);
        };
        debug!("Key {:?} -> {:?} in {}", key_event.code, action, view);

        if self.state.help_visible {
            match action {
                KeyAction::Help | KeyAction::Dismiss => self.state.help_visible = false,
                KeyAction::Quit => return Ok(true),
                _ => {}
            }
            return Ok(false);
        }

        match action {
            KeyAction::Quit => return Ok(true),
            KeyAction::Help => self.toggle_help(),
            KeyAction::Dismiss => {}
            KeyAction::NavigateUp => self.navigate(-1),
            KeyAction::NavigateDown => self.navigate(1),
            KeyAction::Select => {
                if self.state.submit_focused() {
                    self.start_submission();
                } else {
                    self.pick(self.state.selection);
                }
            }
            KeyAction::QuickPick(index) => self.pick(index),
            KeyAction::Submit => self.start_submission(),
            KeyAction::Restart => self.restart(),
        }
        Ok(false)
    }

    fn navigate(&mut self, delta: isize) {
        let rows = self.state.row_count();
        if rows == 0 {
            return;
        }
        let current = self.state.selection.min(rows - 1) as isize;
        self.state.selection = (current + delta).rem_euclid(rows as isize) as usize;
    }

    fn pick(&mut self, index: usize) {
        let Some(choice) = Choice::from_index(index) else {
            return;
        };
        let was_asking = self.state.view() == ViewKind::Asking;

        if let Err(e) = self.state.session.choose(choice) {
            self.state.status_message = e.to_string();
            return;
        }

        match self.state.view() {
            ViewKind::AwaitingSubmit if was_asking => {
                self.state.selection = SUBMIT_ROW;
                self.state.status_message =
                    "All questions answered. Press Enter on the button or S to submit".to_string();
            }
            ViewKind::AwaitingSubmit => {
                self.state.selection = SUBMIT_ROW;
                self.state.status_message = format!("Last answer changed to {}", choice.label());
            }
            _ => {
                self.state.selection = 0;
                self.state.status_message = format!("Answered: {}", choice.label());
            }
        }
    }

    /// Start a submission on a background thread
    fn start_submission(&mut self) {
        let pending = match self.state.session.begin_submit() {
            Ok(pending) => pending,
            Err(e) => {
                warn!("Submit rejected: {}", e);
                self.state.status_message = e.to_string();
                return;
            }
        };

        debug!("Starting submission for generation {}", pending.generation);
        self.state.status_message = format!("Submitting to {}", self.recommender.endpoint());

        let tx = self.submit_tx.clone();
        let recommender = Arc::clone(&self.recommender);
        thread::spawn(move || {
            let outcome = recommender.recommend(&pending.responses);
            // The receiver is gone once the app exits
            let _ = tx.send(SubmitMessage::Finished {
                generation: pending.generation,
                outcome,
            });
        });
    }

    fn restart(&mut self) {
        self.state.session.restart();
        self.state.selection = 0;
        self.state.help_visible = false;
        self.state.status_message = state::WELCOME_MESSAGE.to_string();
    }

    #[cfg(test)]
    fn wait_for_submission(&mut self, timeout: Duration) -> bool {
        match self.submit_rx.recv_timeout(timeout) {
            Ok(msg) => {
                self.submit_tx
                    .send(msg)
                    .expect("receiver is owned by the app");
                self.poll_submit_messages() > 0
            }
            Err(_) => false,
        }
    }
}
