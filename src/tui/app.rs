//! TUI application state and event handling.
//!
//! The `App` plays the part of the classification page: an article text area, a trigger,
//! a progress indicator, and a result pane.
//!
//! # Request lifecycle
//!
//! Ctrl+S spawns the request on the tokio runtime and stores an [`InFlight`] handle. While
//! it exists the trigger is disabled and the progress row is drawn. Each loop iteration polls
//! the handle's oneshot receiver; every outcome (success, error, cancellation, or the worker
//! task disappearing) clears the handle, so the busy indicator can never stick.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

use super::events::{Action, poll_event};
use super::rendering::{RenderState, render_ui};
use crate::client::{CancelToken, ClassifierClient, Classification};
use crate::clipboard::{copy_to_clipboard, paste_from_clipboard};
use crate::errors::ClassifyError;
use crate::utils::validate_article;

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
/// Largest article the text area accepts (bytes)
const MAX_INPUT_LEN: usize = 64 * 1024;

/// Type of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

/// A classification request that has not reported back yet
struct InFlight {
    cancel: CancelToken,
    receiver: oneshot::Receiver<Result<Classification, ClassifyError>>,
    started: Instant,
}

pub struct App {
    client: Arc<ClassifierClient>,
    runtime: Handle,
    input: String,
    result: Option<Classification>,
    error: Option<String>,
    in_flight: Option<InFlight>,
    should_quit: bool,
    status_message: Option<StatusMessage>,
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    pub fn new(client: ClassifierClient, runtime: Handle) -> Self {
        Self {
            client: Arc::new(client),
            runtime,
            input: String::new(),
            result: None,
            error: None,
            in_flight: None,
            should_quit: false,
            status_message: None,
            needs_redraw: true,
            last_draw_time: Instant::now(),
        }
    }

    /// True while a request is running
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Set a transient status message with automatic expiry
    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    fn check_and_clear_expired_status(&mut self) {
        let expired = self
            .status_message
            .as_ref()
            .map(|msg| Instant::now() >= msg.expires_at)
            .unwrap_or(false);
        if expired {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            self.check_and_clear_expired_status();
            self.poll_in_flight();

            // Redraw when dirty, and keep the spinner moving while busy
            let now = Instant::now();
            let elapsed = now.duration_since(self.last_draw_time);
            if self.needs_redraw || elapsed >= Duration::from_millis(100) {
                terminal.draw(|f| {
                    let state = RenderState {
                        input: &self.input,
                        result: self.result.as_ref(),
                        error: self.error.as_deref(),
                        busy_since: self.in_flight.as_ref().map(|req| req.started),
                        status_message: self.status_message.as_ref(),
                    };
                    render_ui(f, &state);
                })?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(100))?;
            self.handle_action(action);
        }

        // Don't leave a request running behind a closed UI
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.cancel.cancel();
        }

        Ok(())
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Cancel => {
                if let Some(in_flight) = &self.in_flight {
                    in_flight.cancel.cancel();
                    self.set_status(
                        "Cancelling...",
                        MessageType::Success,
                        STATUS_SUCCESS_DURATION_MS,
                    );
                } else if !self.input.is_empty() {
                    self.clear_input();
                } else {
                    self.should_quit = true;
                }
            }
            Action::Classify => self.start_classification(),
            Action::PasteClipboard => match paste_from_clipboard() {
                Ok(text) => self.insert_text(&text),
                Err(e) => self.set_status(
                    format!("✗ Clipboard error: {}", e),
                    MessageType::Error,
                    STATUS_ERROR_DURATION_MS,
                ),
            },
            Action::CopyResult => self.copy_result(),
            Action::ClearInput => self.clear_input(),
            Action::InsertChar(c) => self.insert_char(c),
            Action::InsertText(text) => self.insert_text(&text),
            Action::DeleteChar => self.delete_char(),
            Action::None => {}
        }
    }

    fn start_classification(&mut self) {
        if self.in_flight.is_some() {
            self.set_status(
                "✗ Classification already running (Esc to cancel)",
                MessageType::Error,
                STATUS_ERROR_DURATION_MS,
            );
            return;
        }

        let article = match validate_article(&self.input) {
            Ok(article) => article.to_string(),
            Err(e) => {
                self.set_status(format!("✗ {}", e), MessageType::Error, STATUS_ERROR_DURATION_MS);
                return;
            }
        };

        let (sender, receiver) = oneshot::channel();
        let cancel = CancelToken::new();
        let client = Arc::clone(&self.client);
        let task_cancel = cancel.clone();

        self.runtime.spawn(async move {
            let result = client.classify_with_cancel(&article, &task_cancel).await;
            let _ = sender.send(result);
        });

        self.in_flight = Some(InFlight { cancel, receiver, started: Instant::now() });
        self.result = None;
        self.error = None;
        self.needs_redraw = true;
    }

    /// Collect the outcome of a finished request, if any
    fn poll_in_flight(&mut self) {
        let Some(in_flight) = self.in_flight.as_mut() else {
            return;
        };

        let outcome = match in_flight.receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Closed) => {
                Err(ClassifyError::transport("classification task stopped unexpectedly"))
            }
        };

        self.in_flight = None;
        self.needs_redraw = true;

        match outcome {
            Ok(classification) => {
                self.result = Some(classification);
                self.error = None;
            }
            Err(ClassifyError::Cancelled) => {
                self.set_status(
                    "Classification cancelled",
                    MessageType::Success,
                    STATUS_SUCCESS_DURATION_MS,
                );
            }
            Err(e) => {
                self.error = Some(e.to_string());
            }
        }
    }

    fn copy_result(&mut self) {
        let label = self.result.as_ref().map(|r| r.label().to_string()).unwrap_or_default();
        if label.is_empty() {
            self.set_status("✗ No result to copy", MessageType::Error, STATUS_ERROR_DURATION_MS);
            return;
        }

        match copy_to_clipboard(&label) {
            Ok(()) => self.set_status(
                "✓ Copied to clipboard",
                MessageType::Success,
                STATUS_SUCCESS_DURATION_MS,
            ),
            Err(e) => self.set_status(
                format!("✗ Clipboard error: {}", e),
                MessageType::Error,
                STATUS_ERROR_DURATION_MS,
            ),
        }
    }

    fn insert_char(&mut self, c: char) {
        if self.input.len() + c.len_utf8() <= MAX_INPUT_LEN {
            self.input.push(c);
            self.needs_redraw = true;
        }
    }

    /// Append pasted text, truncating at the input limit on a char boundary
    fn insert_text(&mut self, text: &str) {
        let room = MAX_INPUT_LEN.saturating_sub(self.input.len());
        let mut end = text.len().min(room);
        while !text.is_char_boundary(end) {
            end -= 1;
        }

        if end < text.len() {
            self.set_status(
                "✗ Article truncated to 64 KiB",
                MessageType::Error,
                STATUS_ERROR_DURATION_MS,
            );
        }
        self.input.push_str(&text[..end]);
        self.needs_redraw = true;
    }

    fn delete_char(&mut self) {
        if self.input.pop().is_some() {
            self.needs_redraw = true;
        }
    }

    fn clear_input(&mut self) {
        self.input.clear();
        self.needs_redraw = true;
    }
}
