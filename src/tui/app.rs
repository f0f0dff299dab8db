//! TUI application state and event handling.
//!
//! The `App` struct owns the interactive form: the query input, the rendered
//! report, the conversation pane, connectivity indicators, and transient
//! status messages. It wraps a [`ResearchSession`] and runs the main event
//! loop via `run()`.
//!
//! Submission is synchronous: one query is in flight at a time,
//! the input is disabled while it runs, and the loop draws an "analyzing"
//! frame before blocking on the backend. There is no cancellation: the
//! result applies whenever the response settles.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::text::Line;

use super::events::{Action, poll_event};
use super::rendering::{RenderState, render_ui};
use crate::clipboard::copy_to_clipboard;
use crate::export;
use crate::models::StatusReport;
use crate::render;
use crate::session::{Fallback, ResearchSession};

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
/// Query length cap for the input box
const MAX_QUERY_LEN: usize = 512;

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

/// Which rendering of the last result the report pane shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Markdown report assembled from the normalized result
    Report,
    /// The backend's raw terminal-style text
    Terminal,
}

pub struct App {
    session: ResearchSession,
    fallback: Fallback,
    input: String,
    view: ViewMode,
    scroll: u16,
    connectivity: Option<StatusReport>,
    report_markdown: Option<String>,
    report_lines: Vec<Line<'static>>,
    status_message: Option<StatusMessage>,
    busy: bool,
    should_quit: bool,
    // Dirty state tracking for efficient rendering
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    pub fn new(session: ResearchSession, fallback: Fallback) -> Self {
        // One connectivity probe at startup; unreachable reads as offline
        let connectivity = session.client().status();

        Self {
            session,
            fallback,
            input: String::new(),
            view: ViewMode::Report,
            scroll: 0,
            connectivity,
            report_markdown: None,
            report_lines: Vec::new(),
            status_message: None,
            busy: false,
            should_quit: false,
            needs_redraw: true, // Initial draw needed
            last_draw_time: Instant::now(),
        }
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

    /// Check and clear expired status messages
    fn check_and_clear_expired_status(&mut self) {
        let should_clear = self
            .status_message
            .as_ref()
            .map(|msg| Instant::now() >= msg.expires_at)
            .unwrap_or(false);
        if should_clear {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            self.check_and_clear_expired_status();

            // Draw if dirty or if it's been >100ms (for terminal resize handling)
            let elapsed = Instant::now().duration_since(self.last_draw_time);
            if self.needs_redraw || elapsed >= Duration::from_millis(100) {
                self.draw(terminal)?;
            }

            match poll_event(Duration::from_millis(100))? {
                Action::Submit => {
                    // The analyzing frame must be visible before we block
                    if let Some(query) = ResearchSession::prepare(&self.input)
                        && !self.busy
                    {
                        self.busy = true;
                        self.needs_redraw = true;
                        self.draw(terminal)?;
                        self.finish_submit(&query);
                    }
                }
                action => self.handle_action(action),
            }
        }

        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        terminal.draw(|f| {
            let state = RenderState {
                input: &self.input,
                busy: self.busy,
                view: self.view,
                report: &self.report_lines,
                scroll: self.scroll,
                session: self.session.session(),
                history: self.session.history(),
                connectivity: self.connectivity.as_ref(),
                status_message: self.status_message.as_ref(),
            };
            render_ui(f, &state);
        })?;
        self.needs_redraw = false;
        self.last_draw_time = Instant::now();
        Ok(())
    }

    /// Settle a prepared submission against the backend (extracted for testing)
    fn finish_submit(&mut self, query: &str) {
        let outcome = self.session.submit(query, self.fallback).map(|result| result.demo);
        match outcome {
            Ok(demo) => {
                self.input.clear();
                self.scroll = 0;
                self.rebuild_report();
                let text =
                    if demo { "✓ Demonstration analysis ready" } else { "✓ Analysis complete" };
                self.set_status(text, MessageType::Success, STATUS_SUCCESS_DURATION_MS);
            }
            Err(e) => {
                self.set_status(
                    format!("✗ {}", e),
                    MessageType::Error,
                    STATUS_ERROR_DURATION_MS,
                );
            }
        }
        self.busy = false;
        self.needs_redraw = true;
    }

    /// Re-render the report pane from the session's last result
    fn rebuild_report(&mut self) {
        let (markdown, lines) = match self.session.last_result() {
            Some(result) => {
                let markdown = render::report_markdown(result);
                let lines = match self.view {
                    ViewMode::Report => render::markdown_lines(&markdown),
                    ViewMode::Terminal => result
                        .market
                        .summary
                        .lines()
                        .map(|line| Line::from(line.to_string()))
                        .collect(),
                };
                (Some(markdown), lines)
            }
            None => (None, Vec::new()),
        };
        self.report_markdown = markdown;
        self.report_lines = lines;
        self.needs_redraw = true;
    }

    /// Handle a user action (extracted for testing)
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ClearInput => {
                if self.input.is_empty() {
                    self.should_quit = true;
                } else {
                    self.input.clear();
                    self.needs_redraw = true;
                }
            }
            Action::ScrollUp => self.scroll_by(-1),
            Action::ScrollDown => self.scroll_by(1),
            Action::PageUp => self.scroll_by(-10),
            Action::PageDown => self.scroll_by(10),
            Action::InputChar(c) => self.push_input(c),
            Action::DeleteChar => {
                if self.input.pop().is_some() {
                    self.needs_redraw = true;
                }
            }
            Action::ToggleView => {
                self.view = match self.view {
                    ViewMode::Report => ViewMode::Terminal,
                    ViewMode::Terminal => ViewMode::Report,
                };
                self.scroll = 0;
                self.rebuild_report();
            }
            Action::CopyReport => self.copy_report(),
            Action::ExportReport => self.export_report(),
            Action::ClearMemory => {
                let backend_cleared = self.session.clear_memory();
                let text = if backend_cleared {
                    "✓ Memory cleared"
                } else {
                    "✓ Memory cleared locally (backend unreachable)"
                };
                self.set_status(text, MessageType::Success, STATUS_SUCCESS_DURATION_MS);
            }
            // Submit is routed through run() so the busy frame draws first
            Action::Submit => {}
            Action::None => {}
        }
    }

    fn copy_report(&mut self) {
        let Some(payload) = self.display_text() else {
            self.set_status("✗ No report to copy", MessageType::Error, STATUS_ERROR_DURATION_MS);
            return;
        };

        match copy_to_clipboard(&payload) {
            Ok(()) => self.set_status(
                "✓ Report copied to clipboard",
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

    fn export_report(&mut self) {
        let Some(result) = self.session.last_result() else {
            self.set_status("✗ No report to export", MessageType::Error, STATUS_ERROR_DURATION_MS);
            return;
        };

        let outcome = export::export_report(result, Path::new("."));
        match outcome {
            Ok(path) => self.set_status(
                format!("✓ Exported to {}", path.display()),
                MessageType::Success,
                STATUS_SUCCESS_DURATION_MS,
            ),
            Err(e) => self.set_status(
                format!("✗ Export failed: {}", e),
                MessageType::Error,
                STATUS_ERROR_DURATION_MS,
            ),
        }
    }

    /// The text currently shown in the report pane, in its displayed form
    fn display_text(&self) -> Option<String> {
        match self.view {
            ViewMode::Report => self.report_markdown.clone(),
            ViewMode::Terminal => {
                self.session.last_result().map(|r| r.market.summary.clone())
            }
        }
    }

    fn scroll_by(&mut self, delta: i32) {
        let old = self.scroll;
        self.scroll = self.scroll.saturating_add_signed(delta as i16);
        if old != self.scroll {
            self.needs_redraw = true;
        }
    }

    fn push_input(&mut self, c: char) {
        // Bounded input to keep the form well-behaved on key repeat
        if self.input.len() < MAX_QUERY_LEN {
            self.input.push(c);
            self.needs_redraw = true;
        }
    }
}
