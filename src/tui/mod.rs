// Terminal lifecycle for the interactive research form
mod app;
mod events;
mod layout;
mod rendering;
mod timestamps;

use std::io;

use anyhow::Result;
pub use app::App;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::session::{Fallback, ResearchSession};

/// Run the interactive research form. The terminal is restored before the
/// event loop's outcome propagates, so an error never leaves raw mode on.
pub fn run_interactive(session: ResearchSession, fallback: Fallback) -> Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let outcome = App::new(session, fallback).run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    outcome
}
