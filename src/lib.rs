//! Market Lens - terminal client for an AI market-research backend
//!
//! This library implements the presentation layer for a product/market
//! research assistant. It supports:
//!
//! - Submitting free-text product queries to the research backend
//! - Normalizing both backend response revisions into one result model
//! - Converting terminal-style box/tree diagrams in responses to markdown
//! - Rendering reports for the CLI and the interactive TUI form
//! - Exporting a paginated HTML snapshot of a rendered report
//! - Mirroring the backend's conversational "memory" session
//!
//! # Example
//!
//! ```no_run
//! use market_lens::config::Config;
//! use market_lens::session::{Fallback, ResearchSession};
//!
//! let config = Config::resolve()?;
//! let mut session = ResearchSession::new(&config)?;
//! let result = session.submit("Pixel 9 Pro review", Fallback::Error)?;
//! println!("{}", market_lens::render::report_markdown(result));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod client;
pub mod clipboard;
pub mod config;
pub mod demo;
pub mod export;
pub mod models;
pub mod parsers;
pub mod render;
pub mod session;
pub mod tui;

// Re-export commonly used types
pub use config::Config;
pub use models::{AnalysisResult, StatusReport};
pub use parsers::report::to_markdown;
pub use session::{Fallback, ResearchSession};
