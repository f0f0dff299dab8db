use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::client::BackendClient;
use crate::config::Config;
use crate::export;
use crate::render;
use crate::session::{Fallback, ResearchSession};
use crate::tui;

#[derive(Parser)]
#[command(name = "market-lens")]
#[command(version = "0.1.0")]
#[command(about = "Market research reports from your terminal", long_about = None)]
pub struct Cli {
    /// In the interactive form, substitute demonstration results when the
    /// backend is unreachable
    #[arg(long)]
    pub demo: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one research query and print the rendered report
    Analyze {
        /// The product or market query
        query: Vec<String>,
        /// Print the backend's raw text instead of the rendered report
        #[arg(long)]
        raw: bool,
        /// Substitute a deterministic demonstration result when the backend
        /// is unreachable
        #[arg(long)]
        demo: bool,
        /// Also write the paginated HTML snapshot into DIR
        #[arg(long, value_name = "DIR")]
        export: Option<PathBuf>,
    },
    /// Show backend connectivity indicators
    Status,
    /// Clear the conversational research memory
    ClearMemory,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve()?;

    match cli.command {
        Some(Commands::Analyze { query, raw, demo, export }) => {
            analyze(&config, &query.join(" "), raw, demo, export.as_deref())
        }
        Some(Commands::Status) => show_status(&config),
        Some(Commands::ClearMemory) => clear_memory(&config),
        None => {
            let fallback = if cli.demo { Fallback::Demo } else { Fallback::Error };
            tui::run_interactive(ResearchSession::new(&config)?, fallback)
        }
    }
}

fn analyze(
    config: &Config,
    query: &str,
    raw: bool,
    demo: bool,
    export_dir: Option<&Path>,
) -> Result<()> {
    let mut session = ResearchSession::new(config)?;
    let fallback = if demo { Fallback::Demo } else { Fallback::Error };

    let result = session.submit(query, fallback)?;

    if raw {
        println!("{}", result.market.summary);
    } else {
        println!("{}", render::report_markdown(result));
    }

    if let Some(dir) = export_dir {
        let path = export::export_report(result, dir)?;
        eprintln!("Exported report to {}", path.display());
    }

    Ok(())
}

fn show_status(config: &Config) -> Result<()> {
    let client = BackendClient::new(&config.backend_url)?;

    println!("Backend: {}", config.backend_url);
    match client.status() {
        Some(status) => {
            println!("  backend: connected");
            println!("  aws: {}", if status.aws { "connected" } else { "offline" });
            println!("  google: {}", if status.google { "connected" } else { "offline" });
            println!("  news: {}", if status.news { "active" } else { "disabled" });
        }
        None => {
            println!("  backend: offline");
            println!("  Run `market-lens analyze --demo <query>` for an offline demonstration.");
        }
    }

    Ok(())
}

fn clear_memory(config: &Config) -> Result<()> {
    let mut session = ResearchSession::new(config)?;

    if session.clear_memory() {
        println!("Memory cleared");
    } else {
        println!("Memory cleared locally (backend unreachable)");
    }

    Ok(())
}
