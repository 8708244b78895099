// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Smartline - voice-menu dialog engine for telecom customer support.
//!
//! This is the binary entry point for the Smartline engine.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod serve;
mod shell;
mod status;

/// Smartline - voice-menu dialog engine for telecom customer support.
#[derive(Parser, Debug)]
#[command(name = "smartline", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP gateway server.
    Serve,
    /// Launch an interactive dialog session.
    Shell,
    /// Show database and account statistics.
    Status {
        /// Output structured JSON for scripting.
        #[arg(long)]
        json: bool,
    },
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match smartline_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            smartline_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Shell) => shell::run_shell(config).await,
        Some(Commands::Status { json }) => status::run_status(&config, json).await,
        None => {
            println!("smartline: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
