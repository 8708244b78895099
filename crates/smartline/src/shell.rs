// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `smartline shell` command implementation.
//!
//! Launches an interactive dialog session with a colored prompt and
//! readline history. Customers and history persist in SQLite; the session
//! itself is in-memory and lives for one shell invocation, like a single
//! phone call.

use std::sync::Arc;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use smartline_config::SmartlineConfig;
use smartline_core::SmartlineError;
use smartline_dialog::{DialogPolicy, TurnEngine};
use smartline_storage::{MemorySessionStore, SqliteStorage};

/// Runs the `smartline shell` interactive session.
///
/// The first turn fires the greeting; every following line is one caller
/// utterance. The loop ends when the dialog closes the session, or on
/// `/quit`, Ctrl+C, or Ctrl+D.
pub async fn run_shell(config: SmartlineConfig) -> Result<(), SmartlineError> {
    let storage = Arc::new(SqliteStorage::open(&config.storage).await?);
    let sessions = Arc::new(MemorySessionStore::new());

    let engine = TurnEngine::new(
        storage.clone(),
        sessions,
        storage.clone(),
        DialogPolicy::from_config(&config),
    );

    let session_id = uuid::Uuid::new_v4().to_string();

    let mut rl = DefaultEditor::new()
        .map_err(|e| SmartlineError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "smartline shell".bold().green());
    println!("Type {} to hang up.\n", "/quit".yellow());

    // Fire the greeting before the first prompt.
    let reply = engine.handle_turn(&session_id, "").await?;
    println!("{} {}", "ivr>".cyan(), reply.reply_text);

    let prompt = format!("{}> ", "caller".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "/quit" || trimmed == "/exit" {
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                match engine.handle_turn(&session_id, trimmed).await {
                    Ok(reply) => {
                        println!("{} {}", "ivr>".cyan(), reply.reply_text);
                        if reply.session_closed {
                            break;
                        }
                    }
                    Err(e) => {
                        eprintln!("{}: {e}", "error".red());
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    storage.close().await?;
    println!("{}", "call ended".dimmed());
    Ok(())
}
