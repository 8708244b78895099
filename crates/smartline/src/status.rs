// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `smartline status` command implementation.
//!
//! Opens the configured database read-only and prints table counts.
//! Useful as a quick health probe without a running gateway.

use std::io::IsTerminal;

use colored::Colorize;
use serde::Serialize;

use smartline_config::SmartlineConfig;
use smartline_core::SmartlineError;
use smartline_storage::Database;

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub database_path: String,
    pub customers: i64,
    pub open_sessions: i64,
    pub issues: i64,
    pub history_turns: i64,
}

async fn table_count(db: &Database, table: &'static str) -> Result<i64, SmartlineError> {
    db.connection()
        .call(move |conn| {
            let n = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })?;
            Ok::<_, rusqlite::Error>(n)
        })
        .await
        .map_err(SmartlineError::storage)
}

/// Ended sessions keep their row until a late turn releases it; they do
/// not count as open.
async fn open_session_count(db: &Database) -> Result<i64, SmartlineError> {
    db.connection()
        .call(|conn| {
            let n = conn.query_row(
                "SELECT COUNT(*) FROM sessions WHERE state != 'exit'",
                [],
                |row| row.get(0),
            )?;
            Ok::<_, rusqlite::Error>(n)
        })
        .await
        .map_err(SmartlineError::storage)
}

/// Run the `smartline status` command.
pub async fn run_status(config: &SmartlineConfig, json: bool) -> Result<(), SmartlineError> {
    let db = Database::open_with(&config.storage.database_path, config.storage.wal_mode).await?;

    let report = StatusReport {
        database_path: config.storage.database_path.clone(),
        customers: table_count(&db, "customers").await?,
        open_sessions: open_session_count(&db).await?,
        issues: table_count(&db, "issues").await?,
        history_turns: table_count(&db, "history").await?,
    };
    db.close().await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report)
                .map_err(|e| SmartlineError::Internal(format!("status serialization: {e}")))?
        );
        return Ok(());
    }

    let use_color = std::io::stdout().is_terminal();
    let label = |s: &str| {
        if use_color {
            s.bold().to_string()
        } else {
            s.to_string()
        }
    };
    println!("{} {}", label("database:"), report.database_path);
    println!("{} {}", label("customers:"), report.customers);
    println!("{} {}", label("open sessions:"), report.open_sessions);
    println!("{} {}", label("issues:"), report.issues);
    println!("{} {}", label("history turns:"), report.history_turns);
    Ok(())
}
