// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `smartline serve` command implementation.
//!
//! Starts the HTTP gateway on top of SQLite storage and the shared turn
//! engine. Supports graceful shutdown via Ctrl+C.

use std::sync::Arc;

use tracing::info;

use smartline_config::SmartlineConfig;
use smartline_core::SmartlineError;
use smartline_dialog::{DialogPolicy, TurnEngine};
use smartline_gateway::{start_server, GatewayState};
use smartline_storage::SqliteStorage;

/// Runs the `smartline serve` command.
pub async fn run_serve(config: SmartlineConfig) -> Result<(), SmartlineError> {
    info!("starting smartline serve");

    let storage = Arc::new(SqliteStorage::open(&config.storage).await?);

    let engine = Arc::new(TurnEngine::new(
        storage.clone(),
        storage.clone(),
        storage.clone(),
        DialogPolicy::from_config(&config),
    ));

    let state = GatewayState::new(engine);
    let gateway_config = config.gateway.clone();

    tokio::select! {
        result = start_server(&gateway_config, state) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    storage.close().await?;
    info!("smartline serve stopped");
    Ok(())
}
