// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use std::path::Path;

use tracing::debug;

use smartline_core::SmartlineError;

use crate::migrations;

/// Handle to the SQLite database behind the single writer thread.
#[derive(Clone)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Opens (creating if needed) the database at `path` with WAL mode.
    pub async fn open(path: &str) -> Result<Self, SmartlineError> {
        Self::open_with(path, true).await
    }

    /// Opens the database, optionally skipping WAL mode.
    ///
    /// Parent directories are created, PRAGMAs applied, and pending
    /// migrations run before the handle is returned.
    pub async fn open_with(path: &str, wal_mode: bool) -> Result<Self, SmartlineError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(SmartlineError::storage)?;
            }
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(SmartlineError::storage)?;

        conn.call(move |conn| {
            if wal_mode {
                conn.pragma_update(None, "journal_mode", "WAL")?;
            }
            conn.pragma_update(None, "synchronous", "NORMAL")?;
            conn.pragma_update(None, "foreign_keys", "ON")?;
            conn.pragma_update(None, "busy_timeout", 5000)?;
            migrations::run_migrations(conn)
                .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
            Ok::<_, Box<dyn std::error::Error + Send + Sync>>(())
        })
        .await
        .map_err(|e| match e {
            tokio_rusqlite::Error::Error(source) => SmartlineError::Storage { source },
            tokio_rusqlite::Error::ConnectionClosed => {
                map_tr_err(tokio_rusqlite::Error::ConnectionClosed)
            }
            tokio_rusqlite::Error::Close((conn, e)) => {
                map_tr_err(tokio_rusqlite::Error::Close((conn, e)))
            }
            other => SmartlineError::Storage {
                source: other.to_string().into(),
            },
        })?;

        debug!(path, wal_mode, "database opened");
        Ok(Self { conn })
    }

    /// The shared connection handle. All queries go through `call`.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoints the WAL and closes the writer thread.
    pub async fn close(&self) -> Result<(), SmartlineError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

/// Maps a tokio-rusqlite error into the crate error type.
pub fn map_tr_err(err: tokio_rusqlite::Error) -> SmartlineError {
    SmartlineError::storage(err)
}
