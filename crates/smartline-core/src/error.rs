// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Smartline IVR engine.

use thiserror::Error;

/// The primary error type used across all Smartline crates.
///
/// Repository-level domain errors (`NotFound`, `DuplicateId`,
/// `InvalidAmount`) are recoverable: the turn engine turns them into a
/// user-facing apology and keeps the session alive. `Storage` is fatal for
/// the current turn only -- the caller gets a service-unavailable reply and
/// no customer mutation is ever applied twice for one turn.
#[derive(Debug, Error)]
pub enum SmartlineError {
    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A customer or session record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Registration attempted with an id that already exists.
    #[error("customer id already registered: {id}")]
    DuplicateId { id: String },

    /// Recharge amount was zero or negative.
    #[error("invalid recharge amount: {amount}")]
    InvalidAmount { amount: f64 },

    /// The speech recognizer collaborator failed to produce text.
    #[error("recognition failed: {message}")]
    Recognition { message: String },

    /// Transport adapter errors (bind failure, malformed request).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SmartlineError {
    /// Wraps any error as a `Storage` failure.
    pub fn storage<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage {
            source: Box::new(source),
        }
    }

    /// True for repository domain errors the dialog can apologize for and
    /// continue.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::DuplicateId { .. } | Self::InvalidAmount { .. }
        )
    }
}
