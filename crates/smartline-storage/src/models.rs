// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row-level representations and their domain-type conversions.
//!
//! Customer, issue, and history rows map 1:1 onto the domain structs and
//! need no intermediate type. Sessions store the dialog state as its
//! snake_case name and the scratch bag as JSON, so they get an explicit row
//! struct with fallible conversions.

use std::str::FromStr;

use smartline_core::{DialogState, Scratch, Session, SmartlineError};

/// A sessions-table row as stored.
#[derive(Debug, Clone)]
pub struct SessionRow {
    pub id: String,
    pub customer_id: Option<String>,
    pub state: String,
    pub scratch: String,
    pub retry_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl SessionRow {
    /// Serializes a domain session for storage.
    pub fn from_session(session: &Session) -> Result<Self, SmartlineError> {
        let scratch = serde_json::to_string(&session.scratch).map_err(SmartlineError::storage)?;
        Ok(Self {
            id: session.id.clone(),
            customer_id: session.customer_id.clone(),
            state: session.state.to_string(),
            scratch,
            retry_count: i64::from(session.retry_count),
            created_at: session.created_at.clone(),
            updated_at: session.updated_at.clone(),
        })
    }

    /// Deserializes a stored row back into a domain session.
    ///
    /// An unparseable state name or scratch blob means the row predates a
    /// schema change and surfaces as a storage error.
    pub fn into_session(self) -> Result<Session, SmartlineError> {
        let state = DialogState::from_str(&self.state)
            .map_err(|_| SmartlineError::Internal(format!("unknown dialog state: {}", self.state)))?;
        let scratch: Scratch =
            serde_json::from_str(&self.scratch).map_err(SmartlineError::storage)?;
        Ok(Session {
            id: self.id,
            customer_id: self.customer_id,
            state,
            scratch,
            retry_count: self.retry_count as u32,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
