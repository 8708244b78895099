// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Repository traits for customer, session, and history persistence.

use async_trait::async_trait;

use crate::error::SmartlineError;
use crate::types::{Customer, HistoryRecord, IssueRecord, Session};

/// CRUD plus atomic balance/plan mutation over customer records.
///
/// Implementations must serialize mutations per customer id: two concurrent
/// recharges on the same id must both land in the final balance. The SQLite
/// backend satisfies this with relative updates on a single writer thread.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Looks up a customer by id. `Ok(None)` when the id is unknown.
    async fn get(&self, id: &str) -> Result<Option<Customer>, SmartlineError>;

    /// Inserts a new customer record.
    ///
    /// Fails with [`SmartlineError::DuplicateId`] when the id already exists.
    async fn create(&self, customer: &Customer) -> Result<Customer, SmartlineError>;

    /// Atomically adds `amount` to the customer's balance and returns the
    /// updated record.
    ///
    /// Fails with [`SmartlineError::InvalidAmount`] for `amount <= 0` and
    /// [`SmartlineError::NotFound`] for an unknown id.
    async fn recharge(&self, id: &str, amount: f64) -> Result<Customer, SmartlineError>;

    /// Moves the customer to a new plan with its matching data allowance.
    ///
    /// Callers pass both labels from the plan catalog so the stored pair is
    /// always consistent.
    async fn upgrade_plan(
        &self,
        id: &str,
        plan: &str,
        data_allowance: &str,
    ) -> Result<Customer, SmartlineError>;

    /// Appends a reported issue to the customer's account.
    async fn append_issue(&self, id: &str, detail: &str) -> Result<(), SmartlineError>;

    /// Returns the customer's reported issues, oldest first.
    async fn issues(&self, id: &str) -> Result<Vec<IssueRecord>, SmartlineError>;
}

/// Creates, looks up, and expires per-call dialog sessions.
///
/// The store exclusively owns `Session` rows; sessions with distinct ids
/// never share state.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Looks up a session by id. `Ok(None)` when no session exists.
    async fn get(&self, id: &str) -> Result<Option<Session>, SmartlineError>;

    /// Inserts or replaces the session row.
    async fn save(&self, session: &Session) -> Result<(), SmartlineError>;

    /// Removes the session. A no-op for unknown ids.
    async fn expire(&self, id: &str) -> Result<(), SmartlineError>;
}

/// Append-only audit trail, one row per completed turn.
#[async_trait]
pub trait HistoryLog: Send + Sync {
    /// Records a turn. `customer_id` is `None` before identification.
    async fn append(
        &self,
        customer_id: Option<&str>,
        user_msg: &str,
        bot_reply: &str,
    ) -> Result<(), SmartlineError>;

    /// Returns the most recent turns for a customer, newest first.
    async fn recent(
        &self,
        customer_id: &str,
        limit: i64,
    ) -> Result<Vec<HistoryRecord>, SmartlineError>;
}
