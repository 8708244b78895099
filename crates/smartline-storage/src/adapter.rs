// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the repository traits.

use async_trait::async_trait;
use tracing::debug;

use smartline_config::StorageConfig;
use smartline_core::{
    Customer, CustomerRepository, HistoryLog, HistoryRecord, IssueRecord, Session, SessionStore,
    SmartlineError,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed storage.
///
/// One struct implements all three repository traits; callers hold it as an
/// `Arc<SqliteStorage>` and coerce clones to the trait objects they need.
/// All operations funnel through the single writer thread of the wrapped
/// [`Database`].
pub struct SqliteStorage {
    db: Database,
}

impl SqliteStorage {
    /// Opens the database described by `config` and runs migrations.
    pub async fn open(config: &StorageConfig) -> Result<Self, SmartlineError> {
        let db = Database::open_with(&config.database_path, config.wal_mode).await?;
        debug!(path = %config.database_path, "SQLite storage initialized");
        Ok(Self { db })
    }

    /// Checkpoints and releases the writer thread.
    pub async fn close(&self) -> Result<(), SmartlineError> {
        self.db.close().await
    }
}

#[async_trait]
impl CustomerRepository for SqliteStorage {
    async fn get(&self, id: &str) -> Result<Option<Customer>, SmartlineError> {
        queries::customers::get_customer(&self.db, id).await
    }

    async fn create(&self, customer: &Customer) -> Result<Customer, SmartlineError> {
        queries::customers::create_customer(&self.db, customer).await
    }

    async fn recharge(&self, id: &str, amount: f64) -> Result<Customer, SmartlineError> {
        queries::customers::recharge_customer(&self.db, id, amount).await
    }

    async fn upgrade_plan(
        &self,
        id: &str,
        plan: &str,
        data_allowance: &str,
    ) -> Result<Customer, SmartlineError> {
        queries::customers::upgrade_plan(&self.db, id, plan, data_allowance).await
    }

    async fn append_issue(&self, id: &str, detail: &str) -> Result<(), SmartlineError> {
        queries::customers::append_issue(&self.db, id, detail).await
    }

    async fn issues(&self, id: &str) -> Result<Vec<IssueRecord>, SmartlineError> {
        queries::customers::issues_for_customer(&self.db, id).await
    }
}

#[async_trait]
impl SessionStore for SqliteStorage {
    async fn get(&self, id: &str) -> Result<Option<Session>, SmartlineError> {
        queries::sessions::get_session(&self.db, id).await
    }

    async fn save(&self, session: &Session) -> Result<(), SmartlineError> {
        queries::sessions::save_session(&self.db, session).await
    }

    async fn expire(&self, id: &str) -> Result<(), SmartlineError> {
        queries::sessions::expire_session(&self.db, id).await
    }
}

#[async_trait]
impl HistoryLog for SqliteStorage {
    async fn append(
        &self,
        customer_id: Option<&str>,
        user_msg: &str,
        bot_reply: &str,
    ) -> Result<(), SmartlineError> {
        queries::history::append_history(&self.db, customer_id, user_msg, bot_reply).await
    }

    async fn recent(
        &self,
        customer_id: &str,
        limit: i64,
    ) -> Result<Vec<HistoryRecord>, SmartlineError> {
        queries::history::recent_history(&self.db, customer_id, limit).await
    }
}
