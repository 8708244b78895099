// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles a complete dialog stack on a temp SQLite
//! database and provides `send()`/`drive()` to walk conversations through
//! the full pipeline.

use std::sync::Arc;

use smartline_config::StorageConfig;
use smartline_core::{
    Customer, CustomerRepository, SmartlineError, TurnReply,
};
use smartline_dialog::{DialogPolicy, RetryFallback, TurnEngine};
use smartline_storage::SqliteStorage;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    operator: String,
    retry_limit: u32,
    retry_fallback: RetryFallback,
    seed_customers: bool,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            operator: "SmartTel".to_string(),
            retry_limit: 3,
            retry_fallback: RetryFallback::CustomerCare,
            seed_customers: true,
        }
    }

    /// Override the spoken operator name.
    pub fn with_operator(mut self, operator: &str) -> Self {
        self.operator = operator.to_string();
        self
    }

    /// Override the unrecognized-input ceiling.
    pub fn with_retry_limit(mut self, limit: u32) -> Self {
        self.retry_limit = limit;
        self
    }

    /// Hang up at the retry ceiling instead of escalating to care.
    pub fn with_hang_up_fallback(mut self) -> Self {
        self.retry_fallback = RetryFallback::HangUp;
        self
    }

    /// Start with an empty customers table.
    pub fn without_seed_customers(mut self) -> Self {
        self.seed_customers = false;
        self
    }

    /// Build the harness: temp database, seeded customers, engine.
    pub async fn build(self) -> Result<TestHarness, SmartlineError> {
        let temp_dir = tempfile::TempDir::new().map_err(SmartlineError::storage)?;
        let db_path = temp_dir.path().join("test.db");

        let storage = Arc::new(
            SqliteStorage::open(&StorageConfig {
                database_path: db_path.to_string_lossy().to_string(),
                wal_mode: true,
            })
            .await?,
        );

        if self.seed_customers {
            for customer in seed_customers() {
                storage.create(&customer).await?;
            }
        }

        let engine = Arc::new(TurnEngine::new(
            storage.clone(),
            storage.clone(),
            storage.clone(),
            DialogPolicy {
                operator: self.operator,
                retry_limit: self.retry_limit,
                retry_fallback: self.retry_fallback,
            },
        ));

        Ok(TestHarness {
            engine,
            storage,
            _temp_dir: temp_dir,
        })
    }
}

/// The stock test customers, mirroring the demo dataset.
pub fn seed_customers() -> Vec<Customer> {
    vec![
        Customer {
            id: "1001".to_string(),
            name: "Aiza".to_string(),
            plan: "SmartPlan 299".to_string(),
            balance: 150.0,
            data_allowance: "1.5 GB".to_string(),
            phone: "9876543210".to_string(),
            created_at: smartline_core::now_rfc3339(),
        },
        Customer {
            id: "1002".to_string(),
            name: "Rahul".to_string(),
            plan: "SmartPlan 299".to_string(),
            balance: 150.0,
            data_allowance: "1.5 GB".to_string(),
            phone: "9876500000".to_string(),
            created_at: smartline_core::now_rfc3339(),
        },
    ]
}

/// A complete test environment on a temp database.
///
/// Storage is exposed for direct assertions; the temp directory lives as
/// long as the harness.
pub struct TestHarness {
    /// The dialog engine under test.
    pub engine: Arc<TurnEngine>,
    /// SQLite storage (temp DB, cleaned up on drop).
    pub storage: Arc<SqliteStorage>,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Run one turn on the given session.
    pub async fn send(&self, session_id: &str, input: &str) -> TurnReply {
        self.engine
            .handle_turn(session_id, input)
            .await
            .expect("turn failed")
    }

    /// Run a scripted conversation and return the last reply.
    pub async fn drive(&self, session_id: &str, inputs: &[&str]) -> TurnReply {
        let mut last = None;
        for input in inputs {
            last = Some(self.send(session_id, input).await);
        }
        last.expect("empty script")
    }

    /// A fresh session id for a new call.
    pub fn new_session_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Current customer record, panicking when absent.
    pub async fn customer(&self, id: &str) -> Customer {
        self.storage
            .get(id)
            .await
            .expect("customer lookup failed")
            .unwrap_or_else(|| panic!("customer {id} not found"))
    }
}
