// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turn orchestration.
//!
//! [`TurnEngine`] owns the per-turn pipeline: load the session, snapshot the
//! customer, classify, run the pure transition, persist the session, apply
//! the requested storage ops, and append the audit trail. Channel adapters
//! (HTTP gateway, interactive shell) call [`TurnEngine::handle_turn`] and
//! render the reply; they never touch storage directly.

use std::sync::Arc;

use tracing::{debug, warn};

use smartline_config::SmartlineConfig;
use smartline_core::{
    Customer, CustomerRepository, HistoryLog, IssueRecord, Session, SessionStore, SmartlineError,
    TurnReply,
};
use smartline_intent::{classify, normalize_caller_id};

use crate::prompts;
use crate::transition::{transition, DialogPolicy, RepoOp, RetryFallback, TurnOutcome};

impl DialogPolicy {
    /// Derives the dialog tunables from loaded configuration.
    pub fn from_config(config: &SmartlineConfig) -> Self {
        Self {
            operator: config.agent.operator.clone(),
            retry_limit: config.dialog.retry_limit,
            retry_fallback: match config.dialog.retry_fallback {
                smartline_config::RetryFallback::CustomerCare => RetryFallback::CustomerCare,
                smartline_config::RetryFallback::HangUp => RetryFallback::HangUp,
            },
        }
    }
}

/// The dialog engine shared across channels.
pub struct TurnEngine {
    customers: Arc<dyn CustomerRepository>,
    sessions: Arc<dyn SessionStore>,
    history: Arc<dyn HistoryLog>,
    policy: DialogPolicy,
}

impl TurnEngine {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        sessions: Arc<dyn SessionStore>,
        history: Arc<dyn HistoryLog>,
        policy: DialogPolicy,
    ) -> Self {
        Self {
            customers,
            sessions,
            history,
            policy,
        }
    }

    /// Processes one inbound turn for `session_id`.
    ///
    /// Unknown session ids start a fresh call. A turn for a session that
    /// already ended answers with a graceful goodbye and releases the row.
    /// The advanced session state is persisted before any repository op is
    /// applied, so a replayed turn never applies the same mutation twice; a
    /// persist failure swaps the reply for the service-unavailable apology
    /// with the session row and the customer record both unchanged.
    pub async fn handle_turn(
        &self,
        session_id: &str,
        raw: &str,
    ) -> Result<TurnReply, SmartlineError> {
        let session = match self.sessions.get(session_id).await? {
            Some(session) => session,
            None => Session::new(session_id),
        };

        if session.state.is_terminal() {
            let reply = prompts::session_ended();
            self.sessions.expire(session_id).await?;
            self.log_history(session.customer_id.as_deref(), raw, &reply)
                .await;
            return Ok(TurnReply {
                reply_text: reply,
                session_closed: true,
            });
        }

        let customer = match self.snapshot_customer(&session, raw).await {
            Ok(customer) => customer,
            Err(err) if !err.is_recoverable() => {
                warn!(session_id, error = %err, "customer snapshot failed");
                let reply = prompts::service_unavailable();
                self.log_history(session.customer_id.as_deref(), raw, &reply)
                    .await;
                return Ok(TurnReply {
                    reply_text: reply,
                    session_closed: false,
                });
            }
            Err(_) => None,
        };

        let intent = classify(raw);
        debug!(session_id, state = %session.state, %intent, "turn");
        let outcome = transition(&session, customer.as_ref(), intent, raw, &self.policy);

        let customer_id = outcome
            .customer_id
            .clone()
            .or_else(|| session.customer_id.clone());

        // Durable dialog state first: a replayed turn must never apply the
        // same op twice.
        if let Err(err) = self.persist(session, &outcome, customer_id.clone()).await {
            warn!(session_id, error = %err, "session persist failed");
            let reply = prompts::service_unavailable();
            self.log_history(customer_id.as_deref(), raw, &reply).await;
            return Ok(TurnReply {
                reply_text: reply,
                session_closed: false,
            });
        }

        let reply = match self.apply_ops(&outcome.ops).await {
            Ok(()) => outcome.reply.clone(),
            Err(err) => {
                // The dialog has already moved on; the mutation never
                // landed, so the caller asks again from the menu.
                warn!(session_id, error = %err, "turn op failed");
                if err.is_recoverable() {
                    prompts::apology()
                } else {
                    prompts::service_unavailable()
                }
            }
        };
        self.log_history(customer_id.as_deref(), raw, &reply).await;

        Ok(TurnReply {
            reply_text: reply,
            session_closed: outcome.close_session,
        })
    }

    /// Read-only customer lookup for status surfaces.
    pub async fn customer(&self, id: &str) -> Result<Option<Customer>, SmartlineError> {
        self.customers.get(id).await
    }

    /// Reported issues for a customer, oldest first.
    pub async fn issues(&self, id: &str) -> Result<Vec<IssueRecord>, SmartlineError> {
        self.customers.issues(id).await
    }

    async fn snapshot_customer(
        &self,
        session: &Session,
        raw: &str,
    ) -> Result<Option<Customer>, SmartlineError> {
        if let Some(id) = &session.customer_id {
            return self.customers.get(id).await;
        }
        if session.state == smartline_core::DialogState::Identify {
            let id = normalize_caller_id(raw);
            if !id.is_empty() {
                return self.customers.get(&id).await;
            }
        }
        Ok(None)
    }

    async fn apply_ops(&self, ops: &[RepoOp]) -> Result<(), SmartlineError> {
        for op in ops {
            match op {
                RepoOp::CreateCustomer { customer } => {
                    self.customers.create(customer).await?;
                }
                RepoOp::Recharge {
                    customer_id,
                    amount,
                } => {
                    self.customers.recharge(customer_id, *amount).await?;
                }
                RepoOp::UpgradePlan {
                    customer_id,
                    plan,
                    data_allowance,
                } => {
                    self.customers
                        .upgrade_plan(customer_id, plan, data_allowance)
                        .await?;
                }
                RepoOp::AppendIssue {
                    customer_id,
                    detail,
                } => {
                    self.customers.append_issue(customer_id, detail).await?;
                }
            }
        }
        Ok(())
    }

    /// Saves the advanced session row. Terminal closes keep the row with
    /// its `Exit` state so a late turn on the id gets a graceful goodbye.
    async fn persist(
        &self,
        mut session: Session,
        outcome: &TurnOutcome,
        customer_id: Option<String>,
    ) -> Result<(), SmartlineError> {
        session.state = outcome.next_state;
        session.scratch = outcome.scratch.clone();
        session.retry_count = outcome.retry_count;
        session.customer_id = customer_id;
        session.updated_at = smartline_core::now_rfc3339();
        self.sessions.save(&session).await
    }

    /// History is an audit trail; a failed append never fails the turn.
    async fn log_history(&self, customer_id: Option<&str>, user_msg: &str, bot_reply: &str) {
        if let Err(err) = self.history.append(customer_id, user_msg, bot_reply).await {
            warn!(error = %err, "history append failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use smartline_core::{DialogState, HistoryRecord};
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemRepo {
        customers: Mutex<HashMap<String, Customer>>,
        issues: Mutex<Vec<IssueRecord>>,
        fail_storage: std::sync::atomic::AtomicBool,
    }

    impl MemRepo {
        fn seeded() -> Self {
            let repo = Self::default();
            repo.customers.lock().unwrap().insert(
                "1001".to_string(),
                Customer {
                    id: "1001".to_string(),
                    name: "Aiza".to_string(),
                    plan: "SmartPlan 299".to_string(),
                    balance: 150.0,
                    data_allowance: "1.5 GB".to_string(),
                    phone: "9876543210".to_string(),
                    created_at: smartline_core::now_rfc3339(),
                },
            );
            repo
        }

        fn check_up(&self) -> Result<(), SmartlineError> {
            if self.fail_storage.load(std::sync::atomic::Ordering::SeqCst) {
                Err(SmartlineError::storage(std::io::Error::other("db down")))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl CustomerRepository for MemRepo {
        async fn get(&self, id: &str) -> Result<Option<Customer>, SmartlineError> {
            self.check_up()?;
            Ok(self.customers.lock().unwrap().get(id).cloned())
        }

        async fn create(&self, customer: &Customer) -> Result<Customer, SmartlineError> {
            self.check_up()?;
            let mut map = self.customers.lock().unwrap();
            if map.contains_key(&customer.id) {
                return Err(SmartlineError::DuplicateId {
                    id: customer.id.clone(),
                });
            }
            map.insert(customer.id.clone(), customer.clone());
            Ok(customer.clone())
        }

        async fn recharge(&self, id: &str, amount: f64) -> Result<Customer, SmartlineError> {
            self.check_up()?;
            if amount <= 0.0 {
                return Err(SmartlineError::InvalidAmount { amount });
            }
            let mut map = self.customers.lock().unwrap();
            let customer = map.get_mut(id).ok_or_else(|| SmartlineError::NotFound {
                entity: "customer",
                id: id.to_string(),
            })?;
            customer.balance += amount;
            Ok(customer.clone())
        }

        async fn upgrade_plan(
            &self,
            id: &str,
            plan: &str,
            data_allowance: &str,
        ) -> Result<Customer, SmartlineError> {
            self.check_up()?;
            let mut map = self.customers.lock().unwrap();
            let customer = map.get_mut(id).ok_or_else(|| SmartlineError::NotFound {
                entity: "customer",
                id: id.to_string(),
            })?;
            customer.plan = plan.to_string();
            customer.data_allowance = data_allowance.to_string();
            Ok(customer.clone())
        }

        async fn append_issue(&self, id: &str, detail: &str) -> Result<(), SmartlineError> {
            self.check_up()?;
            let mut issues = self.issues.lock().unwrap();
            let next_id = issues.len() as i64 + 1;
            issues.push(IssueRecord {
                id: next_id,
                customer_id: id.to_string(),
                detail: detail.to_string(),
                created_at: smartline_core::now_rfc3339(),
            });
            Ok(())
        }

        async fn issues(&self, id: &str) -> Result<Vec<IssueRecord>, SmartlineError> {
            self.check_up()?;
            Ok(self
                .issues
                .lock()
                .unwrap()
                .iter()
                .filter(|i| i.customer_id == id)
                .cloned()
                .collect())
        }
    }

    #[derive(Default)]
    struct MemSessions {
        rows: Mutex<HashMap<String, Session>>,
        fail_next_save: std::sync::atomic::AtomicBool,
    }

    #[async_trait]
    impl SessionStore for MemSessions {
        async fn get(&self, id: &str) -> Result<Option<Session>, SmartlineError> {
            Ok(self.rows.lock().unwrap().get(id).cloned())
        }

        async fn save(&self, session: &Session) -> Result<(), SmartlineError> {
            if self
                .fail_next_save
                .swap(false, std::sync::atomic::Ordering::SeqCst)
            {
                return Err(SmartlineError::storage(std::io::Error::other("db down")));
            }
            self.rows
                .lock()
                .unwrap()
                .insert(session.id.clone(), session.clone());
            Ok(())
        }

        async fn expire(&self, id: &str) -> Result<(), SmartlineError> {
            self.rows.lock().unwrap().remove(id);
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemHistory(Mutex<Vec<HistoryRecord>>);

    #[async_trait]
    impl HistoryLog for MemHistory {
        async fn append(
            &self,
            customer_id: Option<&str>,
            user_msg: &str,
            bot_reply: &str,
        ) -> Result<(), SmartlineError> {
            let mut rows = self.0.lock().unwrap();
            let next_id = rows.len() as i64 + 1;
            rows.push(HistoryRecord {
                id: next_id,
                customer_id: customer_id.map(str::to_string),
                user_msg: user_msg.to_string(),
                bot_reply: bot_reply.to_string(),
                created_at: smartline_core::now_rfc3339(),
            });
            Ok(())
        }

        async fn recent(
            &self,
            customer_id: &str,
            limit: i64,
        ) -> Result<Vec<HistoryRecord>, SmartlineError> {
            Ok(self
                .0
                .lock()
                .unwrap()
                .iter()
                .rev()
                .filter(|r| r.customer_id.as_deref() == Some(customer_id))
                .take(limit as usize)
                .cloned()
                .collect())
        }
    }

    struct Harness {
        repo: Arc<MemRepo>,
        sessions: Arc<MemSessions>,
        history: Arc<MemHistory>,
        engine: TurnEngine,
    }

    fn harness() -> Harness {
        let repo = Arc::new(MemRepo::seeded());
        let sessions = Arc::new(MemSessions::default());
        let history = Arc::new(MemHistory::default());
        let engine = TurnEngine::new(
            repo.clone(),
            sessions.clone(),
            history.clone(),
            DialogPolicy {
                operator: "SmartTel".to_string(),
                retry_limit: 3,
                retry_fallback: RetryFallback::CustomerCare,
            },
        );
        Harness {
            repo,
            sessions,
            history,
            engine,
        }
    }

    async fn drive(h: &Harness, session: &str, inputs: &[&str]) -> TurnReply {
        let mut last = None;
        for input in inputs {
            last = Some(h.engine.handle_turn(session, input).await.unwrap());
        }
        last.unwrap()
    }

    #[tokio::test]
    async fn full_recharge_conversation() {
        let h = harness();
        let reply = drive(&h, "call-1", &["hello", "one zero zero one", "recharge", "299"]).await;
        assert!(reply.reply_text.contains("449"));
        assert!(!reply.session_closed);

        let customer = h.repo.get("1001").await.unwrap().unwrap();
        assert_eq!(customer.balance, 449.0);
    }

    #[tokio::test]
    async fn exit_marks_the_session_ended_and_late_turns_get_a_goodbye() {
        let h = harness();
        let reply = drive(&h, "call-1", &["hello", "1001", "exit"]).await;
        assert!(reply.session_closed);
        let row = h.sessions.get("call-1").await.unwrap().unwrap();
        assert_eq!(row.state, DialogState::Exit);

        // A late turn on the ended session gets the goodbye and releases
        // the row.
        let reply = h.engine.handle_turn("call-1", "hello?").await.unwrap();
        assert!(reply.session_closed);
        assert!(reply.reply_text.contains("session has ended"));
        assert!(h.sessions.get("call-1").await.unwrap().is_none());

        // The id is now a fresh call.
        let reply = h.engine.handle_turn("call-1", "hi").await.unwrap();
        assert!(reply.reply_text.contains("SmartTel"));
        assert!(!reply.session_closed);
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let h = harness();
        drive(&h, "call-a", &["hello", "1001", "recharge"]).await;
        let reply = drive(&h, "call-b", &["hello"]).await;
        // call-b is still identifying while call-a awaits an amount.
        assert!(reply.reply_text.contains("customer I D"));
        let a = h.sessions.get("call-a").await.unwrap().unwrap();
        let b = h.sessions.get("call-b").await.unwrap().unwrap();
        assert_eq!(a.state, DialogState::RechargeAmount);
        assert_eq!(b.state, DialogState::Identify);
    }

    #[tokio::test]
    async fn registration_creates_a_customer_with_defaults() {
        let h = harness();
        let reply = drive(
            &h,
            "call-1",
            &["hello", "9999", "yes", "farah khan", "98765 43210"],
        )
        .await;
        assert!(reply.reply_text.contains("Farah Khan"));
        let customer = h.repo.get("9999").await.unwrap().unwrap();
        assert_eq!(customer.plan, "SmartPlan 299");
        assert_eq!(customer.balance, 150.0);
        assert_eq!(customer.phone, "9876543210");
    }

    #[tokio::test]
    async fn storage_outage_apologizes_and_keeps_the_session() {
        let h = harness();
        drive(&h, "call-1", &["hello", "1001", "recharge"]).await;
        let before = h.sessions.get("call-1").await.unwrap().unwrap();

        h.repo
            .fail_storage
            .store(true, std::sync::atomic::Ordering::SeqCst);
        let reply = h.engine.handle_turn("call-1", "299").await.unwrap();
        assert!(reply.reply_text.contains("temporarily unavailable"));
        assert!(!reply.session_closed);

        // Same state as before the outage; the turn can be replayed.
        let after = h.sessions.get("call-1").await.unwrap().unwrap();
        assert_eq!(after.state, before.state);

        h.repo
            .fail_storage
            .store(false, std::sync::atomic::Ordering::SeqCst);
        let reply = h.engine.handle_turn("call-1", "299").await.unwrap();
        assert!(reply.reply_text.contains("449"));
    }

    #[tokio::test]
    async fn persist_failure_never_applies_the_recharge() {
        let h = harness();
        drive(&h, "call-1", &["hello", "1001", "recharge"]).await;

        h.sessions
            .fail_next_save
            .store(true, std::sync::atomic::Ordering::SeqCst);
        let reply = h.engine.handle_turn("call-1", "199").await.unwrap();
        assert!(reply.reply_text.contains("temporarily unavailable"));
        assert!(!reply.session_closed);

        // The save failed before any op ran, so the balance is untouched
        // and the session still awaits an amount.
        let customer = h.repo.get("1001").await.unwrap().unwrap();
        assert_eq!(customer.balance, 150.0);
        let row = h.sessions.get("call-1").await.unwrap().unwrap();
        assert_eq!(row.state, DialogState::RechargeAmount);

        // Replaying the turn charges exactly once.
        let reply = h.engine.handle_turn("call-1", "199").await.unwrap();
        assert!(reply.reply_text.contains("349"));
        let customer = h.repo.get("1001").await.unwrap().unwrap();
        assert_eq!(customer.balance, 349.0);
    }

    #[tokio::test]
    async fn history_records_every_turn_with_binding_when_known() {
        let h = harness();
        drive(&h, "call-1", &["hello", "1001", "check balance"]).await;
        let rows = h.history.0.lock().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].customer_id, None);
        assert_eq!(rows[1].customer_id.as_deref(), Some("1001"));
        assert_eq!(rows[2].customer_id.as_deref(), Some("1001"));
    }

    #[tokio::test]
    async fn upgrade_round_trip_changes_the_stored_plan() {
        let h = harness();
        drive(&h, "call-1", &["hello", "1001", "data packs", "yes"]).await;
        let customer = h.repo.get("1001").await.unwrap().unwrap();
        assert_eq!(customer.plan, "Premium 499");
        assert_eq!(customer.data_allowance, "2.5 GB");
    }

    #[tokio::test]
    async fn issue_flow_appends_to_the_issues_table() {
        let h = harness();
        drive(
            &h,
            "call-1",
            &["hello", "1001", "recharge issue", "paid twice yesterday"],
        )
        .await;
        let issues = h.repo.issues("1001").await.unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].detail, "paid twice yesterday");
    }
}
