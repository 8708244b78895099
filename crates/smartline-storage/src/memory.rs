// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory session store.
//!
//! Sessions are ephemeral by nature; channels that have no reason to
//! survive a restart (the interactive shell, tests) use this instead of
//! the sessions table.

use async_trait::async_trait;
use dashmap::DashMap;

use smartline_core::{Session, SessionStore, SmartlineError};

/// Concurrent map-backed [`SessionStore`].
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: DashMap<String, Session>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, id: &str) -> Result<Option<Session>, SmartlineError> {
        Ok(self.sessions.get(id).map(|entry| entry.clone()))
    }

    async fn save(&self, session: &Session) -> Result<(), SmartlineError> {
        self.sessions.insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn expire(&self, id: &str) -> Result<(), SmartlineError> {
        self.sessions.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartline_core::DialogState;

    #[tokio::test]
    async fn save_get_expire_cycle() {
        let store = MemorySessionStore::new();
        let mut session = Session::new("call-1");
        session.state = DialogState::MainMenu;

        store.save(&session).await.unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("call-1").await.unwrap().unwrap().state, DialogState::MainMenu);

        store.expire("call-1").await.unwrap();
        assert!(store.get("call-1").await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn distinct_ids_never_share_state() {
        let store = MemorySessionStore::new();
        let mut a = Session::new("call-a");
        a.state = DialogState::RechargeAmount;
        let b = Session::new("call-b");

        store.save(&a).await.unwrap();
        store.save(&b).await.unwrap();

        assert_eq!(
            store.get("call-a").await.unwrap().unwrap().state,
            DialogState::RechargeAmount
        );
        assert_eq!(store.get("call-b").await.unwrap().unwrap().state, DialogState::Start);
    }
}
