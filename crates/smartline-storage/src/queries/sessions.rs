// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session row CRUD.

use rusqlite::params;

use smartline_core::{Session, SmartlineError};

use crate::database::{map_tr_err, Database};
use crate::models::SessionRow;

/// Get a session by id.
pub async fn get_session(db: &Database, id: &str) -> Result<Option<Session>, SmartlineError> {
    let id = id.to_string();
    let row = db
        .connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, customer_id, state, scratch, retry_count, created_at, updated_at
                 FROM sessions WHERE id = ?1",
            )?;
            let result = stmt.query_row(params![id], |row| {
                Ok(SessionRow {
                    id: row.get(0)?,
                    customer_id: row.get(1)?,
                    state: row.get(2)?,
                    scratch: row.get(3)?,
                    retry_count: row.get(4)?,
                    created_at: row.get(5)?,
                    updated_at: row.get(6)?,
                })
            });
            match result {
                Ok(row) => Ok(Some(row)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)?;
    row.map(SessionRow::into_session).transpose()
}

/// Insert or replace a session row.
pub async fn save_session(db: &Database, session: &Session) -> Result<(), SmartlineError> {
    let row = SessionRow::from_session(session)?;
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO sessions (id, customer_id, state, scratch, retry_count, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT(id) DO UPDATE SET
                     customer_id = excluded.customer_id,
                     state = excluded.state,
                     scratch = excluded.scratch,
                     retry_count = excluded.retry_count,
                     updated_at = excluded.updated_at",
                params![
                    row.id,
                    row.customer_id,
                    row.state,
                    row.scratch,
                    row.retry_count,
                    row.created_at,
                    row.updated_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Delete a session row. A no-op for unknown ids.
pub async fn expire_session(db: &Database, id: &str) -> Result<(), SmartlineError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute("DELETE FROM sessions WHERE id = ?1", params![id])?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartline_core::DialogState;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn save_and_get_session_roundtrips() {
        let (db, _dir) = setup_db().await;
        let mut session = Session::new("call-1");
        session.state = DialogState::MainMenu;
        session.customer_id = Some("1001".to_string());
        session.retry_count = 1;

        save_session(&db, &session).await.unwrap();
        let back = get_session(&db, "call-1").await.unwrap().unwrap();
        assert_eq!(back, session);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn get_unknown_session_returns_none() {
        let (db, _dir) = setup_db().await;
        assert!(get_session(&db, "no-such").await.unwrap().is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn save_is_an_upsert() {
        let (db, _dir) = setup_db().await;
        let mut session = Session::new("call-1");
        save_session(&db, &session).await.unwrap();

        session.state = DialogState::RechargeAmount;
        session.customer_id = Some("1001".to_string());
        save_session(&db, &session).await.unwrap();

        let back = get_session(&db, "call-1").await.unwrap().unwrap();
        assert_eq!(back.state, DialogState::RechargeAmount);
        assert_eq!(back.customer_id.as_deref(), Some("1001"));
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn expire_deletes_and_is_idempotent() {
        let (db, _dir) = setup_db().await;
        let session = Session::new("call-1");
        save_session(&db, &session).await.unwrap();

        expire_session(&db, "call-1").await.unwrap();
        assert!(get_session(&db, "call-1").await.unwrap().is_none());
        expire_session(&db, "call-1").await.unwrap();
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn scratch_survives_storage() {
        let (db, _dir) = setup_db().await;
        let mut session = Session::new("call-1");
        session.state = DialogState::RegisterName;
        session.scratch.pending_customer_id = Some("9999".to_string());

        save_session(&db, &session).await.unwrap();
        let back = get_session(&db, "call-1").await.unwrap().unwrap();
        assert_eq!(back.scratch.pending_customer_id.as_deref(), Some("9999"));
        db.close().await.unwrap();
    }
}
