// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only conversation audit trail.

use rusqlite::params;

use smartline_core::{HistoryRecord, SmartlineError};

use crate::database::{map_tr_err, Database};

/// Record one completed turn.
pub async fn append_history(
    db: &Database,
    customer_id: Option<&str>,
    user_msg: &str,
    bot_reply: &str,
) -> Result<(), SmartlineError> {
    let customer_id = customer_id.map(str::to_string);
    let user_msg = user_msg.to_string();
    let bot_reply = bot_reply.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO history (customer_id, user_msg, bot_reply, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![customer_id, user_msg, bot_reply, smartline_core::now_rfc3339()],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Most recent turns for a customer, newest first.
pub async fn recent_history(
    db: &Database,
    customer_id: &str,
    limit: i64,
) -> Result<Vec<HistoryRecord>, SmartlineError> {
    let customer_id = customer_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, customer_id, user_msg, bot_reply, created_at
                 FROM history WHERE customer_id = ?1 ORDER BY id DESC LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![customer_id, limit], |row| {
                Ok(HistoryRecord {
                    id: row.get(0)?,
                    customer_id: row.get(1)?,
                    user_msg: row.get(2)?,
                    bot_reply: row.get(3)?,
                    created_at: row.get(4)?,
                })
            })?;
            let mut records = Vec::new();
            for row in rows {
                records.push(row?);
            }
            Ok(records)
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn append_allows_null_customer_id() {
        let (db, _dir) = setup_db().await;
        append_history(&db, None, "hello", "welcome").await.unwrap();
        append_history(&db, Some("1001"), "check balance", "150 rupees")
            .await
            .unwrap();

        // Anonymous rows are invisible to a per-customer query.
        let rows = recent_history(&db, "1001", 10).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].user_msg, "check balance");
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn recent_returns_newest_first_and_honors_limit() {
        let (db, _dir) = setup_db().await;
        for i in 0..5 {
            append_history(&db, Some("1001"), &format!("msg {i}"), "ok")
                .await
                .unwrap();
        }

        let rows = recent_history(&db, "1001", 3).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].user_msg, "msg 4");
        assert_eq!(rows[2].user_msg, "msg 2");
        db.close().await.unwrap();
    }
}
