// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Customer CRUD and balance/plan mutation.
//!
//! Recharge and upgrade are relative updates executed on the single writer
//! thread, so concurrent mutations on the same customer serialize and both
//! land.

use rusqlite::params;

use smartline_core::{Customer, IssueRecord, SmartlineError};

use crate::database::{map_tr_err, Database};

const CUSTOMER_COLUMNS: &str = "id, name, plan, balance, data_allowance, phone, created_at";

fn row_to_customer(row: &rusqlite::Row<'_>) -> Result<Customer, rusqlite::Error> {
    Ok(Customer {
        id: row.get(0)?,
        name: row.get(1)?,
        plan: row.get(2)?,
        balance: row.get(3)?,
        data_allowance: row.get(4)?,
        phone: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn select_customer(
    conn: &rusqlite::Connection,
    id: &str,
) -> Result<Option<Customer>, rusqlite::Error> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = ?1"
    ))?;
    match stmt.query_row(params![id], row_to_customer) {
        Ok(customer) => Ok(Some(customer)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Get a customer by id.
pub async fn get_customer(db: &Database, id: &str) -> Result<Option<Customer>, SmartlineError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| Ok(select_customer(conn, &id)?))
        .await
        .map_err(map_tr_err)
}

/// Insert a new customer record.
pub async fn create_customer(
    db: &Database,
    customer: &Customer,
) -> Result<Customer, SmartlineError> {
    let customer = customer.clone();
    let id = customer.id.clone();
    let result = db
        .connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO customers (id, name, plan, balance, data_allowance, phone, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    customer.id,
                    customer.name,
                    customer.plan,
                    customer.balance,
                    customer.data_allowance,
                    customer.phone,
                    customer.created_at,
                ],
            )?;
            Ok(customer)
        })
        .await;
    match result {
        Ok(customer) => Ok(customer),
        Err(tokio_rusqlite::Error::Error(rusqlite::Error::SqliteFailure(e, _)))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(SmartlineError::DuplicateId { id })
        }
        Err(e) => Err(map_tr_err(e)),
    }
}

/// Atomically add `amount` to a customer's balance and return the updated
/// record.
pub async fn recharge_customer(
    db: &Database,
    id: &str,
    amount: f64,
) -> Result<Customer, SmartlineError> {
    if amount <= 0.0 {
        return Err(SmartlineError::InvalidAmount { amount });
    }
    let id = id.to_string();
    let id_for_err = id.clone();
    db.connection()
        .call(move |conn| {
            let updated = conn.execute(
                "UPDATE customers SET balance = balance + ?1 WHERE id = ?2",
                params![amount, id],
            )?;
            if updated == 0 {
                return Ok(None);
            }
            Ok(select_customer(conn, &id)?)
        })
        .await
        .map_err(map_tr_err)?
        .ok_or(SmartlineError::NotFound {
            entity: "customer",
            id: id_for_err,
        })
}

/// Move a customer to a new plan/allowance pair.
pub async fn upgrade_plan(
    db: &Database,
    id: &str,
    plan: &str,
    data_allowance: &str,
) -> Result<Customer, SmartlineError> {
    let id = id.to_string();
    let id_for_err = id.clone();
    let plan = plan.to_string();
    let data_allowance = data_allowance.to_string();
    db.connection()
        .call(move |conn| {
            let updated = conn.execute(
                "UPDATE customers SET plan = ?1, data_allowance = ?2 WHERE id = ?3",
                params![plan, data_allowance, id],
            )?;
            if updated == 0 {
                return Ok(None);
            }
            Ok(select_customer(conn, &id)?)
        })
        .await
        .map_err(map_tr_err)?
        .ok_or(SmartlineError::NotFound {
            entity: "customer",
            id: id_for_err,
        })
}

/// Append a reported issue to a customer's account.
pub async fn append_issue(db: &Database, id: &str, detail: &str) -> Result<(), SmartlineError> {
    let id = id.to_string();
    let id_for_err = id.clone();
    let detail = detail.to_string();
    let result = db
        .connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO issues (customer_id, detail, created_at)
                 VALUES (?1, ?2, ?3)",
                params![id, detail, smartline_core::now_rfc3339()],
            )?;
            Ok(())
        })
        .await;
    match result {
        Ok(()) => Ok(()),
        // Foreign key violation: the customer row does not exist.
        Err(tokio_rusqlite::Error::Error(rusqlite::Error::SqliteFailure(e, _)))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(SmartlineError::NotFound {
                entity: "customer",
                id: id_for_err,
            })
        }
        Err(e) => Err(map_tr_err(e)),
    }
}

/// Reported issues for a customer, oldest first.
pub async fn issues_for_customer(
    db: &Database,
    id: &str,
) -> Result<Vec<IssueRecord>, SmartlineError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, customer_id, detail, created_at
                 FROM issues WHERE customer_id = ?1 ORDER BY id ASC",
            )?;
            let rows = stmt.query_map(params![id], |row| {
                Ok(IssueRecord {
                    id: row.get(0)?,
                    customer_id: row.get(1)?,
                    detail: row.get(2)?,
                    created_at: row.get(3)?,
                })
            })?;
            let mut issues = Vec::new();
            for row in rows {
                issues.push(row?);
            }
            Ok(issues)
        })
        .await
        .map_err(map_tr_err)
}
