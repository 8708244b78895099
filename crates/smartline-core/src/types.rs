// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Smartline workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Returns the current time as an RFC 3339 UTC string, the timestamp format
/// used in every persisted row.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// A telecom customer record.
///
/// `balance` never goes below zero and is mutated only through recharge;
/// `plan` and `data_allowance` always form a pair from the plan catalog.
/// Reported issues live in their own append-only table, not on this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Caller-supplied identifier (e.g. "1001"). Stable, externally assigned.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Current plan label from the catalog (e.g. "SmartPlan 299").
    pub plan: String,
    /// Account balance in rupees.
    pub balance: f64,
    /// Daily data cap label matching `plan` (e.g. "1.5 GB").
    pub data_allowance: String,
    /// Contact number, immutable after registration.
    pub phone: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// A reported issue on a customer account. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueRecord {
    /// Autoincrement row id.
    pub id: i64,
    pub customer_id: String,
    /// Free-text description or recording reference.
    pub detail: String,
    pub created_at: String,
}

/// One audit-trail row: a single inbound/outbound exchange. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: i64,
    /// None for turns before the caller identified themselves.
    pub customer_id: Option<String>,
    pub user_msg: String,
    pub bot_reply: String,
    pub created_at: String,
}

/// Nodes of the dialog state machine.
///
/// Serialized into the sessions table via the strum snake_case names, so
/// renaming a variant is a storage migration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DialogState {
    /// Entry node: greet and ask for the caller id.
    Start,
    /// Awaiting a caller id.
    Identify,
    /// Unknown id; awaiting yes/no on registration.
    RegisterConfirm,
    /// Awaiting the new customer's name.
    RegisterName,
    /// Awaiting the new customer's phone number.
    RegisterPhone,
    /// Top-level menu loop.
    MainMenu,
    /// Awaiting a recharge amount choice.
    RechargeAmount,
    /// Awaiting yes/no on a plan upgrade.
    DataUpgradeConfirm,
    /// Awaiting a free-text issue description.
    IssueCapture,
    /// Nested customer-care loop.
    CustomerCare,
    /// Terminal: the session is closed.
    Exit,
}

impl DialogState {
    /// True once the session can no longer accept turns.
    pub fn is_terminal(self) -> bool {
        matches!(self, DialogState::Exit)
    }
}

/// Small bag of pending values carried between turns of a flow.
///
/// Stored as JSON in the sessions table. Empty for most of a call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scratch {
    /// Caller id awaiting registration (set when lookup fails in Identify).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_customer_id: Option<String>,
    /// Name collected during registration, awaiting the phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_name: Option<String>,
    /// Set after "thanks" in customer care; a follow-up "exit" ends the call.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub care_thanks_pending: bool,
}

impl Scratch {
    pub fn is_empty(&self) -> bool {
        *self == Scratch::default()
    }
}

/// Per-call dialog session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Carrier call id, or a generated uuid for non-telephony channels.
    pub id: String,
    /// Set once identification succeeds; never cleared afterwards.
    pub customer_id: Option<String>,
    pub state: DialogState,
    pub scratch: Scratch,
    /// Consecutive unrecognized-input counter; reset on any recognized intent.
    pub retry_count: u32,
    pub created_at: String,
    pub updated_at: String,
}

impl Session {
    /// Creates a fresh session in the `Start` state.
    pub fn new(id: impl Into<String>) -> Self {
        let now = now_rfc3339();
        Self {
            id: id.into(),
            customer_id: None,
            state: DialogState::Start,
            scratch: Scratch::default(),
            retry_count: 0,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// How the adapter obtained the raw input for a turn.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// Recognized speech from an STT collaborator.
    Speech,
    /// Touch-tone digit sequence.
    Dtmf,
    /// Typed text (web API, shell).
    Text,
}

/// The engine's answer to one inbound turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnReply {
    /// Prompt to render back to the caller.
    pub reply_text: String,
    /// True when the call should be terminated by the adapter.
    pub session_closed: bool,
}
