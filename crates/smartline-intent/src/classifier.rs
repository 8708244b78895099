// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword intent classification.
//!
//! Maps a free-text utterance to a closed set of intent tags using
//! case-insensitive substring matching against an ordered rule table.
//! No network, no model, no latency -- classification is a pure function.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Caller goals the dialog understands. Closed enumeration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    CheckBalance,
    PlanDetails,
    Offers,
    DataPacks,
    Recharge,
    RechargeIssue,
    NetworkIssue,
    SimIssue,
    CustomerCare,
    Register,
    MainMenu,
    Exit,
    Unknown,
}

/// Ordered rule table: the first rule whose keyword set matches wins.
///
/// Ordering is a contract, not an accident. Multi-word phrases must precede
/// their single-word prefixes ("recharge issue" before "recharge", "new
/// user" before anything that could swallow it), and the single-keyword
/// rules keep the menu's precedence ("balance" outranks "plan" outranks
/// "data"). Reordering entries changes classification.
const RULES: &[(&[&str], Intent)] = &[
    (&["recharge issue"], Intent::RechargeIssue),
    (&["new user"], Intent::Register),
    (&["balance"], Intent::CheckBalance),
    (&["plan"], Intent::PlanDetails),
    (&["offer"], Intent::Offers),
    (&["data", "upgrade"], Intent::DataPacks),
    (&["recharge"], Intent::Recharge),
    (&["network", "signal", "coverage"], Intent::NetworkIssue),
    (&["sim", "activation"], Intent::SimIssue),
    (&["customer", "care", "talk", "support"], Intent::CustomerCare),
    (&["register"], Intent::Register),
    (&["menu"], Intent::MainMenu),
    (&["exit", "bye", "end"], Intent::Exit),
];

/// Classifies an utterance into an [`Intent`].
///
/// Empty or whitespace-only input is `Unknown` without consulting the
/// table. Matching is case-insensitive substring containment, faithful to
/// the voice-menu keyword style: "please tell my balance" hits "balance".
pub fn classify(utterance: &str) -> Intent {
    let text = utterance.trim().to_lowercase();
    if text.is_empty() {
        return Intent::Unknown;
    }
    for (keywords, intent) in RULES {
        if keywords.iter().any(|kw| text.contains(kw)) {
            return *intent;
        }
    }
    Intent::Unknown
}
