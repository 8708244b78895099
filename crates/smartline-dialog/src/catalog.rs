// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The fixed plan and recharge catalog.
//!
//! Plans and amounts are a small closed set; the dialog never invents a
//! plan label or allowance outside this table, which is what keeps the
//! `plan`/`data_allowance` pair on a customer record consistent.

/// One entry of the plan catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    /// Label stored on the customer record and spoken in prompts.
    pub label: &'static str,
    /// Daily data cap label matching this plan.
    pub daily_data: &'static str,
}

/// Default plan assigned at registration.
pub const SMART_PLAN: Plan = Plan {
    label: "SmartPlan 299",
    daily_data: "1.5 GB",
};

/// Upgrade target offered from the data-packs flow.
pub const PREMIUM_PLAN: Plan = Plan {
    label: "Premium 499",
    daily_data: "2.5 GB",
};

pub const SUPER_PLAN: Plan = Plan {
    label: "Super 699",
    daily_data: "4 GB",
};

/// The full catalog, cheapest first.
pub const PLANS: &[Plan] = &[SMART_PLAN, PREMIUM_PLAN, SUPER_PLAN];

/// Starting balance for a newly registered customer, in rupees.
pub const DEFAULT_BALANCE: f64 = 150.0;

/// Recharge menu, smallest first. Ordering matters: unrecognized input
/// falls back to the first entry.
pub const RECHARGE_AMOUNTS: &[u32] = &[199, 299, 499];

/// Looks up a plan by its stored label.
pub fn plan_by_label(label: &str) -> Option<&'static Plan> {
    PLANS.iter().find(|p| p.label == label)
}

/// Resolves a spoken recharge choice to a catalog amount.
///
/// Substring match, first catalog hit wins. Unrecognized text resolves to
/// the smallest amount with `recognized = false` -- deliberate menu
/// policy, not an error path.
pub fn parse_recharge_amount(text: &str) -> (u32, bool) {
    for &amount in RECHARGE_AMOUNTS {
        if text.contains(&amount.to_string()) {
            return (amount, true);
        }
    }
    (RECHARGE_AMOUNTS[0], false)
}
