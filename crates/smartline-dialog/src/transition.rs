// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The dialog state machine as a pure function.
//!
//! [`transition`] maps (session, customer snapshot, intent, raw input) to a
//! [`TurnOutcome`] without touching storage. Side effects come back as
//! [`RepoOp`] values for the engine to apply, which keeps every branch of
//! the machine testable with plain assertions.

use smartline_core::{Customer, DialogState, Scratch, Session};
use smartline_intent::{normalize_caller_id, normalize_phone, title_case, Intent};

use crate::catalog::{self, PREMIUM_PLAN};
use crate::prompts;

/// Storage mutation requested by a transition.
///
/// The engine applies these in order after the transition returns; the
/// reply text is already final, so a failed op swaps the reply for an
/// apology without rolling back dialog state.
#[derive(Debug, Clone, PartialEq)]
pub enum RepoOp {
    CreateCustomer {
        customer: Customer,
    },
    Recharge {
        customer_id: String,
        amount: f64,
    },
    UpgradePlan {
        customer_id: String,
        plan: String,
        data_allowance: String,
    },
    AppendIssue {
        customer_id: String,
        detail: String,
    },
}

/// Everything one turn decided.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    pub next_state: DialogState,
    pub scratch: Scratch,
    pub retry_count: u32,
    pub reply: String,
    pub ops: Vec<RepoOp>,
    /// True when the call ends with this turn.
    pub close_session: bool,
    /// Newly established customer binding, if this turn identified the caller.
    pub customer_id: Option<String>,
}

impl TurnOutcome {
    /// Stay in (or move to) `state` with an empty scratch and reset retries.
    fn reply(state: DialogState, reply: String) -> Self {
        Self {
            next_state: state,
            scratch: Scratch::default(),
            retry_count: 0,
            reply,
            ops: Vec::new(),
            close_session: false,
            customer_id: None,
        }
    }

    /// Terminal outcome: say goodbye and close the call.
    fn close(reply: String) -> Self {
        Self {
            next_state: DialogState::Exit,
            scratch: Scratch::default(),
            retry_count: 0,
            reply,
            ops: Vec::new(),
            close_session: true,
            customer_id: None,
        }
    }

    fn with_scratch(mut self, scratch: Scratch) -> Self {
        self.scratch = scratch;
        self
    }

    fn with_op(mut self, op: RepoOp) -> Self {
        self.ops.push(op);
        self
    }
}

/// Tunables the engine derives from configuration.
#[derive(Debug, Clone)]
pub struct DialogPolicy {
    /// Operator name spoken in greetings and goodbyes.
    pub operator: String,
    /// Consecutive unrecognized inputs tolerated before escalation.
    pub retry_limit: u32,
    pub retry_fallback: RetryFallback,
}

/// What happens when the retry ceiling is hit outside customer care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryFallback {
    /// Hand the caller to the customer-care loop.
    CustomerCare,
    /// End the call.
    HangUp,
}

fn is_affirmative(text: &str) -> bool {
    let text = text.trim().to_lowercase();
    ["yes", "yeah", "sure", "ok", "okay"]
        .iter()
        .any(|kw| text.contains(kw))
}

/// Computes the outcome of one turn.
///
/// `customer` is the snapshot for the session's bound customer, or the
/// lookup result for the utterance while identifying. Replies that quote a
/// balance use this snapshot; the stored balance is mutated relatively by
/// the ops, so concurrent recharges still sum correctly.
pub fn transition(
    session: &Session,
    customer: Option<&Customer>,
    intent: Intent,
    raw: &str,
    policy: &DialogPolicy,
) -> TurnOutcome {
    match session.state {
        DialogState::Start => TurnOutcome::reply(
            DialogState::Identify,
            prompts::greeting(&policy.operator),
        ),
        DialogState::Identify => identify(session, customer, raw, policy),
        DialogState::RegisterConfirm => register_confirm(session, raw),
        DialogState::RegisterName => register_name(session, raw, policy),
        DialogState::RegisterPhone => register_phone(session, raw, policy),
        DialogState::MainMenu => main_menu(session, customer, intent, policy),
        DialogState::RechargeAmount => recharge_amount(customer, raw),
        DialogState::DataUpgradeConfirm => data_upgrade_confirm(session, raw),
        DialogState::IssueCapture => issue_capture(session, intent, raw, policy),
        DialogState::CustomerCare => customer_care(session, customer, intent, raw, policy),
        // Normally short-circuited by the engine's terminal check; kept as
        // the total-function answer for an ended session.
        DialogState::Exit => TurnOutcome::close(prompts::session_ended()),
    }
}

fn identify(
    session: &Session,
    customer: Option<&Customer>,
    raw: &str,
    policy: &DialogPolicy,
) -> TurnOutcome {
    let id = normalize_caller_id(raw);
    if id.is_empty() {
        return retry_or_escalate(session, DialogState::Identify, prompts::ask_id(), policy);
    }
    match customer {
        Some(customer) => {
            let mut outcome = TurnOutcome::reply(
                DialogState::MainMenu,
                prompts::welcome_back(&customer.name),
            );
            outcome.customer_id = Some(customer.id.clone());
            outcome
        }
        None => TurnOutcome::reply(
            DialogState::RegisterConfirm,
            prompts::id_not_found(&id),
        )
        .with_scratch(Scratch {
            pending_customer_id: Some(id),
            ..Scratch::default()
        }),
    }
}

fn register_confirm(session: &Session, raw: &str) -> TurnOutcome {
    if is_affirmative(raw) {
        TurnOutcome::reply(DialogState::RegisterName, prompts::ask_name())
            .with_scratch(session.scratch.clone())
    } else {
        TurnOutcome::close(prompts::register_later())
    }
}

fn register_name(session: &Session, raw: &str, policy: &DialogPolicy) -> TurnOutcome {
    let name = title_case(raw);
    if name.is_empty() {
        return retry_or_escalate(session, DialogState::RegisterName, prompts::ask_name(), policy);
    }
    let mut scratch = session.scratch.clone();
    scratch.pending_name = Some(name);
    TurnOutcome::reply(DialogState::RegisterPhone, prompts::ask_phone()).with_scratch(scratch)
}

fn register_phone(session: &Session, raw: &str, policy: &DialogPolicy) -> TurnOutcome {
    let phone = normalize_phone(raw);
    if phone.is_empty() {
        return retry_or_escalate(
            session,
            DialogState::RegisterPhone,
            prompts::ask_phone(),
            policy,
        );
    }
    // Both scratch fields were set on the way here; a missing one means the
    // session row was tampered with, and a fresh id is the safe answer.
    let (Some(id), Some(name)) = (
        session.scratch.pending_customer_id.clone(),
        session.scratch.pending_name.clone(),
    ) else {
        return TurnOutcome::reply(DialogState::Identify, prompts::ask_id());
    };
    let customer = Customer {
        id: id.clone(),
        name: name.clone(),
        plan: catalog::SMART_PLAN.label.to_string(),
        balance: catalog::DEFAULT_BALANCE,
        data_allowance: catalog::SMART_PLAN.daily_data.to_string(),
        phone,
        created_at: smartline_core::now_rfc3339(),
    };
    let mut outcome = TurnOutcome::reply(
        DialogState::MainMenu,
        prompts::registration_success(&name),
    )
    .with_op(RepoOp::CreateCustomer { customer });
    outcome.customer_id = Some(id);
    outcome
}

fn main_menu(
    session: &Session,
    customer: Option<&Customer>,
    intent: Intent,
    policy: &DialogPolicy,
) -> TurnOutcome {
    let Some(customer) = customer else {
        return TurnOutcome::reply(DialogState::Identify, prompts::ask_id());
    };
    match intent {
        Intent::CheckBalance => {
            TurnOutcome::reply(DialogState::MainMenu, prompts::balance(customer))
        }
        Intent::PlanDetails => {
            TurnOutcome::reply(DialogState::MainMenu, prompts::plan_details(customer))
        }
        Intent::Offers => TurnOutcome::reply(DialogState::MainMenu, prompts::offers()),
        Intent::DataPacks => {
            TurnOutcome::reply(DialogState::DataUpgradeConfirm, prompts::data_packs(customer))
        }
        Intent::Recharge => {
            TurnOutcome::reply(DialogState::RechargeAmount, prompts::recharge_options())
        }
        Intent::RechargeIssue => issue_ack(prompts::recharge_issue_ack()),
        Intent::NetworkIssue => issue_ack(prompts::network_issue_ack()),
        Intent::SimIssue => issue_ack(prompts::sim_issue_ack()),
        Intent::CustomerCare => TurnOutcome::reply(
            DialogState::CustomerCare,
            prompts::care_intro(&policy.operator),
        ),
        Intent::Register => TurnOutcome::reply(
            DialogState::MainMenu,
            prompts::already_registered(&customer.name),
        ),
        Intent::MainMenu => TurnOutcome::reply(DialogState::MainMenu, prompts::main_menu()),
        Intent::Exit => TurnOutcome::close(prompts::exit_goodbye(&policy.operator)),
        Intent::Unknown => retry_or_escalate(
            session,
            DialogState::MainMenu,
            format!("{} {}", prompts::unknown(), prompts::main_menu()),
            policy,
        ),
    }
}

fn issue_ack(ack: String) -> TurnOutcome {
    TurnOutcome::reply(
        DialogState::IssueCapture,
        format!("{ack} {}", prompts::describe_issue()),
    )
}

fn recharge_amount(customer: Option<&Customer>, raw: &str) -> TurnOutcome {
    let Some(customer) = customer else {
        return TurnOutcome::reply(DialogState::Identify, prompts::ask_id());
    };
    let (amount, recognized) = catalog::parse_recharge_amount(raw);
    let new_balance = customer.balance + f64::from(amount);
    let success = prompts::recharge_success(amount, new_balance);
    let reply = if recognized {
        success
    } else {
        format!("{} {success}", prompts::recharge_default_notice(amount))
    };
    TurnOutcome::reply(DialogState::MainMenu, reply).with_op(RepoOp::Recharge {
        customer_id: customer.id.clone(),
        amount: f64::from(amount),
    })
}

fn data_upgrade_confirm(session: &Session, raw: &str) -> TurnOutcome {
    let Some(customer_id) = session.customer_id.clone() else {
        return TurnOutcome::reply(DialogState::Identify, prompts::ask_id());
    };
    if is_affirmative(raw) {
        TurnOutcome::reply(DialogState::MainMenu, prompts::upgrade_success(&PREMIUM_PLAN))
            .with_op(RepoOp::UpgradePlan {
                customer_id,
                plan: PREMIUM_PLAN.label.to_string(),
                data_allowance: PREMIUM_PLAN.daily_data.to_string(),
            })
    } else {
        TurnOutcome::reply(DialogState::MainMenu, prompts::upgrade_declined())
    }
}

fn issue_capture(
    session: &Session,
    intent: Intent,
    raw: &str,
    policy: &DialogPolicy,
) -> TurnOutcome {
    match intent {
        Intent::MainMenu => {
            TurnOutcome::reply(DialogState::MainMenu, prompts::opening_main_menu())
        }
        Intent::Exit => TurnOutcome::close(prompts::exit_goodbye(&policy.operator)),
        _ => {
            let detail = raw.trim();
            if detail.is_empty() {
                return retry_or_escalate(
                    session,
                    DialogState::IssueCapture,
                    prompts::describe_issue(),
                    policy,
                );
            }
            let Some(customer_id) = session.customer_id.clone() else {
                return TurnOutcome::reply(DialogState::Identify, prompts::ask_id());
            };
            TurnOutcome::reply(DialogState::MainMenu, prompts::issue_logged()).with_op(
                RepoOp::AppendIssue {
                    customer_id,
                    detail: detail.to_string(),
                },
            )
        }
    }
}

fn customer_care(
    session: &Session,
    customer: Option<&Customer>,
    intent: Intent,
    raw: &str,
    policy: &DialogPolicy,
) -> TurnOutcome {
    let text = raw.trim().to_lowercase();

    // After "thanks" the caller chose between continuing and hanging up.
    if session.scratch.care_thanks_pending {
        return if intent == Intent::Exit {
            TurnOutcome::close(prompts::care_goodbye_thanks(&policy.operator))
        } else {
            TurnOutcome::reply(DialogState::CustomerCare, prompts::care_continue())
        };
    }

    if text.contains("thank") {
        return TurnOutcome::reply(DialogState::CustomerCare, prompts::care_thanks_ack())
            .with_scratch(Scratch {
                care_thanks_pending: true,
                ..session.scratch.clone()
            });
    }

    match intent {
        Intent::Exit => TurnOutcome::close(prompts::care_goodbye(&policy.operator)),
        Intent::MainMenu => {
            TurnOutcome::reply(DialogState::MainMenu, prompts::opening_main_menu())
        }
        Intent::CheckBalance => match customer {
            Some(customer) => {
                TurnOutcome::reply(DialogState::CustomerCare, prompts::balance(customer))
            }
            None => TurnOutcome::reply(DialogState::Identify, prompts::ask_id()),
        },
        Intent::PlanDetails => match customer {
            Some(customer) => {
                TurnOutcome::reply(DialogState::CustomerCare, prompts::plan_details(customer))
            }
            None => TurnOutcome::reply(DialogState::Identify, prompts::ask_id()),
        },
        Intent::Offers => TurnOutcome::reply(DialogState::CustomerCare, prompts::offers()),
        Intent::Recharge => {
            TurnOutcome::reply(DialogState::RechargeAmount, prompts::recharge_options())
        }
        Intent::DataPacks => match customer {
            Some(customer) => TurnOutcome::reply(
                DialogState::DataUpgradeConfirm,
                prompts::data_packs(customer),
            ),
            None => TurnOutcome::reply(DialogState::Identify, prompts::ask_id()),
        },
        Intent::RechargeIssue => care_issue_ack(session, prompts::recharge_issue_ack(), raw),
        Intent::NetworkIssue => care_issue_ack(session, prompts::network_issue_ack(), raw),
        Intent::SimIssue => care_issue_ack(session, prompts::sim_issue_ack(), raw),
        Intent::CustomerCare => {
            TurnOutcome::reply(DialogState::CustomerCare, prompts::care_continue())
        }
        Intent::Register => match customer {
            Some(customer) => TurnOutcome::reply(
                DialogState::CustomerCare,
                prompts::already_registered(&customer.name),
            ),
            None => TurnOutcome::reply(DialogState::Identify, prompts::ask_id()),
        },
        Intent::Unknown => {
            // Care is already the escalation target; the ceiling hangs up.
            let retries = session.retry_count + 1;
            if retries >= policy.retry_limit {
                TurnOutcome::close(prompts::care_goodbye(&policy.operator))
            } else {
                let mut outcome =
                    TurnOutcome::reply(DialogState::CustomerCare, prompts::care_unknown())
                        .with_scratch(session.scratch.clone());
                outcome.retry_count = retries;
                outcome
            }
        }
    }
}

fn care_issue_ack(session: &Session, ack: String, raw: &str) -> TurnOutcome {
    let Some(customer_id) = session.customer_id.clone() else {
        return TurnOutcome::reply(DialogState::Identify, prompts::ask_id());
    };
    TurnOutcome::reply(DialogState::CustomerCare, ack).with_op(RepoOp::AppendIssue {
        customer_id,
        detail: raw.trim().to_string(),
    })
}

/// Shared unrecognized-input path for states that await specific input.
fn retry_or_escalate(
    session: &Session,
    state: DialogState,
    reprompt: String,
    policy: &DialogPolicy,
) -> TurnOutcome {
    let retries = session.retry_count + 1;
    if retries >= policy.retry_limit {
        return match policy.retry_fallback {
            RetryFallback::CustomerCare => TurnOutcome::reply(
                DialogState::CustomerCare,
                prompts::escalating_to_care(&policy.operator),
            ),
            RetryFallback::HangUp => TurnOutcome::close(prompts::no_input()),
        };
    }
    let mut outcome = TurnOutcome::reply(state, reprompt).with_scratch(session.scratch.clone());
    outcome.retry_count = retries;
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartline_intent::classify;

    fn policy() -> DialogPolicy {
        DialogPolicy {
            operator: "SmartTel".to_string(),
            retry_limit: 3,
            retry_fallback: RetryFallback::CustomerCare,
        }
    }

    fn customer() -> Customer {
        Customer {
            id: "1001".to_string(),
            name: "Aiza".to_string(),
            plan: "SmartPlan 299".to_string(),
            balance: 150.0,
            data_allowance: "1.5 GB".to_string(),
            phone: "9876543210".to_string(),
            created_at: smartline_core::now_rfc3339(),
        }
    }

    fn session_in(state: DialogState) -> Session {
        let mut session = Session::new("call-1");
        session.state = state;
        if !matches!(
            state,
            DialogState::Start
                | DialogState::Identify
                | DialogState::RegisterConfirm
                | DialogState::RegisterName
                | DialogState::RegisterPhone
        ) {
            session.customer_id = Some("1001".to_string());
        }
        session
    }

    fn run(session: &Session, customer: Option<&Customer>, input: &str) -> TurnOutcome {
        transition(session, customer, classify(input), input, &policy())
    }

    #[test]
    fn start_greets_and_moves_to_identify() {
        let outcome = run(&session_in(DialogState::Start), None, "hello");
        assert_eq!(outcome.next_state, DialogState::Identify);
        assert!(outcome.reply.contains("SmartTel"));
        assert!(outcome.ops.is_empty());
    }

    #[test]
    fn known_id_lands_in_main_menu() {
        let cust = customer();
        let outcome = run(&session_in(DialogState::Identify), Some(&cust), "one zero zero one");
        assert_eq!(outcome.next_state, DialogState::MainMenu);
        assert_eq!(outcome.customer_id.as_deref(), Some("1001"));
        assert!(outcome.reply.contains("Welcome back Aiza"));
    }

    #[test]
    fn unknown_id_offers_registration() {
        let outcome = run(&session_in(DialogState::Identify), None, "9999");
        assert_eq!(outcome.next_state, DialogState::RegisterConfirm);
        assert_eq!(outcome.scratch.pending_customer_id.as_deref(), Some("9999"));
        assert!(outcome.reply.contains("9999 not found"));
    }

    #[test]
    fn ended_sessions_answer_with_the_goodbye() {
        let session = session_in(DialogState::Exit);
        let outcome = run(&session, None, "hello?");
        assert!(outcome.close_session);
        assert!(outcome.reply.contains("session has ended"));
    }

    #[test]
    fn declining_registration_closes_the_call() {
        let mut session = session_in(DialogState::RegisterConfirm);
        session.scratch.pending_customer_id = Some("9999".to_string());
        let outcome = run(&session, None, "no thanks");
        assert!(outcome.close_session);
        assert_eq!(outcome.next_state, DialogState::Exit);
    }

    #[test]
    fn registration_collects_name_then_phone_then_creates() {
        let mut session = session_in(DialogState::RegisterConfirm);
        session.scratch.pending_customer_id = Some("9999".to_string());
        let outcome = run(&session, None, "yes please");
        assert_eq!(outcome.next_state, DialogState::RegisterName);

        session.state = outcome.next_state;
        session.scratch = outcome.scratch;
        let outcome = run(&session, None, "farah khan");
        assert_eq!(outcome.next_state, DialogState::RegisterPhone);
        assert_eq!(outcome.scratch.pending_name.as_deref(), Some("Farah Khan"));

        session.state = outcome.next_state;
        session.scratch = outcome.scratch;
        let outcome = run(&session, None, "nine eight seven six five four three two one zero");
        assert_eq!(outcome.next_state, DialogState::MainMenu);
        assert_eq!(outcome.customer_id.as_deref(), Some("9999"));
        match &outcome.ops[..] {
            [RepoOp::CreateCustomer { customer }] => {
                assert_eq!(customer.id, "9999");
                assert_eq!(customer.name, "Farah Khan");
                assert_eq!(customer.plan, "SmartPlan 299");
                assert_eq!(customer.balance, 150.0);
                assert_eq!(customer.phone, "9876543210");
            }
            other => panic!("unexpected ops: {other:?}"),
        }
    }

    #[test]
    fn balance_query_stays_in_main_menu() {
        let cust = customer();
        let outcome = run(&session_in(DialogState::MainMenu), Some(&cust), "check my balance");
        assert_eq!(outcome.next_state, DialogState::MainMenu);
        assert!(outcome.reply.contains("150"));
        assert!(outcome.ops.is_empty());
    }

    #[test]
    fn recognized_recharge_amount_produces_a_relative_op() {
        let cust = customer();
        let outcome = run(&session_in(DialogState::RechargeAmount), Some(&cust), "299");
        assert_eq!(outcome.next_state, DialogState::MainMenu);
        assert!(outcome.reply.contains("449"));
        assert_eq!(
            outcome.ops,
            vec![RepoOp::Recharge {
                customer_id: "1001".to_string(),
                amount: 299.0,
            }]
        );
    }

    #[test]
    fn unrecognized_recharge_amount_defaults_to_smallest() {
        let cust = customer();
        let outcome = run(&session_in(DialogState::RechargeAmount), Some(&cust), "banana");
        assert!(outcome.reply.contains("Defaulting to 199"));
        assert!(outcome.reply.contains("349"));
        assert_eq!(
            outcome.ops,
            vec![RepoOp::Recharge {
                customer_id: "1001".to_string(),
                amount: 199.0,
            }]
        );
    }

    #[test]
    fn upgrade_confirm_yes_moves_to_premium() {
        let outcome = run(&session_in(DialogState::DataUpgradeConfirm), None, "yes");
        assert_eq!(outcome.next_state, DialogState::MainMenu);
        assert_eq!(
            outcome.ops,
            vec![RepoOp::UpgradePlan {
                customer_id: "1001".to_string(),
                plan: "Premium 499".to_string(),
                data_allowance: "2.5 GB".to_string(),
            }]
        );
    }

    #[test]
    fn upgrade_confirm_no_declines_without_ops() {
        let outcome = run(&session_in(DialogState::DataUpgradeConfirm), None, "no");
        assert_eq!(outcome.next_state, DialogState::MainMenu);
        assert!(outcome.ops.is_empty());
    }

    #[test]
    fn issue_intent_acks_then_captures_detail() {
        let cust = customer();
        let outcome = run(&session_in(DialogState::MainMenu), Some(&cust), "network problem");
        assert_eq!(outcome.next_state, DialogState::IssueCapture);
        assert!(outcome.reply.contains("network"));

        let session = session_in(DialogState::IssueCapture);
        let outcome = run(&session, Some(&cust), "tower down near my house");
        assert_eq!(outcome.next_state, DialogState::MainMenu);
        assert_eq!(
            outcome.ops,
            vec![RepoOp::AppendIssue {
                customer_id: "1001".to_string(),
                detail: "tower down near my house".to_string(),
            }]
        );
    }

    #[test]
    fn issue_capture_menu_skips_logging() {
        let outcome = run(&session_in(DialogState::IssueCapture), None, "menu");
        assert_eq!(outcome.next_state, DialogState::MainMenu);
        assert!(outcome.ops.is_empty());
    }

    #[test]
    fn care_thanks_then_exit_is_a_two_step_goodbye() {
        let mut session = session_in(DialogState::CustomerCare);
        let outcome = run(&session, None, "thank you");
        assert_eq!(outcome.next_state, DialogState::CustomerCare);
        assert!(outcome.scratch.care_thanks_pending);
        assert!(!outcome.close_session);

        session.scratch = outcome.scratch;
        let outcome = run(&session, None, "exit");
        assert!(outcome.close_session);
        assert!(outcome.reply.contains("Have a nice day"));
    }

    #[test]
    fn care_thanks_then_continue_clears_the_flag() {
        let mut session = session_in(DialogState::CustomerCare);
        session.scratch.care_thanks_pending = true;
        let outcome = run(&session, None, "continue");
        assert!(!outcome.close_session);
        assert!(!outcome.scratch.care_thanks_pending);
    }

    #[test]
    fn care_logs_issue_intents_on_the_account() {
        let cust = customer();
        let outcome = run(&session_in(DialogState::CustomerCare), Some(&cust), "sim not working");
        assert_eq!(outcome.next_state, DialogState::CustomerCare);
        assert_eq!(
            outcome.ops,
            vec![RepoOp::AppendIssue {
                customer_id: "1001".to_string(),
                detail: "sim not working".to_string(),
            }]
        );
    }

    #[test]
    fn unknown_inputs_escalate_to_care_at_the_ceiling() {
        let cust = customer();
        let mut session = session_in(DialogState::MainMenu);
        for expected_retries in 1..3 {
            let outcome = run(&session, Some(&cust), "mumble");
            assert_eq!(outcome.next_state, DialogState::MainMenu);
            assert_eq!(outcome.retry_count, expected_retries);
            session.retry_count = outcome.retry_count;
        }
        let outcome = run(&session, Some(&cust), "mumble");
        assert_eq!(outcome.next_state, DialogState::CustomerCare);
        assert_eq!(outcome.retry_count, 0);
        assert!(outcome.reply.contains("customer"));
    }

    #[test]
    fn hang_up_fallback_closes_instead() {
        let cust = customer();
        let mut session = session_in(DialogState::MainMenu);
        session.retry_count = 2;
        let pol = DialogPolicy {
            retry_fallback: RetryFallback::HangUp,
            ..policy()
        };
        let outcome = transition(&session, Some(&cust), Intent::Unknown, "mumble", &pol);
        assert!(outcome.close_session);
    }

    #[test]
    fn care_hangs_up_at_the_ceiling() {
        let mut session = session_in(DialogState::CustomerCare);
        session.retry_count = 2;
        let outcome = run(&session, None, "mumble");
        assert!(outcome.close_session);
    }

    #[test]
    fn recognized_intent_resets_the_retry_counter() {
        let cust = customer();
        let mut session = session_in(DialogState::MainMenu);
        session.retry_count = 2;
        let outcome = run(&session, Some(&cust), "check balance");
        assert_eq!(outcome.retry_count, 0);
    }
}
