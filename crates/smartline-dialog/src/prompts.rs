// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reply text builders.
//!
//! Every prompt the IVR speaks lives here. Transition logic composes
//! these; nothing else formats caller-facing text.

use smartline_core::Customer;

use crate::catalog::{Plan, PREMIUM_PLAN, RECHARGE_AMOUNTS, SUPER_PLAN};

/// Formats a rupee amount the way the menus speak it: whole numbers
/// without a decimal point, fractional balances as-is.
pub fn rupees(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{}", amount as i64)
    } else {
        format!("{amount}")
    }
}

pub fn greeting(operator: &str) -> String {
    format!(
        "Welcome to {operator} customer support. \
         Please say your customer I D, for example one zero zero one."
    )
}

pub fn main_menu() -> String {
    "Main menu. You can say check balance, plan details, offers, data packs, \
     recharge, talk to customer care, or exit."
        .to_string()
}

pub fn welcome_back(name: &str) -> String {
    format!("Welcome back {name}. {}", main_menu())
}

pub fn id_not_found(id: &str) -> String {
    format!("Customer I D {id} not found. Would you like to register?")
}

pub fn register_later() -> String {
    "Okay, please register later. Goodbye.".to_string()
}

pub fn ask_id() -> String {
    "Please say your customer I D.".to_string()
}

pub fn ask_name() -> String {
    "Please say your name.".to_string()
}

pub fn ask_phone() -> String {
    "Please say your phone number.".to_string()
}

pub fn registration_success(name: &str) -> String {
    format!("Registration successful. Welcome {name}! {}", main_menu())
}

pub fn balance(customer: &Customer) -> String {
    format!("Your current balance is rupees {}.", rupees(customer.balance))
}

pub fn plan_details(customer: &Customer) -> String {
    format!(
        "Your current plan is {} with {} data per day.",
        customer.plan, customer.data_allowance
    )
}

pub fn offers() -> String {
    "Here are your latest offers: 10% cashback on recharge above 299, \
     double data on Premium plan, and weekend free calls on Super 699 plan."
        .to_string()
}

pub fn data_packs(customer: &Customer) -> String {
    format!(
        "Your current plan is {} with {} data per day. \
         Available upgrades include: {} with {} per day, and {} with {} per day. \
         Would you like to upgrade?",
        customer.plan,
        customer.data_allowance,
        PREMIUM_PLAN.label,
        PREMIUM_PLAN.daily_data,
        SUPER_PLAN.label,
        SUPER_PLAN.daily_data
    )
}

pub fn upgrade_success(plan: &Plan) -> String {
    format!(
        "Upgrading you to {}. Enjoy higher data speed and extra benefits! \
         Upgrade successful.",
        plan.label
    )
}

pub fn upgrade_declined() -> String {
    "No problem. You can upgrade anytime from the main menu.".to_string()
}

pub fn recharge_options() -> String {
    let amounts: Vec<String> = RECHARGE_AMOUNTS.iter().map(|a| a.to_string()).collect();
    format!(
        "Here are some recharge options: {} rupees. Please say your choice.",
        amounts.join(", ")
    )
}

pub fn recharge_default_notice(amount: u32) -> String {
    format!("Invalid option. Defaulting to {amount} rupees.")
}

pub fn recharge_success(amount: u32, new_balance: f64) -> String {
    format!(
        "Recharge of rupees {amount} successful. New balance is {} rupees.",
        rupees(new_balance)
    )
}

pub fn recharge_issue_ack() -> String {
    "We have noted your recharge issue. It will be fixed within two hours. \
     Sorry for the inconvenience."
        .to_string()
}

pub fn network_issue_ack() -> String {
    "We have noted your network or signal issue. Our technical team will \
     optimize your area network soon."
        .to_string()
}

pub fn sim_issue_ack() -> String {
    "SIM activation will be completed shortly. Please keep your phone \
     restarted and SIM inserted."
        .to_string()
}

pub fn describe_issue() -> String {
    "Please describe the issue so we can log it on your account, \
     or say menu to go back."
        .to_string()
}

pub fn issue_logged() -> String {
    "Thank you. Your issue has been logged on your account.".to_string()
}

pub fn care_intro(operator: &str) -> String {
    format!("Connecting you to {operator} customer care. Please describe your issue.")
}

pub fn care_thanks_ack() -> String {
    "You're welcome! Would you like to continue or exit?".to_string()
}

pub fn care_continue() -> String {
    "Okay, how else can I help you?".to_string()
}

pub fn care_goodbye(operator: &str) -> String {
    format!("Thank you for contacting {operator} support. Goodbye!")
}

pub fn care_goodbye_thanks(operator: &str) -> String {
    format!("Thank you for contacting {operator} support. Have a nice day!")
}

pub fn opening_main_menu() -> String {
    format!("Opening main menu for you. {}", main_menu())
}

pub fn exit_goodbye(operator: &str) -> String {
    format!("Thank you for using {operator} customer support. Goodbye!")
}

pub fn already_registered(name: &str) -> String {
    format!("You are already registered, {name}.")
}

pub fn unknown() -> String {
    "Sorry, I didn't understand that.".to_string()
}

pub fn care_unknown() -> String {
    "Sorry, could you please explain again?".to_string()
}

pub fn escalating_to_care(operator: &str) -> String {
    format!(
        "I'm having trouble understanding. Connecting you to {operator} \
         customer care. Please describe your issue."
    )
}

pub fn session_ended() -> String {
    "This session has ended. Please call again. Goodbye.".to_string()
}

pub fn apology() -> String {
    "Sorry, we could not complete that request. Please try again.".to_string()
}

pub fn service_unavailable() -> String {
    "Sorry, our service is temporarily unavailable. Please try again in a \
     moment."
        .to_string()
}

pub fn no_input() -> String {
    "No input detected. Please try again later. Goodbye.".to_string()
}
