// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dialog state machine and turn orchestration for the Smartline IVR.
//!
//! The split mirrors the turn pipeline: [`catalog`] holds the fixed plan
//! and recharge tables, [`prompts`] all caller-facing text, [`transition`]
//! the pure state machine, and [`engine`] the async orchestrator that
//! applies its decisions against storage.

pub mod catalog;
pub mod engine;
pub mod prompts;
pub mod transition;

pub use engine::TurnEngine;
pub use transition::{transition, DialogPolicy, RepoOp, RetryFallback, TurnOutcome};
