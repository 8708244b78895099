// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Smartline IVR engine.
//!
//! This crate provides the error type, domain types, and trait seams used
//! throughout the Smartline workspace. The dialog engine, storage backend,
//! and transport adapters all meet at the definitions here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::SmartlineError;
pub use traits::{CustomerRepository, HistoryLog, SessionStore, SpeechRecognizer, SpeechRenderer};
pub use types::{
    Customer, DialogState, HistoryRecord, InputKind, IssueRecord, Scratch, Session, TurnReply,
    now_rfc3339,
};
