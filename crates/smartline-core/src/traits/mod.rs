// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the dialog engine and its collaborators.
//!
//! All traits use `#[async_trait]` for dynamic dispatch so adapters can be
//! injected as `Arc<dyn Trait>`.

pub mod speech;
pub mod storage;

pub use speech::{SpeechRecognizer, SpeechRenderer};
pub use storage::{CustomerRepository, HistoryLog, SessionStore};
