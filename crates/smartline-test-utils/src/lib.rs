// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Smartline integration tests.

pub mod harness;
pub mod mock_speech;

pub use harness::{seed_customers, TestHarness, TestHarnessBuilder};
pub use mock_speech::{ScriptedRecognizer, TextRenderer};
