// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent classification for the Smartline IVR.
//!
//! A closed [`Intent`] enumeration, an ordered keyword rule table, and the
//! normalization helpers for ids captured from speech. Everything here is
//! pure and deterministic.

pub mod classifier;
pub mod normalize;

pub use classifier::{classify, Intent};
pub use normalize::{normalize_caller_id, normalize_phone, title_case};
