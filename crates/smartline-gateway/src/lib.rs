// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Smartline IVR engine.
//!
//! Exposes the dialog engine over a small REST surface: one endpoint to
//! drive turns, one for account status, one for health. Telephony and web
//! frontends speak to these three routes.

pub mod handlers;
pub mod server;

pub use server::{router, start_server, GatewayState};
