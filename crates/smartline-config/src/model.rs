// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Smartline IVR engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Smartline configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SmartlineConfig {
    /// Operator identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Dialog policy settings.
    #[serde(default)]
    pub dialog: DialogConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// HTTP gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Operator identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Operator name spoken in greetings.
    #[serde(default = "default_operator")]
    pub operator: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            operator: default_operator(),
            log_level: default_log_level(),
        }
    }
}

fn default_operator() -> String {
    "SmartTel".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Where repeated unrecognized input routes once the retry ceiling is hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RetryFallback {
    /// Escalate to the customer-care loop.
    CustomerCare,
    /// Close the session.
    HangUp,
}

/// Dialog policy configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DialogConfig {
    /// Consecutive unrecognized inputs tolerated before the fallback fires.
    #[serde(default = "default_retry_limit")]
    pub retry_limit: u32,

    /// Fallback target at the retry ceiling.
    #[serde(default = "default_retry_fallback")]
    pub retry_fallback: RetryFallback,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            retry_limit: default_retry_limit(),
            retry_fallback: default_retry_fallback(),
        }
    }
}

fn default_retry_limit() -> u32 {
    3
}

fn default_retry_fallback() -> RetryFallback {
    RetryFallback::CustomerCare
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("smartline").join("smartline.db"))
        .and_then(|p| p.to_str().map(String::from))
        .unwrap_or_else(|| "smartline.db".to_string())
}

fn default_wal_mode() -> bool {
    true
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}
