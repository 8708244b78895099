// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses and a non-zero retry ceiling.

use crate::diagnostic::ConfigError;
use crate::model::SmartlineConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &SmartlineConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.dialog.retry_limit == 0 {
        errors.push(ConfigError::Validation {
            message: "dialog.retry_limit must be at least 1".to_string(),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    let addr = config.gateway.bind_address.trim();
    if addr.is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.bind_address must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = addr.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = addr
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!(
                    "gateway.bind_address `{addr}` is not a valid IP address or hostname"
                ),
            });
        }
    }

    if config.agent.operator.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "agent.operator must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
