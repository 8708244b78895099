// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./smartline.toml` > `~/.config/smartline/smartline.toml`
//! > `/etc/smartline/smartline.toml` with environment variable overrides via
//! the `SMARTLINE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::SmartlineConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/smartline/smartline.toml` (system-wide)
/// 3. `~/.config/smartline/smartline.toml` (user XDG config)
/// 4. `./smartline.toml` (local directory)
/// 5. `SMARTLINE_*` environment variables
pub fn load_config() -> Result<SmartlineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SmartlineConfig::default()))
        .merge(Toml::file("/etc/smartline/smartline.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("smartline/smartline.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("smartline.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config file paths.
pub fn load_config_from_str(toml_content: &str) -> Result<SmartlineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SmartlineConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SmartlineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SmartlineConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `SMARTLINE_DIALOG_RETRY_LIMIT` must map
/// to `dialog.retry_limit`, not `dialog.retry.limit`.
fn env_provider() -> Env {
    Env::prefixed("SMARTLINE_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("dialog_", "dialog.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("gateway_", "gateway.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RetryFallback;

    #[test]
    fn inline_toml_overrides_defaults() {
        let config = load_config_from_str(
            r#"
            [dialog]
            retry_limit = 5
            retry_fallback = "hang-up"

            [gateway]
            port = 9090
            "#,
        )
        .unwrap();
        assert_eq!(config.dialog.retry_limit, 5);
        assert_eq!(config.dialog.retry_fallback, RetryFallback::HangUp);
        assert_eq!(config.gateway.port, 9090);
        // Untouched sections keep their defaults.
        assert_eq!(config.agent.operator, "SmartTel");
    }

    #[test]
    fn unknown_key_is_rejected() {
        let result = load_config_from_str(
            r#"
            [dialog]
            retry_limt = 5
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn env_vars_map_to_dotted_keys() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SMARTLINE_DIALOG_RETRY_LIMIT", "7");
            jail.set_env("SMARTLINE_AGENT_OPERATOR", "TeleDemo");
            let config: SmartlineConfig = Figment::new()
                .merge(Serialized::defaults(SmartlineConfig::default()))
                .merge(env_provider())
                .extract()?;
            assert_eq!(config.dialog.retry_limit, 7);
            assert_eq!(config.agent.operator, "TeleDemo");
            Ok(())
        });
    }
}
