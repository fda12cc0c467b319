//! Configuration for the storefront application.
//!
//! Loads configuration from environment variables with sensible defaults.
//! The storefront is stateless across reloads, so configuration is the
//! only startup input besides the catalog.

use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,
    /// Checkout behavior knobs
    pub checkout: CheckoutSettings,
}

/// Checkout behavior
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CheckoutSettings {
    /// Whether checkout empties the cart once tickets are issued.
    ///
    /// The original UI left the cart populated after confirmation (the
    /// confirmed phase is terminal, so the cart was simply unreachable).
    /// Defaults to `false` to match; set `true` for a session flow that
    /// supports returning to an empty cart.
    pub clear_cart_after_checkout: bool,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// `CLEAR_CART_AFTER_CHECKOUT` accepts `true`/`false`, `1`/`0`,
    /// `yes`/`no`, or `on`/`off` (case-insensitive); anything else
    /// falls back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            checkout: CheckoutSettings {
                clear_cart_after_checkout: env::var("CLEAR_CART_AFTER_CHECKOUT")
                    .ok()
                    .and_then(|s| parse_flag(&s))
                    .unwrap_or(false),
            },
        }
    }
}

/// Parse a boolean environment flag.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            checkout: CheckoutSettings::default(),
        }
    }
}
