//! Checkout configuration loaded from environment variables.

use std::time::Duration;

/// Pipeline configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `CHECKOUT_TIMEOUT_MS` — overall deadline for one checkout call
///   (default: `3000`)
/// - `CHECKOUT_MAX_CONCURRENT_FETCHES` — cap on concurrent collaborator
///   fetches across all resolution tasks (default: `32`)
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    pub timeout: Duration,
    pub max_concurrent_fetches: usize,
}

impl CheckoutConfig {
    /// Loads configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        let timeout_ms = std::env::var("CHECKOUT_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3_000);
        let max_concurrent_fetches = std::env::var("CHECKOUT_MAX_CONCURRENT_FETCHES")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(32);

        Self {
            timeout: Duration::from_millis(timeout_ms),
            max_concurrent_fetches,
        }
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(3_000),
            max_concurrent_fetches: 32,
        }
    }
}
