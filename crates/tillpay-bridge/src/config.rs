//! # Session Configuration
//!
//! Configuration for the session facade.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Explicit value passed by the host (highest priority)               │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     TILLPAY_TOKEN_LIFETIME_SECS=1800                                   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     token_lifetime = 2700 s                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;
use tracing::warn;

/// Default token lifetime in seconds (45 minutes).
///
/// ## Why 2700?
/// Access tokens expire server-side; forcing a logout shortly before that
/// happens preempts mid-checkout token-expiration failures. The next
/// operation then starts from a clean login instead of failing halfway.
pub const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 2700;

/// Environment variable overriding the token lifetime, in whole seconds.
pub const TOKEN_LIFETIME_ENV: &str = "TILLPAY_TOKEN_LIFETIME_SECS";

/// Configuration for a [`Session`](crate::Session).
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long a token login stays valid before the scheduled forced
    /// logout fires.
    pub token_lifetime: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            token_lifetime: Duration::from_secs(DEFAULT_TOKEN_LIFETIME_SECS),
        }
    }
}

impl SessionConfig {
    /// Creates a config from an explicit value, the environment, or the
    /// default, in that order.
    pub fn from_env_or(token_lifetime: Option<Duration>) -> Self {
        let from_env = || {
            let raw = std::env::var(TOKEN_LIFETIME_ENV).ok()?;
            match raw.parse::<u64>() {
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(_) => {
                    warn!(%raw, "ignoring unparsable {TOKEN_LIFETIME_ENV}");
                    None
                }
            }
        };

        SessionConfig {
            token_lifetime: token_lifetime
                .or_else(from_env)
                .unwrap_or(Duration::from_secs(DEFAULT_TOKEN_LIFETIME_SECS)),
        }
    }
}
