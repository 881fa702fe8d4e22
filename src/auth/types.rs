//! Credential type

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Seconds before expiry at which a credential stops being used
pub const EXPIRY_MARGIN_SECS: i64 = 60;

/// Bearer credential returned by the login endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// The JWT sent as bearer token
    pub access_token: String,
    /// Lifetime in seconds, as reported by the login response
    pub expires_in: i64,
    /// Unix timestamp (seconds) of the login request
    pub created_at: i64,
}

impl Credential {
    /// Create a credential issued at `created_at`
    pub fn new(access_token: impl Into<String>, expires_in: i64, created_at: i64) -> Self {
        Self {
            access_token: access_token.into(),
            expires_in,
            created_at,
        }
    }

    /// Last second (exclusive) at which the credential may be used
    pub fn usable_until(&self) -> i64 {
        self.created_at + self.expires_in - EXPIRY_MARGIN_SECS
    }

    /// Check validity against an explicit clock
    pub fn is_valid_at(&self, now: i64) -> bool {
        now < self.usable_until()
    }

    /// Check validity against the current UTC time
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now().timestamp())
    }
}
