//! Numeric one-time code paired with an expiry instant.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default number of digits in a generated code
pub const DEFAULT_DIGITS: u32 = 6;

/// An outstanding verification challenge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneTimeCode {
    /// Decimal digits, no leading zero
    pub code: String,

    /// Last instant at which the code is still accepted
    pub expires_at: DateTime<Utc>,
}

impl OneTimeCode {
    /// Generate a fresh code with `digits` digits that stays valid for `validity`
    pub fn generate(digits: u32, validity: Duration) -> Self {
        Self {
            code: Self::generate_code(digits),
            expires_at: Utc::now() + validity,
        }
    }

    /// Random code in `[10^(digits-1), 10^digits)` drawn from the thread-local CSPRNG
    pub fn generate_code(digits: u32) -> String {
        let digits = digits.clamp(1, 18);
        let low = 10u64.pow(digits - 1);
        let high = 10u64.pow(digits);
        let mut rng = rand::thread_rng();
        rng.gen_range(low..high).to_string()
    }

    /// `now > expires_at`; the expiry instant itself is still valid
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Exact comparison in constant time
    pub fn matches(&self, candidate: &str) -> bool {
        constant_time_eq(self.code.as_bytes(), candidate.as_bytes())
    }
}
