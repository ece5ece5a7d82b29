//! OTP record entity for client identity verification.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of verification attempts allowed
pub const MAX_ATTEMPTS: i32 = 3;

/// Length of the OTP code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for OTP codes (5 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 5;

/// Minimum seconds between resend requests for the same client
pub const RESEND_COOLDOWN_SECONDS: i64 = 30;

/// One issued one-time code for a client.
///
/// Records are never physically deleted; terminal transitions (verified,
/// expired, exhausted, superseded) all set `is_used` and the row is kept
/// as audit history. At most one record per client may have
/// `is_used == false` at any instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Unique identifier for the OTP record
    pub id: Uuid,

    /// Client this code verifies
    pub client_id: Uuid,

    /// Destination phone number (E.164 digit string)
    pub phone: String,

    /// The 6-digit OTP code
    pub code: String,

    /// Number of verification attempts made
    pub attempts: i32,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,

    /// Whether the code has reached a terminal state
    pub is_used: bool,
}

impl OtpRecord {
    /// Creates a new OTP record with a random 6-digit code and the
    /// default expiration.
    pub fn new(client_id: Uuid, phone: String) -> Self {
        Self::new_with_expiration(client_id, phone, DEFAULT_EXPIRATION_MINUTES)
    }

    /// Creates a new OTP record with a custom expiration time in minutes.
    pub fn new_with_expiration(client_id: Uuid, phone: String, expiration_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            client_id,
            phone,
            code: Self::generate_code(),
            attempts: 0,
            created_at: now,
            expires_at: now + Duration::minutes(expiration_minutes),
            is_used: false,
        }
    }

    /// Generates a random 6-digit code in [100000, 999999].
    ///
    /// Uses the OS CSPRNG; the range excludes values that would render
    /// with a leading zero.
    pub fn generate_code() -> String {
        let code: u32 = OsRng.gen_range(100_000..=999_999);
        code.to_string()
    }

    /// Checks if the code has expired as of `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Checks if the code can still be used to authenticate.
    ///
    /// A code is valid iff it is unused, unexpired, and under the attempt
    /// cap. This predicate is the single source of truth for usability and
    /// must be evaluated at call time, never cached.
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        !self.is_used && !self.is_expired(now) && self.attempts < MAX_ATTEMPTS
    }

    /// Compares a submitted code against the stored code in constant time
    pub fn matches(&self, submitted: &str) -> bool {
        self.code.len() == submitted.len()
            && constant_time_eq(self.code.as_bytes(), submitted.as_bytes())
    }

    /// Gets the number of remaining verification attempts (0 if exceeded)
    pub fn remaining_attempts(&self) -> i32 {
        (MAX_ATTEMPTS - self.attempts).max(0)
    }

    /// Whole seconds until expiry as of `now` (0 if already expired)
    pub fn seconds_until_expiry(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }

    /// Remaining resend cooldown in whole seconds, rounded up.
    ///
    /// Returns `None` once `cooldown_seconds` have elapsed since creation.
    pub fn resend_wait_seconds(&self, now: DateTime<Utc>, cooldown_seconds: i64) -> Option<i64> {
        let remaining_ms = cooldown_seconds * 1000 - (now - self.created_at).num_milliseconds();
        if remaining_ms > 0 {
            Some((remaining_ms + 999) / 1000)
        } else {
            None
        }
    }

    /// Marks the record as terminally used
    pub fn mark_used(&mut self) {
        self.is_used = true;
    }
}
