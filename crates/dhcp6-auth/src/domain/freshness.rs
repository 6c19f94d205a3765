//! # Key Freshness
//!
//! Expiration check for delayed-authentication keys.

use tracing::warn;

use crate::domain::entities::SymmetricKey;
use crate::ports::outbound::TimeSource;

impl SymmetricKey {
    /// True if the key may be used at `now_secs` (epoch seconds).
    ///
    /// A key with expiration `0` never expires; otherwise it is valid up to
    /// and including its expiration second.
    pub fn is_valid_at(&self, now_secs: u64) -> bool {
        self.expire() == 0 || now_secs <= self.expire()
    }
}

/// Check `key` against the current time of `clock`.
///
/// A clock that cannot be read makes every expiring key invalid.
pub fn is_key_valid<T: TimeSource + ?Sized>(key: &SymmetricKey, clock: &T) -> bool {
    if key.expire() == 0 {
        return true;
    }

    match clock.now() {
        Ok(now) => {
            let valid = key.is_valid_at(now.as_secs());
            if !valid {
                warn!(key = key.name(), expire = key.expire(), now = now.as_secs(), "Key expired");
            }
            valid
        }
        Err(e) => {
            warn!(key = key.name(), error = %e, "Clock unavailable, treating key as expired");
            false
        }
    }
}
