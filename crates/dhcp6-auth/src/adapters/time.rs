//! Wall-clock time source.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::entities::Timestamp;
use crate::domain::errors::AuthError;
use crate::ports::outbound::TimeSource;

// ============================================================================
// SystemTimeSource - Production Time Source
// ============================================================================

/// Production time source using the system clock.
///
/// For testing, use `FixedTimeSource` from the test utilities.
///
/// # Example
///
/// ```rust
/// use dhcp6_auth::adapters::SystemTimeSource;
/// use dhcp6_auth::ports::TimeSource;
///
/// let now = SystemTimeSource::new().now().unwrap();
/// assert!(now.as_secs() > 0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl SystemTimeSource {
    /// Create a new system time source.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Result<Timestamp, AuthError> {
        let duration = SystemTime::now().duration_since(UNIX_EPOCH).map_err(|e| {
            tracing::error!(error = %e, "System clock is before the Unix epoch");
            AuthError::ClockUnavailable
        })?;

        Ok(Timestamp::from_secs_micros(
            duration.as_secs(),
            duration.subsec_micros(),
        ))
    }
}
