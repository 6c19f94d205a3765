//! # Message Authentication Codes
//!
//! Delayed-authentication MACs embedded in DHCPv6 messages.
//!
//! The sender zeroes the 16-byte MAC field of the authentication option,
//! computes HMAC-MD5 over the entire message and writes the result into the
//! field. The receiver recomputes over the message with the field read as
//! zeros and compares.

use dhcp6_digest::{HmacMd5, DIGEST_LENGTH};
use tracing::{debug, error, warn};

use crate::domain::algorithms::AuthAlgorithm;
use crate::domain::entities::SymmetricKey;
use crate::domain::errors::AuthError;
use crate::domain::span::{absorb_with_zeroed_span, check_span};

/// Length of the HMAC-MD5 field.
pub const MAC_LENGTH: usize = DIGEST_LENGTH;

/// Compute the MAC over `buffer` and write it at `mac_offset`.
///
/// The MAC field must already be zero; the whole buffer is hashed as-is.
/// On error the buffer is left untouched.
///
/// # Errors
/// * `AuthError::UnsupportedAlgorithm` - `algorithm` is not HMAC-MD5
/// * `AuthError::AssumptionFailure` - `key` is tagged with another algorithm
/// * `AuthError::ShortBuffer` - the MAC field does not fit
pub fn compute_mac(
    buffer: &mut [u8],
    algorithm: AuthAlgorithm,
    mac_offset: usize,
    key: &SymmetricKey,
) -> Result<(), AuthError> {
    algorithm.ensure_supported()?;
    ensure_key_matches(key, algorithm)?;
    check_span(buffer.len(), mac_offset, MAC_LENGTH)?;

    let mut hmac = HmacMd5::new(key.secret());
    hmac.update(buffer);
    let mac = hmac.sign();

    buffer[mac_offset..mac_offset + MAC_LENGTH].copy_from_slice(&mac);
    debug!(
        key = key.name(),
        offset = mac_offset,
        len = buffer.len(),
        "Computed message MAC"
    );
    Ok(())
}

/// Verify the MAC embedded at `mac_offset`.
///
/// The buffer is never modified.
///
/// # Errors
/// * `AuthError::UnsupportedAlgorithm` - `algorithm` is not HMAC-MD5
/// * `AuthError::AssumptionFailure` - `key` is tagged with another algorithm
/// * `AuthError::ShortBuffer` - the MAC field does not fit
/// * `AuthError::Mismatch` - the MAC does not match
pub fn verify_mac(
    buffer: &[u8],
    algorithm: AuthAlgorithm,
    mac_offset: usize,
    key: &SymmetricKey,
) -> Result<(), AuthError> {
    algorithm.ensure_supported()?;
    ensure_key_matches(key, algorithm)?;
    check_span(buffer.len(), mac_offset, MAC_LENGTH)?;

    let mut received = [0u8; MAC_LENGTH];
    received.copy_from_slice(&buffer[mac_offset..mac_offset + MAC_LENGTH]);

    let mut hmac = HmacMd5::new(key.secret());
    absorb_with_zeroed_span(&mut hmac, buffer, mac_offset, MAC_LENGTH);

    if !hmac.verify(&received) {
        warn!(key = key.name(), offset = mac_offset, "Message MAC mismatch");
        return Err(AuthError::Mismatch);
    }

    debug!(key = key.name(), offset = mac_offset, "Message MAC verified");
    Ok(())
}

fn ensure_key_matches(key: &SymmetricKey, algorithm: AuthAlgorithm) -> Result<(), AuthError> {
    if key.algorithm() != algorithm {
        error!(
            key = key.name(),
            tagged = %key.algorithm(),
            requested = %algorithm,
            "MAC key algorithm mismatch"
        );
        return Err(AuthError::AssumptionFailure(format!(
            "key {} is tagged {} but {} was requested",
            key.name(),
            key.algorithm(),
            algorithm
        )));
    }
    Ok(())
}
