//! Embedded-span helpers shared by the MAC and signature protocols.
//!
//! Both protocols authenticate the message as the sender saw it: with the
//! MAC or signature field filled with zeros. Verification feeds the digest
//! the prefix, a run of zeros and the suffix instead of editing the buffer.

use dhcp6_digest::HmacMd5;
use sha2::{Digest, Sha256};

use crate::domain::errors::AuthError;

const ZEROS: [u8; 64] = [0u8; 64];

/// Anything that absorbs bytes in order.
pub(crate) trait Absorb {
    fn absorb(&mut self, data: &[u8]);
}

impl Absorb for HmacMd5 {
    fn absorb(&mut self, data: &[u8]) {
        self.update(data);
    }
}

impl Absorb for Sha256 {
    fn absorb(&mut self, data: &[u8]) {
        Digest::update(self, data);
    }
}

/// Check that `len` bytes at `offset` fit inside `available` bytes.
pub(crate) fn check_span(available: usize, offset: usize, len: usize) -> Result<(), AuthError> {
    let required = offset.saturating_add(len);
    if required > available {
        tracing::warn!(offset, len, available, "Authentication span exceeds buffer");
        return Err(AuthError::ShortBuffer {
            required,
            available,
        });
    }
    Ok(())
}

/// Feed `buffer` to `state` with `buffer[offset..offset + len]` read as zeros.
///
/// The span must already have passed [`check_span`].
pub(crate) fn absorb_with_zeroed_span<A: Absorb>(
    state: &mut A,
    buffer: &[u8],
    offset: usize,
    len: usize,
) {
    let end = offset + len;
    state.absorb(&buffer[..offset]);

    let mut remaining = len;
    while remaining > 0 {
        let chunk = remaining.min(ZEROS.len());
        state.absorb(&ZEROS[..chunk]);
        remaining -= chunk;
    }

    state.absorb(&buffer[end..]);
}
