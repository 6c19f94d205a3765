//! # HMAC-MD5
//!
//! RFC 2104 keyed MAC over the in-crate MD5 engine.
//!
//! ## Security Notes
//!
//! - Keys longer than one MD5 block are hashed down to 16 bytes first
//! - `sign` and `verify` consume the state; the derived key block and both
//!   digest streams are wiped when they finish
//! - `verify` compares with `subtle::ConstantTimeEq`

use crate::md5::{Md5, BLOCK_LENGTH, DIGEST_LENGTH};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of the padded key block.
pub const KEY_BLOCK_LENGTH: usize = BLOCK_LENGTH;

const INNER_PAD: u8 = 0x36;
const OUTER_PAD: u8 = 0x5c;

/// One-shot HMAC-MD5 computation.
///
/// Usable for any data that fits in a single update; use [`HmacMd5`] when
/// the message arrives in pieces.
///
/// ```
/// use dhcp6_digest::hmac_md5;
///
/// let mac = hmac_md5(b"Jefe", b"what do ya want for nothing?");
/// assert_eq!(mac[0], 0x75);
/// ```
pub fn hmac_md5(key: &[u8], data: &[u8]) -> [u8; DIGEST_LENGTH] {
    let mut hmac = HmacMd5::new(key);
    hmac.update(data);
    hmac.sign()
}

/// Streaming HMAC-MD5 state.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct HmacMd5 {
    /// Inner digest stream, seeded with `key ^ ipad`.
    inner: Md5,
    /// Key zero-padded (or hashed, then zero-padded) to one block.
    key: [u8; KEY_BLOCK_LENGTH],
}

impl HmacMd5 {
    /// Derive the key block and open the inner digest stream.
    pub fn new(key: &[u8]) -> Self {
        let mut key_block = [0u8; KEY_BLOCK_LENGTH];
        if key.len() > KEY_BLOCK_LENGTH {
            let mut hashed = Md5::digest(key);
            key_block[..DIGEST_LENGTH].copy_from_slice(&hashed);
            hashed.zeroize();
        } else {
            key_block[..key.len()].copy_from_slice(key);
        }

        let mut inner = Md5::new();
        let mut pad = xor_pad(&key_block, INNER_PAD);
        inner.update(&pad);
        pad.zeroize();

        Self {
            inner,
            key: key_block,
        }
    }

    /// Feed message bytes into the inner stream.
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Finish both digest passes and return the MAC.
    pub fn sign(mut self) -> [u8; DIGEST_LENGTH] {
        let mut inner_digest = std::mem::take(&mut self.inner).finalize();

        let mut outer = Md5::new();
        let mut pad = xor_pad(&self.key, OUTER_PAD);
        outer.update(&pad);
        outer.update(&inner_digest);

        pad.zeroize();
        inner_digest.zeroize();

        outer.finalize()
    }

    /// Compute the MAC and compare it with `expected` in constant time.
    pub fn verify(self, expected: &[u8; DIGEST_LENGTH]) -> bool {
        let mut computed = self.sign();
        let matches = bool::from(computed[..].ct_eq(&expected[..]));
        computed.zeroize();
        matches
    }
}

impl std::fmt::Debug for HmacMd5 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacMd5").finish_non_exhaustive()
    }
}

fn xor_pad(key_block: &[u8; KEY_BLOCK_LENGTH], pad: u8) -> [u8; KEY_BLOCK_LENGTH] {
    let mut out = [pad; KEY_BLOCK_LENGTH];
    for (byte, key_byte) in out.iter_mut().zip(key_block.iter()) {
        *byte ^= key_byte;
    }
    out
}
