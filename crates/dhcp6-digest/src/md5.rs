//! # MD5 Digest Engine
//!
//! Streaming MD5 per RFC 1321.
//!
//! Input is buffered into 64-byte blocks and folded into four 32-bit state
//! words by the four-round compression function. The processed byte count is
//! kept modulo 2^64, so a single stream has no practical length limit.
//!
//! Words are always decoded and encoded little-endian, which is what the
//! algorithm defines; results do not depend on the host byte order.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// MD5 output length in bytes.
pub const DIGEST_LENGTH: usize = 16;

/// MD5 block length in bytes.
pub const BLOCK_LENGTH: usize = 64;

/// Offset in the final block where the 64-bit bit length goes.
const LENGTH_OFFSET: usize = BLOCK_LENGTH - 8;

const INITIAL_STATE: [u32; 4] = [0x6745_2301, 0xefcd_ab89, 0x98ba_dcfe, 0x1032_5476];

/// Per-step left-rotate amounts.
const SHIFTS: [u32; 64] = [
    7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, //
    5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20, //
    4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, //
    6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21,
];

/// Per-step additive constants, `floor(abs(sin(i + 1)) * 2^32)`.
const SINES: [u32; 64] = [
    0xd76a_a478, 0xe8c7_b756, 0x2420_70db, 0xc1bd_ceee, 0xf57c_0faf, 0x4787_c62a, 0xa830_4613,
    0xfd46_9501, 0x6980_98d8, 0x8b44_f7af, 0xffff_5bb1, 0x895c_d7be, 0x6b90_1122, 0xfd98_7193,
    0xa679_438e, 0x49b4_0821, 0xf61e_2562, 0xc040_b340, 0x265e_5a51, 0xe9b6_c7aa, 0xd62f_105d,
    0x0244_1453, 0xd8a1_e681, 0xe7d3_fbc8, 0x21e1_cde6, 0xc337_07d6, 0xf4d5_0d87, 0x455a_14ed,
    0xa9e3_e905, 0xfcef_a3f8, 0x676f_02d9, 0x8d2a_4c8a, 0xfffa_3942, 0x8771_f681, 0x6d9d_6122,
    0xfde5_380c, 0xa4be_ea44, 0x4bde_cfa9, 0xf6bb_4b60, 0xbebf_bc70, 0x289b_7ec6, 0xeaa1_27fa,
    0xd4ef_3085, 0x0488_1d05, 0xd9d4_d039, 0xe6db_99e5, 0x1fa2_7cf8, 0xc4ac_5665, 0xf429_2244,
    0x432a_ff97, 0xab94_23a7, 0xfc93_a039, 0x655b_59c3, 0x8f0c_cc92, 0xffef_f47d, 0x8584_5dd1,
    0x6fa8_7e4f, 0xfe2c_e6e0, 0xa301_4314, 0x4e08_11a1, 0xf753_7e82, 0xbd3a_f235, 0x2ad7_d2bb,
    0xeb86_d391,
];

/// Streaming MD5 state.
///
/// `finalize` takes the state by value, so a finished stream cannot be fed
/// again. Dropping the state (finished or not) wipes it.
///
/// ```
/// use dhcp6_digest::Md5;
///
/// let mut md5 = Md5::new();
/// md5.update(b"message ");
/// md5.update(b"digest");
/// assert_eq!(md5.finalize(), Md5::digest(b"message digest"));
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Md5 {
    state: [u32; 4],
    /// Bytes consumed so far, modulo 2^64.
    length: u64,
    block: [u8; BLOCK_LENGTH],
}

impl Md5 {
    /// Start a new digest stream.
    pub fn new() -> Self {
        Self {
            state: INITIAL_STATE,
            length: 0,
            block: [0u8; BLOCK_LENGTH],
        }
    }

    /// One-shot digest of `data`.
    pub fn digest(data: &[u8]) -> [u8; DIGEST_LENGTH] {
        let mut md5 = Self::new();
        md5.update(data);
        md5.finalize()
    }

    /// Feed more input into the stream.
    pub fn update(&mut self, data: &[u8]) {
        let mut buffered = self.buffered();
        self.length = self.length.wrapping_add(data.len() as u64);

        let mut input = data;
        if buffered > 0 {
            let take = (BLOCK_LENGTH - buffered).min(input.len());
            self.block[buffered..buffered + take].copy_from_slice(&input[..take]);
            buffered += take;
            input = &input[take..];

            if buffered < BLOCK_LENGTH {
                return;
            }
            compress(&mut self.state, &self.block);
        }

        let mut blocks = input.chunks_exact(BLOCK_LENGTH);
        for block in &mut blocks {
            compress(&mut self.state, block);
        }

        let rest = blocks.remainder();
        self.block[..rest.len()].copy_from_slice(rest);
    }

    /// Pad, process the final block(s) and return the digest.
    pub fn finalize(mut self) -> [u8; DIGEST_LENGTH] {
        let bit_length = self.length.wrapping_mul(8);
        let buffered = self.buffered();

        // There is always room for the 0x80 marker.
        self.block[buffered] = 0x80;
        if buffered + 1 > LENGTH_OFFSET {
            self.block[buffered + 1..].fill(0);
            compress(&mut self.state, &self.block);
            self.block[..LENGTH_OFFSET].fill(0);
        } else {
            self.block[buffered + 1..LENGTH_OFFSET].fill(0);
        }

        self.block[LENGTH_OFFSET..].copy_from_slice(&bit_length.to_le_bytes());
        compress(&mut self.state, &self.block);

        let mut digest = [0u8; DIGEST_LENGTH];
        for (out, word) in digest.chunks_exact_mut(4).zip(self.state.iter()) {
            out.copy_from_slice(&word.to_le_bytes());
        }
        digest
    }

    /// Number of bytes waiting in the pending block.
    fn buffered(&self) -> usize {
        (self.length % BLOCK_LENGTH as u64) as usize
    }
}

impl Default for Md5 {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Md5 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Md5")
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

/// Fold one 64-byte block into the state.
fn compress(state: &mut [u32; 4], block: &[u8]) {
    debug_assert_eq!(block.len(), BLOCK_LENGTH);

    let mut words = [0u32; 16];
    for (word, bytes) in words.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }

    let [mut a, mut b, mut c, mut d] = *state;
    for step in 0..64 {
        let (mixed, index) = match step / 16 {
            0 => (d ^ (b & (c ^ d)), step),
            1 => (c ^ (d & (b ^ c)), (5 * step + 1) % 16),
            2 => (b ^ c ^ d, (3 * step + 5) % 16),
            _ => (c ^ (b | !d), (7 * step) % 16),
        };

        let rotated = a
            .wrapping_add(mixed)
            .wrapping_add(SINES[step])
            .wrapping_add(words[index])
            .rotate_left(SHIFTS[step]);

        a = d;
        d = c;
        c = b;
        b = b.wrapping_add(rotated);
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);

    words.zeroize();
}
