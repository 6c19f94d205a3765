//! # DHCPv6 Digest Primitives
//!
//! Self-contained message digest and keyed MAC used by the DHCPv6 delayed
//! authentication protocol (RFC 3118 / RFC 8415 Section 20).
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `md5` | MD5 (RFC 1321) | Streaming digest engine |
//! | `hmac` | HMAC-MD5 (RFC 2104) | Authentication option MAC |
//!
//! ## Security Properties
//!
//! - Finalization consumes the state; a finished stream cannot be updated
//! - Hash state and derived key blocks are wiped on drop (`zeroize`)
//! - MAC verification compares in constant time (`subtle`)
//! - Output is independent of host byte order

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod hmac;
pub mod md5;

// Re-exports
pub use hmac::{hmac_md5, HmacMd5, KEY_BLOCK_LENGTH};
pub use md5::{Md5, BLOCK_LENGTH, DIGEST_LENGTH};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
