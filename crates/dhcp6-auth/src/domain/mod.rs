//! # Domain Layer
//!
//! Message authentication logic over caller-supplied buffers.
//! Crypto backend, key storage and clock are reached only through ports.

pub mod algorithms;
pub mod entities;
pub mod errors;
pub mod freshness;
pub mod keys;
pub mod mac;
pub mod peer;
pub mod signature;

mod span;
