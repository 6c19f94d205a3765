//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that DHCPv6 clients and servers call
//! - **Outbound (Driven)**: Crypto backend, key storage and clock

pub mod inbound;
pub mod outbound;

pub use inbound::AuthenticationApi;
pub use outbound::{AsymmetricCryptoProvider, KeySource, TimeSource};
