//! # DHCPv6 Authentication
//!
//! Protects DHCPv6 messages against forgery and replay.
//!
//! ## Mechanisms
//!
//! | Mechanism | Algorithm | Module |
//! |-----------|-----------|--------|
//! | Delayed authentication | HMAC-MD5 over the message | [`domain::mac`] |
//! | Secure DHCPv6 | RSASSA-PKCS1-v1_5 over SHA-256 | [`domain::signature`] |
//! | Anti-replay | Drift-tolerant peer timestamps | [`domain::peer`] |
//! | Key expiration | Epoch-second deadline | [`domain::freshness`] |
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Buffer-level protocol logic, no I/O
//! - **Ports Layer** (`ports/`): Trait definitions for inbound/outbound interfaces
//! - **Adapters Layer** (`adapters/`): Clock, filesystem and RSA backends
//! - **Service Layer** (`service.rs`): Wires domain logic to ports
//!
//! ## Security Notes
//!
//! - **Immutable verification**: MAC and signature checks hash the received
//!   buffer with the authenticator span read as zeros; caller memory is
//!   never modified
//! - **Constant-time MAC comparison** (`HmacMd5::verify` in `dhcp6-digest`)
//! - **Explicit rejection**: any algorithm identifier other than HMAC-MD5,
//!   SHA-256 or RSASSA-PKCS1-v1_5 is an error
//! - **Key hygiene**: secrets and serialized private keys are wiped on drop

#![warn(missing_docs)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

mod init;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export public API
pub use config::{AuthConfig, KeyConfig, SeDhcpv6Config};
pub use domain::algorithms::{
    AuthAlgorithm, AuthProtocol, HashAlgorithm, SignatureAlgorithm, SigningParams,
};
pub use domain::entities::{Duid, SymmetricKey, Timestamp};
pub use domain::errors::{AuthError, ProviderError};
pub use domain::freshness::is_key_valid;
pub use domain::keys::{
    copy_key, free_key, load_certificate, load_private_key, load_public_key, signature_size,
    AsymmetricKeyHandle, CertificateData, DerBlob, KeyMaterial, PublicKeyData,
};
pub use domain::mac::{compute_mac, verify_mac, MAC_LENGTH};
pub use domain::peer::{AuthPeer, PeerRegistry, ReplayState, TS_DELTA, TS_DRIFT_PERCENT, TS_FUZZ};
pub use domain::signature::{sign_message, verify_message};
pub use init::init;
pub use ports::inbound::AuthenticationApi;
pub use ports::outbound::{AsymmetricCryptoProvider, KeySource, Sha256Digest, TimeSource};
pub use service::AuthService;

#[cfg(feature = "rsa-provider")]
pub use adapters::RsaProvider;
pub use adapters::{FileKeySource, SystemTimeSource};
