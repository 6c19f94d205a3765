//! # Authentication Errors
//!
//! Error types for MAC, signature, key lifecycle and configuration operations.

use thiserror::Error;

/// Errors reported by an asymmetric crypto provider.
///
/// Carries the provider's diagnostic text; the subsystem never interprets it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// Key bytes could not be decoded
    #[error("Malformed key: {0}")]
    MalformedKey(String),

    /// Certificate bytes could not be decoded
    #[error("Malformed certificate: {0}")]
    MalformedCertificate(String),

    /// The signing primitive failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// The verification primitive failed for a reason other than a bad signature
    #[error("Verification error: {0}")]
    Verification(String),

    /// Key serialization failed
    #[error("Key encoding failed: {0}")]
    Encoding(String),
}

/// Errors that can occur in the authentication subsystem.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// An algorithm or protocol identifier outside the supported set
    #[error("Unsupported {kind}: {code}")]
    UnsupportedAlgorithm {
        /// Which identifier space the code belongs to
        kind: &'static str,
        /// The rejected wire code
        code: u8,
    },

    /// The MAC or signature span does not fit in the buffer
    #[error("Buffer too short: {required} bytes required, {available} available")]
    ShortBuffer {
        /// End offset of the span
        required: usize,
        /// Buffer length
        available: usize,
    },

    /// The crypto provider failed
    #[error("Crypto provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Key or certificate bytes could not be read
    #[error("Failed to read '{source_name}': {reason}")]
    Io {
        /// Name the key source was asked for
        source_name: String,
        /// Underlying error text
        reason: String,
    },

    /// The embedded MAC does not match the recomputed one
    #[error("MAC mismatch")]
    Mismatch,

    /// The embedded signature does not verify
    #[error("Signature verification failed")]
    SignatureInvalid,

    /// A precondition the caller must guarantee did not hold
    #[error("Assumption failure: {0}")]
    AssumptionFailure(String),

    /// The local clock could not be read
    #[error("System clock unavailable")]
    ClockUnavailable,

    /// A symmetric key is past its expiration time
    #[error("Key '{name}' has expired")]
    KeyExpired {
        /// Configured key name
        name: String,
    },

    /// Configuration could not be loaded or is inconsistent
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl AuthError {
    /// True for the expected negative outcomes of a verification, as opposed
    /// to faults in the inputs or the environment.
    pub fn is_verification_failure(&self) -> bool {
        matches!(self, AuthError::Mismatch | AuthError::SignatureInvalid)
    }
}
