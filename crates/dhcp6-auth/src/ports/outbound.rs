//! # Outbound Ports (Driven Ports / SPI)
//!
//! Traits for the dependencies this subsystem needs: an RSA backend, a store
//! of PEM-encoded key material and a clock.

use zeroize::Zeroizing;

use crate::domain::entities::Timestamp;
use crate::domain::errors::{AuthError, ProviderError};

/// SHA-256 digest handed to the provider.
pub type Sha256Digest = [u8; 32];

/// Asymmetric crypto backend for Secure DHCPv6 signatures.
///
/// Implementations own the big-integer arithmetic. The subsystem only passes
/// digests, DER blobs and provider-native private keys through this trait.
///
/// # Example Implementation
///
/// ```rust,ignore
/// struct HsmProvider { session: Session }
///
/// impl AsymmetricCryptoProvider for HsmProvider {
///     type PrivateKey = HsmKeyHandle;
///
///     fn sign(&self, key: &HsmKeyHandle, digest: &Sha256Digest) -> Result<Vec<u8>, ProviderError> {
///         self.session.sign_pkcs1_sha256(key, digest).map_err(|e| ProviderError::SigningFailed(e.to_string()))
///     }
///     // ...
/// }
/// ```
pub trait AsymmetricCryptoProvider: Send + Sync {
    /// Provider-native private key object.
    type PrivateKey;

    /// Decode a PEM private key.
    fn private_key_from_pem(&self, pem: &str) -> Result<Self::PrivateKey, ProviderError>;

    /// Decode a PEM public key and return its SubjectPublicKeyInfo DER.
    fn public_key_from_pem(&self, pem: &str) -> Result<Vec<u8>, ProviderError>;

    /// Decode a PEM certificate and return its DER.
    fn certificate_from_pem(&self, pem: &str) -> Result<Vec<u8>, ProviderError>;

    /// Serialize a private key to DER.
    fn private_key_to_der(&self, key: &Self::PrivateKey)
        -> Result<Zeroizing<Vec<u8>>, ProviderError>;

    /// Deserialize a private key from DER produced by [`private_key_to_der`].
    ///
    /// [`private_key_to_der`]: AsymmetricCryptoProvider::private_key_to_der
    fn private_key_from_der(&self, der: &[u8]) -> Result<Self::PrivateKey, ProviderError>;

    /// Modulus size in bytes, which is also the signature length.
    fn modulus_size(&self, key: &Self::PrivateKey) -> usize;

    /// RSASSA-PKCS1-v1_5 signature over a SHA-256 digest.
    fn sign(&self, key: &Self::PrivateKey, digest: &Sha256Digest)
        -> Result<Vec<u8>, ProviderError>;

    /// Verify a signature against a SubjectPublicKeyInfo DER public key.
    ///
    /// `Ok(false)` means the signature is well-formed input that does not
    /// verify; `Err` means the key or signature could not be processed.
    fn verify(
        &self,
        public_key_der: &[u8],
        digest: &Sha256Digest,
        signature: &[u8],
    ) -> Result<bool, ProviderError>;

    /// Release a private key.
    fn release_private_key(&self, key: Self::PrivateKey) {
        drop(key);
    }
}

/// Store of named PEM documents (keys and certificates).
pub trait KeySource: Send + Sync {
    /// Read the PEM text stored under `name`.
    ///
    /// # Errors
    /// * `AuthError::Io` - The document does not exist or cannot be read
    fn read_pem(&self, name: &str) -> Result<String, AuthError>;
}

/// Abstract interface for getting current time.
///
/// Allows deterministic testing by injecting a controllable clock.
pub trait TimeSource: Send + Sync {
    /// Current time at microsecond resolution.
    ///
    /// # Errors
    /// * `AuthError::ClockUnavailable` - The clock could not be read
    fn now(&self) -> Result<Timestamp, AuthError>;
}

impl<T: TimeSource + ?Sized> TimeSource for std::sync::Arc<T> {
    fn now(&self) -> Result<Timestamp, AuthError> {
        (**self).now()
    }
}

impl<S: KeySource + ?Sized> KeySource for std::sync::Arc<S> {
    fn read_pem(&self, name: &str) -> Result<String, AuthError> {
        (**self).read_pem(name)
    }
}
