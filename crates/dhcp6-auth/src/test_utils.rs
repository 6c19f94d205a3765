//! Test utilities for DHCPv6 authentication.
//!
//! Deterministic implementations of the outbound ports.
//! Enable with the `test-utils` feature flag.
//!
//! # Example
//!
//! ```rust,ignore
//! use dhcp6_auth::test_utils::FixedTimeSource;
//! use dhcp6_auth::ports::TimeSource;
//!
//! let clock = FixedTimeSource::from_secs(1000);
//! clock.advance_secs(5);
//! assert_eq!(clock.now().unwrap().as_secs(), 1005);
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use parking_lot::RwLock;
use zeroize::Zeroizing;

use crate::domain::entities::{Timestamp, MICROS_PER_SEC};
use crate::domain::errors::{AuthError, ProviderError};
use crate::ports::outbound::{AsymmetricCryptoProvider, KeySource, Sha256Digest, TimeSource};

// ============================================================================
// FixedTimeSource
// ============================================================================

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct FixedTimeSource {
    micros: AtomicU64,
}

impl FixedTimeSource {
    /// Clock reading `now`.
    pub fn new(now: Timestamp) -> Self {
        Self {
            micros: AtomicU64::new(now.as_micros()),
        }
    }

    /// Clock reading `secs` whole seconds.
    pub fn from_secs(secs: u64) -> Self {
        Self::new(Timestamp::from_secs_micros(secs, 0))
    }

    /// Jump to `now`.
    pub fn set(&self, now: Timestamp) {
        self.micros.store(now.as_micros(), Ordering::SeqCst);
    }

    /// Move forward by `micros`.
    pub fn advance_micros(&self, micros: u64) {
        self.micros.fetch_add(micros, Ordering::SeqCst);
    }

    /// Move forward by `secs`.
    pub fn advance_secs(&self, secs: u64) {
        self.advance_micros(secs * MICROS_PER_SEC);
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> Result<Timestamp, AuthError> {
        Ok(Timestamp::from_micros(self.micros.load(Ordering::SeqCst)))
    }
}

// ============================================================================
// MemoryKeySource
// ============================================================================

/// PEM documents held in memory, keyed by name.
#[derive(Debug, Default)]
pub struct MemoryKeySource {
    documents: RwLock<HashMap<String, String>>,
}

impl MemoryKeySource {
    /// Empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `pem` under `name`, replacing any previous document.
    pub fn insert(&self, name: impl Into<String>, pem: impl Into<String>) {
        self.documents.write().insert(name.into(), pem.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(self, name: impl Into<String>, pem: impl Into<String>) -> Self {
        self.insert(name, pem);
        self
    }
}

impl KeySource for MemoryKeySource {
    fn read_pem(&self, name: &str) -> Result<String, AuthError> {
        self.documents
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| AuthError::Io {
                source_name: name.to_string(),
                reason: "no such document".to_string(),
            })
    }
}

// ============================================================================
// StubCryptoProvider
// ============================================================================

/// Signature length produced by [`StubCryptoProvider`].
pub const STUB_SIGNATURE_LENGTH: usize = 64;

const STUB_PUBLIC_PREFIX: &[u8] = b"STUB-PUB:";
const STUB_PRIVATE_LABEL: &str = "STUB PRIVATE KEY";
const STUB_PUBLIC_LABEL: &str = "STUB PUBLIC KEY";
const STUB_CERT_LABEL: &str = "STUB CERTIFICATE";

/// Private key of the stub provider: an opaque seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubPrivateKey {
    seed: Vec<u8>,
}

impl StubPrivateKey {
    /// Key derived from `seed`.
    pub fn new(seed: &[u8]) -> Self {
        Self {
            seed: seed.to_vec(),
        }
    }

    /// Public key DER matching this key.
    pub fn public_der(&self) -> Vec<u8> {
        [STUB_PUBLIC_PREFIX, &self.seed[..]].concat()
    }

    /// PEM-like text accepted by [`StubCryptoProvider::private_key_from_pem`].
    pub fn private_pem(&self) -> String {
        format!("{}:{}", STUB_PRIVATE_LABEL, hex::encode(&self.seed))
    }

    /// PEM-like text accepted by [`StubCryptoProvider::public_key_from_pem`].
    pub fn public_pem(&self) -> String {
        format!("{}:{}", STUB_PUBLIC_LABEL, hex::encode(&self.seed))
    }
}

/// A fast, insecure provider for exercising protocol logic.
///
/// The "signature" is the digest XOR-ed with the key seed, stretched to
/// [`STUB_SIGNATURE_LENGTH`] bytes. Documents are `LABEL:hex` strings.
#[derive(Debug, Default)]
pub struct StubCryptoProvider {
    truncate_signatures: bool,
    sign_calls: AtomicUsize,
    released: AtomicUsize,
}

impl StubCryptoProvider {
    /// Well-behaved provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider whose signatures are one byte shorter than the modulus size.
    pub fn with_truncated_signatures(mut self) -> Self {
        self.truncate_signatures = true;
        self
    }

    /// Number of `sign` calls so far.
    pub fn sign_calls(&self) -> usize {
        self.sign_calls.load(Ordering::SeqCst)
    }

    /// Number of private keys released so far.
    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    fn expected_signature(seed: &[u8], digest: &Sha256Digest) -> Vec<u8> {
        (0..STUB_SIGNATURE_LENGTH)
            .map(|i| digest[i % digest.len()] ^ seed[i % seed.len()])
            .collect()
    }

    fn decode(pem: &str, label: &str) -> Option<Vec<u8>> {
        let hex_part = pem.trim().strip_prefix(label)?.strip_prefix(':')?;
        let bytes = hex::decode(hex_part).ok()?;
        (!bytes.is_empty()).then_some(bytes)
    }
}

impl AsymmetricCryptoProvider for StubCryptoProvider {
    type PrivateKey = StubPrivateKey;

    fn private_key_from_pem(&self, pem: &str) -> Result<StubPrivateKey, ProviderError> {
        Self::decode(pem, STUB_PRIVATE_LABEL)
            .map(|seed| StubPrivateKey { seed })
            .ok_or_else(|| ProviderError::MalformedKey("not a stub private key".to_string()))
    }

    fn public_key_from_pem(&self, pem: &str) -> Result<Vec<u8>, ProviderError> {
        Self::decode(pem, STUB_PUBLIC_LABEL)
            .map(|seed| StubPrivateKey { seed }.public_der())
            .ok_or_else(|| ProviderError::MalformedKey("not a stub public key".to_string()))
    }

    fn certificate_from_pem(&self, pem: &str) -> Result<Vec<u8>, ProviderError> {
        Self::decode(pem, STUB_CERT_LABEL).ok_or_else(|| {
            ProviderError::MalformedCertificate("not a stub certificate".to_string())
        })
    }

    fn private_key_to_der(
        &self,
        key: &StubPrivateKey,
    ) -> Result<Zeroizing<Vec<u8>>, ProviderError> {
        Ok(Zeroizing::new(key.seed.clone()))
    }

    fn private_key_from_der(&self, der: &[u8]) -> Result<StubPrivateKey, ProviderError> {
        if der.is_empty() {
            return Err(ProviderError::MalformedKey("empty DER".to_string()));
        }
        Ok(StubPrivateKey::new(der))
    }

    fn modulus_size(&self, _key: &StubPrivateKey) -> usize {
        STUB_SIGNATURE_LENGTH
    }

    fn sign(&self, key: &StubPrivateKey, digest: &Sha256Digest) -> Result<Vec<u8>, ProviderError> {
        self.sign_calls.fetch_add(1, Ordering::SeqCst);
        let mut signature = Self::expected_signature(&key.seed, digest);
        if self.truncate_signatures {
            signature.pop();
        }
        Ok(signature)
    }

    fn verify(
        &self,
        public_key_der: &[u8],
        digest: &Sha256Digest,
        signature: &[u8],
    ) -> Result<bool, ProviderError> {
        let seed = public_key_der
            .strip_prefix(STUB_PUBLIC_PREFIX)
            .filter(|seed| !seed.is_empty())
            .ok_or_else(|| ProviderError::MalformedKey("not a stub public key".to_string()))?;
        Ok(signature == Self::expected_signature(seed, digest).as_slice())
    }

    fn release_private_key(&self, key: StubPrivateKey) {
        self.released.fetch_add(1, Ordering::SeqCst);
        drop(key);
    }
}

// ============================================================================
// RSA key pairs
// ============================================================================

/// A PEM-encoded RSA key pair.
#[cfg(feature = "rsa-provider")]
#[derive(Debug, Clone)]
pub struct RsaKeyPairPem {
    /// PKCS#1 private key PEM
    pub private_pem: String,
    /// SubjectPublicKeyInfo public key PEM
    pub public_pem: String,
}

/// Generate a fresh RSA key pair of `bits` bits.
#[cfg(feature = "rsa-provider")]
pub fn generate_rsa_key_pair_pem(bits: usize) -> Result<RsaKeyPairPem, ProviderError> {
    use rsa::pkcs1::EncodeRsaPrivateKey;
    use rsa::pkcs8::{EncodePublicKey, LineEnding};

    let private = rsa::RsaPrivateKey::new(&mut rand::thread_rng(), bits)
        .map_err(|e| ProviderError::Encoding(e.to_string()))?;
    let private_pem = private
        .to_pkcs1_pem(LineEnding::LF)
        .map_err(|e| ProviderError::Encoding(e.to_string()))?;
    let public_pem = rsa::RsaPublicKey::from(&private)
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| ProviderError::Encoding(e.to_string()))?;

    Ok(RsaKeyPairPem {
        private_pem: private_pem.to_string(),
        public_pem,
    })
}

/// A 1024-bit key pair generated once per process.
///
/// Key generation is slow in debug builds; tests share this pair.
#[cfg(feature = "rsa-provider")]
pub fn test_rsa_key_pair() -> &'static RsaKeyPairPem {
    static PAIR: std::sync::OnceLock<RsaKeyPairPem> = std::sync::OnceLock::new();
    PAIR.get_or_init(|| {
        generate_rsa_key_pair_pem(1024).unwrap_or_else(|e| panic!("RSA key generation: {e}"))
    })
}
