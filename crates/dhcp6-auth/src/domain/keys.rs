//! # Key and Certificate Lifecycle
//!
//! Tagged handles for Secure DHCPv6 key material and the operations that
//! create, copy, size and release them. Parsing and private-key storage are
//! delegated to the [`AsymmetricCryptoProvider`].

use std::fmt;

use tracing::{debug, warn};

use crate::domain::algorithms::SignatureAlgorithm;
use crate::domain::errors::AuthError;
use crate::ports::outbound::{AsymmetricCryptoProvider, KeySource};

/// An owned DER blob.
///
/// Public keys (SubjectPublicKeyInfo) and certificates share this
/// representation.
#[derive(Clone, PartialEq, Eq)]
pub struct DerBlob(Vec<u8>);

impl DerBlob {
    /// Wrap DER bytes.
    pub fn new(der: Vec<u8>) -> Self {
        Self(der)
    }

    /// DER bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the blob holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for DerBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DerBlob({} bytes)", self.0.len())
    }
}

/// SubjectPublicKeyInfo DER.
pub type PublicKeyData = DerBlob;

/// X.509 certificate DER.
pub type CertificateData = DerBlob;

/// The material a handle can hold.
pub enum KeyMaterial<K> {
    /// Provider-native private key
    PrivateKey(K),
    /// Public key DER
    PublicKey(PublicKeyData),
    /// Certificate DER
    Certificate(CertificateData),
}

impl<K> KeyMaterial<K> {
    fn kind(&self) -> &'static str {
        match self {
            KeyMaterial::PrivateKey(_) => "private key",
            KeyMaterial::PublicKey(_) => "public key",
            KeyMaterial::Certificate(_) => "certificate",
        }
    }
}

impl<K> fmt::Debug for KeyMaterial<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMaterial::PrivateKey(_) => f.write_str("PrivateKey(..)"),
            KeyMaterial::PublicKey(blob) => f.debug_tuple("PublicKey").field(blob).finish(),
            KeyMaterial::Certificate(blob) => f.debug_tuple("Certificate").field(blob).finish(),
        }
    }
}

/// Algorithm-tagged key, certificate or empty slot.
pub struct AsymmetricKeyHandle<K> {
    algorithm: SignatureAlgorithm,
    material: Option<KeyMaterial<K>>,
}

impl<K> AsymmetricKeyHandle<K> {
    /// A handle holding nothing.
    pub fn empty(algorithm: SignatureAlgorithm) -> Self {
        Self {
            algorithm,
            material: None,
        }
    }

    /// A handle holding `material`.
    pub fn new(algorithm: SignatureAlgorithm, material: KeyMaterial<K>) -> Self {
        Self {
            algorithm,
            material: Some(material),
        }
    }

    /// Algorithm tag.
    pub fn algorithm(&self) -> SignatureAlgorithm {
        self.algorithm
    }

    /// Held material, if any.
    pub fn material(&self) -> Option<&KeyMaterial<K>> {
        self.material.as_ref()
    }

    /// True when the handle holds nothing.
    pub fn is_empty(&self) -> bool {
        self.material.is_none()
    }

    /// The private key, if the handle holds one.
    pub fn private_key(&self) -> Option<&K> {
        match &self.material {
            Some(KeyMaterial::PrivateKey(key)) => Some(key),
            _ => None,
        }
    }

    /// DER bytes of a public key or certificate handle.
    ///
    /// This is the form placed into outgoing options and stored in peer
    /// records. Private keys have no binary form.
    pub fn binary_form(&self) -> Option<&[u8]> {
        match &self.material {
            Some(KeyMaterial::PublicKey(blob)) | Some(KeyMaterial::Certificate(blob)) => {
                Some(blob.as_bytes())
            }
            _ => None,
        }
    }

    fn take_material(&mut self) -> Option<KeyMaterial<K>> {
        self.material.take()
    }
}

impl<K> fmt::Debug for AsymmetricKeyHandle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsymmetricKeyHandle")
            .field("algorithm", &self.algorithm)
            .field("material", &self.material)
            .finish()
    }
}

/// Load a PEM public key named `name` from `source`.
pub fn load_public_key<P, S>(
    provider: &P,
    source: &S,
    algorithm: SignatureAlgorithm,
    name: &str,
) -> Result<AsymmetricKeyHandle<P::PrivateKey>, AuthError>
where
    P: AsymmetricCryptoProvider,
    S: KeySource + ?Sized,
{
    algorithm.ensure_supported()?;
    let pem = source.read_pem(name)?;
    let der = provider.public_key_from_pem(&pem).map_err(|e| {
        warn!(name, error = %e, "Failed to decode public key");
        AuthError::from(e)
    })?;

    debug!(name, der_len = der.len(), "Loaded public key");
    Ok(AsymmetricKeyHandle::new(
        algorithm,
        KeyMaterial::PublicKey(DerBlob::new(der)),
    ))
}

/// Load a PEM private key named `name` from `source`.
pub fn load_private_key<P, S>(
    provider: &P,
    source: &S,
    algorithm: SignatureAlgorithm,
    name: &str,
) -> Result<AsymmetricKeyHandle<P::PrivateKey>, AuthError>
where
    P: AsymmetricCryptoProvider,
    S: KeySource + ?Sized,
{
    algorithm.ensure_supported()?;
    let pem = zeroize::Zeroizing::new(source.read_pem(name)?);
    let key = provider.private_key_from_pem(&pem).map_err(|e| {
        warn!(name, error = %e, "Failed to decode private key");
        AuthError::from(e)
    })?;

    debug!(name, modulus_size = provider.modulus_size(&key), "Loaded private key");
    Ok(AsymmetricKeyHandle::new(algorithm, KeyMaterial::PrivateKey(key)))
}

/// Load a PEM certificate named `name` from `source`.
///
/// Certificates carry RSA keys in Secure DHCPv6, so the handle is tagged
/// RSASSA-PKCS1-v1_5.
pub fn load_certificate<P, S>(
    provider: &P,
    source: &S,
    name: &str,
) -> Result<AsymmetricKeyHandle<P::PrivateKey>, AuthError>
where
    P: AsymmetricCryptoProvider,
    S: KeySource + ?Sized,
{
    let pem = source.read_pem(name)?;
    let der = provider.certificate_from_pem(&pem).map_err(|e| {
        warn!(name, error = %e, "Failed to decode certificate");
        AuthError::from(e)
    })?;

    debug!(name, der_len = der.len(), "Loaded certificate");
    Ok(AsymmetricKeyHandle::new(
        SignatureAlgorithm::RsassaPkcs1V15,
        KeyMaterial::Certificate(DerBlob::new(der)),
    ))
}

/// Duplicate a handle.
///
/// Public keys and certificates clone their bytes. Private keys are copied
/// through the provider's DER encoding, so the copy is an independent
/// provider object.
pub fn copy_key<P>(
    provider: &P,
    handle: &AsymmetricKeyHandle<P::PrivateKey>,
) -> Result<AsymmetricKeyHandle<P::PrivateKey>, AuthError>
where
    P: AsymmetricCryptoProvider,
{
    let material = match &handle.material {
        None => None,
        Some(KeyMaterial::PublicKey(blob)) => Some(KeyMaterial::PublicKey(blob.clone())),
        Some(KeyMaterial::Certificate(blob)) => Some(KeyMaterial::Certificate(blob.clone())),
        Some(KeyMaterial::PrivateKey(key)) => {
            let der = provider.private_key_to_der(key)?;
            Some(KeyMaterial::PrivateKey(provider.private_key_from_der(&der)?))
        }
    };

    Ok(AsymmetricKeyHandle {
        algorithm: handle.algorithm,
        material,
    })
}

/// Release whatever `handle` holds and leave it empty.
///
/// Private keys go back through the provider. Freeing an empty handle does
/// nothing.
pub fn free_key<P>(provider: &P, handle: &mut AsymmetricKeyHandle<P::PrivateKey>)
where
    P: AsymmetricCryptoProvider,
{
    match handle.take_material() {
        None => {}
        Some(KeyMaterial::PrivateKey(key)) => {
            provider.release_private_key(key);
            debug!(algorithm = %handle.algorithm, "Released private key");
        }
        Some(other) => {
            debug!(algorithm = %handle.algorithm, kind = other.kind(), "Released key material");
        }
    }
}

/// Signature length produced by `handle`, in bytes.
///
/// Zero when `algorithm` is unsupported or the handle holds no private key.
pub fn signature_size<P>(
    provider: &P,
    algorithm: SignatureAlgorithm,
    handle: &AsymmetricKeyHandle<P::PrivateKey>,
) -> usize
where
    P: AsymmetricCryptoProvider,
{
    if algorithm != SignatureAlgorithm::RsassaPkcs1V15 {
        return 0;
    }
    handle
        .private_key()
        .map(|key| provider.modulus_size(key))
        .unwrap_or(0)
}
