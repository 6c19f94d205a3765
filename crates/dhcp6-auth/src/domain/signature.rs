//! # Message Signatures
//!
//! Secure DHCPv6 signatures embedded in DHCPv6 messages.
//!
//! The signature field of the signature option spans the key's modulus
//! size. The signer hashes the whole message with the field zeroed, signs
//! the SHA-256 digest with RSASSA-PKCS1-v1_5 and writes the signature into
//! the field. The verifier hashes with the field read as zeros.

use sha2::{Digest, Sha256};
use tracing::{debug, error, warn};

use crate::domain::algorithms::{HashAlgorithm, SignatureAlgorithm};
use crate::domain::errors::AuthError;
use crate::domain::keys::{signature_size, AsymmetricKeyHandle};
use crate::domain::span::{absorb_with_zeroed_span, check_span};
use crate::ports::outbound::{AsymmetricCryptoProvider, Sha256Digest};

/// Sign `buffer` and write the signature at `sig_offset`.
///
/// The signature field must already be zero. Nothing is written unless the
/// whole operation succeeds.
///
/// # Errors
/// * `AuthError::UnsupportedAlgorithm` - not SHA-256 with RSASSA-PKCS1-v1_5
/// * `AuthError::AssumptionFailure` - the handle holds no private key for
///   `sig_algorithm`, or the provider returned a signature of the wrong size
/// * `AuthError::ShortBuffer` - the signature does not fit
/// * `AuthError::Provider` - the provider failed to sign
pub fn sign_message<P>(
    provider: &P,
    buffer: &mut [u8],
    sig_offset: usize,
    private_key: &AsymmetricKeyHandle<P::PrivateKey>,
    hash_algorithm: HashAlgorithm,
    sig_algorithm: SignatureAlgorithm,
) -> Result<(), AuthError>
where
    P: AsymmetricCryptoProvider,
{
    hash_algorithm.ensure_supported()?;
    sig_algorithm.ensure_supported()?;

    if private_key.algorithm() != sig_algorithm {
        error!(
            handle = %private_key.algorithm(),
            requested = %sig_algorithm,
            "Signing key algorithm mismatch"
        );
        return Err(AuthError::AssumptionFailure(format!(
            "key is tagged {} but {} was requested",
            private_key.algorithm(),
            sig_algorithm
        )));
    }
    let key = private_key.private_key().ok_or_else(|| {
        error!("Signing handle holds no private key");
        AuthError::AssumptionFailure("signing handle holds no private key".to_string())
    })?;

    let sig_len = signature_size(provider, sig_algorithm, private_key);
    check_span(buffer.len(), sig_offset, sig_len)?;

    let digest: Sha256Digest = Sha256::digest(&*buffer).into();
    let signature = provider.sign(key, &digest).map_err(|e| {
        error!(error = %e, "Provider failed to sign message");
        AuthError::from(e)
    })?;

    if signature.len() != sig_len {
        error!(
            expected = sig_len,
            actual = signature.len(),
            "Provider returned signature of unexpected length"
        );
        return Err(AuthError::AssumptionFailure(format!(
            "signature length {} differs from modulus size {}",
            signature.len(),
            sig_len
        )));
    }

    buffer[sig_offset..sig_offset + sig_len].copy_from_slice(&signature);
    debug!(offset = sig_offset, sig_len, "Signed message");
    Ok(())
}

/// Verify the `sig_len`-byte signature embedded at `sig_offset` against a
/// SubjectPublicKeyInfo DER `public_key`.
///
/// The buffer is never modified.
///
/// # Errors
/// * `AuthError::ShortBuffer` - the signature field does not fit
/// * `AuthError::UnsupportedAlgorithm` - not SHA-256 with RSASSA-PKCS1-v1_5
/// * `AuthError::SignatureInvalid` - the signature does not verify
/// * `AuthError::Provider` - the key or signature could not be processed
pub fn verify_message<P>(
    provider: &P,
    buffer: &[u8],
    sig_offset: usize,
    sig_len: usize,
    hash_algorithm: HashAlgorithm,
    sig_algorithm: SignatureAlgorithm,
    public_key: &[u8],
) -> Result<(), AuthError>
where
    P: AsymmetricCryptoProvider,
{
    check_span(buffer.len(), sig_offset, sig_len)?;
    hash_algorithm.ensure_supported()?;
    sig_algorithm.ensure_supported()?;

    let mut hasher = Sha256::new();
    absorb_with_zeroed_span(&mut hasher, buffer, sig_offset, sig_len);
    let digest: Sha256Digest = hasher.finalize().into();

    let signature = &buffer[sig_offset..sig_offset + sig_len];
    match provider.verify(public_key, &digest, signature) {
        Ok(true) => {
            debug!(offset = sig_offset, sig_len, "Message signature verified");
            Ok(())
        }
        Ok(false) => {
            warn!(offset = sig_offset, sig_len, "Message signature invalid");
            Err(AuthError::SignatureInvalid)
        }
        Err(e) => {
            error!(error = %e, "Provider failed to verify message");
            Err(e.into())
        }
    }
}
