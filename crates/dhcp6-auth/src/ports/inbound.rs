//! # Inbound Ports (Driving Ports / API)
//!
//! The API DHCPv6 clients and servers call to authenticate messages.

use crate::domain::algorithms::{AuthAlgorithm, HashAlgorithm, SignatureAlgorithm, SigningParams};
use crate::domain::entities::{Duid, SymmetricKey, Timestamp};
use crate::domain::errors::AuthError;

/// Primary authentication API.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait AuthenticationApi: Send + Sync {
    // =========================================================================
    // Delayed Authentication
    // =========================================================================

    /// Look up a configured key by realm and key id.
    fn find_key(&self, realm: &[u8], key_id: u32) -> Option<SymmetricKey>;

    /// Compute and embed the MAC of an outgoing message.
    ///
    /// # Errors
    /// * `AuthError::KeyExpired` - the key is expired or the clock is unreadable
    /// * Any error of [`compute_mac`](crate::domain::mac::compute_mac)
    fn compute_mac(
        &self,
        buffer: &mut [u8],
        algorithm: AuthAlgorithm,
        mac_offset: usize,
        key: &SymmetricKey,
    ) -> Result<(), AuthError>;

    /// Verify the MAC of an incoming message.
    ///
    /// # Errors
    /// * `AuthError::KeyExpired` - the key is expired or the clock is unreadable
    /// * Any error of [`verify_mac`](crate::domain::mac::verify_mac)
    fn verify_mac(
        &self,
        buffer: &[u8],
        algorithm: AuthAlgorithm,
        mac_offset: usize,
        key: &SymmetricKey,
    ) -> Result<(), AuthError>;

    // =========================================================================
    // Secure DHCPv6
    // =========================================================================

    /// Length of signatures made with the local private key, `0` if none is loaded.
    fn signature_size(&self) -> usize;

    /// DER of the local public key, for the outgoing public key option.
    fn local_public_key(&self) -> Option<&[u8]>;

    /// DER of the local certificate, for the outgoing certificate option.
    fn local_certificate(&self) -> Option<&[u8]>;

    /// Sign an outgoing message with the local private key.
    fn sign_message(
        &self,
        buffer: &mut [u8],
        sig_offset: usize,
        hash_algorithm: HashAlgorithm,
        sig_algorithm: SignatureAlgorithm,
    ) -> Result<(), AuthError>;

    /// Sign an outgoing message described by `params`.
    ///
    /// # Errors
    /// * `AuthError::AssumptionFailure` - `params.protocol` is not Secure DHCPv6
    fn sign_message_with(
        &self,
        params: &SigningParams,
        buffer: &mut [u8],
        sig_offset: usize,
    ) -> Result<(), AuthError>;

    /// Verify the signature of an incoming message against `public_key` DER.
    fn verify_message(
        &self,
        buffer: &[u8],
        sig_offset: usize,
        sig_len: usize,
        hash_algorithm: HashAlgorithm,
        sig_algorithm: SignatureAlgorithm,
        public_key: &[u8],
    ) -> Result<(), AuthError>;

    /// Run the anti-replay check for a message from `duid` stamped `received`.
    ///
    /// An unknown peer is registered with `public_key` when its first message
    /// is accepted. Returns whether the message is fresh.
    ///
    /// # Errors
    /// * `AuthError::ClockUnavailable` - the local clock could not be read
    fn authenticate_peer(
        &self,
        duid: &Duid,
        public_key: &[u8],
        received: Timestamp,
    ) -> Result<bool, AuthError>;

    /// Forget a peer, e.g. after its key was revoked.
    fn forget_peer(&self, duid: &Duid) -> bool;
}
