//! # Authentication Service
//!
//! Application service layer that implements the `AuthenticationApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`AuthenticationApi`)
//! - Holds the node's key material, loaded through `KeySource` and the
//!   `AsymmetricCryptoProvider`
//! - Reads the `TimeSource` for key expiration and anti-replay checks
//! - Delegates cryptographic operations to the domain layer

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::config::AuthConfig;
use crate::domain::algorithms::{AuthAlgorithm, HashAlgorithm, SignatureAlgorithm, SigningParams};
use crate::domain::entities::{Duid, SymmetricKey, Timestamp};
use crate::domain::errors::AuthError;
use crate::domain::freshness::is_key_valid;
use crate::domain::keys::{
    free_key, load_certificate, load_private_key, load_public_key, signature_size,
    AsymmetricKeyHandle,
};
use crate::domain::peer::{AuthPeer, PeerRegistry};
use crate::domain::{mac, signature};
use crate::ports::inbound::AuthenticationApi;
use crate::ports::outbound::{AsymmetricCryptoProvider, KeySource, TimeSource};

const SIGNING_ALGORITHM: SignatureAlgorithm = SignatureAlgorithm::RsassaPkcs1V15;

/// DHCPv6 Authentication Service.
///
/// Owns the delayed-authentication keys, the node's Secure DHCPv6 key
/// material and the registry of known peers. The registry sits behind a
/// lock so one service instance can serve several receive threads.
pub struct AuthService<P, S, T>
where
    P: AsymmetricCryptoProvider,
    S: KeySource,
    T: TimeSource,
{
    provider: P,
    source: S,
    clock: T,
    keys: Vec<SymmetricKey>,
    private_key: AsymmetricKeyHandle<P::PrivateKey>,
    public_key: AsymmetricKeyHandle<P::PrivateKey>,
    certificate: AsymmetricKeyHandle<P::PrivateKey>,
    peers: RwLock<PeerRegistry>,
}

impl<P, S, T> AuthService<P, S, T>
where
    P: AsymmetricCryptoProvider,
    S: KeySource,
    T: TimeSource,
{
    /// Create a service with no keys loaded.
    pub fn new(provider: P, source: S, clock: T) -> Self {
        Self {
            provider,
            source,
            clock,
            keys: Vec::new(),
            private_key: AsymmetricKeyHandle::empty(SIGNING_ALGORITHM),
            public_key: AsymmetricKeyHandle::empty(SIGNING_ALGORITHM),
            certificate: AsymmetricKeyHandle::empty(SIGNING_ALGORITHM),
            peers: RwLock::new(PeerRegistry::new()),
        }
    }

    /// Create a service and load everything `config` names.
    ///
    /// # Errors
    /// * `AuthError::Config` - invalid key entries
    /// * `AuthError::Io` / `AuthError::Provider` - unreadable key material
    pub fn from_config(
        config: &AuthConfig,
        provider: P,
        source: S,
        clock: T,
    ) -> Result<Self, AuthError> {
        config.validate()?;
        let mut service = Self::new(provider, source, clock);
        service.keys = config.symmetric_keys()?;

        if let Some(sedhcpv6) = &config.sedhcpv6 {
            if let Some(name) = &sedhcpv6.private_key {
                service.load_private_key(name)?;
            }
            if let Some(name) = &sedhcpv6.public_key {
                service.load_public_key(name)?;
            }
            if let Some(name) = &sedhcpv6.certificate {
                service.load_certificate(name)?;
            }
        }

        info!(
            keys = service.keys.len(),
            signing = !service.private_key.is_empty(),
            "Authentication service configured"
        );
        Ok(service)
    }

    /// Add a delayed-authentication key.
    pub fn add_key(&mut self, key: SymmetricKey) {
        debug!(key = key.name(), "Added symmetric key");
        self.keys.push(key);
    }

    /// Load the signing key, releasing any previous one.
    pub fn load_private_key(&mut self, name: &str) -> Result<(), AuthError> {
        let handle = load_private_key(&self.provider, &self.source, SIGNING_ALGORITHM, name)?;
        free_key(&self.provider, &mut self.private_key);
        self.private_key = handle;
        Ok(())
    }

    /// Load the advertised public key.
    pub fn load_public_key(&mut self, name: &str) -> Result<(), AuthError> {
        let handle = load_public_key(&self.provider, &self.source, SIGNING_ALGORITHM, name)?;
        free_key(&self.provider, &mut self.public_key);
        self.public_key = handle;
        Ok(())
    }

    /// Load the advertised certificate.
    pub fn load_certificate(&mut self, name: &str) -> Result<(), AuthError> {
        let handle = load_certificate(&self.provider, &self.source, name)?;
        free_key(&self.provider, &mut self.certificate);
        self.certificate = handle;
        Ok(())
    }

    /// Number of known peers.
    pub fn peer_count(&self) -> usize {
        self.peers.read().len()
    }

    /// Snapshot of a known peer.
    pub fn peer(&self, duid: &Duid) -> Option<AuthPeer> {
        self.peers.read().find(duid).cloned()
    }

    fn ensure_fresh(&self, key: &SymmetricKey) -> Result<(), AuthError> {
        if is_key_valid(key, &self.clock) {
            Ok(())
        } else {
            Err(AuthError::KeyExpired {
                name: key.name().to_string(),
            })
        }
    }
}

impl<P, S, T> Drop for AuthService<P, S, T>
where
    P: AsymmetricCryptoProvider,
    S: KeySource,
    T: TimeSource,
{
    fn drop(&mut self) {
        free_key(&self.provider, &mut self.private_key);
    }
}

impl<P, S, T> AuthenticationApi for AuthService<P, S, T>
where
    P: AsymmetricCryptoProvider,
    P::PrivateKey: Send + Sync,
    S: KeySource,
    T: TimeSource,
{
    fn find_key(&self, realm: &[u8], key_id: u32) -> Option<SymmetricKey> {
        self.keys
            .iter()
            .find(|key| key.realm() == realm && key.key_id() == key_id)
            .cloned()
    }

    fn compute_mac(
        &self,
        buffer: &mut [u8],
        algorithm: AuthAlgorithm,
        mac_offset: usize,
        key: &SymmetricKey,
    ) -> Result<(), AuthError> {
        self.ensure_fresh(key)?;
        mac::compute_mac(buffer, algorithm, mac_offset, key)
    }

    fn verify_mac(
        &self,
        buffer: &[u8],
        algorithm: AuthAlgorithm,
        mac_offset: usize,
        key: &SymmetricKey,
    ) -> Result<(), AuthError> {
        self.ensure_fresh(key)?;
        mac::verify_mac(buffer, algorithm, mac_offset, key)
    }

    fn signature_size(&self) -> usize {
        signature_size(&self.provider, SIGNING_ALGORITHM, &self.private_key)
    }

    fn local_public_key(&self) -> Option<&[u8]> {
        self.public_key.binary_form()
    }

    fn local_certificate(&self) -> Option<&[u8]> {
        self.certificate.binary_form()
    }

    fn sign_message(
        &self,
        buffer: &mut [u8],
        sig_offset: usize,
        hash_algorithm: HashAlgorithm,
        sig_algorithm: SignatureAlgorithm,
    ) -> Result<(), AuthError> {
        signature::sign_message(
            &self.provider,
            buffer,
            sig_offset,
            &self.private_key,
            hash_algorithm,
            sig_algorithm,
        )
    }

    fn sign_message_with(
        &self,
        params: &SigningParams,
        buffer: &mut [u8],
        sig_offset: usize,
    ) -> Result<(), AuthError> {
        params.protocol.ensure_secure_dhcpv6()?;
        self.sign_message(
            buffer,
            sig_offset,
            params.hash_algorithm,
            params.signature_algorithm,
        )
    }

    fn verify_message(
        &self,
        buffer: &[u8],
        sig_offset: usize,
        sig_len: usize,
        hash_algorithm: HashAlgorithm,
        sig_algorithm: SignatureAlgorithm,
        public_key: &[u8],
    ) -> Result<(), AuthError> {
        signature::verify_message(
            &self.provider,
            buffer,
            sig_offset,
            sig_len,
            hash_algorithm,
            sig_algorithm,
            public_key,
        )
    }

    fn authenticate_peer(
        &self,
        duid: &Duid,
        public_key: &[u8],
        received: Timestamp,
    ) -> Result<bool, AuthError> {
        let now = self.clock.now()?;
        let mut peers = self.peers.write();

        if let Some(peer) = peers.find_mut(duid) {
            return Ok(peer.check_timestamp(received, now));
        }

        let mut peer = AuthPeer::new(duid.clone(), public_key);
        if !peer.check_timestamp(received, now) {
            warn!(duid = %duid, "Rejected first message from unknown peer");
            return Ok(false);
        }
        peers.insert(peer);
        Ok(true)
    }

    fn forget_peer(&self, duid: &Duid) -> bool {
        self.peers.write().remove(duid).is_some()
    }
}
