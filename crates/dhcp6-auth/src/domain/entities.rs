//! # Domain Entities
//!
//! Timestamps, peer identifiers and symmetric keys.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::algorithms::AuthAlgorithm;

/// Microseconds per second.
pub const MICROS_PER_SEC: u64 = 1_000_000;

/// A point in time as microseconds since the Unix epoch.
///
/// Secure DHCPv6 timestamps are exchanged as seconds plus a sub-second
/// fraction; the anti-replay check works on the combined microsecond value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create from microseconds since the epoch.
    pub const fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    /// Create from whole seconds and a microsecond remainder.
    pub const fn from_secs_micros(secs: u64, micros: u32) -> Self {
        Self(
            secs.saturating_mul(MICROS_PER_SEC)
                .saturating_add(micros as u64),
        )
    }

    /// Microseconds since the epoch.
    pub const fn as_micros(&self) -> u64 {
        self.0
    }

    /// Whole seconds since the epoch.
    pub const fn as_secs(&self) -> u64 {
        self.0 / MICROS_PER_SEC
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:06}", self.as_secs(), self.0 % MICROS_PER_SEC)
    }
}

/// DHCP Unique Identifier of a client or server.
///
/// Compared bytewise; displayed as colon-separated hex the way DHCPv6 tools
/// print DUIDs.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Duid(Vec<u8>);

impl Duid {
    /// Wrap raw DUID bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Raw DUID bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<&[u8]> for Duid {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl fmt::Display for Duid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Duid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Duid({})", self)
    }
}

/// A delayed-authentication shared secret.
///
/// Identified on the wire by realm and key id; `name` is the local
/// configuration handle. The secret is wiped when the key is dropped.
#[derive(Clone)]
pub struct SymmetricKey {
    name: String,
    realm: Vec<u8>,
    key_id: u32,
    algorithm: AuthAlgorithm,
    secret: Zeroizing<Vec<u8>>,
    /// Expiration in epoch seconds, `0` for never.
    expire: u64,
}

impl SymmetricKey {
    /// Create an HMAC-MD5 key.
    pub fn new(
        name: impl Into<String>,
        realm: impl Into<Vec<u8>>,
        key_id: u32,
        secret: impl Into<Vec<u8>>,
        expire: u64,
    ) -> Self {
        Self {
            name: name.into(),
            realm: realm.into(),
            key_id,
            algorithm: AuthAlgorithm::HmacMd5,
            secret: Zeroizing::new(secret.into()),
            expire,
        }
    }

    /// Same key tagged with a different MAC algorithm.
    pub fn with_algorithm(mut self, algorithm: AuthAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Configuration name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// DHCP realm the key belongs to.
    pub fn realm(&self) -> &[u8] {
        &self.realm
    }

    /// Key identifier within the realm.
    pub fn key_id(&self) -> u32 {
        self.key_id
    }

    /// MAC algorithm the key is meant for.
    pub fn algorithm(&self) -> AuthAlgorithm {
        self.algorithm
    }

    /// Secret bytes.
    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    /// Expiration in epoch seconds, `0` meaning never.
    pub fn expire(&self) -> u64 {
        self.expire
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("name", &self.name)
            .field("realm", &String::from_utf8_lossy(&self.realm))
            .field("key_id", &self.key_id)
            .field("algorithm", &self.algorithm)
            .field("expire", &self.expire)
            .finish_non_exhaustive()
    }
}
