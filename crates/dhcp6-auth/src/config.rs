//! # Authentication Configuration
//!
//! TOML description of the keys a DHCPv6 node authenticates with.
//!
//! ```toml
//! [[keys]]
//! name = "kame-key"
//! realm = "kame.net"
//! key_id = 1
//! secret = "5d0c4f9e8a7b6c5d4e3f2a1b0c9d8e7f"   # hex
//! expire = 0                                  # epoch seconds, 0 = never
//!
//! [sedhcpv6]
//! key_directory = "/etc/dhcp6/keys"
//! private_key = "server.key.pem"
//! public_key = "server.pub.pem"
//! certificate = "server.crt.pem"
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::domain::entities::SymmetricKey;
use crate::domain::errors::AuthError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Delayed-authentication keys
    #[serde(default)]
    pub keys: Vec<KeyConfig>,

    /// Secure DHCPv6 key material
    #[serde(default)]
    pub sedhcpv6: Option<SeDhcpv6Config>,
}

/// One delayed-authentication key.
#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyConfig {
    /// Local name of the key
    pub name: String,
    /// DHCP realm
    pub realm: String,
    /// Key identifier within the realm
    pub key_id: u32,
    /// Hex-encoded secret
    pub secret: String,
    /// Expiration in epoch seconds, `0` for never
    #[serde(default)]
    pub expire: u64,
}

impl std::fmt::Debug for KeyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyConfig")
            .field("name", &self.name)
            .field("realm", &self.realm)
            .field("key_id", &self.key_id)
            .field("expire", &self.expire)
            .finish_non_exhaustive()
    }
}

/// PEM document names for the node's Secure DHCPv6 identity.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeDhcpv6Config {
    /// Directory the PEM names are relative to
    pub key_directory: Option<PathBuf>,
    /// Private key used to sign outgoing messages
    pub private_key: Option<String>,
    /// Public key advertised to peers
    pub public_key: Option<String>,
    /// Certificate advertised to peers
    pub certificate: Option<String>,
}

impl AuthConfig {
    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, AuthError> {
        let config: AuthConfig = toml::from_str(content).map_err(|e| {
            warn!(error = %e, "Failed to parse authentication config");
            AuthError::Config(e.to_string())
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AuthError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AuthError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "Loaded authentication config");
        Self::from_toml_str(&content)
    }

    /// Check key names are unique and every secret decodes to a non-empty key.
    pub fn validate(&self) -> Result<(), AuthError> {
        let mut names = HashSet::new();
        for key in &self.keys {
            if !names.insert(key.name.as_str()) {
                return Err(AuthError::Config(format!("duplicate key name '{}'", key.name)));
            }
            if decode_secret(key)?.is_empty() {
                return Err(AuthError::Config(format!("key '{}' has an empty secret", key.name)));
            }
        }
        Ok(())
    }

    /// Build the configured delayed-authentication keys.
    pub fn symmetric_keys(&self) -> Result<Vec<SymmetricKey>, AuthError> {
        self.keys
            .iter()
            .map(|key| {
                let secret = decode_secret(key)?;
                Ok(SymmetricKey::new(
                    key.name.clone(),
                    key.realm.as_bytes(),
                    key.key_id,
                    secret.to_vec(),
                    key.expire,
                ))
            })
            .collect()
    }
}

fn decode_secret(key: &KeyConfig) -> Result<Zeroizing<Vec<u8>>, AuthError> {
    hex::decode(key.secret.trim())
        .map(Zeroizing::new)
        .map_err(|e| AuthError::Config(format!("key '{}' secret is not hex: {}", key.name, e)))
}
