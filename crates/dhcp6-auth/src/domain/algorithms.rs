//! # Wire Identifiers
//!
//! Protocol and algorithm codes carried in the DHCPv6 authentication option
//! (RFC 8415 Section 21.11) and the Secure DHCPv6 signature option.
//!
//! Every enum keeps unrecognized codes as `Unknown(u8)` so a remote peer's
//! choice survives decoding and can be rejected explicitly.

use std::fmt;

use crate::domain::errors::AuthError;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// Code not recognized by this implementation
            Unknown(u8),
        }

        impl $name {
            /// Identifier space name used in error messages.
            pub const KIND: &'static str = $kind;

            /// Wire code.
            pub fn code(self) -> u8 {
                match self {
                    $( $name::$variant => $code, )+
                    $name::Unknown(code) => code,
                }
            }
        }

        impl From<u8> for $name {
            fn from(code: u8) -> Self {
                match code {
                    $( $code => $name::$variant, )+
                    other => $name::Unknown(other),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> u8 {
                value.code()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $( $name::$variant => f.write_str(stringify!($variant)), )+
                    $name::Unknown(code) => write!(f, "unknown({})", code),
                }
            }
        }
    };
}

wire_enum! {
    /// Authentication protocol field of the authentication option.
    AuthProtocol, "authentication protocol" {
        /// RFC 3118 delayed authentication
        DelayedAuthentication = 2,
        /// Reconfigure key authentication
        ReconfigureKey = 3,
        /// Public-key signatures with timestamp option
        SecureDhcpv6 = 4,
    }
}

wire_enum! {
    /// MAC algorithm of the delayed authentication protocol.
    AuthAlgorithm, "MAC algorithm" {
        /// HMAC-MD5
        HmacMd5 = 1,
    }
}

wire_enum! {
    /// Hash algorithm of the signature option.
    HashAlgorithm, "hash algorithm" {
        /// SHA-256
        Sha256 = 1,
    }
}

wire_enum! {
    /// Signature algorithm of the signature option.
    SignatureAlgorithm, "signature algorithm" {
        /// RSASSA-PKCS1-v1_5
        RsassaPkcs1V15 = 1,
    }
}

fn unsupported(kind: &'static str, code: u8) -> AuthError {
    tracing::warn!(kind, code, "Rejecting unsupported identifier");
    AuthError::UnsupportedAlgorithm { kind, code }
}

impl AuthAlgorithm {
    /// Fails unless this is HMAC-MD5.
    pub fn ensure_supported(self) -> Result<(), AuthError> {
        match self {
            AuthAlgorithm::HmacMd5 => Ok(()),
            other => Err(unsupported(Self::KIND, other.code())),
        }
    }
}

impl HashAlgorithm {
    /// Fails unless this is SHA-256.
    pub fn ensure_supported(self) -> Result<(), AuthError> {
        match self {
            HashAlgorithm::Sha256 => Ok(()),
            other => Err(unsupported(Self::KIND, other.code())),
        }
    }
}

impl SignatureAlgorithm {
    /// Fails unless this is RSASSA-PKCS1-v1_5.
    pub fn ensure_supported(self) -> Result<(), AuthError> {
        match self {
            SignatureAlgorithm::RsassaPkcs1V15 => Ok(()),
            other => Err(unsupported(Self::KIND, other.code())),
        }
    }
}

impl AuthProtocol {
    /// Fails unless this is the Secure DHCPv6 protocol.
    pub fn ensure_secure_dhcpv6(self) -> Result<(), AuthError> {
        match self {
            AuthProtocol::SecureDhcpv6 => Ok(()),
            other => {
                tracing::error!(protocol = %other, "Signing requested for a non-Secure DHCPv6 protocol");
                Err(AuthError::AssumptionFailure(format!(
                    "authentication protocol {} is not Secure DHCPv6",
                    other
                )))
            }
        }
    }
}

/// Identifiers of an outgoing Secure DHCPv6 signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigningParams {
    /// Authentication protocol the message uses
    pub protocol: AuthProtocol,
    /// Digest applied to the message
    pub hash_algorithm: HashAlgorithm,
    /// Signature scheme
    pub signature_algorithm: SignatureAlgorithm,
}

impl Default for SigningParams {
    fn default() -> Self {
        Self {
            protocol: AuthProtocol::SecureDhcpv6,
            hash_algorithm: HashAlgorithm::Sha256,
            signature_algorithm: SignatureAlgorithm::RsassaPkcs1V15,
        }
    }
}
