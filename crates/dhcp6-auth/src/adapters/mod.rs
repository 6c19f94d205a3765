//! # Adapters Module
//!
//! Infrastructure adapters implementing the outbound ports.
//!
//! - [`SystemTimeSource`]: wall clock
//! - [`FileKeySource`]: PEM documents on the filesystem
//! - [`RsaProvider`]: RustCrypto RSA backend (feature `rsa-provider`)

pub mod key_source;
#[cfg(feature = "rsa-provider")]
pub mod rsa_provider;
pub mod time;

pub use key_source::FileKeySource;
#[cfg(feature = "rsa-provider")]
pub use rsa_provider::RsaProvider;
pub use time::SystemTimeSource;
