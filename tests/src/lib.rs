//! # DHCPv6 Authentication Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # DHCPv6 message builders
//! ├── integration/      # Client/server exchanges across crates
//! └── exploits/         # Replay and forgery attempts
//! tests/benches/
//! └── auth_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p dhcp6-auth-tests
//!
//! # By category
//! cargo test -p dhcp6-auth-tests integration::
//! cargo test -p dhcp6-auth-tests exploits::
//!
//! # Benchmarks
//! cargo bench -p dhcp6-auth-tests
//! ```

pub mod exploits;
pub mod fixtures;
