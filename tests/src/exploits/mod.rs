//! # Attack Simulations
//!
//! Each module plays an on-path attacker against the authentication
//! subsystem and asserts the attempt is refused.
//!
//! | Module | Attack |
//! |--------|--------|
//! | `replay` | Re-sent, delayed and future-dated Secure DHCPv6 messages |
//! | `forgery` | Tampered MACs and signatures, downgrades, truncation, impersonation |

pub mod replay;
