//! One-time subsystem initialization.
//!
//! Runs the digest known-answer tests exactly once per process, however
//! many threads race to call [`init`].

use std::sync::OnceLock;

use dhcp6_digest::{hmac_md5, Md5};
use tracing::{debug, error};

use crate::domain::errors::AuthError;

static SELF_TEST: OnceLock<Result<(), String>> = OnceLock::new();

/// Initialize the authentication subsystem.
///
/// The first call runs the MD5 and HMAC-MD5 self-test; later calls return
/// the recorded outcome.
///
/// # Errors
/// * `AuthError::AssumptionFailure` - the digest engine produced a wrong answer
pub fn init() -> Result<(), AuthError> {
    SELF_TEST
        .get_or_init(run_self_test)
        .clone()
        .map_err(AuthError::AssumptionFailure)
}

fn run_self_test() -> Result<(), String> {
    // RFC 1321 A.5, "abc"
    const MD5_ABC: [u8; 16] = [
        0x90, 0x01, 0x50, 0x98, 0x3c, 0xd2, 0x4f, 0xb0, 0xd6, 0x96, 0x3f, 0x7d, 0x28, 0xe1, 0x7f,
        0x72,
    ];
    // RFC 2202 test case 2
    const HMAC_JEFE: [u8; 16] = [
        0x75, 0x0c, 0x78, 0x3e, 0x6a, 0xb0, 0xb5, 0x03, 0xea, 0xa8, 0x6e, 0x31, 0x0a, 0x5d, 0xb7,
        0x38,
    ];

    if Md5::digest(b"abc") != MD5_ABC {
        error!("MD5 self-test failed");
        return Err("MD5 self-test failed".to_string());
    }
    if hmac_md5(b"Jefe", b"what do ya want for nothing?") != HMAC_JEFE {
        error!("HMAC-MD5 self-test failed");
        return Err("HMAC-MD5 self-test failed".to_string());
    }

    debug!("Authentication subsystem initialized");
    Ok(())
}
