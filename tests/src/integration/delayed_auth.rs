//! # Delayed Authentication Flow
//!
//! A client and a server sharing keys from the same TOML configuration
//! exchange HMAC-MD5 authenticated SOLICIT/ADVERTISE messages.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use dhcp6_auth::test_utils::{FixedTimeSource, MemoryKeySource, StubCryptoProvider};
    use dhcp6_auth::{AuthAlgorithm, AuthConfig, AuthError, AuthService, AuthenticationApi, Duid};

    use crate::fixtures::{delayed_auth_message, MSG_ADVERTISE, MSG_SOLICIT};
    use crate::integration::init_test_logging;

    const NOW_SECS: u64 = 1_700_000_000;

    const CONFIG: &str = r#"
        [[keys]]
        name = "kame-current"
        realm = "kame.net"
        key_id = 1
        secret = "5d0c4f9e8a7b6c5d4e3f2a1b0c9d8e7f"

        [[keys]]
        name = "kame-retired"
        realm = "kame.net"
        key_id = 2
        secret = "00112233445566778899aabbccddeeff"
        expire = 1700000100
    "#;

    type Service = AuthService<StubCryptoProvider, MemoryKeySource, Arc<FixedTimeSource>>;

    fn node(clock: &Arc<FixedTimeSource>) -> Service {
        let config = AuthConfig::from_toml_str(CONFIG).unwrap();
        AuthService::from_config(
            &config,
            StubCryptoProvider::new(),
            MemoryKeySource::new(),
            Arc::clone(clock),
        )
        .unwrap()
    }

    fn client_duid() -> Duid {
        Duid::new(vec![0x00, 0x01, 0x00, 0x01, 0x2a, 0x3b, 0x4c, 0x5d, 0x00, 0x0c])
    }

    #[test]
    fn test_solicit_advertise_exchange() {
        init_test_logging();
        let clock = Arc::new(FixedTimeSource::from_secs(NOW_SECS));
        let client = node(&clock);
        let server = node(&clock);

        // Client authenticates its SOLICIT with key 1.
        let key = client.find_key(b"kame.net", 1).unwrap();
        let mut solicit = delayed_auth_message(MSG_SOLICIT, 0x1234, &client_duid(), b"kame.net", 1, 1);
        client
            .compute_mac(&mut solicit.bytes, AuthAlgorithm::HmacMd5, solicit.auth_offset, &key)
            .unwrap();
        assert!(solicit.auth_field().iter().any(|&b| b != 0));

        // Server finds the same key by realm and id and verifies.
        let server_key = server.find_key(b"kame.net", 1).unwrap();
        let received = solicit.bytes.clone();
        server
            .verify_mac(&received, AuthAlgorithm::HmacMd5, solicit.auth_offset, &server_key)
            .unwrap();
        assert_eq!(received, solicit.bytes);

        // Server answers with ADVERTISE, client verifies.
        let mut advertise =
            delayed_auth_message(MSG_ADVERTISE, 0x1234, &client_duid(), b"kame.net", 1, 2);
        server
            .compute_mac(&mut advertise.bytes, AuthAlgorithm::HmacMd5, advertise.auth_offset, &server_key)
            .unwrap();
        assert!(client
            .verify_mac(&advertise.bytes, AuthAlgorithm::HmacMd5, advertise.auth_offset, &key)
            .is_ok());
    }

    #[test]
    fn test_mac_matches_reference_hmac() {
        let clock = Arc::new(FixedTimeSource::from_secs(NOW_SECS));
        let client = node(&clock);
        let key = client.find_key(b"kame.net", 1).unwrap();

        let mut msg = delayed_auth_message(MSG_SOLICIT, 7, &client_duid(), b"kame.net", 1, 1);
        let expected = dhcp6_digest::hmac_md5(key.secret(), &msg.bytes);
        client
            .compute_mac(&mut msg.bytes, AuthAlgorithm::HmacMd5, msg.auth_offset, &key)
            .unwrap();

        assert_eq!(msg.auth_field(), &expected);
    }

    #[test]
    fn test_key_retires_at_expiration() {
        let clock = Arc::new(FixedTimeSource::from_secs(NOW_SECS));
        let client = node(&clock);
        let server = node(&clock);
        let key = client.find_key(b"kame.net", 2).unwrap();

        let mut msg = delayed_auth_message(MSG_SOLICIT, 9, &client_duid(), b"kame.net", 2, 1);
        client
            .compute_mac(&mut msg.bytes, AuthAlgorithm::HmacMd5, msg.auth_offset, &key)
            .unwrap();

        // Still valid at the expiration second.
        clock.advance_secs(100);
        assert!(server
            .verify_mac(&msg.bytes, AuthAlgorithm::HmacMd5, msg.auth_offset, &key)
            .is_ok());

        clock.advance_secs(1);
        assert_eq!(
            server.verify_mac(&msg.bytes, AuthAlgorithm::HmacMd5, msg.auth_offset, &key),
            Err(AuthError::KeyExpired {
                name: "kame-retired".to_string()
            })
        );
    }

    #[test]
    fn test_keys_with_different_ids_do_not_verify() {
        let clock = Arc::new(FixedTimeSource::from_secs(NOW_SECS));
        let client = node(&clock);
        let key_1 = client.find_key(b"kame.net", 1).unwrap();
        let key_2 = client.find_key(b"kame.net", 2).unwrap();

        let mut msg = delayed_auth_message(MSG_SOLICIT, 3, &client_duid(), b"kame.net", 1, 1);
        client
            .compute_mac(&mut msg.bytes, AuthAlgorithm::HmacMd5, msg.auth_offset, &key_1)
            .unwrap();

        assert_eq!(
            client.verify_mac(&msg.bytes, AuthAlgorithm::HmacMd5, msg.auth_offset, &key_2),
            Err(AuthError::Mismatch)
        );
    }
}
