//! # Replay Attacks
//!
//! Timestamp anti-replay for Secure DHCPv6 peers. The stub provider stands
//! in for RSA since only the clock logic is under attack here.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use dhcp6_auth::test_utils::{
        FixedTimeSource, MemoryKeySource, StubCryptoProvider, StubPrivateKey,
    };
    use dhcp6_auth::{AuthService, AuthenticationApi, Duid, Timestamp, TS_DELTA};

    type Service = AuthService<StubCryptoProvider, MemoryKeySource, Arc<FixedTimeSource>>;

    const T0: u64 = 1_700_000_000;

    fn server(clock: &Arc<FixedTimeSource>) -> Service {
        AuthService::new(StubCryptoProvider::new(), MemoryKeySource::new(), Arc::clone(clock))
    }

    fn victim() -> (Duid, Vec<u8>) {
        (
            Duid::new(vec![0x00, 0x01, 0x00, 0x01, 0xde, 0xad, 0xbe, 0xef]),
            StubPrivateKey::new(b"victim").public_der(),
        )
    }

    fn at(secs: u64, micros: u32) -> Timestamp {
        Timestamp::from_secs_micros(secs, micros)
    }

    #[test]
    fn test_replayed_older_message_rejected() {
        let clock = Arc::new(FixedTimeSource::from_secs(T0));
        let server = server(&clock);
        let (duid, key) = victim();

        assert!(server.authenticate_peer(&duid, &key, at(T0, 0)).unwrap());
        clock.advance_secs(1);
        assert!(server.authenticate_peer(&duid, &key, at(T0 + 1, 0)).unwrap());

        // Attacker re-sends the first message.
        clock.advance_secs(1);
        assert!(!server.authenticate_peer(&duid, &key, at(T0, 0)).unwrap());

        let state = server.peer(&duid).unwrap().replay_state().unwrap();
        assert_eq!(state.last_peer, at(T0 + 1, 0));
    }

    #[test]
    fn test_future_dated_message_rejected_without_poisoning_state() {
        let clock = Arc::new(FixedTimeSource::from_secs(T0));
        let server = server(&clock);
        let (duid, key) = victim();
        assert!(server.authenticate_peer(&duid, &key, at(T0, 0)).unwrap());

        // A message stamped ten seconds ahead after one second of local time.
        clock.advance_secs(1);
        assert!(!server.authenticate_peer(&duid, &key, at(T0 + 10, 0)).unwrap());

        // The genuine next message is still accepted.
        assert!(server.authenticate_peer(&duid, &key, at(T0 + 1, 0)).unwrap());
    }

    #[test]
    fn test_precomputed_future_messages_cannot_be_banked() {
        let clock = Arc::new(FixedTimeSource::from_secs(T0));
        let server = server(&clock);
        let (duid, key) = victim();
        assert!(server.authenticate_peer(&duid, &key, at(T0, 0)).unwrap());

        // Peer clock racing 3 s ahead of 1 s of local progress.
        clock.advance_secs(1);
        assert!(!server.authenticate_peer(&duid, &key, at(T0 + 3, 100_000)).unwrap());
        // Within the fuzz on both sides it still passes.
        assert!(server.authenticate_peer(&duid, &key, at(T0 + 2, 900_000)).unwrap());
    }

    #[test]
    fn test_stale_capture_rejected_on_first_contact() {
        let clock = Arc::new(FixedTimeSource::from_secs(T0));
        let server = server(&clock);
        let (duid, key) = victim();

        // Captured at T0, delivered to a server that has never seen the peer.
        clock.advance_micros(TS_DELTA);
        assert!(!server.authenticate_peer(&duid, &key, at(T0, 0)).unwrap());
        assert_eq!(server.peer_count(), 0);
        assert!(server.peer(&duid).is_none());
    }

    #[test]
    fn test_capture_just_inside_first_contact_window_accepted() {
        let clock = Arc::new(FixedTimeSource::from_secs(T0));
        let server = server(&clock);
        let (duid, key) = victim();

        clock.advance_micros(TS_DELTA - 1);
        assert!(server.authenticate_peer(&duid, &key, at(T0, 0)).unwrap());
    }

    #[test]
    fn test_future_dated_first_contact_rejected() {
        let clock = Arc::new(FixedTimeSource::from_secs(T0));
        let server = server(&clock);
        let (duid, key) = victim();

        assert!(!server.authenticate_peer(&duid, &key, at(T0 + 5, 0)).unwrap());
        assert!(!server.authenticate_peer(&duid, &key, at(u64::from(u32::MAX), 0)).unwrap());
        assert_eq!(server.peer_count(), 0);
    }

    #[test]
    fn test_replays_are_tracked_per_peer() {
        let clock = Arc::new(FixedTimeSource::from_secs(T0));
        let server = server(&clock);
        let (duid, key) = victim();
        let other = Duid::new(vec![0x00, 0x01, 0x00, 0x01, 0xca, 0xfe]);

        assert!(server.authenticate_peer(&duid, &key, at(T0, 500_000)).unwrap());
        // Another peer with a slightly older clock is unaffected.
        assert!(server.authenticate_peer(&other, &key, at(T0, 0)).unwrap());
        assert_eq!(server.peer_count(), 2);

        assert!(!server.authenticate_peer(&duid, &key, at(T0, 0)).unwrap());
    }

    #[test]
    fn test_concurrent_checks_never_move_peer_clock_backwards() {
        let clock = Arc::new(FixedTimeSource::from_secs(T0));
        let server = Arc::new(server(&clock));
        let (duid, key) = victim();
        assert!(server.authenticate_peer(&duid, &key, at(T0, 0)).unwrap());
        clock.advance_secs(1);

        let handles: Vec<_> = (0..8u32)
            .map(|i| {
                let server = Arc::clone(&server);
                let duid = duid.clone();
                let key = key.clone();
                std::thread::spawn(move || {
                    server
                        .authenticate_peer(&duid, &key, at(T0, 100_000 * (8 - i)))
                        .unwrap()
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // Whatever the interleaving, the peer clock never went backwards.
        let state = server.peer(&duid).unwrap().replay_state().unwrap();
        assert!(state.last_peer >= at(T0, 100_000));
        assert!(!server.authenticate_peer(&duid, &key, at(T0, 0)).unwrap());
    }
}
