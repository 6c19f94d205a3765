//! # Peer Registry and Anti-Replay
//!
//! Secure DHCPv6 peers are remembered by DUID together with the public key
//! they presented and the timestamps of the last accepted message.
//!
//! ## Timestamp Check
//!
//! A message carries the sender's clock. On first contact it must be within
//! [`TS_DELTA`] of the local clock. Afterwards the peer clock may not go
//! backwards, and the local clock must have advanced at least as much as
//! the peer clock did, less [`TS_DRIFT_PERCENT`] drift and [`TS_FUZZ`] on
//! either side:
//!
//! ```text
//! now + FUZZ > last_local + (received - last_peer) * (100 - DRIFT) / 100 - FUZZ
//! ```

use tracing::{debug, warn};

use crate::domain::entities::{Duid, Timestamp};

/// Maximum clock offset accepted on first contact, in microseconds.
pub const TS_DELTA: u64 = 5_000_000;

/// Slack applied to both sides of the drift bound, in microseconds.
pub const TS_FUZZ: u64 = 1_000_000;

/// Tolerated relative clock drift, in percent.
pub const TS_DRIFT_PERCENT: u64 = 1;

/// Timestamps of the last accepted message from a peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayState {
    /// Local clock when the message was accepted
    pub last_local: Timestamp,
    /// Peer clock carried by the message
    pub last_peer: Timestamp,
}

/// A remote Secure DHCPv6 peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthPeer {
    duid: Duid,
    public_key: Vec<u8>,
    replay: Option<ReplayState>,
}

impl AuthPeer {
    /// Create a peer with no accepted message yet.
    pub fn new(duid: Duid, public_key: &[u8]) -> Self {
        Self {
            duid,
            public_key: public_key.to_vec(),
            replay: None,
        }
    }

    /// The peer's DUID.
    pub fn duid(&self) -> &Duid {
        &self.duid
    }

    /// Public key DER the peer presented.
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// Timestamps of the last accepted message, if any.
    pub fn replay_state(&self) -> Option<ReplayState> {
        self.replay
    }

    /// Run the timestamp check for a message stamped `received`.
    ///
    /// Returns `true` and records the message when accepted. A rejected
    /// message leaves the peer unchanged.
    pub fn check_timestamp(&mut self, received: Timestamp, local_now: Timestamp) -> bool {
        let now = local_now.as_micros();
        let rcv = received.as_micros();

        let Some(state) = self.replay else {
            if now.abs_diff(rcv) >= TS_DELTA {
                warn!(
                    duid = %self.duid,
                    received = %received,
                    now = %local_now,
                    "First-contact timestamp outside allowed offset"
                );
                return false;
            }
            self.replay = Some(ReplayState {
                last_local: local_now,
                last_peer: received,
            });
            debug!(duid = %self.duid, received = %received, "Accepted first-contact timestamp");
            return true;
        };

        let last_local = state.last_local.as_micros();
        let last_peer = state.last_peer.as_micros();

        if rcv < last_peer {
            warn!(
                duid = %self.duid,
                received = %received,
                last_peer = %state.last_peer,
                "Peer timestamp went backwards"
            );
            return false;
        }

        let elapsed = u128::from(rcv - last_peer);
        let scaled = elapsed * u128::from(100 - TS_DRIFT_PERCENT) / 100;
        let bound = (u128::from(last_local) + scaled).saturating_sub(u128::from(TS_FUZZ));

        if u128::from(now) + u128::from(TS_FUZZ) <= bound {
            warn!(
                duid = %self.duid,
                received = %received,
                now = %local_now,
                "Peer timestamp ahead of local clock progress"
            );
            return false;
        }

        self.replay = Some(ReplayState {
            last_local: if now > last_local {
                local_now
            } else {
                state.last_local
            },
            last_peer: received,
        });
        debug!(duid = %self.duid, received = %received, "Accepted peer timestamp");
        true
    }
}

/// Known peers in insertion order.
///
/// Lookups scan linearly and return the first peer whose DUID matches.
/// Inserting a DUID twice is allowed; the older entry keeps answering.
#[derive(Debug, Clone, Default)]
pub struct PeerRegistry {
    peers: Vec<AuthPeer>,
}

impl PeerRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a peer.
    pub fn insert(&mut self, peer: AuthPeer) {
        debug!(duid = %peer.duid, "Registered auth peer");
        self.peers.push(peer);
    }

    /// First peer with this DUID.
    pub fn find(&self, duid: &Duid) -> Option<&AuthPeer> {
        self.peers.iter().find(|peer| &peer.duid == duid)
    }

    /// First peer with this DUID, mutably.
    pub fn find_mut(&mut self, duid: &Duid) -> Option<&mut AuthPeer> {
        self.peers.iter_mut().find(|peer| &peer.duid == duid)
    }

    /// Remove and return the first peer with this DUID.
    pub fn remove(&mut self, duid: &Duid) -> Option<AuthPeer> {
        let index = self.peers.iter().position(|peer| &peer.duid == duid)?;
        debug!(duid = %duid, "Removed auth peer");
        Some(self.peers.remove(index))
    }

    /// Number of peers.
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    /// True when no peer is known.
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    /// Peers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &AuthPeer> {
        self.peers.iter()
    }
}
