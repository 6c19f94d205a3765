//! # Message Fixtures
//!
//! Builders for DHCPv6 messages carrying an authentication option or a
//! signature option, laid out the way a client or server would put them on
//! the wire. Only the parts the authentication code touches are realistic.

use dhcp6_auth::{AuthAlgorithm, AuthProtocol, Duid, HashAlgorithm, SignatureAlgorithm, Timestamp};

/// Client Identifier option.
pub const OPTION_CLIENTID: u16 = 1;
/// Authentication option.
pub const OPTION_AUTH: u16 = 11;
/// Timestamp option code used by the test layout.
pub const OPTION_TIMESTAMP: u16 = 0xfff0;
/// Signature option code used by the test layout.
pub const OPTION_SIGNATURE: u16 = 0xfff1;

/// SOLICIT message type.
pub const MSG_SOLICIT: u8 = 1;
/// ADVERTISE message type.
pub const MSG_ADVERTISE: u8 = 2;
/// REPLY message type.
pub const MSG_REPLY: u8 = 7;

const MAC_LENGTH: usize = 16;

/// A message with an embedded authenticator span.
#[derive(Debug, Clone)]
pub struct TestMessage {
    /// Wire bytes
    pub bytes: Vec<u8>,
    /// Offset of the MAC or signature field
    pub auth_offset: usize,
    /// Length of the MAC or signature field
    pub auth_len: usize,
    /// Offset of the timestamp payload, for signed messages
    pub timestamp_offset: Option<usize>,
}

impl TestMessage {
    /// The authenticator field.
    pub fn auth_field(&self) -> &[u8] {
        &self.bytes[self.auth_offset..self.auth_offset + self.auth_len]
    }

    /// Timestamp carried by a signed message.
    pub fn timestamp(&self) -> Option<Timestamp> {
        let offset = self.timestamp_offset?;
        let secs = u32::from_be_bytes(self.bytes[offset..offset + 4].try_into().ok()?);
        let micros = u32::from_be_bytes(self.bytes[offset + 4..offset + 8].try_into().ok()?);
        Some(Timestamp::from_secs_micros(u64::from(secs), micros))
    }
}

fn push_option(bytes: &mut Vec<u8>, code: u16, payload: &[u8]) -> usize {
    bytes.extend_from_slice(&code.to_be_bytes());
    bytes.extend_from_slice(&(payload.len() as u16).to_be_bytes());
    let start = bytes.len();
    bytes.extend_from_slice(payload);
    start
}

fn header(msg_type: u8, transaction_id: u32, duid: &Duid) -> Vec<u8> {
    let mut bytes = vec![msg_type];
    bytes.extend_from_slice(&transaction_id.to_be_bytes()[1..]);
    push_option(&mut bytes, OPTION_CLIENTID, duid.as_bytes());
    bytes
}

/// Message with a delayed-authentication option whose MAC field is zero.
pub fn delayed_auth_message(
    msg_type: u8,
    transaction_id: u32,
    duid: &Duid,
    realm: &[u8],
    key_id: u32,
    replay_counter: u64,
) -> TestMessage {
    let mut bytes = header(msg_type, transaction_id, duid);

    let mut auth = vec![
        AuthProtocol::DelayedAuthentication.code(),
        AuthAlgorithm::HmacMd5.code(),
        0, // monotonically increasing counter
    ];
    auth.extend_from_slice(&replay_counter.to_be_bytes());
    auth.extend_from_slice(realm);
    auth.extend_from_slice(&key_id.to_be_bytes());
    auth.extend_from_slice(&[0u8; MAC_LENGTH]);

    let start = push_option(&mut bytes, OPTION_AUTH, &auth);
    TestMessage {
        auth_offset: start + auth.len() - MAC_LENGTH,
        auth_len: MAC_LENGTH,
        timestamp_offset: None,
        bytes,
    }
}

/// Message with a timestamp option and a zeroed `sig_len`-byte signature field.
pub fn signed_message(
    msg_type: u8,
    transaction_id: u32,
    duid: &Duid,
    timestamp: Timestamp,
    sig_len: usize,
) -> TestMessage {
    let mut bytes = header(msg_type, transaction_id, duid);

    let mut stamp = Vec::with_capacity(8);
    stamp.extend_from_slice(&(timestamp.as_secs() as u32).to_be_bytes());
    stamp.extend_from_slice(&((timestamp.as_micros() % 1_000_000) as u32).to_be_bytes());
    let timestamp_offset = push_option(&mut bytes, OPTION_TIMESTAMP, &stamp);

    let mut signature = vec![
        HashAlgorithm::Sha256.code(),
        SignatureAlgorithm::RsassaPkcs1V15.code(),
    ];
    signature.resize(2 + sig_len, 0);
    let start = push_option(&mut bytes, OPTION_SIGNATURE, &signature);

    TestMessage {
        auth_offset: start + 2,
        auth_len: sig_len,
        timestamp_offset: Some(timestamp_offset),
        bytes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delayed_auth_layout() {
        let duid = Duid::new(vec![0, 1, 2, 3]);
        let msg = delayed_auth_message(MSG_SOLICIT, 0x00ab_cdef, &duid, b"kame.net", 7, 1);

        assert_eq!(msg.bytes[0], MSG_SOLICIT);
        assert_eq!(&msg.bytes[1..4], &[0xab, 0xcd, 0xef]);
        assert_eq!(msg.auth_offset + MAC_LENGTH, msg.bytes.len());
        assert!(msg.auth_field().iter().all(|&b| b == 0));
        assert_eq!(&msg.bytes[msg.auth_offset - 4..msg.auth_offset], &7u32.to_be_bytes());
    }

    #[test]
    fn test_signed_layout() {
        let duid = Duid::new(vec![9, 9]);
        let ts = Timestamp::from_secs_micros(1_700_000_000, 123_456);
        let msg = signed_message(MSG_ADVERTISE, 1, &duid, ts, 128);

        assert_eq!(msg.auth_len, 128);
        assert_eq!(msg.auth_offset + 128, msg.bytes.len());
        assert_eq!(msg.timestamp(), Some(ts));
    }
}
