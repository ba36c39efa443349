//! Canonical share fingerprints.
//!
//! A share's significant fields are decoded out of their wire hex and
//! re-serialized into one fixed form before hashing, so re-encoding an
//! already-spent share (different case, `0x` prefix, zero padding)
//! cannot produce a distinct identifier.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::error::MalformedEvidence;
use crate::evidence::PaymentEvidence;

/// SHA-256 digest identifying a share's essential
/// `(taskId, extraNonce2, nonce, timestamp)` tuple.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShareFingerprint([u8; 32]);

impl ShareFingerprint {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for ShareFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for ShareFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShareFingerprint({})", hex::encode(self.0))
    }
}

/// Decode a hex field, tolerating a `0x`/`0X` prefix, mixed case, and
/// odd length (left-padded with a zero nibble).
fn decode_hex(field: &str) -> Option<Vec<u8>> {
    let raw = field
        .strip_prefix("0x")
        .or_else(|| field.strip_prefix("0X"))
        .unwrap_or(field);
    if raw.is_empty() {
        return None;
    }
    if raw.len() % 2 == 1 {
        let mut padded = String::with_capacity(raw.len() + 1);
        padded.push('0');
        padded.push_str(raw);
        hex::decode(&padded).ok()
    } else {
        hex::decode(raw).ok()
    }
}

/// Fold big-endian bytes into a u64, keeping the low 64 bits.
fn bytes_to_u64(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte))
}

fn decode_bytes_field(
    evidence: &PaymentEvidence,
    index: usize,
) -> Result<Vec<u8>, MalformedEvidence> {
    let field = evidence
        .field_str(index)
        .ok_or(MalformedEvidence::NonStringField(index))?;
    decode_hex(field).ok_or(MalformedEvidence::InvalidHex(index))
}

fn decode_u64_field(evidence: &PaymentEvidence, index: usize) -> Result<u64, MalformedEvidence> {
    Ok(bytes_to_u64(&decode_bytes_field(evidence, index)?))
}

/// Reduce evidence to its canonical fingerprint.
///
/// The worker label (field 0) is excluded, so relabeling the same work
/// does not produce a distinct share. The extra nonce stays raw bytes;
/// the other significant fields become integers. Fails with
/// [`MalformedEvidence`] when the tuple has fewer than 5 elements or
/// any significant field is not valid hex.
pub fn fingerprint(evidence: &PaymentEvidence) -> Result<ShareFingerprint, MalformedEvidence> {
    if evidence.len() < 5 {
        return Err(MalformedEvidence::MissingFields(evidence.len()));
    }

    let task_id = decode_u64_field(evidence, 1)?;
    let extra_nonce = decode_bytes_field(evidence, 2)?;
    let timestamp = decode_u64_field(evidence, 3)?;
    let nonce = decode_u64_field(evidence, 4)?;

    // Canonical order is (taskId, extraNonce2, nonce, timestamp);
    // numbers stay numbers so re-encoded hex cannot alter the message.
    let canonical = serde_json::json!([task_id, hex::encode(&extra_nonce), nonce, timestamp]);
    let digest = Sha256::digest(canonical.to_string().as_bytes());
    Ok(ShareFingerprint(digest.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evidence(fields: &[&str]) -> PaymentEvidence {
        let raw = serde_json::to_string(fields).unwrap();
        PaymentEvidence::parse(&raw).unwrap()
    }

    #[test]
    fn hex_case_does_not_change_fingerprint() {
        let lower = fingerprint(&evidence(&["alice", "00ab", "00aa", "5f10", "0002"])).unwrap();
        let upper = fingerprint(&evidence(&["alice", "00AB", "00AA", "5F10", "0002"])).unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn prefix_and_padding_do_not_change_fingerprint() {
        let plain = fingerprint(&evidence(&["alice", "0001", "00aa", "5f10", "0002"])).unwrap();
        let prefixed = fingerprint(&evidence(&["alice", "0x01", "0X0AA", "5f10", "0x2"])).unwrap();
        assert_eq!(plain, prefixed);
    }

    #[test]
    fn leading_zeros_do_not_change_fingerprint() {
        let padded = fingerprint(&evidence(&["alice", "00000001", "00aa", "5f10", "0002"])).unwrap();
        let short = fingerprint(&evidence(&["alice", "1", "00aa", "5f10", "2"])).unwrap();
        assert_eq!(padded, short);
    }

    #[test]
    fn worker_label_is_excluded() {
        let alice = fingerprint(&evidence(&["alice", "0001", "00aa", "5f10", "0002"])).unwrap();
        let bob = fingerprint(&evidence(&["bob", "0001", "00aa", "5f10", "0002"])).unwrap();
        assert_eq!(alice, bob);
    }

    #[test]
    fn distinct_tuples_have_distinct_fingerprints() {
        let base = fingerprint(&evidence(&["alice", "0001", "00aa", "5f10", "0002"])).unwrap();
        let other_nonce =
            fingerprint(&evidence(&["alice", "0001", "00aa", "5f10", "0003"])).unwrap();
        let other_extra =
            fingerprint(&evidence(&["alice", "0001", "00ab", "5f10", "0002"])).unwrap();
        assert_ne!(base, other_nonce);
        assert_ne!(base, other_extra);
    }

    #[test]
    fn extra_nonce_stays_bytes_not_integer() {
        // "00aa" and "aa" decode to the same integer but different byte
        // sequences; they are distinct shares.
        let padded = fingerprint(&evidence(&["alice", "0001", "00aa", "5f10", "0002"])).unwrap();
        let short = fingerprint(&evidence(&["alice", "0001", "aa", "5f10", "0002"])).unwrap();
        assert_ne!(padded, short);
    }

    #[test]
    fn short_tuple_is_malformed() {
        let err = fingerprint(&evidence(&["alice", "0001", "00aa", "5f10"])).unwrap_err();
        assert_eq!(err, MalformedEvidence::MissingFields(4));
    }

    #[test]
    fn invalid_hex_is_malformed() {
        let err = fingerprint(&evidence(&["alice", "zzzz", "00aa", "5f10", "0002"])).unwrap_err();
        assert_eq!(err, MalformedEvidence::InvalidHex(1));

        let err = fingerprint(&evidence(&["alice", "0001", "00aa", "", "0002"])).unwrap_err();
        assert_eq!(err, MalformedEvidence::InvalidHex(3));
    }

    #[test]
    fn non_string_field_is_malformed() {
        let raw = r#"["alice", 1, "00aa", "5f10", "0002"]"#;
        let evidence = PaymentEvidence::parse(raw).unwrap();
        let err = fingerprint(&evidence).unwrap_err();
        assert_eq!(err, MalformedEvidence::NonStringField(1));
    }

    #[test]
    fn extra_elements_are_ignored() {
        let five = fingerprint(&evidence(&["alice", "0001", "00aa", "5f10", "0002"])).unwrap();
        let six =
            fingerprint(&evidence(&["alice", "0001", "00aa", "5f10", "0002", "ffff"])).unwrap();
        assert_eq!(five, six);
    }
}
