//! Proof-record parsing.
//!
//! A domain owner publishes ASCII records of the form
//! `v=MCPv1; k=<algorithm>; p=<base64 public key>`, in DNS TXT records, a
//! well-known HTTP file, or any other source the transport layer supports.
//! Records that do not match the grammar are dropped silently (TXT record
//! sets routinely carry SPF and verification strings). Records that match
//! but carry unusable key material yield per-record errors without aborting
//! the rest of the batch, so one stale key never breaks rotation.

use base64ct::{Base64, Base64Unpadded, Encoding};
use ed25519_dalek::VerifyingKey;
use p384::ecdsa::VerifyingKey as EcdsaVerifyingKey;
use regex::Regex;

use crate::auth::crypto::VerifierKey;
use crate::auth::error::AuthError;

/// Byte length of an Ed25519 public key.
pub const ED25519_PUBLIC_KEY_SIZE: usize = 32;

/// Byte length of a SEC1 compressed P-384 point (prefix byte plus x).
pub const P384_COMPRESSED_KEY_SIZE: usize = 49;

const PROOF_GRAMMAR: &str = r"v=MCPv1;\s*k=([^;]+);\s*p=([A-Za-z0-9+/=]+)";

/// Supported proof-record algorithms.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum KeyAlgorithm {
    Ed25519,
    EcdsaP384,
}

impl KeyAlgorithm {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            KeyAlgorithm::Ed25519 => "ed25519",
            KeyAlgorithm::EcdsaP384 => "ecdsap384",
        }
    }
}

impl std::fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed public key extracted from one proof record.
#[derive(Clone, Debug)]
pub struct PublicKeyInfo {
    pub algorithm: KeyAlgorithm,
    pub key: VerifierKey,
}

/// Extract candidate public keys from a batch of fetched records.
///
/// Non-matching records are not errors. Each matching record yields either a
/// parsed key or the error encountered while decoding it, preserving input
/// order so callers can partition and report precisely.
#[must_use]
pub fn parse_proof_records(records: &[String]) -> Vec<Result<PublicKeyInfo, AuthError>> {
    let Ok(grammar) = Regex::new(PROOF_GRAMMAR) else {
        return Vec::new();
    };
    records
        .iter()
        .filter_map(|record| {
            let captures = grammar.captures(record)?;
            let algorithm = captures.get(1)?.as_str().trim();
            let payload = captures.get(2)?.as_str();
            Some(parse_record_key(algorithm, payload))
        })
        .collect()
}

fn parse_record_key(algorithm: &str, payload: &str) -> Result<PublicKeyInfo, AuthError> {
    let key_bytes = decode_key_payload(payload)?;
    match algorithm {
        "ed25519" => parse_ed25519(&key_bytes),
        "ecdsap384" => parse_ecdsa_p384(&key_bytes),
        other => Err(AuthError::UnsupportedAlgorithm(other.to_string())),
    }
}

// Published records use the standard alphabet; accept both padded and
// unpadded encodings.
fn decode_key_payload(payload: &str) -> Result<Vec<u8>, AuthError> {
    Base64::decode_vec(payload)
        .or_else(|_| Base64Unpadded::decode_vec(payload))
        .map_err(|_| AuthError::KeyEncoding)
}

fn parse_ed25519(key_bytes: &[u8]) -> Result<PublicKeyInfo, AuthError> {
    let key_bytes: [u8; ED25519_PUBLIC_KEY_SIZE] =
        key_bytes.try_into().map_err(|_| AuthError::KeyLength {
            algorithm: KeyAlgorithm::Ed25519,
            expected: ED25519_PUBLIC_KEY_SIZE,
            actual: key_bytes.len(),
        })?;
    let key = VerifyingKey::from_bytes(&key_bytes).map_err(|_| AuthError::InvalidCurvePoint)?;
    Ok(PublicKeyInfo {
        algorithm: KeyAlgorithm::Ed25519,
        key: VerifierKey::Ed25519(key),
    })
}

fn parse_ecdsa_p384(key_bytes: &[u8]) -> Result<PublicKeyInfo, AuthError> {
    if key_bytes.len() != P384_COMPRESSED_KEY_SIZE {
        return Err(AuthError::KeyLength {
            algorithm: KeyAlgorithm::EcdsaP384,
            expected: P384_COMPRESSED_KEY_SIZE,
            actual: key_bytes.len(),
        });
    }
    // SEC1 compressed-point prefix: 0x02 (even y) or 0x03 (odd y).
    if key_bytes[0] != 0x02 && key_bytes[0] != 0x03 {
        return Err(AuthError::CompressedPointPrefix(key_bytes[0]));
    }
    let key = EcdsaVerifyingKey::from_sec1_bytes(key_bytes)
        .map_err(|_| AuthError::InvalidCurvePoint)?;
    Ok(PublicKeyInfo {
        algorithm: KeyAlgorithm::EcdsaP384,
        key: VerifierKey::EcdsaP384(key),
    })
}
