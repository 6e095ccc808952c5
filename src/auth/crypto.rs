//! Signature verification for domain-ownership proofs.
//!
//! `VerifierKey` wraps the algorithm-specific verifying keys in a single
//! closed enum so dispatch stays exhaustive and statically checkable; a new
//! algorithm cannot be added without teaching the verifier about it.
//!
//! The signed message is always the UTF-8 bytes of the RFC 3339 timestamp
//! string from the exchange request, never the domain.

use ed25519_dalek::{Signature, VerifyingKey};
use p384::ecdsa::signature::Verifier;
use p384::ecdsa::{Signature as EcdsaSignature, VerifyingKey as EcdsaVerifyingKey};

use crate::auth::error::AuthError;
use crate::auth::proof::PublicKeyInfo;

/// Ed25519 signature size in bytes.
pub const ED25519_SIGNATURE_SIZE: usize = 64;

/// ECDSA P-384 signature size in bytes: `r` and `s` as 48-byte big-endian
/// unsigned integers, concatenated.
pub const P384_SIGNATURE_SIZE: usize = 96;

/// Typed verifying key material, tagged by algorithm.
#[derive(Clone, Debug)]
pub enum VerifierKey {
    Ed25519(VerifyingKey),
    EcdsaP384(EcdsaVerifyingKey),
}

impl VerifierKey {
    /// Verify `signature` over `message` with this key.
    ///
    /// Ed25519 verifies over the raw message; ECDSA/P-384 hashes the message
    /// with SHA-384 first and checks the fixed-size `r || s` signature.
    ///
    /// # Errors
    ///
    /// Returns an error when the signature has the wrong length for the
    /// algorithm or fails cryptographic verification.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<(), AuthError> {
        match self {
            VerifierKey::Ed25519(key) => {
                let bytes: [u8; ED25519_SIGNATURE_SIZE] =
                    signature.try_into().map_err(|_| AuthError::SignatureLength {
                        expected: ED25519_SIGNATURE_SIZE,
                        actual: signature.len(),
                    })?;
                key.verify(message, &Signature::from_bytes(&bytes))
                    .map_err(|_| AuthError::SignatureVerification)
            }
            VerifierKey::EcdsaP384(key) => {
                if signature.len() != P384_SIGNATURE_SIZE {
                    return Err(AuthError::SignatureLength {
                        expected: P384_SIGNATURE_SIZE,
                        actual: signature.len(),
                    });
                }
                let signature = EcdsaSignature::from_slice(signature)
                    .map_err(|_| AuthError::SignatureVerification)?;
                key.verify(message, &signature)
                    .map_err(|_| AuthError::SignatureVerification)
            }
        }
    }
}

/// Try each candidate key in order, succeeding on the first match.
///
/// With a single candidate the specific failure is surfaced, keeping
/// diagnostics precise for the common one-key deployment. With several candidates a
/// universal failure collapses to a generic error so callers cannot learn
/// which key types were tried.
///
/// # Errors
///
/// Returns an error when no key verifies the signature, or when the
/// candidate list is empty.
pub fn verify_with_any(
    keys: &[PublicKeyInfo],
    message: &[u8],
    signature: &[u8],
) -> Result<(), AuthError> {
    if keys.is_empty() {
        return Err(AuthError::NoValidKeys);
    }
    if let [only] = keys {
        return only.key.verify(message, signature);
    }
    for candidate in keys {
        if candidate.key.verify(message, signature).is_ok() {
            return Ok(());
        }
    }
    Err(AuthError::SignatureVerification)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::proof::KeyAlgorithm;
    use ed25519_dalek::{Signer, SigningKey};
    use p384::ecdsa::signature::Signer as _;
    use p384::ecdsa::SigningKey as EcdsaSigningKey;
    use rand::rngs::OsRng;

    const MESSAGE: &[u8] = b"2026-08-07T12:00:00Z";

    fn ed25519_pair() -> (SigningKey, PublicKeyInfo) {
        let signing = SigningKey::generate(&mut OsRng);
        let info = PublicKeyInfo {
            algorithm: KeyAlgorithm::Ed25519,
            key: VerifierKey::Ed25519(signing.verifying_key()),
        };
        (signing, info)
    }

    fn ecdsa_pair() -> (EcdsaSigningKey, PublicKeyInfo) {
        let signing = EcdsaSigningKey::random(&mut OsRng);
        let info = PublicKeyInfo {
            algorithm: KeyAlgorithm::EcdsaP384,
            key: VerifierKey::EcdsaP384(*signing.verifying_key()),
        };
        (signing, info)
    }

    #[test]
    fn ed25519_roundtrip_verifies() {
        let (signing, info) = ed25519_pair();
        let signature = signing.sign(MESSAGE).to_bytes();
        info.key.verify(MESSAGE, &signature).expect("valid signature");
    }

    #[test]
    fn ecdsa_p384_roundtrip_verifies() {
        let (signing, info) = ecdsa_pair();
        let signature: EcdsaSignature = signing.sign(MESSAGE);
        let signature = signature.to_vec();
        assert_eq!(signature.len(), P384_SIGNATURE_SIZE);
        info.key.verify(MESSAGE, &signature).expect("valid signature");
    }

    #[test]
    fn flipping_a_signature_bit_fails_verification() {
        let (signing, info) = ed25519_pair();
        let mut signature = signing.sign(MESSAGE).to_bytes();
        signature[17] ^= 0x01;
        assert!(matches!(
            info.key.verify(MESSAGE, &signature),
            Err(AuthError::SignatureVerification)
        ));
    }

    #[test]
    fn flipping_a_message_bit_fails_verification() {
        let (signing, info) = ed25519_pair();
        let signature = signing.sign(MESSAGE).to_bytes();
        let mut message = MESSAGE.to_vec();
        message[0] ^= 0x80;
        assert!(info.key.verify(&message, &signature).is_err());

        let (ecdsa_signing, ecdsa_info) = ecdsa_pair();
        let signature: EcdsaSignature = ecdsa_signing.sign(MESSAGE);
        assert!(ecdsa_info.key.verify(&message, &signature.to_vec()).is_err());
    }

    #[test]
    fn wrong_signature_length_reports_expected_size() {
        let (_, info) = ed25519_pair();
        assert!(matches!(
            info.key.verify(MESSAGE, &[0u8; 63]),
            Err(AuthError::SignatureLength {
                expected: ED25519_SIGNATURE_SIZE,
                actual: 63,
            })
        ));

        let (_, info) = ecdsa_pair();
        assert!(matches!(
            info.key.verify(MESSAGE, &[0u8; 64]),
            Err(AuthError::SignatureLength {
                expected: P384_SIGNATURE_SIZE,
                actual: 64,
            })
        ));
    }

    #[test]
    fn any_matching_key_in_a_set_verifies() {
        let (signing, signer_info) = ed25519_pair();
        let (_, other_info) = ed25519_pair();
        let (_, ecdsa_info) = ecdsa_pair();
        let signature = signing.sign(MESSAGE).to_bytes();

        let keys = vec![other_info, ecdsa_info, signer_info];
        verify_with_any(&keys, MESSAGE, &signature).expect("third key matches");
    }

    #[test]
    fn multi_key_failure_collapses_to_generic_error() {
        let (signing, _) = ed25519_pair();
        let (_, stranger_a) = ed25519_pair();
        let (_, stranger_b) = ecdsa_pair();
        let signature = signing.sign(MESSAGE).to_bytes();

        // 64-byte signature against a P-384 key is a length mismatch, but
        // with multiple candidates nothing key-specific may leak.
        assert!(matches!(
            verify_with_any(&[stranger_a, stranger_b], MESSAGE, &signature),
            Err(AuthError::SignatureVerification)
        ));
    }

    #[test]
    fn single_key_failure_stays_specific() {
        let (_, info) = ecdsa_pair();
        assert!(matches!(
            verify_with_any(&[info], MESSAGE, &[0u8; 64]),
            Err(AuthError::SignatureLength {
                expected: P384_SIGNATURE_SIZE,
                actual: 64,
            })
        ));
    }

    #[test]
    fn empty_key_set_is_rejected() {
        assert!(matches!(
            verify_with_any(&[], MESSAGE, &[0u8; 64]),
            Err(AuthError::NoValidKeys)
        ));
    }
}
