use thiserror::Error;

use crate::auth::method::AuthMethod;
use crate::auth::proof::KeyAlgorithm;
use crate::token::TokenError;

/// Failures surfaced by the domain-ownership proof protocol.
///
/// Input-validation, upstream-fetch, per-record parse, cryptographic and
/// policy failures are distinct variants so the transport layer can map them
/// to precise responses. Nothing here is fatal to the process.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid domain name: {0}")]
    InvalidDomain(String),
    #[error("invalid RFC 3339 timestamp: {0}")]
    TimestampFormat(String),
    #[error("timestamp outside of the accepted window")]
    TimestampOutsideWindow,
    #[error("invalid hex-encoded signature")]
    SignatureEncoding,
    #[error("key lookup failed: {0:#}")]
    KeyFetch(anyhow::Error),
    #[error("no public key found in DNS TXT records")]
    NoDnsRecord,
    #[error("no public key found at the well-known endpoint")]
    NoHttpRecord,
    #[error("no public key source for authentication method {0}")]
    NoKeySource(AuthMethod),
    #[error("no valid MCP public key found")]
    NoValidKeys,
    #[error("signature verification failed")]
    SignatureVerification,
    #[error("unsupported key algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("invalid base64 in public key payload")]
    KeyEncoding,
    #[error("{algorithm} public key must be {expected} bytes, got {actual}")]
    KeyLength {
        algorithm: KeyAlgorithm,
        expected: usize,
        actual: usize,
    },
    #[error("invalid compressed point prefix {0:#04x}")]
    CompressedPointPrefix(u8),
    #[error("public key is not a valid curve point")]
    InvalidCurvePoint,
    #[error("signature must be {expected} bytes, got {actual}")]
    SignatureLength { expected: usize, actual: usize },
    #[error(transparent)]
    Token(#[from] TokenError),
}
