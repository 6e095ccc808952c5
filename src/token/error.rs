use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("signing seed must be {expected} bytes, got {actual}")]
    SeedLength { expected: usize, actual: usize },
    #[error("signing seed is not valid hex")]
    SeedEncoding,
    #[error("invalid token format")]
    TokenFormat,
    #[error("invalid base64url encoding")]
    Base64,
    #[error("invalid json")]
    Json(#[from] serde_json::Error),
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlg(String),
    #[error("invalid signature")]
    InvalidSignature,
    #[error("missing expiration claim")]
    MissingExpiration,
    #[error("token expired")]
    Expired,
    #[error("token not yet valid")]
    NotYetValid,
    #[error("publishing to namespace {0} is not allowed")]
    DeniedNamespace(String),
}
