//! Registry token issuance and validation.
//!
//! Tokens are compact JWTs signed with EdDSA (Ed25519) exclusively. The
//! signing keypair is derived once from a fixed-length secret seed when the
//! issuer is constructed and injected wherever tokens are minted or checked;
//! there is no hidden process-wide signing state, and a bad seed fails at
//! startup rather than deep in a request path.

use base64ct::{Base64UrlUnpadded, Encoding};
use chrono::Utc;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::debug;

mod claims;
mod error;

pub use claims::{RegistryClaims, DEFAULT_ISSUER, TOKEN_TTL_SECONDS};
pub use error::TokenError;

use crate::config::RegistryConfig;
use crate::permissions::{Action, Permission};

/// Seed length for the Ed25519 signing key, in bytes.
pub const SEED_SIZE: usize = 32;

const JWT_ALGORITHM: &str = "EdDSA";

/// Namespace prefixes that can never be claimed through domain proofs.
/// Reserved for the registry's own artifacts; admin-scoped tokens skip this
/// check entirely.
const DENIED_NAMESPACES: &[&str] = &["io.modelcontextprotocol", "io.mcp"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
struct TokenHeader {
    alg: String,
    typ: String,
}

impl TokenHeader {
    fn eddsa() -> Self {
        Self {
            alg: JWT_ALGORITHM.to_string(),
            typ: "JWT".to_string(),
        }
    }
}

/// A minted compact token plus its expiry as epoch seconds, returned
/// together so clients need not parse the token to schedule renewal.
#[derive(Clone, Debug)]
pub struct SignedToken {
    pub token: String,
    pub expires_at: i64,
}

/// Issues and validates registry JWTs with a single Ed25519 keypair.
pub struct TokenIssuer {
    issuer: String,
    ttl_seconds: i64,
    signing_key: SigningKey,
}

impl TokenIssuer {
    /// Build an issuer from configuration, deriving the keypair from the
    /// configured seed.
    ///
    /// # Errors
    ///
    /// Fails when the seed is not exactly [`SEED_SIZE`] bytes of hex.
    pub fn new(config: &RegistryConfig) -> Result<Self, TokenError> {
        let seed = hex::decode(config.seed.expose_secret().trim())
            .map_err(|_| TokenError::SeedEncoding)?;
        let actual = seed.len();
        let seed: [u8; SEED_SIZE] = seed.try_into().map_err(|_| TokenError::SeedLength {
            expected: SEED_SIZE,
            actual,
        })?;
        Ok(Self {
            issuer: config.issuer.clone(),
            ttl_seconds: config.token_ttl_seconds,
            signing_key: SigningKey::from_bytes(&seed),
        })
    }

    /// Sign the given claims into a compact token.
    ///
    /// Standard claims left unset default to `iat = nbf = now`,
    /// `exp = now + ttl`, and the configured issuer. Unless the claim set
    /// carries a global `"*"` grant, every `publish` permission is checked
    /// against the namespace denylist before anything is signed.
    ///
    /// # Errors
    ///
    /// Returns an error when a denylisted namespace would receive `publish`
    /// or the claims cannot be encoded.
    pub fn issue(&self, claims: RegistryClaims) -> Result<SignedToken, TokenError> {
        let claims = self.apply_defaults(claims, Utc::now().timestamp());
        check_denied_namespaces(&claims.permissions)?;
        let expires_at = claims.exp.ok_or(TokenError::MissingExpiration)?;

        let header_b64 = b64e_json(&TokenHeader::eddsa())?;
        let claims_b64 = b64e_json(&claims)?;
        let signing_input = format!("{header_b64}.{claims_b64}");
        let signature: Signature = self.signing_key.sign(signing_input.as_bytes());
        let signature_b64 = Base64UrlUnpadded::encode_string(&signature.to_bytes());

        debug!(
            subject = %claims.auth_method_sub,
            permissions = claims.permissions.len(),
            expires_at,
            "signed registry token"
        );

        Ok(SignedToken {
            token: format!("{signing_input}.{signature_b64}"),
            expires_at,
        })
    }

    /// Validate a compact token and return its embedded claims unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error when the token is malformed, signed under any
    /// algorithm other than EdDSA, fails signature verification, lacks an
    /// expiration claim, is expired, or is not yet valid.
    pub fn validate(&self, token: &str) -> Result<RegistryClaims, TokenError> {
        let mut parts = token.split('.');
        let header_b64 = parts.next().ok_or(TokenError::TokenFormat)?;
        let claims_b64 = parts.next().ok_or(TokenError::TokenFormat)?;
        let signature_b64 = parts.next().ok_or(TokenError::TokenFormat)?;
        if parts.next().is_some() {
            return Err(TokenError::TokenFormat);
        }

        let header: TokenHeader = b64d_json(header_b64)?;
        if header.alg != JWT_ALGORITHM {
            return Err(TokenError::UnsupportedAlg(header.alg));
        }

        let signature_bytes =
            Base64UrlUnpadded::decode_vec(signature_b64).map_err(|_| TokenError::Base64)?;
        let signature_bytes: [u8; 64] = signature_bytes
            .as_slice()
            .try_into()
            .map_err(|_| TokenError::InvalidSignature)?;
        let signature = Signature::from_bytes(&signature_bytes);
        let signing_input = format!("{header_b64}.{claims_b64}");
        self.signing_key
            .verifying_key()
            .verify(signing_input.as_bytes(), &signature)
            .map_err(|_| TokenError::InvalidSignature)?;

        let claims: RegistryClaims = b64d_json(claims_b64)?;
        let exp = claims.exp.ok_or(TokenError::MissingExpiration)?;
        let now = Utc::now().timestamp();
        if exp <= now {
            return Err(TokenError::Expired);
        }
        if claims.nbf.is_some_and(|nbf| nbf > now) {
            return Err(TokenError::NotYetValid);
        }

        Ok(claims)
    }

    /// Verifying half of the signing keypair, for out-of-process checks.
    #[must_use]
    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    fn apply_defaults(&self, mut claims: RegistryClaims, now: i64) -> RegistryClaims {
        claims.iss.get_or_insert_with(|| self.issuer.clone());
        claims.iat.get_or_insert(now);
        claims.nbf.get_or_insert(now);
        claims.exp.get_or_insert(now + self.ttl_seconds);
        claims
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("issuer", &self.issuer)
            .field("ttl_seconds", &self.ttl_seconds)
            .field("signing_key", &"[REDACTED]")
            .finish()
    }
}

fn check_denied_namespaces(permissions: &[Permission]) -> Result<(), TokenError> {
    if permissions.iter().any(Permission::is_global) {
        return Ok(());
    }
    for permission in permissions {
        if permission.action != Action::Publish {
            continue;
        }
        let prefix = permission.resource.trim_end_matches('*');
        if DENIED_NAMESPACES.iter().any(|denied| {
            prefix == *denied
                || prefix
                    .strip_prefix(denied)
                    .is_some_and(|rest| rest.starts_with(['.', '/']))
        }) {
            return Err(TokenError::DeniedNamespace(
                permission.resource.trim_end_matches(['*', '/', '.']).to_string(),
            ));
        }
    }
    Ok(())
}

fn b64e_json<T: Serialize>(value: &T) -> Result<String, TokenError> {
    let json = serde_json::to_vec(value)?;
    Ok(Base64UrlUnpadded::encode_string(&json))
}

fn b64d_json<T: for<'de> Deserialize<'de>>(s: &str) -> Result<T, TokenError> {
    let bytes = Base64UrlUnpadded::decode_vec(s).map_err(|_| TokenError::Base64)?;
    Ok(serde_json::from_slice(&bytes)?)
}
