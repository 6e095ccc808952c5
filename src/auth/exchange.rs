//! Token-exchange orchestration.
//!
//! Flow Overview: validate the domain and timestamp, decode the signature,
//! fetch the domain's published proof records through the injected
//! capability, parse candidate keys, verify the signed timestamp, derive
//! namespace permissions, and mint a registry token. Each invocation is a
//! pure request/response pass; no state survives between calls, so any
//! number of exchanges proceed in parallel against the same issuer.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::auth::crypto;
use crate::auth::error::AuthError;
use crate::auth::fetcher::KeyFetcher;
use crate::auth::method::{AuthMethod, KeyDiscovery};
use crate::auth::proof::{self, PublicKeyInfo};
use crate::auth::validation;
use crate::permissions;
use crate::token::{RegistryClaims, TokenIssuer};

/// Method-agnostic token-exchange request.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRequest {
    pub domain: String,
    /// RFC 3339 instant; also the exact byte string that was signed.
    pub timestamp: String,
    /// Hex-encoded signature over the timestamp string.
    pub signed_timestamp: String,
}

/// Minted token plus its expiry for client convenience.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeResponse {
    pub registry_token: String,
    pub expires_at: i64,
}

/// Exchange a domain-ownership proof for a registry token.
///
/// The key fetch is the only suspending step; everything else is a
/// synchronous function of the request, the clock, and the signing key.
///
/// # Errors
///
/// Returns an error when any validation, fetch, parse, verification, or
/// policy step fails; see [`AuthError`] for the taxonomy. Failures are
/// always per-call and never retried here.
pub async fn exchange_token(
    issuer: &TokenIssuer,
    fetcher: &dyn KeyFetcher,
    method: AuthMethod,
    request: &ExchangeRequest,
) -> Result<ExchangeResponse, AuthError> {
    validation::validate_domain(&request.domain)?;
    validation::validate_timestamp(&request.timestamp, Utc::now())?;
    let signature = validation::decode_signature(&request.signed_timestamp)?;

    let records = fetcher
        .fetch(&request.domain)
        .await
        .map_err(AuthError::KeyFetch)?;

    let parsed = proof::parse_proof_records(&records);
    if parsed.is_empty() {
        match method.policy().discovery {
            KeyDiscovery::Required => {
                return Err(match method {
                    AuthMethod::Dns => AuthError::NoDnsRecord,
                    AuthMethod::Http => AuthError::NoHttpRecord,
                    other => AuthError::NoKeySource(other),
                });
            }
            KeyDiscovery::Optional => {
                debug!(method = %method, domain = %request.domain, "no proof records; method does not require key discovery");
            }
        }
    }

    let record_count = parsed.len();
    let mut keys: Vec<PublicKeyInfo> = Vec::with_capacity(record_count);
    let mut parse_errors = Vec::new();
    for result in parsed {
        match result {
            Ok(key) => keys.push(key),
            Err(err) => parse_errors.push(err),
        }
    }

    // One record that failed to parse: surface the precise cause instead of
    // a generic verification failure.
    if record_count == 1 && keys.is_empty() {
        if let Some(err) = parse_errors.pop() {
            return Err(err);
        }
    }

    debug!(
        domain = %request.domain,
        candidates = keys.len(),
        rejected = parse_errors.len(),
        "parsed proof records"
    );

    crypto::verify_with_any(&keys, request.timestamp.as_bytes(), &signature)?;

    let include_subdomains = method.policy().include_subdomains;
    let granted = permissions::permissions_for_domain(&request.domain, include_subdomains);

    let claims = RegistryClaims::new(method, request.domain.clone(), granted);
    let signed = issuer.issue(claims)?;

    info!(domain = %request.domain, method = %method, "issued registry token");

    Ok(ExchangeResponse {
        registry_token: signed.token,
        expires_at: signed.expires_at,
    })
}
