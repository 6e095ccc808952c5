//! Request input validation: domain syntax, replay window, signature hex.
//!
//! These checks run before any key material is fetched, so malformed
//! requests never cost a network round trip.

use chrono::{DateTime, Duration, Utc};
use regex::Regex;

use crate::auth::error::AuthError;

/// Longest hostname accepted, in bytes.
pub const MAX_DOMAIN_LENGTH: usize = 253;

/// Half-width of the timestamp replay window, in seconds. Tight enough to
/// block replays, loose enough to tolerate caller/server clock skew. The
/// window is inclusive at exactly this bound.
pub const REPLAY_WINDOW_SECONDS: i64 = 15;

const HOSTNAME_GRAMMAR: &str =
    r"^[a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?)*$";

/// Check the label-based hostname grammar: labels of letters, digits and
/// inner hyphens, separated by dots, at most [`MAX_DOMAIN_LENGTH`] bytes.
///
/// # Errors
///
/// Returns [`AuthError::InvalidDomain`] when the name fails the grammar.
pub fn validate_domain(domain: &str) -> Result<(), AuthError> {
    let within_bounds = !domain.is_empty() && domain.len() <= MAX_DOMAIN_LENGTH;
    let valid = within_bounds
        && Regex::new(HOSTNAME_GRAMMAR).is_ok_and(|grammar| grammar.is_match(domain));
    if valid {
        Ok(())
    } else {
        Err(AuthError::InvalidDomain(domain.to_string()))
    }
}

/// Parse an RFC 3339 timestamp and enforce the replay window around `now`.
///
/// `now` is passed in rather than read here so the orchestrator owns the
/// single clock read per exchange and tests can pin both window edges.
///
/// # Errors
///
/// Returns an error when the string is not RFC 3339 or lies more than
/// [`REPLAY_WINDOW_SECONDS`] away from `now` in either direction.
pub fn validate_timestamp(timestamp: &str, now: DateTime<Utc>) -> Result<(), AuthError> {
    let parsed = DateTime::parse_from_rfc3339(timestamp)
        .map_err(|_| AuthError::TimestampFormat(timestamp.to_string()))?
        .with_timezone(&Utc);
    let skew = (now - parsed).abs();
    if skew <= Duration::seconds(REPLAY_WINDOW_SECONDS) {
        Ok(())
    } else {
        Err(AuthError::TimestampOutsideWindow)
    }
}

/// Decode the hex-encoded signature from the exchange request.
///
/// # Errors
///
/// Returns [`AuthError::SignatureEncoding`] when the string is not clean hex.
pub fn decode_signature(signed_timestamp: &str) -> Result<Vec<u8>, AuthError> {
    hex::decode(signed_timestamp).map_err(|_| AuthError::SignatureEncoding)
}
