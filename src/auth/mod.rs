//! Domain-ownership proof protocol.
//!
//! A domain owner publishes a proof record (DNS TXT or HTTP well-known),
//! signs a fresh RFC 3339 timestamp with the matching private key, and
//! exchanges the proof for a short-lived registry token scoped to the
//! domain's reverse-DNS namespace. No pre-registered account is involved;
//! the published record set is the entire trust anchor.

pub mod crypto;
pub mod error;
pub mod exchange;
pub mod fetcher;
pub mod method;
pub mod proof;
pub mod validation;

pub use crypto::{verify_with_any, VerifierKey};
pub use error::AuthError;
pub use exchange::{exchange_token, ExchangeRequest, ExchangeResponse};
pub use fetcher::KeyFetcher;
pub use method::{AuthMethod, KeyDiscovery, MethodPolicy};
pub use proof::{parse_proof_records, KeyAlgorithm, PublicKeyInfo};
