//! Key-source capability injected into the exchange.
//!
//! The core never performs DNS or HTTP lookups itself. The transport layer
//! supplies a [`KeyFetcher`] matching the selected authentication method:
//! DNS TXT lookup, well-known HTTP file fetch, or anything else that yields
//! raw record strings. The fetch is the only suspension point in an
//! exchange; timeouts and cancellation are the caller's responsibility.

use std::future::Future;
use std::pin::Pin;

/// Object-safe async source of raw proof records for a domain.
///
/// Implementations return every record string they find; filtering against
/// the proof grammar happens in the core. Errors are surfaced to the caller
/// with their cause attached and are never retried by the core.
pub trait KeyFetcher: Send + Sync {
    fn fetch<'a>(
        &'a self,
        domain: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Vec<String>>> + Send + 'a>>;
}
