//! # Registry Auth
//!
//! Core authentication and authorization for an artifact registry: a domain
//! owner proves control of a DNS name or web origin and receives a
//! short-lived, narrowly-scoped registry token in exchange, with no
//! pre-registered account involved.
//!
//! ## Flow
//!
//! 1. The owner publishes a proof record (`v=MCPv1; k=<alg>; p=<base64>`)
//!    in a DNS TXT record or HTTP well-known file.
//! 2. The owner signs a fresh RFC 3339 timestamp with the matching private
//!    key and sends `(domain, timestamp, hex signature)` to the exchange.
//! 3. [`auth::exchange_token`] validates the request, pulls the record set
//!    through an injected [`auth::KeyFetcher`], verifies the signature
//!    against every published key, derives reverse-DNS `publish`
//!    permissions, and asks the [`token::TokenIssuer`] for an EdDSA-signed
//!    JWT.
//! 4. Subsequent requests present the token as a bearer credential;
//!    [`authz::session_from_bearer`] turns it back into a session and
//!    [`authz::authorize`] maps the session's permission set onto the
//!    requested action and resource.
//!
//! Everything here is stateless per call: the only shared values are the
//! immutable signing keypair and the static namespace denylist, so
//! exchanges and validations run fully in parallel. Transport, key-lookup
//! I/O, persistence, and identity providers live outside this crate and
//! interact with it only through the types above.

pub mod auth;
pub mod authz;
pub mod config;
pub mod permissions;
pub mod token;
