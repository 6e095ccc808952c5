//! Environment-driven configuration for the token issuer.
//!
//! The signing seed is the only secret the core holds. It is wrapped in
//! [`SecretString`] so it never appears in debug output, and it is checked
//! eagerly when the [`TokenIssuer`](crate::token::TokenIssuer) is built.

use anyhow::{Context, Result};
use secrecy::SecretString;
use std::env;

use crate::token::{DEFAULT_ISSUER, TOKEN_TTL_SECONDS};

/// Hex-encoded Ed25519 seed for the token signing keypair. Required.
pub const SEED_ENV: &str = "REGISTRY_JWT_SEED";

/// Issuer string written into minted tokens.
pub const ISSUER_ENV: &str = "REGISTRY_JWT_ISSUER";

/// Token lifetime override, in seconds.
pub const TTL_ENV: &str = "REGISTRY_TOKEN_TTL_SECONDS";

/// Issuer configuration for the token signer.
#[derive(Clone, Debug)]
pub struct RegistryConfig {
    pub issuer: String,
    pub token_ttl_seconds: i64,
    pub seed: SecretString,
}

impl RegistryConfig {
    /// Configuration with defaults and an explicit seed; callers own secret
    /// sourcing (environment, vault, test fixture).
    #[must_use]
    pub fn new(seed: SecretString) -> Self {
        Self {
            issuer: DEFAULT_ISSUER.to_string(),
            token_ttl_seconds: TOKEN_TTL_SECONDS,
            seed,
        }
    }

    /// Read configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when [`SEED_ENV`] is not set; the seed's content is
    /// validated later, when the issuer is constructed.
    pub fn from_env() -> Result<Self> {
        let seed = env::var(SEED_ENV).with_context(|| format!("{SEED_ENV} is not set"))?;
        let issuer = env::var(ISSUER_ENV).unwrap_or_else(|_| DEFAULT_ISSUER.to_string());
        let token_ttl_seconds = env::var(TTL_ENV)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(TOKEN_TTL_SECONDS);
        Ok(Self {
            issuer,
            token_ttl_seconds,
            seed: SecretString::from(seed),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    const TEST_SEED: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";

    #[test]
    fn from_env_requires_a_seed() {
        temp_env::with_vars([(SEED_ENV, None::<&str>)], || {
            assert!(RegistryConfig::from_env().is_err());
        });
    }

    #[test]
    fn from_env_applies_defaults() {
        temp_env::with_vars(
            [
                (SEED_ENV, Some(TEST_SEED)),
                (ISSUER_ENV, None),
                (TTL_ENV, None),
            ],
            || {
                let config = RegistryConfig::from_env().expect("seed is set");
                assert_eq!(config.issuer, DEFAULT_ISSUER);
                assert_eq!(config.token_ttl_seconds, TOKEN_TTL_SECONDS);
                assert_eq!(config.seed.expose_secret(), TEST_SEED);
            },
        );
    }

    #[test]
    fn from_env_respects_overrides() {
        temp_env::with_vars(
            [
                (SEED_ENV, Some(TEST_SEED)),
                (ISSUER_ENV, Some("staging-registry")),
                (TTL_ENV, Some("120")),
            ],
            || {
                let config = RegistryConfig::from_env().expect("seed is set");
                assert_eq!(config.issuer, "staging-registry");
                assert_eq!(config.token_ttl_seconds, 120);
            },
        );
    }

    #[test]
    fn unparsable_ttl_falls_back_to_default() {
        temp_env::with_vars(
            [(SEED_ENV, Some(TEST_SEED)), (TTL_ENV, Some("soon"))],
            || {
                let config = RegistryConfig::from_env().expect("seed is set");
                assert_eq!(config.token_ttl_seconds, TOKEN_TTL_SECONDS);
            },
        );
    }

    #[test]
    fn debug_output_redacts_the_seed() {
        let config = RegistryConfig::new(SecretString::from(TEST_SEED.to_string()));
        let rendered = format!("{config:?}");
        assert!(!rendered.contains(TEST_SEED));
    }
}
