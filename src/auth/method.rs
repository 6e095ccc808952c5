//! Authentication methods and their key-discovery policies.
//!
//! The exchange treats the method as data: each method maps to a policy
//! describing whether domain key discovery is required and whether a proof
//! grants subdomain namespaces. Adding a method means adding a policy entry,
//! not another branch in the orchestrator.

use serde::{Deserialize, Serialize};

/// How a caller authenticated a token-exchange request.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthMethod {
    Http,
    Dns,
    GithubAccessToken,
    GithubOidc,
    Oidc,
    None,
}

impl AuthMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            AuthMethod::Http => "http",
            AuthMethod::Dns => "dns",
            AuthMethod::GithubAccessToken => "github-access-token",
            AuthMethod::GithubOidc => "github-oidc",
            AuthMethod::Oidc => "oidc",
            AuthMethod::None => "none",
        }
    }

    /// The exchange policy for this method.
    #[must_use]
    pub const fn policy(self) -> MethodPolicy {
        match self {
            // HTTP proofs cover exactly the proven origin.
            AuthMethod::Http => MethodPolicy {
                discovery: KeyDiscovery::Required,
                include_subdomains: false,
            },
            // A DNS record speaks for the whole zone, subdomains included.
            AuthMethod::Dns => MethodPolicy {
                discovery: KeyDiscovery::Required,
                include_subdomains: true,
            },
            AuthMethod::GithubAccessToken
            | AuthMethod::GithubOidc
            | AuthMethod::Oidc
            | AuthMethod::None => MethodPolicy {
                discovery: KeyDiscovery::Optional,
                include_subdomains: false,
            },
        }
    }
}

impl std::fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a method depends on domain key discovery.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyDiscovery {
    /// Proof records must exist; an empty lookup is a hard failure.
    Required,
    /// The method authenticates elsewhere; an empty lookup falls through.
    Optional,
}

/// Per-method exchange policy.
#[derive(Clone, Copy, Debug)]
pub struct MethodPolicy {
    pub discovery: KeyDiscovery,
    pub include_subdomains: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dns_requires_discovery_and_covers_subdomains() {
        let policy = AuthMethod::Dns.policy();
        assert_eq!(policy.discovery, KeyDiscovery::Required);
        assert!(policy.include_subdomains);
    }

    #[test]
    fn http_requires_discovery_without_subdomains() {
        let policy = AuthMethod::Http.policy();
        assert_eq!(policy.discovery, KeyDiscovery::Required);
        assert!(!policy.include_subdomains);
    }

    #[test]
    fn non_domain_methods_treat_discovery_as_optional() {
        for method in [
            AuthMethod::GithubAccessToken,
            AuthMethod::GithubOidc,
            AuthMethod::Oidc,
            AuthMethod::None,
        ] {
            let policy = method.policy();
            assert_eq!(policy.discovery, KeyDiscovery::Optional);
            assert!(!policy.include_subdomains);
        }
    }

    #[test]
    fn serializes_as_kebab_case() -> Result<(), serde_json::Error> {
        assert_eq!(
            serde_json::to_value(AuthMethod::GithubAccessToken)?,
            serde_json::json!("github-access-token")
        );
        assert_eq!(
            serde_json::to_value(AuthMethod::None)?,
            serde_json::json!("none")
        );
        let parsed: AuthMethod = serde_json::from_str("\"github-oidc\"")?;
        assert_eq!(parsed, AuthMethod::GithubOidc);
        Ok(())
    }
}
