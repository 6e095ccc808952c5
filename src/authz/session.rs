//! Request sessions: JWT-backed principals and the internal system session.
//!
//! A session lives for one request and is never persisted. The variant set
//! is closed on purpose: the authorization engine asks capability
//! questions (`is_registry_admin`) instead of matching on type identity,
//! and the system sentinel carries no serde implementations so it can never
//! cross a process boundary.

use crate::auth::method::AuthMethod;
use crate::permissions::Permission;
use crate::token::{RegistryClaims, TokenError, TokenIssuer};

const BEARER_PREFIX: &str = "Bearer ";

/// Identity and grants attached to a request.
#[derive(Clone, Debug)]
pub struct Principal {
    pub auth_method: AuthMethod,
    pub subject: String,
    pub permissions: Vec<Permission>,
}

/// Per-request capability handed to the authorization engine.
#[derive(Clone, Debug)]
pub enum Session {
    /// Permissions come from a validated token's claims.
    Jwt(Principal),
    /// Internal sentinel for trusted background operations; always passes
    /// the admin bypass and never reaches permission matching.
    System,
}

impl Session {
    /// Session for trusted internal operations.
    #[must_use]
    pub fn system() -> Self {
        Session::System
    }

    /// Build a session from validated token claims. The permission list is
    /// fixed at construction and never mutated afterwards.
    #[must_use]
    pub fn from_claims(claims: RegistryClaims) -> Self {
        Session::Jwt(Principal {
            auth_method: claims.auth_method,
            subject: claims.auth_method_sub,
            permissions: claims.permissions,
        })
    }

    /// Whether this session bypasses per-resource checks entirely: the
    /// system sentinel, or any grant over the global `"*"` pattern.
    #[must_use]
    pub fn is_registry_admin(&self) -> bool {
        match self {
            Session::System => true,
            Session::Jwt(principal) => {
                principal.permissions.iter().any(Permission::is_global)
            }
        }
    }

    /// Grants held by this session. Empty for the system sentinel, which is
    /// allowed before matching is ever consulted.
    #[must_use]
    pub fn permissions(&self) -> &[Permission] {
        match self {
            Session::System => &[],
            Session::Jwt(principal) => &principal.permissions,
        }
    }
}

/// Resolve an `Authorization` header value into a session.
///
/// An absent or non-bearer header yields no session. That alone is not an
/// error; whether anonymous access suffices is the authorization engine's
/// call. A bearer token that fails validation is an authentication error.
///
/// # Errors
///
/// Returns the underlying [`TokenError`] when a presented token is
/// malformed, expired, or signed with the wrong key or algorithm.
pub fn session_from_bearer(
    issuer: &TokenIssuer,
    header: Option<&str>,
) -> Result<Option<Session>, TokenError> {
    let Some(header) = header else {
        return Ok(None);
    };
    let Some(token) = header.strip_prefix(BEARER_PREFIX) else {
        return Ok(None);
    };
    let claims = issuer.validate(token.trim())?;
    Ok(Some(Session::from_claims(claims)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegistryConfig;
    use crate::permissions::{Action, GLOBAL_PATTERN};
    use secrecy::SecretString;

    const TEST_SEED: &str = "c5aa8df43f9f837bedb7442f31dcb7b166d38535076f094b85ce3a2e0b4458f7";

    fn test_issuer() -> TokenIssuer {
        let config = RegistryConfig::new(SecretString::from(TEST_SEED.to_string()));
        TokenIssuer::new(&config).expect("test seed is valid")
    }

    fn minted_token(issuer: &TokenIssuer) -> String {
        let claims = RegistryClaims::new(
            AuthMethod::Dns,
            "example.com",
            vec![Permission::new(Action::Publish, "com.example/*")],
        );
        issuer.issue(claims).expect("claims are issuable").token
    }

    #[test]
    fn absent_header_yields_no_session() -> Result<(), TokenError> {
        let issuer = test_issuer();
        assert!(session_from_bearer(&issuer, None)?.is_none());
        Ok(())
    }

    #[test]
    fn non_bearer_header_yields_no_session() -> Result<(), TokenError> {
        let issuer = test_issuer();
        assert!(session_from_bearer(&issuer, Some("Basic dXNlcjpwdw=="))?.is_none());
        assert!(session_from_bearer(&issuer, Some("bearer lowercase"))?.is_none());
        Ok(())
    }

    #[test]
    fn invalid_bearer_token_is_an_authentication_error() {
        let issuer = test_issuer();
        assert!(session_from_bearer(&issuer, Some("Bearer garbage")).is_err());
    }

    #[test]
    fn valid_bearer_token_yields_a_jwt_session() -> Result<(), TokenError> {
        let issuer = test_issuer();
        let header = format!("Bearer {}", minted_token(&issuer));
        let session = session_from_bearer(&issuer, Some(&header))?
            .expect("valid token yields a session");

        assert!(!session.is_registry_admin());
        assert_eq!(session.permissions().len(), 1);
        match session {
            Session::Jwt(principal) => {
                assert_eq!(principal.subject, "example.com");
                assert_eq!(principal.auth_method, AuthMethod::Dns);
            }
            Session::System => panic!("expected a JWT session"),
        }
        Ok(())
    }

    #[test]
    fn global_grant_marks_the_session_admin() {
        let claims = RegistryClaims::new(
            AuthMethod::None,
            "ops",
            vec![Permission::new(Action::Read, GLOBAL_PATTERN)],
        );
        assert!(Session::from_claims(claims).is_registry_admin());
    }

    #[test]
    fn system_session_is_always_admin() {
        assert!(Session::system().is_registry_admin());
        assert!(Session::system().permissions().is_empty());
    }
}
