//! Registry token claims.

use serde::{Deserialize, Serialize};

use crate::auth::method::AuthMethod;
use crate::permissions::Permission;

/// Issuer written into minted tokens unless the caller sets one.
pub const DEFAULT_ISSUER: &str = "mcp-registry";

/// Token lifetime applied when the caller leaves `exp` unset.
pub const TOKEN_TTL_SECONDS: i64 = 300;

/// Claims carried by a registry JWT: the standard `iss`/`iat`/`exp`/`nbf`
/// set plus the registry's custom claims: the authentication method, its
/// subject (the proven domain), and the granted permissions.
///
/// Standard fields left as `None` are defaulted at issuance; validation
/// requires `exp` to be present. A claim set is built once per successful
/// exchange and never mutated or renewed; expiry means a fresh exchange.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegistryClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
    pub auth_method: AuthMethod,
    pub auth_method_sub: String,
    pub permissions: Vec<Permission>,
}

impl RegistryClaims {
    /// Claims for a fresh exchange; standard fields are filled in by the
    /// issuer at signing time.
    #[must_use]
    pub fn new(
        auth_method: AuthMethod,
        auth_method_sub: impl Into<String>,
        permissions: Vec<Permission>,
    ) -> Self {
        Self {
            iss: None,
            iat: None,
            exp: None,
            nbf: None,
            auth_method,
            auth_method_sub: auth_method_sub.into(),
            permissions,
        }
    }
}
