//! Namespace permissions over reverse-DNS resource patterns.
//!
//! Flow Overview: a proven domain is reversed into a prefix-matchable
//! namespace (`example.com` becomes `com.example`), granted as `publish`
//! permissions, carried inside token claims, and later matched by the
//! authorization engine. Reversed label order keeps parent/child namespace
//! relationships as plain string prefixes, so wildcard checks stay cheap.

use serde::{Deserialize, Serialize};

/// Resource pattern granting admin-equivalent access.
pub const GLOBAL_PATTERN: &str = "*";

/// Actions a permission can grant on registry resources.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Read,
    Push,
    Publish,
    Edit,
    Delete,
    Deploy,
}

impl Action {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Push => "push",
            Action::Publish => "publish",
            Action::Edit => "edit",
            Action::Delete => "delete",
            Action::Deploy => "deploy",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single grant: an action over a resource pattern.
///
/// The pattern is `"*"` (global), a literal resource name, or a
/// `"<prefix>*"` prefix wildcard. Permissions are immutable once built and
/// compared by exact tuple equality.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    pub action: Action,
    pub resource: String,
}

impl Permission {
    #[must_use]
    pub fn new(action: Action, resource: impl Into<String>) -> Self {
        Self {
            action,
            resource: resource.into(),
        }
    }

    /// Whether this permission's pattern covers the given resource name.
    ///
    /// Exact string match, or a prefix match when the pattern ends in `*`
    /// (the trailing `*` is stripped before comparing).
    #[must_use]
    pub fn matches(&self, resource: &str) -> bool {
        if self.resource == resource {
            return true;
        }
        self.resource
            .strip_suffix('*')
            .is_some_and(|prefix| resource.starts_with(prefix))
    }

    /// Whether the pattern is the global wildcard.
    #[must_use]
    pub fn is_global(&self) -> bool {
        self.resource == GLOBAL_PATTERN
    }
}

/// Reverse a domain's label order (`example.com` becomes `com.example`).
#[must_use]
pub fn reverse_domain(domain: &str) -> String {
    let mut labels: Vec<&str> = domain.split('.').collect();
    labels.reverse();
    labels.join(".")
}

/// Build the `publish` grants a verified domain owner receives.
///
/// The base grant covers the domain's own namespace (`com.example/*`).
/// When `include_subdomains` is set, a second grant covers reversed-domain
/// children (`com.example.*`, note the dot, matching e.g.
/// `com.example.sub/server`).
#[must_use]
pub fn permissions_for_domain(domain: &str, include_subdomains: bool) -> Vec<Permission> {
    let reversed = reverse_domain(domain);
    let mut permissions = vec![Permission::new(Action::Publish, format!("{reversed}/*"))];
    if include_subdomains {
        permissions.push(Permission::new(Action::Publish, format!("{reversed}.*")));
    }
    permissions
}
