//! Authorization engine.
//!
//! Three short-circuiting checks decide whether a session may perform an
//! action on a resource: the admin bypass, the public-action allowlist for
//! anonymous callers, and per-permission matching. Unauthenticated and
//! forbidden outcomes are distinct error kinds so the transport layer can
//! map them to 401 versus 403.

mod session;

pub use session::{session_from_bearer, Principal, Session};

use thiserror::Error;

use crate::permissions::Action;

/// Actions an unauthenticated caller may perform.
///
/// `delete` and `deploy` are here under the current permissive local policy
/// ("allow everything until finer authz lands"); `edit` is intentionally
/// excluded. Revisit before treating this list as a stable contract.
pub const PUBLIC_ACTIONS: &[Action] = &[
    Action::Read,
    Action::Push,
    Action::Publish,
    Action::Delete,
    Action::Deploy,
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthzError {
    /// No session at all and the action is not public (401-equivalent).
    #[error("authentication required")]
    Unauthenticated,
    /// A session is present but holds no matching grant (403-equivalent).
    #[error("insufficient permissions")]
    Forbidden,
}

/// Decide whether `session` may perform `action` on `resource`.
///
/// Admin sessions (the system sentinel or any global `"*"` grant) are
/// allowed unconditionally. Anonymous callers are allowed the public
/// actions. Everyone else needs at least one permission whose action equals
/// the requested verb and whose pattern matches the resource.
///
/// # Errors
///
/// [`AuthzError::Unauthenticated`] when no session is present and the
/// action is not public; [`AuthzError::Forbidden`] when the session holds
/// no matching grant.
pub fn authorize(
    session: Option<&Session>,
    action: Action,
    resource: &str,
) -> Result<(), AuthzError> {
    if session.is_some_and(Session::is_registry_admin) {
        return Ok(());
    }
    let Some(session) = session else {
        if PUBLIC_ACTIONS.contains(&action) {
            return Ok(());
        }
        return Err(AuthzError::Unauthenticated);
    };
    let allowed = session
        .permissions()
        .iter()
        .any(|permission| permission.action == action && permission.matches(resource));
    if allowed {
        Ok(())
    } else {
        Err(AuthzError::Forbidden)
    }
}
