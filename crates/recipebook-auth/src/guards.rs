//! Permission checks and the ownership guard.
//!
//! Both are plain predicates over a verified [`Claims`] value, so they can be
//! composed at the request boundary (permission extractors) and again inside
//! a service when an elevated permission decides ownership.

use crate::claims::Claims;
use crate::error::AuthError;

/// Succeeds when the claim set grants `permission`.
pub fn check_permission(permission: &str, claims: &Claims) -> Result<(), AuthError> {
    let Some(granted) = claims.permissions.as_ref() else {
        return Err(AuthError::PermissionsMissing);
    };

    if granted.iter().any(|p| p == permission) {
        Ok(())
    } else {
        Err(AuthError::PermissionDenied(permission.to_string()))
    }
}

/// Allows the caller to act on a resource owned by `owner`.
///
/// Access is granted when the caller is the owner or holds the `elevated`
/// permission (e.g. `update:any-recipe`); otherwise fails with `denial`.
pub fn ensure_owner_or(
    claims: &Claims,
    owner: &str,
    elevated: &str,
    denial: &str,
) -> Result<(), AuthError> {
    if claims.owner() == owner || check_permission(elevated, claims).is_ok() {
        return Ok(());
    }

    tracing::debug!(caller = %claims.owner(), owner = %owner, permission = %elevated, "ownership check denied");
    Err(AuthError::OwnershipViolation(denial.to_string()))
}
