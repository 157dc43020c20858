use super::auth_model::{AccessError, Identity, Requirement, Role};

/// Checks a caller against a requirement.
///
/// `session` is whatever the session lookup produced: `None` when there is no
/// valid session. Returns the validated identity on success.
pub fn authorize(
    session: Option<&Identity>,
    requirement: Requirement,
) -> Result<Identity, AccessError> {
    let identity = session.ok_or(AccessError::Unauthenticated)?;

    match requirement {
        Requirement::Authenticated => {}
        Requirement::VerifiedEmail => {
            if !identity.email_verified {
                return Err(AccessError::Forbidden(
                    "Email address must be verified".to_string(),
                ));
            }
        }
        Requirement::Role(Role::User) => {}
        Requirement::Role(Role::Admin) => {
            if !identity.is_admin() {
                return Err(AccessError::Forbidden(
                    "Administrator role required".to_string(),
                ));
            }
        }
    }

    Ok(identity.clone())
}

/// Per-record check for data owned by a single user.
pub fn ensure_owner_or_admin(identity: &Identity, owner_id: &str) -> Result<(), AccessError> {
    if identity.is_admin() || identity.user_id == owner_id {
        Ok(())
    } else {
        Err(AccessError::Forbidden(
            "Record belongs to another user".to_string(),
        ))
    }
}
