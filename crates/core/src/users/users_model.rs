//! User domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::auth::{Identity, Role};
use crate::errors::{Error, Result};

/// Domain model representing a platform user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub email_verified: bool,
    pub created_at: NaiveDateTime,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Identity {
            user_id: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            email_verified: user.email_verified,
        }
    }
}

/// Input model for creating a user. `password_hash` is already hashed by the caller.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub email_verified: bool,
}

/// A user together with its stored password hash, for login checks only.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Trims and lowercases an email address, rejecting obviously invalid input.
pub fn normalize_email(raw: &str) -> Result<String> {
    let email = raw.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(Error::invalid_input(format!("Invalid email address '{raw}'"))),
    }
}
