//! Database models for users.

use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::errors::StorageError;
use terravest_core::auth::Role;
use terravest_core::users::{NewUser, User, UserCredentials};

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub email_verified: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUserDB {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub email_verified: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl NewUserDB {
    pub fn from_domain(id: String, user: NewUser, now: NaiveDateTime) -> Self {
        Self {
            id,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role.as_str().to_string(),
            email_verified: user.email_verified,
            created_at: now,
            updated_at: now,
        }
    }
}

impl TryFrom<UserDB> for UserCredentials {
    type Error = StorageError;

    fn try_from(db: UserDB) -> Result<Self, Self::Error> {
        let role = Role::from_str(&db.role).map_err(StorageError::CorruptValue)?;
        Ok(UserCredentials {
            user: User {
                id: db.id,
                email: db.email,
                role,
                email_verified: db.email_verified,
                created_at: db.created_at,
            },
            password_hash: db.password_hash,
        })
    }
}

impl TryFrom<UserDB> for User {
    type Error = StorageError;

    fn try_from(db: UserDB) -> Result<Self, Self::Error> {
        UserCredentials::try_from(db).map(|c| c.user)
    }
}
