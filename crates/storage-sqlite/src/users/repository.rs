use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use super::model::{NewUserDB, UserDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::users;
use terravest_core::auth::Role;
use terravest_core::users::{NewUser, User, UserCredentials, UserRepositoryTrait};
use terravest_core::{Error, Result};

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        UserRepository { pool, writer }
    }
}

fn load_user(conn: &mut SqliteConnection, user_id: &str) -> Result<User> {
    let row = users::table
        .find(user_id)
        .select(UserDB::as_select())
        .first(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| Error::not_found(format!("User {user_id}")))?;
    Ok(User::try_from(row)?)
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn get_user(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        load_user(&mut conn, user_id)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>> {
        let mut conn = get_connection(&self.pool)?;
        let row = users::table
            .filter(users::email.eq(email))
            .select(UserDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?;
        row.map(UserCredentials::try_from)
            .transpose()
            .map_err(Into::into)
    }

    fn list_users(&self) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = users::table
            .order(users::created_at.asc())
            .select(UserDB::as_select())
            .load(&mut conn)
            .into_core()?;
        rows.into_iter()
            .map(|row| User::try_from(row).map_err(Into::into))
            .collect()
    }

    async fn insert_user(&self, new_user: NewUser) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let row = NewUserDB::from_domain(
                    Uuid::new_v4().to_string(),
                    new_user,
                    Utc::now().naive_utc(),
                );
                let inserted = diesel::insert_into(users::table)
                    .values(&row)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(User::try_from(inserted)?)
            })
            .await
    }

    async fn set_email_verified(&self, user_id: String, verified: bool) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                diesel::update(users::table.find(&user_id))
                    .set((
                        users::email_verified.eq(verified),
                        users::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                load_user(conn, &user_id)
            })
            .await
    }

    async fn set_role(&self, user_id: String, role: Role) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                diesel::update(users::table.find(&user_id))
                    .set((
                        users::role.eq(role.as_str()),
                        users::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                load_user(conn, &user_id)
            })
            .await
    }

    async fn promote_to_admin(&self, user_id: String, password_hash: String) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                diesel::update(users::table.find(&user_id))
                    .set((
                        users::role.eq(Role::Admin.as_str()),
                        users::email_verified.eq(true),
                        users::password_hash.eq(password_hash),
                        users::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                load_user(conn, &user_id)
            })
            .await
    }
}
