use crate::auth::{Identity, Role};
use crate::errors::Result;
use crate::users::users_model::{NewUser, User, UserCredentials};
use async_trait::async_trait;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn get_user(&self, user_id: &str) -> Result<User>;
    fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>>;
    fn list_users(&self) -> Result<Vec<User>>;
    async fn insert_user(&self, new_user: NewUser) -> Result<User>;
    async fn set_email_verified(&self, user_id: String, verified: bool) -> Result<User>;
    async fn set_role(&self, user_id: String, role: Role) -> Result<User>;
    /// Grants the admin role, marks the email verified and replaces the
    /// password hash, all in one write.
    async fn promote_to_admin(&self, user_id: String, password_hash: String) -> Result<User>;
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, new_user: NewUser) -> Result<User>;
    /// Session lookup: the current identity for a user id, if the user still exists.
    fn get_identity(&self, user_id: &str) -> Result<Option<Identity>>;
    fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>>;
    fn list_users(&self) -> Result<Vec<User>>;
    async fn verify_email(&self, user_id: String) -> Result<User>;
    async fn set_role(&self, user_id: String, role: Role) -> Result<User>;
    /// Makes sure the account for `email` exists as a verified administrator
    /// that signs in with `password_hash`, creating or promoting it as needed.
    async fn ensure_admin(&self, email: &str, password_hash: &str) -> Result<User>;
}
