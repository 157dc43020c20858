use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::users_model::{normalize_email, NewUser, User, UserCredentials};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::auth::{Identity, Role};
use crate::errors::{DatabaseError, Error, Result};
use crate::events::{DomainEvent, DomainEventSink};

/// Service for managing users
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            event_sink,
        }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, mut new_user: NewUser) -> Result<User> {
        new_user.email = normalize_email(&new_user.email)?;
        if new_user.password_hash.is_empty() {
            return Err(Error::invalid_input("Password hash cannot be empty"));
        }
        if self.repository.find_by_email(&new_user.email)?.is_some() {
            return Err(Error::Database(DatabaseError::UniqueViolation(format!(
                "A user with email {} already exists",
                new_user.email
            ))));
        }

        let user = self.repository.insert_user(new_user).await?;
        info!("Registered user {} ({})", user.id, user.role);
        self.event_sink.emit(DomainEvent::UserRegistered {
            user_id: user.id.clone(),
            email: user.email.clone(),
        });
        Ok(user)
    }

    fn get_identity(&self, user_id: &str) -> Result<Option<Identity>> {
        match self.repository.get_user(user_id) {
            Ok(user) => Ok(Some(Identity::from(&user))),
            Err(Error::Database(DatabaseError::NotFound(_))) => {
                debug!("Session refers to unknown user {}", user_id);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>> {
        let email = normalize_email(email)?;
        self.repository.find_by_email(&email)
    }

    fn list_users(&self) -> Result<Vec<User>> {
        self.repository.list_users()
    }

    async fn verify_email(&self, user_id: String) -> Result<User> {
        self.repository.set_email_verified(user_id, true).await
    }

    async fn set_role(&self, user_id: String, role: Role) -> Result<User> {
        let user = self.repository.set_role(user_id, role).await?;
        info!("User {} now has role {}", user.id, user.role);
        Ok(user)
    }

    async fn ensure_admin(&self, email: &str, password_hash: &str) -> Result<User> {
        let email = normalize_email(email)?;
        if let Some(existing) = self.repository.find_by_email(&email)? {
            let user = existing.user;
            if user.role == Role::Admin
                && user.email_verified
                && existing.password_hash == password_hash
            {
                return Ok(user);
            }
            if user.role != Role::Admin {
                warn!(
                    "Bootstrap email {} belongs to a {} account, promoting it",
                    user.email, user.role
                );
            }
            let promoted = self
                .repository
                .promote_to_admin(user.id, password_hash.to_string())
                .await?;
            info!("Administrator {} synced with configuration", promoted.email);
            return Ok(promoted);
        }
        let user = self
            .repository
            .insert_user(NewUser {
                email,
                password_hash: password_hash.to_string(),
                role: Role::Admin,
                email_verified: true,
            })
            .await?;
        info!("Bootstrapped administrator {}", user.email);
        Ok(user)
    }
}
