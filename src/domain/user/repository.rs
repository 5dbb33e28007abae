//! User repository interface

use async_trait::async_trait;

use super::model::{User, UserRole};
use crate::domain::DomainResult;

/// Fields required to persist a new account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account and return it with its generated id
    async fn create(&self, user: NewUser) -> DomainResult<User>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// Substring search over username and email
    async fn search(&self, keyword: &str) -> DomainResult<Vec<User>>;

    async fn count(&self) -> DomainResult<u64>;

    /// Change username and email
    async fn update_profile(&self, id: &str, username: &str, email: &str) -> DomainResult<User>;

    /// Delete the account together with its reservations.
    ///
    /// Spots still held by an active reservation of this account are
    /// freed in the same unit.
    async fn delete_cascade(&self, id: &str) -> DomainResult<()>;
}
