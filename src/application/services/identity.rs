//! Identity service — registration, login and profile upkeep
//!
//! All user-related business logic lives here; callers are thin
//! wrappers that delegate to this service.

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, DomainResult, NewUser, RepositoryProvider, User, UserRole};
use crate::infrastructure::crypto::password::{hash_password, verify_password};

pub struct IdentityService {
    repos: Arc<dyn RepositoryProvider>,
}

impl IdentityService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new account (default role: User)
    pub async fn register(&self, username: &str, email: &str, password: &str) -> DomainResult<User> {
        self.create_account(username, email, password, UserRole::User)
            .await
    }

    /// Create an account with an explicit role
    pub async fn create_account(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> DomainResult<User> {
        if username.len() < 3 || username.len() > 50 {
            return Err(DomainError::Validation(
                "Username must be 3-50 characters".into(),
            ));
        }
        if password.len() < 8 {
            return Err(DomainError::Validation(
                "Password must be at least 8 characters".into(),
            ));
        }
        if !email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".into()));
        }

        if self.repos.users().find_by_username(username).await?.is_some() {
            return Err(DomainError::Conflict("Username already exists".into()));
        }
        if self.repos.users().find_by_email(email).await?.is_some() {
            return Err(DomainError::Conflict("Email already exists".into()));
        }

        let password_hash = hash_password(password)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;

        let user = self
            .repos
            .users()
            .create(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
                role,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "New user registered");
        Ok(user)
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by username + password
    pub async fn authenticate(&self, username: &str, password: &str) -> DomainResult<User> {
        let Some(user) = self.repos.users().find_by_username(username).await? else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        Ok(user)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        self.repos.users().find_by_id(id).await
    }

    pub async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        self.repos.users().find_by_username(username).await
    }

    /// Substring search over username and email
    pub async fn search_users(&self, keyword: &str) -> DomainResult<Vec<User>> {
        self.repos.users().search(keyword).await
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Update profile fields, keeping username and email unique
    pub async fn update_profile(
        &self,
        user_id: &str,
        username: &str,
        email: &str,
    ) -> DomainResult<User> {
        if username.len() < 3 || username.len() > 50 {
            return Err(DomainError::Validation(
                "Username must be 3-50 characters".into(),
            ));
        }
        if !email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".into()));
        }

        if let Some(other) = self.repos.users().find_by_username(username).await? {
            if other.id != user_id {
                return Err(DomainError::Conflict("Username already taken".into()));
            }
        }
        if let Some(other) = self.repos.users().find_by_email(email).await? {
            if other.id != user_id {
                return Err(DomainError::Conflict("Email already taken".into()));
            }
        }

        let user = self
            .repos
            .users()
            .update_profile(user_id, username, email)
            .await?;
        info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }

    /// Delete an account and its reservations; spots still held by an
    /// active reservation are freed
    pub async fn delete_user(&self, user_id: &str) -> DomainResult<()> {
        self.repos.users().delete_cascade(user_id).await?;
        info!(user_id, "User deleted");
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
