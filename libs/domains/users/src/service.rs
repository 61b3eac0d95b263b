//! User Service - Business logic layer

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum_helpers::Role;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{LoginRequest, RegisterRequest, User, normalize_email};
use crate::repository::UserRepository;
use crate::seed::AdminSeed;

pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a customer account
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterRequest) -> UserResult<User> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let email = normalize_email(&input.email);
        if self.repository.get_by_email(&email).await?.is_some() {
            return Err(UserError::DuplicateEmail(email));
        }

        let password_hash = hash_password(&input.password)?;
        let user = User::new(&input.username, &email, password_hash, Role::Customer);
        self.repository.create(user).await
    }

    /// Unknown email and wrong password are indistinguishable to the caller
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginRequest) -> UserResult<User> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let user = self
            .repository
            .get_by_email(&normalize_email(&input.email))
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !verify_password(&input.password, &user.password_hash) {
            tracing::warn!(user_id = %user.id, "Failed login attempt");
            return Err(UserError::InvalidCredentials);
        }

        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn update_role(&self, id: Uuid, role: Role) -> UserResult<User> {
        let mut user = self.get_user(id).await?;
        user.role = role;
        user.updated_at = chrono::Utc::now();

        let user = self.repository.update(user).await?;
        tracing::info!(user_id = %id, role = %role, "User role updated");
        Ok(user)
    }

    /// Create the configured admin unless that email already exists.
    /// Returns the created user.
    #[instrument(skip(self, seed), fields(email = %seed.email))]
    pub async fn seed_admin(&self, seed: &AdminSeed) -> UserResult<Option<User>> {
        let email = normalize_email(&seed.email);
        if self.repository.get_by_email(&email).await?.is_some() {
            tracing::debug!("Admin account already present");
            return Ok(None);
        }

        let request = RegisterRequest {
            username: seed.username.clone(),
            email: email.clone(),
            password: seed.password.clone(),
        };
        request
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let password_hash = hash_password(&seed.password)?;
        let admin = User::new(&seed.username, &email, password_hash, Role::Admin);
        let admin = self.repository.create(admin).await?;
        tracing::info!(user_id = %admin.id, "Seeded admin account");
        Ok(Some(admin))
    }
}

fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
