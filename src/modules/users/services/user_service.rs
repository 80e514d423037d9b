use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::auth::services::hash_password;
use crate::modules::users::models::{
    validate_email, CreateUserRequest, Role, UpdateUserRequest, User, UserResponse,
};
use crate::modules::users::repositories::UserRepository;

/// Service for user management business logic
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    /// All users ordered by id
    pub async fn list_users(&self) -> Result<Vec<UserResponse>> {
        let mut users = self.user_repo.list().await?;
        users.sort_by_key(|user| user.id);
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn get_user(&self, id: i64) -> Result<UserResponse> {
        Ok(self.find_user(id).await?.into())
    }

    /// Create a user, hashing the password when one is given
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<UserResponse> {
        let email = normalize_email(&request.email)?;
        self.ensure_email_available(&email, None).await?;

        let now = Utc::now();
        let user = User {
            id: 0,
            email,
            first_name: request.first_name.unwrap_or_default(),
            last_name: request.last_name.unwrap_or_default(),
            role: request.role.unwrap_or_default(),
            is_active: request.is_active.unwrap_or(true),
            is_staff: request.is_staff.unwrap_or(false),
            password_hash: hash_optional_password(request.password.as_deref())?,
            created_at: now,
            updated_at: now,
        };

        let created = self.user_repo.create(user).await?;
        info!(user_id = created.id, role = %created.role, "User created");

        Ok(created.into())
    }

    /// Apply the provided fields; absent fields keep their current value
    pub async fn update_user(&self, id: i64, request: UpdateUserRequest) -> Result<UserResponse> {
        let mut user = self.find_user(id).await?;

        if let Some(email) = request.email {
            let email = normalize_email(&email)?;
            if email != user.email {
                self.ensure_email_available(&email, Some(id)).await?;
            }
            user.email = email;
        }
        if let Some(first_name) = request.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = request.last_name {
            user.last_name = last_name;
        }
        if let Some(role) = request.role {
            user.role = role;
        }
        if let Some(is_active) = request.is_active {
            user.is_active = is_active;
        }
        if let Some(is_staff) = request.is_staff {
            user.is_staff = is_staff;
        }
        if let Some(hash) = hash_optional_password(request.password.as_deref())? {
            user.password_hash = Some(hash);
        }
        user.updated_at = Utc::now();

        let updated = self
            .user_repo
            .update(id, user)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {}", id)))?;

        info!(user_id = id, "User updated");
        Ok(updated.into())
    }

    pub async fn delete_user(&self, id: i64) -> Result<()> {
        if !self.user_repo.delete(id).await? {
            return Err(AppError::not_found(format!("User {}", id)));
        }

        info!(user_id = id, "User deleted");
        Ok(())
    }

    /// Create the configured admin account unless the email is already taken
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<bool> {
        let email = normalize_email(email)?;
        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Ok(false);
        }

        self.create_user(CreateUserRequest {
            email,
            first_name: None,
            last_name: None,
            role: Some(Role::Admin),
            is_active: Some(true),
            is_staff: Some(true),
            password: Some(password.to_string()),
        })
        .await?;

        Ok(true)
    }

    async fn find_user(&self, id: i64) -> Result<User> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {}", id)))
    }

    async fn ensure_email_available(&self, email: &str, current_id: Option<i64>) -> Result<()> {
        match self.user_repo.find_by_email(email).await? {
            Some(existing) if Some(existing.id) != current_id => Err(AppError::validation(
                "user with this email already exists",
            )),
            _ => Ok(()),
        }
    }
}

fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AppError::validation("Email is required"));
    }
    validate_email(email)?;
    Ok(email.to_string())
}

fn hash_optional_password(password: Option<&str>) -> Result<Option<String>> {
    match password {
        Some(password) if !password.is_empty() => Ok(Some(hash_password(password)?)),
        _ => Ok(None),
    }
}

// Service behaviour over HTTP is covered in tests/contract/users_api_test.rs
