use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::{AppError, Repository, Result};
use crate::modules::users::models::{User, UserRow};

const USER_COLUMNS: &str = r#"
    id, email, first_name, last_name, role, is_active, is_staff,
    password_hash, created_at, updated_at
"#;

/// User persistence; adds the email lookup used by login
#[async_trait]
pub trait UserRepository: Repository<User, i64> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
}

/// MySQL-backed user repository
#[derive(Clone)]
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<User, i64> for MySqlUserRepository {
    async fn create(&self, user: User) -> Result<User> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (
                email, first_name, last_name, role, is_active, is_staff, password_hash
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.role.to_string())
        .bind(user.is_active)
        .bind(user.is_staff)
        .bind(&user.password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_unique_violation(e, "user with this email already exists"))?;

        let id = result.last_insert_id() as i64;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::internal("Created user could not be read back"))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = ?",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn update(&self, id: i64, user: User) -> Result<Option<User>> {
        sqlx::query(
            r#"
            UPDATE users
            SET email = ?, first_name = ?, last_name = ?, role = ?,
                is_active = ?, is_staff = ?, password_hash = ?
            WHERE id = ?
            "#,
        )
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.role.to_string())
        .bind(user.is_active)
        .bind(user.is_staff)
        .bind(&user.password_hash)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_unique_violation(e, "user with this email already exists"))?;

        // MySQL reports zero affected rows when nothing changed, so existence is checked by re-reading
        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users ORDER BY id",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(User::try_from).collect()
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE email = ?",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }
}
