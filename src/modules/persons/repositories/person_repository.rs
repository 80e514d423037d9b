use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::{AppError, Repository, Result};
use crate::modules::persons::models::Person;

const PERSON_COLUMNS: &str = r#"
    id, last_name, first_name, middle_name, full_name, photo, email,
    registration_address_id, actual_address_id, sex, birthday, description,
    created_at, updated_at
"#;

/// Person persistence
#[async_trait]
pub trait PersonRepository: Repository<Person, i64> {}

/// MySQL-backed person repository
#[derive(Clone)]
pub struct MySqlPersonRepository {
    pool: MySqlPool,
}

impl MySqlPersonRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Person, i64> for MySqlPersonRepository {
    async fn create(&self, person: Person) -> Result<Person> {
        let result = sqlx::query(
            r#"
            INSERT INTO persons (
                last_name, first_name, middle_name, full_name, photo, email,
                registration_address_id, actual_address_id, sex, birthday, description
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&person.last_name)
        .bind(&person.first_name)
        .bind(&person.middle_name)
        .bind(&person.full_name)
        .bind(&person.photo)
        .bind(&person.email)
        .bind(person.registration_address_id)
        .bind(person.actual_address_id)
        .bind(person.sex)
        .bind(person.birthday)
        .bind(&person.description)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id() as i64;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::internal("Created person could not be read back"))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Person>> {
        let person = sqlx::query_as::<_, Person>(&format!(
            "SELECT {} FROM persons WHERE id = ?",
            PERSON_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(person)
    }

    async fn update(&self, id: i64, person: Person) -> Result<Option<Person>> {
        sqlx::query(
            r#"
            UPDATE persons
            SET last_name = ?, first_name = ?, middle_name = ?, full_name = ?,
                photo = ?, email = ?, registration_address_id = ?, actual_address_id = ?,
                sex = ?, birthday = ?, description = ?
            WHERE id = ?
            "#,
        )
        .bind(&person.last_name)
        .bind(&person.first_name)
        .bind(&person.middle_name)
        .bind(&person.full_name)
        .bind(&person.photo)
        .bind(&person.email)
        .bind(person.registration_address_id)
        .bind(person.actual_address_id)
        .bind(person.sex)
        .bind(person.birthday)
        .bind(&person.description)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM persons WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<Person>> {
        let persons = sqlx::query_as::<_, Person>(&format!(
            "SELECT {} FROM persons ORDER BY id DESC",
            PERSON_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(persons)
    }
}

impl PersonRepository for MySqlPersonRepository {}
