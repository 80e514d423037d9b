use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::MySqlPool;

use crate::core::{AppError, Repository, Result};
use crate::modules::persons::models::{Address, AddressRow};

const ADDRESS_COLUMNS: &str = r#"
    id, country, city, address_line, address_line_extra, state, zipcode, area,
    dadata, created_at, updated_at
"#;

/// Address persistence
#[async_trait]
pub trait AddressRepository: Repository<Address, i64> {}

/// MySQL-backed address repository
#[derive(Clone)]
pub struct MySqlAddressRepository {
    pool: MySqlPool,
}

impl MySqlAddressRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Address, i64> for MySqlAddressRepository {
    async fn create(&self, address: Address) -> Result<Address> {
        let result = sqlx::query(
            r#"
            INSERT INTO addresses (
                country, city, address_line, address_line_extra, state, zipcode, area, dadata
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&address.country)
        .bind(&address.city)
        .bind(&address.address_line)
        .bind(&address.address_line_extra)
        .bind(&address.state)
        .bind(&address.zipcode)
        .bind(&address.area)
        .bind(Json(&address.dadata))
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id() as i64;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::internal("Created address could not be read back"))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Address>> {
        let row = sqlx::query_as::<_, AddressRow>(&format!(
            "SELECT {} FROM addresses WHERE id = ?",
            ADDRESS_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Address::from))
    }

    async fn update(&self, id: i64, address: Address) -> Result<Option<Address>> {
        sqlx::query(
            r#"
            UPDATE addresses
            SET country = ?, city = ?, address_line = ?, address_line_extra = ?,
                state = ?, zipcode = ?, area = ?, dadata = ?
            WHERE id = ?
            "#,
        )
        .bind(&address.country)
        .bind(&address.city)
        .bind(&address.address_line)
        .bind(&address.address_line_extra)
        .bind(&address.state)
        .bind(&address.zipcode)
        .bind(&address.area)
        .bind(Json(&address.dadata))
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        // Person references are nulled by the foreign key
        let result = sqlx::query("DELETE FROM addresses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<Address>> {
        let rows = sqlx::query_as::<_, AddressRow>(&format!(
            "SELECT {} FROM addresses ORDER BY id DESC",
            ADDRESS_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Address::from).collect())
    }
}

impl AddressRepository for MySqlAddressRepository {}
