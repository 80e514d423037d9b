use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::core::{deserialize_some, AppError, Result};

/// Postal address; persons point at addresses, never the other way round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: i64,
    pub country: Option<String>,
    pub city: Option<String>,
    pub address_line: String,
    pub address_line_extra: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub area: Option<String>,
    /// Raw suggestion payload from the address lookup widget
    pub dadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw `addresses` row
#[derive(Debug, Clone, FromRow)]
pub struct AddressRow {
    pub id: i64,
    pub country: Option<String>,
    pub city: Option<String>,
    pub address_line: String,
    pub address_line_extra: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub area: Option<String>,
    pub dadata: Json<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Self {
            id: row.id,
            country: row.country,
            city: row.city,
            address_line: row.address_line,
            address_line_extra: row.address_line_extra,
            state: row.state,
            zipcode: row.zipcode,
            area: row.area,
            dadata: row.dadata.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Address body, standalone or nested inside a person.
///
/// Optional fields distinguish an explicit `null` from an absent key so a
/// partial update only touches what was sent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressInput {
    #[serde(default)]
    pub address_line: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub country: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub city: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub address_line_extra: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub state: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub zipcode: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub area: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub dadata: Option<Option<serde_json::Value>>,
}

impl AddressInput {
    /// Build a new address; `address_line` is mandatory here
    pub fn into_new_address(self) -> Result<Address> {
        let now = Utc::now();
        let mut address = Address {
            id: 0,
            country: None,
            city: None,
            address_line: String::new(),
            address_line_extra: None,
            state: None,
            zipcode: None,
            area: None,
            dadata: empty_object(),
            created_at: now,
            updated_at: now,
        };
        self.apply_to(&mut address, false)?;
        Ok(address)
    }

    /// Copy the provided fields onto `address`.
    ///
    /// With `partial` unset the address line must be present.
    pub fn apply_to(self, address: &mut Address, partial: bool) -> Result<()> {
        match self.address_line {
            Some(line) => address.address_line = validate_address_line(&line)?,
            None if !partial => return Err(AppError::validation("address_line is required")),
            None => {}
        }

        if let Some(country) = self.country {
            address.country = country;
        }
        if let Some(city) = self.city {
            address.city = city;
        }
        if let Some(extra) = self.address_line_extra {
            address.address_line_extra = extra;
        }
        if let Some(state) = self.state {
            address.state = state;
        }
        if let Some(zipcode) = self.zipcode {
            if zipcode.as_ref().is_some_and(|z| z.chars().count() > 32) {
                return Err(AppError::validation("zipcode must be at most 32 characters"));
            }
            address.zipcode = zipcode;
        }
        if let Some(area) = self.area {
            address.area = area;
        }
        if let Some(dadata) = self.dadata {
            address.dadata = dadata.unwrap_or_else(empty_object);
        }

        address.updated_at = Utc::now();
        Ok(())
    }
}

/// Trim and reject blank address lines
pub fn validate_address_line(line: &str) -> Result<String> {
    let line = line.trim();
    if line.is_empty() {
        return Err(AppError::validation("address_line may not be blank"));
    }
    Ok(line.to_string())
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}
