use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::{contains_ignore_case, deserialize_some, AppError, Result};
use crate::modules::persons::models::{Address, AddressInput};
use crate::modules::users::models::validate_email;

pub const SEX_MALE: i32 = 1;
pub const SEX_FEMALE: i32 = 2;

/// Person record as stored; addresses are referenced by id
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Person {
    pub id: i64,
    pub last_name: Option<String>,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub full_name: String,
    pub photo: Option<String>,
    pub email: Option<String>,
    pub registration_address_id: Option<i64>,
    pub actual_address_id: Option<i64>,
    pub sex: Option<i32>,
    pub birthday: Option<NaiveDate>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Person {
    /// Recompute `full_name` from the name parts
    pub fn refresh_full_name(&mut self) {
        self.full_name = build_full_name(
            self.last_name.as_deref(),
            &self.first_name,
            self.middle_name.as_deref(),
        );
    }
}

/// Non-empty parts of last, first and middle name joined by single spaces
pub fn build_full_name(last_name: Option<&str>, first_name: &str, middle_name: Option<&str>) -> String {
    [last_name, Some(first_name), middle_name]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Person body for create, full and partial update.
///
/// A nested address object is upserted; `null` or absence leaves the
/// current address alone. `*_address_id` links an existing address, and
/// `null` there unlinks it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonInput {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub last_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub middle_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub photo: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub sex: Option<Option<i32>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub birthday: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub registration_address: Option<AddressInput>,
    #[serde(default)]
    pub actual_address: Option<AddressInput>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub registration_address_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub actual_address_id: Option<Option<i64>>,
}

impl PersonInput {
    /// Copy scalar fields onto `person` and recompute `full_name`.
    ///
    /// Address fields are left to the caller. With `partial` unset
    /// `first_name` must be present.
    pub fn apply_scalars(&mut self, person: &mut Person, partial: bool) -> Result<()> {
        match self.first_name.take() {
            Some(first_name) => {
                let first_name = first_name.trim();
                if first_name.is_empty() {
                    return Err(AppError::validation("first_name may not be blank"));
                }
                person.first_name = first_name.to_string();
            }
            None if !partial => return Err(AppError::validation("first_name is required")),
            None => {}
        }

        if let Some(last_name) = self.last_name.take() {
            person.last_name = trimmed(last_name);
        }
        if let Some(middle_name) = self.middle_name.take() {
            person.middle_name = trimmed(middle_name);
        }
        if let Some(photo) = self.photo.take() {
            person.photo = trimmed(photo);
        }
        if let Some(email) = self.email.take() {
            let email = trimmed(email);
            if let Some(email) = email.as_deref() {
                validate_email(email)?;
            }
            person.email = email;
        }
        if let Some(sex) = self.sex.take() {
            if let Some(value) = sex {
                if value != SEX_MALE && value != SEX_FEMALE {
                    return Err(AppError::validation("sex must be 1 (male) or 2 (female)"));
                }
            }
            person.sex = sex;
        }
        if let Some(birthday) = self.birthday.take() {
            person.birthday = birthday;
        }
        if let Some(description) = self.description.take() {
            person.description = description;
        }

        person.refresh_full_name();
        person.updated_at = Utc::now();
        Ok(())
    }
}

/// Blank strings are stored as null
fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Person with both addresses expanded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonResponse {
    pub id: i64,
    pub last_name: Option<String>,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub full_name: String,
    pub photo: Option<String>,
    pub email: Option<String>,
    pub registration_address: Option<Address>,
    pub actual_address: Option<Address>,
    pub sex: Option<i32>,
    pub birthday: Option<NaiveDate>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PersonResponse {
    pub fn new(
        person: Person,
        registration_address: Option<Address>,
        actual_address: Option<Address>,
    ) -> Self {
        Self {
            id: person.id,
            last_name: person.last_name,
            first_name: person.first_name,
            middle_name: person.middle_name,
            full_name: person.full_name,
            photo: person.photo,
            email: person.email,
            registration_address,
            actual_address,
            sex: person.sex,
            birthday: person.birthday,
            description: person.description,
            created_at: person.created_at,
            updated_at: person.updated_at,
        }
    }
}

/// GET /api/persons query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonListQuery {
    pub sex: Option<i32>,
    pub birthday: Option<NaiveDate>,
    /// Case-insensitive match against full name or email
    pub search: Option<String>,
}

impl PersonListQuery {
    pub fn matches(&self, person: &Person) -> bool {
        if self.sex.is_some() && person.sex != self.sex {
            return false;
        }
        if self.birthday.is_some() && person.birthday != self.birthday {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => {
                contains_ignore_case(&person.full_name, needle)
                    || person
                        .email
                        .as_deref()
                        .is_some_and(|email| contains_ignore_case(email, needle))
            }
            _ => true,
        }
    }
}
