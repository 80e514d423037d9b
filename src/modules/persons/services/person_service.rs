use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::core::{AppError, Result};
use crate::modules::persons::models::{
    Address, AddressInput, Person, PersonInput, PersonListQuery, PersonResponse,
};
use crate::modules::persons::repositories::{AddressRepository, PersonRepository};

/// Person management, including the nested address upserts
pub struct PersonService {
    person_repo: Arc<dyn PersonRepository>,
    address_repo: Arc<dyn AddressRepository>,
}

impl PersonService {
    pub fn new(
        person_repo: Arc<dyn PersonRepository>,
        address_repo: Arc<dyn AddressRepository>,
    ) -> Self {
        Self {
            person_repo,
            address_repo,
        }
    }

    /// Newest first, narrowed by the query filters
    pub async fn list_persons(&self, query: &PersonListQuery) -> Result<Vec<PersonResponse>> {
        let mut persons = self.person_repo.list().await?;
        persons.retain(|person| query.matches(person));
        persons.sort_by(|a, b| b.id.cmp(&a.id));

        let addresses: HashMap<i64, Address> = self
            .address_repo
            .list()
            .await?
            .into_iter()
            .map(|address| (address.id, address))
            .collect();

        debug!(count = persons.len(), "Listing persons");

        Ok(persons
            .into_iter()
            .map(|person| {
                let registration = person
                    .registration_address_id
                    .and_then(|id| addresses.get(&id).cloned());
                let actual = person
                    .actual_address_id
                    .and_then(|id| addresses.get(&id).cloned());
                PersonResponse::new(person, registration, actual)
            })
            .collect())
    }

    pub async fn get_person(&self, id: i64) -> Result<PersonResponse> {
        let person = self.find_person(id).await?;
        self.expand(person).await
    }

    /// Create a person; nested addresses are always created fresh
    pub async fn create_person(&self, mut input: PersonInput) -> Result<PersonResponse> {
        let now = Utc::now();
        let mut person = Person {
            id: 0,
            last_name: None,
            first_name: String::new(),
            middle_name: None,
            full_name: String::new(),
            photo: None,
            email: None,
            registration_address_id: None,
            actual_address_id: None,
            sex: None,
            birthday: None,
            description: None,
            created_at: now,
            updated_at: now,
        };

        input.apply_scalars(&mut person, false)?;
        self.apply_addresses(&mut person, input, false).await?;

        let created = self.person_repo.create(person).await?;
        info!(person_id = created.id, "Person created");

        self.expand(created).await
    }

    /// Full (`partial == false`) or partial update
    pub async fn update_person(
        &self,
        id: i64,
        mut input: PersonInput,
        partial: bool,
    ) -> Result<PersonResponse> {
        let mut person = self.find_person(id).await?;

        input.apply_scalars(&mut person, partial)?;
        self.apply_addresses(&mut person, input, partial).await?;

        let updated = self
            .person_repo
            .update(id, person)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Person {}", id)))?;

        info!(person_id = id, "Person updated");
        self.expand(updated).await
    }

    /// Delete a person; its addresses stay
    pub async fn delete_person(&self, id: i64) -> Result<()> {
        if !self.person_repo.delete(id).await? {
            return Err(AppError::not_found(format!("Person {}", id)));
        }

        info!(person_id = id, "Person deleted");
        Ok(())
    }

    async fn find_person(&self, id: i64) -> Result<Person> {
        self.person_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Person {}", id)))
    }

    /// Links by id are applied first, then nested objects upsert into
    /// whatever address the person ends up pointing at.
    async fn apply_addresses(&self, person: &mut Person, input: PersonInput, partial: bool) -> Result<()> {
        if let Some(link) = input.registration_address_id {
            person.registration_address_id = self.linked_address(link).await?;
        }
        if let Some(link) = input.actual_address_id {
            person.actual_address_id = self.linked_address(link).await?;
        }

        if let Some(nested) = input.registration_address {
            let address = self
                .upsert_address(person.registration_address_id, nested, partial)
                .await?;
            person.registration_address_id = Some(address.id);
        }
        if let Some(nested) = input.actual_address {
            let address = self
                .upsert_address(person.actual_address_id, nested, partial)
                .await?;
            person.actual_address_id = Some(address.id);
        }

        Ok(())
    }

    async fn linked_address(&self, link: Option<i64>) -> Result<Option<i64>> {
        match link {
            None => Ok(None),
            Some(id) => match self.address_repo.find_by_id(id).await? {
                Some(_) => Ok(Some(id)),
                None => Err(AppError::validation(format!(
                    "Invalid address id {}: object does not exist",
                    id
                ))),
            },
        }
    }

    /// Update the current address in place, or create one when there is none
    async fn upsert_address(
        &self,
        current: Option<i64>,
        input: AddressInput,
        partial: bool,
    ) -> Result<Address> {
        let existing = match current {
            Some(id) => self.address_repo.find_by_id(id).await?,
            None => None,
        };

        match existing {
            Some(mut address) => {
                let id = address.id;
                input.apply_to(&mut address, partial)?;
                self.address_repo
                    .update(id, address)
                    .await?
                    .ok_or_else(|| AppError::not_found(format!("Address {}", id)))
            }
            None => {
                let address = self.address_repo.create(input.into_new_address()?).await?;
                debug!(address_id = address.id, "Nested address created");
                Ok(address)
            }
        }
    }

    async fn expand(&self, person: Person) -> Result<PersonResponse> {
        let registration = match person.registration_address_id {
            Some(id) => self.address_repo.find_by_id(id).await?,
            None => None,
        };
        let actual = match person.actual_address_id {
            Some(id) => self.address_repo.find_by_id(id).await?,
            None => None,
        };

        Ok(PersonResponse::new(person, registration, actual))
    }
}
