// In-memory repositories
//
// Stand-ins for the MySQL repositories so HTTP tests run without a database.
// Ids come from a counter and are never reused.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use finconsole::core::{AppError, Repository, Result};
use finconsole::modules::persons::{Address, AddressRepository, Person, PersonRepository};
use finconsole::modules::users::{User, UserRepository};

/// Entity with a database-assigned id
pub trait HasId {
    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
}

impl HasId for User {
    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl HasId for Person {
    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl HasId for Address {
    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

pub struct InMemoryRepository<T> {
    rows: Mutex<BTreeMap<i64, T>>,
    next_id: AtomicI64,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl<T: Clone> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.rows.lock().unwrap().values().cloned().collect()
    }

    /// Apply `f` to every stored row in place
    pub fn modify_all(&self, mut f: impl FnMut(&mut T)) {
        for row in self.rows.lock().unwrap().values_mut() {
            f(row);
        }
    }
}

#[async_trait]
impl<T> Repository<T, i64> for InMemoryRepository<T>
where
    T: HasId + Clone + Send + Sync + 'static,
{
    async fn create(&self, mut entity: T) -> Result<T> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        entity.set_id(id);
        self.rows.lock().unwrap().insert(id, entity.clone());
        Ok(entity)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<T>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn update(&self, id: i64, mut entity: T) -> Result<Option<T>> {
        let mut rows = self.rows.lock().unwrap();
        if !rows.contains_key(&id) {
            return Ok(None);
        }
        entity.set_id(id);
        rows.insert(id, entity.clone());
        Ok(Some(entity))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }

    async fn list(&self) -> Result<Vec<T>> {
        Ok(self.snapshot())
    }
}

impl PersonRepository for InMemoryRepository<Person> {}

/// Addresses whose delete nulls the persons' links, like the
/// `ON DELETE SET NULL` foreign keys on `persons`
pub struct InMemoryAddressRepository {
    inner: InMemoryRepository<Address>,
    persons: Arc<InMemoryRepository<Person>>,
}

impl InMemoryAddressRepository {
    pub fn new(persons: Arc<InMemoryRepository<Person>>) -> Self {
        Self {
            inner: InMemoryRepository::new(),
            persons,
        }
    }
}

#[async_trait]
impl Repository<Address, i64> for InMemoryAddressRepository {
    async fn create(&self, address: Address) -> Result<Address> {
        self.inner.create(address).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Address>> {
        self.inner.find_by_id(id).await
    }

    async fn update(&self, id: i64, address: Address) -> Result<Option<Address>> {
        self.inner.update(id, address).await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        if !self.inner.delete(id).await? {
            return Ok(false);
        }
        self.persons.modify_all(|person| {
            if person.registration_address_id == Some(id) {
                person.registration_address_id = None;
            }
            if person.actual_address_id == Some(id) {
                person.actual_address_id = None;
            }
        });
        Ok(true)
    }

    async fn list(&self) -> Result<Vec<Address>> {
        self.inner.list().await
    }
}

impl AddressRepository for InMemoryAddressRepository {}

/// Users with the unique-email rule the `users` table enforces
#[derive(Default)]
pub struct InMemoryUserRepository {
    inner: InMemoryRepository<User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.inner
            .snapshot()
            .iter()
            .any(|user| user.email == email && Some(user.id) != except)
    }
}

#[async_trait]
impl Repository<User, i64> for InMemoryUserRepository {
    async fn create(&self, mut user: User) -> Result<User> {
        if self.email_taken(&user.email, None) {
            return Err(AppError::validation("user with this email already exists"));
        }
        let now = Utc::now();
        user.created_at = now;
        user.updated_at = now;
        self.inner.create(user).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        self.inner.find_by_id(id).await
    }

    async fn update(&self, id: i64, user: User) -> Result<Option<User>> {
        if self.email_taken(&user.email, Some(id)) {
            return Err(AppError::validation("user with this email already exists"));
        }
        self.inner.update(id, user).await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        self.inner.delete(id).await
    }

    async fn list(&self) -> Result<Vec<User>> {
        self.inner.list().await
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .inner
            .snapshot()
            .into_iter()
            .find(|user| user.email == email))
    }
}
