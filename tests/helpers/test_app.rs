// Test Application
//
// Builds the real service graph over in-memory repositories and a
// temporary fixture directory.

use std::sync::Arc;

use actix_web::http::header;
use tempfile::TempDir;

use finconsole::modules::auth::TokenType;
use finconsole::modules::cfo::FileFixtureStore;
use finconsole::modules::persons::Person;
use finconsole::modules::users::models::CreateUserRequest;
use finconsole::modules::users::{Role, User};
use finconsole::{AppServices, Repositories};

use super::in_memory::{InMemoryAddressRepository, InMemoryRepository, InMemoryUserRepository};
use super::test_data::*;

pub struct TestContext {
    pub services: AppServices,
    pub users: Arc<InMemoryUserRepository>,
    pub persons: Arc<InMemoryRepository<Person>>,
    pub data_dir: TempDir,
    pub admin: User,
    pub user: User,
}

impl TestContext {
    /// Services with one admin and one regular user
    pub async fn seeded() -> Self {
        let data_dir = fixture_dir();
        let users = Arc::new(InMemoryUserRepository::new());
        let persons = Arc::new(InMemoryRepository::<Person>::new());

        let repositories = Repositories {
            users: users.clone(),
            persons: persons.clone(),
            addresses: Arc::new(InMemoryAddressRepository::new(persons.clone())),
            fixtures: Arc::new(FileFixtureStore::new(data_dir.path())),
        };
        let services = AppServices::new(repositories, &test_auth_config());

        services
            .users
            .ensure_admin(ADMIN_EMAIL, ADMIN_PASSWORD)
            .await
            .unwrap();
        services
            .users
            .create_user(CreateUserRequest {
                email: USER_EMAIL.to_string(),
                first_name: Some("Clerk".to_string()),
                last_name: None,
                role: Some(Role::User),
                is_active: Some(true),
                is_staff: None,
                password: Some(USER_PASSWORD.to_string()),
            })
            .await
            .unwrap();

        let admin = find_user(&users, ADMIN_EMAIL).await;
        let user = find_user(&users, USER_EMAIL).await;

        Self {
            services,
            users,
            persons,
            data_dir,
            admin,
            user,
        }
    }

    pub fn token_for(&self, user: &User, token_type: TokenType) -> String {
        self.services.auth.tokens().issue(user, token_type).unwrap()
    }

    pub fn admin_token(&self) -> String {
        self.token_for(&self.admin, TokenType::Access)
    }

    pub fn user_token(&self) -> String {
        self.token_for(&self.user, TokenType::Access)
    }
}

async fn find_user(users: &InMemoryUserRepository, email: &str) -> User {
    use finconsole::modules::users::UserRepository;
    users.find_by_email(email).await.unwrap().unwrap()
}

/// `Authorization: Bearer <token>` header pair
pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}
