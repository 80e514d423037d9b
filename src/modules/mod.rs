pub mod auth;
pub mod cfo;
pub mod health;
pub mod persons;
pub mod users;

use std::sync::Arc;

use actix_web::web;
use sqlx::MySqlPool;

use crate::config::AuthConfig;
use crate::middleware::{json_config, query_config};

use auth::{AuthService, TokenService};
use cfo::{CfoService, FixtureSource};
use persons::{AddressRepository, AddressService, PersonRepository, PersonService};
use users::{UserRepository, UserService};

/// Storage backends the services are built on
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub persons: Arc<dyn PersonRepository>,
    pub addresses: Arc<dyn AddressRepository>,
    pub fixtures: Arc<dyn FixtureSource>,
}

/// Shared service handles registered with every worker
#[derive(Clone)]
pub struct AppServices {
    pub auth: web::Data<AuthService>,
    pub users: web::Data<UserService>,
    pub persons: web::Data<PersonService>,
    pub addresses: web::Data<AddressService>,
    pub cfo: web::Data<CfoService>,
    pub pool: Option<web::Data<MySqlPool>>,
}

impl AppServices {
    pub fn new(repos: Repositories, auth_config: &AuthConfig) -> Self {
        let auth = AuthService::new(
            repos.users.clone(),
            TokenService::from_config(auth_config),
            auth_config.cookies.clone(),
        );

        Self {
            auth: web::Data::new(auth),
            users: web::Data::new(UserService::new(repos.users)),
            persons: web::Data::new(PersonService::new(repos.persons, repos.addresses.clone())),
            addresses: web::Data::new(AddressService::new(repos.addresses)),
            cfo: web::Data::new(CfoService::new(repos.fixtures)),
            pool: None,
        }
    }

    /// Expose the pool to the readiness probe
    pub fn with_pool(mut self, pool: MySqlPool) -> Self {
        self.pool = Some(web::Data::new(pool));
        self
    }

    /// Register app data, probes and the `/api` routes
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(json_config())
            .app_data(query_config())
            .app_data(self.auth.clone())
            .app_data(self.users.clone())
            .app_data(self.persons.clone())
            .app_data(self.addresses.clone())
            .app_data(self.cfo.clone());

        if let Some(pool) = &self.pool {
            cfg.app_data(pool.clone());
        }

        health::configure(cfg);

        cfg.service(
            web::scope("/api")
                .configure(auth::configure)
                .configure(users::configure)
                .configure(persons::configure)
                .configure(cfo::configure),
        );
    }
}
