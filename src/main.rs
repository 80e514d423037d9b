use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http::header, middleware::NormalizePath, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use finconsole::config::{Config, DatabaseConfig};
use finconsole::middleware::{RateLimiter, RequestId};
use finconsole::modules::cfo::FileFixtureStore;
use finconsole::modules::persons::{MySqlAddressRepository, MySqlPersonRepository};
use finconsole::modules::users::MySqlUserRepository;
use finconsole::{AppServices, Repositories};

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("finconsole={},actix_web=info", config.app.log_level))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.app.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn cors(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .supports_credentials()
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(&config);
    config.validate().context("Configuration validation failed")?;

    tracing::info!("Starting finconsole");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let db_pool = config
        .database
        .create_pool()
        .await
        .context("Failed to create database pool")?;
    DatabaseConfig::migrate(&db_pool)
        .await
        .context("Failed to apply migrations")?;

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    let repositories = Repositories {
        users: Arc::new(MySqlUserRepository::new(db_pool.clone())),
        persons: Arc::new(MySqlPersonRepository::new(db_pool.clone())),
        addresses: Arc::new(MySqlAddressRepository::new(db_pool.clone())),
        fixtures: Arc::new(FileFixtureStore::new(config.app.data_dir.clone())),
    };
    let services = AppServices::new(repositories, &config.auth).with_pool(db_pool);

    if let Some(admin) = &config.bootstrap {
        if services
            .users
            .ensure_admin(&admin.email, &admin.password)
            .await
            .context("Failed to create bootstrap admin")?
        {
            tracing::info!(email = %admin.email, "Bootstrap admin created");
        }
    }

    if !services.cfo.is_ready().await {
        tracing::warn!(
            data_dir = %config.app.data_dir.display(),
            "CFO data directory not found; CFO routes will fail until it exists"
        );
    }

    let rate_limiter = RateLimiter::new(config.security.rate_limit_per_minute)
        .context("Failed to build rate limiter")?;
    let origins = config.security.cors_allowed_origins.clone();
    let bind_address = config.server.bind_address();

    let server = HttpServer::new(move || {
        let services = services.clone();
        App::new()
            .configure(|cfg| services.configure(cfg))
            .wrap(rate_limiter.clone())
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .wrap(cors(&origins))
            .wrap(NormalizePath::trim())
    })
    .workers(config.server.workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await.context("Server terminated with an error")
}
