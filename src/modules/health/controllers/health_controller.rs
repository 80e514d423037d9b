use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;

use crate::modules::cfo::CfoService;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub checks: ReadinessChecks,
}

/// `None` means the dependency is not wired into this instance
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessChecks {
    pub database: Option<bool>,
    pub fixtures: bool,
}

/// GET /health - Liveness probe
/// Does not check dependencies
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /ready - Readiness probe
/// Checks database connectivity and that the fixture directory exists
pub async fn readiness_check(
    pool: Option<web::Data<MySqlPool>>,
    cfo: Option<web::Data<CfoService>>,
) -> impl Responder {
    let database = match pool {
        Some(pool) => match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
            Ok(_) => Some(true),
            Err(e) => {
                tracing::error!("Database readiness check failed: {}", e);
                Some(false)
            }
        },
        None => None,
    };

    let fixtures = match cfo {
        Some(cfo) => cfo.is_ready().await,
        None => false,
    };
    if !fixtures {
        tracing::warn!("CFO fixture directory is not available");
    }

    let ready = database != Some(false) && fixtures;
    let response = ReadinessResponse {
        ready,
        checks: ReadinessChecks { database, fixtures },
    };

    if ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/ready", web::get().to(readiness_check));
}
