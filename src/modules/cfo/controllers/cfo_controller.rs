use actix_web::http::header::{self, CacheControl, CacheDirective};
use actix_web::{web, HttpResponse, HttpResponseBuilder};

use crate::core::error::AppError;
use crate::middleware::auth::AdminUser;
use crate::modules::cfo::services::{CfoService, DashboardQuery, ExpenseQuery, TransactionQuery};

const JSON_UTF8: &str = "application/json; charset=utf-8";

/// 200 with caching disabled; fixtures can change under us at any time
fn fresh() -> HttpResponseBuilder {
    let mut builder = HttpResponse::Ok();
    builder
        .insert_header(CacheControl(vec![CacheDirective::NoStore]))
        .insert_header((header::CONTENT_TYPE, JSON_UTF8));
    builder
}

/// `finance.json` verbatim
/// GET /cfo
pub async fn finance(
    service: web::Data<CfoService>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    Ok(fresh().body(service.raw_finance().await?))
}

/// GET /cfo/dashboard?year=&month=
pub async fn dashboard(
    service: web::Data<CfoService>,
    _admin: AdminUser,
    query: web::Query<DashboardQuery>,
) -> Result<HttpResponse, AppError> {
    let view = service.dashboard(query.into_inner()).await?;
    Ok(fresh().json(view))
}

/// `categories.json` verbatim
/// GET /cfo/transactions
pub async fn transactions(
    service: web::Data<CfoService>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    Ok(fresh().body(service.raw_categories().await?))
}

/// GET /cfo/transactions/search
pub async fn search_transactions(
    service: web::Data<CfoService>,
    _admin: AdminUser,
    query: web::Query<TransactionQuery>,
) -> Result<HttpResponse, AppError> {
    let result = service.search(&query).await?;
    Ok(fresh().json(result))
}

/// GET /cfo/expenses
pub async fn expenses(
    service: web::Data<CfoService>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    Ok(fresh().json(service.raw_expenses().await?))
}

/// GET /cfo/expenses/creditors?period=&category=&date_from=&date_to=
pub async fn creditors(
    service: web::Data<CfoService>,
    _admin: AdminUser,
    query: web::Query<ExpenseQuery>,
) -> Result<HttpResponse, AppError> {
    let report = service.creditors(&query).await?;
    Ok(fresh().json(report))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/cfo")
            .route("", web::get().to(finance))
            .route("/dashboard", web::get().to(dashboard))
            .route("/transactions", web::get().to(transactions))
            .route("/transactions/search", web::get().to(search_transactions))
            .route("/expenses", web::get().to(expenses))
            .route("/expenses/creditors", web::get().to(creditors)),
    );
}
