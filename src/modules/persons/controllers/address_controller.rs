use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::middleware::auth::CurrentUser;
use crate::modules::persons::models::AddressInput;
use crate::modules::persons::services::AddressService;

/// GET /addresses
pub async fn list_addresses(
    service: web::Data<AddressService>,
    _user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.list_addresses().await?))
}

/// POST /addresses
pub async fn create_address(
    service: web::Data<AddressService>,
    _user: CurrentUser,
    request: web::Json<AddressInput>,
) -> Result<HttpResponse, AppError> {
    let address = service.create_address(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(address))
}

/// GET /addresses/{id}
pub async fn get_address(
    service: web::Data<AddressService>,
    _user: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.get_address(path.into_inner()).await?))
}

/// PUT /addresses/{id}
pub async fn replace_address(
    service: web::Data<AddressService>,
    _user: CurrentUser,
    path: web::Path<i64>,
    request: web::Json<AddressInput>,
) -> Result<HttpResponse, AppError> {
    let address = service
        .update_address(path.into_inner(), request.into_inner(), false)
        .await?;
    Ok(HttpResponse::Ok().json(address))
}

/// PATCH /addresses/{id}
pub async fn patch_address(
    service: web::Data<AddressService>,
    _user: CurrentUser,
    path: web::Path<i64>,
    request: web::Json<AddressInput>,
) -> Result<HttpResponse, AppError> {
    let address = service
        .update_address(path.into_inner(), request.into_inner(), true)
        .await?;
    Ok(HttpResponse::Ok().json(address))
}

/// DELETE /addresses/{id}
pub async fn delete_address(
    service: web::Data<AddressService>,
    _user: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    service.delete_address(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/addresses")
            .route("", web::get().to(list_addresses))
            .route("", web::post().to(create_address))
            .route("/{id}", web::get().to(get_address))
            .route("/{id}", web::put().to(replace_address))
            .route("/{id}", web::patch().to(patch_address))
            .route("/{id}", web::delete().to(delete_address)),
    );
}
