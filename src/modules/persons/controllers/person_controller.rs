use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::middleware::auth::CurrentUser;
use crate::modules::persons::models::{PersonInput, PersonListQuery};
use crate::modules::persons::services::PersonService;

/// List persons
/// GET /persons?sex=&birthday=&search=
pub async fn list_persons(
    service: web::Data<PersonService>,
    _user: CurrentUser,
    query: web::Query<PersonListQuery>,
) -> Result<HttpResponse, AppError> {
    let persons = service.list_persons(&query).await?;
    Ok(HttpResponse::Ok().json(persons))
}

/// POST /persons
pub async fn create_person(
    service: web::Data<PersonService>,
    _user: CurrentUser,
    request: web::Json<PersonInput>,
) -> Result<HttpResponse, AppError> {
    let person = service.create_person(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(person))
}

/// GET /persons/{id}
pub async fn get_person(
    service: web::Data<PersonService>,
    _user: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let person = service.get_person(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(person))
}

/// Full update; first_name is required
/// PUT /persons/{id}
pub async fn replace_person(
    service: web::Data<PersonService>,
    _user: CurrentUser,
    path: web::Path<i64>,
    request: web::Json<PersonInput>,
) -> Result<HttpResponse, AppError> {
    let person = service
        .update_person(path.into_inner(), request.into_inner(), false)
        .await?;
    Ok(HttpResponse::Ok().json(person))
}

/// PATCH /persons/{id}
pub async fn patch_person(
    service: web::Data<PersonService>,
    _user: CurrentUser,
    path: web::Path<i64>,
    request: web::Json<PersonInput>,
) -> Result<HttpResponse, AppError> {
    let person = service
        .update_person(path.into_inner(), request.into_inner(), true)
        .await?;
    Ok(HttpResponse::Ok().json(person))
}

/// DELETE /persons/{id}
pub async fn delete_person(
    service: web::Data<PersonService>,
    _user: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    service.delete_person(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/persons")
            .route("", web::get().to(list_persons))
            .route("", web::post().to(create_person))
            .route("/{id}", web::get().to(get_person))
            .route("/{id}", web::put().to(replace_person))
            .route("/{id}", web::patch().to(patch_person))
            .route("/{id}", web::delete().to(delete_person)),
    );
}
