use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::{web, HttpRequest, HttpResponse};

use crate::config::{CookieSettings, SameSitePolicy};
use crate::core::error::AppError;
use crate::middleware::auth::CurrentUser;
use crate::modules::auth::models::{LoginRequest, LoginResponse, RefreshRequest, RefreshResponse};
use crate::modules::auth::services::AuthService;
use crate::modules::users::models::UserResponse;

/// Cookie carrying the access token
pub fn access_cookie(settings: &CookieSettings, token: &str, max_age_seconds: i64) -> Cookie<'static> {
    build_cookie(settings.access_name.clone(), token.to_string(), settings, max_age_seconds)
}

/// Cookie carrying the refresh token
pub fn refresh_cookie(settings: &CookieSettings, token: &str, max_age_seconds: i64) -> Cookie<'static> {
    build_cookie(settings.refresh_name.clone(), token.to_string(), settings, max_age_seconds)
}

/// Expired, empty cookie that makes the browser drop `name`
pub fn removal_cookie(settings: &CookieSettings, name: &str) -> Cookie<'static> {
    let mut cookie = build_cookie(name.to_string(), String::new(), settings, 0);
    cookie.make_removal();
    cookie
}

fn build_cookie(
    name: String,
    value: String,
    settings: &CookieSettings,
    max_age_seconds: i64,
) -> Cookie<'static> {
    let same_site = match settings.same_site {
        SameSitePolicy::Lax => SameSite::Lax,
        SameSitePolicy::None => SameSite::None,
    };

    Cookie::build(name, value)
        .path("/")
        .http_only(true)
        .secure(settings.secure)
        .same_site(same_site)
        .max_age(CookieDuration::seconds(max_age_seconds))
        .finish()
}

/// POST /auth/login
/// Sets access and refresh cookies; tokens are also returned for bearer clients
pub async fn login(
    service: web::Data<AuthService>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let pair = service
        .login(request.email.as_deref(), request.password.as_deref())
        .await?;

    let settings = service.cookies();
    let tokens = service.tokens();

    Ok(HttpResponse::Ok()
        .cookie(access_cookie(settings, &pair.access, tokens.access_ttl_seconds()))
        .cookie(refresh_cookie(settings, &pair.refresh, tokens.refresh_ttl_seconds()))
        .json(LoginResponse {
            success: true,
            access: pair.access,
            refresh: pair.refresh,
        }))
}

/// POST /auth/refresh
/// The refresh cookie wins over a `{"refresh": ...}` body
pub async fn refresh(
    req: HttpRequest,
    service: web::Data<AuthService>,
    body: Option<web::Json<RefreshRequest>>,
) -> Result<HttpResponse, AppError> {
    let settings = service.cookies();

    let token = req
        .cookie(&settings.refresh_name)
        .map(|cookie| cookie.value().to_string())
        .or_else(|| body.and_then(|body| body.into_inner().refresh));

    let access = service.refresh(token.as_deref()).await?;

    Ok(HttpResponse::Ok()
        .cookie(access_cookie(settings, &access, service.tokens().access_ttl_seconds()))
        .json(RefreshResponse {
            success: true,
            access,
        }))
}

/// GET /auth/me
pub async fn me(user: CurrentUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(UserResponse::from(user.into_inner())))
}

/// POST /auth/logout
pub async fn logout(service: web::Data<AuthService>) -> Result<HttpResponse, AppError> {
    let settings = service.cookies();

    Ok(HttpResponse::Ok()
        .cookie(removal_cookie(settings, &settings.access_name))
        .cookie(removal_cookie(settings, &settings.refresh_name))
        .json(serde_json::json!({ "success": true })))
}

/// Configure auth routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(login))
            .route("/refresh", web::post().to(refresh))
            .route("/me", web::get().to(me))
            .route("/logout", web::post().to(logout)),
    );
}
