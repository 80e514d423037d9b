use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::core::AppError;
use crate::modules::auth::services::AuthService;
use crate::modules::users::models::User;

/// Authenticated user resolved from the bearer header or the access cookie
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn into_inner(self) -> User {
        self.0
    }
}

/// Authenticated user whose role is `admin`
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

impl AdminUser {
    pub fn into_inner(self) -> User {
        self.0
    }
}

/// Pull the raw access token out of a request.
///
/// An `Authorization: Bearer` header wins; otherwise the access cookie is used.
pub fn extract_access_token(req: &HttpRequest, cookie_name: &str) -> Option<String> {
    let bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| {
            let (scheme, token) = value.split_once(' ')?;
            scheme.eq_ignore_ascii_case("bearer").then(|| token.trim().to_string())
        })
        .filter(|token| !token.is_empty());

    bearer.or_else(|| {
        req.cookie(cookie_name)
            .map(|cookie| cookie.value().to_string())
            .filter(|token| !token.is_empty())
    })
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let service = req.app_data::<web::Data<AuthService>>().cloned();
        let token = service
            .as_ref()
            .and_then(|service| extract_access_token(req, &service.cookies().access_name));

        Box::pin(async move {
            let service = service
                .ok_or_else(|| AppError::internal("Authentication service is not configured"))?;
            let token = token.ok_or_else(|| {
                AppError::unauthorized("Authentication credentials were not provided")
            })?;

            let user = service.authenticate(&token).await?;
            Ok(CurrentUser(user))
        })
    }
}

impl FromRequest for AdminUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let current = CurrentUser::from_request(req, payload);

        Box::pin(async move {
            let CurrentUser(user) = current.await?;
            if !user.is_admin() {
                tracing::warn!(user_id = user.id, "Non-admin user denied access");
                return Err(AppError::forbidden(
                    "You do not have permission to perform this action",
                )
                .into());
            }
            Ok(AdminUser(user))
        })
    }
}
