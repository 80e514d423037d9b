// Contract tests for /api/auth
//
// Login sets both cookies and returns the tokens, every credential failure
// looks the same, refresh accepts the cookie or a body, logout clears both
// cookies.

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::cookie::{time::Duration as CookieDuration, Cookie};
use actix_web::{test, App};
use serde_json::{json, Value};

use finconsole::modules::auth::TokenType;
use finconsole::modules::users::models::UpdateUserRequest;

use helpers::*;

fn error_message(body: &Value) -> &str {
    body["error"]["message"].as_str().unwrap()
}

#[actix_web::test]
async fn test_login_sets_cookies_and_returns_tokens() {
    let ctx = TestContext::seeded().await;
    let app = test::init_service(App::new().configure(|cfg| ctx.services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let cookies: Vec<Cookie<'static>> = resp.response().cookies().map(|c| c.into_owned()).collect();
    let access = cookies.iter().find(|c| c.name() == "access").expect("access cookie");
    let refresh = cookies.iter().find(|c| c.name() == "refresh").expect("refresh cookie");

    assert_eq!(access.http_only(), Some(true));
    assert_eq!(access.path(), Some("/"));
    assert_eq!(access.max_age(), Some(CookieDuration::seconds(300)));
    assert_eq!(refresh.max_age(), Some(CookieDuration::seconds(2_592_000)));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["access"].as_str(), Some(access.value()));
    assert_eq!(body["refresh"].as_str(), Some(refresh.value()));

    let claims = ctx
        .services
        .auth
        .tokens()
        .verify(access.value(), TokenType::Access)
        .unwrap();
    assert_eq!(claims.user_id, ctx.admin.id);
}

#[actix_web::test]
async fn test_login_trims_email() {
    let ctx = TestContext::seeded().await;
    let app = test::init_service(App::new().configure(|cfg| ctx.services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": format!("  {}  ", USER_EMAIL), "password": USER_PASSWORD}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);
}

#[actix_web::test]
async fn test_login_without_email_is_bad_request() {
    let ctx = TestContext::seeded().await;
    let app = test::init_service(App::new().configure(|cfg| ctx.services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"password": "whatever"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 400);
    assert!(error_message(&body).contains("Email is required"));
}

#[actix_web::test]
async fn test_credential_failures_are_indistinguishable() {
    let ctx = TestContext::seeded().await;
    ctx.services
        .users
        .update_user(
            ctx.user.id,
            UpdateUserRequest {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let app = test::init_service(App::new().configure(|cfg| ctx.services.configure(cfg))).await;

    let attempts = [
        json!({"email": "nobody@example.com", "password": ADMIN_PASSWORD}),
        json!({"email": ADMIN_EMAIL, "password": "wrong"}),
        json!({"email": ADMIN_EMAIL}),
        json!({"email": USER_EMAIL, "password": USER_PASSWORD}),
    ];

    let mut messages = Vec::new();
    for attempt in attempts {
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(attempt)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
        assert!(resp.response().cookies().next().is_none());

        let body: Value = test::read_body_json(resp).await;
        messages.push(error_message(&body).to_string());
    }

    assert!(messages.iter().all(|m| *m == messages[0]), "{messages:?}");
}

#[actix_web::test]
async fn test_refresh_from_cookie() {
    let ctx = TestContext::seeded().await;
    let app = test::init_service(App::new().configure(|cfg| ctx.services.configure(cfg))).await;
    let refresh = ctx.token_for(&ctx.user, TokenType::Refresh);

    let req = test::TestRequest::post()
        .uri("/api/auth/refresh")
        .cookie(Cookie::new("refresh", refresh))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let access_cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "access")
        .map(|c| c.value().to_string())
        .expect("access cookie");

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["access"].as_str(), Some(access_cookie.as_str()));
}

#[actix_web::test]
async fn test_refresh_from_body() {
    let ctx = TestContext::seeded().await;
    let app = test::init_service(App::new().configure(|cfg| ctx.services.configure(cfg))).await;
    let refresh = ctx.token_for(&ctx.user, TokenType::Refresh);

    let req = test::TestRequest::post()
        .uri("/api/auth/refresh")
        .set_json(json!({ "refresh": refresh }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);
}

#[actix_web::test]
async fn test_refresh_rejects_missing_and_access_tokens() {
    let ctx = TestContext::seeded().await;
    let app = test::init_service(App::new().configure(|cfg| ctx.services.configure(cfg))).await;

    let req = test::TestRequest::post().uri("/api/auth/refresh").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert!(error_message(&body).contains("No refresh token"));

    let req = test::TestRequest::post()
        .uri("/api/auth/refresh")
        .set_json(json!({ "refresh": ctx.user_token() }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);
}

#[actix_web::test]
async fn test_refresh_for_deleted_user_fails() {
    let ctx = TestContext::seeded().await;
    let refresh = ctx.token_for(&ctx.user, TokenType::Refresh);
    ctx.services.users.delete_user(ctx.user.id).await.unwrap();
    let app = test::init_service(App::new().configure(|cfg| ctx.services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/refresh")
        .cookie(Cookie::new("refresh", refresh))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);
}

#[actix_web::test]
async fn test_me_with_bearer_and_cookie() {
    let ctx = TestContext::seeded().await;
    let app = test::init_service(App::new().configure(|cfg| ctx.services.configure(cfg))).await;

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(bearer(&ctx.user_token()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], USER_EMAIL);
    assert_eq!(body["role"], "user");
    assert!(body.get("password_hash").is_none());

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .cookie(Cookie::new("access", ctx.admin_token()))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["email"], ADMIN_EMAIL);
    assert_eq!(body["role"], "admin");
}

#[actix_web::test]
async fn test_me_requires_valid_access_token() {
    let ctx = TestContext::seeded().await;
    let app = test::init_service(App::new().configure(|cfg| ctx.services.configure(cfg))).await;

    let req = test::TestRequest::get().uri("/api/auth/me").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(bearer("not.a.token"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);

    let refresh = ctx.token_for(&ctx.user, TokenType::Refresh);
    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(bearer(&refresh))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);
}

#[actix_web::test]
async fn test_logout_clears_cookies() {
    let ctx = TestContext::seeded().await;
    let app = test::init_service(App::new().configure(|cfg| ctx.services.configure(cfg))).await;

    let req = test::TestRequest::post().uri("/api/auth/logout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let cleared: Vec<(String, String, Option<CookieDuration>)> = resp
        .response()
        .cookies()
        .map(|c| (c.name().to_string(), c.value().to_string(), c.max_age()))
        .collect();
    assert_eq!(cleared.len(), 2);
    for (name, value, max_age) in &cleared {
        assert!(name == "access" || name == "refresh");
        assert!(value.is_empty());
        assert_eq!(*max_age, Some(CookieDuration::ZERO));
    }

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
}
