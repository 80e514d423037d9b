// Integration test: browser-style cookie session against a real server
//
// Runs the full middleware stack over HTTP: login cookies, cookie-only
// authentication, refresh, logout, request ids and rate limiting.

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::cookie::Cookie;
use actix_web::middleware::NormalizePath;
use actix_web::App;
use serde_json::{json, Value};

use finconsole::middleware::{RateLimiter, RequestId};

use helpers::*;

fn session_cookie(response_cookies: &[Cookie<'static>], name: &str) -> Cookie<'static> {
    response_cookies
        .iter()
        .find(|cookie| cookie.name() == name)
        .cloned()
        .unwrap_or_else(|| panic!("missing {} cookie", name))
}

#[actix_web::test]
async fn test_cookie_login_then_me_then_logout() {
    let ctx = TestContext::seeded().await;
    let services = ctx.services.clone();

    let srv = actix_test::start(move || {
        let services = services.clone();
        App::new()
            .configure(move |cfg| services.configure(cfg))
            .wrap(RequestId)
            .wrap(NormalizePath::trim())
    });

    let mut res = srv
        .post("/api/auth/login")
        .send_json(&json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD}))
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let cookies: Vec<Cookie<'static>> = res.cookies().unwrap().iter().cloned().collect();
    let access = session_cookie(&cookies, "access");
    let refresh = session_cookie(&cookies, "refresh");
    let _: Value = res.json().await.unwrap();

    // The access cookie alone authenticates
    let mut res = srv
        .get("/api/auth/me/")
        .cookie(Cookie::new("access", access.value().to_string()))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));
    let me: Value = res.json().await.unwrap();
    assert_eq!(me["email"], ADMIN_EMAIL);

    // Refresh from the cookie issues a new access cookie
    let res = srv
        .post("/api/auth/refresh")
        .cookie(Cookie::new("refresh", refresh.value().to_string()))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let cookies: Vec<Cookie<'static>> = res.cookies().unwrap().iter().cloned().collect();
    let renewed = session_cookie(&cookies, "access");
    assert!(!renewed.value().is_empty());

    let res = srv
        .get("/api/cfo/dashboard")
        .cookie(Cookie::new("access", renewed.value().to_string()))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let res = srv.post("/api/auth/logout").send().await.unwrap();
    assert_eq!(res.status(), 200);
    let cookies: Vec<Cookie<'static>> = res.cookies().unwrap().iter().cloned().collect();
    assert!(session_cookie(&cookies, "access").value().is_empty());
    assert!(session_cookie(&cookies, "refresh").value().is_empty());
}

#[actix_web::test]
async fn test_request_id_is_echoed() {
    let ctx = TestContext::seeded().await;
    let services = ctx.services.clone();

    let srv = actix_test::start(move || {
        let services = services.clone();
        App::new()
            .configure(move |cfg| services.configure(cfg))
            .wrap(RequestId)
    });

    let res = srv
        .get("/health")
        .insert_header(("x-request-id", "trace-123"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers().get("x-request-id").unwrap(), "trace-123");
}

#[actix_web::test]
async fn test_rate_limit_applies_to_api_but_not_probes() {
    let ctx = TestContext::seeded().await;
    let services = ctx.services.clone();
    let limiter = RateLimiter::new(2).unwrap();

    let srv = actix_test::start(move || {
        let services = services.clone();
        App::new()
            .configure(move |cfg| services.configure(cfg))
            .wrap(limiter.clone())
    });

    let token = ctx.user_token();
    let mut statuses = Vec::new();
    for _ in 0..3 {
        let res = srv
            .get("/api/auth/me")
            .insert_header(bearer(&token))
            .send()
            .await
            .unwrap();
        statuses.push(res.status().as_u16());
    }
    assert_eq!(statuses, vec![200, 200, 429]);

    let res = srv.get("/health").send().await.unwrap();
    assert_eq!(res.status(), 200);
}
