// Shared test helpers
//
// Each test target pulls this in with `#[path = "../helpers/mod.rs"] mod helpers;`
// and uses only part of it.
//
// Example:
//   #[actix_web::test]
//   async fn test_me() {
//       let ctx = TestContext::seeded().await;
//       let app = test::init_service(App::new().configure(|cfg| ctx.services.configure(cfg))).await;
//       let req = test::TestRequest::get()
//           .uri("/api/auth/me")
//           .insert_header(bearer(&ctx.user_token()))
//           .to_request();
//       assert_eq!(test::call_service(&app, req).await.status(), 200);
//   }
#![allow(dead_code)]

pub mod in_memory;
pub mod test_app;
pub mod test_database;

pub use in_memory::*;
pub use test_app::*;
pub use test_data::*;
pub use test_database::*;
