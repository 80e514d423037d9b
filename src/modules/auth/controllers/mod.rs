mod auth_controller;

pub use auth_controller::{access_cookie, refresh_cookie, removal_cookie};

pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    auth_controller::configure(cfg);
}
