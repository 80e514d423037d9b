mod user_controller;

pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    user_controller::configure(cfg);
}
