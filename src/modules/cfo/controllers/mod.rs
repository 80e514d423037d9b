mod cfo_controller;

pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfo_controller::configure(cfg);
}
