mod address_controller;
mod person_controller;

pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    person_controller::configure(cfg);
    address_controller::configure(cfg);
}
