pub mod address_service;
pub mod person_service;

pub use address_service::AddressService;
pub use person_service::PersonService;
