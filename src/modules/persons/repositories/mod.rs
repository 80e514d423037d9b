pub mod address_repository;
pub mod person_repository;

pub use address_repository::{AddressRepository, MySqlAddressRepository};
pub use person_repository::{MySqlPersonRepository, PersonRepository};
