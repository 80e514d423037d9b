// Persons and their addresses

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use controllers::configure;
pub use models::{Address, Person, PersonResponse};
pub use repositories::{
    AddressRepository, MySqlAddressRepository, MySqlPersonRepository, PersonRepository,
};
pub use services::{AddressService, PersonService};
