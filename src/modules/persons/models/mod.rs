pub mod address;
pub mod person;

pub use address::{validate_address_line, Address, AddressInput, AddressRow};
pub use person::{
    build_full_name, Person, PersonInput, PersonListQuery, PersonResponse, SEX_FEMALE, SEX_MALE,
};
