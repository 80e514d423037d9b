pub mod auth_service;
pub mod password;
pub mod token_service;

pub use auth_service::AuthService;
pub use password::{hash_password, verify_password};
pub use token_service::TokenService;
