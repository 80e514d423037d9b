// Users module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use controllers::configure;
pub use models::{Role, User, UserResponse};
pub use repositories::{MySqlUserRepository, UserRepository};
pub use services::UserService;
