// Authentication module: JWT issuing, login/refresh/me/logout

pub mod controllers;
pub mod models;
pub mod services;

pub use controllers::configure;
pub use models::{Claims, TokenPair, TokenType};
pub use services::{AuthService, TokenService};
