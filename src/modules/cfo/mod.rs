// CFO dashboard data routes

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use controllers::configure;
pub use repositories::{FileFixtureStore, FixtureSource};
pub use services::CfoService;
