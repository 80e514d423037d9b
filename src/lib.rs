//! finconsole: REST backend for the financial-admin console.
//!
//! Authentication, user and person management, and the CFO dashboard data
//! routes with their server-side aggregations.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

pub use modules::{AppServices, Repositories};
