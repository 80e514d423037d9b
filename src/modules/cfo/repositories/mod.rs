pub mod fixture_store;

pub use fixture_store::{FileFixtureStore, FixtureSource, CATEGORIES_FILE, FINANCE_FILE};
