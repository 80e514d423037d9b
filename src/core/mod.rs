pub mod error;
pub mod listing;
pub mod patch;
pub mod traits;

pub use error::{AppError, Result};
pub use listing::{contains_ignore_case, paginate, Page, SortOrder};
pub use patch::deserialize_some;
pub use traits::Repository;
