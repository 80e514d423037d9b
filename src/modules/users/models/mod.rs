pub mod user;

pub use user::{
    validate_email, CreateUserRequest, Role, UpdateUserRequest, User, UserResponse, UserRow,
};
