pub mod claims;

pub use claims::{
    Claims, LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, TokenPair, TokenType,
};
