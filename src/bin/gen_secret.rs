//! Print a fresh random value for `JWT_SECRET`.
//!
//! Usage: `cargo run --bin gen-secret [-- --hex]`

use argon2::password_hash::rand_core::{OsRng, RngCore};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

/// 512 bits, comfortably above the HS256 block size
const SECRET_BYTES: usize = 64;

fn main() {
    let mut bytes = [0u8; SECRET_BYTES];
    OsRng.fill_bytes(&mut bytes);

    let secret = if std::env::args().any(|arg| arg == "--hex") {
        hex::encode(bytes)
    } else {
        URL_SAFE_NO_PAD.encode(bytes)
    };

    let rule = "=".repeat(70);
    println!("\n{}", rule);
    println!("NEW JWT_SECRET GENERATED");
    println!("{}", rule);
    println!("\n{}\n", secret);
    println!("{}", rule);
    println!("Copy this value into your .env file:");
    println!("JWT_SECRET={}", secret);
    println!("{}\n", rule);
    println!("WARNING: never commit this secret to version control.");
    println!("WARNING: rotating it signs every user out.\n");
}
