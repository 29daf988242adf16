//! # innkeeper-auth
//!
//! Authentication primitives for Innkeeper: JWT access/refresh token
//! issuing and validation, and Argon2id password hashing.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair, TokenType};
pub use password::PasswordHasher;
