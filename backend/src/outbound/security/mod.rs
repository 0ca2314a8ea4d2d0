//! Token and password-hash adapters.

mod argon;
mod jwt;

pub use argon::Argon2PasswordHasher;
pub use jwt::{Hs256TokenCodec, TOKEN_TTL_HOURS};
