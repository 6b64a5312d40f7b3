//! # Agora Infrastructure
//!
//! Concrete implementations of the ports defined in `agora-core`:
//! PostgreSQL repositories via SeaORM, Redis and in-memory caches, and the
//! JWT/Argon2 authentication services.

pub mod auth;
pub mod cache;
pub mod database;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use cache::{InMemoryCache, RedisCache, RedisConfig};
pub use database::{
    DatabaseConfig, PostgresMemberRepository, PostgresPetitionRepository, connect,
};
