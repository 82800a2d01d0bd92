//! Infrastructure Layer
//!
//! Repository implementations.

pub mod memory;
pub mod postgres;
#[cfg(test)]
pub(crate) mod unavailable;

pub use memory::InMemoryAuthRepository;
pub use postgres::PgAuthRepository;
