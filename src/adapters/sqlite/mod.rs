//! SQLite-backed session persistence.

pub mod connection;
pub mod state_repository;

pub use connection::{create_pool, create_test_pool, init_schema, ConnectionError, PoolConfig};
pub use state_repository::SqliteStateRepository;
