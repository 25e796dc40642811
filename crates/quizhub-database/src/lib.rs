//! # quizhub-database
//!
//! PostgreSQL connection management, the store traits the services are
//! written against, and their `postgres` and `memory` implementations.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod provider;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use provider::Stores;
pub use store::{CategoryStore, RoleStore, UserStore};
