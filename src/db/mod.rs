//! Persistence layer for the user service
//!
//! Holds the user and session entities and the data access
//! operations over the Postgres pool.

pub mod models;
pub mod operations;

pub use models::{Session, User, DEFAULT_TIER};
pub use operations::DbOperations;
