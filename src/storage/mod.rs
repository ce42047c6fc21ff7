//! Storage backends

pub mod sqlite;

pub use sqlite::{SqliteConfig, SqliteStore};
