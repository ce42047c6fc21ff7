// File: src/storage/sqlite/mod.rs

mod config;
mod convert;
mod forums;
mod path;
mod posts;
mod queries;
mod schema;
mod store;
mod threads;
mod users;

// Public exports
pub use config::SqliteConfig;
pub use path::{path_from_bytes, path_to_bytes};
pub use store::SqliteStore;
