//! Application state shared across HTTP handlers

use std::sync::Arc;

use crate::storage::SqliteStore;
use crate::traits::{ForumStore, PostStore, ServiceStore, ThreadStore, UserStore};

/// Application state shared across handlers
///
/// Each store is a trait object so handlers stay independent of the
/// backing implementation; in practice all five point at one
/// [`SqliteStore`].
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostStore>,
    pub users: Arc<dyn UserStore>,
    pub forums: Arc<dyn ForumStore>,
    pub threads: Arc<dyn ThreadStore>,
    pub service: Arc<dyn ServiceStore>,
}

impl AppState {
    /// Wire every store to one shared SQLite database
    pub fn from_store(store: Arc<SqliteStore>) -> Self {
        Self {
            posts: store.clone(),
            users: store.clone(),
            forums: store.clone(),
            threads: store.clone(),
            service: store,
        }
    }
}
