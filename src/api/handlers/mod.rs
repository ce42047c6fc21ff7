//! HTTP request handlers

mod forums;
mod posts;
mod service;
mod threads;
mod users;

pub use forums::{create_forum, forum_threads, get_forum};
pub use posts::{get_post, posts_create, update_post};
pub use service::{service_clear, service_status};
pub use threads::{create_thread, get_thread, thread_posts, update_thread};
pub use users::{create_user, forum_users, get_user, update_user};
