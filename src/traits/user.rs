//! User store trait and user types

use crate::error::ServerResult;

/// A registered user
#[derive(Debug, Clone)]
pub struct User {
    /// Unique nickname (case-insensitive)
    pub nickname: String,
    pub fullname: String,
    pub about: String,
    /// Unique email (case-insensitive)
    pub email: String,
}

/// Partial profile update; `None` fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub fullname: Option<String>,
    pub about: Option<String>,
    pub email: Option<String>,
}

/// Parameters of a per-forum user listing
#[derive(Debug, Clone)]
pub struct UserQuery {
    pub forum: String,
    pub desc: bool,
    /// Resume cursor: nickname of the last user already seen
    pub since: Option<String>,
    pub limit: i64,
}

pub trait UserStore: Send + Sync + 'static {
    /// Register a user; nickname or email collision is a conflict
    fn create_user(&self, user: User) -> ServerResult<User>;

    /// Fetch a profile by nickname
    fn get_user(&self, nickname: &str) -> ServerResult<User>;

    /// Partially update a profile; email collision is a conflict
    fn update_user(&self, nickname: &str, update: UserUpdate) -> ServerResult<User>;

    /// Users that collide with the given nickname or email, for
    /// conflict reporting
    fn users_conflicting(&self, nickname: &str, email: &str) -> ServerResult<Vec<User>>;

    /// Users who posted or opened threads in a forum, ordered by
    /// nickname
    fn users_by_forum(&self, query: &UserQuery) -> ServerResult<Vec<User>>;
}
