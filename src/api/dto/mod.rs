//! Request and response DTOs

pub mod request;
pub mod response;

pub use request::{
    ForumCreateRequest, ListQuery, PostCreateRequest, PostDetailsQuery, PostUpdateRequest,
    PostsQuery, ThreadCreateRequest, ThreadUpdateRequest, UserCreateRequest, UserUpdateRequest,
};
pub use response::{ForumDto, PostDto, PostFullDto, StatusDto, ThreadDto, UserDto};
