/// Data models for video-service
///
/// Base rows map one-to-one onto the `users`, `videos` and `comments` tables.
/// The `*Detail` types are what the find operations return: the base row plus
/// its direct relations, aggregated to JSON by the query itself.
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: i32,
    pub email: String,
    pub nick: String,
    pub full_name: Option<String>,
    pub admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub video_id: i32,
    pub url: String,
    pub title: String,
    pub description: Option<String>,
    pub views: i32,
    pub author_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub comment_id: i32,
    pub text: String,
    pub video_id: i32,
    pub author_id: i32,
    pub parent_id: Option<i32>,
}

/// User with the videos and comments they authored
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub user: User,
    pub videos: Json<Vec<Video>>,
    pub comments: Json<Vec<Comment>>,
}

/// Video with its author and comments
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VideoDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub video: Video,
    pub author: Json<User>,
    pub comments: Json<Vec<Comment>>,
}

/// Comment with author, video, parent (if any) and direct replies
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CommentDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub comment: Comment,
    pub author: Json<User>,
    pub video: Json<Video>,
    pub parent: Option<Json<Comment>>,
    pub children: Json<Vec<Comment>>,
}

/// Result of a bulk update or delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Count {
    pub count: u64,
}

impl From<u64> for Count {
    fn from(count: u64) -> Self {
        Self { count }
    }
}

/// Fields required to insert a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub nick: String,
    pub full_name: Option<String>,
    pub admin: bool,
}

/// Fields required to insert a video; the author is supplied separately
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub url: String,
    pub title: String,
    pub description: Option<String>,
}

/// Fields required to insert a comment
#[derive(Debug, Clone)]
pub struct NewComment {
    pub text: String,
    pub video_id: i32,
    pub author_id: i32,
    pub parent_id: Option<i32>,
}
