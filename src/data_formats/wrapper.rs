use serde::Serialize;

use crate::models::{Comment, Post, User};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthWrapper<T> {
    pub success: bool,
    pub message: &'static str,
    pub token: String,
    pub user_id: i64,
    pub user: T,
}

#[derive(Debug, Serialize)]
pub struct UserWrapper {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub user: User,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowWrapper {
    pub success: bool,
    pub message: &'static str,
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct PostWrapper {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub post: Post,
}

#[derive(Debug, Serialize)]
pub struct MultiplePostsWrapper {
    pub success: bool,
    pub posts: Vec<Post>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedPostWrapper {
    pub success: bool,
    pub message: &'static str,
    pub post_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeWrapper {
    pub success: bool,
    pub message: &'static str,
    pub post_id: i64,
    pub likes: i64,
}

#[derive(Debug, Serialize)]
pub struct CommentWrapper {
    pub success: bool,
    pub message: &'static str,
    pub comment: Comment,
}

#[derive(Debug, Serialize)]
pub struct MultipleCommentsWrapper {
    pub success: bool,
    pub comments: Vec<Comment>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedCommentWrapper {
    pub success: bool,
    pub message: &'static str,
    pub comment_id: i64,
}

#[derive(Debug, Serialize)]
pub struct MessageWrapper {
    pub success: bool,
    pub message: &'static str,
}
