use std::collections::HashSet;

use chrono::Utc;

use crate::{errors::RequestError, models::Comment};

use super::{IdentityStore, PostStore};

/// Likes are a presence set keyed by (user, post); comments are one flat
/// sequence in insertion order. The aggregate counters live on the post
/// record and move together with mutations here.
pub struct EngagementStore {
    likes: HashSet<(i64, i64)>,
    comments: Vec<Comment>,
    next_comment_id: i64,
}

impl EngagementStore {
    pub fn new() -> Self {
        EngagementStore {
            likes: HashSet::new(),
            comments: Vec::new(),
            next_comment_id: 1,
        }
    }

    pub fn has_like(&self, user_id: i64, post_id: i64) -> bool {
        self.likes.contains(&(user_id, post_id))
    }

    /// Marks the like and bumps the post's likeCount once; repeat calls for
    /// the same pair change nothing. Returns the resulting likeCount.
    pub fn like(
        &mut self,
        posts: &mut PostStore,
        user_id: i64,
        post_id: i64,
    ) -> Result<i64, RequestError> {
        let post = posts.get_mut(post_id)?;
        if self.likes.insert((user_id, post_id)) {
            post.like_count += 1;
        }
        Ok(post.like_count)
    }

    /// Symmetric removal with a floored decrement; a no-op without a prior
    /// like. Returns the resulting likeCount.
    pub fn unlike(
        &mut self,
        posts: &mut PostStore,
        user_id: i64,
        post_id: i64,
    ) -> Result<i64, RequestError> {
        let post = posts.get_mut(post_id)?;
        if self.likes.remove(&(user_id, post_id)) {
            post.like_count = (post.like_count - 1).max(0);
        }
        Ok(post.like_count)
    }

    pub fn add_comment(
        &mut self,
        users: &IdentityStore,
        posts: &mut PostStore,
        author_id: i64,
        post_id: i64,
        content: String,
    ) -> Result<&Comment, RequestError> {
        if content.trim().is_empty() {
            return Err(RequestError::Validation("Comment content is required"));
        }
        let post = posts.get_mut(post_id)?;
        post.comment_count += 1;
        let (author, avatar) = match users.get(author_id) {
            Ok(user) => (user.display_name.clone(), user.avatar_url.clone()),
            Err(_) => ("unknown".to_string(), String::new()),
        };
        let comment = Comment {
            id: self.next_comment_id,
            post_id,
            author_id,
            author,
            avatar,
            content,
            created_at: Utc::now(),
        };
        self.next_comment_id += 1;
        self.comments.push(comment);
        Ok(self.comments.last().unwrap())
    }

    /// All comments for the post, oldest first.
    pub fn comments_for(&self, post_id: i64) -> Vec<Comment> {
        self.comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect()
    }

    /// Removes the comment and decrements the parent post's commentCount if
    /// the post still exists (it may have been deleted without a cascade).
    pub fn delete_comment(
        &mut self,
        posts: &mut PostStore,
        comment_id: i64,
        requester: Option<i64>,
    ) -> Result<i64, RequestError> {
        let index = self
            .comments
            .iter()
            .position(|c| c.id == comment_id)
            .ok_or(RequestError::NotFound("Comment not found"))?;
        if requester != Some(self.comments[index].author_id) {
            return Err(RequestError::Forbidden(
                "Not allowed to delete this comment",
            ));
        }
        let comment = self.comments.remove(index);
        if let Ok(post) = posts.get_mut(comment.post_id) {
            post.comment_count = (post.comment_count - 1).max(0);
        }
        Ok(comment.id)
    }
}

impl Default for EngagementStore {
    fn default() -> Self {
        Self::new()
    }
}
