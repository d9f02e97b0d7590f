use chrono::Utc;

use crate::{errors::RequestError, models::Post, CreatePostRequest};

use super::IdentityStore;

/// Post table, kept newest-first: creation prepends.
pub struct PostStore {
    posts: Vec<Post>,
    next_id: i64,
}

impl PostStore {
    pub fn new() -> Self {
        PostStore {
            posts: Vec::new(),
            next_id: 1,
        }
    }

    pub fn all(&self) -> &[Post] {
        &self.posts
    }

    pub fn create(
        &mut self,
        users: &mut IdentityStore,
        author_id: i64,
        request: CreatePostRequest,
    ) -> Result<&Post, RequestError> {
        if request.content.trim().is_empty() {
            return Err(RequestError::Validation("Post content is required"));
        }
        // the author must exist at creation time; its postCount moves with
        // the insertion
        let author = users.get_mut(author_id)?;
        author.post_count += 1;
        let post = Post {
            id: self.next_id,
            author_id,
            author: author.display_name.clone(),
            avatar: author.avatar_url.clone(),
            content: request.content,
            media_url: request.media_url,
            created_at: Utc::now(),
            updated_at: None,
            like_count: 0,
            comment_count: 0,
            share_count: 0,
        };
        self.next_id += 1;
        self.posts.insert(0, post);
        Ok(&self.posts[0])
    }

    pub fn get(&self, id: i64) -> Result<&Post, RequestError> {
        self.posts
            .iter()
            .find(|p| p.id == id)
            .ok_or(RequestError::NotFound("Post not found"))
    }

    pub fn get_mut(&mut self, id: i64) -> Result<&mut Post, RequestError> {
        self.posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RequestError::NotFound("Post not found"))
    }

    pub fn by_author(&self, author_id: i64) -> Vec<Post> {
        self.posts
            .iter()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect()
    }

    /// Replaces the content verbatim and stamps `updatedAt`. Existence is
    /// checked before ownership, so an unauthenticated caller still sees a
    /// 404 for a missing post.
    pub fn update(
        &mut self,
        id: i64,
        requester: Option<i64>,
        content: String,
    ) -> Result<&Post, RequestError> {
        let post = self.get_mut(id)?;
        if requester != Some(post.author_id) {
            return Err(RequestError::Forbidden("Not allowed to edit this post"));
        }
        post.content = content;
        post.updated_at = Some(Utc::now());
        Ok(&*post)
    }

    /// Removes the post and decrements the author's postCount, floored at
    /// zero. Comments and likes referencing the post are left in place.
    pub fn delete(
        &mut self,
        users: &mut IdentityStore,
        id: i64,
        requester: Option<i64>,
    ) -> Result<i64, RequestError> {
        let index = self
            .posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(RequestError::NotFound("Post not found"))?;
        if requester != Some(self.posts[index].author_id) {
            return Err(RequestError::Forbidden("Not allowed to delete this post"));
        }
        let post = self.posts.remove(index);
        if let Ok(author) = users.get_mut(post.author_id) {
            author.post_count = (author.post_count - 1).max(0);
        }
        Ok(post.id)
    }
}

impl Default for PostStore {
    fn default() -> Self {
        Self::new()
    }
}
