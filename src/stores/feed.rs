use crate::models::Post;

use super::{PostStore, SocialGraph};

/// A viewer sees their own posts plus those of everyone they follow, in
/// store order (newest first). The whole matching sequence is returned:
/// no pagination, no ranking. An unresolvable viewer sees nothing.
pub fn compose_feed(posts: &PostStore, graph: &SocialGraph, viewer: Option<i64>) -> Vec<Post> {
    posts
        .all()
        .iter()
        .filter(|post| match viewer {
            Some(viewer) => {
                post.author_id == viewer || graph.is_following(viewer, post.author_id)
            }
            None => false,
        })
        .cloned()
        .collect()
}

/// A single author's posts, publicly readable regardless of follow state.
pub fn user_feed(posts: &PostStore, author_id: i64) -> Vec<Post> {
    posts.by_author(author_id)
}
