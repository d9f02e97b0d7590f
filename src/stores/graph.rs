use std::collections::{HashMap, HashSet};

use crate::errors::RequestError;

use super::IdentityStore;

/// Follow table: follower id → set of followed ids. The counter bumps on the
/// user records happen here so an edge and its counters never drift apart.
pub struct SocialGraph {
    following: HashMap<i64, HashSet<i64>>,
}

impl SocialGraph {
    pub fn new() -> Self {
        SocialGraph {
            following: HashMap::new(),
        }
    }

    /// Registration seeds an empty follow set for the new user.
    pub fn init_user(&mut self, id: i64) {
        self.following.entry(id).or_default();
    }

    pub fn is_following(&self, follower_id: i64, followee_id: i64) -> bool {
        self.following
            .get(&follower_id)
            .map(|set| set.contains(&followee_id))
            .unwrap_or(false)
    }

    /// Adds the edge and bumps both counters. Idempotent: an existing edge
    /// leaves everything unchanged. Nothing stops a self-follow.
    pub fn follow(
        &mut self,
        users: &mut IdentityStore,
        follower_id: i64,
        followee_id: i64,
    ) -> Result<(), RequestError> {
        if !users.contains(followee_id) {
            return Err(RequestError::NotFound("User not found"));
        }
        let edges = self.following.entry(follower_id).or_default();
        if edges.insert(followee_id) {
            users.get_mut(followee_id)?.follower_count += 1;
            // a token can name an id that was never registered; the edge is
            // still recorded but there is no counter to bump
            if let Ok(follower) = users.get_mut(follower_id) {
                follower.following_count += 1;
            }
        }
        Ok(())
    }

    /// Removes the edge if present and decrements both counters, floored at
    /// zero. Idempotent for absent edges.
    pub fn unfollow(&mut self, users: &mut IdentityStore, follower_id: i64, followee_id: i64) {
        let removed = self
            .following
            .get_mut(&follower_id)
            .map(|edges| edges.remove(&followee_id))
            .unwrap_or(false);
        if removed {
            if let Ok(followee) = users.get_mut(followee_id) {
                followee.follower_count = (followee.follower_count - 1).max(0);
            }
            if let Ok(follower) = users.get_mut(follower_id) {
                follower.following_count = (follower.following_count - 1).max(0);
            }
        }
    }
}

impl Default for SocialGraph {
    fn default() -> Self {
        Self::new()
    }
}
