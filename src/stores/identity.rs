use std::collections::HashMap;

use chrono::Utc;

use crate::{errors::RequestError, models::User, RegisterRequest, UpdateProfileRequest};

/// Avatar applied at registration when the client does not supply one.
pub const DEFAULT_AVATAR_URL: &str =
    "https://res.cloudinary.com/duixjs8az/image/upload/v1766041351/post_media/default_avatar.jpg";

/// User table: id → profile record. Mutated only by registration,
/// profile updates, and the counter bumps from the other stores.
pub struct IdentityStore {
    users: HashMap<i64, User>,
    next_id: i64,
}

impl IdentityStore {
    pub fn new() -> Self {
        IdentityStore {
            users: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn register(&mut self, request: RegisterRequest) -> Result<&User, RequestError> {
        if request.email.is_empty() || request.username.is_empty() || request.password.is_empty() {
            return Err(RequestError::Validation(
                "Email, username and password are required",
            ));
        }
        if request.password.chars().count() < 6 {
            return Err(RequestError::Validation(
                "Password must be at least 6 characters",
            ));
        }
        if self.users.values().any(|u| u.email == request.email) {
            return Err(RequestError::Conflict("Email is already in use"));
        }

        let id = self.next_id;
        self.next_id += 1;
        let user = User {
            id,
            email: request.email,
            display_name: request.username.clone(),
            username: request.username,
            password: request.password,
            bio: String::new(),
            location: String::new(),
            website: String::new(),
            avatar_url: request
                .avatar_url
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| DEFAULT_AVATAR_URL.to_string()),
            cover_url: request.cover_url,
            created_at: Utc::now(),
            follower_count: 0,
            following_count: 0,
            post_count: 0,
        };
        Ok(self.users.entry(id).or_insert(user))
    }

    pub fn get(&self, id: i64) -> Result<&User, RequestError> {
        self.users
            .get(&id)
            .ok_or(RequestError::NotFound("User not found"))
    }

    pub fn get_mut(&mut self, id: i64) -> Result<&mut User, RequestError> {
        self.users
            .get_mut(&id)
            .ok_or(RequestError::NotFound("User not found"))
    }

    pub fn contains(&self, id: i64) -> bool {
        self.users.contains_key(&id)
    }

    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users.values().find(|u| u.email == email)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Only the requester may edit their own profile. Empty strings leave the
    /// prior value untouched, so there is no way to clear a bio back to empty
    /// through this call.
    pub fn update_profile(
        &mut self,
        id: i64,
        requester: Option<i64>,
        request: UpdateProfileRequest,
    ) -> Result<&User, RequestError> {
        if requester != Some(id) {
            return Err(RequestError::Forbidden(
                "Not allowed to edit this profile",
            ));
        }
        let user = self.get_mut(id)?;
        if let Some(display_name) = request.display_name.filter(|v| !v.is_empty()) {
            user.display_name = display_name;
        }
        if let Some(bio) = request.bio.filter(|v| !v.is_empty()) {
            user.bio = bio;
        }
        if let Some(location) = request.location.filter(|v| !v.is_empty()) {
            user.location = location;
        }
        if let Some(website) = request.website.filter(|v| !v.is_empty()) {
            user.website = website;
        }
        Ok(&*user)
    }
}

impl Default for IdentityStore {
    fn default() -> Self {
        Self::new()
    }
}
