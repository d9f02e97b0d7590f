use serde::Serialize;

use crate::models::User;

/// The trimmed user record returned by login (the full record is only
/// returned at registration and on profile reads).
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    pub display_name: String,
    pub email: String,
    pub avatar_url: String,
}

impl LoginUser {
    pub fn new(user: &User) -> Self {
        LoginUser {
            display_name: user.display_name.clone(),
            email: user.email.clone(),
            avatar_url: user.avatar_url.clone(),
        }
    }
}
