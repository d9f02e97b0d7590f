use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use std::convert::Infallible;

pub struct AuthUser {
    pub id: i64,
    pub token: String,
}

pub struct MaybeUser(pub Option<AuthUser>);

impl MaybeUser {
    pub fn get_id(&self) -> Option<i64> {
        self.0.as_ref().map(|a| a.id)
    }
}

/// Extracts the optional identity from the `Authorization: Bearer <token>`
/// header. A missing, non-ascii, or undecodable token resolves to no
/// identity; extraction itself never rejects the request.
#[axum::async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync + 'static,
{
    type Rejection = Infallible;
    async fn from_request_parts(
        parts: &mut Parts,
        _: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("Authorization")
            .and_then(|header| header.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer "));

        let token = match token {
            Some(token) => token,
            None => return Ok(MaybeUser(None)),
        };

        Ok(MaybeUser(decode_token(token).map(|id| AuthUser {
            id,
            token: token.to_string(),
        })))
    }
}

/// Encodes `<id>-<millis>` with base64. No signature, no expiry: any string
/// of the right shape decodes, and every issued token stays valid forever.
pub fn issue_token(user_id: i64) -> String {
    let raw = format!("{}-{}", user_id, Utc::now().timestamp_millis());
    BASE64.encode(raw)
}

/// Splits the decoded token on the first separator and parses the prefix as
/// the user id. Malformed input yields `None`, never an error.
pub fn decode_token(token: &str) -> Option<i64> {
    let decoded = BASE64.decode(token).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let prefix = decoded.split('-').next()?;
    prefix.parse().ok()
}
