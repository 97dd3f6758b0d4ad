use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

use crate::models::Author;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_NAME_HEADER: &str = "x-user-name";

/// Identity of the user making a call, taken from headers set by the host
/// messenger. Missing headers mean an anonymous user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller(pub Author);

impl Caller {
    pub fn user_id(&self) -> &str {
        &self.0.user_id
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let mut author = Author::anonymous();
        if let Some(user_id) = header(USER_ID_HEADER) {
            author.user_id = user_id;
        }
        if let Some(user_name) = header(USER_NAME_HEADER) {
            author.user_name = user_name;
        }

        Ok(Caller(author))
    }
}
