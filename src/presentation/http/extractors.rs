//! Custom Extractors
//!
//! Axum extractors for request identity.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::infrastructure::clients::USER_NAME_HEADER;
use crate::shared::error::AppError;

/// Longest user name accepted from the header.
const MAX_USER_NAME_LEN: usize = 80;

/// Caller identity taken from the `X-User-Name` header.
///
/// The gateway does not authenticate; the header is trusted as sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(pub String);

impl UserName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for UserName
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_NAME_HEADER)
            .ok_or_else(|| AppError::BadRequest(format!("Missing {} header", USER_NAME_HEADER)))?;

        let name = value
            .to_str()
            .map_err(|_| AppError::BadRequest(format!("Invalid {} header", USER_NAME_HEADER)))?
            .trim();

        if name.is_empty() || name.len() > MAX_USER_NAME_LEN {
            return Err(AppError::BadRequest(format!(
                "{} must be 1-{} characters",
                USER_NAME_HEADER, MAX_USER_NAME_LEN
            )));
        }

        Ok(UserName(name.to_string()))
    }
}
