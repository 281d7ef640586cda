use axum::{extract::FromRequestParts, http::request::Parts};
use datalens_core::domain::UserId;
use tracing::debug;

use crate::error::ApiError;

/// Header carrying the authenticated user's id. Authentication itself
/// happens in front of this service.
pub const HEADER_USER_ID: &str = "x-user-id";

/// The user a request acts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub UserId);

impl<S> FromRequestParts<S> for CurrentUser
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
    let Some(raw) = parts.headers.get(HEADER_USER_ID) else {
      debug!("request without {HEADER_USER_ID}");
      return Err(ApiError::Unauthorized(format!("missing {HEADER_USER_ID} header")));
    };

    let user = raw
      .to_str()
      .ok()
      .and_then(|s| s.parse::<UserId>().ok())
      .ok_or_else(|| ApiError::Unauthorized(format!("invalid {HEADER_USER_ID} header")))?;

    Ok(CurrentUser(user))
  }
}
