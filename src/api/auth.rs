//! Caller identity extractor.
//!
//! Tokens are verified by the auth proxy in front of this service, which forwards
//! the authenticated user id in the `X-User-Id` header.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::domain::UserId;
use crate::error::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| AppError::Unauthorized("Missing X-User-Id header".into()))?
            .to_str()
            .map_err(|_| AppError::BadRequest("X-User-Id must be ASCII".into()))?;

        let id = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::BadRequest(format!("Invalid user id: {}", raw)))?;

        Ok(Caller(UserId::new(id)))
    }
}
