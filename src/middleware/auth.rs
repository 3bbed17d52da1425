//! Owner session authentication middleware for the dashboard API.
//!
//! This middleware intercepts every dashboard request to:
//! 1. Extract the session token from the Authorization header
//! 2. Hash it and look up an unexpired session
//! 3. Inject the owner context into the request
//! 4. Reject unauthenticated requests with HTTP 401

use crate::{error::AppError, state::AppState};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Authenticated owner attached to dashboard requests.
///
/// Handlers extract it with `Extension<OwnerContext>` and scope every query by `owner_id`.
#[derive(Debug, Clone, Copy)]
pub struct OwnerContext {
    pub owner_id: Uuid,
}

/// Lowercase hex SHA-256 of a session token, as stored in `owner_sessions.token_hash`.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());

    hex::encode(hasher.finalize())
}

/// Session authentication middleware function.
///
/// # Headers
///
/// ```text
/// Authorization: Bearer <session token>
/// ```
///
/// # Returns
///
/// - `Ok(Response)` from the next handler when the session is valid
/// - `Err(AppError::Unauthorized)` when the header is missing, malformed or the session is unknown or expired
pub async fn owner_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AppError::Unauthorized)?;

    let session = state
        .store
        .find_active_session(&hash_token(token), Utc::now())
        .await?
        .ok_or(AppError::Unauthorized)?;

    request.extensions_mut().insert(OwnerContext {
        owner_id: session.owner_id,
    });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_hash_is_hex_sha256() {
        assert_eq!(
            hash_token("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
