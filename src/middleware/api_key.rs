//! Project API key authorization for the public ingestion endpoint.
//!
//! The widget sends the key in `X-API-Key`. It is matched exactly (case-sensitive, no
//! trimming) against `projects.api_key`.

use crate::{error::AppError, models::project::Project, state::AppState, store::Store};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

pub const API_KEY_HEADER: &str = "X-API-Key";

/// Project whose key authorized the current request.
#[derive(Debug, Clone)]
pub struct AuthorizedProject(pub Project);

/// Map a presented key to its project.
///
/// An absent or empty key is `MissingApiKey`; a key matching no project is `InvalidApiKey`.
pub async fn authorize(store: &dyn Store, presented: Option<&str>) -> Result<Project, AppError> {
    let api_key = presented
        .filter(|key| !key.is_empty())
        .ok_or(AppError::MissingApiKey)?;

    match store.find_project_by_api_key(api_key).await? {
        Some(project) => Ok(project),
        None => {
            tracing::debug!("rejected submission with unknown api key");
            Err(AppError::InvalidApiKey)
        }
    }
}

/// Reject requests without a valid project key, otherwise attach [`AuthorizedProject`].
pub async fn require_api_key(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok());

    let project = authorize(state.store.as_ref(), presented).await?;
    request.extensions_mut().insert(AuthorizedProject(project));

    Ok(next.run(request).await)
}
