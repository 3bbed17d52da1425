//! Public feedback ingestion endpoint called by the embedded widget.
//!
//! - POST /api/feedback - record one submission
//! - OPTIONS /api/feedback - CORS preflight (answered by the CORS layer)

use crate::{
    error::AppError,
    middleware::api_key::AuthorizedProject,
    models::feedback::SubmitFeedbackResponse,
    services::ingestion,
    state::AppState,
};
use axum::{
    Extension, Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header},
};

/// Record a feedback submission.
///
/// # Authentication
///
/// `X-API-Key: <project api key>`, checked by the API key middleware before this runs.
///
/// # Request Body
///
/// ```json
/// {
///   "content": "crashes on load",
///   "rating": 4,
///   "feedbackType": "BUG",
///   "email": "user@example.com"
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: `{"success": true, "id": "<feedback id>"}`
/// - **Error (400)**: `Content is required` or `Rating must be between 1 and 5`
/// - **Error (401)**: `API key is required` or `Invalid API key`
/// - **Error (500)**: `Internal server error`
///
/// The body is read as raw bytes so type errors in individual fields surface as the
/// field's validation message rather than a generic JSON rejection.
pub async fn submit_feedback(
    State(state): State<AppState>,
    Extension(AuthorizedProject(project)): Extension<AuthorizedProject>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<SubmitFeedbackResponse>), AppError> {
    let submission = ingestion::parse_submission(&body)?;

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);

    let feedback =
        ingestion::record(state.store.as_ref(), &project, submission, user_agent).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitFeedbackResponse {
            success: true,
            id: feedback.id,
        }),
    ))
}
