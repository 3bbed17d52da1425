//! Owner-facing feedback HTTP handlers.
//!
//! - GET /api/v1/feedback/recent - Newest feedback across all projects
//! - PUT /api/v1/feedback/{id}/labels - Replace a feedback's labels
//! - DELETE /api/v1/feedback/{id} - Delete one feedback
//! - GET /api/v1/stats - Dashboard counts

use crate::{
    error::AppError,
    handlers::extract::{AppJson, AppPath, AppQuery},
    middleware::auth::OwnerContext,
    models::{
        feedback::{Feedback, RecentFeedback, RecentQuery, UpdateLabelsRequest},
        project::DashboardStats,
    },
    services::feedback,
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::State,
};
use chrono::Utc;
use serde_json::{Value, json};
use uuid::Uuid;

/// Newest feedback across the owner's projects, each with its project name.
///
/// `limit` defaults to 5 and is clamped to 1..=50.
pub async fn recent_feedback(
    State(state): State<AppState>,
    Extension(auth): Extension<OwnerContext>,
    AppQuery(query): AppQuery<RecentQuery>,
) -> Result<Json<Vec<RecentFeedback>>, AppError> {
    let recent = feedback::recent(state.store.as_ref(), auth.owner_id, query.limit).await?;

    Ok(Json(recent))
}

/// Replace the labels of one feedback.
///
/// # Request Body
///
/// ```json
/// { "labels": ["checkout", "urgent"] }
/// ```
///
/// Labels are trimmed, blanks dropped and duplicates removed (first occurrence wins).
pub async fn update_labels(
    State(state): State<AppState>,
    Extension(auth): Extension<OwnerContext>,
    AppPath(feedback_id): AppPath<Uuid>,
    AppJson(request): AppJson<UpdateLabelsRequest>,
) -> Result<Json<Feedback>, AppError> {
    let updated = feedback::update_labels(
        state.store.as_ref(),
        auth.owner_id,
        feedback_id,
        request.labels,
    )
    .await?;

    Ok(Json(updated))
}

pub async fn delete_feedback(
    State(state): State<AppState>,
    Extension(auth): Extension<OwnerContext>,
    AppPath(feedback_id): AppPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    feedback::delete(state.store.as_ref(), auth.owner_id, feedback_id).await?;

    Ok(Json(json!({ "success": true })))
}

/// Project count, feedback count and feedback from the trailing seven days.
pub async fn dashboard_stats(
    State(state): State<AppState>,
    Extension(auth): Extension<OwnerContext>,
) -> Result<Json<DashboardStats>, AppError> {
    let stats = feedback::stats(state.store.as_ref(), auth.owner_id, Utc::now()).await?;

    Ok(Json(stats))
}
