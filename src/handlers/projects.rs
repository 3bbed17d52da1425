//! Project management HTTP handlers.
//!
//! This module implements the owner-facing project endpoints:
//! - GET /api/v1/projects - List the owner's projects
//! - POST /api/v1/projects - Create a project (and its API key)
//! - GET /api/v1/projects/{id} - Get one project
//! - DELETE /api/v1/projects/{id} - Delete a project and all its feedback
//! - POST /api/v1/projects/{id}/regenerate-key - Rotate the API key
//! - GET /api/v1/projects/{id}/embed - Embed snippet for the current key
//! - GET /api/v1/projects/{id}/feedback - Filtered, paginated feedback
//! - GET /api/v1/projects/{id}/feedback/export - Filtered feedback as CSV
//!
//! A project owned by someone else answers exactly like a missing one (404).

use crate::{
    error::AppError,
    handlers::extract::{AppJson, AppPath, AppQuery},
    middleware::auth::OwnerContext,
    models::{
        feedback::{FeedbackListQuery, FeedbackPage},
        project::{CreateProjectRequest, EmbedResponse, Project, ProjectSummary},
    },
    services::{feedback, projects},
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde_json::{Value, json};
use uuid::Uuid;

/// List all projects for the authenticated owner, newest first, with feedback counts.
pub async fn list_projects(
    State(state): State<AppState>,
    Extension(auth): Extension<OwnerContext>,
) -> Result<Json<Vec<ProjectSummary>>, AppError> {
    let projects = state.store.list_projects(auth.owner_id).await?;

    Ok(Json(projects))
}

/// Create a new project.
///
/// # Request Body
///
/// ```json
/// { "name": "Marketing site" }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: the project, including its generated `apiKey`
/// - **Error (400)**: `Project name is required`
pub async fn create_project(
    State(state): State<AppState>,
    Extension(auth): Extension<OwnerContext>,
    AppJson(request): AppJson<CreateProjectRequest>,
) -> Result<(StatusCode, Json<Project>), AppError> {
    let project = projects::create_project(state.store.as_ref(), auth.owner_id, &request.name).await?;

    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn get_project(
    State(state): State<AppState>,
    Extension(auth): Extension<OwnerContext>,
    AppPath(project_id): AppPath<Uuid>,
) -> Result<Json<ProjectSummary>, AppError> {
    let project = projects::get_project(state.store.as_ref(), project_id, auth.owner_id).await?;

    Ok(Json(project))
}

/// Delete a project. Its feedback is removed with it.
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(auth): Extension<OwnerContext>,
    AppPath(project_id): AppPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    projects::delete_project(state.store.as_ref(), project_id, auth.owner_id).await?;

    Ok(Json(json!({ "success": true })))
}

/// Replace the project's API key. The previous key is rejected from now on.
pub async fn regenerate_key(
    State(state): State<AppState>,
    Extension(auth): Extension<OwnerContext>,
    AppPath(project_id): AppPath<Uuid>,
) -> Result<Json<Project>, AppError> {
    let project =
        projects::regenerate_api_key(state.store.as_ref(), project_id, auth.owner_id).await?;

    Ok(Json(project))
}

/// Script tag to paste into a site.
///
/// ```json
/// { "snippet": "<script\n  src=\"https://pulse.example.com/widget.js\"\n  data-project-key=\"fp_...\"\n></script>" }
/// ```
pub async fn embed_snippet(
    State(state): State<AppState>,
    Extension(auth): Extension<OwnerContext>,
    AppPath(project_id): AppPath<Uuid>,
) -> Result<Json<EmbedResponse>, AppError> {
    let summary = projects::get_project(state.store.as_ref(), project_id, auth.owner_id).await?;

    Ok(Json(EmbedResponse {
        snippet: projects::embed_snippet(&state.public_base_url, &summary.project.api_key),
    }))
}

/// List a project's feedback.
///
/// # Query Parameters
///
/// - `type`: `ALL` (default), `BUG`, `FEATURE` or `OTHER`
/// - `label`: only feedback carrying this label
/// - `limit`: page size, default 50, clamped to 1..=200
/// - `offset`: rows to skip, default 0
///
/// # Response (200 OK)
///
/// ```json
/// { "feedbacks": [ ... ], "total": 132 }
/// ```
///
/// `total` counts every matching row regardless of `limit`/`offset`.
pub async fn list_feedback(
    State(state): State<AppState>,
    Extension(auth): Extension<OwnerContext>,
    AppPath(project_id): AppPath<Uuid>,
    AppQuery(query): AppQuery<FeedbackListQuery>,
) -> Result<Json<FeedbackPage>, AppError> {
    let filter = feedback::build_filter(&query, true)?;
    let page =
        feedback::list_for_project(state.store.as_ref(), auth.owner_id, project_id, &filter)
            .await?;

    Ok(Json(page))
}

/// Download every matching feedback row as `feedback.csv`.
///
/// Accepts the same `type` and `label` filters as the listing; pagination is ignored.
pub async fn export_feedback(
    State(state): State<AppState>,
    Extension(auth): Extension<OwnerContext>,
    AppPath(project_id): AppPath<Uuid>,
    AppQuery(query): AppQuery<FeedbackListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = feedback::build_filter(&query, false)?;
    let page =
        feedback::list_for_project(state.store.as_ref(), auth.owner_id, project_id, &filter)
            .await?;

    let csv = feedback::export_csv(&page.feedbacks)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"feedback.csv\""),
        ],
        csv,
    ))
}
