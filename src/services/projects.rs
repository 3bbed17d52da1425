//! Project management - API key issuance, rotation and embed snippets.

use crate::{
    error::AppError,
    models::project::{NewProject, Project, ProjectSummary},
    store::Store,
    widget::boot::{KEY_ATTRIBUTE, SCRIPT_FILE},
};
use rand::distr::{Alphanumeric, SampleString};
use uuid::Uuid;

pub const API_KEY_PREFIX: &str = "fp_";
const API_KEY_RANDOM_LEN: usize = 32;

pub const PROJECT_NAME_REQUIRED: &str = "Project name is required";

/// Generate a fresh project API key.
///
/// # Format
///
/// `fp_` followed by 32 characters from `[A-Za-z0-9]`, drawn from the thread-local CSPRNG.
pub fn generate_api_key() -> String {
    let random = Alphanumeric.sample_string(&mut rand::rng(), API_KEY_RANDOM_LEN);
    format!("{API_KEY_PREFIX}{random}")
}

/// Script tag an owner pastes into their site.
///
/// The tag points at `{base_url}/widget.js`. That bundle is a static asset published
/// next to the API under the public base URL; this router does not serve it. The
/// widget derives its ingestion endpoint from the same `src`.
pub fn embed_snippet(base_url: &str, api_key: &str) -> String {
    format!(
        "<script\n  src=\"{}/{SCRIPT_FILE}\"\n  {KEY_ATTRIBUTE}=\"{}\"\n></script>",
        base_url.trim_end_matches('/'),
        api_key
    )
}

pub async fn create_project(
    store: &dyn Store,
    owner_id: Uuid,
    name: &str,
) -> Result<Project, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation(PROJECT_NAME_REQUIRED));
    }

    let project = store
        .insert_project(NewProject {
            name: name.to_string(),
            api_key: generate_api_key(),
            owner_id,
        })
        .await?;

    tracing::info!(project_id = %project.id, %owner_id, "project created");
    Ok(project)
}

pub async fn get_project(
    store: &dyn Store,
    project_id: Uuid,
    owner_id: Uuid,
) -> Result<ProjectSummary, AppError> {
    store
        .find_project(project_id, owner_id)
        .await?
        .ok_or(AppError::ProjectNotFound)
}

/// Delete a project together with all of its feedback.
pub async fn delete_project(
    store: &dyn Store,
    project_id: Uuid,
    owner_id: Uuid,
) -> Result<(), AppError> {
    if !store.delete_project(project_id, owner_id).await? {
        return Err(AppError::ProjectNotFound);
    }

    tracing::info!(%project_id, "project deleted");
    Ok(())
}

/// Replace the project's key. There is no grace period for the old one.
pub async fn regenerate_api_key(
    store: &dyn Store,
    project_id: Uuid,
    owner_id: Uuid,
) -> Result<Project, AppError> {
    let project = store
        .replace_api_key(project_id, owner_id, &generate_api_key())
        .await?
        .ok_or(AppError::ProjectNotFound)?;

    tracing::info!(%project_id, "api key regenerated");
    Ok(project)
}
