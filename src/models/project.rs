//! Project data models and API request/response types.
//!
//! A project is the unit an owner embeds on a site. Its `api_key` is the bearer
//! credential the widget presents when submitting feedback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a project record from the database.
///
/// # Database Table
///
/// Maps to the `projects` table. Each project:
/// - Belongs to exactly one owner (via `owner_id`)
/// - Has an `api_key` that is unique across all projects
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,

    pub name: String,

    /// Bearer credential for the ingestion endpoint (`fp_` + 32 alphanumerics).
    ///
    /// Regenerating replaces it in place, so the previous key stops working immediately.
    pub api_key: String,

    pub owner_id: Uuid,

    pub created_at: DateTime<Utc>,
}

/// A project together with how much feedback it has collected.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub project: Project,

    pub feedback_count: i64,
}

/// Request body for creating a project.
///
/// ```json
/// { "name": "Marketing site" }
/// ```
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    #[serde(default)]
    pub name: String,
}

/// Fields for a project about to be inserted.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub api_key: String,
    pub owner_id: Uuid,
}

/// Embed snippet for a project.
#[derive(Debug, Serialize)]
pub struct EmbedResponse {
    pub snippet: String,
}

/// Aggregate counts shown on the dashboard home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub project_count: i64,
    pub feedback_count: i64,

    /// Feedback created in the trailing seven days.
    pub recent_feedback_count: i64,
}
