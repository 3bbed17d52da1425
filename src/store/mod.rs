//! Persistence seam between HTTP handlers and storage.
//!
//! Handlers only see `dyn Store`. `PgStore` is the production implementation;
//! `MemoryStore` keeps everything in process for tests and database-less local runs.
//!
//! Every owner-scoped method filters by `owner_id` itself, so a resource owned by
//! someone else is indistinguishable from one that does not exist.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::{
    error::AppError,
    models::{
        feedback::{Feedback, FeedbackFilter, FeedbackPage, NewFeedback, RecentFeedback},
        project::{DashboardStats, NewProject, Project, ProjectSummary},
        session::OwnerSession,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[async_trait]
pub trait Store: Send + Sync {
    /// Cheap connectivity check used by `/health`.
    async fn ping(&self) -> Result<(), AppError>;

    /// Exact, case-sensitive lookup of the project owning `api_key`.
    async fn find_project_by_api_key(&self, api_key: &str) -> Result<Option<Project>, AppError>;

    /// Insert one feedback row. `id` and `created_at` are assigned by the store.
    async fn insert_feedback(&self, feedback: NewFeedback) -> Result<Feedback, AppError>;

    /// Session for `token_hash` that has not expired at `now`.
    async fn find_active_session(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<OwnerSession>, AppError>;

    /// Owner's projects, newest first.
    async fn list_projects(&self, owner_id: Uuid) -> Result<Vec<ProjectSummary>, AppError>;

    async fn find_project(
        &self,
        project_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<ProjectSummary>, AppError>;

    async fn insert_project(&self, project: NewProject) -> Result<Project, AppError>;

    /// Delete a project and all of its feedback. Returns false if nothing matched.
    async fn delete_project(&self, project_id: Uuid, owner_id: Uuid) -> Result<bool, AppError>;

    /// Overwrite the project's key; the old key stops matching at once.
    async fn replace_api_key(
        &self,
        project_id: Uuid,
        owner_id: Uuid,
        api_key: &str,
    ) -> Result<Option<Project>, AppError>;

    /// Matching feedback of one project, newest first, with the unpaginated total.
    ///
    /// Callers must have checked project ownership already.
    async fn list_feedback(
        &self,
        project_id: Uuid,
        filter: &FeedbackFilter,
    ) -> Result<FeedbackPage, AppError>;

    /// Newest feedback across all of the owner's projects.
    async fn recent_feedback(
        &self,
        owner_id: Uuid,
        limit: i64,
    ) -> Result<Vec<RecentFeedback>, AppError>;

    async fn update_labels(
        &self,
        feedback_id: Uuid,
        owner_id: Uuid,
        labels: Vec<String>,
    ) -> Result<Option<Feedback>, AppError>;

    async fn delete_feedback(&self, feedback_id: Uuid, owner_id: Uuid) -> Result<bool, AppError>;

    /// Counts for the dashboard. Recent feedback is anything created at or after `since`.
    async fn stats(&self, owner_id: Uuid, since: DateTime<Utc>) -> Result<DashboardStats, AppError>;
}
