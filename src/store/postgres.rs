//! PostgreSQL implementation of [`Store`] using sqlx.

use super::Store;
use crate::{
    db::DbPool,
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

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_project_by_api_key(&self, api_key: &str) -> Result<Option<Project>, AppError> {
        let project = sqlx::query_as::<_, Project>(
            "SELECT id, name, api_key, owner_id, created_at FROM projects WHERE api_key = $1",
        )
        .bind(api_key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    async fn insert_feedback(&self, feedback: NewFeedback) -> Result<Feedback, AppError> {
        let created = sqlx::query_as::<_, Feedback>(
            r#"
            INSERT INTO feedback (
                project_id,
                content,
                rating,
                feedback_type,
                email,
                user_agent,
                sentiment,
                sentiment_score
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, project_id, content, rating, feedback_type, email, user_agent,
                      sentiment, sentiment_score, labels, created_at
            "#,
        )
        .bind(feedback.project_id)
        .bind(feedback.content)
        .bind(feedback.rating)
        .bind(feedback.feedback_type.as_str())
        .bind(feedback.email)
        .bind(feedback.user_agent)
        .bind(feedback.sentiment.as_str())
        .bind(feedback.sentiment_score)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_active_session(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<OwnerSession>, AppError> {
        let session = sqlx::query_as::<_, OwnerSession>(
            "SELECT token_hash, owner_id, created_at, expires_at
             FROM owner_sessions
             WHERE token_hash = $1 AND expires_at > $2",
        )
        .bind(token_hash)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    async fn list_projects(&self, owner_id: Uuid) -> Result<Vec<ProjectSummary>, AppError> {
        let projects = sqlx::query_as::<_, ProjectSummary>(
            r#"
            SELECT p.id, p.name, p.api_key, p.owner_id, p.created_at,
                   COUNT(f.id) AS feedback_count
            FROM projects p
            LEFT JOIN feedback f ON f.project_id = p.id
            WHERE p.owner_id = $1
            GROUP BY p.id
            ORDER BY p.created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn find_project(
        &self,
        project_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<ProjectSummary>, AppError> {
        let project = sqlx::query_as::<_, ProjectSummary>(
            r#"
            SELECT p.id, p.name, p.api_key, p.owner_id, p.created_at,
                   COUNT(f.id) AS feedback_count
            FROM projects p
            LEFT JOIN feedback f ON f.project_id = p.id
            WHERE p.id = $1 AND p.owner_id = $2
            GROUP BY p.id
            "#,
        )
        .bind(project_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    async fn insert_project(&self, project: NewProject) -> Result<Project, AppError> {
        let created = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (name, api_key, owner_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, api_key, owner_id, created_at
            "#,
        )
        .bind(project.name)
        .bind(project.api_key)
        .bind(project.owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn delete_project(&self, project_id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        // feedback rows go with it through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND owner_id = $2")
            .bind(project_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn replace_api_key(
        &self,
        project_id: Uuid,
        owner_id: Uuid,
        api_key: &str,
    ) -> Result<Option<Project>, AppError> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET api_key = $3
            WHERE id = $1 AND owner_id = $2
            RETURNING id, name, api_key, owner_id, created_at
            "#,
        )
        .bind(project_id)
        .bind(owner_id)
        .bind(api_key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    async fn list_feedback(
        &self,
        project_id: Uuid,
        filter: &FeedbackFilter,
    ) -> Result<FeedbackPage, AppError> {
        let feedback_type = filter.feedback_type.map(|kind| kind.as_str());
        let (limit, offset) = match filter.page {
            Some(page) => (Some(page.limit), page.offset),
            // LIMIT NULL means no limit
            None => (None, 0),
        };

        let feedbacks = sqlx::query_as::<_, Feedback>(
            r#"
            SELECT id, project_id, content, rating, feedback_type, email, user_agent,
                   sentiment, sentiment_score, labels, created_at
            FROM feedback
            WHERE project_id = $1
              AND ($2::text IS NULL OR feedback_type = $2)
              AND ($3::text IS NULL OR $3 = ANY(labels))
            ORDER BY created_at DESC, id
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(project_id)
        .bind(feedback_type)
        .bind(filter.label.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM feedback
            WHERE project_id = $1
              AND ($2::text IS NULL OR feedback_type = $2)
              AND ($3::text IS NULL OR $3 = ANY(labels))
            "#,
        )
        .bind(project_id)
        .bind(feedback_type)
        .bind(filter.label.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(FeedbackPage { feedbacks, total })
    }

    async fn recent_feedback(
        &self,
        owner_id: Uuid,
        limit: i64,
    ) -> Result<Vec<RecentFeedback>, AppError> {
        let recent = sqlx::query_as::<_, RecentFeedback>(
            r#"
            SELECT f.id, f.project_id, f.content, f.rating, f.feedback_type, f.email,
                   f.user_agent, f.sentiment, f.sentiment_score, f.labels, f.created_at,
                   p.name AS project_name
            FROM feedback f
            JOIN projects p ON p.id = f.project_id
            WHERE p.owner_id = $1
            ORDER BY f.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(owner_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(recent)
    }

    async fn update_labels(
        &self,
        feedback_id: Uuid,
        owner_id: Uuid,
        labels: Vec<String>,
    ) -> Result<Option<Feedback>, AppError> {
        let updated = sqlx::query_as::<_, Feedback>(
            r#"
            UPDATE feedback f
            SET labels = $3
            FROM projects p
            WHERE f.id = $1 AND p.id = f.project_id AND p.owner_id = $2
            RETURNING f.id, f.project_id, f.content, f.rating, f.feedback_type, f.email,
                      f.user_agent, f.sentiment, f.sentiment_score, f.labels, f.created_at
            "#,
        )
        .bind(feedback_id)
        .bind(owner_id)
        .bind(labels)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete_feedback(&self, feedback_id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM feedback f
            USING projects p
            WHERE f.id = $1 AND p.id = f.project_id AND p.owner_id = $2
            "#,
        )
        .bind(feedback_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn stats(&self, owner_id: Uuid, since: DateTime<Utc>) -> Result<DashboardStats, AppError> {
        let stats = sqlx::query_as::<_, DashboardStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM projects WHERE owner_id = $1) AS project_count,
                (SELECT COUNT(*)
                 FROM feedback f JOIN projects p ON p.id = f.project_id
                 WHERE p.owner_id = $1) AS feedback_count,
                (SELECT COUNT(*)
                 FROM feedback f JOIN projects p ON p.id = f.project_id
                 WHERE p.owner_id = $1 AND f.created_at >= $2) AS recent_feedback_count
            "#,
        )
        .bind(owner_id)
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }
}
