//! In-process implementation of [`Store`].
//!
//! Mirrors the PostgreSQL schema's guarantees that the service relies on: unique API
//! keys, cascade deletion of feedback, owner scoping and newest-first ordering.

use super::Store;
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
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    /// Insertion order; newest last.
    projects: Vec<Project>,
    /// Insertion order; newest last.
    feedback: Vec<Feedback>,
    sessions: HashMap<String, OwnerSession>,
}

impl Inner {
    fn owned_project(&self, project_id: Uuid, owner_id: Uuid) -> Option<&Project> {
        self.projects
            .iter()
            .find(|p| p.id == project_id && p.owner_id == owner_id)
    }

    fn owns_feedback(&self, feedback: &Feedback, owner_id: Uuid) -> bool {
        self.owned_project(feedback.project_id, owner_id).is_some()
    }

    fn summarize(&self, project: &Project) -> ProjectSummary {
        let feedback_count = self
            .feedback
            .iter()
            .filter(|f| f.project_id == project.id)
            .count() as i64;

        ProjectSummary {
            project: project.clone(),
            feedback_count,
        }
    }

    fn key_in_use(&self, api_key: &str) -> bool {
        self.projects.iter().any(|p| p.api_key == api_key)
    }

    /// Feedback newest first. Rows sharing a timestamp keep reverse insertion order.
    fn feedback_newest_first(&self) -> Vec<&Feedback> {
        let mut rows: Vec<&Feedback> = self.feedback.iter().rev().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session the way the sign-in provider would.
    pub async fn insert_session(
        &self,
        token_hash: impl Into<String>,
        owner_id: Uuid,
        expires_at: DateTime<Utc>,
    ) {
        let token_hash = token_hash.into();
        let session = OwnerSession {
            token_hash: token_hash.clone(),
            owner_id,
            created_at: Utc::now(),
            expires_at,
        };

        self.inner.write().await.sessions.insert(token_hash, session);
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn find_project_by_api_key(&self, api_key: &str) -> Result<Option<Project>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.projects.iter().find(|p| p.api_key == api_key).cloned())
    }

    async fn insert_feedback(&self, feedback: NewFeedback) -> Result<Feedback, AppError> {
        let mut inner = self.inner.write().await;

        if !inner.projects.iter().any(|p| p.id == feedback.project_id) {
            return Err(AppError::Internal(format!(
                "feedback references missing project {}",
                feedback.project_id
            )));
        }

        let created = Feedback {
            id: Uuid::new_v4(),
            project_id: feedback.project_id,
            content: feedback.content,
            rating: feedback.rating,
            feedback_type: feedback.feedback_type,
            email: feedback.email,
            user_agent: feedback.user_agent,
            sentiment: feedback.sentiment,
            sentiment_score: feedback.sentiment_score,
            labels: Vec::new(),
            created_at: Utc::now(),
        };
        inner.feedback.push(created.clone());

        Ok(created)
    }

    async fn find_active_session(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<OwnerSession>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .sessions
            .get(token_hash)
            .filter(|session| session.is_active_at(now))
            .cloned())
    }

    async fn list_projects(&self, owner_id: Uuid) -> Result<Vec<ProjectSummary>, AppError> {
        let inner = self.inner.read().await;

        let mut owned: Vec<&Project> = inner
            .projects
            .iter()
            .rev()
            .filter(|p| p.owner_id == owner_id)
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(owned.into_iter().map(|p| inner.summarize(p)).collect())
    }

    async fn find_project(
        &self,
        project_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<ProjectSummary>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .owned_project(project_id, owner_id)
            .map(|p| inner.summarize(p)))
    }

    async fn insert_project(&self, project: NewProject) -> Result<Project, AppError> {
        let mut inner = self.inner.write().await;

        if inner.key_in_use(&project.api_key) {
            return Err(AppError::Internal("duplicate api_key".to_string()));
        }

        let created = Project {
            id: Uuid::new_v4(),
            name: project.name,
            api_key: project.api_key,
            owner_id: project.owner_id,
            created_at: Utc::now(),
        };
        inner.projects.push(created.clone());

        Ok(created)
    }

    async fn delete_project(&self, project_id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;

        if inner.owned_project(project_id, owner_id).is_none() {
            return Ok(false);
        }

        inner.projects.retain(|p| p.id != project_id);
        inner.feedback.retain(|f| f.project_id != project_id);

        Ok(true)
    }

    async fn replace_api_key(
        &self,
        project_id: Uuid,
        owner_id: Uuid,
        api_key: &str,
    ) -> Result<Option<Project>, AppError> {
        let mut inner = self.inner.write().await;

        if inner.key_in_use(api_key) {
            return Err(AppError::Internal("duplicate api_key".to_string()));
        }

        Ok(inner
            .projects
            .iter_mut()
            .find(|p| p.id == project_id && p.owner_id == owner_id)
            .map(|project| {
                project.api_key = api_key.to_string();
                project.clone()
            }))
    }

    async fn list_feedback(
        &self,
        project_id: Uuid,
        filter: &FeedbackFilter,
    ) -> Result<FeedbackPage, AppError> {
        let inner = self.inner.read().await;

        let matching: Vec<&Feedback> = inner
            .feedback_newest_first()
            .into_iter()
            .filter(|f| f.project_id == project_id && filter.matches(f))
            .collect();
        let total = matching.len() as i64;

        let (skip, take) = match filter.page {
            Some(page) => (page.offset.max(0) as usize, page.limit.max(0) as usize),
            None => (0, usize::MAX),
        };

        let feedbacks = matching
            .into_iter()
            .skip(skip)
            .take(take)
            .cloned()
            .collect();

        Ok(FeedbackPage { feedbacks, total })
    }

    async fn recent_feedback(
        &self,
        owner_id: Uuid,
        limit: i64,
    ) -> Result<Vec<RecentFeedback>, AppError> {
        let inner = self.inner.read().await;

        Ok(inner
            .feedback_newest_first()
            .into_iter()
            .filter_map(|f| {
                inner
                    .owned_project(f.project_id, owner_id)
                    .map(|project| RecentFeedback {
                        feedback: f.clone(),
                        project_name: project.name.clone(),
                    })
            })
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn update_labels(
        &self,
        feedback_id: Uuid,
        owner_id: Uuid,
        labels: Vec<String>,
    ) -> Result<Option<Feedback>, AppError> {
        let mut inner = self.inner.write().await;

        let owned = inner
            .feedback
            .iter()
            .find(|f| f.id == feedback_id)
            .is_some_and(|f| inner.owns_feedback(f, owner_id));
        if !owned {
            return Ok(None);
        }

        Ok(inner
            .feedback
            .iter_mut()
            .find(|f| f.id == feedback_id)
            .map(|feedback| {
                feedback.labels = labels;
                feedback.clone()
            }))
    }

    async fn delete_feedback(&self, feedback_id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;

        let owned = inner
            .feedback
            .iter()
            .find(|f| f.id == feedback_id)
            .is_some_and(|f| inner.owns_feedback(f, owner_id));
        if owned {
            inner.feedback.retain(|f| f.id != feedback_id);
        }

        Ok(owned)
    }

    async fn stats(&self, owner_id: Uuid, since: DateTime<Utc>) -> Result<DashboardStats, AppError> {
        let inner = self.inner.read().await;

        let owned: Vec<&Feedback> = inner
            .feedback
            .iter()
            .filter(|f| inner.owns_feedback(f, owner_id))
            .collect();

        Ok(DashboardStats {
            project_count: inner.projects.iter().filter(|p| p.owner_id == owner_id).count() as i64,
            feedback_count: owned.len() as i64,
            recent_feedback_count: owned.iter().filter(|f| f.created_at >= since).count() as i64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::feedback::{FeedbackType, Page, Sentiment};

    fn new_feedback(project_id: Uuid, content: &str, kind: FeedbackType) -> NewFeedback {
        NewFeedback {
            project_id,
            content: content.to_string(),
            rating: 4,
            feedback_type: kind,
            email: None,
            user_agent: None,
            sentiment: Sentiment::Neutral,
            sentiment_score: 0.0,
        }
    }

    async fn project(store: &MemoryStore, owner_id: Uuid, key: &str) -> Project {
        store
            .insert_project(NewProject {
                name: "Site".to_string(),
                api_key: key.to_string(),
                owner_id,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn deleting_a_project_cascades_to_feedback() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let project = project(&store, owner, "fp_a").await;
        store
            .insert_feedback(new_feedback(project.id, "one", FeedbackType::Bug))
            .await
            .unwrap();

        assert!(store.delete_project(project.id, owner).await.unwrap());

        let page = store
            .list_feedback(project.id, &FeedbackFilter::default())
            .await
            .unwrap();
        assert_eq!(page.total, 0);
        assert!(store.find_project_by_api_key("fp_a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn other_owners_cannot_touch_resources() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let project = project(&store, owner, "fp_b").await;
        let feedback = store
            .insert_feedback(new_feedback(project.id, "one", FeedbackType::Bug))
            .await
            .unwrap();

        assert!(store.find_project(project.id, stranger).await.unwrap().is_none());
        assert!(!store.delete_project(project.id, stranger).await.unwrap());
        assert!(!store.delete_feedback(feedback.id, stranger).await.unwrap());
        assert!(
            store
                .update_labels(feedback.id, stranger, vec!["x".to_string()])
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            store
                .replace_api_key(project.id, stranger, "fp_c")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn listing_filters_then_paginates_newest_first() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let project = project(&store, owner, "fp_d").await;
        for (content, kind) in [
            ("first", FeedbackType::Bug),
            ("second", FeedbackType::Feature),
            ("third", FeedbackType::Bug),
            ("fourth", FeedbackType::Bug),
        ] {
            store
                .insert_feedback(new_feedback(project.id, content, kind))
                .await
                .unwrap();
        }

        let filter = FeedbackFilter {
            feedback_type: Some(FeedbackType::Bug),
            label: None,
            page: Some(Page {
                limit: 2,
                offset: 0,
            }),
        };
        let page = store.list_feedback(project.id, &filter).await.unwrap();

        assert_eq!(page.total, 3);
        let contents: Vec<&str> = page.feedbacks.iter().map(|f| f.content.as_str()).collect();
        assert_eq!(contents, ["fourth", "third"]);
    }

    #[tokio::test]
    async fn api_keys_stay_unique() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        project(&store, owner, "fp_same").await;

        let duplicate = store
            .insert_project(NewProject {
                name: "Other".to_string(),
                api_key: "fp_same".to_string(),
                owner_id: owner,
            })
            .await;
        assert!(duplicate.is_err());
    }

    #[tokio::test]
    async fn expired_sessions_are_not_found() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let now = Utc::now();
        store
            .insert_session("expired", owner, now - chrono::Duration::minutes(1))
            .await;
        store
            .insert_session("live", owner, now + chrono::Duration::hours(1))
            .await;

        assert!(store.find_active_session("expired", now).await.unwrap().is_none());
        assert_eq!(
            store
                .find_active_session("live", now)
                .await
                .unwrap()
                .map(|s| s.owner_id),
            Some(owner)
        );
    }
}
