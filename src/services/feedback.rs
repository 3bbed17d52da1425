//! Dashboard-side feedback operations: filtered listing, CSV export, labels, deletion
//! and aggregate counts.

use crate::{
    error::AppError,
    models::{
        feedback::{
            Feedback, FeedbackFilter, FeedbackListQuery, FeedbackPage, FeedbackType, Page,
            RecentFeedback,
        },
        project::DashboardStats,
    },
    services::projects,
    store::Store,
};
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

pub const DEFAULT_PAGE_SIZE: i64 = 50;
pub const MAX_PAGE_SIZE: i64 = 200;
pub const DEFAULT_RECENT_LIMIT: i64 = 5;
pub const MAX_RECENT_LIMIT: i64 = 50;

/// Window counted as "recent" on the dashboard.
pub const RECENT_WINDOW_DAYS: i64 = 7;

const CSV_HEADER: [&str; 10] = [
    "id",
    "createdAt",
    "feedbackType",
    "rating",
    "sentiment",
    "sentimentScore",
    "content",
    "email",
    "labels",
    "userAgent",
];

/// `ALL` or absent means no type filter.
pub fn parse_type_filter(value: Option<&str>) -> Result<Option<FeedbackType>, AppError> {
    match value {
        None | Some("ALL") => Ok(None),
        Some(other) => FeedbackType::parse(other)
            .map(Some)
            .ok_or_else(|| AppError::validation("Invalid feedback type")),
    }
}

/// Turn query parameters into a store filter. Export passes `paginate = false`.
pub fn build_filter(query: &FeedbackListQuery, paginate: bool) -> Result<FeedbackFilter, AppError> {
    let feedback_type = parse_type_filter(query.feedback_type.as_deref())?;
    let label = query
        .label
        .as_deref()
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string);

    let page = paginate.then(|| Page {
        limit: query
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE),
        offset: query.offset.unwrap_or(0).max(0),
    });

    Ok(FeedbackFilter {
        feedback_type,
        label,
        page,
    })
}

/// Trim, drop blanks and remove duplicates while keeping first-seen order.
pub fn normalize_labels(labels: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(labels.len());

    for label in labels {
        let label = label.trim();
        if !label.is_empty() && !normalized.iter().any(|seen| seen == label) {
            normalized.push(label.to_string());
        }
    }

    normalized
}

pub async fn list_for_project(
    store: &dyn Store,
    owner_id: Uuid,
    project_id: Uuid,
    filter: &FeedbackFilter,
) -> Result<FeedbackPage, AppError> {
    // ownership first, so a foreign project looks missing rather than empty
    projects::get_project(store, project_id, owner_id).await?;

    store.list_feedback(project_id, filter).await
}

pub async fn recent(
    store: &dyn Store,
    owner_id: Uuid,
    limit: Option<i64>,
) -> Result<Vec<RecentFeedback>, AppError> {
    let limit = limit
        .unwrap_or(DEFAULT_RECENT_LIMIT)
        .clamp(1, MAX_RECENT_LIMIT);

    store.recent_feedback(owner_id, limit).await
}

pub async fn update_labels(
    store: &dyn Store,
    owner_id: Uuid,
    feedback_id: Uuid,
    labels: Vec<String>,
) -> Result<Feedback, AppError> {
    store
        .update_labels(feedback_id, owner_id, normalize_labels(labels))
        .await?
        .ok_or(AppError::FeedbackNotFound)
}

pub async fn delete(store: &dyn Store, owner_id: Uuid, feedback_id: Uuid) -> Result<(), AppError> {
    if !store.delete_feedback(feedback_id, owner_id).await? {
        return Err(AppError::FeedbackNotFound);
    }

    tracing::info!(%feedback_id, "feedback deleted");
    Ok(())
}

pub async fn stats(
    store: &dyn Store,
    owner_id: Uuid,
    now: DateTime<Utc>,
) -> Result<DashboardStats, AppError> {
    store
        .stats(owner_id, now - Duration::days(RECENT_WINDOW_DAYS))
        .await
}

/// Render feedback rows as CSV, header included even when there are no rows.
pub fn export_csv(feedbacks: &[Feedback]) -> Result<String, AppError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    let write_error = |e: csv::Error| AppError::Internal(format!("csv export failed: {e}"));

    writer.write_record(CSV_HEADER).map_err(write_error)?;

    for feedback in feedbacks {
        let created_at = feedback.created_at.to_rfc3339();
        let rating = feedback.rating.to_string();
        let score = feedback.sentiment_score.to_string();
        let labels = feedback.labels.join("; ");
        let id = feedback.id.to_string();

        writer
            .write_record([
                id.as_str(),
                created_at.as_str(),
                feedback.feedback_type.as_str(),
                rating.as_str(),
                feedback.sentiment.as_str(),
                score.as_str(),
                feedback.content.as_str(),
                feedback.email.as_deref().unwrap_or(""),
                labels.as_str(),
                feedback.user_agent.as_deref().unwrap_or(""),
            ])
            .map_err(write_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("csv export failed: {e}")))?;

    String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("csv export failed: {e}")))
}
