//! Feedback data models and API request/response types.
//!
//! This module defines:
//! - `Feedback`: Database entity representing one submission
//! - `FeedbackType` and `Sentiment`: the closed vocabularies stored alongside it
//! - Filter, page and response types used by the dashboard

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored value did not match any known variant.
#[derive(Debug, thiserror::Error)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

/// Category the end user picked in the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FeedbackType {
    Bug,
    Feature,
    #[default]
    Other,
}

impl FeedbackType {
    /// Order in which the widget presents the choices.
    pub const ALL: [FeedbackType; 3] = [FeedbackType::Other, FeedbackType::Bug, FeedbackType::Feature];

    pub fn as_str(self) -> &'static str {
        match self {
            FeedbackType::Bug => "BUG",
            FeedbackType::Feature => "FEATURE",
            FeedbackType::Other => "OTHER",
        }
    }

    /// Exact, case-sensitive match on the wire value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "BUG" => Some(FeedbackType::Bug),
            "FEATURE" => Some(FeedbackType::Feature),
            "OTHER" => Some(FeedbackType::Other),
            _ => None,
        }
    }

    /// Submission coercion: anything unrecognized or missing becomes `Other`.
    pub fn coerce(value: Option<&str>) -> Self {
        value.and_then(Self::parse).unwrap_or_default()
    }
}

impl TryFrom<String> for FeedbackType {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or(UnknownVariant {
            kind: "feedback type",
            value,
        })
    }
}

/// Derived sentiment label. Never supplied by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

impl TryFrom<String> for Sentiment {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "positive" => Ok(Sentiment::Positive),
            "neutral" => Ok(Sentiment::Neutral),
            "negative" => Ok(Sentiment::Negative),
            _ => Err(UnknownVariant {
                kind: "sentiment",
                value,
            }),
        }
    }
}

/// Represents a feedback record from the database.
///
/// # Database Table
///
/// Maps to the `feedback` table. Each row:
/// - Belongs to the project whose key authorized it (cascade-deleted with it)
/// - Is immutable apart from `labels`
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: Uuid,

    pub project_id: Uuid,

    /// Trimmed, non-empty submission text
    pub content: String,

    /// 1 to 5 inclusive (CHECK constraint)
    pub rating: i16,

    #[sqlx(try_from = "String")]
    pub feedback_type: FeedbackType,

    pub email: Option<String>,

    pub user_agent: Option<String>,

    #[sqlx(try_from = "String")]
    pub sentiment: Sentiment,

    /// Confidence magnitude in [0, 1]
    pub sentiment_score: f64,

    /// Owner-assigned tags, ordered, no duplicates
    pub labels: Vec<String>,

    pub created_at: DateTime<Utc>,
}

/// Normalized fields of a submission about to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFeedback {
    pub project_id: Uuid,
    pub content: String,
    pub rating: i16,
    pub feedback_type: FeedbackType,
    pub email: Option<String>,
    pub user_agent: Option<String>,
    pub sentiment: Sentiment,
    pub sentiment_score: f64,
}

/// Feedback joined with the name of its project, for the dashboard's recent list.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentFeedback {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub feedback: Feedback,

    pub project_name: String,
}

/// Pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

/// Which feedback rows of a project to return.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackFilter {
    /// `None` means every type.
    pub feedback_type: Option<FeedbackType>,

    /// Exact tag that must be present.
    pub label: Option<String>,

    /// `None` returns every matching row.
    pub page: Option<Page>,
}

impl FeedbackFilter {
    pub fn matches(&self, feedback: &Feedback) -> bool {
        self.feedback_type
            .is_none_or(|kind| feedback.feedback_type == kind)
            && self
                .label
                .as_ref()
                .is_none_or(|label| feedback.labels.contains(label))
    }
}

/// One page of a project's feedback plus the total number of matching rows.
#[derive(Debug, Serialize)]
pub struct FeedbackPage {
    pub feedbacks: Vec<Feedback>,
    pub total: i64,
}

/// Query string accepted by the feedback listing and export endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct FeedbackListQuery {
    #[serde(rename = "type")]
    pub feedback_type: Option<String>,
    pub label: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query string for the recent feedback endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<i64>,
}

/// Body of a successful ingestion call.
///
/// ```json
/// { "success": true, "id": "550e8400-e29b-41d4-a716-446655440000" }
/// ```
#[derive(Debug, Serialize)]
pub struct SubmitFeedbackResponse {
    pub success: bool,
    pub id: Uuid,
}

/// Request body for replacing a feedback's labels.
#[derive(Debug, Deserialize)]
pub struct UpdateLabelsRequest {
    pub labels: Vec<String>,
}
