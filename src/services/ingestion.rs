//! Feedback ingestion - validation, classification and persistence of one submission.
//!
//! # Process
//!
//! 1. Validate and normalize the JSON body (after the API key has been authorized)
//! 2. Classify the trimmed content
//! 3. Insert one feedback row for the authorized project
//!
//! Classification happens before the insert, so a stored row always carries the
//! sentiment of its own content. Nothing is deduplicated: identical submissions
//! create identical rows.

use crate::{
    error::AppError,
    models::{
        feedback::{Feedback, FeedbackType, NewFeedback},
        project::Project,
    },
    sentiment,
    store::Store,
};
use serde_json::Value;

pub const CONTENT_REQUIRED: &str = "Content is required";
pub const RATING_OUT_OF_RANGE: &str = "Rating must be between 1 and 5";

/// A validated submission, ready to classify.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    /// Trimmed, never empty
    pub content: String,

    /// 1..=5
    pub rating: i16,

    pub feedback_type: FeedbackType,

    /// Trimmed; `None` when absent or blank
    pub email: Option<String>,
}

/// Parse and validate a raw request body.
///
/// A body that is not JSON carries no fields, so it fails on `content` like an empty object.
pub fn parse_submission(body: &[u8]) -> Result<Submission, AppError> {
    let value = serde_json::from_slice::<Value>(body).unwrap_or(Value::Null);
    validate_submission(&value)
}

/// Validate the submission fields of a JSON body.
///
/// # Rules
///
/// - `content`: string, non-empty after trimming
/// - `rating`: JSON number with no fractional part, 1 to 5 inclusive
/// - `feedbackType`: anything but `BUG`, `FEATURE` or `OTHER` becomes `OTHER`
/// - `email`: trimmed, blank becomes absent
pub fn validate_submission(body: &Value) -> Result<Submission, AppError> {
    let content = body
        .get("content")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|content| !content.is_empty())
        .ok_or_else(|| AppError::validation(CONTENT_REQUIRED))?;

    let rating = body
        .get("rating")
        .and_then(parse_rating)
        .ok_or_else(|| AppError::validation(RATING_OUT_OF_RANGE))?;

    let feedback_type = FeedbackType::coerce(body.get("feedbackType").and_then(Value::as_str));

    let email = body
        .get("email")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .map(str::to_string);

    Ok(Submission {
        content: content.to_string(),
        rating,
        feedback_type,
        email,
    })
}

fn parse_rating(value: &Value) -> Option<i16> {
    let rating = value.as_f64()?;

    if rating.fract() != 0.0 || !(1.0..=5.0).contains(&rating) {
        return None;
    }

    Some(rating as i16)
}

/// Classify and store a validated submission for `project`.
///
/// # Errors
///
/// Only persistence failures; the submission has already been validated.
pub async fn record(
    store: &dyn Store,
    project: &Project,
    submission: Submission,
    user_agent: Option<String>,
) -> Result<Feedback, AppError> {
    let classification = sentiment::classify(&submission.content);

    let feedback = store
        .insert_feedback(NewFeedback {
            project_id: project.id,
            content: submission.content,
            rating: submission.rating,
            feedback_type: submission.feedback_type,
            email: submission.email,
            user_agent,
            sentiment: classification.sentiment,
            sentiment_score: classification.score,
        })
        .await?;

    tracing::info!(
        project_id = %project.id,
        feedback_id = %feedback.id,
        sentiment = feedback.sentiment.as_str(),
        "feedback recorded"
    );

    Ok(feedback)
}
