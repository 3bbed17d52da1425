//! HTTP request handlers (route handlers).
//!
//! Each handler extracts request data, delegates to a service and returns JSON.

/// Rejection-mapping wrappers around axum's extractors
pub mod extract;
/// Owner-facing feedback management and dashboard counts
pub mod feedback;
/// Liveness and store connectivity
pub mod health;
/// Public ingestion endpoint used by the widget
pub mod ingest;
/// Project management, embed snippets and per-project feedback listing
pub mod projects;
