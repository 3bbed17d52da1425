//! Data models representing database entities.
//!
//! This module contains all data structures that map to database tables,
//! plus the request and response bodies built around them.

/// Feedback submissions and their vocabularies
pub mod feedback;
/// Projects, their API keys and dashboard aggregates
pub mod project;
/// Owner sessions for dashboard authentication
pub mod session;
