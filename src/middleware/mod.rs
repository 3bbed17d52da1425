//! HTTP middleware components.
//!
//! Both middlewares resolve a credential to a context and inject it into the
//! request's extensions, or short-circuit with HTTP 401.

/// Project API key check for the public ingestion endpoint
pub mod api_key;
/// Owner session check for the dashboard API
pub mod auth;
