//! Business logic services.
//!
//! Services contain the core logic separated from HTTP handlers. They take a
//! `&dyn Store` and return `AppError`s that handlers pass straight through.

pub mod feedback;
pub mod ingestion;
pub mod projects;
