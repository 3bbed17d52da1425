//! Extractors that report rejections as [`AppError`].
//!
//! axum's own `Json`, `Path` and `Query` answer a bad request with a plain-text body.
//! These wrappers run the same extraction and turn the rejection into a
//! `{"error": ...}` 400 like every other failure.

use crate::error::AppError;
use axum::extract::{FromRequest, FromRequestParts};

/// JSON request body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Path parameters, e.g. a project or feedback id.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// Query string parameters.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
