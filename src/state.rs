//! Shared application state handed to every handler.

use crate::store::Store;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,

    /// Where the widget script is served from, without a trailing slash.
    pub public_base_url: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, public_base_url: &str) -> Self {
        Self {
            store,
            public_base_url: Arc::from(public_base_url.trim_end_matches('/')),
        }
    }
}
