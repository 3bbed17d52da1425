//! Embeddable feedback widget.
//!
//! Sites include one script tag (see [`crate::services::projects::embed_snippet`]). The
//! widget finds its project key on that tag, draws a floating trigger button and a modal
//! form, and posts submissions to the ingestion endpoint.
//!
//! - [`boot`]: key discovery, base URL, pre-load command queue
//! - [`state`]: the modal/form state machine
//! - [`view`]: rendering to an element tree
//! - [`style`]: the injected stylesheet
//! - [`runtime`]: wiring to a page host and an HTTP transport

pub mod boot;
pub mod runtime;
pub mod state;
pub mod style;
pub mod view;

pub use boot::{Command, CommandQueue, ScriptTag, WidgetConfig};
pub use runtime::{Host, HttpTransport, Transport, WidgetRuntime};
pub use state::{Event, Widget};
