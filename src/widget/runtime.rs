//! Drives a [`Widget`] against a page host and a network transport.
//!
//! The runtime owns one widget instance. It applies events, carries out the resulting
//! effects through [`Host`] and re-mounts the rendered tree after every change.
//!
//! Submissions run as background tasks, so the page keeps delivering events (closing
//! the modal included) while a request is out. A request is never cancelled by the
//! widget; its outcome is applied by [`WidgetRuntime::settle`] and dropped by the state
//! machine when the form it belonged to has been reset in the meantime.

use super::{
    boot::{self, Bootstrap, Command, CommandQueue, ScriptTag},
    state::{Effect, Event, SubmissionRequest, Ticket, Widget},
    style::{STYLE_ELEMENT_ID, STYLESHEET},
    view::{self, Node},
};
use async_trait::async_trait;
use std::{sync::Arc, time::Duration};
use tokio::task::JoinSet;

/// The page the widget lives in.
pub trait Host {
    fn has_element(&self, id: &str) -> bool;

    fn inject_style(&mut self, id: &str, css: &str);

    /// Replace whatever the widget mounted before with `root`.
    fn mount(&mut self, root: &Node);

    fn set_scroll_locked(&mut self, locked: bool);

    /// Arrange for [`WidgetRuntime::close_transition_ended`] to be called after `delay`.
    fn schedule_close_transition(&mut self, delay: Duration);
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("ingestion endpoint answered {0}")]
    Status(u16),
}

#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn send(&self, request: &SubmissionRequest) -> Result<(), TransportError>;
}

/// Posts submissions as JSON with the project key in `X-API-Key`.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &SubmissionRequest) -> Result<(), TransportError> {
        let response = self
            .client
            .post(&request.endpoint)
            .header("X-API-Key", &request.api_key)
            .json(&request.payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        Ok(())
    }
}

/// Result of one submission, as reported by its background task.
struct Completion {
    ticket: Ticket,
    result: Result<(), TransportError>,
}

pub struct WidgetRuntime<H, T> {
    widget: Widget,
    host: H,
    transport: Arc<T>,
    submissions: JoinSet<Completion>,
}

impl<H: Host, T: Transport> WidgetRuntime<H, T> {
    /// Boot the widget on a page.
    ///
    /// Returns `None`, leaving the host untouched, when neither the script tags nor the
    /// queued commands provide a project key. Otherwise styles are injected (once per
    /// page), the widget is mounted and queued `Open`/`Close` commands are replayed.
    ///
    /// Must be called within a Tokio runtime; submissions are spawned onto it.
    pub fn start(mut host: H, transport: T, scripts: &[ScriptTag], queue: CommandQueue) -> Option<Self> {
        let Some(Bootstrap { config, replay }) = boot::bootstrap(scripts, queue) else {
            tracing::warn!("feedback widget: no project key found, not starting");
            return None;
        };

        if !host.has_element(STYLE_ELEMENT_ID) {
            host.inject_style(STYLE_ELEMENT_ID, STYLESHEET);
        }

        let mut runtime = Self {
            widget: Widget::new(config),
            host,
            transport: Arc::new(transport),
            submissions: JoinSet::new(),
        };
        runtime.render();

        for command in replay {
            runtime.command(command);
        }

        Some(runtime)
    }

    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Submissions whose outcome has not been applied yet.
    pub fn pending_submissions(&self) -> usize {
        self.submissions.len()
    }

    /// Programmatic commands issued after load.
    pub fn command(&mut self, command: Command) {
        match command {
            Command::Init { .. } => {
                tracing::debug!("widget already initialized, ignoring init command");
            }
            Command::Open => self.dispatch(Event::TriggerClicked),
            Command::Close => self.dispatch(Event::CloseClicked),
        }
    }

    pub fn close_transition_ended(&mut self) {
        self.dispatch(Event::CloseTransitionEnded);
    }

    pub fn dispatch(&mut self, event: Event) {
        for effect in self.widget.dispatch(event) {
            match effect {
                Effect::LockScroll => self.host.set_scroll_locked(true),
                Effect::UnlockScroll => self.host.set_scroll_locked(false),
                Effect::ScheduleReset(delay) => self.host.schedule_close_transition(delay),
                Effect::Send(request) => self.spawn_submission(request),
            }
        }

        self.render();
    }

    /// Wait for the next submission to finish and apply its outcome.
    ///
    /// Returns `false` without waiting when nothing is in flight.
    pub async fn next_completion(&mut self) -> bool {
        let Some(joined) = self.submissions.join_next().await else {
            return false;
        };

        match joined {
            Ok(completion) => self.complete(completion),
            Err(e) => tracing::error!(error = %e, "feedback submission task failed"),
        }
        true
    }

    /// Apply the outcome of every submission still in flight.
    pub async fn settle(&mut self) {
        while self.next_completion().await {}
    }

    fn spawn_submission(&mut self, request: SubmissionRequest) {
        let transport = Arc::clone(&self.transport);
        self.submissions.spawn(async move {
            Completion {
                ticket: request.ticket,
                result: transport.send(&request).await,
            }
        });
    }

    fn complete(&mut self, Completion { ticket, result }: Completion) {
        let event = match result {
            Ok(()) => Event::SubmissionSucceeded(ticket),
            Err(e) => {
                tracing::warn!(error = %e, "feedback submission failed");
                Event::SubmissionFailed(ticket)
            }
        };
        self.dispatch(event);
    }

    fn render(&mut self) {
        self.host.mount(&view::render(&self.widget));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::feedback::FeedbackType,
        widget::{
            boot::KEY_ATTRIBUTE,
            state::{CLOSE_TRANSITION, FeedbackPayload, ModalState, ModalView, SUBMISSION_FAILED},
        },
    };
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };
    use tokio::sync::Semaphore;

    #[derive(Default)]
    struct FakePage {
        styles: Vec<String>,
        mounted: Option<Node>,
        scroll_locked: bool,
        scheduled: Vec<Duration>,
    }

    impl Host for FakePage {
        fn has_element(&self, id: &str) -> bool {
            self.styles.iter().any(|s| s == id)
                || self.mounted.as_ref().is_some_and(|root| root.find_by_id(id).is_some())
        }

        fn inject_style(&mut self, id: &str, _css: &str) {
            self.styles.push(id.to_string());
        }

        fn mount(&mut self, root: &Node) {
            self.mounted = Some(root.clone());
        }

        fn set_scroll_locked(&mut self, locked: bool) {
            self.scroll_locked = locked;
        }

        fn schedule_close_transition(&mut self, delay: Duration) {
            self.scheduled.push(delay);
        }
    }

    struct FakeTransport {
        fail: bool,
        sent: Mutex<Vec<SubmissionRequest>>,
    }

    impl FakeTransport {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn send(&self, request: &SubmissionRequest) -> Result<(), TransportError> {
            self.sent.lock().unwrap().push(request.clone());
            if self.fail {
                return Err(TransportError::Status(500));
            }
            Ok(())
        }
    }

    /// Holds every request until the test releases it.
    struct GatedTransport {
        release: Semaphore,
        completed: AtomicUsize,
    }

    impl GatedTransport {
        fn new() -> Self {
            Self {
                release: Semaphore::new(0),
                completed: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Transport for GatedTransport {
        async fn send(&self, _request: &SubmissionRequest) -> Result<(), TransportError> {
            let permit = self.release.acquire().await.unwrap();
            permit.forget();
            self.completed.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn scripts() -> Vec<ScriptTag> {
        vec![
            ScriptTag::new()
                .with_attribute("src", "https://pulse.example.com/widget.js")
                .with_attribute(KEY_ATTRIBUTE, "fp_live"),
        ]
    }

    fn started<T: Transport>(transport: T) -> WidgetRuntime<FakePage, T> {
        WidgetRuntime::start(FakePage::default(), transport, &scripts(), CommandQueue::new()).unwrap()
    }

    fn fill_and_submit<T: Transport>(runtime: &mut WidgetRuntime<FakePage, T>) {
        runtime.dispatch(Event::TriggerClicked);
        runtime.dispatch(Event::TypeSelected(FeedbackType::Bug));
        runtime.dispatch(Event::StarSelected(2));
        runtime.dispatch(Event::ContentChanged("Checkout button does nothing".to_string()));
        runtime.dispatch(Event::EmailChanged("me@example.com".to_string()));
        runtime.dispatch(Event::SubmitClicked);
    }

    #[tokio::test]
    async fn no_key_leaves_the_page_alone() {
        let scripts = vec![ScriptTag::new().with_attribute("src", "/widget.js")];

        let runtime =
            WidgetRuntime::start(FakePage::default(), FakeTransport::new(false), &scripts, CommandQueue::new());

        assert!(runtime.is_none());
    }

    #[tokio::test]
    async fn start_injects_styles_and_mounts() {
        let runtime = started(FakeTransport::new(false));

        assert_eq!(runtime.host().styles, [STYLE_ELEMENT_ID]);
        assert!(runtime.host().has_element(view::ROOT_ID));
        assert_eq!(runtime.widget().modal(), ModalState::Hidden);
    }

    #[tokio::test]
    async fn styles_are_not_injected_twice() {
        let mut page = FakePage::default();
        page.inject_style(STYLE_ELEMENT_ID, STYLESHEET);

        let runtime =
            WidgetRuntime::start(page, FakeTransport::new(false), &scripts(), CommandQueue::new()).unwrap();

        assert_eq!(runtime.host().styles.len(), 1);
    }

    #[tokio::test]
    async fn queued_open_is_replayed() {
        let mut queue = CommandQueue::new();
        queue.push(Command::Open);

        let runtime =
            WidgetRuntime::start(FakePage::default(), FakeTransport::new(false), &scripts(), queue).unwrap();

        assert_eq!(runtime.widget().modal(), ModalState::Open);
        assert!(runtime.host().scroll_locked);
    }

    #[tokio::test]
    async fn successful_submission_posts_once_and_shows_thanks() {
        let mut runtime = started(FakeTransport::new(false));

        fill_and_submit(&mut runtime);
        runtime.settle().await;

        let sent = runtime.transport.sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].endpoint, "https://pulse.example.com/api/feedback");
        assert_eq!(sent[0].api_key, "fp_live");
        assert_eq!(
            sent[0].payload,
            FeedbackPayload {
                content: "Checkout button does nothing".to_string(),
                rating: 2,
                feedback_type: FeedbackType::Bug,
                email: Some("me@example.com".to_string()),
            }
        );

        assert_eq!(runtime.widget().view(), ModalView::Success);
        let mounted = runtime.host().mounted.as_ref().unwrap();
        assert!(mounted.text().contains("Thank You!"));
        assert!(mounted.find_by_id("fp-submit").is_none());
    }

    #[tokio::test]
    async fn failed_submission_shows_generic_error_and_keeps_input() {
        let mut runtime = started(FakeTransport::new(true));

        fill_and_submit(&mut runtime);
        runtime.settle().await;

        assert_eq!(runtime.widget().view(), ModalView::Form);
        assert_eq!(runtime.widget().error(), Some(SUBMISSION_FAILED));
        assert_eq!(runtime.widget().form().content, "Checkout button does nothing");

        let mounted = runtime.host().mounted.as_ref().unwrap();
        let submit = mounted.find_by_id("fp-submit").unwrap();
        assert_eq!(submit.get_attr("disabled"), None);
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_network() {
        let mut runtime = started(FakeTransport::new(false));

        runtime.dispatch(Event::TriggerClicked);
        runtime.dispatch(Event::SubmitClicked);

        assert_eq!(runtime.pending_submissions(), 0);
        assert!(!runtime.next_completion().await);
        assert!(runtime.transport.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn busy_state_is_mounted_while_the_request_is_out() {
        let mut runtime = started(GatedTransport::new());

        fill_and_submit(&mut runtime);

        assert!(runtime.widget().is_submitting());
        assert_eq!(runtime.pending_submissions(), 1);
        let mounted = runtime.host().mounted.as_ref().unwrap();
        assert!(mounted.find_by_id("fp-submit").unwrap().get_attr("disabled").is_some());

        runtime.transport.release.add_permits(1);
        runtime.settle().await;

        assert!(!runtime.widget().is_submitting());
        assert_eq!(runtime.widget().view(), ModalView::Success);
    }

    #[tokio::test]
    async fn closing_during_a_submission_lets_it_finish_and_ignores_its_outcome() {
        let mut runtime = started(GatedTransport::new());
        fill_and_submit(&mut runtime);
        assert!(runtime.widget().is_submitting());

        runtime.dispatch(Event::CloseClicked);
        assert_eq!(runtime.widget().modal(), ModalState::Closing);
        assert!(!runtime.host().scroll_locked);

        runtime.close_transition_ended();
        assert_eq!(runtime.widget().modal(), ModalState::Hidden);
        assert!(!runtime.widget().is_submitting());
        assert_eq!(runtime.pending_submissions(), 1);

        runtime.transport.release.add_permits(1);
        assert!(runtime.next_completion().await);

        assert_eq!(runtime.transport.completed.load(Ordering::SeqCst), 1);
        assert_eq!(runtime.widget().modal(), ModalState::Hidden);
        assert_eq!(runtime.widget().view(), ModalView::Form);
        assert_eq!(runtime.widget().error(), None);
        assert!(runtime.widget().form().content.is_empty());
    }

    #[tokio::test]
    async fn close_unlocks_scroll_and_resets_after_transition() {
        let mut runtime = started(FakeTransport::new(false));
        fill_and_submit(&mut runtime);
        runtime.settle().await;

        runtime.command(Command::Close);

        assert!(!runtime.host().scroll_locked);
        assert_eq!(runtime.host().scheduled, [CLOSE_TRANSITION]);
        assert_eq!(runtime.widget().modal(), ModalState::Closing);

        runtime.close_transition_ended();

        assert_eq!(runtime.widget().modal(), ModalState::Hidden);
        assert_eq!(runtime.widget().view(), ModalView::Form);
        assert!(runtime.widget().form().content.is_empty());
    }
}
