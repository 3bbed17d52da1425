//! The widget as an explicit state machine.
//!
//! [`Widget::dispatch`] is the only way state changes. It takes one [`Event`] and returns
//! the [`Effect`]s the host has to carry out (scroll locking, the close-transition timer,
//! network submissions). Rendering is a pure function of the resulting state.
//!
//! # States
//!
//! ```text
//! Hidden --TriggerClicked--> Open --Close/Overlay--> Closing --CloseTransitionEnded--> Hidden
//!                             ^                         |
//!                             +-----TriggerClicked------+
//! ```
//!
//! Within `Open` the view is `Form` or `Success`. A submission is identified by a
//! [`Ticket`]; outcomes for any ticket other than the one in flight are dropped, so a
//! response arriving after the modal was closed and reset changes nothing.

use super::boot::WidgetConfig;
use crate::models::feedback::FeedbackType;
use serde::Serialize;
use std::time::Duration;

pub const CONTENT_REQUIRED: &str = "Please enter some details.";
pub const RATING_REQUIRED: &str = "Please select a rating.";
pub const SUBMISSION_FAILED: &str = "Something went wrong. Please try again.";

/// Length of the closing animation; the form resets when it ends.
pub const CLOSE_TRANSITION: Duration = Duration::from_millis(300);

pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Hidden,
    Open,
    Closing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalView {
    Form,
    Success,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub selected_type: FeedbackType,

    /// 0 until a star is picked
    pub selected_rating: u8,

    pub content: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// JSON body posted to the ingestion endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackPayload {
    pub content: String,
    pub rating: u8,
    pub feedback_type: FeedbackType,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRequest {
    pub ticket: Ticket,
    pub endpoint: String,
    pub api_key: String,
    pub payload: FeedbackPayload,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    TriggerClicked,
    OverlayClicked,
    CloseClicked,
    CloseTransitionEnded,
    TypeSelected(FeedbackType),
    StarSelected(u8),
    ContentChanged(String),
    EmailChanged(String),
    SubmitClicked,
    SubmissionSucceeded(Ticket),
    SubmissionFailed(Ticket),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LockScroll,
    UnlockScroll,

    /// Deliver [`Event::CloseTransitionEnded`] after this delay.
    ScheduleReset(Duration),

    Send(SubmissionRequest),
}

#[derive(Debug, Clone)]
pub struct Widget {
    config: WidgetConfig,
    modal: ModalState,
    view: ModalView,
    form: FormState,
    error: Option<&'static str>,
    in_flight: Option<Ticket>,
    next_ticket: u64,
}

impl Widget {
    pub fn new(config: WidgetConfig) -> Self {
        Self {
            config,
            modal: ModalState::Hidden,
            view: ModalView::Form,
            form: FormState::default(),
            error: None,
            in_flight: None,
            next_ticket: 0,
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn modal(&self) -> ModalState {
        self.modal
    }

    pub fn view(&self) -> ModalView {
        self.view
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn dispatch(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::TriggerClicked => {
                if self.modal == ModalState::Open {
                    return Vec::new();
                }
                self.modal = ModalState::Open;
                vec![Effect::LockScroll]
            }

            Event::OverlayClicked | Event::CloseClicked => {
                if self.modal != ModalState::Open {
                    return Vec::new();
                }
                self.modal = ModalState::Closing;
                vec![Effect::UnlockScroll, Effect::ScheduleReset(CLOSE_TRANSITION)]
            }

            Event::CloseTransitionEnded => {
                // reopened before the timer fired
                if self.modal == ModalState::Closing {
                    self.reset();
                }
                Vec::new()
            }

            Event::TypeSelected(kind) => {
                if self.editable() {
                    self.form.selected_type = kind;
                }
                Vec::new()
            }

            Event::StarSelected(rating) => {
                if self.editable() && (1..=MAX_RATING).contains(&rating) {
                    self.form.selected_rating = rating;
                }
                Vec::new()
            }

            Event::ContentChanged(content) => {
                if self.editable() {
                    self.form.content = content;
                }
                Vec::new()
            }

            Event::EmailChanged(email) => {
                if self.editable() {
                    self.form.email = email;
                }
                Vec::new()
            }

            Event::SubmitClicked => self.submit(),

            Event::SubmissionSucceeded(ticket) => {
                if self.in_flight == Some(ticket) {
                    self.in_flight = None;
                    self.error = None;
                    self.view = ModalView::Success;
                }
                Vec::new()
            }

            Event::SubmissionFailed(ticket) => {
                if self.in_flight == Some(ticket) {
                    self.in_flight = None;
                    self.error = Some(SUBMISSION_FAILED);
                }
                Vec::new()
            }
        }
    }

    fn editable(&self) -> bool {
        self.view == ModalView::Form
    }

    fn submit(&mut self) -> Vec<Effect> {
        if self.modal != ModalState::Open || !self.editable() || self.in_flight.is_some() {
            return Vec::new();
        }

        let content = self.form.content.trim();
        if content.is_empty() {
            self.error = Some(CONTENT_REQUIRED);
            return Vec::new();
        }
        if self.form.selected_rating == 0 {
            self.error = Some(RATING_REQUIRED);
            return Vec::new();
        }

        let email = self.form.email.trim();
        let payload = FeedbackPayload {
            content: content.to_string(),
            rating: self.form.selected_rating,
            feedback_type: self.form.selected_type,
            email: (!email.is_empty()).then(|| email.to_string()),
        };

        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.in_flight = Some(ticket);
        self.error = None;

        vec![Effect::Send(SubmissionRequest {
            ticket,
            endpoint: self.config.endpoint(),
            api_key: self.config.api_key.clone(),
            payload,
        })]
    }

    fn reset(&mut self) {
        self.modal = ModalState::Hidden;
        self.view = ModalView::Form;
        self.form = FormState::default();
        self.error = None;
        self.in_flight = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Widget {
        Widget::new(WidgetConfig {
            api_key: "fp_test".to_string(),
            base_url: "https://pulse.example.com".to_string(),
        })
    }

    fn open_with(content: &str, rating: u8) -> Widget {
        let mut widget = widget();
        widget.dispatch(Event::TriggerClicked);
        widget.dispatch(Event::ContentChanged(content.to_string()));
        if rating > 0 {
            widget.dispatch(Event::StarSelected(rating));
        }
        widget
    }

    fn sent(effects: Vec<Effect>) -> SubmissionRequest {
        match effects.as_slice() {
            [Effect::Send(request)] => request.clone(),
            other => panic!("expected one submission, got {other:?}"),
        }
    }

    #[test]
    fn starts_hidden_with_default_form() {
        let widget = widget();

        assert_eq!(widget.modal(), ModalState::Hidden);
        assert_eq!(widget.view(), ModalView::Form);
        assert_eq!(widget.form().selected_type, FeedbackType::Other);
        assert_eq!(widget.form().selected_rating, 0);
    }

    #[test]
    fn open_and_close_toggle_scroll_lock_and_schedule_reset() {
        let mut widget = widget();

        assert_eq!(widget.dispatch(Event::TriggerClicked), [Effect::LockScroll]);
        assert_eq!(widget.modal(), ModalState::Open);

        assert_eq!(
            widget.dispatch(Event::OverlayClicked),
            [Effect::UnlockScroll, Effect::ScheduleReset(CLOSE_TRANSITION)]
        );
        assert_eq!(widget.modal(), ModalState::Closing);

        widget.dispatch(Event::CloseTransitionEnded);
        assert_eq!(widget.modal(), ModalState::Hidden);
    }

    #[test]
    fn closing_a_hidden_widget_does_nothing() {
        let mut widget = widget();
        assert!(widget.dispatch(Event::CloseClicked).is_empty());
        assert_eq!(widget.modal(), ModalState::Hidden);
    }

    #[test]
    fn empty_content_blocks_submission() {
        let mut widget = open_with("   ", 4);

        assert!(widget.dispatch(Event::SubmitClicked).is_empty());
        assert_eq!(widget.error(), Some(CONTENT_REQUIRED));
        assert!(!widget.is_submitting());
    }

    #[test]
    fn missing_rating_blocks_submission() {
        let mut widget = open_with("Love it", 0);

        assert!(widget.dispatch(Event::SubmitClicked).is_empty());
        assert_eq!(widget.error(), Some(RATING_REQUIRED));
    }

    #[test]
    fn submission_carries_trimmed_fields_and_selected_type() {
        let mut widget = open_with("  Dark mode please ", 5);
        widget.dispatch(Event::TypeSelected(FeedbackType::Feature));
        widget.dispatch(Event::EmailChanged("   ".to_string()));

        let request = sent(widget.dispatch(Event::SubmitClicked));

        assert_eq!(request.endpoint, "https://pulse.example.com/api/feedback");
        assert_eq!(request.api_key, "fp_test");
        assert_eq!(
            request.payload,
            FeedbackPayload {
                content: "Dark mode please".to_string(),
                rating: 5,
                feedback_type: FeedbackType::Feature,
                email: None,
            }
        );
        assert_eq!(
            serde_json::to_value(&request.payload).unwrap(),
            serde_json::json!({
                "content": "Dark mode please",
                "rating": 5,
                "feedbackType": "FEATURE",
                "email": null,
            })
        );
    }

    #[test]
    fn submit_is_single_flight() {
        let mut widget = open_with("ok", 3);

        sent(widget.dispatch(Event::SubmitClicked));
        assert!(widget.is_submitting());
        assert!(widget.dispatch(Event::SubmitClicked).is_empty());
    }

    #[test]
    fn success_shows_thanks_once_and_ignores_further_submits() {
        let mut widget = open_with("ok", 3);
        let request = sent(widget.dispatch(Event::SubmitClicked));

        widget.dispatch(Event::SubmissionSucceeded(request.ticket));

        assert_eq!(widget.view(), ModalView::Success);
        assert!(!widget.is_submitting());
        assert!(widget.dispatch(Event::SubmitClicked).is_empty());
        assert_eq!(widget.view(), ModalView::Success);
    }

    #[test]
    fn failure_keeps_the_form_and_shows_generic_error() {
        let mut widget = open_with("ok", 3);
        let request = sent(widget.dispatch(Event::SubmitClicked));

        widget.dispatch(Event::SubmissionFailed(request.ticket));

        assert_eq!(widget.view(), ModalView::Form);
        assert_eq!(widget.error(), Some(SUBMISSION_FAILED));
        assert_eq!(widget.form().content, "ok");
        assert_eq!(widget.form().selected_rating, 3);

        // retry is allowed and gets a new ticket
        let retry = sent(widget.dispatch(Event::SubmitClicked));
        assert_ne!(retry.ticket, request.ticket);
        assert_eq!(widget.error(), None);
    }

    #[test]
    fn close_then_reset_restores_defaults() {
        let mut widget = open_with("ok", 3);
        widget.dispatch(Event::TypeSelected(FeedbackType::Bug));
        widget.dispatch(Event::EmailChanged("a@b.c".to_string()));
        let request = sent(widget.dispatch(Event::SubmitClicked));
        widget.dispatch(Event::SubmissionSucceeded(request.ticket));

        widget.dispatch(Event::CloseClicked);
        widget.dispatch(Event::CloseTransitionEnded);

        assert_eq!(widget.modal(), ModalState::Hidden);
        assert_eq!(widget.view(), ModalView::Form);
        assert_eq!(widget.form(), &FormState::default());
        assert_eq!(widget.error(), None);
    }

    #[test]
    fn reopening_before_the_transition_ends_keeps_the_form() {
        let mut widget = open_with("half written", 2);

        widget.dispatch(Event::CloseClicked);
        widget.dispatch(Event::TriggerClicked);
        widget.dispatch(Event::CloseTransitionEnded);

        assert_eq!(widget.modal(), ModalState::Open);
        assert_eq!(widget.form().content, "half written");
    }

    #[test]
    fn responses_for_a_reset_form_are_ignored() {
        let mut widget = open_with("ok", 3);
        let request = sent(widget.dispatch(Event::SubmitClicked));

        widget.dispatch(Event::CloseClicked);
        widget.dispatch(Event::CloseTransitionEnded);
        widget.dispatch(Event::SubmissionSucceeded(request.ticket));

        assert_eq!(widget.view(), ModalView::Form);
        assert_eq!(widget.modal(), ModalState::Hidden);
    }

    #[test]
    fn out_of_range_stars_are_ignored() {
        let mut widget = open_with("ok", 0);

        widget.dispatch(Event::StarSelected(0));
        widget.dispatch(Event::StarSelected(6));
        assert_eq!(widget.form().selected_rating, 0);

        widget.dispatch(Event::StarSelected(4));
        widget.dispatch(Event::StarSelected(2));
        assert_eq!(widget.form().selected_rating, 2);
    }
}
