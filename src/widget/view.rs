//! Rendering: a pure function from [`Widget`] state to an element tree.
//!
//! Hosts mount the tree however they like; [`Node::to_html`] produces markup with every
//! attribute value and text node escaped. Icons are trusted constant SVG.

use super::state::{MAX_RATING, ModalState, ModalView, Widget};
use crate::models::feedback::FeedbackType;
use std::fmt::Write;

pub const ROOT_ID: &str = "fp-root";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Message,
    Close,
    Bug,
    Idea,
    General,
    Star,
    Check,
}

impl Icon {
    pub fn svg(self) -> &'static str {
        match self {
            Icon::Message => {
                r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M21 15a2 2 0 0 1-2 2H7l-4 4V5a2 2 0 0 1 2-2h14a2 2 0 0 1 2 2z"/></svg>"#
            }
            Icon::Close => {
                r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M18 6 6 18M6 6l12 12"/></svg>"#
            }
            Icon::Bug => {
                r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><rect x="8" y="6" width="8" height="14" rx="4"/><path d="M19 7l-3 2M5 7l3 2M19 19l-3-2M5 19l3-2M20 13h-4M4 13h4M10 4l1 2M14 4l-1 2"/></svg>"#
            }
            Icon::Idea => {
                r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M9 18h6M10 22h4M12 2a7 7 0 0 0-4 12.7V17h8v-2.3A7 7 0 0 0 12 2z"/></svg>"#
            }
            Icon::General => {
                r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><circle cx="12" cy="12" r="10"/><path d="M8 12h.01M12 12h.01M16 12h.01"/></svg>"#
            }
            Icon::Star => {
                r#"<svg viewBox="0 0 24 24" fill="currentColor"><path d="m12 2 3.1 6.3 6.9 1-5 4.9 1.2 6.8-6.2-3.2-6.2 3.2L7 14.2 2 9.3l6.9-1z"/></svg>"#
            }
            Icon::Check => {
                r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><circle cx="12" cy="12" r="10"/><path d="m8 12 3 3 5-6"/></svg>"#
            }
        }
    }
}

/// How a feedback type is presented in the type selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDisplay {
    pub label: &'static str,
    pub icon: Icon,
}

pub fn type_display(kind: FeedbackType) -> TypeDisplay {
    match kind {
        FeedbackType::Other => TypeDisplay {
            label: "General",
            icon: Icon::General,
        },
        FeedbackType::Bug => TypeDisplay {
            label: "Bug",
            icon: Icon::Bug,
        },
        FeedbackType::Feature => TypeDisplay {
            label: "Idea",
            icon: Icon::Idea,
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Icon(Icon),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<Icon> for Node {
    fn from(icon: Icon) -> Self {
        Node::Icon(icon)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

const VOID_TAGS: [&str; 1] = ["input"];

impl Node {
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&escape(text)),
            Node::Icon(icon) => out.push_str(icon.svg()),
            Node::Element(element) => {
                let _ = write!(out, "<{}", element.tag);
                for (name, value) in &element.attrs {
                    let _ = write!(out, " {}=\"{}\"", name, escape(value));
                }
                out.push('>');
                if VOID_TAGS.contains(&element.tag) {
                    return;
                }
                for child in &element.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", element.tag);
            }
        }
    }

    /// Depth-first search for the element with this `id`.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        let Node::Element(element) = self else {
            return None;
        };
        if element.get_attr("id") == Some(id) {
            return Some(element);
        }
        element.children.iter().find_map(|child| child.find_by_id(id))
    }

    pub fn find_all_by_class<'a>(&'a self, class: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_by_class(class, &mut found);
        found
    }

    fn collect_by_class<'a>(&'a self, class: &str, found: &mut Vec<&'a Element>) {
        if let Node::Element(element) = self {
            if element.has_class(class) {
                found.push(element);
            }
            for child in &element.children {
                child.collect_by_class(class, found);
            }
        }
    }

    /// Concatenated text content, icons excluded.
    pub fn text(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Icon(_) => String::new(),
            Node::Element(element) => element.children.iter().map(Node::text).collect(),
        }
    }
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

pub fn render(widget: &Widget) -> Node {
    let trigger = Element::new("button")
        .attr("id", "fp-trigger")
        .class("fp-widget-btn")
        .attr("type", "button")
        .child(Icon::Message)
        .child(Element::new("span").child("Feedback"));

    let overlay_class = match widget.modal() {
        ModalState::Open => "fp-modal-overlay fp-open",
        ModalState::Hidden | ModalState::Closing => "fp-modal-overlay",
    };

    let body = match widget.view() {
        ModalView::Form => render_form(widget),
        ModalView::Success => render_success(),
    };

    let modal = Element::new("div")
        .class("fp-modal")
        .attr("role", "dialog")
        .attr("aria-modal", "true")
        .child(
            Element::new("button")
                .attr("id", "fp-close")
                .class("fp-close")
                .attr("type", "button")
                .attr("aria-label", "Close")
                .child(Icon::Close),
        )
        .children(body);

    Element::new("div")
        .attr("id", ROOT_ID)
        .child(trigger)
        .child(
            Element::new("div")
                .attr("id", "fp-overlay")
                .class(overlay_class)
                .child(modal),
        )
        .into()
}

fn render_form(widget: &Widget) -> Vec<Node> {
    let form = widget.form();
    let mut nodes: Vec<Node> = vec![
        Element::new("h3").class("fp-title").child("Send Feedback").into(),
        Element::new("p")
            .class("fp-desc")
            .child("Help us improve by sharing your thoughts.")
            .into(),
    ];

    if let Some(error) = widget.error() {
        nodes.push(
            Element::new("div")
                .attr("id", "fp-error")
                .class("fp-error")
                .attr("role", "alert")
                .child(error)
                .into(),
        );
    }

    let types = FeedbackType::ALL.into_iter().map(|kind| {
        let display = type_display(kind);
        let class = if kind == form.selected_type {
            "fp-type fp-active"
        } else {
            "fp-type"
        };
        Node::from(
            Element::new("button")
                .class(class)
                .attr("type", "button")
                .attr("data-value", kind.as_str())
                .child(display.icon)
                .child(Element::new("span").child(display.label)),
        )
    });
    nodes.push(Element::new("div").class("fp-types").children(types).into());

    let stars = (1..=MAX_RATING).map(|value| {
        let class = if value <= form.selected_rating {
            "fp-star fp-active"
        } else {
            "fp-star"
        };
        Node::from(
            Element::new("button")
                .class(class)
                .attr("type", "button")
                .attr("data-rating", value.to_string())
                .attr("aria-label", format!("{value} star"))
                .child(Icon::Star),
        )
    });
    nodes.push(Element::new("div").class("fp-rating").children(stars).into());

    nodes.push(
        Element::new("textarea")
            .attr("id", "fp-content")
            .class("fp-textarea")
            .attr("placeholder", "Tell us what you think...")
            .child(Node::Text(form.content.clone()))
            .into(),
    );
    nodes.push(
        Element::new("input")
            .attr("id", "fp-email")
            .class("fp-input")
            .attr("type", "email")
            .attr("placeholder", "Email (optional)")
            .attr("value", form.email.clone())
            .into(),
    );

    let mut submit = Element::new("button")
        .attr("id", "fp-submit")
        .class("fp-submit")
        .attr("type", "button");
    submit = if widget.is_submitting() {
        submit
            .attr("disabled", "disabled")
            .child(Element::new("div").class("fp-spinner"))
    } else {
        submit.child("Send Feedback")
    };
    nodes.push(submit.into());

    nodes
}

fn render_success() -> Vec<Node> {
    vec![
        Element::new("div")
            .class("fp-success")
            .child(Element::new("div").class("fp-success-icon").child(Icon::Check))
            .child(Element::new("h3").class("fp-title").child("Thank You!"))
            .child(
                Element::new("p")
                    .class("fp-desc")
                    .child("We appreciate your feedback."),
            )
            .into(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{
        boot::WidgetConfig,
        state::{CONTENT_REQUIRED, Effect, Event},
    };

    fn widget() -> Widget {
        Widget::new(WidgetConfig {
            api_key: "fp_test".to_string(),
            base_url: String::new(),
        })
    }

    #[test]
    fn hidden_widget_renders_trigger_and_closed_overlay() {
        let tree = render(&widget());

        assert!(tree.find_by_id("fp-trigger").is_some());
        let overlay = tree.find_by_id("fp-overlay").unwrap();
        assert!(!overlay.has_class("fp-open"));
    }

    #[test]
    fn type_selector_lists_general_bug_idea_with_general_selected() {
        let tree = render(&widget());
        let types = tree.find_all_by_class("fp-type");

        let values: Vec<_> = types.iter().filter_map(|t| t.get_attr("data-value")).collect();
        assert_eq!(values, ["OTHER", "BUG", "FEATURE"]);

        let labels: Vec<_> = types
            .iter()
            .map(|t| Node::Element((*t).clone()).text())
            .collect();
        assert_eq!(labels, ["General", "Bug", "Idea"]);

        assert!(types[0].has_class("fp-active"));
        assert!(!types[1].has_class("fp-active"));
    }

    #[test]
    fn stars_up_to_the_rating_are_active() {
        let mut widget = widget();
        widget.dispatch(Event::TriggerClicked);
        widget.dispatch(Event::StarSelected(3));

        let tree = render(&widget);
        let active: Vec<_> = tree
            .find_all_by_class("fp-star")
            .iter()
            .map(|star| star.has_class("fp-active"))
            .collect();

        assert_eq!(active, [true, true, true, false, false]);
        assert!(tree.find_by_id("fp-overlay").unwrap().has_class("fp-open"));
    }

    #[test]
    fn busy_submit_is_disabled_with_spinner() {
        let mut widget = widget();
        widget.dispatch(Event::TriggerClicked);
        widget.dispatch(Event::ContentChanged("ok".to_string()));
        widget.dispatch(Event::StarSelected(4));
        assert!(matches!(
            widget.dispatch(Event::SubmitClicked).as_slice(),
            [Effect::Send(_)]
        ));

        let tree = render(&widget);
        let submit = tree.find_by_id("fp-submit").unwrap();

        assert_eq!(submit.get_attr("disabled"), Some("disabled"));
        assert_eq!(Node::Element(submit.clone()).find_all_by_class("fp-spinner").len(), 1);
    }

    #[test]
    fn validation_error_is_shown() {
        let mut widget = widget();
        widget.dispatch(Event::TriggerClicked);
        widget.dispatch(Event::SubmitClicked);

        let tree = render(&widget);
        let error = tree.find_by_id("fp-error").unwrap();

        assert_eq!(Node::Element(error.clone()).text(), CONTENT_REQUIRED);
    }

    #[test]
    fn user_text_is_escaped() {
        let mut widget = widget();
        widget.dispatch(Event::TriggerClicked);
        widget.dispatch(Event::ContentChanged("<script>alert(1)</script>".to_string()));
        widget.dispatch(Event::EmailChanged("\"><img>".to_string()));

        let html = render(&widget).to_html();

        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("value=\"&quot;&gt;&lt;img&gt;\""));
        assert!(!html.contains("<script>"));
    }
}
