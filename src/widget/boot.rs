//! Widget bootstrap: discovering the project key and replaying early commands.
//!
//! The embed snippet carries the key as `data-project-key` on the widget's own script
//! tag. Pages may also issue commands before the widget has loaded. Those are buffered
//! in a [`CommandQueue`] and replayed, in order, once the widget is initialized.

use regex_lite::Regex;
use std::sync::LazyLock;
use url::Url;

pub const KEY_ATTRIBUTE: &str = "data-project-key";
pub const SCRIPT_FILE: &str = "widget.js";

static SCRIPT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b([^>]*)>").expect("valid script tag pattern"));

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("valid attribute pattern")
});

/// A `<script>` element as seen by the widget: just its attributes, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptTag {
    attributes: Vec<(String, String)>,
}

impl ScriptTag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Attribute value by case-insensitive name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn src(&self) -> Option<&str> {
        self.attribute("src")
    }

    /// Every script tag in an HTML fragment, in order.
    pub fn parse_all(markup: &str) -> Vec<ScriptTag> {
        SCRIPT_TAG
            .captures_iter(markup)
            .filter_map(|tag| tag.get(1))
            .map(|attrs| ScriptTag {
                attributes: ATTRIBUTE
                    .captures_iter(attrs.as_str())
                    .filter_map(|attr| {
                        let name = attr.get(1)?.as_str().to_string();
                        let value = attr.get(2).or_else(|| attr.get(3))?.as_str().to_string();
                        Some((name, value))
                    })
                    .collect(),
            })
            .collect()
    }
}

/// Where and as whom the widget submits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub api_key: String,

    /// Origin (plus path prefix) the script was served from; empty means same-origin.
    pub base_url: String,
}

impl WidgetConfig {
    pub fn endpoint(&self) -> String {
        format!("{}/api/feedback", self.base_url)
    }
}

/// Base URL of the service that hosts `widget.js`, derived from the script's `src`.
///
/// The query string is dropped and a trailing `/widget.js` removed.
pub fn base_url_from_src(src: &str) -> String {
    let suffix = format!("/{SCRIPT_FILE}");

    match Url::parse(src) {
        Ok(mut url) => {
            url.set_query(None);
            url.set_fragment(None);
            let path = url.path().to_string();
            url.set_path(path.strip_suffix(&suffix).unwrap_or(&path));
            url.as_str().trim_end_matches('/').to_string()
        }
        // relative src, keep it relative
        Err(_) => {
            let path = src.split(['?', '#']).next().unwrap_or_default();
            path.strip_suffix(&suffix).unwrap_or(path).to_string()
        }
    }
}

fn is_widget_src(src: &str) -> bool {
    let path = src.split(['?', '#']).next().unwrap_or_default();
    path == SCRIPT_FILE || path.ends_with(&format!("/{SCRIPT_FILE}"))
}

/// First script tag carrying a non-empty project key. Later tags are ignored.
pub fn discover(scripts: &[ScriptTag]) -> Option<WidgetConfig> {
    scripts.iter().find_map(|script| {
        let api_key = script.attribute(KEY_ATTRIBUTE).filter(|key| !key.is_empty())?;

        Some(WidgetConfig {
            api_key: api_key.to_string(),
            base_url: script.src().map(base_url_from_src).unwrap_or_default(),
        })
    })
}

/// Programmatic widget commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Initialize with a key when the script tag carries none.
    Init { api_key: String },
    Open,
    Close,
}

/// Commands issued before the widget finished loading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandQueue {
    commands: Vec<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Result of a successful bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bootstrap {
    pub config: WidgetConfig,

    /// Queued commands to run against the new widget, in original order.
    pub replay: Vec<Command>,
}

/// Resolve the configuration from the page and the early command queue.
///
/// The script tag wins; otherwise the first queued `Init` provides the key. Any other
/// `Init` is dropped because only one widget exists per page. Returns `None` when no key
/// was found at all, leaving the page untouched.
pub fn bootstrap(scripts: &[ScriptTag], queue: CommandQueue) -> Option<Bootstrap> {
    let mut config = discover(scripts);
    let mut replay = Vec::with_capacity(queue.len());

    for command in queue.commands {
        match command {
            Command::Init { api_key } if config.is_none() && !api_key.is_empty() => {
                let base_url = scripts
                    .iter()
                    .filter_map(ScriptTag::src)
                    .find(|src| is_widget_src(src))
                    .map(base_url_from_src)
                    .unwrap_or_default();
                config = Some(WidgetConfig { api_key, base_url });
            }
            Command::Init { .. } => {
                tracing::debug!("widget already initialized, ignoring init command");
            }
            other => replay.push(other),
        }
    }

    config.map(|config| Bootstrap { config, replay })
}
