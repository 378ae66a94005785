//! Scripted event sequences replayed against the page.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use folio_page::{EventOutcome, HeadlessHost, OpenOutcome, PageEvent, PageSnapshot, Portfolio};
use folio_types::input::Key;

fn default_viewport_height() -> i32 {
    800
}

/// One user or timer action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Move the window to this offset.
    Scroll(i32),
    /// Click the first element matching a selector.
    Click(String),
    /// Press a key, as named by `KeyboardEvent.key`.
    Key(String),
    /// Advance timers by this many milliseconds.
    Tick(u32),
    /// Open an article directly.
    Open(String),
    /// Dismiss the overlay directly.
    Close,
    /// Report the window load time.
    Load(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_viewport_height")]
    pub viewport_height: i32,
    pub steps: Vec<Step>,
}

/// Result of one replayed step.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: Step,
    pub default_prevented: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<OpenOutcome>,
    pub page: PageSnapshot,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing scenario {}", path.display()))
    }

    /// Open an article, try an unknown one, scroll down and dismiss.
    pub fn demo() -> Self {
        Self {
            viewport_height: default_viewport_height(),
            steps: vec![
                Step::Load(42.0),
                Step::Click(r#".read-more[data-article="article2"]"#.into()),
                Step::Open("article9".into()),
                Step::Key("Escape".into()),
                Step::Scroll(1250),
                Step::Click(".hamburger".into()),
                Step::Click(r##".nav-link[href="#contact"]"##.into()),
                Step::Click("#backToTop".into()),
            ],
        }
    }

    /// Replay every step, reporting the page after each.
    pub fn run(&self, page: &mut Portfolio<HeadlessHost>) -> Vec<StepReport> {
        self.steps
            .iter()
            .map(|step| {
                let (outcome, open) = apply(page, step);
                StepReport {
                    step: step.clone(),
                    default_prevented: outcome.default_prevented,
                    open,
                    page: page.snapshot(),
                }
            })
            .collect()
    }
}

fn apply(page: &mut Portfolio<HeadlessHost>, step: &Step) -> (EventOutcome, Option<OpenOutcome>) {
    let outcome = match step {
        Step::Scroll(y) => {
            page.host_mut().set_scroll_y(*y);
            page.dispatch(PageEvent::Scroll)
        },
        Step::Click(selector) => match page.document().query_selector(selector) {
            Ok(Some(target)) => page.dispatch(PageEvent::Click { target }),
            Ok(None) => {
                log::warn!("Nothing matches {selector}; click skipped");
                EventOutcome::default()
            },
            Err(e) => {
                log::warn!("Bad selector in scenario: {e}");
                EventOutcome::default()
            },
        },
        Step::Key(name) => {
            let target = page.document().active_element();
            page.dispatch(PageEvent::KeyDown {
                key: Key::from_dom_key(name),
                target,
            })
        },
        Step::Tick(ms) => page.dispatch(PageEvent::Tick { elapsed_ms: *ms }),
        Step::Open(id) => return (EventOutcome::default(), page.open_article(id)),
        Step::Close => {
            page.close_article();
            EventOutcome::default()
        },
        Step::Load(ms) => page.dispatch(PageEvent::Load { elapsed_ms: *ms }),
    };
    (outcome, None)
}
