//! Host-agnostic keyboard and scrolling types.
//!
//! Hosts translate their native key events into [`Key`] before handing
//! them to the page. The page never inspects raw key codes.

use serde::{Deserialize, Serialize};

/// A key press, reduced to the keys the page reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Tab,
    /// Any other printable character.
    Char(char),
    /// Keys the page has no use for, kept by name for logging.
    Other(String),
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value to a [`Key`].
    pub fn from_dom_key(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Self::Escape,
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "Tab" => Self::Tab,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Other(other.to_string()),
                }
            },
        }
    }

    /// Keys that activate a focused button.
    pub fn is_activation(&self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

/// How the host should animate a programmatic scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    /// Jump immediately.
    #[default]
    Auto,
    /// Animate with the host's smooth scroll transition.
    Smooth,
}
