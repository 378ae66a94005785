//! Page configuration: scroll thresholds, offsets and feature toggles.
//!
//! Every field has a default, so a TOML file only needs to name the
//! values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};

/// Tunable values for the portfolio page behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// A section becomes current once `scroll_y >= top - lookahead`.
    pub section_lookahead_px: u32,
    /// Anchor jumps land this far above the target, clearing the fixed header.
    pub anchor_offset_px: u32,
    /// The navbar switches to its solid background past this offset.
    pub navbar_solid_after_px: u32,
    /// The back-to-top control is shown past this offset.
    pub back_to_top_after_px: u32,
    pub navbar_solid_background: String,
    pub navbar_clear_background: String,
    /// Fraction of an element that must be visible before it reveals.
    pub reveal_threshold: f32,
    /// Shrinks the bottom of the viewport when testing for reveal.
    pub reveal_bottom_margin_px: u32,
    /// Whether `open` with a different article while one is shown swaps
    /// the content in place instead of being ignored.
    pub replace_open_overlay: bool,
    /// Run the hero subtitle typing reveal.
    pub typing_effect: bool,
    pub typing_start_delay_ms: u32,
    pub typing_char_interval_ms: u32,
    /// Selectors reported when absent at startup.
    pub required_selectors: Vec<String>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            section_lookahead_px: 200,
            anchor_offset_px: 70,
            navbar_solid_after_px: 100,
            back_to_top_after_px: 300,
            navbar_solid_background: "rgba(10, 26, 47, 0.98)".to_string(),
            navbar_clear_background: "rgba(10, 26, 47, 0.95)".to_string(),
            reveal_threshold: 0.1,
            reveal_bottom_margin_px: 50,
            replace_open_overlay: false,
            typing_effect: false,
            typing_start_delay_ms: 1000,
            typing_char_interval_ms: 50,
            required_selectors: [".hero", ".navbar", ".about", ".articles", ".resume", ".contact"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl PageConfig {
    /// Parse a config from TOML text and validate it.
    pub fn from_toml(text: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let cfg = Self::from_toml(&text)?;
        log::debug!("Loaded page config from {}", path.display());
        Ok(cfg)
    }

    /// Reject values no page could use.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(FolioError::Config(format!(
                "reveal_threshold must be within [0, 1], got {}",
                self.reveal_threshold
            )));
        }
        if self.typing_char_interval_ms == 0 {
            return Err(FolioError::Config(
                "typing_char_interval_ms must be positive".into(),
            ));
        }
        Ok(())
    }
}
