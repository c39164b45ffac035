//! UI session — the explicit context object for ephemeral interface state
//!
//! Everything here lives only as long as the panel does and is never
//! persisted: the active filter selection, the chip filter input text, the
//! color mode for generated tag colors, the filter bar's expansion state,
//! and which persona's manager panel is open. One session exists per
//! controller; `reset` returns it to its init-on-load defaults.

use tracing::debug;

use crate::color::ColorMode;
use crate::filter::FilterEngine;
use crate::tags::PersonaId;

// ─────────────────────────────────────────────────────────────────
// UI Session
// ─────────────────────────────────────────────────────────────────

/// Ephemeral UI state for one persona panel.
#[derive(Debug, Clone)]
pub struct UiSession {
    /// Active filter tag selection
    pub filter: FilterEngine,

    /// Current chip-name filter input value
    pub filter_text: String,

    /// Brightness band for newly generated tag colors
    pub color_mode: ColorMode,

    /// Whether the tag filter bar is expanded
    pub bar_expanded: bool,

    /// Persona whose tag manager panel is open, if any
    pub selected_persona: Option<PersonaId>,

    /// Mode restored by `reset`
    default_color_mode: ColorMode,
}

impl UiSession {
    /// Create a session with init-on-load defaults: no filter, collapsed
    /// bar, no selection, the given color mode.
    pub fn new(default_color_mode: ColorMode) -> Self {
        Self {
            filter: FilterEngine::new(),
            filter_text: String::new(),
            color_mode: default_color_mode,
            bar_expanded: false,
            selected_persona: None,
            default_color_mode,
        }
    }

    /// Return every field to its initial value.
    pub fn reset(&mut self) {
        debug!("Resetting UI session");
        self.filter.clear();
        self.filter_text.clear();
        self.color_mode = self.default_color_mode;
        self.bar_expanded = false;
        self.selected_persona = None;
    }

    /// Flip between light and dark generated colors.
    pub fn toggle_color_mode(&mut self) -> ColorMode {
        self.color_mode = self.color_mode.toggled();
        self.color_mode
    }

    /// Expand or collapse the filter bar.
    pub fn toggle_bar(&mut self) -> bool {
        self.bar_expanded = !self.bar_expanded;
        self.bar_expanded
    }
}

impl Default for UiSession {
    fn default() -> Self {
        Self::new(ColorMode::Light)
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
