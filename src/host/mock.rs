//! Mock host for testing
//!
//! Implements every host trait in memory: scriptable panel readiness and
//! persona list, recorded visibility flags, render call counts with copies
//! of the last view handed to each render method, and configurable failure
//! injection for the missing-anchor paths.

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::tags::PersonaId;
use crate::views::{FilterBarView, PersonaCardView, TagManagerView};

use super::traits::{HostPanel, SettingsSink, TagPresenter};

// ─────────────────────────────────────────────────────────────────
// Mock Host Configuration
// ─────────────────────────────────────────────────────────────────

/// Configuration for mock host behavior
#[derive(Debug, Clone)]
pub struct MockHostConfig {
    /// Whether the panel starts out ready
    pub ready: bool,

    /// Report a missing anchor from the matching render method
    pub fail_filter_bar: bool,
    pub fail_persona_cards: bool,
    pub fail_tag_manager: bool,
}

impl Default for MockHostConfig {
    fn default() -> Self {
        Self {
            ready: true,
            fail_filter_bar: false,
            fail_persona_cards: false,
            fail_tag_manager: false,
        }
    }
}

/// Track render/save call counts for verification
#[derive(Debug, Default)]
struct CallCounts {
    filter_bar: u32,
    persona_cards: u32,
    tag_manager: u32,
    saves: u32,
}

// ─────────────────────────────────────────────────────────────────
// Mock Host
// ─────────────────────────────────────────────────────────────────

/// In-memory implementation of [`SettingsSink`], [`HostPanel`], and
/// [`TagPresenter`] for tests.
pub struct MockHost {
    config: RwLock<MockHostConfig>,
    personas: RwLock<Vec<PersonaId>>,
    visibility: RwLock<IndexMap<PersonaId, bool>>,
    call_counts: RwLock<CallCounts>,
    last_filter_bar: RwLock<Option<FilterBarView>>,
    last_persona_cards: RwLock<Vec<PersonaCardView>>,
    last_tag_manager: RwLock<Option<TagManagerView>>,
}

impl MockHost {
    /// Create a mock host with default configuration (ready, no failures).
    pub fn new() -> Self {
        Self::with_config(MockHostConfig::default())
    }

    /// Create a mock host with custom configuration.
    pub fn with_config(config: MockHostConfig) -> Self {
        Self {
            config: RwLock::new(config),
            personas: RwLock::new(Vec::new()),
            visibility: RwLock::new(IndexMap::new()),
            call_counts: RwLock::new(CallCounts::default()),
            last_filter_bar: RwLock::new(None),
            last_persona_cards: RwLock::new(Vec::new()),
            last_tag_manager: RwLock::new(None),
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Scripting
    // ─────────────────────────────────────────────────────────────

    /// Flip panel readiness.
    pub fn set_ready(&self, ready: bool) {
        self.config.write().ready = ready;
    }

    /// Replace the displayed persona list.
    pub fn set_personas(&self, personas: Vec<PersonaId>) {
        *self.personas.write() = personas;
    }

    // ─────────────────────────────────────────────────────────────
    // Inspection
    // ─────────────────────────────────────────────────────────────

    /// Last visibility signaled for a persona, if any.
    pub fn visibility(&self, persona: &PersonaId) -> Option<bool> {
        self.visibility.read().get(persona).copied()
    }

    /// Get the number of times a method was called.
    pub fn call_count(&self, method: &str) -> u32 {
        let counts = self.call_counts.read();
        match method {
            "render_filter_bar" => counts.filter_bar,
            "render_persona_cards" => counts.persona_cards,
            "render_tag_manager" => counts.tag_manager,
            "request_save" => counts.saves,
            _ => 0,
        }
    }

    /// The most recent filter bar view rendered.
    pub fn last_filter_bar(&self) -> Option<FilterBarView> {
        self.last_filter_bar.read().clone()
    }

    /// The most recent persona card views rendered.
    pub fn last_persona_cards(&self) -> Vec<PersonaCardView> {
        self.last_persona_cards.read().clone()
    }

    /// The most recent tag manager view rendered.
    pub fn last_tag_manager(&self) -> Option<TagManagerView> {
        self.last_tag_manager.read().clone()
    }

    /// Reset all call counts.
    pub fn reset_counts(&self) {
        *self.call_counts.write() = CallCounts::default();
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────
// Trait Implementations
// ─────────────────────────────────────────────────────────────────

impl SettingsSink for MockHost {
    fn request_save(&self) {
        self.call_counts.write().saves += 1;
    }
}

impl HostPanel for MockHost {
    fn is_ready(&self) -> bool {
        self.config.read().ready
    }

    fn personas(&self) -> Vec<PersonaId> {
        self.personas.read().clone()
    }

    fn set_persona_visible(&self, persona: &PersonaId, visible: bool) {
        self.visibility.write().insert(persona.clone(), visible);
    }
}

impl TagPresenter for MockHost {
    fn render_filter_bar(&self, view: &FilterBarView) -> Result<()> {
        self.call_counts.write().filter_bar += 1;
        if self.config.read().fail_filter_bar {
            return Err(Error::missing_host_element("#persona-tag-filter-bar"));
        }
        *self.last_filter_bar.write() = Some(view.clone());
        Ok(())
    }

    fn render_persona_cards(&self, cards: &[PersonaCardView]) -> Result<()> {
        self.call_counts.write().persona_cards += 1;
        if self.config.read().fail_persona_cards {
            return Err(Error::missing_host_element(".avatar-container"));
        }
        *self.last_persona_cards.write() = cards.to_vec();
        Ok(())
    }

    fn render_tag_manager(&self, view: &TagManagerView) -> Result<()> {
        self.call_counts.write().tag_manager += 1;
        if self.config.read().fail_tag_manager {
            return Err(Error::missing_host_element("#persona_description"));
        }
        *self.last_tag_manager.write() = Some(view.clone());
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
