//! Filter engine — the active tag selection and persona matching
//!
//! A persona matches when the active selection is a subset of its assigned
//! tags (logical AND across every selected tag; an empty selection matches
//! everything). The selection is ephemeral UI state and is never persisted.
//!
//! A selected id whose tag has left the catalog contributes no matches:
//! `matches` requires every active id to resolve, and the controller purges
//! such ids outright when garbage collection reports the removal.

use indexmap::IndexSet;
use tracing::debug;

use crate::host::HostPanel;
use crate::tags::{PersonaId, Tag, TagId, TagStore};

// ─────────────────────────────────────────────────────────────────
// Filter Engine
// ─────────────────────────────────────────────────────────────────

/// Holds the set of currently active filter tags.
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    active: IndexSet<TagId>,
}

impl FilterEngine {
    /// Create with an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the tag to the selection if absent, remove it if present.
    /// Returns whether the tag is now selected.
    pub fn toggle(&mut self, tag_id: &TagId) -> bool {
        if self.active.shift_remove(tag_id) {
            debug!(tag = %tag_id, "Removed tag filter");
            false
        } else {
            self.active.insert(tag_id.clone());
            debug!(tag = %tag_id, "Added tag filter");
            true
        }
    }

    /// Whether the tag is part of the active selection.
    pub fn is_selected(&self, tag_id: &TagId) -> bool {
        self.active.contains(tag_id)
    }

    /// The active selection in toggle order.
    pub fn active(&self) -> &IndexSet<TagId> {
        &self.active
    }

    /// Whether no filter is active.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Drop the whole selection.
    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// Drop selected ids whose tags were just garbage-collected.
    /// Returns whether the selection changed.
    pub fn purge_dangling(&mut self, removed: &[Tag]) -> bool {
        let before = self.active.len();
        for tag in removed {
            if self.active.shift_remove(&tag.id) {
                debug!(tag = %tag.id, "Purged collected tag from filter selection");
            }
        }
        self.active.len() != before
    }

    /// Whether the persona satisfies the active filter.
    ///
    /// True iff every active id resolves in the catalog *and* sits in the
    /// persona's assignment set. Vacuously true with an empty selection.
    pub fn matches(&self, store: &TagStore, persona: &PersonaId) -> bool {
        self.active
            .iter()
            .all(|id| store.contains_tag(id) && store.is_assigned(persona, id))
    }

    /// Recompute and apply visibility for every persona the panel shows.
    ///
    /// Pure function of current store + selection state; callers re-run it
    /// on every relevant mutation (tag toggle, filter toggle, persona list
    /// change).
    pub fn apply(&self, store: &TagStore, panel: &dyn HostPanel) {
        let personas = panel.personas();
        debug!(
            personas = personas.len(),
            selected = self.active.len(),
            "Applying persona filter"
        );
        for persona in &personas {
            panel.set_persona_visible(persona, self.matches(store, persona));
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Chip Text Filter
// ─────────────────────────────────────────────────────────────────

/// Case-insensitive substring test of the chip filter input against a tag
/// display name. This narrows which chips the selector UI *offers*; it
/// plays no part in persona matching.
pub fn chip_name_matches(filter_text: &str, tag_name: &str) -> bool {
    if filter_text.is_empty() {
        return true;
    }
    tag_name
        .to_lowercase()
        .contains(&filter_text.to_lowercase())
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
