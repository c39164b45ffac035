//! Tag store — owns the global tag catalog and the persona→tag assignments
//!
//! All mutations are synchronous and atomic behind one lock; callers never
//! observe a partial update. Every mutation that changes state requests a
//! save through the host's [`SettingsSink`]; the save itself is
//! fire-and-forget and assumed debounced by the host.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::host::SettingsSink;

use super::types::{PersonaId, Tag, TagId, TagSettings};

// ─────────────────────────────────────────────────────────────────
// Tag Store
// ─────────────────────────────────────────────────────────────────

/// Thread-safe store for the tag catalog and assignment map.
pub struct TagStore {
    state: RwLock<TagSettings>,
    sink: Arc<dyn SettingsSink>,
}

impl TagStore {
    /// Create an empty store.
    pub fn new(sink: Arc<dyn SettingsSink>) -> Self {
        Self::from_settings(None, sink)
    }

    /// Create a store from previously persisted settings.
    ///
    /// A host with no saved state passes `None`; both keys then initialize
    /// to empty defaults and a save is requested so the keys exist.
    pub fn from_settings(settings: Option<TagSettings>, sink: Arc<dyn SettingsSink>) -> Self {
        let state = match settings {
            Some(s) => s,
            None => {
                info!("No saved tag settings, initializing empty defaults");
                sink.request_save();
                TagSettings::default()
            }
        };
        Self {
            state: RwLock::new(state),
            sink,
        }
    }

    /// Snapshot of the current persisted-state shape, for the host's save
    /// mechanism to serialize.
    pub fn snapshot(&self) -> TagSettings {
        self.state.read().clone()
    }

    // ─────────────────────────────────────────────────────────────
    // Catalog Mutations
    // ─────────────────────────────────────────────────────────────

    /// Create a new tag and append it to the catalog.
    ///
    /// The name is trimmed before storing; a name that trims to nothing is
    /// rejected with [`Error::EmptyTagName`] and neither the catalog nor
    /// the save queue is touched.
    pub fn create_tag(&self, name: &str, color: &str) -> Result<Tag> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::EmptyTagName);
        }

        let tag = Tag {
            id: TagId::generate(),
            name: name.to_string(),
            color: color.to_string(),
        };
        self.state.write().persona_tags.push(tag.clone());
        info!(tag = %tag.id, name = %tag.name, "Created tag");
        self.sink.request_save();
        Ok(tag)
    }

    /// Remove a tag from the catalog. Returns whether it was present.
    ///
    /// Does not cascade into the assignment map: entries referencing the
    /// removed id become stale and are skipped on read until the personas'
    /// lists are next mutated.
    pub fn delete_tag(&self, tag_id: &TagId) -> bool {
        let mut state = self.state.write();
        let before = state.persona_tags.len();
        state.persona_tags.retain(|t| &t.id != tag_id);
        let removed = state.persona_tags.len() != before;
        drop(state);

        if removed {
            info!(tag = %tag_id, "Deleted tag");
            self.sink.request_save();
        }
        removed
    }

    // ─────────────────────────────────────────────────────────────
    // Assignment Mutations
    // ─────────────────────────────────────────────────────────────

    /// Add a tag to a persona's assignment set if absent.
    ///
    /// Idempotent; returns whether a change occurred. A tag must exist in
    /// the catalog before it can be assigned — an unknown id is rejected.
    pub fn assign_tag(&self, persona: &PersonaId, tag_id: &TagId) -> bool {
        let mut state = self.state.write();
        if !state.persona_tags.iter().any(|t| &t.id == tag_id) {
            warn!(persona = %persona, tag = %tag_id, "Refusing to assign unknown tag");
            return false;
        }

        let assigned = state.persona_tag_map.entry(persona.clone()).or_default();
        if assigned.contains(tag_id) {
            return false;
        }
        assigned.push(tag_id.clone());
        drop(state);

        debug!(persona = %persona, tag = %tag_id, "Assigned tag");
        self.sink.request_save();
        true
    }

    /// Remove a tag from a persona's assignment set if present.
    ///
    /// Idempotent; returns whether a change occurred.
    pub fn unassign_tag(&self, persona: &PersonaId, tag_id: &TagId) -> bool {
        let mut state = self.state.write();
        let Some(assigned) = state.persona_tag_map.get_mut(persona) else {
            return false;
        };

        let before = assigned.len();
        assigned.retain(|id| id != tag_id);
        let changed = assigned.len() != before;
        if assigned.is_empty() {
            state.persona_tag_map.shift_remove(persona);
        }
        drop(state);

        if changed {
            debug!(persona = %persona, tag = %tag_id, "Unassigned tag");
            self.sink.request_save();
        }
        changed
    }

    /// Assign if absent, unassign if present. Returns whether the tag is
    /// now assigned. This is the primary UI-facing mutation.
    pub fn toggle_tag(&self, persona: &PersonaId, tag_id: &TagId) -> bool {
        if self.is_assigned(persona, tag_id) {
            self.unassign_tag(persona, tag_id);
            false
        } else {
            self.assign_tag(persona, tag_id)
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────

    /// The catalog in insertion order.
    pub fn all_tags(&self) -> Vec<Tag> {
        self.state.read().persona_tags.clone()
    }

    /// Number of tags in the catalog.
    pub fn tag_count(&self) -> usize {
        self.state.read().persona_tags.len()
    }

    /// Look up a single tag by id.
    pub fn tag(&self, tag_id: &TagId) -> Option<Tag> {
        self.state
            .read()
            .persona_tags
            .iter()
            .find(|t| &t.id == tag_id)
            .cloned()
    }

    /// Whether a tag id currently resolves in the catalog.
    pub fn contains_tag(&self, tag_id: &TagId) -> bool {
        self.state.read().persona_tags.iter().any(|t| &t.id == tag_id)
    }

    /// Whether a tag id is in a persona's assignment set.
    pub fn is_assigned(&self, persona: &PersonaId, tag_id: &TagId) -> bool {
        self.state
            .read()
            .persona_tag_map
            .get(persona)
            .map(|ids| ids.contains(tag_id))
            .unwrap_or(false)
    }

    /// A persona's raw assigned ids, in assignment order.
    pub fn assigned_ids(&self, persona: &PersonaId) -> Vec<TagId> {
        self.state
            .read()
            .persona_tag_map
            .get(persona)
            .cloned()
            .unwrap_or_default()
    }

    /// A persona's assigned tags resolved against the catalog, in
    /// assignment order. Ids that no longer resolve are skipped.
    pub fn assigned_tags(&self, persona: &PersonaId) -> Vec<Tag> {
        let state = self.state.read();
        let Some(ids) = state.persona_tag_map.get(persona) else {
            return Vec::new();
        };

        ids.iter()
            .filter_map(|id| {
                let tag = state.persona_tags.iter().find(|t| &t.id == id).cloned();
                if tag.is_none() {
                    debug!(persona = %persona, tag = %id, "Skipping stale tag reference");
                }
                tag
            })
            .collect()
    }

    // ─────────────────────────────────────────────────────────────
    // Usage Counting & Garbage Collection
    // ─────────────────────────────────────────────────────────────

    /// Count of personas whose assignment set contains the tag.
    ///
    /// O(personas) per call; recomputed on every render. Fine at the
    /// persona counts a management panel sees.
    pub fn usage_count(&self, tag_id: &TagId) -> usize {
        self.state
            .read()
            .persona_tag_map
            .values()
            .filter(|ids| ids.contains(tag_id))
            .count()
    }

    /// Remove every tag with zero assignments from the catalog.
    ///
    /// Idempotent: running it twice with no intervening mutation is a
    /// no-op. Requests a save only when at least one tag was removed.
    /// Returns the removed tags so callers can purge any filter selection
    /// still pointing at them.
    pub fn collect_unused_tags(&self) -> Vec<Tag> {
        let mut state = self.state.write();

        let mut removed = Vec::new();
        let map = std::mem::take(&mut state.persona_tag_map);
        state.persona_tags.retain(|tag| {
            let used = map.values().any(|ids| ids.contains(&tag.id));
            if !used {
                removed.push(tag.clone());
            }
            used
        });
        state.persona_tag_map = map;
        drop(state);

        if !removed.is_empty() {
            info!(count = removed.len(), "Collected unused tags");
            self.sink.request_save();
        }
        removed
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
