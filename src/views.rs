//! View models handed to the presentation adapter
//!
//! These carry everything a presenter needs to draw the filter bar, the
//! per-card tag labels, and the tag management panel, computed fresh from
//! store and session state on every render. Usage counts are recomputed
//! here rather than cached, so the numbers on chips are never stale.

use crate::filter::chip_name_matches;
use crate::session::UiSession;
use crate::tags::{PersonaId, Tag, TagStore};

// ─────────────────────────────────────────────────────────────────
// Chips
// ─────────────────────────────────────────────────────────────────

/// One tag chip/button, as shown in the filter bar or the manager panel.
#[derive(Debug, Clone, PartialEq)]
pub struct TagChip {
    pub tag: Tag,

    /// How many personas currently carry this tag (shown as `name (n)`)
    pub usage: usize,

    /// Filter bar: part of the active filter selection.
    /// Manager panel: assigned to the selected persona.
    pub selected: bool,

    /// Whether the chip survives the current chip-name text filter
    pub visible: bool,
}

// ─────────────────────────────────────────────────────────────────
// Filter Bar
// ─────────────────────────────────────────────────────────────────

/// The collapsible tag filter bar above the persona list.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterBarView {
    pub expanded: bool,

    /// Current chip-name filter input value (preserved across renders)
    pub filter_text: String,

    /// One chip per catalog tag, in catalog order; empty while collapsed
    pub chips: Vec<TagChip>,
}

impl FilterBarView {
    /// Build the filter bar view from current state.
    pub fn build(store: &TagStore, session: &UiSession) -> FilterBarView {
        let chips = if session.bar_expanded {
            store
                .all_tags()
                .into_iter()
                .map(|tag| TagChip {
                    usage: store.usage_count(&tag.id),
                    selected: session.filter.is_selected(&tag.id),
                    visible: chip_name_matches(&session.filter_text, &tag.name),
                    tag,
                })
                .collect()
        } else {
            Vec::new()
        };

        FilterBarView {
            expanded: session.bar_expanded,
            filter_text: session.filter_text.clone(),
            chips,
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Persona Cards
// ─────────────────────────────────────────────────────────────────

/// Tag labels for one persona card.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonaCardView {
    pub persona: PersonaId,

    /// Resolved assigned tags in assignment order (stale ids skipped)
    pub labels: Vec<Tag>,
}

impl PersonaCardView {
    /// Build card views for the personas the panel currently shows.
    pub fn build_all(store: &TagStore, personas: &[PersonaId]) -> Vec<PersonaCardView> {
        personas
            .iter()
            .map(|persona| PersonaCardView {
                persona: persona.clone(),
                labels: store.assigned_tags(persona),
            })
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────────
// Tag Manager
// ─────────────────────────────────────────────────────────────────

/// The tag management panel for the selected persona.
#[derive(Debug, Clone, PartialEq)]
pub struct TagManagerView {
    pub persona: PersonaId,

    /// Tags assigned to this persona, in assignment order
    pub assigned: Vec<Tag>,

    /// Every catalog tag as a toggle chip; `selected` means assigned to
    /// this persona
    pub available: Vec<TagChip>,

    /// Pre-filled color for the new-tag picker
    pub suggested_color: String,
}

impl TagManagerView {
    /// Build the manager view for the session's selected persona, if any.
    pub fn build(
        store: &TagStore,
        session: &UiSession,
        suggested_color: String,
    ) -> Option<TagManagerView> {
        let persona = session.selected_persona.clone()?;

        let available = store
            .all_tags()
            .into_iter()
            .map(|tag| TagChip {
                usage: store.usage_count(&tag.id),
                selected: store.is_assigned(&persona, &tag.id),
                visible: true,
                tag,
            })
            .collect();

        Some(TagManagerView {
            assigned: store.assigned_tags(&persona),
            available,
            persona,
            suggested_color,
        })
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
