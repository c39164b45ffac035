//! Trait seams to the host application
//!
//! The engine never touches host markup directly. Everything it needs from
//! the surrounding application — persistence, persona enumeration and
//! visibility, and chip/card/panel rendering — comes through these traits,
//! so the core stays testable against the in-tree mock host.

use crate::error::Result;
use crate::tags::PersonaId;
use crate::views::{FilterBarView, PersonaCardView, TagManagerView};

// ─────────────────────────────────────────────────────────────────
// Persistence
// ─────────────────────────────────────────────────────────────────

/// Fire-and-forget save requests into the host's settings mechanism.
///
/// The store calls this after every mutating operation. The host is assumed
/// to debounce and coalesce rapid requests; completion is never awaited and
/// failures are invisible to the engine — an applied mutation is final.
pub trait SettingsSink: Send + Sync {
    fn request_save(&self);
}

// ─────────────────────────────────────────────────────────────────
// Persona Panel
// ─────────────────────────────────────────────────────────────────

/// The host's persona management panel.
pub trait HostPanel: Send + Sync {
    /// Whether the panel is present and visible. Polled by the panel
    /// watcher until it turns true.
    fn is_ready(&self) -> bool;

    /// Stable opaque ids of the currently displayed personas, in display
    /// order.
    fn personas(&self) -> Vec<PersonaId>;

    /// Show or hide a persona's display.
    fn set_persona_visible(&self, persona: &PersonaId, visible: bool);
}

// ─────────────────────────────────────────────────────────────────
// Presentation Adapter
// ─────────────────────────────────────────────────────────────────

/// Renders view models the engine computes into host UI.
///
/// Implementations construct whatever chips, labels, and buttons their host
/// markup calls for and forward user clicks back as [`UiEvent`]s. A missing
/// render anchor is reported as [`Error::MissingHostElement`]; the engine
/// logs it and aborts only that render.
///
/// [`UiEvent`]: crate::controller::UiEvent
/// [`Error::MissingHostElement`]: crate::error::Error::MissingHostElement
pub trait TagPresenter: Send + Sync {
    /// Render the collapsible tag filter bar.
    fn render_filter_bar(&self, view: &FilterBarView) -> Result<()>;

    /// Render the tag labels on each persona card.
    fn render_persona_cards(&self, cards: &[PersonaCardView]) -> Result<()>;

    /// Render the per-persona tag management panel.
    fn render_tag_manager(&self, view: &TagManagerView) -> Result<()>;
}
