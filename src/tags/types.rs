//! Core types for the tag system.
//!
//! `TagSettings` is the durable contract: the host persists exactly this
//! shape (`persona_tags` + `persona_tag_map`), and state saved by older
//! versions must keep loading. Both keys default to empty when absent.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

// ─────────────────────────────────────────────────────────────────
// Identifiers
// ─────────────────────────────────────────────────────────────────

/// Unique, stable identifier of a tag in the global catalog.
///
/// Ids are opaque strings, generated content-independently — never derived
/// from the catalog's current size, so ids freed by garbage collection can
/// never be handed out again.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagId(String);

impl TagId {
    /// Generate a fresh unique id.
    pub fn generate() -> Self {
        TagId(Uuid::new_v4().to_string())
    }

    /// Wrap an existing id string (e.g. one read back from saved state).
    pub fn new(id: impl Into<String>) -> Self {
        TagId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier of a persona, supplied by the host (an avatar filename
/// or equivalent). The engine never generates one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonaId(String);

impl PersonaId {
    pub fn new(id: impl Into<String>) -> Self {
        PersonaId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PersonaId {
    fn from(id: &str) -> Self {
        PersonaId(id.to_string())
    }
}

// ─────────────────────────────────────────────────────────────────
// Tag
// ─────────────────────────────────────────────────────────────────

/// A named, colored label in the global catalog, assignable to zero or
/// more personas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Unique, stable id, never reused
    pub id: TagId,

    /// User-supplied display name (non-empty after trim)
    pub name: String,

    /// Hex or rgb(a) color string
    pub color: String,
}

// ─────────────────────────────────────────────────────────────────
// Persisted Settings Shape
// ─────────────────────────────────────────────────────────────────

/// The persisted state shape, owned by the host's settings mechanism.
///
/// The catalog is ordered (insertion order is display order). Each
/// persona's tag list is an ordered sequence; de-duplication is enforced by
/// the store's mutation operations, not by the container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagSettings {
    /// Global tag catalog in insertion order
    #[serde(default)]
    pub persona_tags: Vec<Tag>,

    /// Persona → assigned tag ids
    #[serde(default)]
    pub persona_tag_map: IndexMap<PersonaId, Vec<TagId>>,
}

impl TagSettings {
    /// Read the shape out of the host's JSON settings object.
    ///
    /// Unknown sibling keys are the host's business and are ignored;
    /// missing keys default to empty.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Serialize back into the host's JSON settings shape.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
