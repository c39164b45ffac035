//! persona-tags — tag catalog, assignment, and filtering engine for persona
//! management panels
//!
//! The engine owns a global catalog of named, colored tags and a
//! persona→tag assignment map, persisted through the host's settings
//! mechanism. Users filter the persona list by selected tags (logical AND),
//! and orphaned tags are garbage-collected lazily before every full
//! re-render.
//!
//! The host application stays behind trait seams: it persists snapshots
//! ([`SettingsSink`]), enumerates personas and toggles their visibility
//! ([`HostPanel`]), and renders the view models the engine computes
//! ([`TagPresenter`]). User clicks come back as [`UiEvent`]s into the
//! [`Controller`], which runs them to completion one at a time.
//!
//! ```
//! use std::sync::Arc;
//!
//! use persona_tags::{MockHost, PersonaId, TagStore};
//!
//! let host = Arc::new(MockHost::new());
//! let store = TagStore::new(host.clone());
//!
//! let tag = store.create_tag("Favorites", "#ff0000").unwrap();
//! store.assign_tag(&PersonaId::from("alice.png"), &tag.id);
//! assert_eq!(store.usage_count(&tag.id), 1);
//! ```

pub mod color;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod host;
pub mod logging;
pub mod session;
pub mod tags;
pub mod views;

pub use color::{generate_color, generate_contrasting_color, ColorMode};
pub use config::TagsConfig;
pub use controller::{Controller, HostEvent, PanelWatcher, UiEvent};
pub use error::{Error, Result};
pub use filter::FilterEngine;
pub use host::{HostPanel, MockHost, MockHostConfig, SettingsSink, TagPresenter};
pub use session::UiSession;
pub use tags::{PersonaId, Tag, TagId, TagSettings, TagStore};
pub use views::{FilterBarView, PersonaCardView, TagChip, TagManagerView};
