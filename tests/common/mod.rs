//! Common test utilities and fixtures
//!
//! This module provides shared test infrastructure

use std::sync::Arc;

use persona_tags::{
    Controller, MockHost, MockHostConfig, PersonaId, Tag, TagSettings, TagStore, TagsConfig,
};

/// Complete test environment: a mock host wired as sink, panel, and
/// presenter around one shared store.
pub struct TestHarness {
    pub host: Arc<MockHost>,
    pub store: Arc<TagStore>,
}

impl TestHarness {
    /// Create a harness with empty settings and a ready panel.
    pub fn new() -> Self {
        Self::with_settings(TagSettings::default())
    }

    /// Create a harness seeded from previously persisted settings.
    pub fn with_settings(settings: TagSettings) -> Self {
        Self::build(Some(settings), MockHostConfig::default())
    }

    /// Create a harness with custom mock host behavior.
    pub fn with_host_config(config: MockHostConfig) -> Self {
        Self::build(Some(TagSettings::default()), config)
    }

    fn build(settings: Option<TagSettings>, config: MockHostConfig) -> Self {
        let host = Arc::new(MockHost::with_config(config));
        let store = Arc::new(TagStore::from_settings(settings, host.clone()));
        Self { host, store }
    }

    /// Show the given persona ids on the mock panel.
    pub fn show_personas(&self, ids: &[&str]) {
        self.host
            .set_personas(ids.iter().map(|id| PersonaId::from(*id)).collect());
    }

    /// A controller over this harness's store and host.
    pub fn controller(&self) -> Controller {
        Controller::new(
            TagsConfig::default(),
            self.store.clone(),
            self.host.clone(),
            self.host.clone(),
        )
    }

    /// Create a tag and assign it to the named personas.
    pub fn seed_tag(&self, name: &str, color: &str, personas: &[&str]) -> Tag {
        let tag = self.store.create_tag(name, color).expect("seed tag");
        for persona in personas {
            self.store.assign_tag(&PersonaId::from(*persona), &tag.id);
        }
        tag
    }
}
