//! Event-driven controller — wires user and host events to store, session,
//! and presentation
//!
//! All work happens on UI events delivered over channels; each event runs
//! to completion before the next is taken. A failed render logs and aborts
//! only itself — filter toggling, tag creation, and the other operations
//! stay functional, and no error value ever reaches host code.
//!
//! Garbage collection runs at the top of every full refresh (the lazy,
//! eager-on-read policy), so the tag lists and usage counts the user sees
//! are never stale.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::color::generate_color_with;
use crate::config::TagsConfig;
use crate::host::{HostPanel, TagPresenter};
use crate::session::UiSession;
use crate::tags::{PersonaId, TagId, TagStore};
use crate::views::{FilterBarView, PersonaCardView, TagManagerView};

// ─────────────────────────────────────────────────────────────────
// Events
// ─────────────────────────────────────────────────────────────────

/// User interactions forwarded by the presentation adapter.
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Add-tag action from a persona's manager panel. The new tag is
    /// assigned to that persona immediately, which keeps it referenced
    /// across the next collection pass. A missing or blank color falls
    /// back to a generated one in the session's color mode.
    CreateTag {
        persona: PersonaId,
        name: String,
        color: Option<String>,
    },

    /// Toggle a tag on a persona (manager chip or card label click)
    ToggleAssignment { persona: PersonaId, tag: TagId },

    /// Toggle a tag in the active filter selection
    ToggleFilter { tag: TagId },

    /// Chip-name filter input changed
    SetFilterText { text: String },

    /// Chip-name filter cleared
    ClearFilterText,

    /// Flip between light and dark generated colors
    ToggleColorMode,

    /// Expand or collapse the filter bar
    ToggleFilterBar,

    /// A persona card was selected (or deselected) for tag management
    SelectPersona { persona: Option<PersonaId> },

    /// Stop the controller loop
    Shutdown,
}

/// Notifications originating from the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// The persona panel became visible; initialize the UI
    PanelReady,

    /// The host's persona list changed; re-render everything
    PersonasChanged,
}

// ─────────────────────────────────────────────────────────────────
// Controller
// ─────────────────────────────────────────────────────────────────

/// Owns the session and drives store mutations, rendering, and filtering.
pub struct Controller {
    config: TagsConfig,
    store: Arc<TagStore>,
    session: UiSession,
    panel: Arc<dyn HostPanel>,
    presenter: Arc<dyn TagPresenter>,
}

impl Controller {
    /// Create a controller with a fresh session.
    pub fn new(
        config: TagsConfig,
        store: Arc<TagStore>,
        panel: Arc<dyn HostPanel>,
        presenter: Arc<dyn TagPresenter>,
    ) -> Self {
        let session = UiSession::new(config.default_color_mode());
        Self {
            config,
            store,
            session,
            panel,
            presenter,
        }
    }

    /// The current UI session state.
    pub fn session(&self) -> &UiSession {
        &self.session
    }

    /// The shared tag store.
    pub fn store(&self) -> &Arc<TagStore> {
        &self.store
    }

    // ─────────────────────────────────────────────────────────────
    // Event Loop
    // ─────────────────────────────────────────────────────────────

    /// Consume UI and host events until shutdown or until both channels
    /// close. Returns the controller so callers can inspect final state.
    pub async fn run(
        mut self,
        mut ui_events: mpsc::Receiver<UiEvent>,
        mut host_events: mpsc::Receiver<HostEvent>,
    ) -> Self {
        info!("Controller started");
        loop {
            tokio::select! {
                Some(event) = ui_events.recv() => {
                    if matches!(event, UiEvent::Shutdown) {
                        info!("Controller shutting down");
                        break;
                    }
                    self.handle_ui(event);
                }
                Some(event) = host_events.recv() => {
                    self.handle_host(event);
                }
                else => break,
            }
        }
        self
    }

    /// Handle one user interaction.
    pub fn handle_ui(&mut self, event: UiEvent) {
        debug!(event = ?event, "UI event");
        match event {
            UiEvent::CreateTag {
                persona,
                name,
                color,
            } => self.create_tag(&persona, &name, color),
            UiEvent::ToggleAssignment { persona, tag } => {
                self.store.toggle_tag(&persona, &tag);
                self.refresh();
            }
            UiEvent::ToggleFilter { tag } => {
                self.session.filter.toggle(&tag);
                self.render_filter_bar();
                self.apply_filter();
            }
            UiEvent::SetFilterText { text } => {
                self.session.filter_text = text;
                self.render_filter_bar();
            }
            UiEvent::ClearFilterText => {
                self.session.filter_text.clear();
                self.render_filter_bar();
            }
            UiEvent::ToggleColorMode => {
                let mode = self.session.toggle_color_mode();
                info!(mode = ?mode, "Color mode toggled");
                self.render_tag_manager();
            }
            UiEvent::ToggleFilterBar => {
                self.session.toggle_bar();
                self.render_filter_bar();
            }
            UiEvent::SelectPersona { persona } => {
                self.session.selected_persona = persona;
                self.render_tag_manager();
            }
            UiEvent::Shutdown => {}
        }
    }

    /// Handle one host notification.
    pub fn handle_host(&mut self, event: HostEvent) {
        match event {
            HostEvent::PanelReady => {
                info!("Persona panel ready, initializing tag UI");
                self.refresh();
            }
            HostEvent::PersonasChanged => {
                debug!("Host persona list changed");
                self.refresh();
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────

    fn create_tag(&mut self, persona: &PersonaId, name: &str, color: Option<String>) {
        let color = color
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| self.generate_tag_color());

        match self.store.create_tag(name, &color) {
            Ok(tag) => {
                self.store.assign_tag(persona, &tag.id);
                self.refresh();
            }
            Err(e) => warn!(persona = %persona, error = %e, "Tag creation rejected"),
        }
    }

    /// Full refresh: collect orphaned tags, purge any filter ids that died
    /// with them, re-render every surface, re-apply the persona filter.
    pub fn refresh(&mut self) {
        let removed = self.store.collect_unused_tags();
        if !removed.is_empty() && self.config.gc.purge_filter_selection {
            self.session.filter.purge_dangling(&removed);
        }

        self.render_filter_bar();
        self.render_persona_cards();
        self.render_tag_manager();
        self.apply_filter();
    }

    fn apply_filter(&self) {
        self.session.filter.apply(&self.store, self.panel.as_ref());
    }

    fn generate_tag_color(&self) -> String {
        generate_color_with(
            self.session.color_mode,
            self.config.color.max_attempts,
            &mut rand::thread_rng(),
        )
    }

    // ─────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────

    fn render_filter_bar(&self) {
        let view = FilterBarView::build(&self.store, &self.session);
        if let Err(e) = self.presenter.render_filter_bar(&view) {
            warn!(error = %e, "Filter bar render aborted");
        }
    }

    fn render_persona_cards(&self) {
        let cards = PersonaCardView::build_all(&self.store, &self.panel.personas());
        if let Err(e) = self.presenter.render_persona_cards(&cards) {
            warn!(error = %e, "Persona card render aborted");
        }
    }

    fn render_tag_manager(&self) {
        let Some(view) = TagManagerView::build(&self.store, &self.session, self.generate_tag_color())
        else {
            debug!("No persona selected for tag management");
            return;
        };
        if let Err(e) = self.presenter.render_tag_manager(&view) {
            warn!(error = %e, "Tag manager render aborted");
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Panel Watcher
// ─────────────────────────────────────────────────────────────────

/// Polls the host panel at a fixed interval until it is observed ready,
/// then emits [`HostEvent::PanelReady`] exactly once and stops.
///
/// Polls indefinitely — there is no attempt cap — but the task is
/// cancellable through the shutdown channel.
pub struct PanelWatcher {
    panel: Arc<dyn HostPanel>,
    poll_interval: Duration,
}

impl PanelWatcher {
    /// Create a watcher with an explicit poll interval.
    pub fn new(panel: Arc<dyn HostPanel>, poll_interval: Duration) -> Self {
        Self {
            panel,
            poll_interval,
        }
    }

    /// Create a watcher with the configured poll interval.
    pub fn from_config(panel: Arc<dyn HostPanel>, config: &TagsConfig) -> Self {
        Self::new(panel, Duration::from_millis(config.watcher.poll_interval_ms))
    }

    /// Run until the panel is ready or the watcher is cancelled.
    pub async fn run(self, events: mpsc::Sender<HostEvent>, mut shutdown: watch::Receiver<bool>) {
        loop {
            if self.panel.is_ready() {
                info!("Persona panel observed ready");
                let _ = events.send(HostEvent::PanelReady).await;
                return;
            }
            debug!("Waiting for persona panel");

            tokio::select! {
                _ = tokio::time::sleep(self.poll_interval) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        debug!("Panel watcher cancelled");
                        return;
                    }
                }
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MockHost, MockHostConfig};
    use crate::tags::TagSettings;

    fn test_controller() -> (Controller, Arc<MockHost>) {
        test_controller_with(MockHostConfig::default())
    }

    fn test_controller_with(config: MockHostConfig) -> (Controller, Arc<MockHost>) {
        let host = Arc::new(MockHost::with_config(config));
        let store = Arc::new(TagStore::from_settings(
            Some(TagSettings::default()),
            host.clone(),
        ));
        let controller = Controller::new(
            TagsConfig::default(),
            store,
            host.clone(),
            host.clone(),
        );
        (controller, host)
    }

    #[test]
    fn test_create_tag_assigns_to_origin_persona() {
        let (mut controller, host) = test_controller();
        let alice = PersonaId::from("alice.png");
        host.set_personas(vec![alice.clone()]);

        controller.handle_ui(UiEvent::CreateTag {
            persona: alice.clone(),
            name: "Favorites".to_string(),
            color: Some("#ff0000".to_string()),
        });

        let store = controller.store();
        let tags = store.all_tags();
        assert_eq!(tags.len(), 1);
        assert_eq!(store.usage_count(&tags[0].id), 1);
        // Survived the refresh-triggered collection pass
        assert_eq!(store.assigned_tags(&alice), tags);
        assert!(host.call_count("render_persona_cards") > 0);
    }

    #[test]
    fn test_create_tag_generates_color_when_blank() {
        let (mut controller, _host) = test_controller();
        let alice = PersonaId::from("alice.png");

        controller.handle_ui(UiEvent::CreateTag {
            persona: alice,
            name: "Favorites".to_string(),
            color: Some("   ".to_string()),
        });

        let tags = controller.store().all_tags();
        assert_eq!(tags.len(), 1);
        assert!(tags[0].color.starts_with('#'));
    }

    #[test]
    fn test_create_tag_empty_name_rejected() {
        let (mut controller, host) = test_controller();

        controller.handle_ui(UiEvent::CreateTag {
            persona: PersonaId::from("alice.png"),
            name: "   ".to_string(),
            color: None,
        });

        assert_eq!(controller.store().tag_count(), 0);
        // Rejection short-circuits before any render
        assert_eq!(host.call_count("render_filter_bar"), 0);
    }

    #[test]
    fn test_filter_toggle_applies_visibility() {
        let (mut controller, host) = test_controller();
        let alice = PersonaId::from("alice.png");
        let bob = PersonaId::from("bob.png");
        host.set_personas(vec![alice.clone(), bob.clone()]);

        controller.handle_ui(UiEvent::CreateTag {
            persona: alice.clone(),
            name: "Tag1".to_string(),
            color: Some("#ff0000".to_string()),
        });
        let tag = controller.store().all_tags().remove(0);

        controller.handle_ui(UiEvent::ToggleFilter { tag: tag.id });

        assert_eq!(host.visibility(&alice), Some(true));
        assert_eq!(host.visibility(&bob), Some(false));
    }

    #[test]
    fn test_gc_purges_dangling_filter_selection() {
        let (mut controller, host) = test_controller();
        let alice = PersonaId::from("alice.png");
        host.set_personas(vec![alice.clone()]);

        controller.handle_ui(UiEvent::CreateTag {
            persona: alice.clone(),
            name: "Tag1".to_string(),
            color: Some("#ff0000".to_string()),
        });
        let tag = controller.store().all_tags().remove(0);
        controller.handle_ui(UiEvent::ToggleFilter {
            tag: tag.id.clone(),
        });
        assert!(controller.session().filter.is_selected(&tag.id));

        // Unassigning the only use orphans the tag; the refresh collects it
        // and drops it from the selection
        controller.handle_ui(UiEvent::ToggleAssignment {
            persona: alice,
            tag: tag.id.clone(),
        });

        assert!(!controller.store().contains_tag(&tag.id));
        assert!(controller.session().filter.is_empty());
    }

    #[test]
    fn test_failed_render_does_not_block_other_surfaces() {
        let (mut controller, host) = test_controller_with(MockHostConfig {
            fail_filter_bar: true,
            ..Default::default()
        });
        let alice = PersonaId::from("alice.png");
        host.set_personas(vec![alice.clone()]);

        controller.handle_ui(UiEvent::CreateTag {
            persona: alice.clone(),
            name: "Tag1".to_string(),
            color: Some("#ff0000".to_string()),
        });

        // Filter bar failed, everything else proceeded
        assert!(host.last_filter_bar().is_none());
        assert_eq!(host.last_persona_cards().len(), 1);
        assert_eq!(host.visibility(&alice), Some(true));
        // And the mutation itself stuck
        assert_eq!(controller.store().tag_count(), 1);
    }

    #[test]
    fn test_filter_text_controls_chip_visibility() {
        let (mut controller, host) = test_controller();
        let alice = PersonaId::from("alice.png");

        controller.handle_ui(UiEvent::ToggleFilterBar);
        controller.handle_ui(UiEvent::CreateTag {
            persona: alice.clone(),
            name: "Fantasy".to_string(),
            color: Some("#111111".to_string()),
        });
        controller.handle_ui(UiEvent::CreateTag {
            persona: alice,
            name: "SciFi".to_string(),
            color: Some("#222222".to_string()),
        });

        controller.handle_ui(UiEvent::SetFilterText {
            text: "sci".to_string(),
        });
        let bar = host.last_filter_bar().unwrap();
        let visible: Vec<_> = bar
            .chips
            .iter()
            .filter(|c| c.visible)
            .map(|c| c.tag.name.clone())
            .collect();
        assert_eq!(visible, ["SciFi"]);

        controller.handle_ui(UiEvent::ClearFilterText);
        let bar = host.last_filter_bar().unwrap();
        assert!(bar.chips.iter().all(|c| c.visible));
    }

    #[test]
    fn test_select_persona_renders_manager() {
        let (mut controller, host) = test_controller();
        let alice = PersonaId::from("alice.png");

        controller.handle_ui(UiEvent::SelectPersona {
            persona: Some(alice.clone()),
        });
        assert_eq!(host.last_tag_manager().unwrap().persona, alice);

        controller.handle_ui(UiEvent::SelectPersona { persona: None });
        assert_eq!(controller.session().selected_persona, None);
    }

    #[tokio::test]
    async fn test_run_loop_until_shutdown() {
        let (controller, host) = test_controller();
        let alice = PersonaId::from("alice.png");
        host.set_personas(vec![alice.clone()]);

        let (ui_tx, ui_rx) = mpsc::channel(16);
        let (host_tx, host_rx) = mpsc::channel(16);
        let task = tokio::spawn(controller.run(ui_rx, host_rx));

        host_tx.send(HostEvent::PanelReady).await.unwrap();
        ui_tx
            .send(UiEvent::CreateTag {
                persona: alice,
                name: "Tag1".to_string(),
                color: Some("#ff0000".to_string()),
            })
            .await
            .unwrap();
        ui_tx.send(UiEvent::Shutdown).await.unwrap();

        let controller = task.await.unwrap();
        assert_eq!(controller.store().tag_count(), 1);
        // At minimum the CreateTag refresh rendered before shutdown
        assert!(host.call_count("render_filter_bar") >= 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_watcher_waits_for_readiness() {
        let host = Arc::new(MockHost::with_config(MockHostConfig {
            ready: false,
            ..Default::default()
        }));
        let watcher = PanelWatcher::new(host.clone(), Duration::from_millis(1000));
        let (events_tx, mut events_rx) = mpsc::channel(4);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(watcher.run(events_tx, shutdown_rx));

        // Let a few polls elapse before the panel appears
        tokio::time::sleep(Duration::from_millis(3500)).await;
        host.set_ready(true);

        assert_eq!(events_rx.recv().await, Some(HostEvent::PanelReady));
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_watcher_cancellable() {
        let host = Arc::new(MockHost::with_config(MockHostConfig {
            ready: false,
            ..Default::default()
        }));
        let watcher = PanelWatcher::new(host, Duration::from_millis(1000));
        let (events_tx, mut events_rx) = mpsc::channel(4);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(watcher.run(events_tx, shutdown_rx));
        shutdown_tx.send(true).unwrap();
        task.await.unwrap();

        // Cancelled without ever reporting readiness
        assert_eq!(events_rx.recv().await, None);
    }
}
