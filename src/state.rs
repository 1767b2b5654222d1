//! Application state management for Git Scenarios
//!
//! The browsing state is a small immutable `ViewState` value. Every user
//! interaction is a `ViewEvent`, and `ViewState::apply` returns the next
//! state without touching the old one. `AppState` owns the content store,
//! the current `ViewState`, and the persisted settings.

use crate::config::{save_config, Settings};
use crate::content::{ContentStore, Section};
use log::{debug, info, warn};

// ─────────────────────────────────────────────────────────────────────────────
// View Events
// ─────────────────────────────────────────────────────────────────────────────

/// A user interaction that changes what is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// Show a section; ignored if the store has no such id
    SelectSection(String),
    /// Flip sidebar visibility
    ToggleSidebar,
    /// Set sidebar visibility explicitly
    SetSidebarOpen(bool),
    /// Replace the search query
    SetSearch(String),
    /// Empty the search query
    ClearSearch,
}

// ─────────────────────────────────────────────────────────────────────────────
// View State
// ─────────────────────────────────────────────────────────────────────────────

/// What the browser is currently showing.
///
/// The active section is independent of the search query: a section that no
/// longer matches stays on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Id of the displayed section
    pub active_section: Option<String>,
    /// Whether the sidebar is visible
    pub sidebar_open: bool,
    /// Current search text, used as typed
    pub search_query: String,
}

impl ViewState {
    /// Starting state for a store.
    ///
    /// Uses `last_section` if the store still has it, otherwise the first
    /// section. An empty store has no active section.
    pub fn initial(store: &ContentStore, last_section: Option<&str>, sidebar_open: bool) -> Self {
        let active_section = last_section
            .filter(|id| store.contains(id))
            .map(str::to_string)
            .or_else(|| store.list().first().map(|s| s.id.clone()));

        Self {
            active_section,
            sidebar_open,
            search_query: String::new(),
        }
    }

    /// The state after `event`.
    pub fn apply(&self, event: ViewEvent, store: &ContentStore) -> ViewState {
        let mut next = self.clone();
        match event {
            ViewEvent::SelectSection(id) => {
                if store.contains(&id) {
                    next.active_section = Some(id);
                } else {
                    debug!("Ignoring selection of unknown section '{}'", id);
                }
            }
            ViewEvent::ToggleSidebar => next.sidebar_open = !self.sidebar_open,
            ViewEvent::SetSidebarOpen(open) => next.sidebar_open = open,
            ViewEvent::SetSearch(query) => next.search_query = query,
            ViewEvent::ClearSearch => next.search_query.clear(),
        }
        next
    }

    /// Sections listed in the sidebar for the current query.
    pub fn visible_sections<'a>(&self, store: &'a ContentStore) -> Vec<&'a Section> {
        store.filter(&self.search_query)
    }

    /// Whether the query matches nothing.
    pub fn has_no_results(&self, store: &ContentStore) -> bool {
        !self.search_query.is_empty() && self.visible_sections(store).is_empty()
    }

    /// The displayed section, if any.
    pub fn active<'a>(&self, store: &'a ContentStore) -> Option<&'a Section> {
        self.active_section
            .as_deref()
            .and_then(|id| store.get(id).ok())
    }

    /// Id of the visible section `step` places away from the active one.
    ///
    /// Stops at either end of the list. When the active section is filtered
    /// out, the first (or last, for negative steps) visible section is used.
    pub fn neighbor(&self, store: &ContentStore, step: isize) -> Option<String> {
        let visible = self.visible_sections(store);
        if visible.is_empty() {
            return None;
        }

        let current = self
            .active_section
            .as_deref()
            .and_then(|id| visible.iter().position(|s| s.id == id));

        let target = match current {
            Some(index) => {
                let last = visible.len() as isize - 1;
                (index as isize + step).clamp(0, last) as usize
            }
            None if step < 0 => visible.len() - 1,
            None => 0,
        };

        Some(visible[target].id.clone())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// UI State
// ─────────────────────────────────────────────────────────────────────────────

/// Transient UI flags that are not part of the browsing state.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Whether the search field should take focus on the next frame
    pub focus_search: bool,
    /// Whether the settings panel is open
    pub show_settings: bool,
    /// Temporary message shown in the footer
    pub toast_message: Option<String>,
    /// Expiry in seconds since launch, set by `show_toast`
    pub toast_expires_at: Option<f64>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Application State
// ─────────────────────────────────────────────────────────────────────────────

/// Everything the app knows: content, view, settings and transient UI flags.
#[derive(Debug)]
pub struct AppState {
    /// Documentation being browsed
    pub store: ContentStore,
    /// Current browsing state
    view: ViewState,
    /// Persisted preferences
    pub settings: Settings,
    /// UI-related state
    pub ui: UiState,
    /// Unsaved edits to `settings`
    settings_dirty: bool,
}

impl AppState {
    /// Create the state from loaded settings.
    ///
    /// Content comes from `settings.content_dir` when set, with the built-in
    /// guide as fallback.
    pub fn with_settings(settings: Settings) -> Self {
        let store = ContentStore::load_or_builtin(settings.content_dir.as_deref());
        Self::with_store(settings, store)
    }

    /// Create the state with an explicit store (useful for testing).
    pub fn with_store(settings: Settings, store: ContentStore) -> Self {
        let view = ViewState::initial(
            &store,
            settings.last_section.as_deref(),
            settings.sidebar_open,
        );
        info!(
            "AppState initialized with {} section(s), active: {:?}",
            store.len(),
            view.active_section
        );

        Self {
            store,
            view,
            settings,
            ui: UiState::default(),
            settings_dirty: false,
        }
    }

    /// Current browsing state.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Apply a view event and mirror persisted fields into settings.
    pub fn dispatch(&mut self, event: ViewEvent) {
        let next = self.view.apply(event, &self.store);
        if next == self.view {
            return;
        }

        // Compare with the old view: a stale `last_section` is not an edit
        if next.sidebar_open != self.view.sidebar_open {
            self.settings.sidebar_open = next.sidebar_open;
            self.settings_dirty = true;
        }
        if next.active_section != self.view.active_section {
            self.settings.last_section = next.active_section.clone();
            self.settings_dirty = true;
        }

        self.view = next;
    }

    /// Move to the previous (`-1`) or next (`1`) visible section.
    pub fn step_section(&mut self, step: isize) {
        if let Some(id) = self.view.neighbor(&self.store, step) {
            self.dispatch(ViewEvent::SelectSection(id));
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Settings Management
    // ─────────────────────────────────────────────────────────────────────────

    /// Edit settings through `f` and schedule a save.
    pub fn update_settings<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Settings),
    {
        f(&mut self.settings);
        self.settings_dirty = true;
    }

    /// Mark settings as modified after they were edited in place.
    pub fn mark_settings_dirty(&mut self) {
        self.settings_dirty = true;
    }

    /// Whether settings have unsaved changes.
    pub fn settings_dirty(&self) -> bool {
        self.settings_dirty
    }

    /// Write settings if anything changed since the last save.
    ///
    /// Returns `true` when a write happened.
    pub fn save_settings_if_dirty(&mut self) -> bool {
        if !self.settings_dirty {
            return false;
        }
        match save_config(&self.settings) {
            Ok(()) => {
                self.settings_dirty = false;
                info!("Settings saved");
                true
            }
            Err(e) => {
                warn!("Failed to save settings: {}", e);
                false
            }
        }
    }

    /// Final save on exit.
    pub fn shutdown(&mut self) {
        self.settings_dirty = true;
        self.save_settings_if_dirty();
        info!("Shutdown complete");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // UI State Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Toggle the settings panel.
    pub fn toggle_settings(&mut self) {
        self.ui.show_settings = !self.ui.show_settings;
        debug!("Settings panel: {}", self.ui.show_settings);
    }

    /// Show a temporary message until `now + duration` seconds.
    pub fn show_toast(&mut self, message: impl Into<String>, now: f64, duration: f64) {
        self.ui.toast_message = Some(message.into());
        self.ui.toast_expires_at = Some(now + duration);
    }

    /// Drop the toast once it has expired.
    pub fn expire_toast(&mut self, now: f64) {
        if self.ui.toast_expires_at.is_some_and(|t| now >= t) {
            self.ui.toast_message = None;
            self.ui.toast_expires_at = None;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ContentStore {
        ContentStore::new(vec![
            Section::new("intro", "Introduction", "# Intro\nWelcome."),
            Section::new("branching", "Branching", "# Branching\ngit switch -c"),
            Section::new("merging", "Merging", "# Merging\ngit merge feature"),
        ])
        .unwrap()
    }

    fn ids(sections: &[&Section]) -> Vec<String> {
        sections.iter().map(|s| s.id.clone()).collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // ViewState
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_initial_uses_first_section() {
        let view = ViewState::initial(&store(), None, true);
        assert_eq!(view.active_section.as_deref(), Some("intro"));
        assert!(view.sidebar_open);
        assert!(view.search_query.is_empty());
    }

    #[test]
    fn test_initial_restores_last_section() {
        let view = ViewState::initial(&store(), Some("merging"), false);
        assert_eq!(view.active_section.as_deref(), Some("merging"));
        assert!(!view.sidebar_open);
    }

    #[test]
    fn test_initial_ignores_stale_last_section() {
        let view = ViewState::initial(&store(), Some("removed"), true);
        assert_eq!(view.active_section.as_deref(), Some("intro"));
    }

    #[test]
    fn test_initial_empty_store() {
        let empty = ContentStore::new(Vec::new()).unwrap();
        let view = ViewState::initial(&empty, Some("intro"), true);
        assert!(view.active_section.is_none());
    }

    #[test]
    fn test_select_section() {
        let store = store();
        let view = ViewState::initial(&store, None, true);
        let next = view.apply(ViewEvent::SelectSection("branching".into()), &store);
        assert_eq!(next.active_section.as_deref(), Some("branching"));
        // The previous value is untouched
        assert_eq!(view.active_section.as_deref(), Some("intro"));
    }

    #[test]
    fn test_select_unknown_section_is_ignored() {
        let store = store();
        let view = ViewState::initial(&store, None, true);
        let next = view.apply(ViewEvent::SelectSection("nope".into()), &store);
        assert_eq!(next, view);
    }

    #[test]
    fn test_sidebar_events() {
        let store = store();
        let view = ViewState::initial(&store, None, true);
        let closed = view.apply(ViewEvent::ToggleSidebar, &store);
        assert!(!closed.sidebar_open);
        let reopened = closed.apply(ViewEvent::ToggleSidebar, &store);
        assert!(reopened.sidebar_open);
        let forced = reopened.apply(ViewEvent::SetSidebarOpen(false), &store);
        assert!(!forced.sidebar_open);
    }

    #[test]
    fn test_search_filters_without_changing_active() {
        let store = store();
        let view = ViewState::initial(&store, Some("intro"), true);
        let searched = view.apply(ViewEvent::SetSearch("merge".into()), &store);

        assert_eq!(ids(&searched.visible_sections(&store)), vec!["merging"]);
        assert_eq!(searched.active_section.as_deref(), Some("intro"));
        assert!(!searched.has_no_results(&store));
    }

    #[test]
    fn test_no_results_and_clear() {
        let store = store();
        let view = ViewState::initial(&store, None, true);
        let searched = view.apply(ViewEvent::SetSearch("bisect".into()), &store);
        assert!(searched.visible_sections(&store).is_empty());
        assert!(searched.has_no_results(&store));

        let cleared = searched.apply(ViewEvent::ClearSearch, &store);
        assert_eq!(cleared.visible_sections(&store).len(), 3);
        assert!(!cleared.has_no_results(&store));
    }

    #[test]
    fn test_active_section_lookup() {
        let store = store();
        let view = ViewState::initial(&store, Some("branching"), true);
        assert_eq!(view.active(&store).map(|s| s.title.as_str()), Some("Branching"));
    }

    #[test]
    fn test_neighbor_steps_and_clamps() {
        let store = store();
        let view = ViewState::initial(&store, Some("branching"), true);
        assert_eq!(view.neighbor(&store, 1).as_deref(), Some("merging"));
        assert_eq!(view.neighbor(&store, -1).as_deref(), Some("intro"));

        let last = ViewState::initial(&store, Some("merging"), true);
        assert_eq!(last.neighbor(&store, 1).as_deref(), Some("merging"));
    }

    #[test]
    fn test_neighbor_when_active_is_filtered_out() {
        let store = store();
        let view = ViewState::initial(&store, Some("intro"), true)
            .apply(ViewEvent::SetSearch("git".into()), &store);
        assert_eq!(view.neighbor(&store, 1).as_deref(), Some("branching"));
        assert_eq!(view.neighbor(&store, -1).as_deref(), Some("merging"));

        let none = view.apply(ViewEvent::SetSearch("zzz".into()), &store);
        assert!(none.neighbor(&store, 1).is_none());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // AppState
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_dispatch_mirrors_settings() {
        let mut state = AppState::with_store(Settings::default(), store());
        assert!(!state.settings_dirty());

        state.dispatch(ViewEvent::SelectSection("merging".into()));
        assert_eq!(state.settings.last_section.as_deref(), Some("merging"));
        assert!(state.settings_dirty());

        state.dispatch(ViewEvent::ToggleSidebar);
        assert!(!state.settings.sidebar_open);
        assert!(!state.view().sidebar_open);
    }

    #[test]
    fn test_search_does_not_dirty_settings() {
        let mut state = AppState::with_store(Settings::default(), store());
        state.dispatch(ViewEvent::SetSearch("merge".into()));
        assert_eq!(state.view().search_query, "merge");
        assert!(!state.settings_dirty());
    }

    #[test]
    fn test_search_with_stale_last_section_stays_clean() {
        let settings = Settings {
            last_section: Some("deleted-section".into()),
            ..Settings::default()
        };
        let mut state = AppState::with_store(settings, store());
        assert_eq!(state.view().active_section.as_deref(), Some("intro"));

        state.dispatch(ViewEvent::SetSearch("rebase".into()));
        state.dispatch(ViewEvent::ClearSearch);
        assert!(!state.settings_dirty());
        assert_eq!(state.settings.last_section.as_deref(), Some("deleted-section"));

        state.dispatch(ViewEvent::SelectSection("branching".into()));
        assert!(state.settings_dirty());
        assert_eq!(state.settings.last_section.as_deref(), Some("branching"));
    }

    #[test]
    fn test_step_section() {
        let mut state = AppState::with_store(Settings::default(), store());
        state.step_section(1);
        assert_eq!(state.view().active_section.as_deref(), Some("branching"));
        state.step_section(-1);
        state.step_section(-1);
        assert_eq!(state.view().active_section.as_deref(), Some("intro"));
    }

    #[test]
    fn test_with_settings_restores_view() {
        let settings = Settings {
            last_section: Some("merging".to_string()),
            sidebar_open: false,
            ..Settings::default()
        };
        let state = AppState::with_settings(settings);
        assert!(!state.view().sidebar_open);
        // Built-in content has a merging section
        assert_eq!(state.view().active_section.as_deref(), Some("merging"));
    }

    #[test]
    fn test_toast_expiry() {
        let mut state = AppState::with_store(Settings::default(), store());
        state.show_toast("Copied", 1.0, 2.0);
        state.expire_toast(2.5);
        assert_eq!(state.ui.toast_message.as_deref(), Some("Copied"));
        state.expire_toast(3.0);
        assert!(state.ui.toast_message.is_none());
    }

    #[test]
    fn test_toggle_settings() {
        let mut state = AppState::with_store(Settings::default(), store());
        assert!(!state.ui.show_settings);
        state.toggle_settings();
        assert!(state.ui.show_settings);
        state.toggle_settings();
        assert!(!state.ui.show_settings);
    }
}
