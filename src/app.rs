//! The eframe application.
//!
//! Each frame collects panel outputs and shortcut presses first, then turns
//! them into `ViewEvent`s and settings edits on `AppState`.

use crate::clipboard;
use crate::config::{Settings, WindowSize};
use crate::markdown::RenderOptions;
use crate::state::{AppState, ViewEvent};
use crate::theme::{ThemeColors, ThemeManager};
use crate::ui::{
    show_footer, show_header, DocumentOutput, DocumentPane, HeaderProps, RenderedSection,
    SettingsPanel, Sidebar,
};
use eframe::egui;
use log::{debug, info, warn};
use std::collections::HashMap;

/// Application name, also the bare window title.
pub const APP_NAME: &str = "Git Scenarios";

/// Seconds a toast stays in the footer.
const TOAST_SECS: f64 = 2.0;

/// A shortcut seen inside `ctx.input`, handled once the input lock is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyboardAction {
    /// Toggle the section sidebar (Ctrl+B)
    ToggleSidebar,
    /// Focus the search field (Ctrl+F)
    FocusSearch,
    /// Clear the search (Escape)
    ClearSearch,
    /// Cycle theme (Ctrl+Shift+T)
    CycleTheme,
    /// Open settings panel (Ctrl+,)
    OpenSettings,
    /// Previous visible section (Alt+Up)
    PrevSection,
    /// Next visible section (Alt+Down)
    NextSection,
}

/// Top-level app: state plus the panels and caches that draw it.
pub struct GitScenariosApp {
    /// Central application state
    state: AppState,
    /// Resolves and applies the theme preference
    theme_manager: ThemeManager,
    /// Section list panel
    sidebar: Sidebar,
    /// Settings panel component
    settings_panel: SettingsPanel,
    /// Rendered sections keyed by section id
    rendered: HashMap<String, RenderedSection>,
    /// Options the cached sections were rendered with
    rendered_with: (RenderOptions, bool),
    /// Inner size seen last frame
    last_window_size: Option<egui::Vec2>,
    /// Last title sent to the viewport
    last_title: String,
    /// Clock for toast expiry
    start_time: std::time::Instant,
}

impl GitScenariosApp {
    /// Create the app from loaded settings and apply the saved theme.
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        info!("Initializing {}", APP_NAME);

        let state = AppState::with_settings(settings);

        let system_dark = is_system_dark(cc.integration_info.system_theme);
        let mut theme_manager = ThemeManager::new(state.settings.theme, system_dark);
        theme_manager.sync(&cc.egui_ctx);

        let sidebar = Sidebar::new(state.settings.sidebar_width);
        let rendered_with = render_key(&state.settings);

        Self {
            state,
            theme_manager,
            sidebar,
            settings_panel: SettingsPanel::new(),
            rendered: HashMap::new(),
            rendered_with,
            last_window_size: None,
            last_title: String::new(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Seconds since launch.
    fn now(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    /// Record the window geometry in settings when it changes.
    fn update_window_state(&mut self, ctx: &egui::Context) {
        let (size, maximized) = ctx.input(|i| {
            (
                i.viewport().inner_rect.map(|r| r.size()),
                i.viewport().maximized.unwrap_or(false),
            )
        });
        let Some(size) = size else {
            return;
        };

        let size_changed = self
            .last_window_size
            .map(|s| (s - size).length() > 1.0)
            .unwrap_or(true);
        let maximized_changed = self.state.settings.window_size.maximized != maximized;
        if !size_changed && !maximized_changed {
            return;
        }
        self.last_window_size = Some(size);

        // A maximized window keeps the restored size for next start
        let window_size = if maximized {
            WindowSize {
                maximized,
                ..self.state.settings.window_size
            }
        } else {
            WindowSize {
                width: size.x,
                height: size.y,
                maximized,
            }
        };

        if window_size != self.state.settings.window_size {
            debug!(
                "Window state updated: {}x{}, maximized: {}",
                window_size.width, window_size.height, window_size.maximized
            );
            self.state.update_settings(|s| s.window_size = window_size);
        }
    }

    /// Send the window title if it changed.
    fn update_window_title(&mut self, ctx: &egui::Context) {
        let title = window_title(
            self.state
                .view()
                .active(&self.state.store)
                .map(|s| s.title.as_str()),
        );
        if title != self.last_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.last_title = title;
        }
    }

    /// Render nodes for the active section, building them on first view.
    fn active_rendered(&mut self) -> Option<&RenderedSection> {
        let key = render_key(&self.state.settings);
        if key != self.rendered_with {
            debug!("Render options changed, dropping {} cached section(s)", self.rendered.len());
            self.rendered.clear();
            self.rendered_with = key;
        }

        let section = self.state.view().active(&self.state.store)?;
        let (options, highlight) = key;
        let rendered = self
            .rendered
            .entry(section.id.clone())
            .or_insert_with(|| {
                debug!("Rendering section '{}'", section.id);
                RenderedSection::build(&section.raw_text, &options, highlight)
            });
        Some(rendered)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // UI Rendering
    // ─────────────────────────────────────────────────────────────────────────

    /// Render the main UI and apply the actions it reports.
    fn render_ui(&mut self, ctx: &egui::Context) {
        let colors = self.theme_manager.colors();

        let header = show_header(
            ctx,
            HeaderProps {
                sidebar_open: self.state.view().sidebar_open,
                search_query: &self.state.view().search_query,
                focus_search: self.state.ui.focus_search,
                theme_icon: self.theme_manager.preference().icon(),
                theme_tooltip: self.theme_manager.tooltip(),
            },
            &colors,
        );
        self.state.ui.focus_search = false;

        let footer = show_footer(ctx, self.state.ui.toast_message.as_deref(), &colors);

        let sidebar = if self.state.view().sidebar_open {
            let view = self.state.view();
            let sections = view.visible_sections(&self.state.store);
            Some(
                self.sidebar
                    .show(ctx, &sections, view.active_section.as_deref(), &colors),
            )
        } else {
            None
        };

        if self.state.ui.show_settings {
            self.render_settings_panel(ctx);
        }

        let document = self.render_document(ctx, &colors);

        // Apply deferred actions
        if header.toggle_sidebar {
            self.state.dispatch(ViewEvent::ToggleSidebar);
        }
        if let Some(query) = header.search_changed {
            self.state.dispatch(ViewEvent::SetSearch(query));
        }
        if header.cycle_theme {
            self.handle_cycle_theme(ctx);
        }

        if let Some(output) = sidebar {
            if let Some(id) = output.selected {
                self.state.dispatch(ViewEvent::SelectSection(id));
            }
            if let Some(width) = output.new_width {
                self.state.update_settings(|s| s.sidebar_width = width);
            }
        }

        if let Some(url) = footer.open_url {
            self.handle_open_url(url);
        }

        if let Some(code) = document.copy_requested {
            self.handle_copy(&code);
        }
    }

    fn render_document(&mut self, ctx: &egui::Context, colors: &ThemeColors) -> DocumentOutput {
        let pane = DocumentPane::new(self.state.settings.font_size);
        let no_results = self.state.view().has_no_results(&self.state.store);
        let rendered = self.active_rendered();
        pane.show(ctx, rendered, no_results, colors)
    }

    fn render_settings_panel(&mut self, ctx: &egui::Context) {
        let is_dark = self.theme_manager.is_dark();
        let output = self
            .settings_panel
            .show(ctx, &mut self.state.settings, is_dark);

        if output.changed {
            self.theme_manager.set_preference(self.state.settings.theme);
            self.state.mark_settings_dirty();
        }

        if output.reset_requested {
            let defaults = reset_settings(&self.state.settings);
            info!("Settings reset to defaults");
            self.state.update_settings(|s| *s = defaults);
            self.theme_manager.set_preference(self.state.settings.theme);
            self.sidebar = Sidebar::new(self.state.settings.sidebar_width);
            let open = self.state.settings.sidebar_open;
            self.state.dispatch(ViewEvent::SetSidebarOpen(open));
            let time = self.now();
            self.state.show_toast("Settings reset", time, TOAST_SECS);
        }

        if output.close_requested {
            self.state.ui.show_settings = false;
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Keyboard Shortcuts
    // ─────────────────────────────────────────────────────────────────────────

    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        let settings_open = self.state.ui.show_settings;

        let action = ctx.input(|i| {
            // Ctrl+Shift+T: Cycle theme
            if i.modifiers.ctrl && i.modifiers.shift && i.key_pressed(egui::Key::T) {
                debug!("Keyboard shortcut: Ctrl+Shift+T (Cycle Theme)");
                return Some(KeyboardAction::CycleTheme);
            }

            // Ctrl+B: Toggle sidebar
            if i.modifiers.ctrl && !i.modifiers.shift && i.key_pressed(egui::Key::B) {
                debug!("Keyboard shortcut: Ctrl+B (Toggle Sidebar)");
                return Some(KeyboardAction::ToggleSidebar);
            }

            // Ctrl+F: Focus search
            if i.modifiers.ctrl && !i.modifiers.shift && i.key_pressed(egui::Key::F) {
                debug!("Keyboard shortcut: Ctrl+F (Focus Search)");
                return Some(KeyboardAction::FocusSearch);
            }

            // Ctrl+,: Settings
            if i.modifiers.ctrl && i.key_pressed(egui::Key::Comma) {
                debug!("Keyboard shortcut: Ctrl+, (Settings)");
                return Some(KeyboardAction::OpenSettings);
            }

            // Alt+Up / Alt+Down: Previous / next section
            if i.modifiers.alt && i.key_pressed(egui::Key::ArrowUp) {
                return Some(KeyboardAction::PrevSection);
            }
            if i.modifiers.alt && i.key_pressed(egui::Key::ArrowDown) {
                return Some(KeyboardAction::NextSection);
            }

            // Escape: Clear search (the settings panel handles its own)
            if !settings_open && i.key_pressed(egui::Key::Escape) {
                debug!("Keyboard shortcut: Escape (Clear Search)");
                return Some(KeyboardAction::ClearSearch);
            }

            None
        });

        let Some(action) = action else {
            return;
        };

        match action {
            KeyboardAction::ToggleSidebar => self.state.dispatch(ViewEvent::ToggleSidebar),
            KeyboardAction::FocusSearch => self.state.ui.focus_search = true,
            KeyboardAction::ClearSearch => self.state.dispatch(ViewEvent::ClearSearch),
            KeyboardAction::CycleTheme => self.handle_cycle_theme(ctx),
            KeyboardAction::OpenSettings => self.state.toggle_settings(),
            KeyboardAction::PrevSection => self.state.step_section(-1),
            KeyboardAction::NextSection => self.state.step_section(1),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Action Handlers
    // ─────────────────────────────────────────────────────────────────────────

    fn handle_cycle_theme(&mut self, ctx: &egui::Context) {
        let new_theme = self.theme_manager.cycle();
        self.theme_manager.sync(ctx);
        self.state.update_settings(|s| s.theme = new_theme);
        info!("Theme preference now {:?}", new_theme);
    }

    fn handle_copy(&mut self, code: &str) {
        let time = self.now();
        match clipboard::copy_text(code) {
            Ok(()) => self.state.show_toast("Copied to clipboard", time, TOAST_SECS),
            Err(e) => {
                warn!("{}", e);
                self.state.show_toast("Could not copy to clipboard", time, TOAST_SECS);
            }
        }
    }

    fn handle_open_url(&mut self, url: &str) {
        info!("Opening {}", url);
        if let Err(e) = open::that(url) {
            warn!("Failed to open {}: {}", url, e);
            let time = self.now();
            self.state.show_toast("Could not open link", time, TOAST_SECS);
        }
    }
}

impl eframe::App for GitScenariosApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        // Track the OS appearance for the System theme
        if let Some(theme) = frame.info().system_theme {
            self.theme_manager.set_system_dark(theme == eframe::Theme::Dark);
        }
        self.theme_manager.sync(ctx);

        let current_time = self.now();
        self.state.expire_toast(current_time);
        if self.state.ui.toast_message.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }

        self.update_window_state(ctx);
        self.update_window_title(ctx);

        // Shortcuts first so Ctrl+F focuses the field drawn this frame
        self.handle_keyboard_shortcuts(ctx);

        self.render_ui(ctx);
    }

    /// Flush settings before the window goes away.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application exiting");
        self.state.shutdown();
    }

    /// Save persistent state.
    fn save(&mut self, _storage: &mut dyn eframe::Storage) {
        debug!("Periodic settings save");
        self.state.save_settings_if_dirty();
    }

    fn auto_save_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(30)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helper Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Whether eframe reports a dark OS appearance. Unknown counts as light.
fn is_system_dark(system_theme: Option<eframe::Theme>) -> bool {
    system_theme == Some(eframe::Theme::Dark)
}

/// Cache key for rendered sections.
fn render_key(settings: &Settings) -> (RenderOptions, bool) {
    (settings.render_options(), settings.highlight_code)
}

/// "Section - Git Scenarios", or just the app name.
fn window_title(section_title: Option<&str>) -> String {
    match section_title {
        Some(title) if !title.is_empty() => format!("{} - {}", title, APP_NAME),
        _ => APP_NAME.to_string(),
    }
}

/// Defaults, keeping where the user was and where the content comes from.
fn reset_settings(current: &Settings) -> Settings {
    Settings {
        window_size: current.window_size,
        last_section: current.last_section.clone(),
        content_dir: current.content_dir.clone(),
        ..Settings::default()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
