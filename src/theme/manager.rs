//! Theme Manager for Git Scenarios
//!
//! Resolves the user's `Theme` preference against the operating system's
//! appearance and pushes the matching visuals to the egui context whenever
//! the resolved mode changes.

use eframe::egui::Context;
use log::{debug, info};

use super::ThemeColors;
use crate::config::Theme;

/// Tracks the theme preference and what is currently on screen.
#[derive(Debug, Clone)]
pub struct ThemeManager {
    /// User preference (Light, Dark, or System)
    preference: Theme,
    /// Last reported OS appearance
    system_dark: bool,
    /// Mode currently applied to the context, `None` before the first apply
    applied_dark: Option<bool>,
}

impl ThemeManager {
    /// Create a manager for `preference`, with `system_dark` as the initial
    /// OS appearance.
    pub fn new(preference: Theme, system_dark: bool) -> Self {
        info!(
            "ThemeManager initialized with theme {:?} (system dark: {})",
            preference, system_dark
        );
        Self {
            preference,
            system_dark,
            applied_dark: None,
        }
    }

    /// The user's theme preference.
    pub fn preference(&self) -> Theme {
        self.preference
    }

    /// Change the preference. Takes effect on the next `sync`.
    pub fn set_preference(&mut self, theme: Theme) {
        if self.preference != theme {
            info!("Theme changed from {:?} to {:?}", self.preference, theme);
            self.preference = theme;
        }
    }

    /// Advance Light → Dark → System → Light and return the new preference.
    pub fn cycle(&mut self) -> Theme {
        let next = self.preference.next();
        self.set_preference(next);
        next
    }

    /// Record the OS appearance.
    ///
    /// eframe swaps in its stock visuals when the OS appearance changes, so a
    /// change forces the next `sync` to reapply even for a fixed preference.
    pub fn set_system_dark(&mut self, dark: bool) {
        if self.system_dark != dark {
            debug!("System appearance changed, dark: {}", dark);
            self.system_dark = dark;
            self.applied_dark = None;
        }
    }

    /// Whether the resolved appearance is dark.
    pub fn is_dark(&self) -> bool {
        match self.preference {
            Theme::Light => false,
            Theme::Dark => true,
            Theme::System => self.system_dark,
        }
    }

    /// Whether the next `sync` would change the context.
    pub fn needs_apply(&self) -> bool {
        self.applied_dark != Some(self.is_dark())
    }

    /// Apply visuals to `ctx` if the resolved mode changed.
    ///
    /// Returns `true` if the visuals were replaced.
    pub fn sync(&mut self, ctx: &Context) -> bool {
        if !self.needs_apply() {
            return false;
        }
        let dark = self.is_dark();
        ctx.set_visuals(ThemeColors::for_mode(dark).to_visuals());
        self.applied_dark = Some(dark);
        debug!(
            "Applied {} visuals for {:?}",
            if dark { "dark" } else { "light" },
            self.preference
        );
        true
    }

    /// Palette for the resolved appearance.
    pub fn colors(&self) -> ThemeColors {
        ThemeColors::for_mode(self.is_dark())
    }

    /// Tooltip for the header theme button.
    pub fn tooltip(&self) -> String {
        let name = match self.preference {
            Theme::System if self.system_dark => "System theme (dark)".to_string(),
            Theme::System => "System theme (light)".to_string(),
            other => format!("{} theme", other.label()),
        };
        format!("{}, Ctrl+Shift+T to switch", name)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
