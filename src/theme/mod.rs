//! Theme System for Git Scenarios
//!
//! Colors for the documentation browser and their conversion to egui
//! `Visuals`. The `Theme` preference (Light/Dark/System) lives in
//! `config::settings`; `ThemeManager` resolves it to a light or dark
//! palette and keeps the egui context in sync.

mod manager;

pub use manager::ThemeManager;

use eframe::egui::{self, epaint::Shadow, Color32, Rounding, Stroke, Visuals};

/// Corner radius of buttons and inputs.
const WIDGET_ROUNDING: f32 = 4.0;

/// Corner radius of windows such as the settings modal.
const WINDOW_ROUNDING: f32 = 8.0;

// ─────────────────────────────────────────────────────────────────────────────
// Theme Colors
// ─────────────────────────────────────────────────────────────────────────────

/// All colors used by the browser.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeColors {
    /// Base UI colors (backgrounds, borders)
    pub base: BaseColors,
    /// Text colors for various contexts
    pub text: TextColors,
    /// Colors for rendered documentation
    pub doc: DocColors,
    /// UI feedback colors
    pub ui: UiColors,
}

impl ThemeColors {
    /// Palette for a light (`false`) or dark (`true`) appearance.
    pub fn for_mode(dark: bool) -> Self {
        if dark {
            Self::dark()
        } else {
            Self::light()
        }
    }

    /// Get the light theme colors.
    pub fn light() -> Self {
        Self {
            base: BaseColors::light(),
            text: TextColors::light(),
            doc: DocColors::light(),
            ui: UiColors::light(),
        }
    }

    /// Get the dark theme colors.
    pub fn dark() -> Self {
        Self {
            base: BaseColors::dark(),
            text: TextColors::dark(),
            doc: DocColors::dark(),
            ui: UiColors::dark(),
        }
    }

    /// Check if this is a dark theme.
    pub fn is_dark(&self) -> bool {
        self.base.background.r() < 128
    }

    /// Build egui `Visuals` from this palette.
    ///
    /// Starts from egui's stock light or dark visuals so anything not
    /// overridden here keeps a sensible default.
    pub fn to_visuals(&self) -> Visuals {
        let dark = self.is_dark();
        let mut visuals = if dark { Visuals::dark() } else { Visuals::light() };
        let rounding = Rounding::same(WIDGET_ROUNDING);

        visuals.dark_mode = dark;
        visuals.override_text_color = None;
        visuals.panel_fill = self.base.background;
        visuals.window_fill = self.base.background;
        visuals.extreme_bg_color = self.base.background_tertiary;
        visuals.faint_bg_color = self.base.background_secondary;
        visuals.code_bg_color = self.doc.inline_code_bg;
        visuals.hyperlink_color = self.text.link;
        visuals.warn_fg_color = self.ui.warning;
        visuals.error_fg_color = self.ui.error;

        visuals.selection.bg_fill = self.base.selected;
        visuals.selection.stroke = Stroke::new(1.0, self.ui.accent);

        // (fill, weak fill, border, text) per interaction state
        let base = &self.base;
        let states = [
            (base.background_secondary, base.background_tertiary, base.border_subtle, self.text.primary),
            (base.background_secondary, base.background_tertiary, base.border, self.text.secondary),
            (base.hover, base.hover, self.ui.accent, self.text.primary),
            (self.ui.accent, base.selected, self.ui.accent_hover, Color32::WHITE),
            (base.selected, base.selected, self.ui.accent, self.text.primary),
        ];
        let widgets = &mut visuals.widgets;
        let targets = [
            &mut widgets.noninteractive,
            &mut widgets.inactive,
            &mut widgets.hovered,
            &mut widgets.active,
            &mut widgets.open,
        ];
        for (widget, (fill, weak_fill, border, text)) in targets.into_iter().zip(states) {
            widget.bg_fill = fill;
            widget.weak_bg_fill = weak_fill;
            widget.bg_stroke = Stroke::new(1.0, border);
            widget.fg_stroke = Stroke::new(1.0, text);
            widget.rounding = rounding;
        }

        visuals.window_rounding = Rounding::same(WINDOW_ROUNDING);
        visuals.window_stroke = Stroke::new(1.0, self.base.border);
        visuals.menu_rounding = rounding;
        visuals.striped = false;
        visuals.interact_cursor = Some(egui::CursorIcon::PointingHand);

        // Dark panels need a stronger shadow for the modal to stand out
        let (alpha, blur) = if dark { (90, 14.0) } else { (28, 10.0) };
        visuals.window_shadow = Shadow {
            offset: egui::vec2(0.0, 4.0),
            blur,
            spread: 0.0,
            color: Color32::from_black_alpha(alpha),
        };
        visuals.popup_shadow = visuals.window_shadow;

        visuals
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Base Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Base UI colors for backgrounds and borders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseColors {
    /// Document pane background
    pub background: Color32,
    /// Sidebar, header and footer background
    pub background_secondary: Color32,
    /// Input fields
    pub background_tertiary: Color32,
    /// Primary border color
    pub border: Color32,
    /// Subtle border color (dividers)
    pub border_subtle: Color32,
    /// Hover state background
    pub hover: Color32,
    /// Selected/active state background
    pub selected: Color32,
}

impl BaseColors {
    /// Light theme base colors.
    pub fn light() -> Self {
        Self {
            background: Color32::from_rgb(255, 255, 255),
            background_secondary: Color32::from_rgb(249, 250, 251),
            background_tertiary: Color32::from_rgb(243, 244, 246),
            border: Color32::from_rgb(209, 213, 219),
            border_subtle: Color32::from_rgb(229, 231, 235),
            hover: Color32::from_rgb(243, 244, 246),
            selected: Color32::from_rgb(219, 234, 254),
        }
    }

    /// Dark theme base colors.
    pub fn dark() -> Self {
        Self {
            background: Color32::from_rgb(17, 24, 39),
            background_secondary: Color32::from_rgb(31, 41, 55),
            background_tertiary: Color32::from_rgb(55, 65, 81),
            border: Color32::from_rgb(75, 85, 99),
            border_subtle: Color32::from_rgb(55, 65, 81),
            hover: Color32::from_rgb(55, 65, 81),
            selected: Color32::from_rgb(30, 58, 138),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Text Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Text colors for various contexts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextColors {
    /// Body text
    pub primary: Color32,
    /// Labels and subtitles
    pub secondary: Color32,
    /// Hints and footer text
    pub muted: Color32,
    /// Footer links
    pub link: Color32,
}

impl TextColors {
    /// Light theme text colors.
    pub fn light() -> Self {
        Self {
            primary: Color32::from_rgb(31, 41, 55),
            secondary: Color32::from_rgb(75, 85, 99),
            muted: Color32::from_rgb(107, 114, 128),
            link: Color32::from_rgb(37, 99, 235),
        }
    }

    /// Dark theme text colors.
    pub fn dark() -> Self {
        Self {
            primary: Color32::from_rgb(229, 231, 235),
            secondary: Color32::from_rgb(209, 213, 219),
            muted: Color32::from_rgb(156, 163, 175),
            link: Color32::from_rgb(96, 165, 250),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Document Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Colors for rendered documentation nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocColors {
    /// Level one headings
    pub heading: Color32,
    /// Level two and three headings
    pub subheading: Color32,
    /// Fenced code block background
    pub code_block_bg: Color32,
    /// Fenced code block border
    pub code_block_border: Color32,
    /// Unhighlighted code block text
    pub code_block_text: Color32,
    /// Inline code background
    pub inline_code_bg: Color32,
    /// Inline code text
    pub inline_code_text: Color32,
    /// Bullets and list numbers
    pub list_marker: Color32,
}

impl DocColors {
    /// Light theme document colors.
    pub fn light() -> Self {
        Self {
            heading: Color32::from_rgb(17, 24, 39),
            subheading: Color32::from_rgb(31, 41, 55),
            code_block_bg: Color32::from_rgb(17, 24, 39),
            code_block_border: Color32::from_rgb(55, 65, 81),
            code_block_text: Color32::from_rgb(134, 239, 172),
            inline_code_bg: Color32::from_rgb(243, 244, 246),
            inline_code_text: Color32::from_rgb(31, 41, 55),
            list_marker: Color32::from_rgb(37, 99, 235),
        }
    }

    /// Dark theme document colors.
    pub fn dark() -> Self {
        Self {
            heading: Color32::from_rgb(249, 250, 251),
            subheading: Color32::from_rgb(229, 231, 235),
            code_block_bg: Color32::from_rgb(11, 15, 25),
            code_block_border: Color32::from_rgb(55, 65, 81),
            code_block_text: Color32::from_rgb(134, 239, 172),
            inline_code_bg: Color32::from_rgb(55, 65, 81),
            inline_code_text: Color32::from_rgb(243, 244, 246),
            list_marker: Color32::from_rgb(96, 165, 250),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// UI Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Colors for feedback and interactive elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiColors {
    /// Primary accent color (buttons, active elements)
    pub accent: Color32,
    /// Accent color for hover state
    pub accent_hover: Color32,
    /// Success color (copy confirmation)
    pub success: Color32,
    /// Warning color
    pub warning: Color32,
    /// Error color
    pub error: Color32,
}

impl UiColors {
    /// Light theme UI colors.
    pub fn light() -> Self {
        Self {
            accent: Color32::from_rgb(37, 99, 235),
            accent_hover: Color32::from_rgb(29, 78, 216),
            success: Color32::from_rgb(22, 163, 74),
            warning: Color32::from_rgb(234, 179, 8),
            error: Color32::from_rgb(220, 38, 38),
        }
    }

    /// Dark theme UI colors.
    pub fn dark() -> Self {
        Self {
            accent: Color32::from_rgb(96, 165, 250),
            accent_hover: Color32::from_rgb(147, 197, 253),
            success: Color32::from_rgb(74, 222, 128),
            warning: Color32::from_rgb(250, 204, 21),
            error: Color32::from_rgb(248, 113, 113),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
