//! User preferences.
//!
//! Every field has a default and the struct is `#[serde(default)]`, so old or
//! hand-edited config files load with whatever keys they have.

use crate::markdown::{FencePolicy, RenderOptions};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::PathBuf;

/// Color theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    /// Follow the operating system
    System,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::System];

    /// The preference after this one in the header button's cycle.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::System => "System",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Theme::Light => "☀",
            Theme::Dark => "🌙",
            Theme::System => "💻",
        }
    }
}

/// Last known outer window geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub maximized: bool,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            maximized: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    /// Body text size in points
    pub font_size: f32,
    pub highlight_code: bool,

    pub sidebar_open: bool,
    pub sidebar_width: f32,
    pub window_size: WindowSize,

    /// Section to reopen on the next start
    pub last_section: Option<String>,
    /// Markdown directory shown instead of the built-in guide
    pub content_dir: Option<PathBuf>,
    pub unterminated_fence: FencePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            font_size: 14.0,
            highlight_code: true,
            sidebar_open: true,
            sidebar_width: 260.0,
            window_size: WindowSize::default(),
            last_section: None,
            content_dir: None,
            unterminated_fence: FencePolicy::default(),
        }
    }
}

impl Settings {
    pub const FONT_SIZES: RangeInclusive<f32> = 8.0..=72.0;
    pub const SIDEBAR_WIDTHS: RangeInclusive<f32> = 160.0..=600.0;
    pub const WINDOW_EDGES: RangeInclusive<f32> = 200.0..=10_000.0;

    /// Bring hand-edited values back into range.
    ///
    /// NaN becomes the default value, since `clamp` passes it through.
    pub fn sanitize(&mut self) {
        let defaults = Self::default();
        self.font_size = clamp_or(self.font_size, &Self::FONT_SIZES, defaults.font_size);
        self.sidebar_width =
            clamp_or(self.sidebar_width, &Self::SIDEBAR_WIDTHS, defaults.sidebar_width);

        let window = &mut self.window_size;
        window.width = clamp_or(window.width, &Self::WINDOW_EDGES, defaults.window_size.width);
        window.height = clamp_or(window.height, &Self::WINDOW_EDGES, defaults.window_size.height);

        self.last_section = self.last_section.take().filter(|id| !id.is_empty());
        self.content_dir = self
            .content_dir
            .take()
            .filter(|dir| !dir.as_os_str().is_empty());
    }

    /// Parse JSON and sanitize the result.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            unterminated_fence: self.unterminated_fence,
        }
    }
}

fn clamp_or(value: f32, range: &RangeInclusive<f32>, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(*range.start(), *range.end())
    }
}
