//! Section Sidebar Component
//!
//! A resizable left panel listing the sections that match the current
//! search, with the active one highlighted.

use crate::config::Settings;
use crate::content::Section;
use crate::theme::ThemeColors;
use eframe::egui::{self, RichText, ScrollArea, Sense, Ui, Vec2};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Height of each section entry.
const ITEM_HEIGHT: f32 = 36.0;

const APP_TITLE: &str = "Git Scenarios";
const APP_SUBTITLE: &str = "Complete Reference Guide";
const FOOTER_TIP: &str = "💡 Tip: Use Ctrl+F to search";

// ─────────────────────────────────────────────────────────────────────────────
// SidebarOutput
// ─────────────────────────────────────────────────────────────────────────────

/// Output from the sidebar indicating user actions.
#[derive(Debug, Clone, Default)]
pub struct SidebarOutput {
    /// Section id that was clicked
    pub selected: Option<String>,
    /// New panel width if resized
    pub new_width: Option<f32>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Sidebar
// ─────────────────────────────────────────────────────────────────────────────

/// The section list panel.
#[derive(Debug, Clone)]
pub struct Sidebar {
    /// Current panel width
    width: f32,
}

impl Sidebar {
    /// Create a sidebar with the given width, clamped to the allowed range.
    pub fn new(width: f32) -> Self {
        Self {
            width: width.clamp(*Settings::SIDEBAR_WIDTHS.start(), *Settings::SIDEBAR_WIDTHS.end()),
        }
    }

    /// Get the current panel width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Render the sidebar.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        sections: &[&Section],
        active: Option<&str>,
        colors: &ThemeColors,
    ) -> SidebarOutput {
        let mut output = SidebarOutput::default();

        egui::SidePanel::left("section_sidebar")
            .resizable(true)
            .default_width(self.width)
            .min_width(*Settings::SIDEBAR_WIDTHS.start())
            .max_width(*Settings::SIDEBAR_WIDTHS.end())
            .frame(
                egui::Frame::none()
                    .fill(colors.base.background)
                    .stroke(egui::Stroke::new(1.0, colors.base.border_subtle)),
            )
            .show(ctx, |ui| {
                let current_width = ui.available_width();
                if (current_width - self.width).abs() > 1.0 {
                    self.width = current_width;
                    output.new_width = Some(current_width);
                }

                egui::Frame::none()
                    .inner_margin(egui::Margin::same(20.0))
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(APP_TITLE)
                                .size(22.0)
                                .strong()
                                .color(colors.doc.heading),
                        );
                        ui.label(RichText::new(APP_SUBTITLE).size(12.0).color(colors.text.muted));
                    });
                ui.separator();

                egui::TopBottomPanel::bottom("section_sidebar_tip")
                    .frame(egui::Frame::none().inner_margin(egui::Margin::same(12.0)))
                    .show_inside(ui, |ui| {
                        ui.label(RichText::new(FOOTER_TIP).size(11.0).color(colors.text.muted));
                    });

                ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.add_space(8.0);
                        ui.spacing_mut().item_spacing = Vec2::new(0.0, 4.0);
                        for section in sections {
                            let is_active = active == Some(section.id.as_str());
                            if self.render_entry(ui, section, is_active, colors).clicked() {
                                log::debug!("Sidebar: selected section '{}'", section.id);
                                output.selected = Some(section.id.clone());
                            }
                        }
                    });
            });

        output
    }

    fn render_entry(
        &self,
        ui: &mut Ui,
        section: &Section,
        is_active: bool,
        colors: &ThemeColors,
    ) -> egui::Response {
        let (rect, response) =
            ui.allocate_exact_size(Vec2::new(ui.available_width(), ITEM_HEIGHT), Sense::click());
        let rect = rect.shrink2(Vec2::new(8.0, 0.0));

        if is_active {
            ui.painter()
                .rect_filled(rect, egui::Rounding::same(6.0), colors.base.selected);
            let bar = egui::Rect::from_min_size(rect.min, Vec2::new(4.0, rect.height()));
            ui.painter()
                .rect_filled(bar, egui::Rounding::same(2.0), colors.ui.accent);
        } else if response.hovered() {
            ui.painter()
                .rect_filled(rect, egui::Rounding::same(6.0), colors.base.hover);
        }

        let text_color = if is_active {
            colors.ui.accent
        } else {
            colors.text.primary
        };
        let available = rect.width() - 40.0;
        let title = truncate_title(&section.title, available, 13.0);

        ui.painter().text(
            egui::pos2(rect.min.x + 16.0, rect.center().y),
            egui::Align2::LEFT_CENTER,
            title,
            egui::FontId::proportional(13.0),
            text_color,
        );

        if is_active {
            ui.painter().text(
                egui::pos2(rect.max.x - 10.0, rect.center().y),
                egui::Align2::RIGHT_CENTER,
                "›",
                egui::FontId::proportional(16.0),
                text_color,
            );
        }

        response.on_hover_text(&section.title)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helper Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Shorten a title to roughly fit `max_width` at `font_size`.
fn truncate_title(text: &str, max_width: f32, font_size: f32) -> String {
    let char_width = font_size * 0.55;
    let max_chars = (max_width / char_width).max(0.0) as usize;
    let len = text.chars().count();

    if len <= max_chars || max_chars < 4 {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars - 1).collect();
        format!("{}…", kept)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidebar_width_clamping() {
        assert_eq!(Sidebar::new(260.0).width(), 260.0);
        assert_eq!(Sidebar::new(10.0).width(), 160.0);
        assert_eq!(Sidebar::new(5000.0).width(), 600.0);
    }

    #[test]
    fn test_truncate_short_title() {
        assert_eq!(truncate_title("Branching", 200.0, 13.0), "Branching");
    }

    #[test]
    fn test_truncate_long_title() {
        let long = "Merging & Conflicts in Very Large Monorepos";
        let truncated = truncate_title(long, 100.0, 13.0);
        assert!(truncated.ends_with('…'));
        assert!(truncated.chars().count() < long.chars().count());
    }

    #[test]
    fn test_truncate_multibyte_title() {
        let title = "Конфликты слияния и ветвление";
        let truncated = truncate_title(title, 80.0, 13.0);
        assert!(truncated.ends_with('…'));
    }
}
