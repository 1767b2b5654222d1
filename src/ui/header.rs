//! Header Bar Component
//!
//! Sidebar toggle, search field, theme switch and the product label.

use crate::theme::ThemeColors;
use eframe::egui::{self, RichText, Vec2};

const SEARCH_HINT: &str = "Search Git scenarios, commands, or solutions...";
const HEADER_LABEL: &str = "Git Documentation";

/// Widest the search field grows.
const MAX_SEARCH_WIDTH: f32 = 640.0;

/// Output from the header indicating user actions.
#[derive(Debug, Clone, Default)]
pub struct HeaderOutput {
    pub toggle_sidebar: bool,
    /// New query text if the field was edited
    pub search_changed: Option<String>,
    pub cycle_theme: bool,
}

/// What the header needs to draw itself.
pub struct HeaderProps<'a> {
    pub sidebar_open: bool,
    pub search_query: &'a str,
    /// Move keyboard focus to the search field this frame
    pub focus_search: bool,
    pub theme_icon: &'static str,
    pub theme_tooltip: String,
}

/// Render the header bar.
pub fn show_header(ctx: &egui::Context, props: HeaderProps<'_>, colors: &ThemeColors) -> HeaderOutput {
    let mut output = HeaderOutput::default();

    egui::TopBottomPanel::top("header_bar")
        .frame(
            egui::Frame::none()
                .fill(colors.base.background)
                .stroke(egui::Stroke::new(1.0, colors.base.border_subtle))
                .inner_margin(egui::Margin::symmetric(20.0, 12.0)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let toggle_icon = if props.sidebar_open { "✕" } else { "☰" };
                if ui
                    .add(egui::Button::new(RichText::new(toggle_icon).size(18.0)).frame(false))
                    .on_hover_text("Toggle sidebar (Ctrl+B)")
                    .clicked()
                {
                    output.toggle_sidebar = true;
                }

                ui.add_space(8.0);

                let mut query = props.search_query.to_string();
                let width = (ui.available_width() - 220.0).clamp(120.0, MAX_SEARCH_WIDTH);
                let response = ui.add(
                    egui::TextEdit::singleline(&mut query)
                        .hint_text(format!("🔍 {}", SEARCH_HINT))
                        .desired_width(width)
                        .margin(Vec2::new(10.0, 6.0)),
                );
                if props.focus_search {
                    response.request_focus();
                }
                if response.changed() {
                    output.search_changed = Some(query);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(format!("⎇ {}", HEADER_LABEL))
                            .size(13.0)
                            .color(colors.text.secondary),
                    );
                    ui.add_space(12.0);
                    if ui
                        .add(egui::Button::new(RichText::new(props.theme_icon).size(16.0)).frame(false))
                        .on_hover_text(props.theme_tooltip)
                        .clicked()
                    {
                        output.cycle_theme = true;
                    }
                });
            });
        });

    output
}
