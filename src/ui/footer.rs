//! Footer Component
//!
//! Copyright line, external links and the transient toast message.

use crate::theme::ThemeColors;
use eframe::egui::{self, RichText};

const COPYRIGHT: &str = "© 2024 Git Scenarios Documentation. All scenarios tested and verified.";

/// `(label, url)` pairs shown on the right of the footer.
pub const FOOTER_LINKS: &[(&str, &str)] = &[
    ("Official Git Docs", "https://git-scm.com/doc"),
    ("GitHub", "https://github.com"),
];

/// Output from the footer indicating user actions.
#[derive(Debug, Clone, Default)]
pub struct FooterOutput {
    /// URL of a clicked link
    pub open_url: Option<&'static str>,
}

/// Render the footer.
pub fn show_footer(ctx: &egui::Context, toast: Option<&str>, colors: &ThemeColors) -> FooterOutput {
    let mut output = FooterOutput::default();

    egui::TopBottomPanel::bottom("footer_bar")
        .frame(
            egui::Frame::none()
                .fill(colors.base.background)
                .stroke(egui::Stroke::new(1.0, colors.base.border_subtle))
                .inner_margin(egui::Margin::symmetric(20.0, 10.0)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(COPYRIGHT).size(12.0).color(colors.text.muted));

                if let Some(message) = toast {
                    ui.add_space(16.0);
                    ui.label(RichText::new(message).size(12.0).color(colors.ui.success));
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    for (label, url) in FOOTER_LINKS.iter().rev() {
                        let link = egui::Button::new(RichText::new(*label).size(12.0).color(colors.text.link))
                            .frame(false);
                        if ui.add(link).on_hover_text(*url).clicked() {
                            output.open_url = Some(url);
                        }
                        ui.add_space(12.0);
                    }
                });
            });
        });

    output
}
