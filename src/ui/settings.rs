//! Settings window (Ctrl+,)
//!
//! Edits `Settings` in place. The app persists whatever changed and resyncs
//! the theme when `changed` is reported.

use crate::config::{Settings, Theme};
use crate::markdown::FencePolicy;
use eframe::egui::{self, Color32, RichText, Ui};
use log::info;
use std::path::{Path, PathBuf};

const FONT_PRESETS: [(&str, f32); 3] = [("Small", 12.0), ("Medium", 14.0), ("Large", 18.0)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Tab {
    #[default]
    Appearance,
    Content,
}

impl Tab {
    fn title(self) -> &'static str {
        match self {
            Tab::Appearance => "🎨 Appearance",
            Tab::Content => "📄 Content",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SettingsPanelOutput {
    pub changed: bool,
    pub close_requested: bool,
    /// User pressed "Reset All"
    pub reset_requested: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SettingsPanel {
    tab: Tab,
}

impl SettingsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the dimmed backdrop and the settings window.
    ///
    /// Clicking the backdrop or pressing Escape asks to close.
    pub fn show(&mut self, ctx: &egui::Context, settings: &mut Settings, is_dark: bool) -> SettingsPanelOutput {
        let mut output = SettingsPanelOutput::default();

        if backdrop(ctx, is_dark).clicked() {
            output.close_requested = true;
        }

        egui::Window::new("⚙ Settings")
            .collapsible(false)
            .resizable(false)
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .default_width(480.0)
            .show(ctx, |ui| {
                output.close_requested |= ui.input(|i| i.key_pressed(egui::Key::Escape));

                ui.horizontal(|ui| {
                    for tab in [Tab::Appearance, Tab::Content] {
                        ui.selectable_value(&mut self.tab, tab, RichText::new(tab.title()).size(14.0));
                    }
                });
                ui.separator();

                ui.set_min_height(220.0);
                output.changed = match self.tab {
                    Tab::Appearance => appearance_grid(ui, settings),
                    Tab::Content => content_grid(ui, settings),
                };

                ui.separator();
                ui.horizontal(|ui| {
                    output.reset_requested = ui
                        .button("↺ Reset All")
                        .on_hover_text("Restore default settings")
                        .clicked();
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        output.close_requested |= ui.button("Close").clicked();
                        ui.label(RichText::new("Changes are saved automatically").small().weak());
                    });
                });
            });

        output
    }
}

fn backdrop(ctx: &egui::Context, is_dark: bool) -> egui::Response {
    let screen = ctx.screen_rect();
    let alpha = if is_dark { 180 } else { 120 };
    egui::Area::new(egui::Id::new("settings_backdrop"))
        .order(egui::Order::Middle)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            ui.painter()
                .rect_filled(screen, 0.0, Color32::from_black_alpha(alpha));
            ui.allocate_response(screen.size(), egui::Sense::click())
        })
        .inner
}

fn appearance_grid(ui: &mut Ui, settings: &mut Settings) -> bool {
    let mut changed = false;
    egui::Grid::new("appearance_settings")
        .num_columns(2)
        .spacing([16.0, 12.0])
        .show(ui, |ui| {
            ui.label(RichText::new("Theme").strong());
            ui.horizontal(|ui| {
                for theme in Theme::ALL {
                    let text = format!("{} {}", theme.icon(), theme.label());
                    changed |= ui.selectable_value(&mut settings.theme, theme, text).changed();
                }
            });
            ui.end_row();

            ui.label(RichText::new("Font size").strong());
            changed |= ui
                .add(
                    egui::Slider::new(&mut settings.font_size, Settings::FONT_SIZES)
                        .step_by(1.0)
                        .suffix(" px"),
                )
                .changed();
            ui.end_row();

            ui.label("");
            ui.horizontal(|ui| {
                for (name, size) in FONT_PRESETS {
                    if ui.small_button(name).clicked() && settings.font_size != size {
                        settings.font_size = size;
                        changed = true;
                    }
                }
            });
            ui.end_row();
        });
    changed
}

fn content_grid(ui: &mut Ui, settings: &mut Settings) -> bool {
    let mut changed = false;
    egui::Grid::new("content_settings")
        .num_columns(2)
        .spacing([16.0, 12.0])
        .show(ui, |ui| {
            ui.label(RichText::new("Code blocks").strong());
            changed |= ui
                .checkbox(&mut settings.highlight_code, "Syntax highlighting")
                .changed();
            ui.end_row();

            ui.label(RichText::new("Unclosed fence").strong());
            ui.horizontal(|ui| {
                for policy in [FencePolicy::Drop, FencePolicy::Flush] {
                    changed |= ui
                        .selectable_value(&mut settings.unterminated_fence, policy, policy.label())
                        .on_hover_text(fence_policy_hint(policy))
                        .changed();
                }
            });
            ui.end_row();

            ui.label(RichText::new("Source").strong());
            ui.vertical(|ui| {
                match &settings.content_dir {
                    Some(dir) => ui.label(RichText::new(dir.display().to_string()).monospace()),
                    None => ui.label(RichText::new("Built-in guide").weak()),
                };
                ui.horizontal(|ui| {
                    if ui
                        .button("📁 Choose Folder…")
                        .on_hover_text("Folder of .md/.mdx files; takes effect on next start")
                        .clicked()
                    {
                        if let Some(dir) = pick_content_dir(settings.content_dir.as_deref()) {
                            changed |= set_content_dir(settings, Some(dir));
                        }
                    }
                    if settings.content_dir.is_some()
                        && ui
                            .button("Use Built-in Guide")
                            .on_hover_text("Takes effect on next start")
                            .clicked()
                    {
                        changed |= set_content_dir(settings, None);
                    }
                });
            });
            ui.end_row();
        });
    changed
}

/// Native folder picker, starting in the current content directory.
fn pick_content_dir(current: Option<&Path>) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new().set_title("Choose Content Folder");
    if let Some(dir) = current {
        dialog = dialog.set_directory(dir);
    }
    dialog.pick_folder()
}

/// Returns `true` if the directory actually changed.
fn set_content_dir(settings: &mut Settings, dir: Option<PathBuf>) -> bool {
    if settings.content_dir == dir {
        return false;
    }
    info!("Content directory set to {:?}", dir);
    settings.content_dir = dir;
    true
}

fn fence_policy_hint(policy: FencePolicy) -> &'static str {
    match policy {
        FencePolicy::Drop => "Hide code after a ``` that is never closed",
        FencePolicy::Flush => "Show code after a ``` that is never closed",
    }
}
