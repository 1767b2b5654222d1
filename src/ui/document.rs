//! Document Pane Component
//!
//! Paints the active section's render nodes in the central panel and shows
//! the "No results found" card when the search matches nothing.

use crate::markdown::syntax::{highlighter, CodeLine};
use crate::markdown::{HeadingLevel, InlineSpan, RenderNode, RenderOptions};
use crate::theme::ThemeColors;
use eframe::egui::{self, Color32, FontId, RichText, ScrollArea, Stroke, Ui, Vec2};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Maximum width of the article column.
const MAX_ARTICLE_WIDTH: f32 = 900.0;

/// Indentation of list items.
const LIST_INDENT: f32 = 24.0;

/// Keywords suggested when a search finds nothing.
pub const NO_RESULTS_HINT: &str =
    "Try searching for different keywords like 'merge', 'branch', 'conflict'";

// ─────────────────────────────────────────────────────────────────────────────
// Rendered Section Cache Entry
// ─────────────────────────────────────────────────────────────────────────────

/// Render nodes of one section plus highlighted code, built once.
#[derive(Debug, Clone)]
pub struct RenderedSection {
    pub nodes: Vec<RenderNode>,
    /// Index-aligned with `nodes`; `Some` only for highlighted code blocks
    highlighted: Vec<Option<Vec<CodeLine>>>,
}

impl RenderedSection {
    /// Render `raw_text` and, if `highlight` is set, highlight every code block.
    pub fn build(raw_text: &str, options: &RenderOptions, highlight: bool) -> Self {
        let nodes = crate::markdown::render_with_options(raw_text, options);
        let highlighted = nodes
            .iter()
            .map(|node| match node {
                RenderNode::CodeBlock { language, .. } if highlight => {
                    node.code().map(|code| highlighter().highlight(&code, language))
                }
                _ => None,
            })
            .collect();

        Self { nodes, highlighted }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// DocumentOutput
// ─────────────────────────────────────────────────────────────────────────────

/// Output from the document pane indicating user actions.
#[derive(Debug, Clone, Default)]
pub struct DocumentOutput {
    /// Code the user asked to copy
    pub copy_requested: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// DocumentPane
// ─────────────────────────────────────────────────────────────────────────────

/// The central document pane.
#[derive(Debug, Clone, Copy)]
pub struct DocumentPane {
    /// Base body font size
    font_size: f32,
}

impl DocumentPane {
    /// Create a pane with the given base font size.
    pub fn new(font_size: f32) -> Self {
        Self { font_size }
    }

    /// Render the pane.
    ///
    /// `section` is `None` when the store is empty. `no_results` appends the
    /// empty-search card after the article.
    pub fn show(
        &self,
        ctx: &egui::Context,
        section: Option<&RenderedSection>,
        no_results: bool,
        colors: &ThemeColors,
    ) -> DocumentOutput {
        let mut output = DocumentOutput::default();

        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(colors.base.background_secondary)
                    .inner_margin(egui::Margin::same(24.0)),
            )
            .show(ctx, |ui| {
                ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        let width = ui.available_width().min(MAX_ARTICLE_WIDTH);
                        ui.vertical_centered(|ui| {
                            ui.set_max_width(width);

                            if let Some(section) = section {
                                self.article_card(ui, colors, |ui| {
                                    self.render_nodes(ui, section, colors, &mut output);
                                });
                            }

                            if no_results {
                                ui.add_space(16.0);
                                self.no_results_card(ui, colors);
                            }
                        });
                    });
            });

        output
    }

    fn article_card(&self, ui: &mut Ui, colors: &ThemeColors, add_contents: impl FnOnce(&mut Ui)) {
        egui::Frame::none()
            .fill(colors.base.background)
            .stroke(Stroke::new(1.0, colors.base.border_subtle))
            .rounding(egui::Rounding::same(8.0))
            .inner_margin(egui::Margin::same(32.0))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.with_layout(egui::Layout::top_down(egui::Align::Min), add_contents);
            });
    }

    fn no_results_card(&self, ui: &mut Ui, colors: &ThemeColors) {
        egui::Frame::none()
            .fill(colors.base.background)
            .stroke(Stroke::new(1.0, colors.base.border_subtle))
            .rounding(egui::Rounding::same(8.0))
            .inner_margin(egui::Margin::same(48.0))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("🔍").size(48.0).color(colors.text.muted));
                    ui.add_space(12.0);
                    ui.label(
                        RichText::new("No results found")
                            .size(self.font_size * 1.6)
                            .strong()
                            .color(colors.text.secondary),
                    );
                    ui.add_space(6.0);
                    ui.label(RichText::new(NO_RESULTS_HINT).color(colors.text.muted));
                });
            });
    }

    fn render_nodes(
        &self,
        ui: &mut Ui,
        section: &RenderedSection,
        colors: &ThemeColors,
        output: &mut DocumentOutput,
    ) {
        let numbers = ordered_numbers(&section.nodes);

        for (index, node) in section.nodes.iter().enumerate() {
            match node {
                RenderNode::Heading { level, text } => self.render_heading(ui, *level, text, colors),
                RenderNode::CodeBlock { language, lines } => {
                    let highlighted = section.highlighted[index].as_deref();
                    if self.render_code_block(ui, index, language, lines, highlighted, colors) {
                        output.copy_requested = node.code();
                    }
                }
                RenderNode::ListItem { text, .. } => {
                    let marker = match numbers[index] {
                        Some(n) => format!("{}.", n),
                        None => "•".to_string(),
                    };
                    self.render_list_item(ui, &marker, text, colors);
                }
                RenderNode::Paragraph { spans } => self.render_paragraph(ui, spans, colors),
                RenderNode::Blank => {
                    ui.add_space(self.font_size * 0.6);
                }
            }
        }
    }

    fn render_heading(&self, ui: &mut Ui, level: HeadingLevel, text: &str, colors: &ThemeColors) {
        let color = match level {
            HeadingLevel::H1 => colors.doc.heading,
            HeadingLevel::H2 | HeadingLevel::H3 => colors.doc.subheading,
        };
        let size = heading_size(level, self.font_size);

        ui.add_space(size * 0.5);
        ui.label(RichText::new(text).size(size).strong().color(color));
        if level == HeadingLevel::H1 {
            ui.add_space(4.0);
            ui.separator();
        }
        ui.add_space(size * 0.25);
    }

    fn render_paragraph(&self, ui: &mut Ui, spans: &[InlineSpan], colors: &ThemeColors) {
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            for span in spans {
                ui.label(self.span_text(span, colors));
            }
        });
        ui.add_space(4.0);
    }

    fn span_text(&self, span: &InlineSpan, colors: &ThemeColors) -> RichText {
        match span {
            InlineSpan::PlainText(text) => RichText::new(text)
                .size(self.font_size)
                .color(colors.text.primary),
            InlineSpan::Bold(text) => RichText::new(text)
                .size(self.font_size)
                .strong()
                .color(colors.doc.heading),
            InlineSpan::InlineCode(text) => RichText::new(text)
                .font(FontId::monospace(self.font_size * 0.9))
                .color(colors.doc.inline_code_text)
                .background_color(colors.doc.inline_code_bg),
        }
    }

    fn render_list_item(&self, ui: &mut Ui, marker: &str, text: &str, colors: &ThemeColors) {
        ui.horizontal_wrapped(|ui| {
            ui.add_space(LIST_INDENT);
            ui.label(
                RichText::new(marker)
                    .size(self.font_size)
                    .color(colors.doc.list_marker),
            );
            ui.label(
                RichText::new(text)
                    .size(self.font_size)
                    .color(colors.text.primary),
            );
        });
    }

    /// Paint a code block. Returns `true` if Copy was clicked.
    fn render_code_block(
        &self,
        ui: &mut Ui,
        index: usize,
        language: &str,
        lines: &[String],
        highlighted: Option<&[CodeLine]>,
        colors: &ThemeColors,
    ) -> bool {
        let code_size = self.font_size * 0.9;
        let mut copy_clicked = false;

        ui.add_space(6.0);
        egui::Frame::none()
            .fill(colors.doc.code_block_bg)
            .stroke(Stroke::new(1.0, colors.doc.code_block_border))
            .rounding(egui::Rounding::same(6.0))
            .inner_margin(egui::Margin::same(12.0))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());

                ui.horizontal(|ui| {
                    if !language.is_empty() {
                        ui.label(
                            RichText::new(language)
                                .size(code_size * 0.85)
                                .color(Color32::from_gray(150)),
                        );
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let button = egui::Button::new(
                            RichText::new("Copy").size(code_size * 0.85).color(Color32::from_gray(200)),
                        )
                        .fill(colors.doc.code_block_border)
                        .min_size(Vec2::new(44.0, 20.0));
                        if ui.add(button).on_hover_text("Copy to clipboard").clicked() {
                            copy_clicked = true;
                        }
                    });
                });

                ScrollArea::horizontal()
                    .id_source(("code_block", index))
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        ui.spacing_mut().item_spacing = Vec2::new(0.0, 1.0);
                        match highlighted {
                            Some(lines) => {
                                for line in lines {
                                    ui.horizontal(|ui| {
                                        if line.is_empty() {
                                            ui.label(RichText::new(" ").font(FontId::monospace(code_size)));
                                        }
                                        for token in line {
                                            ui.label(token.rich_text(code_size));
                                        }
                                    });
                                }
                            }
                            None => {
                                for line in lines {
                                    let text = if line.is_empty() { " " } else { line.as_str() };
                                    ui.label(
                                        RichText::new(text)
                                            .font(FontId::monospace(code_size))
                                            .color(colors.doc.code_block_text),
                                    );
                                }
                            }
                        }
                    });
            });
        ui.add_space(6.0);

        copy_clicked
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helper Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Point size of a heading for a base body size.
pub fn heading_size(level: HeadingLevel, base: f32) -> f32 {
    match level {
        HeadingLevel::H1 => base * 2.0,
        HeadingLevel::H2 => base * 1.6,
        HeadingLevel::H3 => base * 1.3,
    }
}

/// Display number for each ordered list item, `None` for every other node.
///
/// Numbering counts consecutive list items; blank lines and bullet items do
/// not interrupt it, any other node restarts it at 1.
pub fn ordered_numbers(nodes: &[RenderNode]) -> Vec<Option<usize>> {
    let mut counter = 0;
    nodes
        .iter()
        .map(|node| match node {
            RenderNode::ListItem { ordered: true, .. } => {
                counter += 1;
                Some(counter)
            }
            RenderNode::ListItem { ordered: false, .. } | RenderNode::Blank => None,
            RenderNode::Heading { .. } | RenderNode::CodeBlock { .. } | RenderNode::Paragraph { .. } => {
                counter = 0;
                None
            }
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
