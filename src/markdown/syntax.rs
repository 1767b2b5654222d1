//! Code block highlighting backed by syntect.
//!
//! Code cards are painted on a dark background in both app themes, so a
//! single dark syntect theme is used. Fence tags are resolved through a
//! small alias table before falling back to syntect's own lookup.

use eframe::egui::{Color32, FontId, RichText};
use log::{debug, warn};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Color, FontStyle, Style, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use std::sync::OnceLock;

/// Bundled syntect theme used for every code card.
const CODE_THEME: &str = "base16-ocean.dark";

/// Used when the bundled theme carries no foreground.
const FALLBACK_FOREGROUND: Color32 = Color32::from_rgb(0xc0, 0xc5, 0xce);

/// Fence tags that should resolve to a syntect extension other than themselves.
const LANGUAGE_ALIASES: &[(&str, &[&str])] = &[
    ("sh", &["shell", "bash", "zsh", "console", "terminal"]),
    ("js", &["javascript", "node"]),
    ("py", &["python"]),
    ("rs", &["rust"]),
    ("yaml", &["yml"]),
    ("groovy", &["jenkinsfile"]),
    ("ini", &["gitconfig", "cfg"]),
    ("diff", &["patch"]),
    ("md", &["markdown"]),
];

// ─────────────────────────────────────────────────────────────────────────────
// Output Types
// ─────────────────────────────────────────────────────────────────────────────

/// A run of code sharing one style.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeToken {
    pub text: String,
    pub color: Color32,
    pub bold: bool,
    pub italic: bool,
}

impl CodeToken {
    fn from_style(style: Style, text: &str) -> Self {
        Self {
            text: text.to_owned(),
            color: to_color32(style.foreground),
            bold: style.font_style.contains(FontStyle::BOLD),
            italic: style.font_style.contains(FontStyle::ITALIC),
        }
    }

    /// Monospace label text for this token.
    pub fn rich_text(&self, size: f32) -> RichText {
        let text = RichText::new(&self.text)
            .font(FontId::monospace(size))
            .color(self.color);
        match (self.bold, self.italic) {
            (true, true) => text.strong().italics(),
            (true, false) => text.strong(),
            (false, true) => text.italics(),
            (false, false) => text,
        }
    }
}

/// One source line of a code block, without its line terminator.
pub type CodeLine = Vec<CodeToken>;

// ─────────────────────────────────────────────────────────────────────────────
// CodeHighlighter
// ─────────────────────────────────────────────────────────────────────────────

/// Owns the syntect definitions. Loading them takes a noticeable moment,
/// so the app shares one instance through [`highlighter`].
pub struct CodeHighlighter {
    syntaxes: SyntaxSet,
    theme: Option<Theme>,
}

impl CodeHighlighter {
    pub fn load() -> Self {
        let syntaxes = SyntaxSet::load_defaults_newlines();
        let mut themes = ThemeSet::load_defaults();
        let theme = themes.themes.remove(CODE_THEME);
        if theme.is_none() {
            warn!("Bundled syntax theme {} not found", CODE_THEME);
        }
        debug!("Loaded {} syntax definitions", syntaxes.syntaxes().len());
        Self { syntaxes, theme }
    }

    fn foreground(&self) -> Color32 {
        self.theme
            .as_ref()
            .and_then(|theme| theme.settings.foreground)
            .map(to_color32)
            .unwrap_or(FALLBACK_FOREGROUND)
    }

    /// Look up the syntax for a fence info tag. Empty tags resolve to nothing.
    pub fn syntax_for(&self, tag: &str) -> Option<&SyntaxReference> {
        let tag = tag.trim().to_ascii_lowercase();
        if tag.is_empty() {
            return None;
        }
        let extension = LANGUAGE_ALIASES
            .iter()
            .find(|(_, names)| names.contains(&tag.as_str()))
            .map_or(tag.as_str(), |(ext, _)| ext);

        self.syntaxes
            .find_syntax_by_extension(extension)
            .or_else(|| self.syntaxes.find_syntax_by_token(&tag))
    }

    /// Split `code` into styled lines.
    ///
    /// Without a known syntax, every line is a single token in the theme's
    /// foreground color.
    pub fn highlight(&self, code: &str, tag: &str) -> Vec<CodeLine> {
        let fallback = self.foreground();
        let (Some(theme), Some(syntax)) = (self.theme.as_ref(), self.syntax_for(tag)) else {
            return code
                .lines()
                .map(|line| vec![plain_token(line, fallback)])
                .collect();
        };

        let mut state = HighlightLines::new(syntax, theme);
        LinesWithEndings::from(code)
            .map(|raw| match state.highlight_line(raw, &self.syntaxes) {
                Ok(ranges) => ranges
                    .into_iter()
                    .map(|(style, text)| (style, text.trim_end_matches(['\r', '\n'])))
                    .filter(|(_, text)| !text.is_empty())
                    .map(|(style, text)| CodeToken::from_style(style, text))
                    .collect(),
                Err(e) => {
                    warn!("Highlighting a {} line failed: {}", tag, e);
                    vec![plain_token(raw.trim_end_matches(['\r', '\n']), fallback)]
                }
            })
            .collect()
    }
}

fn plain_token(text: &str, color: Color32) -> CodeToken {
    CodeToken {
        text: text.to_owned(),
        color,
        bold: false,
        italic: false,
    }
}

fn to_color32(color: Color) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

static HIGHLIGHTER: OnceLock<CodeHighlighter> = OnceLock::new();

/// Shared highlighter, loaded on first use.
pub fn highlighter() -> &'static CodeHighlighter {
    HIGHLIGHTER.get_or_init(CodeHighlighter::load)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(line: &CodeLine) -> String {
        line.iter().map(|token| token.text.as_str()).collect()
    }

    #[test]
    fn test_bundled_theme_loads() {
        let h = highlighter();
        assert!(h.theme.is_some());
        assert!(!h.syntaxes.syntaxes().is_empty());
    }

    #[test]
    fn test_shell_block_keeps_text() {
        let lines = highlighter().highlight("git fetch origin\ngit rebase origin/main\n", "bash");
        assert_eq!(lines.len(), 2);
        assert_eq!(joined(&lines[0]), "git fetch origin");
        assert_eq!(joined(&lines[1]), "git rebase origin/main");
    }

    #[test]
    fn test_unknown_tag_is_single_token_per_line() {
        let lines = highlighter().highlight("<<<<<<< HEAD\n>>>>>>> topic", "no-such-lang");
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|line| line.len() == 1));
        assert_eq!(joined(&lines[1]), ">>>>>>> topic");
    }

    #[test]
    fn test_empty_tag_and_empty_code() {
        assert!(highlighter().syntax_for("").is_none());
        assert!(highlighter().syntax_for("   ").is_none());
        assert!(highlighter().highlight("", "bash").is_empty());
    }

    #[test]
    fn test_aliases_resolve_to_same_syntax() {
        let h = highlighter();
        let sh = h.syntax_for("sh").map(|s| s.name.clone());
        assert!(sh.is_some());
        assert_eq!(h.syntax_for("Bash").map(|s| s.name.clone()), sh);
        assert_eq!(h.syntax_for("console").map(|s| s.name.clone()), sh);
    }

    #[test]
    fn test_rich_text_keeps_token_text() {
        let token = CodeToken {
            text: "checkout".to_string(),
            color: Color32::LIGHT_BLUE,
            bold: true,
            italic: true,
        };
        assert_eq!(token.rich_text(12.0).text(), "checkout");
    }

    #[test]
    fn test_highlighter_is_shared() {
        assert!(std::ptr::eq(highlighter(), highlighter()));
    }
}
