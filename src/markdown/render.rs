//! Line-oriented renderer for the documentation markdown subset.
//!
//! Each input line maps to at most one [`RenderNode`]. The only state carried
//! between lines is whether a fenced code block is open, its language tag and
//! the lines collected so far. Nothing in here can fail: every line is
//! classifiable.

use std::sync::OnceLock;

use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::inline::{has_inline_markers, parse_inline, InlineSpan};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Opens and closes a fenced code block.
pub const FENCE_MARKER: &str = "```";

/// ASCII-digit list prefix such as `12.` plus any whitespace after it.
static ORDERED_PREFIX: OnceLock<Regex> = OnceLock::new();

fn ordered_prefix() -> &'static Regex {
    ORDERED_PREFIX.get_or_init(|| Regex::new(r"^[0-9]+\.\s*").expect("valid list prefix pattern"))
}

// ─────────────────────────────────────────────────────────────────────────────
// Public Types
// ─────────────────────────────────────────────────────────────────────────────

/// Heading level. Only the first three levels are recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H1 = 1,
    H2 = 2,
    H3 = 3,
}

impl HeadingLevel {
    /// Prefixes checked longest first so `## x` never reads as level one.
    const PREFIXES: [(&'static str, HeadingLevel); 3] = [
        ("### ", HeadingLevel::H3),
        ("## ", HeadingLevel::H2),
        ("# ", HeadingLevel::H1),
    ];

    /// Numeric level (1-3).
    pub fn level(self) -> u8 {
        self as u8
    }
}

/// One display instruction produced from a line (or a fenced block).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderNode {
    Heading { level: HeadingLevel, text: String },
    CodeBlock { language: String, lines: Vec<String> },
    ListItem { ordered: bool, text: String },
    Paragraph { spans: Vec<InlineSpan> },
    Blank,
}

impl RenderNode {
    /// Block content as one string, lines joined with `\n`.
    ///
    /// Returns `None` for anything that is not a code block.
    pub fn code(&self) -> Option<String> {
        match self {
            RenderNode::CodeBlock { lines, .. } => Some(lines.join("\n")),
            _ => None,
        }
    }
}

/// What to do with a fence that is still open when the text ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FencePolicy {
    /// Discard the collected lines; no code block is emitted.
    #[default]
    Drop,
    /// Emit the collected lines as a final code block.
    Flush,
}

impl FencePolicy {
    /// Get a display label for the policy.
    pub fn label(&self) -> &'static str {
        match self {
            FencePolicy::Drop => "Drop",
            FencePolicy::Flush => "Flush",
        }
    }
}

/// Renderer options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub unterminated_fence: FencePolicy,
}

// ─────────────────────────────────────────────────────────────────────────────
// Render State
// ─────────────────────────────────────────────────────────────────────────────

/// Per-call state. Never outlives one `render` invocation.
#[derive(Debug, Default)]
struct RenderState {
    fence: Option<OpenFence>,
}

#[derive(Debug)]
struct OpenFence {
    language: String,
    lines: Vec<String>,
}

impl OpenFence {
    fn into_node(self) -> RenderNode {
        RenderNode::CodeBlock {
            language: self.language,
            lines: self.lines,
        }
    }
}

impl RenderState {
    /// Consume one line, returning the node it produces, if any.
    fn feed(&mut self, line: &str) -> Option<RenderNode> {
        if let Some(after) = line.trim_start().strip_prefix(FENCE_MARKER) {
            return match self.fence.take() {
                Some(open) => Some(open.into_node()),
                None => {
                    self.fence = Some(OpenFence {
                        language: after.trim().to_string(),
                        lines: Vec::new(),
                    });
                    None
                }
            };
        }

        if let Some(open) = self.fence.as_mut() {
            open.lines.push(line.to_string());
            return None;
        }

        Some(classify(line))
    }

    fn finish(self, policy: FencePolicy) -> Option<RenderNode> {
        let open = self.fence?;
        debug!(
            "Text ended inside a '{}' fence with {} line(s); policy {:?}",
            open.language,
            open.lines.len(),
            policy
        );
        match policy {
            FencePolicy::Drop => None,
            FencePolicy::Flush => Some(open.into_node()),
        }
    }
}

/// Classify a line outside any fence.
fn classify(line: &str) -> RenderNode {
    for (prefix, level) in HeadingLevel::PREFIXES {
        if let Some(text) = line.strip_prefix(prefix) {
            return RenderNode::Heading {
                level,
                text: text.to_string(),
            };
        }
    }

    if has_inline_markers(line) {
        return RenderNode::Paragraph {
            spans: parse_inline(line),
        };
    }

    let trimmed = line.trim();

    if let Some(text) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
    {
        return RenderNode::ListItem {
            ordered: false,
            text: text.to_string(),
        };
    }

    if let Some(prefix) = ordered_prefix().find(trimmed) {
        return RenderNode::ListItem {
            ordered: true,
            text: trimmed[prefix.end()..].to_string(),
        };
    }

    if trimmed.is_empty() {
        return RenderNode::Blank;
    }

    RenderNode::Paragraph {
        spans: vec![InlineSpan::PlainText(line.to_string())],
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Render text with default options (unterminated fences are dropped).
///
/// # Example
/// ```ignore
/// let nodes = render("# Title\nSome **bold** text.");
/// assert_eq!(nodes.len(), 2);
/// ```
#[allow(dead_code)]
pub fn render(text: &str) -> Vec<RenderNode> {
    render_with_options(text, &RenderOptions::default())
}

/// Render text into display nodes.
///
/// Lines are split on `\n`; a trailing `\r` is ignored so CRLF text renders
/// the same as LF text.
pub fn render_with_options(text: &str, options: &RenderOptions) -> Vec<RenderNode> {
    let mut state = RenderState::default();
    let mut nodes = Vec::new();

    for raw in text.split('\n') {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if let Some(node) = state.feed(line) {
            nodes.push(node);
        }
    }

    nodes.extend(state.finish(options.unterminated_fence));
    nodes
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(s: &str) -> InlineSpan {
        InlineSpan::PlainText(s.to_string())
    }

    fn paragraph(text: &str) -> RenderNode {
        RenderNode::Paragraph {
            spans: vec![plain(text)],
        }
    }

    fn heading(level: HeadingLevel, text: &str) -> RenderNode {
        RenderNode::Heading {
            level,
            text: text.to_string(),
        }
    }

    fn bullet(text: &str) -> RenderNode {
        RenderNode::ListItem {
            ordered: false,
            text: text.to_string(),
        }
    }

    fn numbered(text: &str) -> RenderNode {
        RenderNode::ListItem {
            ordered: true,
            text: text.to_string(),
        }
    }

    fn code_block(language: &str, lines: &[&str]) -> RenderNode {
        RenderNode::CodeBlock {
            language: language.to_string(),
            lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Headings
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_heading_levels() {
        assert_eq!(render("# One"), vec![heading(HeadingLevel::H1, "One")]);
        assert_eq!(render("## Two"), vec![heading(HeadingLevel::H2, "Two")]);
        assert_eq!(
            render("### Level Three"),
            vec![heading(HeadingLevel::H3, "Level Three")]
        );
    }

    #[test]
    fn test_deeper_headings_are_not_promoted() {
        assert_eq!(render("#### Four"), vec![paragraph("#### Four")]);
    }

    #[test]
    fn test_hash_without_space_is_paragraph() {
        assert_eq!(render("#hashtag"), vec![paragraph("#hashtag")]);
    }

    #[test]
    fn test_heading_keeps_inline_markers_verbatim() {
        assert_eq!(
            render("## Use `git stash`"),
            vec![heading(HeadingLevel::H2, "Use `git stash`")]
        );
    }

    #[test]
    fn test_heading_level_numbers() {
        assert_eq!(HeadingLevel::H1.level(), 1);
        assert_eq!(HeadingLevel::H3.level(), 3);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Fenced Code Blocks
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_fence_takes_priority_over_heading() {
        let nodes = render("``` js\n# not a heading\n```");
        assert_eq!(nodes, vec![code_block("js", &["# not a heading"])]);
        assert!(!nodes
            .iter()
            .any(|n| matches!(n, RenderNode::Heading { .. })));
    }

    #[test]
    fn test_fence_content_is_verbatim() {
        let text = "```bash\n- not a list\n**not bold**\n\n  indented\n```";
        assert_eq!(
            render(text),
            vec![code_block(
                "bash",
                &["- not a list", "**not bold**", "", "  indented"]
            )]
        );
    }

    #[test]
    fn test_fence_without_language() {
        assert_eq!(
            render("```\n<<<<<<< HEAD\n```"),
            vec![code_block("", &["<<<<<<< HEAD"])]
        );
    }

    #[test]
    fn test_indented_fence_marker_toggles() {
        assert_eq!(
            render("  ```sh\nls\n  ```"),
            vec![code_block("sh", &["ls"])]
        );
    }

    #[test]
    fn test_closing_fence_with_trailing_text_still_closes() {
        assert_eq!(
            render("```bash\necho hi\n```bash\nafter"),
            vec![code_block("bash", &["echo hi"]), paragraph("after")]
        );
    }

    #[test]
    fn test_code_joins_lines() {
        let node = code_block("bash", &["git add .", "git commit"]);
        assert_eq!(node.code().as_deref(), Some("git add .\ngit commit"));
        assert_eq!(RenderNode::Blank.code(), None);
    }

    #[test]
    fn test_empty_fence() {
        assert_eq!(render("```\n```"), vec![code_block("", &[])]);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Unterminated Fence Policy
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_unterminated_fence_dropped_by_default() {
        let nodes = render("intro\n```bash\ngit push\ngit pull");
        assert_eq!(nodes, vec![paragraph("intro")]);
    }

    #[test]
    fn test_unterminated_fence_flushed_when_requested() {
        let options = RenderOptions {
            unterminated_fence: FencePolicy::Flush,
        };
        let nodes = render_with_options("intro\n```bash\ngit push\ngit pull", &options);
        assert_eq!(
            nodes,
            vec![
                paragraph("intro"),
                code_block("bash", &["git push", "git pull"])
            ]
        );
    }

    #[test]
    fn test_flush_policy_leaves_closed_fences_alone() {
        let options = RenderOptions {
            unterminated_fence: FencePolicy::Flush,
        };
        assert_eq!(
            render_with_options("```\nx\n```", &options),
            render("```\nx\n```")
        );
    }

    #[test]
    fn test_fence_policy_serialization() {
        assert_eq!(serde_json::to_string(&FencePolicy::Drop).unwrap(), "\"drop\"");
        assert_eq!(
            serde_json::from_str::<FencePolicy>("\"flush\"").unwrap(),
            FencePolicy::Flush
        );
        assert_eq!(FencePolicy::default(), FencePolicy::Drop);
        assert_eq!(FencePolicy::Flush.label(), "Flush");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Inline Paragraphs
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_bold_and_code_paragraph() {
        let nodes = render("Use **bold** and `code` here");
        assert_eq!(
            nodes,
            vec![RenderNode::Paragraph {
                spans: vec![
                    plain("Use "),
                    InlineSpan::Bold("bold".to_string()),
                    plain(" and "),
                    InlineSpan::InlineCode("code".to_string()),
                    plain(" here"),
                ]
            }]
        );
    }

    #[test]
    fn test_unterminated_bold_paragraph() {
        assert_eq!(
            render("Half **open bold"),
            vec![RenderNode::Paragraph {
                spans: vec![plain("Half "), plain("open bold")]
            }]
        );
    }

    #[test]
    fn test_inline_markers_win_over_list_prefix() {
        let nodes = render("- **Common Scenarios** - Daily Git operations");
        assert_eq!(
            nodes,
            vec![RenderNode::Paragraph {
                spans: vec![
                    plain("- "),
                    InlineSpan::Bold("Common Scenarios".to_string()),
                    plain(" - Daily Git operations"),
                ]
            }]
        );
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lists
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_list_extraction() {
        assert_eq!(render("- First item"), vec![bullet("First item")]);
        assert_eq!(render("* Star item"), vec![bullet("Star item")]);
        assert_eq!(render("2. Second item"), vec![numbered("Second item")]);
    }

    #[test]
    fn test_indented_list_items_are_trimmed() {
        assert_eq!(render("   - nested look"), vec![bullet("nested look")]);
        assert_eq!(render("  10.  Tenth"), vec![numbered("Tenth")]);
    }

    #[test]
    fn test_numeric_prefix_without_space() {
        assert_eq!(render("3.Third"), vec![numbered("Third")]);
    }

    #[test]
    fn test_non_ascii_digits_are_not_list_numbers() {
        assert_eq!(render("٣. three"), vec![paragraph("٣. three")]);
        assert_eq!(render("１. one"), vec![paragraph("１. one")]);
    }

    #[test]
    fn test_dash_without_space_is_paragraph() {
        assert_eq!(render("-flag"), vec![paragraph("-flag")]);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Paragraphs and Blank Lines
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_blank_line() {
        let nodes = render("first\n\nsecond");
        assert_eq!(
            nodes,
            vec![paragraph("first"), RenderNode::Blank, paragraph("second")]
        );
    }

    #[test]
    fn test_empty_input_is_single_blank() {
        assert_eq!(render(""), vec![RenderNode::Blank]);
    }

    #[test]
    fn test_whitespace_only_line_is_blank() {
        assert_eq!(render("   \t"), vec![RenderNode::Blank]);
    }

    #[test]
    fn test_plain_paragraph_keeps_leading_whitespace() {
        assert_eq!(render("  indented text"), vec![paragraph("  indented text")]);
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(
            render("# Title\r\n```sh\r\nls\r\n```\r\n"),
            vec![
                heading(HeadingLevel::H1, "Title"),
                code_block("sh", &["ls"]),
                RenderNode::Blank
            ]
        );
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Whole Documents
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_end_to_end_scenario() {
        let text = "# Title\nSome **bold** text.\n\n- item one";
        assert_eq!(
            render(text),
            vec![
                heading(HeadingLevel::H1, "Title"),
                RenderNode::Paragraph {
                    spans: vec![
                        plain("Some "),
                        InlineSpan::Bold("bold".to_string()),
                        plain(" text."),
                    ]
                },
                RenderNode::Blank,
                bullet("item one"),
            ]
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let text = "## Setup\n```bash\ngit init\n```\n1. **Fork** it\n- done\n\n```\nopen";
        assert_eq!(render(text), render(text));
    }

    #[test]
    fn test_fence_lines_emit_nothing() {
        let nodes = render("a\n```\nb\n```\nc");
        assert_eq!(nodes.len(), 3);
    }
}
