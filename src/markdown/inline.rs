//! Inline span scanning for bold (`**`) and inline code (`` ` ``) markers.
//!
//! Spans are resolved left to right without nesting: whichever marker starts
//! first in the remaining text is handled next.

/// Bold marker.
pub const BOLD_MARKER: &str = "**";

/// Inline code marker.
pub const CODE_MARKER: &str = "`";

/// A typed fragment of a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineSpan {
    PlainText(String),
    Bold(String),
    InlineCode(String),
}

impl InlineSpan {
    /// The text carried by this span, without markers.
    pub fn text(&self) -> &str {
        match self {
            InlineSpan::PlainText(text) | InlineSpan::Bold(text) | InlineSpan::InlineCode(text) => {
                text
            }
        }
    }
}

/// Whether a line carries any inline marker and must be scanned.
pub fn has_inline_markers(line: &str) -> bool {
    line.contains(BOLD_MARKER) || line.contains(CODE_MARKER)
}

/// Split a line into inline spans.
///
/// An opening marker without a closing partner turns the rest of the line
/// into plain text; the marker itself is not reproduced.
pub fn parse_inline(line: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut rest = line;

    while !rest.is_empty() {
        let bold_at = rest.find(BOLD_MARKER);
        let code_at = rest.find(CODE_MARKER);

        let (start, marker, make): (usize, &str, fn(String) -> InlineSpan) =
            match (bold_at, code_at) {
                (None, None) => {
                    spans.push(InlineSpan::PlainText(rest.to_string()));
                    break;
                }
                (Some(b), Some(c)) if b < c => (b, BOLD_MARKER, InlineSpan::Bold),
                (Some(b), None) => (b, BOLD_MARKER, InlineSpan::Bold),
                (_, Some(c)) => (c, CODE_MARKER, InlineSpan::InlineCode),
            };

        if start > 0 {
            spans.push(InlineSpan::PlainText(rest[..start].to_string()));
        }

        let inner = &rest[start + marker.len()..];
        match inner.find(marker) {
            Some(end) => {
                spans.push(make(inner[..end].to_string()));
                rest = &inner[end + marker.len()..];
            }
            None => {
                if !inner.is_empty() {
                    spans.push(InlineSpan::PlainText(inner.to_string()));
                }
                break;
            }
        }
    }

    spans
}
