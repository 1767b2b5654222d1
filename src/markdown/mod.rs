//! Markdown-subset rendering for documentation sections
//!
//! This module turns the raw text of a section into typed display nodes.
//! The supported subset is deliberately small:
//!
//! - `#`, `##` and `###` headings
//! - fenced code blocks with an optional language tag
//! - `**bold**` and `` `inline code` `` spans
//! - `- ` / `* ` bullets and `N. ` numbered items
//! - blank-line separated paragraphs
//!
//! Code block highlighting for the egui view lives in [`syntax`].
//!
//! # Example
//! ```ignore
//! use crate::markdown::{render, RenderNode};
//!
//! let nodes = render("# Hello\n\nThis is **bold** text.");
//! assert!(matches!(nodes[0], RenderNode::Heading { .. }));
//! ```

mod inline;
mod render;
pub mod syntax;

pub use inline::InlineSpan;
pub use render::{render, render_with_options, FencePolicy, HeadingLevel, RenderNode, RenderOptions};
