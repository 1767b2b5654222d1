//! UI components for Git Scenarios
//!
//! Each panel draws itself and returns an output struct describing what the
//! user did; the app applies those actions after the frame is laid out.

mod document;
mod footer;
mod header;
mod settings;
mod sidebar;

pub use document::{DocumentOutput, DocumentPane, RenderedSection};
pub use footer::show_footer;
pub use header::{show_header, HeaderProps};
pub use settings::SettingsPanel;
pub use sidebar::Sidebar;
