//! System clipboard access
//!
//! Wraps `arboard` so the rest of the app only sees the crate `Error` type.

use crate::error::Result;
use arboard::Clipboard;
use log::debug;

/// Put plain text on the system clipboard.
///
/// # Errors
///
/// Returns `Error::Clipboard` if the clipboard cannot be opened or written.
pub fn copy_text(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text.to_owned())?;
    debug!("Copied {} byte(s) to clipboard", text.len());
    Ok(())
}
