//! Loading documentation sections from a directory of markdown files.
//!
//! Each `.md`, `.mdx` or `.markdown` file directly inside the directory
//! becomes one section. Front matter is stripped before the body reaches the
//! renderer.

use super::front_matter::split_front_matter;
use super::Section;
use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extensions treated as documentation.
const DOC_EXTENSIONS: &[&str] = &["md", "mdx", "markdown"];

/// A section plus the data needed to order it.
struct LoadedSection {
    order: Option<i64>,
    file_name: String,
    section: Section,
}

/// Load every documentation file in `dir`.
///
/// Sections are ordered by front matter `order` (files without one go last),
/// then by file name.
///
/// # Errors
///
/// - `Error::ContentLoad` if the directory or a file cannot be read
/// - `Error::FrontMatter` if a file's front matter is malformed
pub fn load_sections(dir: &Path) -> Result<Vec<Section>> {
    let mut loaded = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| walk_error(dir, e))?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_doc_file(path) {
            continue;
        }
        loaded.push(load_file(path)?);
    }

    loaded.sort_by(|a, b| {
        let a_key = (a.order.is_none(), a.order, &a.file_name);
        let b_key = (b.order.is_none(), b.order, &b.file_name);
        a_key.cmp(&b_key)
    });

    debug!("Found {} documentation file(s) in {}", loaded.len(), dir.display());
    Ok(loaded.into_iter().map(|l| l.section).collect())
}

fn load_file(path: &Path) -> Result<LoadedSection> {
    let raw = fs::read_to_string(path).map_err(|source| Error::ContentLoad {
        path: path.to_path_buf(),
        source,
    })?;

    let (meta, body) = split_front_matter(&raw).map_err(|message| Error::FrontMatter {
        path: path.to_path_buf(),
        message,
    })?;

    let id = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let title = meta.title.unwrap_or_else(|| title_from_id(&id));
    let file_name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    debug!("Loaded section '{}' from {}", id, path.display());
    Ok(LoadedSection {
        order: meta.order,
        file_name,
        section: Section::new(id, title, body.trim_end_matches('\n')),
    })
}

fn is_doc_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| DOC_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// `Remote-Operations` → `Remote Operations`
fn title_from_id(id: &str) -> String {
    id.replace(['-', '_'], " ")
}

fn walk_error(dir: &Path, err: walkdir::Error) -> Error {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(dir));
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "directory loop"));
    Error::ContentLoad { path, source }
}
