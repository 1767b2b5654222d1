//! Error type shared by the content store, configuration and clipboard.
//!
//! Rendering never fails; everything that touches the filesystem or the OS
//! reports through [`Error`]. Startup paths prefer [`ResultExt::unwrap_or_log`]
//! so a bad file degrades to defaults instead of aborting.

use log::warn;
use std::fmt;
use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// A content directory or section file could not be read
    ContentLoad { path: PathBuf, source: io::Error },
    /// A section's front matter block is malformed
    FrontMatter { path: PathBuf, message: String },
    SectionNotFound(String),
    /// Two sections claim the same id
    DuplicateSection(String),

    /// The platform has no config directory (e.g. `HOME` unset)
    ConfigDirNotFound,
    ConfigLoad { path: PathBuf, source: io::Error },
    ConfigParse { path: PathBuf, source: serde_json::Error },
    ConfigSave { path: PathBuf, source: io::Error },

    Clipboard(arboard::Error),
}

impl From<arboard::Error> for Error {
    fn from(err: arboard::Error) -> Self {
        Error::Clipboard(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ContentLoad { path, source } => {
                write!(f, "could not read content at {}: {}", path.display(), source)
            }
            Error::FrontMatter { path, message } => {
                write!(f, "bad front matter in {}: {}", path.display(), message)
            }
            Error::SectionNotFound(id) => write!(f, "no section with id `{}`", id),
            Error::DuplicateSection(id) => write!(f, "section id `{}` is used twice", id),
            Error::ConfigDirNotFound => f.write_str("no configuration directory on this system"),
            Error::ConfigLoad { path, source } => {
                write!(f, "could not read settings from {}: {}", path.display(), source)
            }
            Error::ConfigParse { path, source } => {
                write!(f, "settings file {} is not valid: {}", path.display(), source)
            }
            Error::ConfigSave { path, source } => {
                write!(f, "could not write settings to {}: {}", path.display(), source)
            }
            Error::Clipboard(err) => write!(f, "clipboard unavailable: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ContentLoad { source, .. }
            | Error::ConfigLoad { source, .. }
            | Error::ConfigSave { source, .. } => Some(source),
            Error::ConfigParse { source, .. } => Some(source),
            Error::Clipboard(err) => Some(err),
            Error::FrontMatter { .. }
            | Error::SectionNotFound(_)
            | Error::DuplicateSection(_)
            | Error::ConfigDirNotFound => None,
        }
    }
}

/// Graceful degradation for results whose failure is not fatal.
pub trait ResultExt<T> {
    /// Return the value, or log `context` with the error and fall back to
    /// `T::default()`.
    fn unwrap_or_log(self, context: &str) -> T
    where
        T: Default;
}

impl<T> ResultExt<T> for Result<T> {
    fn unwrap_or_log(self, context: &str) -> T
    where
        T: Default,
    {
        self.unwrap_or_else(|err| {
            warn!("{}: {}; using defaults", context, err);
            T::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn missing_file() -> io::Error {
        io::Error::new(io::ErrorKind::NotFound, "gone")
    }

    #[test]
    fn test_content_load_names_path() {
        let err = Error::ContentLoad {
            path: PathBuf::from("/docs/Branching.mdx"),
            source: missing_file(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Branching.mdx"));
        assert!(msg.ends_with("gone"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_front_matter_message() {
        let err = Error::FrontMatter {
            path: PathBuf::from("intro.md"),
            message: "expected a mapping".to_string(),
        };
        assert_eq!(err.to_string(), "bad front matter in intro.md: expected a mapping");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_section_errors() {
        assert_eq!(
            Error::SectionNotFound("rebasing".into()).to_string(),
            "no section with id `rebasing`"
        );
        assert!(Error::DuplicateSection("merging".into()).source().is_none());
    }

    #[test]
    fn test_config_parse_keeps_json_error() {
        let source = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err = Error::ConfigParse {
            path: PathBuf::from("config.json"),
            source,
        };
        assert!(err.to_string().starts_with("settings file config.json is not valid"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_unwrap_or_log() {
        let ok: Result<u32> = Ok(7);
        assert_eq!(ok.unwrap_or_log("ok"), 7);

        let failed: Result<Vec<u8>> = Err(Error::ConfigDirNotFound);
        assert!(failed.unwrap_or_log("failed").is_empty());
    }
}
