//! Front matter extraction for documentation files.
//!
//! A file may open with a YAML block fenced by `---` lines or a TOML block
//! fenced by `+++` lines. Only `title` and `order` are read; other keys are
//! ignored.

use serde::Deserialize;

/// Metadata read from a front matter block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    /// Sidebar title override
    pub title: Option<String>,
    /// Sort key; lower comes first
    pub order: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrontMatterFormat {
    Yaml,
    Toml,
}

impl FrontMatterFormat {
    fn from_delimiter(line: &str) -> Option<Self> {
        match line {
            "---" => Some(Self::Yaml),
            "+++" => Some(Self::Toml),
            _ => None,
        }
    }

    fn delimiter(self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }

    fn parse(self, block: &str) -> Result<FrontMatter, String> {
        if block.trim().is_empty() {
            return Ok(FrontMatter::default());
        }
        match self {
            Self::Yaml => serde_yaml::from_str(block).map_err(|e| e.to_string()),
            Self::Toml => toml::from_str(block).map_err(|e| e.to_string()),
        }
    }
}

/// Split a leading front matter block off `raw`.
///
/// Returns the parsed metadata and the remaining body. Text without a
/// complete block (no opening delimiter, or one that is never closed) is
/// returned whole with default metadata.
///
/// # Errors
///
/// Returns the parser's message when the block is not valid YAML/TOML or has
/// fields of the wrong type.
pub fn split_front_matter(raw: &str) -> Result<(FrontMatter, &str), String> {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let Some((first, rest)) = text.split_once('\n') else {
        return Ok((FrontMatter::default(), text));
    };
    let Some(format) = FrontMatterFormat::from_delimiter(first.trim_end()) else {
        return Ok((FrontMatter::default(), text));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == format.delimiter() {
            let meta = format.parse(&rest[..offset])?;
            return Ok((meta, &rest[offset + line.len()..]));
        }
        offset += line.len();
    }

    Ok((FrontMatter::default(), text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_front_matter() {
        let raw = "---\ntitle: Basic Setup\norder: 2\n---\n# Git Basic Setup\n";
        let (meta, body) = split_front_matter(raw).unwrap();
        assert_eq!(meta.title.as_deref(), Some("Basic Setup"));
        assert_eq!(meta.order, Some(2));
        assert_eq!(body, "# Git Basic Setup\n");
    }

    #[test]
    fn test_toml_front_matter() {
        let raw = "+++\ntitle = \"Jenkins CLI\"\norder = 14\n+++\nbody";
        let (meta, body) = split_front_matter(raw).unwrap();
        assert_eq!(meta.title.as_deref(), Some("Jenkins CLI"));
        assert_eq!(meta.order, Some(14));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_no_front_matter() {
        let raw = "# Title\ntext";
        let (meta, body) = split_front_matter(raw).unwrap();
        assert_eq!(meta, FrontMatter::default());
        assert_eq!(body, raw);
    }

    #[test]
    fn test_unclosed_block_is_body() {
        let raw = "---\ntitle: Oops\n# Title";
        let (meta, body) = split_front_matter(raw).unwrap();
        assert_eq!(meta, FrontMatter::default());
        assert_eq!(body, raw);
    }

    #[test]
    fn test_empty_block() {
        let (meta, body) = split_front_matter("---\n---\ncontent").unwrap();
        assert_eq!(meta, FrontMatter::default());
        assert_eq!(body, "content");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let raw = "---\ndescription: ignored\ntags: [git]\n---\n";
        let (meta, body) = split_front_matter(raw).unwrap();
        assert_eq!(meta, FrontMatter::default());
        assert_eq!(body, "");
    }

    #[test]
    fn test_wrong_type_is_error() {
        let raw = "---\norder: first\n---\nbody";
        assert!(split_front_matter(raw).is_err());
    }

    #[test]
    fn test_crlf_delimiters() {
        let raw = "---\r\ntitle: Windows\r\n---\r\nbody";
        let (meta, body) = split_front_matter(raw).unwrap();
        assert_eq!(meta.title.as_deref(), Some("Windows"));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_byte_order_mark_is_skipped() {
        let raw = "\u{feff}---\ntitle: Bom\n---\nbody";
        let (meta, _) = split_front_matter(raw).unwrap();
        assert_eq!(meta.title.as_deref(), Some("Bom"));
    }

    #[test]
    fn test_horizontal_rule_later_is_not_front_matter() {
        let raw = "# Title\n---\nmore";
        let (_, body) = split_front_matter(raw).unwrap();
        assert_eq!(body, raw);
    }
}
