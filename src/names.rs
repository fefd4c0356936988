//! Book display names loaded from an `ID=Name` text file.
//!
//! ```text
//! GEN=Genesis
//! EXO=Exodus
//! 1SA=1 Samuel
//! ```
//!
//! Lines are split on the first `=`. The name is trimmed, and so is the
//! identifier, so ` GEN = Genesis` sets the name for `GEN`. Blank lines are
//! skipped and later lines replace earlier ones with the same key.
//!
//! The file must be UTF-8; a line that is not is reported as a format error.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::canon;
use crate::error::{Error, Result};
use crate::osis::strip_bom;

/// Mapping from canonical book identifier to display name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookNames {
    names: HashMap<String, String>,
}

impl BookNames {
    /// An empty overlay: every book gets an empty display name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the overlay from a UTF-8 text file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
        let bytes = strip_bom(&bytes);
        let text = std::str::from_utf8(bytes).map_err(|e| {
            let (line, content) = invalid_utf8_line(bytes, e.valid_up_to());
            Error::Format {
                path: path.to_path_buf(),
                line,
                content,
            }
        })?;

        Self::parse(text).map_err(|(line, content)| Error::Format {
            path: path.to_path_buf(),
            line,
            content,
        })
    }

    /// Load from `path` if given, otherwise return an empty overlay.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::new()),
        }
    }

    /// Parse overlay text.
    ///
    /// On failure returns the 1-based line number and the offending line.
    pub fn parse(text: &str) -> std::result::Result<Self, (usize, String)> {
        let mut names = HashMap::new();

        for (i, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let Some((id, name)) = line.split_once('=') else {
                return Err((i + 1, line.to_string()));
            };
            let id = id.trim();

            if !canon::is_known(id) {
                debug!(line = i + 1, id, "book name for unknown identifier");
            }
            names.insert(id.to_string(), name.trim().to_string());
        }

        Ok(Self { names })
    }

    /// Display name for `id`, if one is set and non-empty.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.names
            .get(id)
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }

    /// Display name for `id`, or `""` when none is set.
    pub fn display_name(&self, id: &str) -> &str {
        self.get(id).unwrap_or("")
    }

    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.names.insert(id.into(), name.into());
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// 1-based line number and lossy text of the line containing byte `offset`.
fn invalid_utf8_line(bytes: &[u8], offset: usize) -> (usize, String) {
    let start = bytes[..offset]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    let end = bytes[offset..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |i| offset + i);
    let line = bytes[..start].iter().filter(|&&b| b == b'\n').count() + 1;
    let content = String::from_utf8_lossy(&bytes[start..end]);
    (line, content.trim_end_matches('\r').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_basic() {
        let names = BookNames::parse("GEN=Genesis\nEXO=Exodus\n").unwrap();
        assert_eq!(names.len(), 2);
        assert_eq!(names.get("GEN"), Some("Genesis"));
        assert_eq!(names.get("EXO"), Some("Exodus"));
        assert_eq!(names.get("LEV"), None);
    }

    #[test]
    fn test_parse_trims_and_skips_blank_lines() {
        let names = BookNames::parse("\n  \nGEN =  1. Mooseksen kirja \r\n\n").unwrap();
        assert_eq!(names.get("GEN"), Some("1. Mooseksen kirja"));
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn test_parse_trims_identifier() {
        let names = BookNames::parse(" GEN=Genesis\n\tEXO\t=Exodus").unwrap();
        assert_eq!(names.get("GEN"), Some("Genesis"));
        assert_eq!(names.get("EXO"), Some("Exodus"));
        assert_eq!(names.get(" GEN"), None);
    }

    #[test]
    fn test_invalid_utf8_line() {
        let bytes = b"GEN=Genesis\r\nEXO=Ex\xffodus\nLEV=Leviticus\n";
        let offset = std::str::from_utf8(bytes).unwrap_err().valid_up_to();
        assert_eq!(invalid_utf8_line(bytes, offset), (2, "EXO=Ex\u{fffd}odus".to_string()));
    }

    #[test]
    fn test_parse_splits_on_first_equals() {
        let names = BookNames::parse("REV=Revelation = Apocalypse").unwrap();
        assert_eq!(names.get("REV"), Some("Revelation = Apocalypse"));
    }

    #[test]
    fn test_parse_last_entry_wins() {
        let names = BookNames::parse("GEN=First\nGEN=Second").unwrap();
        assert_eq!(names.get("GEN"), Some("Second"));
    }

    #[test]
    fn test_parse_missing_separator() {
        let err = BookNames::parse("GEN=Genesis\nExodus\n").unwrap_err();
        assert_eq!(err, (2, "Exodus".to_string()));
    }

    #[test]
    fn test_unknown_ids_are_kept() {
        let names = BookNames::parse("TOB=Tobit").unwrap();
        assert_eq!(names.get("TOB"), Some("Tobit"));
    }

    #[test]
    fn test_empty_name_is_absent() {
        let names = BookNames::parse("GEN=   ").unwrap();
        assert_eq!(names.len(), 1);
        assert_eq!(names.get("GEN"), None);
        assert_eq!(names.display_name("GEN"), "");
    }

    #[test]
    fn test_non_ascii_names() {
        let names = BookNames::parse("PSA=Псалтирь\nJHN=יוחנן").unwrap();
        assert_eq!(names.display_name("PSA"), "Псалтирь");
        assert_eq!(names.display_name("JHN"), "יוחנן");
    }

    proptest! {
        #[test]
        fn prop_name_survives_parse(
            id in "[0-9A-Z]{3}",
            name in "[^=\\r\\n]*[^=\\s][^=\\r\\n]*",
        ) {
            let text = format!("{id}={name}\n");
            let names = BookNames::parse(&text).unwrap();
            prop_assert_eq!(names.get(&id), Some(name.trim()));
        }
    }
}
