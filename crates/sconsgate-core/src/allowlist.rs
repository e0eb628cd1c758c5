//! Warning allowlist loading and validation.
//!
//! The allowlist file holds one acceptable-warning pattern per line. Blank
//! lines are ignored and lines starting with `#` are comments. Every other
//! line must itself look like a warning, otherwise an overly generic entry
//! (a single `d`, say) would suppress every warning containing that letter.

use crate::error::{BuildError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Substrings that mark a line as warning vocabulary. VC++ warnings contain
/// `": warning"`; on macOS the ar/libtool toolchain emits `ranlib: file:`
/// and `libtool: file:` lines instead.
pub const WARNING_MARKERS: [&str; 3] = [": warn", "ranlib: file:", "libtool: file:"];

/// An allowlist line that is neither a comment nor warning vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MalformedEntry {
    /// 1-based line number in the allowlist file.
    pub line_no: usize,

    /// The offending line, trimmed.
    pub content: String,
}

/// A loaded, immutable warning allowlist.
#[derive(Debug, Clone, Default)]
pub struct Allowlist {
    /// Non-blank, non-comment pattern lines, in file order.
    entries: Vec<String>,

    /// Lines that failed the warning-marker check.
    malformed: Vec<MalformedEntry>,
}

impl Allowlist {
    /// Load and validate an allowlist file.
    ///
    /// The file is read once; validation scans every line and records every
    /// malformed one rather than stopping at the first. Malformed lines are
    /// excluded from the usable entries.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(BuildError::AllowlistNotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::parse(&contents))
    }

    /// Parse allowlist file contents. Split out from [`Allowlist::load`] so
    /// tests can feed literal strings.
    pub fn parse(contents: &str) -> Self {
        let mut entries = Vec::new();
        let mut malformed = Vec::new();

        for (idx, raw) in contents.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('#') {
                continue;
            }
            if WARNING_MARKERS.iter().any(|m| line.contains(m)) {
                entries.push(line.to_string());
            } else {
                malformed.push(MalformedEntry {
                    line_no: idx + 1,
                    content: line.to_string(),
                });
            }
        }

        Self { entries, malformed }
    }

    /// Validated pattern lines, in file order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Lines rejected by the warning-marker check. Any entry here marks the
    /// whole run as failed.
    pub fn malformed(&self) -> &[MalformedEntry] {
        &self.malformed
    }

    /// Whether every non-blank, non-comment line passed validation.
    pub fn is_valid(&self) -> bool {
        self.malformed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_entries_are_kept() {
        let list = Allowlist::parse(": warning C4244 conversion\nranlib: file: libfoo.a\n");
        assert_eq!(list.entries().len(), 2);
        assert!(list.is_valid());
    }

    #[test]
    fn test_comments_and_blanks_skipped() {
        let list = Allowlist::parse("# known MSVC noise\n\n   \n: warning C4244\n");
        assert_eq!(list.entries().len(), 1);
        assert!(list.is_valid());
    }

    #[test]
    fn test_single_letter_entry_rejected() {
        let list = Allowlist::parse("d\n");
        assert!(!list.is_valid());
        assert_eq!(list.malformed().len(), 1);
        assert_eq!(list.malformed()[0].line_no, 1);
        assert_eq!(list.malformed()[0].content, "d");
        assert!(list.entries().is_empty());
    }

    #[test]
    fn test_all_malformed_lines_reported() {
        let list = Allowlist::parse("bogus one\n: warning ok\nbogus two\n");
        assert_eq!(list.malformed().len(), 2);
        assert_eq!(list.malformed()[0].line_no, 1);
        assert_eq!(list.malformed()[1].line_no, 3);
        assert_eq!(list.entries().len(), 1);
    }

    #[test]
    fn test_libtool_marker_accepted() {
        let list = Allowlist::parse("libtool: file: libsessioncontrol.a has no symbols\n");
        assert!(list.is_valid());
        assert_eq!(list.entries().len(), 1);
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = Allowlist::load(Path::new("/nonexistent/AllowedWarnings.txt")).unwrap_err();
        assert!(matches!(err, BuildError::AllowlistNotFound(_)));
    }
}
