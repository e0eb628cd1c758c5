//! Warning filtering against the allowlist.
//!
//! Matching is plain substring containment over [`normalize`]d text, not
//! structured (file, line, code, message) parsing. That is deliberate:
//! the allowlist format is defined in terms of fuzzy containment, and
//! upgrading to structured matching would change which warnings suppress.

use crate::allowlist::Allowlist;
use crate::normalize::normalize;
use serde::{Deserialize, Serialize};

/// Substrings that make a log line a warning candidate. Narrower than the
/// allowlist vocabulary: the filter only fires on full `": warning"` compiler
/// lines plus the macOS ranlib/libtool noise.
pub const CANDIDATE_MARKERS: [&str; 3] = [": warning", "ranlib: file:", "libtool: file:"];

/// A warning line that matched no allowlist entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnexpectedWarning {
    /// 0-based offset of the line in the build log.
    pub line_offset: usize,

    /// The warning line as emitted by the build tool.
    pub text: String,
}

/// Whether a log line qualifies as a warning candidate at all.
pub fn is_warning_candidate(line: &str) -> bool {
    CANDIDATE_MARKERS.iter().any(|m| line.contains(m))
}

/// Whether a candidate warning matches no allowlist entry.
///
/// The candidate and each entry are normalized; the candidate is expected
/// (suppressed) as soon as one normalized entry is a substring of the
/// normalized candidate. A blank entry never matches: the empty string is a
/// substring of everything and would silently suppress every warning.
pub fn is_unexpected(candidate: &str, allowlist: &Allowlist) -> bool {
    let candidate = normalize(candidate);
    for entry in allowlist.entries() {
        let entry = normalize(entry);
        if entry.is_empty() {
            continue;
        }
        if candidate.contains(&entry) {
            return false;
        }
    }
    true
}

/// Scan a full build log for warning candidates and collect every one that
/// matches no allowlist entry. Non-candidate lines are ignored here; the
/// status classifier still sees them.
pub fn scan_warnings(lines: &[String], allowlist: &Allowlist) -> Vec<UnexpectedWarning> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| is_warning_candidate(line.as_str()))
        .filter(|(_, line)| is_unexpected(line.as_str(), allowlist))
        .map(|(line_offset, line)| UnexpectedWarning {
            line_offset,
            text: line.trim_end().to_string(),
        })
        .collect()
}
