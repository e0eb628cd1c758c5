//! Warning text canonicalization.
//!
//! Different parts of the build emit paths with different separators and
//! casing (`Boost\Strings` vs `boost/strings`), so all comparisons between
//! log lines and allowlist entries go through [`normalize`] first.

/// Canonicalize a line of build output or an allowlist entry.
///
/// Steps, in order: strip leading/trailing whitespace, replace every `\`
/// with `/`, fold to lower case. Pure and total; idempotent.
pub fn normalize(text: &str) -> String {
    text.trim().replace('\\', "/").to_lowercase()
}
