//! Sentinel-based build status classification.
//!
//! SCons prints a fixed terminal line whether or not the build worked; the
//! classifier looks for those lines rather than trusting exit codes, which
//! a `-k` (keep-going) build does not surface per target.

use serde::{Deserialize, Serialize};

/// Terminal line SCons prints after a clean build.
pub const COMPLETED_SENTINEL: &str = "scons: done building targets.";

/// Terminal line SCons prints after a build that had errors. Note this
/// contains [`COMPLETED_SENTINEL`] as a substring, so an error log sets
/// both flags; the error flag wins during status collapse.
pub const ERROR_SENTINEL: &str =
    "scons: done building targets (errors occurred during build).";

/// Which sentinels were observed in a full pass over the log.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SentinelScan {
    /// `scons: done building targets.` was seen.
    pub completed_seen: bool,

    /// The errors-occurred variant was seen.
    pub error_seen: bool,
}

/// Scan every log line once, in order, for the terminal sentinels.
///
/// A log with neither sentinel means the tool never reached completion
/// (crash, hang, truncated log) and is classified as a failed build.
pub fn classify(lines: &[String]) -> SentinelScan {
    let mut scan = SentinelScan::default();
    for line in lines {
        if line.contains(ERROR_SENTINEL) {
            scan.error_seen = true;
        }
        if line.contains(COMPLETED_SENTINEL) {
            scan.completed_seen = true;
        }
    }
    scan
}
