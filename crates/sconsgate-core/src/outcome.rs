//! Aggregate build outcome and exit-code collapse.
//!
//! Each analysis stage returns its findings as a value; the orchestrator
//! merges them into one [`BuildOutcome`] instead of flipping a shared
//! mutable failure flag from multiple routines. The outcome is built once,
//! after the log is fully scanned, and never mutated afterwards.

use crate::allowlist::MalformedEntry;
use crate::classify::SentinelScan;
use crate::filter::UnexpectedWarning;
use serde::{Deserialize, Serialize};

/// Terminal classification of a build run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BuildStatus {
    /// Completion sentinel seen, no error sentinel, zero unexpected
    /// warnings, allowlist well-formed.
    Success,

    /// Error sentinel seen, or the tool never reached completion.
    FailedBuild,

    /// Build completed cleanly but at least one unexpected warning (or a
    /// malformed allowlist entry) was reported.
    FailedWarnings,
}

/// Everything the log scan and allowlist validation produced, merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildOutcome {
    /// `scons: done building targets.` was observed.
    pub completed_sentinel_seen: bool,

    /// The errors-occurred sentinel was observed.
    pub error_sentinel_seen: bool,

    /// Warning lines that matched no allowlist entry.
    pub unexpected_warnings: Vec<UnexpectedWarning>,

    /// Allowlist lines that failed the warning-marker check.
    pub malformed_entries: Vec<MalformedEntry>,
}

impl BuildOutcome {
    /// Merge the sentinel scan into a fresh outcome.
    pub fn from_scan(scan: SentinelScan) -> Self {
        Self {
            completed_sentinel_seen: scan.completed_seen,
            error_sentinel_seen: scan.error_seen,
            ..Self::default()
        }
    }

    /// Whether the build tool itself passed: completion sentinel seen and
    /// no error sentinel. Independent of warning content.
    pub fn build_passed(&self) -> bool {
        self.completed_sentinel_seen && !self.error_sentinel_seen
    }

    /// Collapse to a single terminal classification.
    pub fn status(&self) -> BuildStatus {
        if !self.build_passed() {
            BuildStatus::FailedBuild
        } else if self.unexpected_warnings.is_empty() && self.malformed_entries.is_empty() {
            BuildStatus::Success
        } else {
            BuildStatus::FailedWarnings
        }
    }

    /// Process exit code: zero only on full success.
    pub fn exit_code(&self) -> i32 {
        match self.status() {
            BuildStatus::Success => 0,
            BuildStatus::FailedBuild | BuildStatus::FailedWarnings => 1,
        }
    }
}
