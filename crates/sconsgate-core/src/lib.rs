//! sconsgate core - build log classification and warning gating
//!
//! Provides the engine behind the `sconsgate` wrapper:
//! - Runs SCons and records its combined output to a durable log
//! - Classifies the log against completion/error sentinels
//! - Filters known-acceptable warnings via a validated allowlist
//! - Packages the addon artifact through the platform archiver

pub mod allowlist;
pub mod classify;
pub mod error;
pub mod filter;
pub mod invocation;
pub mod normalize;
pub mod outcome;
pub mod package;
pub mod platform;
pub mod recorder;
pub mod runner;
pub mod telemetry;

// Re-export key types
pub use allowlist::{Allowlist, MalformedEntry};
pub use classify::{classify, SentinelScan, COMPLETED_SENTINEL, ERROR_SENTINEL};
pub use error::{BuildError, Result};
pub use filter::{is_unexpected, is_warning_candidate, scan_warnings, UnexpectedWarning};
pub use invocation::{BuildOptions, BuildToken};
pub use normalize::normalize;
pub use outcome::{BuildOutcome, BuildStatus};
pub use package::{package_addon, package_command, PackageCommand};
pub use platform::Platform;
pub use recorder::{read_log, LogRecorder};
pub use runner::{BuildCommand, BuildRunner};
pub use telemetry::init_tracing;
