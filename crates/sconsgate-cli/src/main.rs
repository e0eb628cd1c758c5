//! sconsgate - warning-gating SCons build wrapper
//!
//! Runs SCons, mirrors its output to the console and a log file, then
//! classifies the log: the build fails on SCons' error sentinel, on a
//! missing completion sentinel, or on any compiler warning that is not
//! covered by the warning allowlist.
//!
//! ## Exit codes
//!
//! - `0` — build completed, no unexpected warnings
//! - `1` — build errors, no completion, unexpected warnings, or a
//!   malformed allowlist
//! - `2` — packaging prerequisite missing (Windows `ZIP_LOCATION`)

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};

use sconsgate_core::{
    classify, init_tracing, package_addon, package_command, read_log, scan_warnings, Allowlist,
    BuildCommand, BuildError, BuildOptions, BuildOutcome, BuildRunner, LogRecorder, Platform,
};

/// Exit code for a missing packaging prerequisite, distinct from ordinary
/// build failures.
const EXIT_MISSING_PREREQUISITE: i32 = 2;

/// Command-line token names, mapped onto the core token set.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TokenArg {
    /// Non-debug build
    Release,
    /// 64-bit target
    X64,
    /// Skip addon packaging
    Noaddon,
    /// Remove prior output and run a clean invocation
    Clean,
}

impl From<TokenArg> for sconsgate_core::BuildToken {
    fn from(token: TokenArg) -> Self {
        match token {
            TokenArg::Release => Self::Release,
            TokenArg::X64 => Self::X64,
            TokenArg::Noaddon => Self::Noaddon,
            TokenArg::Clean => Self::Clean,
        }
    }
}

#[derive(Parser)]
#[command(name = "sconsgate")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Warning-gating SCons build wrapper", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines and a JSON outcome summary
    #[arg(long, global = true)]
    json: bool,

    /// Path of the build log to record and classify
    #[arg(long, default_value = "sconsbuild.log")]
    log_file: PathBuf,

    /// Path of the warning allowlist file
    #[arg(long, default_value = "AllowedWarnings.txt")]
    allowlist: PathBuf,

    /// Build tokens, order-independent: release, x64, noaddon, clean
    #[arg(value_enum)]
    tokens: Vec<TokenArg>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    init_tracing(cli.json, level);

    let code = match cmd_build(&cli).await {
        Ok(code) => code,
        Err(err) => {
            if let Some(BuildError::MissingArchiver { .. }) =
                err.downcast_ref::<BuildError>()
            {
                eprintln!("{err:#}");
                EXIT_MISSING_PREREQUISITE
            } else {
                eprintln!("sconsgate: {err:#}");
                1
            }
        }
    };
    std::process::exit(code);
}

/// Full orchestration: flag translation, archiver precheck, build run,
/// classification, warning filtering, packaging. Returns the process exit
/// code.
async fn cmd_build(cli: &Cli) -> Result<i32> {
    let platform = Platform::current();
    let tokens: Vec<sconsgate_core::BuildToken> =
        cli.tokens.iter().map(|t| (*t).into()).collect();
    let options = BuildOptions::from_tokens(&tokens);
    info!(platform = platform.name(), ?options, "starting build run");

    // Packaging prerequisites are checked before any build is attempted:
    // a run that cannot package must not burn a full compile first.
    let zip_location = std::env::var_os("ZIP_LOCATION").map(PathBuf::from);
    let will_package = options.build_addon && !options.clean;
    if will_package && platform.requires_archiver_location() && zip_location.is_none() {
        return Err(BuildError::MissingArchiver {
            platform: platform.name(),
        }
        .into());
    }

    let scons_dir = std::env::var_os("SCONS_LOCATION")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(platform.scons_default_dir()));
    let scons_program = platform.scons_program(&scons_dir);

    if options.clean {
        // Ignore a missing directory; anything else is a real failure.
        match tokio::fs::remove_dir_all("out").await {
            Ok(()) => info!("removed prior output directory"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(err).context("Failed to remove output directory"),
        }
    }

    let command = BuildCommand::new(
        scons_program.to_string_lossy().to_string(),
        options.scons_args(),
    );
    let mut recorder = LogRecorder::create(&cli.log_file)
        .await
        .context("Failed to create build log")?;
    let child_code = BuildRunner::run(&command, &mut recorder)
        .await
        .context("Failed to run build tool")?;
    let log_path = recorder.finish().await.context("Failed to close build log")?;

    // A clean invocation bypasses classification and packaging entirely;
    // its exit code is the clean run's own.
    if options.clean {
        return Ok(if child_code == 0 { 0 } else { 1 });
    }

    let outcome = analyze_log(&log_path, &cli.allowlist).await?;
    report_outcome(&outcome, cli.json)?;

    if options.build_addon && outcome.build_passed() {
        info!(platform = platform.name(), "building addon package");
        let package = package_command(
            platform,
            zip_location.as_deref(),
            Path::new("."),
        )?;
        package_addon(&package)
            .await
            .context("Addon packaging failed")?;
    }

    Ok(outcome.exit_code())
}

/// Read the finished log back and merge sentinel scan, allowlist
/// validation, and warning filtering into one outcome. Every malformed
/// allowlist entry and every unexpected warning is reported; nothing stops
/// at the first defect.
async fn analyze_log(log_path: &Path, allowlist_path: &Path) -> Result<BuildOutcome> {
    let lines = read_log(log_path)
        .await
        .context("Failed to read build log back")?;
    let mut outcome = BuildOutcome::from_scan(classify(&lines));

    match Allowlist::load(allowlist_path) {
        Ok(allowlist) => {
            for entry in allowlist.malformed() {
                println!(
                    "ERROR: allowlist line {} is not a warning: {}",
                    entry.line_no, entry.content
                );
            }
            outcome.malformed_entries = allowlist.malformed().to_vec();

            let unexpected = scan_warnings(&lines, &allowlist);
            for warning in &unexpected {
                println!("{}", warning.text);
            }
            outcome.unexpected_warnings = unexpected;
        }
        Err(BuildError::AllowlistNotFound(path)) => {
            // The status classification is still authoritative without it.
            warn!(path = %path.display(), "allowlist file missing, skipping warning filter");
        }
        Err(err) => return Err(err).context("Failed to load allowlist"),
    }

    Ok(outcome)
}

/// Print the aggregate result, human-readable or as a JSON document.
fn report_outcome(outcome: &BuildOutcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    if outcome.error_sentinel_seen {
        println!("Build had errors. Build Failed");
    } else if !outcome.completed_sentinel_seen {
        println!("Fail because scons never ran to completion");
    }
    if !outcome.unexpected_warnings.is_empty() {
        println!(
            "{} unexpected warning(s) not covered by the allowlist",
            outcome.unexpected_warnings.len()
        );
    }
    Ok(())
}
