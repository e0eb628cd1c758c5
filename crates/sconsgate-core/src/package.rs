//! Addon artifact packaging via an external archiver.
//!
//! The addon is a fixed manifest of files zipped from inside the addon
//! directory: chrome manifest, installer descriptor, content directory,
//! the platform shared library, and the XPCOM typelib. Windows uses 7-Zip
//! from `ZIP_LOCATION`; other platforms use `zip` from PATH.

use crate::error::{BuildError, Result};
use crate::platform::Platform;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::info;

/// Directory the archive is assembled in, relative to the working dir.
pub const ADDON_DIR: &str = "ikran";

/// Output archive file name.
pub const ADDON_OUTPUT: &str = "ikran-0.2-dev.xpi";

/// Archive members besides the shared library, in invocation order.
const ADDON_MANIFEST: [&str; 4] = ["chrome.manifest", "install.rdf", "content/", "ICallControl.xpt"];

/// A resolved archiver invocation.
#[derive(Debug, Clone)]
pub struct PackageCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

/// Build the platform-appropriate archiver command line.
///
/// `zip_location` is the `ZIP_LOCATION` override; on Windows its absence is
/// the fatal missing-prerequisite error, elsewhere it is ignored.
pub fn package_command(
    platform: Platform,
    zip_location: Option<&Path>,
    working_dir: &Path,
) -> Result<PackageCommand> {
    let mut members: Vec<String> = vec![ADDON_OUTPUT.to_string()];
    members.extend(ADDON_MANIFEST[..3].iter().map(|s| s.to_string()));
    members.push(platform.shared_library().to_string());
    members.push(ADDON_MANIFEST[3].to_string());

    let command = match platform {
        Platform::Windows => {
            let zip_dir = zip_location.ok_or(BuildError::MissingArchiver {
                platform: platform.name(),
            })?;
            let mut args = vec!["a".to_string()];
            args.extend(members);
            PackageCommand {
                program: zip_dir.join("7z.exe"),
                args,
                working_dir: working_dir.join(ADDON_DIR),
            }
        }
        Platform::MacOs | Platform::Linux => {
            let mut args = vec!["-9r".to_string()];
            args.extend(members);
            PackageCommand {
                program: PathBuf::from("zip"),
                args,
                working_dir: working_dir.join(ADDON_DIR),
            }
        }
    };
    Ok(command)
}

/// Run the archiver to completion.
pub async fn package_addon(command: &PackageCommand) -> Result<()> {
    info!(
        program = %command.program.display(),
        dir = %command.working_dir.display(),
        "packaging addon"
    );

    let status = Command::new(&command.program)
        .args(&command.args)
        .current_dir(&command.working_dir)
        .status()
        .await
        .map_err(|source| BuildError::Spawn {
            program: command.program.display().to_string(),
            source,
        })?;

    if !status.success() {
        return Err(BuildError::PackagingFailed {
            status: status.code().unwrap_or(-1),
        });
    }
    Ok(())
}
