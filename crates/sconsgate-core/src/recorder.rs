//! Build log recording and read-back.
//!
//! The log file lives through two non-overlapping phases: append-only while
//! the child process runs, then read-only for classification. The recorder
//! owns the write phase; [`read_log`] serves the read phase.

use crate::error::Result;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Appends child-process output to a durable log file while relaying it to
/// the console.
pub struct LogRecorder {
    path: PathBuf,
    file: File,
}

impl LogRecorder {
    /// Create the log file, deleting a stale one from a prior run first.
    pub async fn create(path: &Path) -> Result<Self> {
        if tokio::fs::try_exists(path).await? {
            debug!(path = %path.display(), "removing stale build log");
            tokio::fs::remove_file(path).await?;
        }
        let file = File::create(path).await?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Record one line: append it verbatim to the log, and relay the
    /// trimmed form to stdout unless it is empty. The raw build output is
    /// the product here, so it goes to stdout directly rather than through
    /// the tracing subscriber.
    pub async fn record(&mut self, line: &str) -> Result<()> {
        self.file.write_all(line.as_bytes()).await?;
        self.file.write_all(b"\n").await?;
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            println!("{trimmed}");
        }
        Ok(())
    }

    /// Flush and close the write phase. Consumes the recorder so nothing
    /// can append once classification starts.
    pub async fn finish(mut self) -> Result<PathBuf> {
        self.file.flush().await?;
        Ok(self.path)
    }
}

/// Read a finished build log back as ordered lines. Lossy conversion: the
/// log mirrors whatever bytes the build tool emitted, and a stray
/// non-UTF-8 byte must not make the log unreadable during classification.
pub async fn read_log(path: &Path) -> Result<Vec<String>> {
    let bytes = tokio::fs::read(path).await?;
    let contents = String::from_utf8_lossy(&bytes);
    Ok(contents.lines().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_record_and_read_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("sconsbuild.log");

        let mut recorder = LogRecorder::create(&path).await.expect("create failed");
        recorder.record("gcc -c a.c").await.expect("record failed");
        recorder
            .record("scons: done building targets.")
            .await
            .expect("record failed");
        let path = recorder.finish().await.expect("finish failed");

        let lines = read_log(&path).await.expect("read failed");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "scons: done building targets.");
    }

    #[tokio::test]
    async fn test_read_log_tolerates_invalid_utf8() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("sconsbuild.log");
        tokio::fs::write(&path, b"caf\xE9.c:1: warning: bad char\nscons: done building targets.\n")
            .await
            .expect("seed failed");

        let lines = read_log(&path).await.expect("read failed");
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains('\u{FFFD}'));
        assert_eq!(lines[1], "scons: done building targets.");
    }

    #[tokio::test]
    async fn test_stale_log_replaced() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("sconsbuild.log");
        tokio::fs::write(&path, "leftover from a prior run\n")
            .await
            .expect("seed failed");

        let recorder = LogRecorder::create(&path).await.expect("create failed");
        let path = recorder.finish().await.expect("finish failed");

        let lines = read_log(&path).await.expect("read failed");
        assert!(lines.is_empty());
    }
}
