//! Build tool execution with streamed output capture.

use crate::error::{BuildError, Result};
use crate::recorder::LogRecorder;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::info;

/// A fully resolved build-tool invocation.
#[derive(Debug, Clone)]
pub struct BuildCommand {
    /// Path to the executable (first element of the command line).
    pub program: String,

    /// Arguments, in order.
    pub args: Vec<String>,
}

impl BuildCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

/// Runs the build tool and streams its combined output through a recorder.
pub struct BuildRunner;

impl BuildRunner {
    /// Spawn the command with both stdout and stderr piped, feed every line
    /// from either stream through the recorder as it arrives, then wait for
    /// the child to exit.
    ///
    /// There is deliberately no timeout: a hung build tool hangs the run.
    /// Returns the child's exit code (-1 if terminated by signal).
    pub async fn run(command: &BuildCommand, recorder: &mut LogRecorder) -> Result<i32> {
        info!(program = %command.program, args = ?command.args, "spawning build tool");

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| BuildError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        // Both pipes exist because of Stdio::piped above.
        let stdout = child.stdout.take().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "child stdout not captured")
        })?;
        let stderr = child.stderr.take().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "child stderr not captured")
        })?;

        let mut out_reader = BufReader::new(stdout);
        let mut err_reader = BufReader::new(stderr);
        let mut out_buf: Vec<u8> = Vec::new();
        let mut err_buf: Vec<u8> = Vec::new();
        let mut out_done = false;
        let mut err_done = false;

        // Interleave the two streams until both hit end-of-stream. Lines
        // land in the log in arrival order, matching the combined-stream
        // console view. Reading raw bytes and lossy-converting keeps a
        // stray non-UTF-8 byte in compiler output from aborting the run;
        // it degrades to a replacement character instead. read_until is
        // cancel safe: a partial line from a cancelled branch stays in its
        // buffer for the next call.
        while !(out_done && err_done) {
            tokio::select! {
                read = out_reader.read_until(b'\n', &mut out_buf), if !out_done => {
                    if read? == 0 && out_buf.is_empty() {
                        out_done = true;
                    } else {
                        record_line_bytes(recorder, &mut out_buf).await?;
                    }
                },
                read = err_reader.read_until(b'\n', &mut err_buf), if !err_done => {
                    if read? == 0 && err_buf.is_empty() {
                        err_done = true;
                    } else {
                        record_line_bytes(recorder, &mut err_buf).await?;
                    }
                },
            }
        }

        let status = child.wait().await?;
        let code = status.code().unwrap_or(-1);
        info!(exit_code = code, "build tool exited");
        Ok(code)
    }
}

/// Record one completed (or final unterminated) line accumulated as raw
/// bytes, then reset the buffer for the next line.
async fn record_line_bytes(recorder: &mut LogRecorder, buf: &mut Vec<u8>) -> Result<()> {
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
    let line = String::from_utf8_lossy(buf).into_owned();
    buf.clear();
    recorder.record(&line).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::read_log;

    #[tokio::test]
    async fn test_run_captures_stdout_and_stderr() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("run.log");
        let mut recorder = LogRecorder::create(&path).await.expect("create failed");

        let command = BuildCommand::new(
            "sh",
            vec![
                "-c".to_string(),
                "echo out-line; echo err-line 1>&2".to_string(),
            ],
        );
        let code = BuildRunner::run(&command, &mut recorder)
            .await
            .expect("run failed");
        assert_eq!(code, 0);

        let path = recorder.finish().await.expect("finish failed");
        let lines = read_log(&path).await.expect("read failed");
        assert!(lines.iter().any(|l| l == "out-line"));
        assert!(lines.iter().any(|l| l == "err-line"));
    }

    #[tokio::test]
    async fn test_run_reports_nonzero_exit() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("run.log");
        let mut recorder = LogRecorder::create(&path).await.expect("create failed");

        let command = BuildCommand::new("sh", vec!["-c".to_string(), "exit 3".to_string()]);
        let code = BuildRunner::run(&command, &mut recorder)
            .await
            .expect("run failed");
        assert_eq!(code, 3);
    }

    #[tokio::test]
    async fn test_non_utf8_output_degrades_to_replacement_char() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("run.log");
        let mut recorder = LogRecorder::create(&path).await.expect("create failed");

        // \351 is a lone latin-1 e-acute, as a compiler echoing non-UTF-8
        // source bytes would emit it. The run must survive and still
        // deliver the sentinel line for classification.
        let command = BuildCommand::new(
            "sh",
            vec![
                "-c".to_string(),
                "printf 'caf\\351.c:1: warning: bad char\\n'; \
                 echo 'scons: done building targets.'"
                    .to_string(),
            ],
        );
        let code = BuildRunner::run(&command, &mut recorder)
            .await
            .expect("run must not abort on invalid UTF-8");
        assert_eq!(code, 0);

        let path = recorder.finish().await.expect("finish failed");
        let lines = read_log(&path).await.expect("read failed");
        assert!(lines.iter().any(|l| l == "scons: done building targets."));
        let warning = lines.iter().find(|l| l.contains(": warning")).expect("warning line");
        assert!(warning.contains('\u{FFFD}'));
        assert!(warning.starts_with("caf"));
    }

    #[tokio::test]
    async fn test_unterminated_final_line_recorded() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("run.log");
        let mut recorder = LogRecorder::create(&path).await.expect("create failed");

        let command = BuildCommand::new(
            "sh",
            vec!["-c".to_string(), "printf 'no trailing newline'".to_string()],
        );
        BuildRunner::run(&command, &mut recorder)
            .await
            .expect("run failed");

        let path = recorder.finish().await.expect("finish failed");
        let lines = read_log(&path).await.expect("read failed");
        assert_eq!(lines, vec!["no trailing newline".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("run.log");
        let mut recorder = LogRecorder::create(&path).await.expect("create failed");

        let command = BuildCommand::new("/nonexistent/scons", vec![]);
        let err = BuildRunner::run(&command, &mut recorder)
            .await
            .unwrap_err();
        assert!(matches!(err, BuildError::Spawn { .. }));
    }
}
