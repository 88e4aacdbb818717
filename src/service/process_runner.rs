//! Runs one external command to completion and captures its output.

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::Semaphore;

use crate::domain::CommandSpec;
use crate::error::GatewayError;

/// Captured result of a finished child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Standard output, decoded as UTF-8 (invalid sequences replaced).
    pub stdout: String,
    /// Standard error, decoded as UTF-8. Diagnostics only.
    pub stderr: String,
    /// Exit code, or `None` if the child was terminated by a signal.
    pub exit_code: Option<i32>,
}

impl ProcessOutput {
    /// Whether the child exited non-zero or wrote to stderr.
    ///
    /// This is reported, never enforced: stdout is relayed either way.
    #[must_use]
    pub fn looks_failed(&self) -> bool {
        self.exit_code != Some(0) || !self.stderr.trim().is_empty()
    }
}

/// Spawns child processes, optionally bounded by a concurrency limit and
/// a per-child timeout.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    permits: Option<Arc<Semaphore>>,
    timeout: Option<Duration>,
}

impl ProcessRunner {
    /// Creates a runner with no concurrency limit and no timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the number of children alive at once. Callers beyond the cap
    /// wait for a slot. Limits above [`Semaphore::MAX_PERMITS`] are clamped.
    #[must_use]
    pub fn with_limit(mut self, max_processes: Option<usize>) -> Self {
        self.permits = max_processes
            .map(|n| Arc::new(Semaphore::new(n.min(Semaphore::MAX_PERMITS))));
        self
    }

    /// Kills children that run longer than `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Runs `command`, writing `input` to its stdin when given, and waits
    /// for it to exit while draining stdout and stderr.
    ///
    /// A non-zero exit status is not an error; whatever the child printed
    /// is returned.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::SpawnFailure`] if the executable cannot be started.
    /// - [`GatewayError::ProcessIo`] if waiting on the child fails.
    /// - [`GatewayError::CommandTimeout`] if the configured timeout elapses.
    pub async fn run(
        &self,
        command: &CommandSpec,
        input: Option<&str>,
    ) -> Result<ProcessOutput, GatewayError> {
        let _permit = match &self.permits {
            Some(sem) => Some(
                Arc::clone(sem)
                    .acquire_owned()
                    .await
                    .map_err(|e| GatewayError::Internal(e.to_string()))?,
            ),
            None => None,
        };

        let mut cmd = Command::new(command.program());
        cmd.args(command.args())
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|source| GatewayError::SpawnFailure {
            command: command.clone(),
            source,
        })?;
        tracing::debug!(%command, pid = child.id(), "spawned child process");

        // Feed stdin from its own task so a child that writes a lot before
        // reading cannot deadlock against us.
        let writer = match (child.stdin.take(), input) {
            (Some(mut stdin), Some(input)) => {
                let bytes = input.as_bytes().to_vec();
                Some(tokio::spawn(async move {
                    stdin.write_all(&bytes).await?;
                    stdin.shutdown().await?;
                    Ok::<(), std::io::Error>(())
                }))
            }
            _ => None,
        };

        let wait = child.wait_with_output();
        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, wait).await.map_err(|_| {
                GatewayError::CommandTimeout {
                    command: command.clone(),
                    timeout_secs: limit.as_secs(),
                }
            })?,
            None => wait.await,
        }
        .map_err(|source| GatewayError::ProcessIo {
            command: command.clone(),
            source,
        })?;

        if let Some(writer) = writer {
            match writer.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                    tracing::debug!(%command, "child exited before reading all of stdin");
                }
                Ok(Err(e)) => tracing::warn!(%command, error = %e, "failed to write child stdin"),
                Err(e) => tracing::warn!(%command, error = %e, "stdin writer task failed"),
            }
        }

        let result = ProcessOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        };

        tracing::info!(%command, exit_code = ?result.exit_code, "child process finished");
        if !result.stderr.is_empty() {
            tracing::warn!(%command, stderr = %result.stderr, "child process wrote to stderr");
        }

        Ok(result)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::time::Instant;

    use super::*;

    fn sh(script: &str) -> CommandSpec {
        CommandSpec::new("sh", ["-c", script])
    }

    #[tokio::test]
    async fn captures_stdout() {
        let runner = ProcessRunner::new();
        let Ok(out) = runner.run(&sh(r#"printf '{"seed": 42}'"#), None).await else {
            panic!("run failed");
        };
        assert_eq!(out.stdout, r#"{"seed": 42}"#);
        assert_eq!(out.exit_code, Some(0));
        assert!(!out.looks_failed());
    }

    #[tokio::test]
    async fn feeds_stdin() {
        let runner = ProcessRunner::new();
        let Ok(out) = runner.run(&sh("cat"), Some("hello child")).await else {
            panic!("run failed");
        };
        assert_eq!(out.stdout, "hello child");
    }

    #[tokio::test]
    async fn no_input_means_empty_stdin() {
        let runner = ProcessRunner::new();
        let Ok(out) = runner.run(&sh("wc -c"), None).await else {
            panic!("run failed");
        };
        assert_eq!(out.stdout.trim(), "0");
    }

    #[tokio::test]
    async fn large_payload_does_not_deadlock() {
        let runner = ProcessRunner::new();
        let payload = "x".repeat(1 << 20);
        let Ok(out) = runner.run(&sh("cat"), Some(&payload)).await else {
            panic!("run failed");
        };
        assert_eq!(out.stdout.len(), payload.len());
    }

    #[tokio::test]
    async fn nonzero_exit_still_returns_stdout() {
        let runner = ProcessRunner::new();
        let Ok(out) = runner
            .run(&sh("printf partial; echo oops >&2; exit 3"), None)
            .await
        else {
            panic!("run failed");
        };
        assert_eq!(out.stdout, "partial");
        assert_eq!(out.stderr.trim(), "oops");
        assert_eq!(out.exit_code, Some(3));
        assert!(out.looks_failed());
    }

    #[tokio::test]
    async fn child_ignoring_stdin_is_not_an_error() {
        let runner = ProcessRunner::new();
        let payload = "y".repeat(1 << 20);
        let Ok(out) = runner.run(&sh("printf done"), Some(&payload)).await else {
            panic!("run failed");
        };
        assert_eq!(out.stdout, "done");
    }

    #[tokio::test]
    async fn missing_executable_is_spawn_failure() {
        let runner = ProcessRunner::new();
        let cmd = CommandSpec::new("/definitely/not/here", Vec::<String>::new());
        let result = runner.run(&cmd, None).await;
        assert!(matches!(result, Err(GatewayError::SpawnFailure { .. })));
    }

    #[tokio::test]
    async fn timeout_kills_slow_child() {
        let runner = ProcessRunner::new().with_timeout(Some(Duration::from_millis(200)));
        let started = Instant::now();
        let result = runner.run(&sh("sleep 5"), None).await;
        assert!(matches!(result, Err(GatewayError::CommandTimeout { .. })));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn limit_serializes_children() {
        let runner = ProcessRunner::new().with_limit(Some(1));
        let cmd = sh("sleep 0.3");
        let started = Instant::now();
        let (a, b) = tokio::join!(runner.run(&cmd, None), runner.run(&cmd, None));
        assert!(a.is_ok() && b.is_ok());
        assert!(started.elapsed() >= Duration::from_millis(550));
    }

    #[tokio::test]
    async fn oversized_limit_is_clamped() {
        let runner = ProcessRunner::new().with_limit(Some(usize::MAX));
        let Ok(out) = runner.run(&sh("printf ok"), None).await else {
            panic!("run failed");
        };
        assert_eq!(out.stdout, "ok");
    }

    #[tokio::test]
    async fn unlimited_runs_children_concurrently() {
        let runner = ProcessRunner::new();
        let cmd = sh("sleep 0.5");
        let started = Instant::now();
        let (a, b) = tokio::join!(runner.run(&cmd, None), runner.run(&cmd, None));
        assert!(a.is_ok() && b.is_ok());
        assert!(started.elapsed() < Duration::from_millis(950));
    }
}
