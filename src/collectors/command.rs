// External tool invocation with a hard deadline

// Process-group kill for the whole command tree
use nix::sys::signal::{Signal, killpg};
use nix::unistd::Pid;
// Reading the child's stdout pipe
use std::io::Read;
// Own process group so descendants can be killed with the child
use std::os::unix::process::CommandExt;
use std::process::{Child, Command, Stdio};
// Reader thread hands its buffer back over a channel
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Failure modes of an external tool invocation.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed waiting for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} did not finish within {timeout:?}")]
    Timeout { program: String, timeout: Duration },
    #[error("{program} exited with status {code:?}")]
    Status { program: String, code: Option<i32> },
    #[error("{program} produced non UTF-8 output")]
    InvalidUtf8 { program: String },
}

/// Runs an external program and hands back its stdout.
/// Collectors depend on this seam so tests can script tool output.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError>;
}

/// Spawns real processes. The whole call, including reading stdout,
/// is bounded by `timeout`; on expiry the child's process group is killed.
#[derive(Clone, Debug)]
pub struct SystemCommand {
    timeout: Duration,
}

impl SystemCommand {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn timed_out(&self, program: &str, child: &mut Child) -> CommandError {
        kill_group(child);
        tracing::debug!(program, timeout = ?self.timeout, "killed slow command");
        CommandError::Timeout {
            program: program.to_string(),
            timeout: self.timeout,
        }
    }
}

/// Kills the child and anything it left running in its process group.
fn kill_group(child: &mut Child) {
    // Group id equals the child's pid because of `process_group(0)`
    if let Ok(pid) = i32::try_from(child.id()) {
        if let Err(e) = killpg(Pid::from_raw(pid), Signal::SIGKILL) {
            tracing::trace!(error = %e, "process group already gone");
        }
    }
    let _ = child.kill();
    let _ = child.wait();
}

impl CommandRunner for SystemCommand {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
        let deadline = Instant::now() + self.timeout;

        // Start the tool in a fresh process group
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .process_group(0)
            .spawn()
            .map_err(|source| CommandError::Spawn {
                program: program.to_string(),
                source,
            })?;

        // Drain stdout off-thread so a full pipe never blocks the child
        let (tx, rx) = mpsc::channel();
        if let Some(mut out) = child.stdout.take() {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = tx.send(out.read_to_end(&mut buf).map(|_| buf));
            });
        } else {
            let _ = tx.send(Ok(Vec::new()));
        }

        // Wait for the direct child to exit
        let status = loop {
            let polled = child.try_wait().map_err(|source| CommandError::Wait {
                program: program.to_string(),
                source,
            })?;
            match polled {
                Some(status) => break status,
                None if Instant::now() >= deadline => return Err(self.timed_out(program, &mut child)),
                None => thread::sleep(POLL_INTERVAL),
            }
        };

        // Wait for EOF on stdout; a descendant holding the pipe must not outlive the deadline
        let remaining = deadline.saturating_duration_since(Instant::now());
        let bytes = match rx.recv_timeout(remaining) {
            Ok(Ok(bytes)) => bytes,
            Ok(Err(source)) => {
                return Err(CommandError::Wait {
                    program: program.to_string(),
                    source,
                });
            }
            Err(RecvTimeoutError::Timeout) => return Err(self.timed_out(program, &mut child)),
            Err(RecvTimeoutError::Disconnected) => Vec::new(),
        };

        if !status.success() {
            return Err(CommandError::Status {
                program: program.to_string(),
                code: status.code(),
            });
        }

        String::from_utf8(bytes).map_err(|_| CommandError::InvalidUtf8 {
            program: program.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner() -> SystemCommand {
        SystemCommand::new(Duration::from_secs(5))
    }

    #[test]
    fn captures_stdout() {
        let out = runner().run("sh", &["-c", "echo hello"]).unwrap();
        assert_eq!(out, "hello\n");
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let err = runner()
            .run("definitely-not-a-real-tool-4821", &[])
            .unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
    }

    #[test]
    fn non_zero_exit_is_reported() {
        let err = runner().run("sh", &["-c", "exit 3"]).unwrap_err();
        assert!(matches!(err, CommandError::Status { code: Some(3), .. }));
    }

    #[test]
    fn slow_command_is_killed_after_timeout() {
        let started = Instant::now();
        let err = SystemCommand::new(Duration::from_millis(100))
            .run("sleep", &["5"])
            .unwrap_err();
        assert!(matches!(err, CommandError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn background_process_holding_stdout_cannot_outlast_timeout() {
        let started = Instant::now();
        let err = SystemCommand::new(Duration::from_millis(500))
            .run("sh", &["-c", "echo hi; sleep 6 &"])
            .unwrap_err();
        assert!(matches!(err, CommandError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[test]
    fn timeout_kills_the_whole_process_group() {
        let started = Instant::now();
        let err = SystemCommand::new(Duration::from_millis(200))
            .run("sh", &["-c", "sleep 6 & sleep 6"])
            .unwrap_err();
        assert!(matches!(err, CommandError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[test]
    fn large_output_does_not_deadlock() {
        let out = runner()
            .run("sh", &["-c", "head -c 200000 /dev/zero | tr '\\0' a"])
            .unwrap();
        assert_eq!(out.len(), 200_000);
    }
}
