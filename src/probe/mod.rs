//! External command probes.
//!
//! A probe is one invocation of an external binary whose exit status and
//! captured output feed the verification engine. Probes never inherit
//! stdin and never let a hung tool wedge the run: each one gets a time
//! allowance and is killed when it lapses.

pub mod fake;

pub use fake::FakeRunner;

use std::fmt;
use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{PreflightError, Result};

/// Cap on captured bytes per stream. Version banners and plugin listings
/// are tiny; the cap keeps a misbehaving tool from exhausting memory.
const CAPTURE_LIMIT: u64 = 64 * 1024;

/// Interval between child liveness polls while waiting out an allowance.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// A parsed external command: program plus arguments.
///
/// Built by splitting a command string on whitespace. Shell quoting is
/// not interpreted, so `poetry self show plugins` is the program `poetry`
/// with three arguments, and an argument can never contain a space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Parse a whitespace-separated command string. Returns `None` when the
    /// string is blank.
    pub fn parse(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace();
        let program = parts.next()?.to_string();
        Some(Self {
            program,
            args: parts.map(str::to_string).collect(),
        })
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured result of one probe.
///
/// Binary absence and timeouts are recorded here rather than surfaced as
/// errors, because both are ordinary verification outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeOutput {
    /// Whether the binary could be located at all.
    pub found: bool,
    /// Whether the probe exceeded its allowance and was killed.
    pub timed_out: bool,
    /// Exit code, when the process ran to completion and was not
    /// terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProbeOutput {
    /// Output for a binary that could not be located on the PATH.
    pub fn not_found() -> Self {
        Self::default()
    }

    /// Output for a probe that did not finish within its allowance.
    pub fn expired() -> Self {
        Self {
            found: true,
            timed_out: true,
            ..Self::default()
        }
    }

    /// Output for a probe that ran to completion.
    pub fn completed(exit_code: i32, stdout: &str, stderr: &str) -> Self {
        Self {
            found: true,
            timed_out: false,
            exit_code: Some(exit_code),
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    /// Whether the probe ran to completion with exit code zero.
    pub fn success(&self) -> bool {
        self.found && !self.timed_out && self.exit_code == Some(0)
    }
}

/// Runs probes. The engine depends on this seam so tests can script
/// outcomes without spawning processes.
pub trait ProbeRunner {
    /// Run one probe to completion within `timeout`.
    ///
    /// An absent binary or an expired allowance is data on the returned
    /// [`ProbeOutput`]; `Err` is reserved for host-level failures such as
    /// a spawn rejected by the operating system.
    fn run(&self, invocation: &Invocation, timeout: Duration) -> Result<ProbeOutput>;
}

/// Probe runner backed by real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProbeRunner for SystemRunner {
    fn run(&self, invocation: &Invocation, timeout: Duration) -> Result<ProbeOutput> {
        tracing::debug!("probing: {} (allowance {:?})", invocation, timeout);

        let mut child = match Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("binary not found: {}", invocation.program);
                return Ok(ProbeOutput::not_found());
            }
            Err(e) => {
                return Err(PreflightError::ProbeFailed {
                    command: invocation.to_string(),
                    message: e.to_string(),
                });
            }
        };

        // Drain both pipes on their own threads so a tool that fills one
        // buffer cannot deadlock against our wait below.
        let stdout_reader = spawn_reader(child.stdout.take());
        let stderr_reader = spawn_reader(child.stderr.take());

        let status = match wait_with_timeout(&mut child, timeout) {
            Ok(status) => status,
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(PreflightError::ProbeFailed {
                    command: invocation.to_string(),
                    message: e.to_string(),
                });
            }
        };

        if status.is_none() {
            // Allowance lapsed: kill, then reap so no zombie lingers.
            let _ = child.kill();
            let _ = child.wait();
            tracing::debug!("probe timed out after {:?}: {}", timeout, invocation);
        }

        let stdout = stdout_reader.join().unwrap_or_default();
        let stderr = stderr_reader.join().unwrap_or_default();

        match status {
            Some(status) => {
                tracing::debug!("probe finished: {} (exit {:?})", invocation, status.code());
                Ok(ProbeOutput {
                    found: true,
                    timed_out: false,
                    exit_code: status.code(),
                    stdout,
                    stderr,
                })
            }
            None => Ok(ProbeOutput {
                stdout,
                stderr,
                ..ProbeOutput::expired()
            }),
        }
    }
}

/// Poll `try_wait` until the child exits or the allowance lapses. Returns
/// `Ok(None)` on lapse; killing the child is the caller's job.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> std::io::Result<Option<ExitStatus>> {
    let started = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if started.elapsed() >= timeout {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Read a stream to the capture limit, then sink the rest so the child
/// never blocks on a full pipe.
fn spawn_reader<R>(source: Option<R>) -> thread::JoinHandle<String>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let Some(mut source) = source else {
            return String::new();
        };
        let mut captured = Vec::new();
        let _ = (&mut source).take(CAPTURE_LIMIT).read_to_end(&mut captured);
        let discarded = std::io::copy(&mut source, &mut std::io::sink()).unwrap_or(0);
        if discarded > 0 {
            tracing::warn!(
                "probe output truncated at {CAPTURE_LIMIT} bytes ({discarded} discarded)"
            );
        }
        String::from_utf8_lossy(&captured).into_owned()
    })
}
