//! External test-runner invocation
//!
//! The runner is a black box taking a script, an input and an output path.
//! [`ProcessRunner`] is the seam tests use to substitute a fake; the real
//! [`CommandRunner`] spawns the configured program and blocks until it exits.
//! There is no timeout and no retry.

use super::config::RunnerConfig;
use super::fixture::FixturePaths;
use std::ffi::OsString;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

/// Paths handed to the runner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerInvocation {
    pub script: PathBuf,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl From<FixturePaths> for RunnerInvocation {
    fn from(paths: FixturePaths) -> Self {
        Self {
            script: paths.statements,
            input: paths.input,
            output: paths.output,
        }
    }
}

/// Captured runner output
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunnerOutput {
    /// stdout and stderr as one stream, in write order
    pub text: String,

    /// Exit code, when the process ran and exited normally. Informational only.
    pub exit_code: Option<i32>,
}

impl RunnerOutput {
    pub fn new(text: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self {
            text: text.into(),
            exit_code,
        }
    }
}

/// Something that can run the external test binary
pub trait ProcessRunner {
    fn run(&self, invocation: &RunnerInvocation) -> RunnerOutput;
}

impl<F> ProcessRunner for F
where
    F: Fn(&RunnerInvocation) -> RunnerOutput,
{
    fn run(&self, invocation: &RunnerInvocation) -> RunnerOutput {
        self(invocation)
    }
}

/// Runs the configured program as a synchronous subprocess
#[derive(Debug, Clone)]
pub struct CommandRunner {
    config: RunnerConfig,
}

impl CommandRunner {
    pub fn from_config(config: &RunnerConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn program(&self) -> &str {
        &self.config.program
    }

    /// Full argument list: leading args, then each flag followed by its path
    pub fn arguments(&self, invocation: &RunnerInvocation) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.config.args.iter().map(OsString::from).collect();
        for (flag, path) in [
            (&self.config.script_flag, &invocation.script),
            (&self.config.input_flag, &invocation.input),
            (&self.config.output_flag, &invocation.output),
        ] {
            args.push(OsString::from(flag));
            args.push(path.clone().into_os_string());
        }
        args
    }

    /// Spawn the program with stdout and stderr sharing one pipe, then read
    /// to EOF and reap it
    fn run_merged(&self, args: &[OsString]) -> io::Result<(Vec<u8>, ExitStatus)> {
        let (mut reader, writer) = io::pipe()?;

        // The Command holds write ends; it must drop before reading to EOF
        let mut child = {
            let mut command = Command::new(&self.config.program);
            command
                .args(args)
                .stdout(writer.try_clone()?)
                .stderr(writer);
            command.spawn()?
        };

        let mut buf = Vec::new();
        let read = reader.read_to_end(&mut buf);
        let status = child.wait()?;
        read?;
        Ok((buf, status))
    }
}

impl ProcessRunner for CommandRunner {
    fn run(&self, invocation: &RunnerInvocation) -> RunnerOutput {
        let args = self.arguments(invocation);
        log::debug!("Running {} {:?}", self.config.program, args);

        match self.run_merged(&args) {
            Ok((bytes, status)) => {
                let mut text = String::from_utf8_lossy(&bytes).into_owned();
                strip_trailing_newline(&mut text);
                RunnerOutput::new(text, status.code())
            }
            Err(e) => {
                log::warn!("Failed to launch '{}': {}", self.config.program, e);
                RunnerOutput::new(format!("{}: {}", self.config.program, e), None)
            }
        }
    }
}

/// Drop a single trailing `\n` or `\r\n`
fn strip_trailing_newline(text: &mut String) {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
}
