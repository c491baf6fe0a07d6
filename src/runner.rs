//! Deploy execution
//!
//! The hosting CLI does the actual upload. This module builds its command
//! line, runs it through a [`CommandRunner`] and turns the exit status
//! into a [`DeployOutcome`].
use crate::config::Settings;
use crate::deploy::Output;
use crate::token::Token;
use core::fmt::{self, Display};
use std::io;
use std::path::PathBuf;
use std::process::Command;
use thiserror::Error;

const REDACTED: &str = "<token>";

/// A fully specified child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub workdir: PathBuf,
    secret: Option<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>, args: Vec<String>, workdir: PathBuf) -> Self {
        Self {
            program: program.into(),
            args,
            workdir,
            secret: None,
        }
    }

    /// `<command...> deploy --only <target> --token <token> --non-interactive`
    pub fn deploy(settings: &Settings, token: &Token) -> Self {
        let mut args = settings.program_args.clone();
        args.extend([
            "deploy".to_string(),
            "--only".to_string(),
            settings.target.clone(),
            "--token".to_string(),
            token.expose().to_string(),
            "--non-interactive".to_string(),
        ]);
        Self {
            secret: Some(token.expose().to_string()),
            ..Self::new(&settings.program, args, settings.workdir.clone())
        }
    }

    /// Command line with the token masked, for logs.
    pub fn display_redacted(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(|arg| match &self.secret {
                Some(secret) if arg == secret => REDACTED,
                _ => arg.as_str(),
            }))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Captured result of a finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the child was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("can not start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Runs a child process to completion and captures its output.
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput, RunnerError>;
}

/// Runs children with [`std::process::Command`]. Blocks until the child
/// exits; there is no timeout.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput, RunnerError> {
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.workdir)
            .output()
            .map_err(|source| RunnerError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployOutcome {
    Succeeded,
    Failed { code: Option<i32> },
}

impl Display for DeployOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployOutcome::Succeeded => write!(f, "Succeeded"),
            DeployOutcome::Failed { code: Some(code) } => {
                write!(f, "Failed (exit code {})", code)
            }
            DeployOutcome::Failed { code: None } => write!(f, "Failed (terminated by signal)"),
        }
    }
}

/// Deploy with the hosting CLI and relay what it printed.
///
/// Stdout is relayed unconditionally, stderr only when non-empty.
pub fn run_deploy<R>(
    settings: &Settings,
    token: &Token,
    runner: &R,
    out: &Output,
) -> Result<DeployOutcome, RunnerError>
where
    R: CommandRunner + ?Sized,
{
    let invocation = Invocation::deploy(settings, token);
    out.line("🚀 Deploying to Firebase Hosting...");
    log::debug!(
        "run: {} (in {})",
        invocation.display_redacted(),
        invocation.workdir.display()
    );

    let output = runner.run(&invocation)?;
    log::debug!("exit code: {:?}", output.code);

    out.line(output.stdout.trim_end());
    if !output.stderr.is_empty() {
        out.line(&format!("STDERR: {}", output.stderr.trim_end()));
    }

    Ok(if output.success() {
        DeployOutcome::Succeeded
    } else {
        DeployOutcome::Failed { code: output.code }
    })
}
