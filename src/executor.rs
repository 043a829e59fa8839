use std::{fmt::Display, path::PathBuf};

use tokio::process::Command;

use crate::{command::InstallCommand, error::Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    /// `code` is `None` when the child was killed by a signal.
    Failed { code: Option<i32> },
}

impl RunStatus {
    pub fn success(&self) -> bool {
        matches!(self, RunStatus::Success)
    }
}

impl From<std::process::ExitStatus> for RunStatus {
    fn from(value: std::process::ExitStatus) -> Self {
        if value.success() {
            RunStatus::Success
        } else {
            RunStatus::Failed { code: value.code() }
        }
    }
}

impl Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Success => f.write_str("success"),
            RunStatus::Failed { code: Some(code) } => f.write_fmt(format_args!("exit code {code}")),
            RunStatus::Failed { code: None } => f.write_str("terminated by signal"),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Runs the command to completion.
    async fn run(&mut self, command: &InstallCommand) -> Result<RunStatus>;
}

/// Spawns the package manager directly, stdio inherited, one child at a time.
pub struct ProcessRunner {
    cwd: Option<PathBuf>,
}

impl ProcessRunner {
    pub fn new(cwd: Option<PathBuf>) -> Self {
        Self { cwd }
    }
}

impl CommandRunner for ProcessRunner {
    async fn run(&mut self, command: &InstallCommand) -> Result<RunStatus> {
        let program = which::which(command.program())?;

        let mut cmd = Command::new(program);
        cmd.args(command.args());

        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }

        let status = cmd.status().await?;

        Ok(status.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorKind, metadata::manifest::{DependencyGroup, Manifest}};

    fn command(tool: &str) -> InstallCommand {
        let manifest: Manifest = serde_json::from_str(r#"{ "dependencies": { "a": "1" } }"#).unwrap();
        InstallCommand::for_group(tool, DependencyGroup::Runtime, &manifest).unwrap()
    }

    #[tokio::test]
    async fn missing_tool_is_an_error() {
        let mut runner = ProcessRunner::new(None);

        let err = runner.run(&command("yarnd-no-such-tool-3f9a")).await.unwrap_err();

        assert!(matches!(err, ErrorKind::Which(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_reported() {
        // `false` ignores its arguments and exits 1
        let mut runner = ProcessRunner::new(None);

        let status = runner.run(&command("false")).await.unwrap();

        assert_eq!(status, RunStatus::Failed { code: Some(1) });
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn zero_exit_is_success() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = ProcessRunner::new(Some(dir.path().to_path_buf()));

        let status = runner.run(&command("true")).await.unwrap();

        assert!(status.success());
    }

    #[test]
    fn status_display() {
        assert_eq!(RunStatus::Failed { code: Some(2) }.to_string(), "exit code 2");
        assert_eq!(RunStatus::Failed { code: None }.to_string(), "terminated by signal");
    }
}
