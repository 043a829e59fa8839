use std::{fmt::Display, io::Write};

use crate::{command::build_commands, error::YarndError, executor::CommandRunner, log, metadata::{manifest::Manifest, manifest_path}, warn, CliOpts};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct InstallResult {
    pub succeeded: u64,
    pub failed: u64,
    pub skipped: u64,
}

impl Display for InstallResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{} install commands succeeded, {} failed", self.succeeded, self.failed))?;

        if self.skipped > 0 {
            f.write_fmt(format_args!(", {} not run (dry run)", self.skipped))?;
        }

        Ok(())
    }
}

/// Loads the manifest and runs one install command per non-empty group, dev first.
///
/// Every command line is written to `out` before it runs. A failing command is
/// reported and counted, the next group still runs. Only an unreadable manifest
/// or a broken `out` stops the run.
pub async fn install<R, W>(opts: &CliOpts, runner: &mut R, out: &mut W) -> Result<InstallResult, YarndError>
where
    R: CommandRunner,
    W: Write,
{
    let path = manifest_path(opts);

    if opts.verbose {
        log(format!("reading manifest {}", path.display()));
    }

    let manifest = Manifest::load(&path).await
        .map_err(|source| YarndError::Manifest { path: path.clone(), source })?;

    let commands = build_commands(opts, &manifest);

    if commands.is_empty() && opts.verbose {
        log("no dependencies declared, nothing to install");
    }

    let mut result = InstallResult::default();

    for command in commands {
        writeln!(out, "{command}").and_then(|_| out.flush())
            .map_err(|e| YarndError::Output(e.into()))?;

        if opts.dry_run {
            result.skipped += 1;
            continue
        }

        match runner.run(&command).await {
            Ok(status) if status.success() => {
                if opts.verbose {
                    log(format!("installed {} {}", command.packages().len(), command.group()));
                }

                result.succeeded += 1;
            },
            Ok(status) => {
                warn(format!("`{command}` failed: {status}"));
                result.failed += 1;
            },
            Err(e) => {
                warn(format!("`{command}` could not be run: {e}"));
                result.failed += 1;
            },
        }
    }

    Ok(result)
}
