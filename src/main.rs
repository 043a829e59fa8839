use std::{fmt::Display, process::exit};

use clap::Parser;
use console::style;
use error::YarndError;
use executor::ProcessRunner;
use install::{install, InstallResult};
use metadata::{manifest_path, project_dir};

mod command;
mod error;
mod executor;
mod install;
mod metadata;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let opts = CliOpts::parse();

    let cwd = project_dir(&manifest_path(&opts)).map(|dir| dir.to_path_buf());
    let mut runner = ProcessRunner::new(cwd);

    if opts.verbose {
        log("Install started");
    }

    let res = install(&opts, &mut runner, &mut std::io::stdout()).await;

    match &res {
        Ok(res) if opts.verbose => log(format!("Install completed: {res}")),
        Ok(_) => (),
        Err(e) => eprintln!("{} Install failed: {e}", now()),
    }

    exit(exit_code(&opts, &res))
}

/// Failed install commands only affect the exit code with `--strict`.
fn exit_code(opts: &CliOpts, res: &Result<InstallResult, YarndError>) -> i32 {
    match res {
        Ok(res) if opts.strict && res.failed > 0 => 1,
        Ok(_) => 0,
        Err(_) => -1,
    }
}

#[derive(Parser, Clone)]
#[command(author, version, about)]
struct CliOpts {
    #[arg(short, long, env, default_value = "package.json",
        help = "The package.json to read, or the directory containing it.")]
    manifest: String,

    #[arg(short, long, env, default_value = "yarn",
        help = "The package manager executable. Invoked as '<tool> add [-D] <packages>'.")]
    tool: String,

    #[arg(short = 'n', long, env, default_value_t = false,
        help = "Print the install commands without running them")]
    dry_run: bool,

    #[arg(long, env, default_value_t = false,
        help = "Don't install dev-dependencies")]
    no_dev_deps: bool,

    #[arg(long, env, default_value_t = false,
        help = "Don't install dependencies")]
    no_runtime_deps: bool,

    #[arg(short, long, env, default_value_t = false,
        help = "Exit with a non-zero code when an install command fails. By default failures are only reported.")]
    strict: bool,

    #[arg(short, long, env, default_value_t = false,
        help = "Verbose logging")]
    verbose: bool,
}

fn now() -> String {
    chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

fn log<M: Display>(msg: M) {
    println!("{} {msg}", now());
}

/// Warnings go to stderr so stdout only carries the command lines.
fn warn<M: Display>(msg: M) {
    eprintln!("{} {} {msg}", now(), style("warning:").for_stderr().yellow().bold());
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::error::ErrorKind;

    fn opts(extra: &[&str]) -> CliOpts {
        let mut args = vec!["yarnd", "--tool", "yarn"];
        args.extend_from_slice(extra);
        CliOpts::parse_from(args)
    }

    fn finished(succeeded: u64, failed: u64) -> Result<InstallResult, YarndError> {
        Ok(InstallResult { succeeded, failed, skipped: 0 })
    }

    #[test]
    fn failures_are_not_fatal_by_default() {
        assert_eq!(exit_code(&opts(&[]), &finished(1, 1)), 0);
        assert_eq!(exit_code(&opts(&[]), &finished(2, 0)), 0);
    }

    #[test]
    fn strict_fails_on_any_failure() {
        assert_eq!(exit_code(&opts(&["--strict"]), &finished(1, 1)), 1);
        assert_eq!(exit_code(&opts(&["--strict"]), &finished(0, 2)), 1);
    }

    #[test]
    fn strict_passes_when_everything_installed() {
        assert_eq!(exit_code(&opts(&["--strict"]), &finished(2, 0)), 0);
        assert_eq!(exit_code(&opts(&["--strict"]), &Ok(InstallResult::default())), 0);
    }

    #[test]
    fn manifest_errors_are_fatal() {
        let res = Err(YarndError::Manifest {
            path: PathBuf::from("package.json"),
            source: ErrorKind::Io(std::io::Error::from(std::io::ErrorKind::NotFound)),
        });

        assert_eq!(exit_code(&opts(&[]), &res), -1);
        assert_eq!(exit_code(&opts(&["--strict"]), &res), -1);
    }
}
