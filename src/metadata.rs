use std::path::{Path, PathBuf};

use crate::CliOpts;

pub mod manifest;

pub const MANIFEST_FILE: &str = "package.json";

/// Resolves `--manifest`, accepting either the file itself or the directory holding it.
pub fn manifest_path(opts: &CliOpts) -> PathBuf {
    let path = PathBuf::from(&opts.manifest);

    if path.is_dir() {
        path.join(MANIFEST_FILE)
    } else {
        path
    }
}

/// The directory the package manager should run in. `None` means the current one.
pub fn project_dir(manifest_path: &Path) -> Option<&Path> {
    manifest_path.parent().filter(|dir| !dir.as_os_str().is_empty())
}
