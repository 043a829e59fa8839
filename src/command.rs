use std::fmt::Display;

use compact_str::CompactString;

use crate::{metadata::manifest::{DependencyGroup, Manifest}, warn, CliOpts};

/// One package manager invocation, kept as program plus argument vector so
/// package names never pass through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommand {
    program: CompactString,
    group: DependencyGroup,
    packages: Vec<CompactString>,
}

impl InstallCommand {
    /// `None` when the group is absent or empty.
    ///
    /// Names starting with `-` are dropped with a warning, the tool would read them as options.
    pub fn for_group(tool: &str, group: DependencyGroup, manifest: &Manifest) -> Option<Self> {
        let packages: Vec<CompactString> = manifest.packages(group)
            .filter(|package| {
                if package.starts_with('-') {
                    warn(format!("skipping {group} entry `{package}`, not a package name"));
                    return false
                }

                true
            })
            .cloned()
            .collect();

        if packages.is_empty() {
            return None
        }

        Some(Self {
            program: tool.into(),
            group,
            packages,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn group(&self) -> DependencyGroup {
        self.group
    }

    pub fn packages(&self) -> &[CompactString] {
        &self.packages
    }

    pub fn args(&self) -> impl Iterator<Item = &str> {
        std::iter::once("add")
            .chain(self.group.add_flag())
            .chain(self.packages.iter().map(|p| p.as_str()))
    }
}

impl Display for InstallCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.program)?;

        for arg in self.args() {
            f.write_fmt(format_args!(" {arg}"))?;
        }

        Ok(())
    }
}

/// Commands for every group the user didn't exclude, in install order.
pub fn build_commands(opts: &CliOpts, manifest: &Manifest) -> Vec<InstallCommand> {
    DependencyGroup::ALL.into_iter()
        .filter(|group| match group {
            DependencyGroup::Dev => !opts.no_dev_deps,
            DependencyGroup::Runtime => !opts.no_runtime_deps,
        })
        .filter_map(|group| InstallCommand::for_group(&opts.tool, group, manifest))
        .collect()
}
