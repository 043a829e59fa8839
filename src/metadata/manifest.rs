use std::{fmt::Display, path::Path};

use compact_str::CompactString;
use indexmap::IndexMap;
use serde::{de::{IgnoredAny, MapAccess, Visitor}, Deserialize, Deserializer};
use tokio::fs::read_to_string;

use crate::error::Result;

/// Package name to version specifier. The specifier is skipped over, never kept.
pub type Dependencies = IndexMap<CompactString, IgnoredAny>;

#[derive(Debug, Default)]
pub struct Manifest {
    pub dependencies: Dependencies,
    pub dev_dependencies: Dependencies,
}

struct ManifestVisitor;

impl<'de> Visitor<'de> for ManifestVisitor {
    type Value = Manifest;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a package.json object")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>, {
        let mut manifest = Manifest::default();

        while let Some(key) = map.next_key::<CompactString>()? {
            // a `null` group counts as an empty one
            match key.as_str() {
                "dependencies" => {
                    manifest.dependencies = map.next_value::<Option<Dependencies>>()?.unwrap_or_default();
                },
                "devDependencies" => {
                    manifest.dev_dependencies = map.next_value::<Option<Dependencies>>()?.unwrap_or_default();
                },
                _ => {
                    map.next_value::<IgnoredAny>()?;
                },
            }
        }

        Ok(manifest)
    }
}

/// Only a JSON object is a manifest; arrays and scalars are rejected.
impl<'de> Deserialize<'de> for Manifest {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error> where D: Deserializer<'de> {
        deserializer.deserialize_map(ManifestVisitor)
    }
}

impl Manifest {
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let d = read_to_string(path).await?;

        Self::parse(&d)
    }

    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn group(&self, group: DependencyGroup) -> &Dependencies {
        match group {
            DependencyGroup::Dev => &self.dev_dependencies,
            DependencyGroup::Runtime => &self.dependencies,
        }
    }

    /// Package names of a group, in the order the manifest lists them.
    pub fn packages(&self, group: DependencyGroup) -> impl Iterator<Item = &CompactString> {
        self.group(group).keys()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyGroup {
    Dev,
    Runtime,
}

impl DependencyGroup {
    /// Install order: dev-dependencies first.
    pub const ALL: [DependencyGroup; 2] = [DependencyGroup::Dev, DependencyGroup::Runtime];

    pub fn manifest_key(&self) -> &'static str {
        match self {
            DependencyGroup::Dev => "devDependencies",
            DependencyGroup::Runtime => "dependencies",
        }
    }

    pub fn add_flag(&self) -> Option<&'static str> {
        match self {
            DependencyGroup::Dev => Some("-D"),
            DependencyGroup::Runtime => None,
        }
    }
}

impl Display for DependencyGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.manifest_key())
    }
}
