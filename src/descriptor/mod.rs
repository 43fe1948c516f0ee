//! The package descriptor: identity metadata plus the list of scripts to
//! expose as commands.

mod manifest;

pub use manifest::DEFAULT_MANIFEST;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Static package metadata declared by a manifest.
///
/// `scripts` entries are paths relative to the manifest's directory; the
/// file name of each entry becomes the installed command name.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Descriptor {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub scripts: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classifiers: Vec<String>,
}

impl Descriptor {
    /// Reject malformed field values before anything touches the filesystem.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("Descriptor has an empty package name");
        }
        if self.name.contains(['/', '\\']) {
            bail!("Package name {:?} must not contain path separators", self.name);
        }
        if self.version.trim().is_empty() {
            bail!("Descriptor for {} has an empty version", self.name);
        }
        if self.scripts.is_empty() {
            bail!("Descriptor for {} declares no scripts", self.name);
        }

        let mut seen = HashSet::new();
        for script in &self.scripts {
            if script.trim().is_empty() {
                bail!("Descriptor for {} contains an empty script path", self.name);
            }
            let command = command_name(script)?;
            if !seen.insert(command.to_string()) {
                bail!(
                    "Descriptor for {} declares two scripts installing as {:?}",
                    self.name,
                    command
                );
            }
        }

        Ok(())
    }
}

/// The command name a script installs as: the file name of its path.
pub fn command_name(script: &str) -> Result<&str> {
    Path::new(script)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| *name != "." && *name != "..")
        .ok_or_else(|| anyhow::anyhow!("Script path {:?} has no usable file name", script))
}
