//! Loading and serializing the TOML descriptor manifest.

use anyhow::{Context, Result};
use std::path::Path;

use super::Descriptor;
use crate::runtime::Runtime;

/// Manifest file name looked up in the current directory when no
/// `--manifest` path is given.
pub const DEFAULT_MANIFEST: &str = "scriptdist.toml";

impl Descriptor {
    /// Read and parse a manifest file.
    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Result<Self> {
        let contents = runtime
            .read_to_string(path)
            .with_context(|| format!("Failed to read manifest {:?}", path))?;
        Self::from_toml(&contents).with_context(|| format!("Failed to parse manifest {:?}", path))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid descriptor manifest")
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize descriptor")
    }
}
