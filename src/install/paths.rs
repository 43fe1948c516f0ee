use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::runtime::Runtime;

/// Resolve the default bin directory when none is given.
///
/// Privileged installs go to the system-wide location, everything else into
/// the user's own bin directory.
#[tracing::instrument(skip(runtime))]
pub fn default_bin_dir<R: Runtime>(runtime: &R) -> Result<PathBuf> {
    #[cfg(not(windows))]
    if runtime.is_privileged() {
        return Ok(PathBuf::from("/usr/local/bin"));
    }

    let home = runtime
        .home_dir()
        .context("Could not determine home directory")?;

    #[cfg(not(windows))]
    return Ok(home.join(".local/bin"));

    #[cfg(windows)]
    Ok(home.join("bin"))
}
