//! Packaging-time failure taxonomy.
//!
//! These are the conditions an operator can hit while installing a
//! descriptor. They travel through `anyhow` like every other error but stay
//! downcastable so callers and tests can match on the exact condition.

use derive_more::{Display, Error};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Display, Error)]
pub enum InstallError {
    /// A script declared by the descriptor does not exist in the source tree.
    #[display("Script file {path:?} is declared by the manifest but does not exist")]
    MissingScriptFile { path: PathBuf },

    /// The bin directory (or a file in it) is not writable.
    #[display("Permission denied writing to {path:?}")]
    PermissionDenied { path: PathBuf },

    /// A command with the same name exists and is not owned by this tool.
    #[display(
        "Command {command:?} already exists at {path:?} and was not installed by scriptdist; pass --force to overwrite"
    )]
    NameCollision { command: String, path: PathBuf },
}

/// Rewrap a filesystem error as [`InstallError::PermissionDenied`] when the
/// underlying `io::Error` says so; leave anything else untouched.
pub(crate) fn classify_fs_error(err: anyhow::Error, path: &Path) -> anyhow::Error {
    let denied = err
        .root_cause()
        .downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == ErrorKind::PermissionDenied);

    if denied {
        anyhow::Error::new(InstallError::PermissionDenied {
            path: path.to_path_buf(),
        })
    } else {
        err
    }
}
