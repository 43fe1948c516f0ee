//! Installing descriptor-declared scripts into a bin directory.
//!
//! The install is all-or-nothing up front: every declared script is checked
//! for existence and every destination is checked for collisions before the
//! first byte is written. Copies go through a temp file and a rename, so a
//! re-install is a deterministic overwrite of the previous state.

use anyhow::{Context, Result, bail};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::descriptor::{Descriptor, command_name};
use crate::runtime::Runtime;

pub mod error;
mod paths;
mod receipt;

pub use error::InstallError;
pub use paths::default_bin_dir;
pub use receipt::{RECEIPT_DIR, Receipt, find_all_receipts};

use error::classify_fs_error;

/// Install the scripts declared by the manifest at `manifest_path`.
#[tracing::instrument(skip(runtime, bin_dir))]
pub fn install<R: Runtime>(
    runtime: R,
    manifest_path: &Path,
    bin_dir: Option<PathBuf>,
    force: bool,
) -> Result<()> {
    let descriptor = Descriptor::load(&runtime, manifest_path)?;
    let source_root = source_root_of(manifest_path);
    let bin_dir = resolve_bin_dir(&runtime, bin_dir)?;

    let installer = Installer::new(runtime);
    installer.install(&descriptor, &source_root, &bin_dir, force)
}

/// Remove a previously installed package and its receipt.
#[tracing::instrument(skip(runtime, bin_dir))]
pub fn uninstall<R: Runtime>(
    runtime: R,
    package: &str,
    bin_dir: Option<PathBuf>,
    assume_yes: bool,
) -> Result<()> {
    let bin_dir = resolve_bin_dir(&runtime, bin_dir)?;
    let installer = Installer::new(runtime);
    installer.uninstall(package, &bin_dir, assume_yes)
}

/// List all installed packages found in the bin directory.
#[tracing::instrument(skip(runtime, bin_dir))]
pub fn list<R: Runtime>(runtime: R, bin_dir: Option<PathBuf>) -> Result<()> {
    let bin_dir = resolve_bin_dir(&runtime, bin_dir)?;

    debug!("Listing packages from {:?}", bin_dir);

    let receipts = find_all_receipts(&runtime, &bin_dir)?;
    if receipts.is_empty() {
        println!("No packages installed.");
        return Ok(());
    }

    for receipt_path in receipts {
        match Receipt::load(&runtime, &receipt_path) {
            Ok(receipt) => {
                println!(
                    "{} {} ({} command(s))",
                    receipt.package,
                    receipt.version,
                    receipt.commands.len()
                );
            }
            Err(e) => {
                debug!("Failed to load receipt {:?}: {}", receipt_path, e);
            }
        }
    }

    Ok(())
}

/// Validate a manifest without installing anything: well-formed fields and
/// every declared script present in the source tree.
#[tracing::instrument(skip(runtime))]
pub fn check<R: Runtime>(runtime: R, manifest_path: &Path) -> Result<()> {
    let descriptor = Descriptor::load(&runtime, manifest_path)?;
    descriptor.validate()?;

    let source_root = source_root_of(manifest_path);
    for script in &descriptor.scripts {
        let source = source_root.join(script);
        if !runtime.exists(&source) {
            return Err(InstallError::MissingScriptFile { path: source }.into());
        }
    }

    println!(
        "{} {} ok ({} script(s))",
        descriptor.name,
        descriptor.version,
        descriptor.scripts.len()
    );
    Ok(())
}

/// Print the descriptor's literal configuration.
#[tracing::instrument(skip(runtime))]
pub fn show<R: Runtime>(runtime: R, manifest_path: &Path) -> Result<()> {
    let descriptor = Descriptor::load(&runtime, manifest_path)?;

    println!("name:        {}", descriptor.name);
    println!("version:     {}", descriptor.version);
    if let Some(description) = &descriptor.description {
        println!("description: {}", description);
    }
    match (&descriptor.author, &descriptor.author_email) {
        (Some(author), Some(email)) => println!("author:      {} <{}>", author, email),
        (Some(author), None) => println!("author:      {}", author),
        (None, Some(email)) => println!("author:      <{}>", email),
        (None, None) => {}
    }
    if let Some(url) = &descriptor.url {
        println!("url:         {}", url);
    }
    println!("scripts:     {}", descriptor.scripts.join(", "));
    for classifier in &descriptor.classifiers {
        println!("classifier:  {}", classifier);
    }

    Ok(())
}

/// Scripts are declared relative to the manifest's directory.
fn source_root_of(manifest_path: &Path) -> PathBuf {
    match manifest_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn resolve_bin_dir<R: Runtime>(runtime: &R, bin_dir: Option<PathBuf>) -> Result<PathBuf> {
    match bin_dir {
        Some(path) => Ok(path),
        None => default_bin_dir(runtime),
    }
}

pub struct Installer<R: Runtime> {
    pub runtime: R,
}

impl<R: Runtime> Installer<R> {
    pub fn new(runtime: R) -> Self {
        Self { runtime }
    }

    #[tracing::instrument(skip(self, descriptor, source_root, bin_dir))]
    pub fn install(
        &self,
        descriptor: &Descriptor,
        source_root: &Path,
        bin_dir: &Path,
        force: bool,
    ) -> Result<()> {
        descriptor.validate()?;

        // Preflight: every declared script must exist before anything is
        // written. A missing script leaves the bin directory untouched.
        let mut planned: Vec<(PathBuf, String)> = Vec::new();
        for script in &descriptor.scripts {
            let source = source_root.join(script);
            if !self.runtime.exists(&source) {
                return Err(InstallError::MissingScriptFile { path: source }.into());
            }
            planned.push((source, command_name(script)?.to_string()));
        }

        let receipt_path = Receipt::path_for(bin_dir, &descriptor.name);
        let previous = self.load_previous_receipt(&receipt_path);

        // Collision pass, also before the first write. A command file we put
        // there ourselves is always overwritable; anything else needs --force.
        for (_, command) in &planned {
            let dest = bin_dir.join(command);
            let ours = previous.as_ref().is_some_and(|r| r.owns(command));
            if self.runtime.exists(&dest) && !ours && !force {
                return Err(InstallError::NameCollision {
                    command: command.clone(),
                    path: dest,
                }
                .into());
            }
        }

        self.runtime
            .create_dir_all(bin_dir)
            .map_err(|e| classify_fs_error(e, bin_dir))?;

        println!("  installing {} {}", descriptor.name, descriptor.version);
        for (source, command) in &planned {
            self.install_command(source, bin_dir, command)?;
        }

        // Commands present in the previous receipt but dropped from the
        // manifest are stale copies of ours; remove them.
        if let Some(previous) = &previous {
            for old in &previous.commands {
                if planned.iter().any(|(_, command)| command == old) {
                    continue;
                }
                let dest = bin_dir.join(old);
                if self.runtime.exists(&dest) {
                    debug!("Removing stale command {:?}", dest);
                    if let Err(e) = self.runtime.remove_file(&dest) {
                        warn!("Failed to remove stale command {:?}: {}", dest, e);
                    }
                }
            }
        }

        let receipt = Receipt {
            package: descriptor.name.clone(),
            version: descriptor.version.clone(),
            commands: planned.iter().map(|(_, command)| command.clone()).collect(),
        };
        receipt
            .save(&self.runtime, &receipt_path)
            .context("Failed to save install receipt")?;

        println!(
            "   installed {} {} -> {}",
            descriptor.name,
            descriptor.version,
            bin_dir.display()
        );
        Ok(())
    }

    #[tracing::instrument(skip(self, bin_dir))]
    pub fn uninstall(&self, package: &str, bin_dir: &Path, assume_yes: bool) -> Result<()> {
        let receipt_path = Receipt::path_for(bin_dir, package);
        if !self.runtime.exists(&receipt_path) {
            bail!("Package {} is not installed in {}", package, bin_dir.display());
        }
        let receipt = Receipt::load(&self.runtime, &receipt_path)?;

        if !assume_yes {
            let prompt = format!(
                "Uninstall {} {} ({} command(s))?",
                receipt.package,
                receipt.version,
                receipt.commands.len()
            );
            if !self.runtime.confirm(&prompt)? {
                println!("Aborted.");
                return Ok(());
            }
        }

        for command in &receipt.commands {
            let dest = bin_dir.join(command);
            if self.runtime.exists(&dest) {
                self.runtime.remove_file(&dest)?;
                info!("Removed command {:?}", dest);
            } else {
                debug!("Command {:?} already gone, skipping", dest);
            }
        }
        self.runtime.remove_file(&receipt_path)?;

        println!(" uninstalled {} {}", receipt.package, receipt.version);
        Ok(())
    }

    fn load_previous_receipt(&self, receipt_path: &Path) -> Option<Receipt> {
        if !self.runtime.exists(receipt_path) {
            return None;
        }
        match Receipt::load(&self.runtime, receipt_path) {
            Ok(receipt) => Some(receipt),
            Err(e) => {
                warn!(
                    "Ignoring unreadable receipt {:?}: {}. Treating as fresh install.",
                    receipt_path, e
                );
                None
            }
        }
    }

    /// Copy one script into place: temp file, executable bit, rename over
    /// whatever was there before.
    #[tracing::instrument(skip(self, source, bin_dir))]
    fn install_command(&self, source: &Path, bin_dir: &Path, command: &str) -> Result<()> {
        let dest = bin_dir.join(command);
        let tmp = bin_dir.join(format!(".{}.tmp", command));

        debug!("Copying {:?} -> {:?}", source, dest);
        self.runtime
            .copy(source, &tmp)
            .map_err(|e| classify_fs_error(e, &tmp))?;
        self.runtime.set_permissions(&tmp, 0o755)?;

        if let Err(e) = self.runtime.rename(&tmp, &dest) {
            let _ = self.runtime.remove_file(&tmp);
            return Err(classify_fs_error(e, &dest));
        }

        info!("Installed command {:?}", dest);
        Ok(())
    }
}
