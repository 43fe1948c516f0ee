//! Install receipts.
//!
//! Each installed package leaves a JSON receipt under
//! `<bin-dir>/.scriptdist/<name>.json` recording which command files it put
//! there. Receipts are what make uninstall, list, and the collision check
//! possible; a file not named in a receipt is not ours to touch.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

/// Directory inside the bin dir holding one receipt per package.
pub const RECEIPT_DIR: &str = ".scriptdist";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Receipt {
    pub package: String,
    pub version: String,
    /// Command file names installed into the bin directory.
    pub commands: Vec<String>,
}

impl Receipt {
    pub fn path_for(bin_dir: &Path, package: &str) -> PathBuf {
        bin_dir.join(RECEIPT_DIR).join(format!("{}.json", package))
    }

    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Result<Self> {
        let contents = runtime.read_to_string(path)?;
        serde_json::from_str(&contents).with_context(|| format!("Invalid receipt {:?}", path))
    }

    /// Persist atomically: write a temp file, then rename over the receipt.
    #[tracing::instrument(skip(self, runtime))]
    pub fn save<R: Runtime>(&self, runtime: &R, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            runtime.create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        let tmp_path = path.with_extension("json.tmp");
        runtime.write(&tmp_path, json.as_bytes())?;
        runtime.rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn owns(&self, command: &str) -> bool {
        self.commands.iter().any(|c| c == command)
    }
}

/// Find receipts for every installed package by scanning the receipt
/// directory for `*.json` files.
#[tracing::instrument(skip(runtime))]
pub fn find_all_receipts<R: Runtime>(runtime: &R, bin_dir: &Path) -> Result<Vec<PathBuf>> {
    let receipt_dir = bin_dir.join(RECEIPT_DIR);
    if !runtime.exists(&receipt_dir) {
        return Ok(Vec::new());
    }

    let mut receipts: Vec<PathBuf> = runtime
        .read_dir(&receipt_dir)?
        .into_iter()
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    receipts.sort();

    Ok(receipts)
}
