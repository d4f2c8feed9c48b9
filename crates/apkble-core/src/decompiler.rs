//! Invocation of the external APK decompiler.
//!
//! The decompiler is run as a blocking subprocess with the contract
//! `<tool> -d <output_dir> <apk_file>`. The output directory sits next to the
//! APK and is named after it with any `.apk` suffix removed:
//!
//! ```text
//! /data/app.apk  ->  /data/app/sources/**/*.java
//! ```

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Trait for anything that can turn an APK into a decompiled source tree
pub trait Decompiler: Send + Sync {
    /// Decompile `apk` and return the project root that was written
    fn decompile(&self, apk: &Path) -> Result<PathBuf>;
}

/// Computes the output directory for an APK: a sibling named after the
/// APK's file name without its `.apk` suffix.
pub fn output_dir_for(apk: &Path) -> PathBuf {
    let name = apk
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.strip_suffix(".apk").unwrap_or(&name);
    apk.parent().unwrap_or_else(|| Path::new("")).join(stem)
}

/// The jadx command-line decompiler
#[derive(Debug, Clone)]
pub struct Jadx {
    program: PathBuf,
}

impl Jadx {
    /// Creates a decompiler that runs the executable at `program`
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Decompiler for Jadx {
    fn decompile(&self, apk: &Path) -> Result<PathBuf> {
        let output_dir = output_dir_for(apk);

        info!(
            "Decompiling {} into {}",
            apk.display(),
            output_dir.display()
        );

        let output = Command::new(&self.program)
            .arg("-d")
            .arg(&output_dir)
            .arg(apk)
            .output()
            .map_err(|e| Error::decompiler_launch(&self.program, e))?;

        for line in String::from_utf8_lossy(&output.stdout).lines() {
            debug!("{}", line);
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::decompiler_failed(
                &self.program,
                output.status.code(),
                stderr.trim(),
            ));
        }

        info!("Decompilation finished: {}", output_dir.display());
        Ok(output_dir)
    }
}

/// Decompiles `apk_path` with the tool at `tool_path`, returning the output directory.
pub fn decompile(tool_path: impl AsRef<Path>, apk_path: impl AsRef<Path>) -> Result<PathBuf> {
    Jadx::new(tool_path.as_ref()).decompile(apk_path.as_ref())
}
