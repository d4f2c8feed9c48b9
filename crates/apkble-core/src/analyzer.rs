//! Entry point tying decompilation and source scanning together.

use crate::decompiler::{Decompiler, Jadx};
use crate::error::{Error, InputKind, Result};
use crate::record::UuidRecord;
use crate::walker::{SourceWalker, WalkerConfig};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

/// Extracts BLE UUID candidates from one APK.
///
/// Construction validates both inputs up front, so every error returned
/// later comes from running the decompiler or reading its output.
pub struct Analyzer {
    decompiler_path: PathBuf,
    apk_path: PathBuf,
    decompiler: Box<dyn Decompiler>,
    walker: SourceWalker,
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("decompiler_path", &self.decompiler_path)
            .field("apk_path", &self.apk_path)
            .field("walker", &self.walker)
            .finish_non_exhaustive()
    }
}

impl Analyzer {
    /// Creates an analyzer after checking that both paths are usable.
    ///
    /// Checks run in order: decompiler exists, APK exists, decompiler is a
    /// file, APK is a file, decompiler is executable.
    pub fn new(decompiler_path: impl Into<PathBuf>, apk_path: impl Into<PathBuf>) -> Result<Self> {
        let decompiler_path = decompiler_path.into();
        let apk_path = apk_path.into();

        if !decompiler_path.exists() {
            return Err(Error::not_found(InputKind::Decompiler, decompiler_path));
        }
        if !apk_path.exists() {
            return Err(Error::not_found(InputKind::Apk, apk_path));
        }
        if !decompiler_path.is_file() {
            return Err(Error::not_a_file(InputKind::Decompiler, decompiler_path));
        }
        if !apk_path.is_file() {
            return Err(Error::not_a_file(InputKind::Apk, apk_path));
        }
        if !is_executable(&decompiler_path) {
            return Err(Error::not_executable(decompiler_path));
        }

        Ok(Self {
            decompiler: Box::new(Jadx::new(&decompiler_path)),
            decompiler_path,
            apk_path,
            walker: SourceWalker::new(),
        })
    }

    /// Replaces the decompiler used when no base path is supplied
    pub fn with_decompiler(mut self, decompiler: impl Decompiler + 'static) -> Self {
        self.decompiler = Box::new(decompiler);
        self
    }

    /// Sets the configuration of the source walker
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker = SourceWalker::with_config(config);
        self
    }

    /// Path of the decompiler executable
    pub fn decompiler_path(&self) -> &Path {
        &self.decompiler_path
    }

    /// Path of the APK under analysis
    pub fn apk_path(&self) -> &Path {
        &self.apk_path
    }

    /// Decompiles the APK, unless `base_path` points at an existing
    /// decompiled project, and scans the resulting sources.
    pub fn analyze(&self, base_path: Option<&Path>) -> Result<Vec<UuidRecord>> {
        let base_path = match base_path {
            Some(path) => {
                info!("Using pre-decompiled sources at {}", path.display());
                path.to_path_buf()
            }
            None => self.decompiler.decompile(&self.apk_path)?,
        };

        self.walker.walk(&base_path)
    }
}

/// Whether the current user may execute `path`, as decided by `access(2)`.
#[cfg(unix)]
#[allow(unsafe_code)]
fn is_executable(path: &Path) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: `c_path` is a valid NUL-terminated string that outlives the call.
    unsafe { libc::access(c_path.as_ptr(), libc::X_OK) == 0 }
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
