//! Recursive traversal of a decompiled source tree.
//!
//! The walker descends into `<project_root>/<sources_dir>`, scans every file
//! carrying the configured extension, and concatenates the records in
//! traversal order. Paths in the records are relative to the sources root.

use crate::error::{Error, Result};
use crate::matcher::scan_file;
use crate::record::UuidRecord;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};
use walkdir::WalkDir;

/// Subdirectory of a decompiled project holding the source files
pub const DEFAULT_SOURCES_DIR: &str = "sources";

/// Extension of the source files that are scanned
pub const DEFAULT_EXTENSION: &str = "java";

/// What to do when a source file cannot be read during a walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadErrorPolicy {
    /// Abort the walk with the error
    #[default]
    Abort,
    /// Log a warning and continue with the remaining files
    Skip,
}

/// Configuration for the source tree walker
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Name of the sources subdirectory below the project root
    pub sources_dir: String,
    /// File extension to scan, without the leading dot
    pub extension: String,
    /// Follow symbolic links while descending
    pub follow_links: bool,
    /// Behavior on unreadable entries
    pub on_read_error: ReadErrorPolicy,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            sources_dir: DEFAULT_SOURCES_DIR.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            follow_links: false,
            on_read_error: ReadErrorPolicy::Abort,
        }
    }
}

impl WalkerConfig {
    /// Creates a new walker config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sources subdirectory name
    pub fn sources_dir(mut self, dir: impl Into<String>) -> Self {
        self.sources_dir = dir.into();
        self
    }

    /// Sets the scanned file extension
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// Sets whether symbolic links are followed
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Sets the read error policy
    pub fn on_read_error(mut self, policy: ReadErrorPolicy) -> Self {
        self.on_read_error = policy;
        self
    }
}

/// Walks decompiled projects and collects UUID records
#[derive(Debug, Clone, Default)]
pub struct SourceWalker {
    config: WalkerConfig,
}

impl SourceWalker {
    /// Creates a new walker with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new walker with custom configuration
    pub fn with_config(config: WalkerConfig) -> Self {
        Self { config }
    }

    /// Returns the sources root for a decompiled project
    pub fn sources_root(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.config.sources_dir)
    }

    fn is_source_file(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.ends_with(&format!(".{}", self.config.extension)))
            .unwrap_or(false)
    }

    /// Applies the read error policy, returning the error when aborting
    fn handle(&self, err: Error) -> Result<()> {
        match self.config.on_read_error {
            ReadErrorPolicy::Abort => Err(err),
            ReadErrorPolicy::Skip => {
                warn!("Skipping unreadable entry: {}", err);
                Ok(())
            }
        }
    }

    /// Scans every matching file under `<project_root>/<sources_dir>`.
    ///
    /// A missing sources directory yields no records, as does a directory
    /// that cannot be listed. Only failures on source files themselves go
    /// through the [`ReadErrorPolicy`].
    pub fn walk(&self, project_root: impl AsRef<Path>) -> Result<Vec<UuidRecord>> {
        let sources = self.sources_root(project_root.as_ref());
        let mut records = Vec::new();
        let mut files_scanned = 0usize;

        if !sources.is_dir() {
            info!("No sources directory at {}", sources.display());
            return Ok(records);
        }

        debug!("Walking {}", sources.display());

        for entry in WalkDir::new(&sources).follow_links(self.config.follow_links) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.path().is_some_and(|p| self.is_source_file(p)) => {
                    self.handle(Error::walk(&sources, e))?;
                    continue;
                }
                Err(e) => {
                    warn!("Skipping unlistable directory entry: {}", e);
                    continue;
                }
            };

            // Symlinks to files are scanned even when links are not followed.
            let path = entry.path();
            if entry.file_type().is_dir() || path.is_dir() {
                continue;
            }

            if !self.is_source_file(path) {
                trace!("Skipping non-source file: {}", path.display());
                continue;
            }

            let relative = path.strip_prefix(&sources).unwrap_or(path);
            let relative = relative.to_string_lossy();

            match scan_file(path, Some(&*relative)) {
                Ok(found) => {
                    debug!("Scanned {}: {} record(s)", relative, found.len());
                    records.extend(found);
                    files_scanned += 1;
                }
                Err(e) => self.handle(e)?,
            }
        }

        info!(
            "Walk complete: {} file(s) scanned, {} record(s) found",
            files_scanned,
            records.len()
        );
        Ok(records)
    }
}

/// Walks a decompiled project with the default configuration.
pub fn walk(project_root: impl AsRef<Path>) -> Result<Vec<UuidRecord>> {
    SourceWalker::new().walk(project_root)
}
