//! Error types for the apkble-core library.
//!
//! Every failure is terminal for the analysis run that hit it. Variants fall
//! into three categories (see [`ErrorCategory`]) so callers can tell a bad
//! input apart from a failed decompiler run or an unreadable source file.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for apkble operations
pub type Result<T> = std::result::Result<T, Error>;

/// Which of the two analyzer inputs a precondition error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// The decompiler executable
    Decompiler,
    /// The APK under analysis
    Apk,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decompiler => f.write_str("decompiler"),
            Self::Apk => f.write_str("apk"),
        }
    }
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// An input path is missing, not a regular file, or not executable
    Precondition,
    /// The external decompiler could not be launched or exited non-zero
    Execution,
    /// A file or directory could not be read while scanning
    Io,
}

/// Error type for all apkble operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// An input path does not exist
    #[error("{input} path does not exist: '{path}'")]
    NotFound {
        /// Which input was missing
        input: InputKind,
        /// The offending path
        path: PathBuf,
    },

    /// An input path exists but is not a regular file
    #[error("{input} path is not a file: '{path}'")]
    NotAFile {
        /// Which input was wrong
        input: InputKind,
        /// The offending path
        path: PathBuf,
    },

    /// The decompiler path is not executable by the current user
    #[error("decompiler path is not executable: '{path}'")]
    NotExecutable {
        /// The offending path
        path: PathBuf,
    },

    /// The decompiler process could not be started
    #[error("failed to launch decompiler '{program}': {source}")]
    DecompilerLaunch {
        /// Program that was invoked
        program: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The decompiler ran but reported failure
    #[error("decompiler '{program}' failed with {status}: {stderr}", status = exit_code_display(.code))]
    DecompilerFailed {
        /// Program that was invoked
        program: PathBuf,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
        /// Captured standard error, trimmed
        stderr: String,
    },

    /// Failed to read a source file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to traverse the source tree
    #[error("failed to walk directory '{path}': {source}")]
    Walk {
        /// Root of the traversal
        path: PathBuf,
        /// Underlying traversal error
        #[source]
        source: walkdir::Error,
    },
}

fn exit_code_display(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

impl Error {
    /// Creates a new missing-path error
    pub fn not_found(input: InputKind, path: impl Into<PathBuf>) -> Self {
        Self::NotFound {
            input,
            path: path.into(),
        }
    }

    /// Creates a new not-a-file error
    pub fn not_a_file(input: InputKind, path: impl Into<PathBuf>) -> Self {
        Self::NotAFile {
            input,
            path: path.into(),
        }
    }

    /// Creates a new not-executable error
    pub fn not_executable(path: impl Into<PathBuf>) -> Self {
        Self::NotExecutable { path: path.into() }
    }

    /// Creates a new decompiler launch error
    pub fn decompiler_launch(program: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DecompilerLaunch {
            program: program.into(),
            source,
        }
    }

    /// Creates a new decompiler failure error
    pub fn decompiler_failed(
        program: impl Into<PathBuf>,
        code: Option<i32>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::DecompilerFailed {
            program: program.into(),
            code,
            stderr: stderr.into(),
        }
    }

    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new traversal error
    pub fn walk(path: impl Into<PathBuf>, source: walkdir::Error) -> Self {
        Self::Walk {
            path: path.into(),
            source,
        }
    }

    /// Returns which category of failure this is
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } | Self::NotAFile { .. } | Self::NotExecutable { .. } => {
                ErrorCategory::Precondition
            }
            Self::DecompilerLaunch { .. } | Self::DecompilerFailed { .. } => {
                ErrorCategory::Execution
            }
            Self::FileRead { .. } | Self::Walk { .. } => ErrorCategory::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::not_found(InputKind::Apk, "/tmp/missing.apk");
        assert!(err.to_string().contains("apk path does not exist"));
        assert!(err.to_string().contains("/tmp/missing.apk"));

        let err = Error::decompiler_failed("/usr/bin/jadx", Some(2), "bad input");
        assert_eq!(
            err.to_string(),
            "decompiler '/usr/bin/jadx' failed with exit code 2: bad input"
        );
    }

    #[test]
    fn test_signal_termination_display() {
        let err = Error::decompiler_failed("jadx", None, "");
        assert!(err.to_string().contains("terminated by signal"));
    }

    #[test]
    fn test_category() {
        assert_eq!(
            Error::not_found(InputKind::Decompiler, "x").category(),
            ErrorCategory::Precondition
        );
        assert_eq!(
            Error::not_a_file(InputKind::Apk, "x").category(),
            ErrorCategory::Precondition
        );
        assert_eq!(
            Error::not_executable("x").category(),
            ErrorCategory::Precondition
        );
        assert_eq!(
            Error::decompiler_failed("x", Some(1), "").category(),
            ErrorCategory::Execution
        );
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(
            Error::decompiler_launch("x", io).category(),
            ErrorCategory::Execution
        );
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(Error::file_read("x", io).category(), ErrorCategory::Io);
    }
}
