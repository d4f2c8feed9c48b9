//! # apkble-core
//!
//! A library for extracting Bluetooth Low Energy UUID constants from Android
//! applications.
//!
//! This crate provides the core functionality for:
//! - Running an external decompiler (jadx) over an APK
//! - Walking the decompiled `sources` tree
//! - Matching UUID literals line by line and recovering the variable they are assigned to
//!
//! ## Architecture
//!
//! - [`decompiler`]: Subprocess invocation of the decompiler
//! - [`matcher`]: Per-line UUID matching and variable name recovery
//! - [`walker`]: Recursive traversal of the decompiled sources
//! - [`analyzer`]: Input validation and orchestration
//! - [`record`]: The [`UuidRecord`] result type
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use apkble_core::Analyzer;
//!
//! let analyzer = Analyzer::new("/usr/bin/jadx", "./app-release.apk")?;
//! for record in analyzer.analyze(None)? {
//!     println!("{} {} {}", record.uuid(), record.variable(), record.path());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Variable names come from a token heuristic, not a Java parser. Matches
//! on lines without an assignment are dropped, and only the first UUID on
//! each line is reported.

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod analyzer;
pub mod decompiler;
pub mod error;
pub mod matcher;
pub mod record;
pub mod walker;

#[cfg(test)]
mod test_support;

// Re-export primary types for convenience
pub use analyzer::Analyzer;
pub use decompiler::{decompile, output_dir_for, Decompiler, Jadx};
pub use error::{Error, ErrorCategory, InputKind, Result};
pub use matcher::{match_line_for_uuid, scan_file};
pub use record::UuidRecord;
pub use walker::{walk, ReadErrorPolicy, SourceWalker, WalkerConfig};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
