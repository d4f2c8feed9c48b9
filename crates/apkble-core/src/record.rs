//! The record produced for every UUID found in decompiled source.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A UUID literal together with the variable it was assigned to
/// and the source file it appeared in.
///
/// `variable` is recovered heuristically from the token preceding the
/// first `=` on the line, so it may be a keyword, an expression fragment,
/// or empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UuidRecord {
    uuid: String,
    variable: String,
    path: String,
}

impl UuidRecord {
    /// Creates a new record
    pub fn new(
        uuid: impl Into<String>,
        variable: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            uuid: uuid.into(),
            variable: variable.into(),
            path: path.into(),
        }
    }

    /// The matched UUID text, as written in the source
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// Best-effort name of the variable the UUID was assigned to
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Path of the source file, relative to the `sources` root when known
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the record as a plain `{uuid, variable, path}` mapping
    pub fn to_map(&self) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("uuid", self.uuid.clone()),
            ("variable", self.variable.clone()),
            ("path", self.path.clone()),
        ])
    }
}

impl fmt::Display for UuidRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.uuid, self.variable, self.path)
    }
}
