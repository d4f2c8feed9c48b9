//! The UUID text pattern.
//!
//! Matches the canonical 8-4-4-4-12 grouping of hex digits in either case.
//! The nil UUID is rejected at the position where it starts, and the search
//! resumes one character later, so a line holding the nil UUID followed by
//! a real one still yields the real one.

use regex::Regex;
use std::sync::OnceLock;

/// Grouped hex digits of a UUID, without anchors
pub const UUID_PATTERN: &str =
    "[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}";

/// The all-zero placeholder UUID, never reported
pub const NIL_UUID: &str = "00000000-0000-0000-0000-000000000000";

fn uuid_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(UUID_PATTERN).expect("UUID pattern compiles"))
}

/// Returns the leftmost UUID-shaped substring of `text` that is not the nil UUID.
pub fn find_uuid(text: &str) -> Option<&str> {
    let re = uuid_regex();
    let mut start = 0;
    loop {
        let found = re.find_at(text, start)?;
        if found.as_str() != NIL_UUID {
            return Some(found.as_str());
        }
        // Matches begin with an ASCII hex digit, so the next byte is a char boundary.
        start = found.start() + 1;
    }
}
