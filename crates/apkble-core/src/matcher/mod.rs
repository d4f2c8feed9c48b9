//! Line-oriented UUID matching over decompiled source.
//!
//! This is pattern matching, not parsing. Each line is handled on its own:
//!
//! 1. Find the leftmost non-nil UUID-shaped substring; lines without one are skipped
//! 2. Require an `=` on the line; lines without one are skipped even if they hold a UUID
//! 3. Take the last whitespace-delimited token before the first `=` as the variable name
//! 4. Emit one [`UuidRecord`] for the line
//!
//! Only the first UUID on a line is reported. Array initializers holding
//! several literals therefore yield a single record.

mod pattern;

use crate::error::{Error, Result};
use crate::record::UuidRecord;
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, trace};

pub use pattern::{find_uuid, NIL_UUID, UUID_PATTERN};

/// Returns the UUID-shaped substring a line would be reported with, if any.
pub fn match_line_for_uuid(line: &str) -> Option<&str> {
    find_uuid(line).map(|uuid| uuid.trim_matches('"'))
}

/// Recovers the assigned variable name from a line.
///
/// Returns `None` when the line has no `=`. A blank left-hand side gives
/// an empty name rather than `None`.
pub fn variable_name(line: &str) -> Option<&str> {
    let (lhs, _) = line.split_once('=')?;
    Some(lhs.split_whitespace().last().unwrap_or_default())
}

/// Matches a single line, tagging the record with `path`.
pub fn match_line(line: &str, path: &str) -> Option<UuidRecord> {
    let uuid = match_line_for_uuid(line)?;
    let Some(variable) = variable_name(line) else {
        trace!("UUID {} without assignment, skipping line", uuid);
        return None;
    };
    Some(UuidRecord::new(uuid, variable, path))
}

/// Scans already-loaded source text.
///
/// Lines end at `\n`, `\r\n` or a lone `\r`.
pub fn scan_source(text: &str, path: &str) -> Vec<UuidRecord> {
    // `\r\n` leaves an empty piece behind, which never holds a UUID.
    text.split(|c: char| c == '\n' || c == '\r')
        .filter_map(|line| match_line(line, path))
        .inspect(|record| debug!("Found {} -> {} in {}", record.uuid(), record.variable(), path))
        .collect()
}

/// Scans a source file line by line.
///
/// Records are tagged with `relative_path` when given, otherwise with
/// `file_path` as written. Invalid UTF-8 is replaced rather than rejected.
pub fn scan_file(
    file_path: impl AsRef<Path>,
    relative_path: Option<&str>,
) -> Result<Vec<UuidRecord>> {
    let file_path = file_path.as_ref();
    let data = std::fs::read(file_path).map_err(|e| Error::file_read(file_path, e))?;
    let text = String::from_utf8_lossy(&data);

    let path = relative_path
        .map(Cow::Borrowed)
        .unwrap_or_else(|| file_path.to_string_lossy());

    Ok(scan_source(&text, &path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const HEART_RATE: &str = "0000180d-0000-1000-8000-00805f9b34fb";

    #[test]
    fn test_constant_declaration() {
        let line = r#"public static final String SERVICE_UUID = "0000180d-0000-1000-8000-00805f9b34fb";"#;
        assert_eq!(
            match_line(line, "com/example/Ble.java"),
            Some(UuidRecord::new(HEART_RATE, "SERVICE_UUID", "com/example/Ble.java"))
        );
    }

    #[test]
    fn test_nil_uuid_line_is_ignored() {
        let line = r#"UUID x = UUID.fromString("00000000-0000-0000-0000-000000000000");"#;
        assert_eq!(match_line(line, "A.java"), None);
    }

    #[test]
    fn test_line_without_assignment_is_ignored() {
        let line = r#"gatt.getService(UUID.fromString("0000180d-0000-1000-8000-00805f9b34fb"));"#;
        assert_eq!(match_line_for_uuid(line), Some(HEART_RATE));
        assert_eq!(match_line(line, "A.java"), None);
    }

    #[test]
    fn test_variable_is_last_token_before_first_equals() {
        assert_eq!(variable_name("  private UUID  mService = x"), Some("mService"));
        assert_eq!(variable_name("a = b = c"), Some("a"));
        assert_eq!(variable_name("if (x == y)"), Some("(x"));
        assert_eq!(variable_name("no assignment"), None);
    }

    #[test]
    fn test_blank_left_hand_side_gives_empty_variable() {
        let line = r#"= "0000180d-0000-1000-8000-00805f9b34fb""#;
        let record = match_line(line, "A.java").unwrap();
        assert_eq!(record.variable(), "");
        assert_eq!(record.uuid(), HEART_RATE);
    }

    #[test]
    fn test_equals_after_uuid_still_counts() {
        let line = r#"check("0000180d-0000-1000-8000-00805f9b34fb") == true"#;
        let record = match_line(line, "A.java").unwrap();
        assert_eq!(record.variable(), r#"check("0000180d-0000-1000-8000-00805f9b34fb")"#);
    }

    #[test]
    fn test_one_record_per_line() {
        let line = r#"static final String[] IDS = {"0000180d-0000-1000-8000-00805f9b34fb", "00002a37-0000-1000-8000-00805f9b34fb"};"#;
        let records = scan_source(line, "A.java");
        assert_eq!(records, vec![UuidRecord::new(HEART_RATE, "IDS", "A.java")]);
    }

    #[test]
    fn test_scan_source_multiple_lines() {
        let text = "class A {\r\n\
            static final UUID S = UUID.fromString(\"0000180d-0000-1000-8000-00805f9b34fb\");\r\n\
            static final UUID C = UUID.fromString(\"00002A37-0000-1000-8000-00805F9B34FB\");\r\n\
            void f() { use(\"00002a38-0000-1000-8000-00805f9b34fb\"); }\r\n\
            }\r\n";
        let records = scan_source(text, "A.java");
        assert_eq!(
            records,
            vec![
                UuidRecord::new(HEART_RATE, "S", "A.java"),
                UuidRecord::new("00002A37-0000-1000-8000-00805F9B34FB", "C", "A.java"),
            ]
        );
    }

    #[test]
    fn test_scan_source_carriage_return_line_endings() {
        let text = "String A = \"0000180d-0000-1000-8000-00805f9b34fb\";\r\
            String B = \"00002a37-0000-1000-8000-00805f9b34fb\";\r";
        let records = scan_source(text, "Mac.java");
        assert_eq!(
            records,
            vec![
                UuidRecord::new(HEART_RATE, "A", "Mac.java"),
                UuidRecord::new("00002a37-0000-1000-8000-00805f9b34fb", "B", "Mac.java"),
            ]
        );
    }

    #[test]
    fn test_scan_file_path_tagging() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("Ble.java");
        fs::write(&file, format!("String s = \"{HEART_RATE}\";\n")).unwrap();

        let tagged = scan_file(&file, Some("pkg/Ble.java")).unwrap();
        assert_eq!(tagged[0].path(), "pkg/Ble.java");

        let untagged = scan_file(&file, None).unwrap();
        assert_eq!(untagged[0].path(), file.to_string_lossy());
    }

    #[test]
    fn test_scan_file_tolerates_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("Bin.java");
        let mut data = b"String s = \"".to_vec();
        data.extend_from_slice(HEART_RATE.as_bytes());
        data.extend_from_slice(b"\"; // \xff\xfe\n");
        fs::write(&file, data).unwrap();

        let records = scan_file(&file, Some("Bin.java")).unwrap();
        assert_eq!(records, vec![UuidRecord::new(HEART_RATE, "s", "Bin.java")]);
    }

    #[test]
    fn test_scan_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = scan_file(dir.path().join("Missing.java"), None).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }
}
