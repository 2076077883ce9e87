// Task record and its row encoding

use crate::error::{Result, StoreError};
use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

/// First line of every store file
pub const HEADER: &str = "ID\tRank\tDate\tTask";

/// Field separator within a row
pub const DELIMITER: char = '\t';

/// Format of the Date column, second precision
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One task in the store
///
/// Records are immutable once written; the only way to change one is to
/// remove it and add a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRecord {
    pub id: u64,
    pub rank: i64,
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: NaiveDateTime,
    pub text: String,
}

impl TaskRecord {
    pub fn new(id: u64, rank: i64, created_at: NaiveDateTime, text: impl Into<String>) -> Self {
        Self {
            id,
            rank,
            created_at,
            text: text.into(),
        }
    }

    /// Encode as `<id>\t<rank>\t<timestamp>\t<text>` (no line terminator)
    pub fn to_row(&self) -> String {
        format!(
            "{}{d}{}{d}{}{d}{}",
            self.id,
            self.rank,
            format_timestamp(&self.created_at),
            self.text,
            d = DELIMITER
        )
    }

    /// Decode a single data row
    ///
    /// The error string names the offending field; callers attach the file
    /// path and line number.
    pub fn from_row(line: &str) -> std::result::Result<Self, String> {
        let fields: Vec<&str> = line.split(DELIMITER).collect();
        if fields.len() != 4 {
            return Err(format!("expected 4 fields, found {}", fields.len()));
        }

        let id: u64 = fields[0]
            .parse()
            .map_err(|_| format!("invalid id: {:?}", fields[0]))?;
        if id == 0 {
            return Err("id must be positive".to_string());
        }

        let rank: i64 = fields[1]
            .parse()
            .map_err(|_| format!("invalid rank: {:?}", fields[1]))?;

        let created_at = parse_timestamp(fields[2]).map_err(|_| format!("invalid date: {:?}", fields[2]))?;

        let text = fields[3];
        if text.is_empty() {
            return Err("task text is empty".to_string());
        }

        Ok(Self::new(id, rank, created_at, text))
    }
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(s: &str) -> std::result::Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
}

fn serialize_timestamp<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(ts))
}

/// Check that `text` can be stored as the Task column
pub fn validate_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(StoreError::Validation(
            "task text cannot be empty or whitespace-only".to_string(),
        ));
    }
    if text.contains(DELIMITER) {
        return Err(StoreError::Validation(format!(
            "task text cannot contain a tab: {:?}",
            text
        )));
    }
    if text.contains(['\n', '\r']) {
        return Err(StoreError::Validation(format!(
            "task text cannot contain a line break: {:?}",
            text
        )));
    }
    Ok(())
}

/// Parse a user-supplied rank
pub fn parse_rank(s: &str) -> Result<i64> {
    s.trim()
        .parse()
        .map_err(|_| StoreError::Validation(format!("rank must be an integer, got {:?}", s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        parse_timestamp(s).unwrap()
    }

    #[test]
    fn test_to_row() {
        let record = TaskRecord::new(1, 1, ts("2019-09-20 20:56:00"), "Old task");
        assert_eq!(record.to_row(), "1\t1\t2019-09-20 20:56:00\tOld task");
    }

    #[test]
    fn test_from_row() {
        let record = TaskRecord::from_row("12\t-3\t2024-01-01 00:00:00\tWater the plants").unwrap();
        assert_eq!(record.id, 12);
        assert_eq!(record.rank, -3);
        assert_eq!(record.created_at, ts("2024-01-01 00:00:00"));
        assert_eq!(record.text, "Water the plants");
        assert_eq!(record.to_row(), "12\t-3\t2024-01-01 00:00:00\tWater the plants");
    }

    #[test]
    fn test_from_row_rejects_bad_fields() {
        let err = TaskRecord::from_row("1\t1\t2024-01-01 00:00:00").unwrap_err();
        assert_eq!(err, "expected 4 fields, found 3");

        assert!(TaskRecord::from_row("x\t1\t2024-01-01 00:00:00\ttask").is_err());
        assert!(TaskRecord::from_row("0\t1\t2024-01-01 00:00:00\ttask").is_err());
        assert!(TaskRecord::from_row("1\thigh\t2024-01-01 00:00:00\ttask").is_err());
        assert!(TaskRecord::from_row("1\t1\t2024-01-01T00:00:00\ttask").is_err());
        assert!(TaskRecord::from_row("1\t1\t2024-01-01 00:00:00\t").is_err());
    }

    #[test]
    fn test_validate_text() {
        assert!(validate_text("Buy milk").is_ok());
        assert!(validate_text("  padded  ").is_ok());

        assert!(validate_text("").unwrap_err().is_validation());
        assert!(validate_text("   ").unwrap_err().is_validation());
        assert!(validate_text("a\tb").unwrap_err().is_validation());
        assert!(validate_text("a\nb").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_rank() {
        assert_eq!(parse_rank("3").unwrap(), 3);
        assert_eq!(parse_rank("-2").unwrap(), -2);
        assert!(parse_rank("high").unwrap_err().is_validation());
        assert!(parse_rank("1.5").is_err());
    }

    #[test]
    fn test_json_uses_fixed_timestamp_format() {
        let record = TaskRecord::new(2, 1, ts("2024-01-01 00:00:00"), "New task");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"id":2,"rank":1,"created_at":"2024-01-01 00:00:00","text":"New task"}"#
        );
    }
}
