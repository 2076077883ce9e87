// User-facing messages for each command

use crate::record::{HEADER, TaskRecord};
use crate::store::{Listing, Removal};

/// Header plus one tab-separated row per task, same layout as the file
pub fn format_table(records: &[TaskRecord]) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');
    for record in records {
        out.push_str(&record.to_row());
        out.push('\n');
    }
    out
}

/// The table followed by the shortfall notice, if any
pub fn format_listing(listing: &Listing) -> String {
    let mut out = format_table(&listing.records);
    if let Some(line) = shortfall_line(listing) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

pub fn shortfall_line(listing: &Listing) -> Option<String> {
    listing.shortfall()?;
    listing.requested.map(|limit| format!("You do not have {} tasks!", limit))
}

pub fn format_added(count: usize) -> String {
    format!("{} task(s) added!", count)
}

pub fn format_removal(removal: &Removal, store_name: &str) -> String {
    match removal {
        Removal::Deleted { text, .. } => format!("Task \"{}\" successfully deleted!", text),
        Removal::NotFound { text } => format!("Task \"{}\" not in {}...", text, store_name),
    }
}

/// Body of the desktop reminder: `rank: text` per task
pub fn format_reminder(listing: &Listing) -> String {
    listing
        .records
        .iter()
        .map(|r| format!("{}: {}", r.rank, r.text))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::parse_timestamp;

    fn listing(requested: Option<usize>) -> Listing {
        Listing {
            records: vec![
                TaskRecord::new(3, 1, parse_timestamp("2019-09-23 12:57:00").unwrap(), "New task"),
                TaskRecord::new(1, 2, parse_timestamp("2019-09-20 20:56:00").unwrap(), "Old task"),
            ],
            requested,
        }
    }

    #[test]
    fn test_format_listing_with_shortfall() {
        assert_eq!(
            format_listing(&listing(Some(5))),
            "ID\tRank\tDate\tTask\n\
             3\t1\t2019-09-23 12:57:00\tNew task\n\
             1\t2\t2019-09-20 20:56:00\tOld task\n\
             You do not have 5 tasks!\n"
        );
    }

    #[test]
    fn test_format_listing_without_shortfall() {
        let out = format_listing(&listing(Some(2)));
        assert!(!out.contains("You do not have"));
        assert!(format_listing(&listing(None)).ends_with("Old task\n"));
    }

    #[test]
    fn test_format_added() {
        assert_eq!(format_added(1), "1 task(s) added!");
        assert_eq!(format_added(3), "3 task(s) added!");
    }

    #[test]
    fn test_format_removal() {
        let deleted = Removal::Deleted {
            text: "New task".to_string(),
            count: 2,
        };
        let missing = Removal::NotFound {
            text: "Nothing".to_string(),
        };
        assert_eq!(format_removal(&deleted, "TODO.tsv"), "Task \"New task\" successfully deleted!");
        assert_eq!(format_removal(&missing, "TODO.tsv"), "Task \"Nothing\" not in TODO.tsv...");
    }

    #[test]
    fn test_format_reminder() {
        assert_eq!(format_reminder(&listing(None)), "1: New task\n2: Old task");
    }
}
