// Read-time ordering of listed tasks

use crate::record::TaskRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// How `list_tasks` orders its result
///
/// Sorting is a projection over the loaded records; the file keeps
/// insertion order. Every key sorts ascending and falls back to insertion
/// order on ties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    None,
    Rank,
    Date,
    Both,
}

impl SortKey {
    pub fn apply(self, records: &mut [TaskRecord]) {
        match self {
            SortKey::None => {}
            SortKey::Rank | SortKey::Both => records.sort_by(by_rank_then_date),
            SortKey::Date => records.sort_by_key(|r| r.created_at),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::None => "none",
            SortKey::Rank => "rank",
            SortKey::Date => "date",
            SortKey::Both => "both",
        }
    }
}

fn by_rank_then_date(a: &TaskRecord, b: &TaskRecord) -> Ordering {
    a.rank.cmp(&b.rank).then(a.created_at.cmp(&b.created_at))
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(SortKey::None),
            "rank" => Ok(SortKey::Rank),
            "date" => Ok(SortKey::Date),
            "both" => Ok(SortKey::Both),
            other => Err(format!("unknown sort key: {other} (expected none, rank, date or both)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::parse_timestamp;

    fn record(id: u64, rank: i64, date: &str) -> TaskRecord {
        TaskRecord::new(id, rank, parse_timestamp(date).unwrap(), format!("task {id}"))
    }

    fn ids(records: &[TaskRecord]) -> Vec<u64> {
        records.iter().map(|r| r.id).collect()
    }

    fn sample() -> Vec<TaskRecord> {
        vec![
            record(1, 2, "2019-09-20 20:56:00"),
            record(2, 1, "2019-09-24 12:57:00"),
            record(3, 1, "2019-09-23 12:57:00"),
            record(4, 1, "2019-09-23 12:57:00"),
            record(5, 2, "2019-09-19 08:00:00"),
        ]
    }

    #[test]
    fn test_sort_none_keeps_insertion_order() {
        let mut records = sample();
        SortKey::None.apply(&mut records);
        assert_eq!(ids(&records), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_sort_rank_breaks_ties_by_date_then_insertion() {
        let mut records = sample();
        SortKey::Rank.apply(&mut records);
        assert_eq!(ids(&records), vec![3, 4, 2, 5, 1]);
    }

    #[test]
    fn test_sort_both_matches_rank() {
        let mut by_rank = sample();
        let mut by_both = sample();
        SortKey::Rank.apply(&mut by_rank);
        SortKey::Both.apply(&mut by_both);
        assert_eq!(by_rank, by_both);
    }

    #[test]
    fn test_sort_date_is_stable() {
        let mut records = sample();
        SortKey::Date.apply(&mut records);
        assert_eq!(ids(&records), vec![5, 1, 3, 4, 2]);
    }

    #[test]
    fn test_sort_key_parse_and_display() {
        assert_eq!("rank".parse::<SortKey>().unwrap(), SortKey::Rank);
        assert_eq!("BOTH".parse::<SortKey>().unwrap(), SortKey::Both);
        assert!("priority".parse::<SortKey>().is_err());
        assert_eq!(SortKey::Date.to_string(), "date");
        assert_eq!(SortKey::default(), SortKey::None);
    }
}
