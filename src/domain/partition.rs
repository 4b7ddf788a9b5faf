use serde::Serialize;

use crate::domain::fields::{leading_int, split_columns, table_rows};

const DEFAULT_MARKER: char = '*';
const PARTITION_COLUMNS: usize = 5;

/// One row of `sinfo -o "%P %a %l %D %t"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Partition {
    pub name: String,
    pub is_default: bool,
    pub available: bool,
    pub time_limit: String,
    pub nodes_count: i64,
    pub state: String,
}

impl Partition {
    /// `None` when the row has fewer than five columns.
    pub fn from_row(row: &str) -> Option<Self> {
        let columns = split_columns(row, usize::MAX);
        if columns.len() < PARTITION_COLUMNS {
            return None;
        }

        let raw_name = columns[0];
        let name = raw_name.trim_end_matches(DEFAULT_MARKER);

        Some(Partition {
            name: name.to_string(),
            is_default: name.len() != raw_name.len(),
            available: columns[1] == "up",
            time_limit: columns[2].to_string(),
            nodes_count: leading_int(columns[3]),
            state: columns[4].to_string(),
        })
    }
}

/// Parses sinfo output. The header line is skipped and short rows are dropped.
pub fn parse_partitions(text: &str) -> Vec<Partition> {
    let mut partitions = Vec::new();

    for row in table_rows(text) {
        match Partition::from_row(row) {
            Some(partition) => partitions.push(partition),
            None => log::debug!("Dropping partition row with fewer than {} columns: {:?}", PARTITION_COLUMNS, row),
        }
    }

    log::debug!("Parsed {} partition row(s).", partitions.len());
    partitions
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINFO: &str = "PARTITION AVAIL TIMELIMIT NODES STATE\n\
        batch* up 7-00:00:00 12 mix\n\
        batch* up 7-00:00:00 3 idle\n\
        gpu up 2-00:00:00 4 alloc\n\
        lab_smith down infinite 2 down*\n\
        broken up 1:00:00\n";

    #[test]
    fn header_is_skipped_and_rows_keep_order() {
        let partitions = parse_partitions(SINFO);
        let names: Vec<&str> = partitions.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["batch", "batch", "gpu", "lab_smith"]);
    }

    #[test]
    fn default_marker_is_stripped() {
        let partition = Partition::from_row("batch* up 7-00:00:00 12 mix").unwrap();
        assert_eq!(partition.name, "batch");
        assert!(partition.is_default);

        let partition = Partition::from_row("gpu up 2-00:00:00 4 alloc").unwrap();
        assert_eq!(partition.name, "gpu");
        assert!(!partition.is_default);
    }

    #[test]
    fn availability_is_a_strict_match_on_up() {
        for (avail, expected) in [("up", true), ("down", false), ("UP", false), ("drain", false), ("inact", false)] {
            let partition = Partition::from_row(&format!("p {} infinite 1 idle", avail)).unwrap();
            assert_eq!(partition.available, expected, "avail {}", avail);
        }
    }

    #[test]
    fn fields_are_passed_through() {
        let partition = Partition::from_row("lab_smith down infinite 2 down*").unwrap();
        assert_eq!(partition.time_limit, "infinite");
        assert_eq!(partition.nodes_count, 2);
        assert_eq!(partition.state, "down*");
    }

    #[test]
    fn short_rows_are_dropped() {
        assert_eq!(Partition::from_row("broken up 1:00:00"), None);
        assert_eq!(Partition::from_row(""), None);
    }

    #[test]
    fn empty_or_header_only_input_gives_no_partitions() {
        assert!(parse_partitions("").is_empty());
        assert!(parse_partitions("PARTITION AVAIL TIMELIMIT NODES STATE\n").is_empty());
    }
}
