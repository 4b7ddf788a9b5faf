use serde::Serialize;

use crate::domain::fields::{leading_int, split_columns, table_rows};

/// Columns of `squeue -o "%i %j %u %t %M %D %C %P %R"`; the last one is free text.
const QUEUE_COLUMNS: usize = 9;
const REQUIRED_COLUMNS: usize = 8;

/// One job of the queue listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Job {
    pub job_id: String,
    pub name: String,
    pub user: String,
    pub state: String,
    pub time: String,
    pub nodes: i64,
    pub cpus: i64,
    pub partition: String,
    pub reason: String,
}

impl Job {
    pub fn from_row(row: &str) -> Option<Self> {
        let columns = split_columns(row, QUEUE_COLUMNS);
        if columns.len() < REQUIRED_COLUMNS {
            return None;
        }

        Some(Job {
            job_id: columns[0].to_string(),
            name: columns[1].to_string(),
            user: columns[2].to_string(),
            state: columns[3].to_string(),
            time: columns[4].to_string(),
            nodes: leading_int(columns[5]),
            cpus: leading_int(columns[6]),
            partition: columns[7].to_string(),
            reason: columns.get(8).map(|reason| reason.to_string()).unwrap_or_default(),
        })
    }

    pub fn is_running(&self) -> bool {
        self.state == "R"
    }

    pub fn is_pending(&self) -> bool {
        self.state == "PD"
    }
}

/// Parses squeue output. The header line is skipped and rows with fewer than eight columns are dropped.
pub fn parse_queue(text: &str) -> Vec<Job> {
    let mut jobs = Vec::new();

    for row in table_rows(text) {
        match Job::from_row(row) {
            Some(job) => jobs.push(job),
            None => log::debug!("Dropping queue row with fewer than {} columns: {:?}", REQUIRED_COLUMNS, row),
        }
    }

    log::debug!("Parsed {} job(s) from queue listing.", jobs.len());
    jobs
}
