use std::fmt;

use crate::domain::config::DashboardConfig;
use crate::domain::slurm::command::CommandSpec;

/// The three status polls behind the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlurmCommand {
    /// Node inventory, one `Key=Value` line per node.
    Nodes,
    /// Partition table with a header line.
    Partitions,
    /// Queue table with a header line.
    Queue,
}

impl SlurmCommand {
    pub fn spec<'a>(&self, config: &'a DashboardConfig) -> &'a CommandSpec {
        match self {
            Self::Nodes => &config.node_command,
            Self::Partitions => &config.partition_command,
            Self::Queue => &config.queue_command,
        }
    }
}

impl fmt::Display for SlurmCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nodes => write!(f, "node inventory"),
            Self::Partitions => write!(f, "partition inventory"),
            Self::Queue => write!(f, "job queue"),
        }
    }
}
