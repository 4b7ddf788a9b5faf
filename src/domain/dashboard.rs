use serde::Serialize;
use std::sync::Arc;

use crate::domain::clock::{Clock, SystemClock};
use crate::domain::config::DashboardConfig;
use crate::domain::fields::saturating_sum;
use crate::domain::gpu_summary::{GpuSummary, gpu_summary};
use crate::domain::job::{Job, parse_queue};
use crate::domain::node::{Node, parse_nodes};
use crate::domain::partition::{Partition, parse_partitions};
use crate::domain::partition_summary::{PartitionSummaries, partition_summary};
use crate::domain::slurm::command::{CommandRunner, ProcessRunner, acquire};
use crate::domain::slurm::slurm_command::SlurmCommand;
use crate::error::Result;

/// Cluster wide totals, recomputed from the node and job lists of the same poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_nodes: usize,
    pub total_cpus: i64,
    pub available_cpus: i64,
    pub total_memory_mb: i64,
    pub available_memory_mb: i64,
    pub total_jobs: usize,
    pub running_jobs: usize,
    pub pending_jobs: usize,
}

impl DashboardStats {
    pub fn new(nodes: &[Node], jobs: &[Job]) -> Self {
        DashboardStats {
            total_nodes: nodes.len(),
            total_cpus: saturating_sum(nodes.iter().map(|node| node.cpus_total)),
            available_cpus: saturating_sum(nodes.iter().map(|node| node.cpus_free)),
            total_memory_mb: saturating_sum(nodes.iter().map(|node| node.memory_total)),
            available_memory_mb: saturating_sum(nodes.iter().map(|node| node.memory_free)),
            total_jobs: jobs.len(),
            running_jobs: jobs.iter().filter(|job| job.is_running()).count(),
            pending_jobs: jobs.iter().filter(|job| job.is_pending()).count(),
        }
    }
}

/// Everything the dashboard shows, taken from one poll.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    /// Unix seconds at which the poll was taken.
    pub timestamp: i64,
    pub nodes: Vec<Node>,
    pub partitions: PartitionSummaries,
    pub gpu_summary: GpuSummary,
    pub jobs: Vec<Job>,
    pub stats: DashboardStats,
}

/// Polls the Slurm status tools and turns their output into dashboard views.
///
/// Holds no state between calls; every method runs its commands again.
#[derive(Debug, Clone)]
pub struct Dashboard {
    config: DashboardConfig,
    runner: Arc<dyn CommandRunner>,
    clock: Arc<dyn Clock>,
}

impl Dashboard {
    pub fn new(config: DashboardConfig, runner: Arc<dyn CommandRunner>, clock: Arc<dyn Clock>) -> Self {
        Self { config, runner, clock }
    }

    /// Dashboard backed by real processes and the wall clock.
    pub fn with_system(config: DashboardConfig) -> Self {
        Self::new(config, Arc::new(ProcessRunner), Arc::new(SystemClock))
    }

    pub fn now_in_s(&self) -> i64 {
        self.clock.now_in_s()
    }

    fn poll(&self, command: SlurmCommand) -> Result<String> {
        log::debug!("Polling {}.", command);
        acquire(self.runner.as_ref(), command.spec(&self.config), self.config.lenient_acquisition)
    }

    pub fn nodes(&self) -> Result<Vec<Node>> {
        Ok(parse_nodes(&self.poll(SlurmCommand::Nodes)?))
    }

    pub fn partitions(&self) -> Result<Vec<Partition>> {
        Ok(parse_partitions(&self.poll(SlurmCommand::Partitions)?))
    }

    pub fn jobs(&self) -> Result<Vec<Job>> {
        Ok(parse_queue(&self.poll(SlurmCommand::Queue)?))
    }

    pub fn gpu_summary(&self) -> Result<GpuSummary> {
        Ok(gpu_summary(&self.nodes()?))
    }

    pub fn partition_summary(&self) -> Result<PartitionSummaries> {
        let nodes = self.nodes()?;
        let partitions = self.partitions()?;
        Ok(partition_summary(&partitions, &nodes, &self.config.partition_order))
    }

    /// Full snapshot. Any failed poll fails the whole snapshot.
    pub fn get_dashboard_data(&self) -> Result<DashboardSnapshot> {
        let nodes = self.nodes()?;
        let partitions = self.partitions()?;
        let jobs = self.jobs()?;

        let snapshot = DashboardSnapshot {
            timestamp: self.clock.now_in_s(),
            partitions: partition_summary(&partitions, &nodes, &self.config.partition_order),
            gpu_summary: gpu_summary(&nodes),
            stats: DashboardStats::new(&nodes, &jobs),
            nodes,
            jobs,
        };

        log::info!(
            "Dashboard snapshot: {} node(s), {} partition(s), {} GPU type(s), {} job(s).",
            snapshot.stats.total_nodes,
            snapshot.partitions.len(),
            snapshot.gpu_summary.len(),
            snapshot.stats.total_jobs
        );

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_aggregate_nodes_and_jobs() {
        let nodes = parse_nodes(
            "NodeName=a State=IDLE CPUTot=32 CPUAlloc=0 RealMemory=1000 AllocMem=0\n\
             NodeName=b State=MIXED CPUTot=32 CPUAlloc=40 RealMemory=1000 AllocMem=250\n",
        );
        let jobs = parse_queue(
            "JOBID NAME USER ST TIME NODES CPUS PARTITION NODELIST(REASON)\n\
             1 a u R 0:01 1 1 batch a\n\
             2 b u PD 0:00 1 1 batch (Priority)\n\
             3 c u CG 0:09 1 1 batch b\n",
        );

        let stats = DashboardStats::new(&nodes, &jobs);
        assert_eq!(
            stats,
            DashboardStats {
                total_nodes: 2,
                total_cpus: 64,
                available_cpus: 24,
                total_memory_mb: 2000,
                available_memory_mb: 1750,
                total_jobs: 3,
                running_jobs: 1,
                pending_jobs: 1,
            }
        );
    }

    #[test]
    fn huge_counts_saturate() {
        let nodes = parse_nodes(
            "NodeName=a State=IDLE CPUTot=9223372036854775807 RealMemory=9223372036854775807\n\
             NodeName=b State=IDLE CPUTot=9223372036854775807 RealMemory=9223372036854775807\n",
        );

        let stats = DashboardStats::new(&nodes, &[]);
        assert_eq!((stats.total_cpus, stats.available_cpus), (i64::MAX, i64::MAX));
        assert_eq!((stats.total_memory_mb, stats.available_memory_mb), (i64::MAX, i64::MAX));
    }

    #[test]
    fn empty_inputs_give_zero_stats() {
        assert_eq!(DashboardStats::new(&[], &[]), DashboardStats::default());
    }
}
