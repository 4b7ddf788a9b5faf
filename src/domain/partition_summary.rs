use serde::Serialize;
use std::cmp::Ordering;

use crate::domain::fields::saturating_sum;
use crate::domain::keyed_map::KeyedMap;
use crate::domain::node::{Node, NodeStatus};
use crate::domain::partition::Partition;

/// Capacity rollup of one partition over the nodes that belong to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartitionSummary {
    pub total_nodes: usize,
    pub idle_nodes: usize,
    pub mixed_nodes: usize,
    pub allocated_nodes: usize,
    pub down_nodes: usize,
    pub total_cpus: i64,
    pub available_cpus: i64,
    pub has_gpu: bool,
    pub time_limit: String,
    pub is_default: bool,
}

impl PartitionSummary {
    pub fn new(partition: &Partition, nodes: &[Node]) -> Self {
        let members: Vec<&Node> = nodes.iter().filter(|node| node.in_partition(&partition.name)).collect();
        let count_status = |status: NodeStatus| members.iter().filter(|node| node.status == status).count();

        PartitionSummary {
            total_nodes: members.len(),
            idle_nodes: count_status(NodeStatus::Idle),
            mixed_nodes: count_status(NodeStatus::Mixed),
            allocated_nodes: count_status(NodeStatus::Allocated),
            down_nodes: count_status(NodeStatus::Down),
            total_cpus: saturating_sum(members.iter().map(|node| node.cpus_total)),
            available_cpus: saturating_sum(members.iter().map(|node| node.cpus_free)),
            has_gpu: members.iter().any(|node| node.has_gpu),
            time_limit: partition.time_limit.clone(),
            is_default: partition.is_default,
        }
    }
}

/// Display order of partitions.
///
/// Shared partitions named in the reference list come first, in list order.
/// Every other ("lab") partition follows, sorted by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionOrder {
    public: Vec<String>,
}

impl PartitionOrder {
    pub fn new(public: Vec<String>) -> Self {
        Self { public }
    }

    fn rank(&self, name: &str) -> Option<usize> {
        self.public.iter().position(|public| public == name)
    }

    /// Unlisted names rank after every listed one.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let key = |name: &str| self.rank(name).unwrap_or(usize::MAX);
        key(a).cmp(&key(b)).then_with(|| a.cmp(b))
    }
}

pub type PartitionSummaries = KeyedMap<PartitionSummary>;

/// One summary per partition name, ordered by `order`.
///
/// sinfo lists a partition once per node state; repeated rows replace the
/// earlier summary for that name.
pub fn partition_summary(partitions: &[Partition], nodes: &[Node], order: &PartitionOrder) -> PartitionSummaries {
    let mut summary = PartitionSummaries::new();

    for partition in partitions {
        summary.insert(&partition.name, PartitionSummary::new(partition, nodes));
    }

    summary.sort_by(|a, b| order.compare(a, b));
    summary
}
