use serde::Serialize;

use crate::domain::keyed_map::KeyedMap;
use crate::domain::node::{Node, NodeStatus};

/// GPU counts of one accelerator type.
///
/// Slurm's node listing has no per-GPU allocation, so the `in_use` share of a
/// mixed or allocated node is estimated from its CPU occupancy and rounded half
/// away from zero. `available + in_use + down` can therefore be off by one
/// against `total`, and nodes that are draining or unknown only count towards `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GpuTypeSummary {
    pub total: i64,
    pub available: i64,
    pub in_use: i64,
    pub down: i64,
}

impl GpuTypeSummary {
    fn add_node(&mut self, node: &Node) {
        let count = node.gpu_count;
        self.total = self.total.saturating_add(count);

        match node.status {
            NodeStatus::Idle => self.available = self.available.saturating_add(count),
            NodeStatus::Mixed | NodeStatus::Allocated => {
                let in_use = estimate_in_use(count, node.cpu_usage_ratio());
                self.in_use = self.in_use.saturating_add(in_use);
                self.available = self.available.saturating_add(count.saturating_sub(in_use));
            }
            NodeStatus::Down => self.down = self.down.saturating_add(count),
            NodeStatus::Draining | NodeStatus::Unknown => {}
        }
    }
}

/// GPUs of a node assumed busy when `usage_ratio` of its CPUs are allocated.
pub fn estimate_in_use(gpu_count: i64, usage_ratio: f64) -> i64 {
    (gpu_count as f64 * usage_ratio).round() as i64
}

pub type GpuSummary = KeyedMap<GpuTypeSummary>;

/// Groups GPU nodes by accelerator type, in the order the types first appear.
pub fn gpu_summary(nodes: &[Node]) -> GpuSummary {
    let mut summary = GpuSummary::new();

    for node in nodes.iter().filter(|node| node.has_gpu) {
        let Some(gpu_type) = node.gpu_type.as_deref() else {
            continue;
        };
        summary.get_or_insert_with(gpu_type, GpuTypeSummary::default).add_node(node);
    }

    summary
}
