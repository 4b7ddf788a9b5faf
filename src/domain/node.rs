use serde::Serialize;

use crate::domain::fields::{KeyValueFields, leading_int};

/// Simplified node state shown by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Idle,
    Mixed,
    Allocated,
    Down,
    Draining,
    Unknown,
}

impl NodeStatus {
    /// Maps a raw Slurm state such as `MIXED+DRAIN` or `IDLE*` onto a status.
    ///
    /// Substring checks run in the order IDLE, MIXED, ALLOC, DOWN, DRAIN and the first
    /// hit wins, so `ALLOCATED+DRAIN` is `Allocated` and `DOWN+DRAIN` is `Down`.
    pub fn from_state(state: Option<&str>) -> Self {
        let Some(state) = state else {
            return NodeStatus::Unknown;
        };

        if state.contains("IDLE") {
            NodeStatus::Idle
        } else if state.contains("MIXED") {
            NodeStatus::Mixed
        } else if state.contains("ALLOC") {
            NodeStatus::Allocated
        } else if state.contains("DOWN") {
            NodeStatus::Down
        } else if state.contains("DRAIN") {
            NodeStatus::Draining
        } else {
            NodeStatus::Unknown
        }
    }
}

/// GPU inventory of a node, taken from its `Gres=` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpuResource {
    pub gpu_type: String,
    pub count: i64,
}

impl GpuResource {
    /// Finds the first `gpu:<type>:<count>` entry in a Gres value.
    ///
    /// Trailing socket bindings and further resources are ignored:
    /// `gpu:a100:4(S:0-1),shard:8` gives `a100` x 4. `(null)`, untyped `gpu:4`
    /// and anything else without the three parts gives `None`.
    pub fn parse(gres: &str) -> Option<Self> {
        gres.match_indices("gpu:").find_map(|(start, marker)| {
            let rest = &gres[start + marker.len()..];

            let type_end = rest.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_')).unwrap_or(rest.len());
            if type_end == 0 {
                return None;
            }
            let (gpu_type, rest) = rest.split_at(type_end);

            let digits = rest.strip_prefix(':')?;
            if !digits.starts_with(|c: char| c.is_ascii_digit()) {
                return None;
            }

            Some(GpuResource { gpu_type: gpu_type.to_string(), count: leading_int(digits) })
        })
    }
}

/// One compute node as reported by `scontrol show node --oneliner`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub name: Option<String>,
    #[serde(rename = "state")]
    pub state_raw: Option<String>,
    pub status: NodeStatus,
    pub cpus_total: i64,
    pub cpus_alloc: i64,
    pub cpus_free: i64,
    pub memory_total: i64,
    pub memory_alloc: i64,
    pub memory_free: i64,
    pub partitions: Vec<String>,
    pub features: Vec<String>,
    pub has_gpu: bool,
    pub gpu_type: Option<String>,
    pub gpu_count: i64,
}

impl Node {
    /// Builds a node from one inventory line. Missing fields fall back to their
    /// defaults; this never fails.
    pub fn from_line(line: &str) -> Self {
        let fields = KeyValueFields::parse(line);

        let state_raw = fields.get_string("State");
        let cpus_total = fields.get_count("CPUTot");
        let cpus_alloc = fields.get_count("CPUAlloc");
        let memory_total = fields.get_count("RealMemory");
        let memory_alloc = fields.get_count("AllocMem");

        let gpu = fields.get("Gres").and_then(GpuResource::parse);

        Node {
            name: fields.get_string("NodeName"),
            status: NodeStatus::from_state(state_raw.as_deref()),
            state_raw,
            cpus_total,
            cpus_alloc,
            cpus_free: cpus_total - cpus_alloc,
            memory_total,
            memory_alloc,
            memory_free: memory_total - memory_alloc,
            partitions: fields.get_list("Partitions"),
            features: fields.get_list("AvailableFeatures"),
            has_gpu: gpu.is_some(),
            gpu_count: gpu.as_ref().map_or(0, |gpu| gpu.count),
            gpu_type: gpu.map(|gpu| gpu.gpu_type),
        }
    }

    pub fn in_partition(&self, partition: &str) -> bool {
        self.partitions.iter().any(|name| name == partition)
    }

    /// Share of the node's CPUs handed to jobs; 0 for a node that reports no CPUs.
    pub fn cpu_usage_ratio(&self) -> f64 {
        if self.cpus_total == 0 { 0.0 } else { self.cpus_alloc as f64 / self.cpus_total as f64 }
    }
}

/// Parses the full node inventory, one node per non-blank line, in input order.
pub fn parse_nodes(text: &str) -> Vec<Node> {
    let nodes: Vec<Node> = text.lines().filter(|line| !line.trim_ascii().is_empty()).map(Node::from_line).collect();

    for node in nodes.iter().filter(|node| node.name.is_none()) {
        log::debug!("Node line without NodeName= parsed with defaults (state {:?}).", node.state_raw);
    }
    log::debug!("Parsed {} node(s) from node inventory.", nodes.len());

    nodes
}
