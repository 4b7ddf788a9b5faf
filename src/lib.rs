//! Slurm cluster dashboard: polls `scontrol`, `sinfo` and `squeue`, parses their
//! text output and derives GPU, partition and queue summaries.

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;

pub use crate::domain::config::DashboardConfig;
pub use crate::domain::dashboard::{Dashboard, DashboardSnapshot, DashboardStats};
pub use crate::domain::gpu_summary::gpu_summary;
pub use crate::domain::job::parse_queue;
pub use crate::domain::node::parse_nodes;
pub use crate::domain::partition::parse_partitions;
pub use crate::domain::partition_summary::partition_summary;
pub use crate::error::{Error, Result};
