pub mod clock;
pub mod config;
pub mod dashboard;
pub mod fields;
pub mod gpu_summary;
pub mod job;
pub mod keyed_map;
pub mod node;
pub mod partition;
pub mod partition_summary;
pub mod slurm;
