pub mod command;
pub mod runner_mock;
pub mod slurm_command;
