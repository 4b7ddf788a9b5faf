use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::api::config_dto::{CommandDto, DashboardConfigDto};
use crate::domain::partition_summary::PartitionOrder;
use crate::domain::slurm::command::CommandSpec;
use crate::error::{Error, Result};
use crate::loader::parser::parse_json_file;

/// Validated dashboard settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub partition_order: PartitionOrder,
    pub node_command: CommandSpec,
    pub partition_command: CommandSpec,
    pub queue_command: CommandSpec,
    /// Treat a failed status command as empty output instead of failing the request.
    pub lenient_acquisition: bool,
    pub log_file: Option<PathBuf>,
}

impl DashboardConfig {
    /// Reads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let dto: DashboardConfigDto = parse_json_file(path)?;
        DashboardConfig::try_from(dto)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let dto = DashboardConfigDto::default();
        DashboardConfig {
            partition_order: PartitionOrder::new(dto.public_partition_order),
            node_command: dto.node_command.into(),
            partition_command: dto.partition_command.into(),
            queue_command: dto.queue_command.into(),
            lenient_acquisition: dto.lenient_acquisition,
            log_file: None,
        }
    }
}

fn validate_partition_order(names: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if name.is_empty() {
            return Err(Error::ConfigError("publicPartitionOrder contains an empty partition name".to_string()));
        }
        if !seen.insert(name.as_str()) {
            return Err(Error::ConfigError(format!("publicPartitionOrder lists '{}' more than once", name)));
        }
    }
    Ok(())
}

fn command_spec(field: &str, dto: CommandDto) -> Result<CommandSpec> {
    if dto.program.trim().is_empty() {
        return Err(Error::ConfigError(format!("{} has an empty program name", field)));
    }
    Ok(CommandSpec::from(dto))
}

impl TryFrom<DashboardConfigDto> for DashboardConfig {
    type Error = Error;

    fn try_from(dto: DashboardConfigDto) -> Result<Self> {
        validate_partition_order(&dto.public_partition_order)?;

        Ok(DashboardConfig {
            partition_order: PartitionOrder::new(dto.public_partition_order),
            node_command: command_spec("nodeCommand", dto.node_command)?,
            partition_command: command_spec("partitionCommand", dto.partition_command)?,
            queue_command: command_spec("queueCommand", dto.queue_command)?,
            lenient_acquisition: dto.lenient_acquisition,
            log_file: dto.log_file.map(PathBuf::from),
        })
    }
}
