use serde::{Deserialize, Serialize};

/// On-disk form of the dashboard configuration. Every field may be omitted.
#[derive(Debug, Deserialize, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardConfigDto {
    /// Shared partitions listed first in the summary, in this order.
    pub public_partition_order: Vec<String>,
    pub node_command: CommandDto,
    pub partition_command: CommandDto,
    pub queue_command: CommandDto,
    pub lenient_acquisition: bool,
    pub log_file: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommandDto {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandDto {
    fn new(program: &str, args: &[&str]) -> Self {
        Self { program: program.to_string(), args: args.iter().map(|arg| arg.to_string()).collect() }
    }
}

pub const DEFAULT_PUBLIC_PARTITION_ORDER: [&str; 6] = ["batch", "gpu", "mpi", "interactive", "largemem", "preempt"];

impl Default for DashboardConfigDto {
    fn default() -> Self {
        Self {
            public_partition_order: DEFAULT_PUBLIC_PARTITION_ORDER.iter().map(|name| name.to_string()).collect(),
            node_command: CommandDto::new("scontrol", &["show", "node", "--oneliner"]),
            partition_command: CommandDto::new("sinfo", &["-o", "%P %a %l %D %t"]),
            // running jobs of the invoking user only
            queue_command: CommandDto::new("squeue", &["--me", "-t", "R", "-o", "%i %j %u %t %M %D %C %P %R"]),
            lenient_acquisition: false,
            log_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parser::parse_json_str;

    #[test]
    fn empty_object_yields_defaults() {
        let dto: DashboardConfigDto = parse_json_str("{}").unwrap();
        assert_eq!(dto, DashboardConfigDto::default());
        assert_eq!(dto.public_partition_order[0], "batch");
        assert_eq!(dto.queue_command.program, "squeue");
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let json = r#"{
            "publicPartitionOrder": ["short", "long"],
            "nodeCommand": { "program": "/opt/slurm/bin/scontrol", "args": ["show", "node", "-o"] },
            "lenientAcquisition": true
        }"#;
        let dto: DashboardConfigDto = parse_json_str(json).unwrap();

        assert_eq!(dto.public_partition_order, vec!["short", "long"]);
        assert_eq!(dto.node_command.program, "/opt/slurm/bin/scontrol");
        assert_eq!(dto.partition_command, DashboardConfigDto::default().partition_command);
        assert!(dto.lenient_acquisition);
        assert_eq!(dto.log_file, None);
    }

    #[test]
    fn command_args_are_optional() {
        let dto: CommandDto = parse_json_str(r#"{ "program": "sinfo" }"#).unwrap();
        assert!(dto.args.is_empty());
    }
}
