use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use serde::Serialize;

use slurm_dashboard::api::response::{ApiResponse, HealthStatus};
use slurm_dashboard::{Dashboard, DashboardConfig, logger};

/// Print Slurm cluster status as JSON.
#[derive(Debug, Parser)]
#[command(name = "slurm-dashboard", version)]
struct Args {
    /// JSON config file; built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,

    #[arg(value_enum, default_value_t = View::Data)]
    view: View,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum View {
    /// Full snapshot with nodes, partitions, GPUs, jobs and totals.
    Data,
    Nodes,
    Gpu,
    Partitions,
    Queue,
    Health,
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty { serde_json::to_string_pretty(value)? } else { serde_json::to_string(value)? };
    println!("{}", json);
    Ok(())
}

fn render<T: Serialize>(response: ApiResponse<T>, pretty: bool) -> anyhow::Result<bool> {
    print_json(&response, pretty)?;
    Ok(response.success)
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match DashboardConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                logger::init(None);
                log::error!("Could not load config '{}': {}", path.display(), e);
                print_json(&ApiResponse::<()>::failure(e.to_string()), args.pretty)?;
                return Ok(ExitCode::FAILURE);
            }
        },
        None => DashboardConfig::default(),
    };

    logger::init(config.log_file.as_deref());
    if let Some(path) = &args.config {
        log::debug!("Loaded dashboard config from '{}'.", path.display());
    }
    log::debug!("Serving view {:?}.", args.view);

    let dashboard = Dashboard::with_system(config);

    let success = match args.view {
        View::Data => render(ApiResponse::from_result(dashboard.get_dashboard_data()), args.pretty)?,
        View::Nodes => render(ApiResponse::from_result(dashboard.nodes()), args.pretty)?,
        View::Gpu => render(ApiResponse::from_result(dashboard.gpu_summary()), args.pretty)?,
        View::Partitions => render(ApiResponse::from_result(dashboard.partition_summary()), args.pretty)?,
        View::Queue => render(ApiResponse::from_result(dashboard.jobs()), args.pretty)?,
        View::Health => {
            print_json(&HealthStatus::ok(dashboard.now_in_s()), args.pretty)?;
            true
        }
    };

    Ok(if success { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
