use clap::{Parser, Subcommand};

use crate::commands::{
    AdaptArgs, CheckConfigArgs, IntakeArgs, run_adapt, run_check_config, run_intake,
};
use crate::error::Result;
use crate::logging;

#[derive(Debug, Parser)]
#[command(
    name = "shipment_risk_view",
    about = "Normalize shipment risk engine results into the dashboard view model",
    version
)]
pub struct Cli {
    /// Tracing filter directive; falls back to SHIPMENT_RISK_VIEW_LOG, then `warn`.
    #[arg(long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Emit tracing events as JSON lines on stderr.
    #[arg(long = "log-json", global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Adapt a raw engine result into the canonical view model.
    Adapt(AdaptArgs),

    /// Convert an intake form into a legacy engine payload.
    Intake(IntakeArgs),

    /// Validate an adapter configuration file.
    #[command(name = "check-config")]
    CheckConfig(CheckConfigArgs),
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level.as_deref(), cli.log_json);
    match cli.command {
        Commands::Adapt(args) => run_adapt(args),
        Commands::Intake(args) => run_intake(args),
        Commands::CheckConfig(args) => run_check_config(args),
    }
}
