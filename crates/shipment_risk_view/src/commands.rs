use std::path::{Path, PathBuf};

use clap::Args;

use crate::adapter::{Adapted, Adapter};
use crate::config::AdapterConfig;
use crate::error::{Result, ViewError};
use crate::intake::{IntakeForm, to_legacy_payload};
use crate::util::{
    CliOutput, OutputIntegration, is_stdio, now_utc_iso, output_for, read_input, render_json,
    write_output,
};

#[derive(Debug, Clone, Args)]
pub struct AdaptArgs {
    /// Engine result JSON; `-` or omitted reads stdin.
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Destination for the view model; `-` or omitted writes stdout.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Adapter configuration (TOML, or JSON when the extension is `.json`).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Exit with status 2 when the adapter emitted any warning.
    #[arg(long)]
    pub strict: bool,

    #[arg(long)]
    pub compact: bool,
}

#[derive(Debug, Clone, Args)]
pub struct IntakeArgs {
    /// Intake form JSON; `-` or omitted reads stdin.
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Run the legacy payload through the adapter and emit the view model.
    #[arg(long)]
    pub adapt: bool,

    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub compact: bool,
}

#[derive(Debug, Clone, Args)]
pub struct CheckConfigArgs {
    #[arg(long)]
    pub config: PathBuf,
}

fn load_config(path: Option<&Path>) -> Result<AdapterConfig> {
    match path {
        Some(path) => AdapterConfig::from_file(path),
        None => Ok(AdapterConfig::default()),
    }
}

fn report_diagnostics(ui: &CliOutput, adapted: &Adapted) {
    if adapted.diagnostics.is_empty() {
        ui.success("no warnings");
        return;
    }
    ui.rule(Some("warnings"));
    for diagnostic in &adapted.diagnostics {
        ui.warning(&diagnostic.to_string());
    }
}

fn emit_status(
    integration: &OutputIntegration,
    command: &str,
    output: Option<&Path>,
    adapted: Option<&Adapted>,
) {
    let mut status = serde_json::json!({
        "command": command,
        "status": "ok",
        "generated_at": now_utc_iso(),
        "output": output.map(|path| path.display().to_string()),
        "integration": integration,
    });
    if let Some(adapted) = adapted {
        status["warnings"] = serde_json::json!(adapted.diagnostics.len());
        status["diagnostics"] = serde_json::json!(adapted.diagnostics);
        status["score_source"] =
            serde_json::json!(adapted.view.meta.source.canonical_risk_score_from);
    }
    println!("{status}");
}

fn enforce_strict(strict: bool, adapted: &Adapted) -> Result<()> {
    if strict && !adapted.diagnostics.is_empty() {
        return Err(ViewError::StrictWarnings {
            count: adapted.diagnostics.len(),
        });
    }
    Ok(())
}

pub fn run_adapt(args: AdaptArgs) -> Result<()> {
    let integration = OutputIntegration::detect();
    run_adapt_with_integration(args, &integration)
}

pub(crate) fn run_adapt_with_integration(
    args: AdaptArgs,
    integration: &OutputIntegration,
) -> Result<()> {
    let to_stdout = is_stdio(args.output.as_deref());
    let ui = output_for(integration, to_stdout);

    let config = load_config(args.config.as_deref())?;
    let text = read_input(args.input.as_deref())?;
    let adapted = Adapter::new(config).adapt_str(&text);

    write_output(args.output.as_deref(), &render_json(&adapted.view, args.compact)?)?;

    if let Some(output) = args.output.as_deref().filter(|_| !to_stdout) {
        ui.success(&format!("view model: {}", output.display()));
    }
    report_diagnostics(&ui, &adapted);
    if integration.should_emit_json() && !to_stdout {
        emit_status(integration, "adapt", args.output.as_deref(), Some(&adapted));
    }

    enforce_strict(args.strict, &adapted)
}

pub fn run_intake(args: IntakeArgs) -> Result<()> {
    let integration = OutputIntegration::detect();
    run_intake_with_integration(args, &integration)
}

pub(crate) fn run_intake_with_integration(
    args: IntakeArgs,
    integration: &OutputIntegration,
) -> Result<()> {
    let to_stdout = is_stdio(args.output.as_deref());
    let ui = output_for(integration, to_stdout);

    let text = read_input(args.input.as_deref())?;
    if text.trim().is_empty() {
        return Err(ViewError::invalid("intake form input is empty"));
    }
    let form = IntakeForm::from_json_str(&text)?;
    let payload = to_legacy_payload(&form, chrono::Utc::now());

    let adapted = if args.adapt {
        let config = load_config(args.config.as_deref())?;
        Some(Adapter::new(config).adapt(&payload))
    } else {
        None
    };

    let rendered = match &adapted {
        Some(adapted) => render_json(&adapted.view, args.compact)?,
        None => render_json(&payload, args.compact)?,
    };
    write_output(args.output.as_deref(), &rendered)?;

    if let Some(output) = args.output.as_deref().filter(|_| !to_stdout) {
        let kind = if args.adapt { "view model" } else { "legacy payload" };
        ui.success(&format!("{kind}: {}", output.display()));
    }
    if let Some(adapted) = &adapted {
        report_diagnostics(&ui, adapted);
    }
    if integration.should_emit_json() && !to_stdout {
        emit_status(integration, "intake", args.output.as_deref(), adapted.as_ref());
    }
    Ok(())
}

pub fn run_check_config(args: CheckConfigArgs) -> Result<()> {
    let integration = OutputIntegration::detect();
    run_check_config_with_integration(args, &integration)
}

pub(crate) fn run_check_config_with_integration(
    args: CheckConfigArgs,
    integration: &OutputIntegration,
) -> Result<()> {
    let ui = output_for(integration, false);
    let config = AdapterConfig::from_file(&args.config)?;

    ui.success(&format!("configuration valid: {}", args.config.display()));
    ui.info(&format!("max_drivers = {}", config.max_drivers));
    ui.info(&format!(
        "impact sum window = {}-{}%",
        config.impact_sum_min, config.impact_sum_max
    ));
    ui.info(&format!(
        "defaults: engine_version = {}, language = {}",
        config.default_engine_version, config.default_language
    ));

    if integration.should_emit_json() {
        println!(
            "{}",
            serde_json::json!({
                "command": "check-config",
                "status": "ok",
                "config_path": args.config.display().to_string(),
                "config": config,
                "integration": integration,
            })
        );
    }
    Ok(())
}
