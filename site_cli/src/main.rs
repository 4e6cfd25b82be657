//! # Siteline CLI
//!
//! Runs analysis stages for one subject of a project document and prints
//! the resulting JSON.
//!
//! ```bash
//! site_cli site.json --subject "Tower A" --stage all --save
//! RUST_LOG=site_core=debug site_cli site.json --stage hazard
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context};
use clap::{Parser, ValueEnum};
use serde_json::Value;
use site_core::errors::AnalysisError;
use site_core::file_io::{load_project, read_json, save_project, write_json};
use site_core::{AnalysisService, AnalysisSettings, Project};
use tracing::{error, info};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Stage {
    /// Load, seismic, flood, wind and cyclone analysis
    Hazard,
    /// Orientation compliance
    Orientation,
    /// Final report from stored composites
    Final,
    /// Every stage in order
    All,
}

#[derive(Debug, Parser)]
#[command(name = "site_cli", version, about = "Building site hazard and orientation analysis")]
struct Args {
    /// Project document (JSON)
    project: PathBuf,

    /// Subject id or label; may be omitted when the project has one subject
    #[arg(long)]
    subject: Option<String>,

    #[arg(long, value_enum, default_value_t = Stage::All)]
    stage: Stage,

    /// Settings file overriding the project's own settings
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write the result JSON to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Save stored results back into the project document
    #[arg(long)]
    save: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let mut project = load_project(&args.project)?;
    let id = select_subject(&project, args.subject.as_deref())?;

    let settings: AnalysisSettings = match &args.settings {
        Some(path) => read_json(path)?,
        None => project.settings.clone(),
    };

    info!(subject = %id, stage = ?args.stage, "running analysis");
    let output = run_stage(&mut project, &id, args.stage, settings)?;

    match &args.output {
        Some(path) => {
            write_json(&output, path)?;
            info!(path = %path.display(), "wrote result");
        }
        None => println!("{}", serde_json::to_string_pretty(&output)?),
    }

    if args.save {
        project.touch();
        save_project(&project, &args.project)
            .with_context(|| format!("saving {}", args.project.display()))?;
        info!(path = %args.project.display(), "saved project");
    }

    Ok(())
}

fn select_subject(project: &Project, key: Option<&str>) -> anyhow::Result<Uuid> {
    let subject = match key {
        Some(key) => project
            .find_subject(key)
            .ok_or_else(|| AnalysisError::not_found(key))?,
        None => project.sole_subject().ok_or_else(|| {
            anyhow!(
                "project has {} subjects; pick one with --subject",
                project.subject_count()
            )
        })?,
    };
    Ok(subject.id)
}

fn run_stage(project: &mut Project, id: &Uuid, stage: Stage, settings: AnalysisSettings) -> anyhow::Result<Value> {
    let mut service = AnalysisService::new(project, settings);

    let value = match stage {
        Stage::Hazard => serde_json::to_value(service.run_hazard_analysis(id)?)?,
        Stage::Orientation => serde_json::to_value(service.run_orientation_analysis(id)?)?,
        Stage::Final => serde_json::to_value(service.run_final_report(id)?)?,
        Stage::All => {
            service.run_hazard_analysis(id)?;
            service.run_orientation_analysis(id)?;
            serde_json::to_value(service.run_final_report(id)?)?
        }
    };
    Ok(value)
}

fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<AnalysisError>() {
        Some(analysis_err) => {
            error!(code = analysis_err.error_code(), "{}", analysis_err);
            if let Ok(json) = serde_json::to_string_pretty(analysis_err) {
                eprintln!("{}", json);
            }
        }
        None => error!("{:#}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_default_stage_is_all() {
        let args = Args::parse_from(["site_cli", "site.json"]);
        assert_eq!(args.stage, Stage::All);
        assert!(!args.save);
    }

    #[test]
    fn test_stage_parsing() {
        let args = Args::parse_from(["site_cli", "site.json", "--stage", "orientation", "--subject", "A"]);
        assert_eq!(args.stage, Stage::Orientation);
        assert_eq!(args.subject.as_deref(), Some("A"));
    }

    #[test]
    fn test_select_subject_requires_key_for_many() {
        let project = Project::default();
        assert!(select_subject(&project, None).is_err());

        let err = select_subject(&project, Some("missing")).unwrap_err();
        assert!(err.downcast_ref::<AnalysisError>().is_some());
    }
}
