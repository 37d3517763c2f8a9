//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `crm_core` wiring end to end.
//! - Print the seeded dashboard and optionally write every export.
//!
//! Usage: `crm_cli [EXPORT_DIR]`. Set `CRM_LOG_DIR` to an absolute path to
//! enable file logging.

use chrono::Local;
use crm_core::{
    core_version, default_log_level, init_logging, CoreConfig, CrmService, ExportArtifact,
    ExportFormat, LoggingConfig, ServiceResult,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    if let Some(dir) = std::env::var_os("CRM_LOG_DIR") {
        match LoggingConfig::new(default_log_level(), &dir) {
            Ok(config) => {
                if let Err(err) = init_logging(&config) {
                    eprintln!("logging disabled: {err}");
                }
            }
            Err(err) => eprintln!("logging disabled: {err}"),
        }
    }

    let service = match CrmService::seeded(&CoreConfig::default()) {
        Ok(service) => service,
        Err(err) => {
            eprintln!("failed to load fixtures: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("crm_core version={}", core_version());
    let today = Local::now().date_naive();
    let metrics = service.dashboard(today).await;
    println!("contacts={}", metrics.total_contacts);
    println!("active_deals={}", metrics.active_deals);
    println!("total_deals_value={}", metrics.total_deals_value);
    println!("pending_tasks={}", metrics.pending_tasks);
    println!("overdue_tasks={}", metrics.overdue_tasks);
    println!("win_rate={}%", metrics.pipeline.win_rate);

    let Some(dir) = std::env::args_os().nth(1).map(PathBuf::from) else {
        return ExitCode::SUCCESS;
    };
    match export_all(&service, &dir).await {
        Ok(paths) => {
            for path in paths {
                println!("wrote {}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("export failed: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn export_all(service: &CrmService, dir: &Path) -> ServiceResult<Vec<PathBuf>> {
    let today = Local::now().date_naive();
    let mut artifacts: Vec<ExportArtifact> = Vec::new();
    for format in [ExportFormat::Csv, ExportFormat::Xlsx] {
        artifacts.push(service.export_contacts(format, today).await?);
        artifacts.push(service.export_deals(format, today).await?);
        artifacts.push(service.export_tasks(format, today).await?);
    }

    let mut paths = Vec::with_capacity(artifacts.len());
    for artifact in &artifacts {
        paths.push(artifact.save_into(dir)?);
    }
    Ok(paths)
}
