//! CLI commands for data export
//!
//! Provides commands for exporting a plan in various formats.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::error::{MoneyplanError, MoneyplanResult};
use crate::export::{export_plan_csv, export_plan_json, export_plan_statement, PlanSnapshot};
use crate::services::{PlanService, SessionService};
use crate::storage::Storage;

/// Export subcommands
#[derive(Subcommand)]
pub enum ExportCommands {
    /// Export a plan's transactions to CSV
    Csv {
        /// Plan name or ID
        plan: String,
        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export a plan as a versioned JSON document
    Json {
        /// Plan name or ID
        plan: String,
        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Export a plan as a plain-text statement
    Statement {
        /// Plan name or ID
        plan: String,
        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle an export command
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> MoneyplanResult<()> {
    let user = SessionService::new(storage).require_current()?;
    let service = PlanService::new(storage);

    match cmd {
        ExportCommands::Csv { plan, output } => {
            let found = service.require(&user.email, &plan)?;
            let snapshot = PlanSnapshot::from_plan(&found);

            match output {
                Some(path) => {
                    let mut writer = create_output_file(&path)?;
                    export_plan_csv(&snapshot, &mut writer)?;
                    println!(
                        "Exported {} transactions to: {}",
                        snapshot.transaction_count(),
                        path.display()
                    );
                }
                None => {
                    export_plan_csv(&snapshot, io::stdout().lock())?;
                }
            }
        }

        ExportCommands::Json {
            plan,
            output,
            pretty,
        } => {
            let found = service.require(&user.email, &plan)?;
            let snapshot = PlanSnapshot::from_plan(&found);

            match output {
                Some(path) => {
                    let mut writer = create_output_file(&path)?;
                    export_plan_json(&snapshot, &mut writer, pretty)?;
                    println!("Exported plan '{}' to: {}", snapshot.plan_name, path.display());
                }
                None => {
                    export_plan_json(&snapshot, io::stdout().lock(), pretty)?;
                    println!();
                }
            }
        }

        ExportCommands::Statement { plan, output } => {
            let found = service.require(&user.email, &plan)?;
            let snapshot = PlanSnapshot::from_plan(&found);

            match output {
                Some(path) => {
                    let mut writer = create_output_file(&path)?;
                    export_plan_statement(&snapshot, &mut writer)?;
                    println!("Exported plan '{}' to: {}", snapshot.plan_name, path.display());
                }
                None => {
                    export_plan_statement(&snapshot, io::stdout().lock())?;
                }
            }
        }
    }

    Ok(())
}

fn create_output_file(path: &Path) -> MoneyplanResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        MoneyplanError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
