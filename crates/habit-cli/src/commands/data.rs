//! Export, import and reset of the habit snapshot.

use std::path::PathBuf;

use clap::Subcommand;
use habit_core::demo::demo_snapshot;
use habit_core::export::export;
use habit_core::{Clock, ExportDocument, SystemClock};

use super::{open_session, CliResult};

#[derive(Subcommand)]
pub enum DataAction {
    /// Write habits and completions to a JSON file
    Export {
        /// Output path (default: habit-data-YYYY-MM-DD.json, "-" for stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Replace habits and completions with an exported file
    Import {
        /// Path to an exported JSON file
        file: PathBuf,
    },
    /// Delete all habits, completions, points and badges
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Load sample habits (only when no habits exist)
    Demo,
}

pub fn run(action: DataAction) -> CliResult {
    let mut session = open_session()?;

    match action {
        DataAction::Export { output } => {
            let now = SystemClock.now();
            let json = export(session.store().snapshot(), now).to_json_pretty()?;
            let path = output.unwrap_or_else(|| PathBuf::from(ExportDocument::file_name(now)));
            if path.as_os_str() == "-" {
                println!("{json}");
            } else {
                std::fs::write(&path, json)?;
                println!("Exported to {}", path.display());
            }
        }
        DataAction::Import { file } => {
            let content = std::fs::read_to_string(&file)?;
            let document = ExportDocument::from_json(&content)
                .map_err(|e| format!("invalid export file {}: {e}", file.display()))?;
            let (summary, _) = session.apply(|store| store.import(document));
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        DataAction::Clear { yes } => {
            if !yes {
                return Err("refusing to clear data without --yes".into());
            }
            let _ = session.apply_plain(|store| store.clear());
            println!(
                "All data cleared in {}",
                session.persistence().path().display()
            );
        }
        DataAction::Demo => {
            let now = SystemClock.now();
            let (seeded, _) = session.apply(|store| store.seed_demo(demo_snapshot(now)));
            if !seeded {
                return Err("demo data is only loaded when no habits exist".into());
            }
            println!(
                "Loaded {} demo habits",
                session.store().snapshot().habits.len()
            );
        }
    }
    Ok(())
}
