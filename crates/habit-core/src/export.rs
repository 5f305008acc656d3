//! JSON export document.

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::completion::CompletionMap;
use crate::habit::Habit;
use crate::snapshot::Snapshot;

/// Version string written into every export.
pub const EXPORT_VERSION: &str = "1.0";

/// Habits and completions as written by `export`.
///
/// `exportDate` and `version` are informational; imports do not check them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub habits: Vec<Habit>,
    pub completions: CompletionMap,
    #[serde(default)]
    pub export_date: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// What an import changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub habits: usize,
    pub completions: usize,
    /// Habits in `completions` dropped because they were not in `habits`.
    pub orphans_dropped: usize,
}

pub fn export(snapshot: &Snapshot, now: DateTime<FixedOffset>) -> ExportDocument {
    ExportDocument {
        habits: snapshot.habits.clone(),
        completions: snapshot.completions.clone(),
        export_date: Some(now.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Millis, true)),
        version: Some(EXPORT_VERSION.to_string()),
    }
}

impl ExportDocument {
    /// Parse an export. Both `habits` and `completions` must be present.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Suggested file name, `habit-data-YYYY-MM-DD.json`.
    pub fn file_name(now: DateTime<FixedOffset>) -> String {
        format!("habit-data-{}.json", now.format("%Y-%m-%d"))
    }
}
