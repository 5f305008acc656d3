pub mod badges;
pub mod config;
pub mod data;
pub mod habit;
pub mod remind;
pub mod settings;
pub mod stats;

use chrono::NaiveDate;
use habit_core::{Config, HabitId, HabitSession, JsonFileStore, SystemClock};

use crate::notifier::TerminalNotifier;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

pub type Session = HabitSession<JsonFileStore, TerminalNotifier, SystemClock>;

/// Open the snapshot named by the config file, announcing through the terminal.
pub fn open_session() -> habit_core::error::Result<Session> {
    let config = Config::load()?;
    let store = JsonFileStore::new(config.data_path()?);
    let notifier = TerminalNotifier::new(config.notifications.bell);
    Ok(HabitSession::open(store, notifier, SystemClock))
}

pub fn parse_date(value: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{value}' (expected YYYY-MM-DD): {e}").into())
}

/// Resolve a habit id, failing if the habit does not exist.
pub fn existing_habit(session: &Session, id: &str) -> Result<HabitId, Box<dyn std::error::Error>> {
    let id = HabitId::from(id);
    if session.store().snapshot().habit(&id).is_none() {
        return Err(format!("habit not found: {id}").into());
    }
    Ok(id)
}
