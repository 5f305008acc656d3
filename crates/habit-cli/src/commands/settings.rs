use clap::Subcommand;
use habit_core::SettingsPatch;

use super::{open_session, CliResult};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show notification settings
    Show,
    /// Change one setting
    Set {
        /// Setting: notifications, streakReminders or soundEnabled
        key: String,
        /// true or false
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
}

pub fn run(action: SettingsAction) -> CliResult {
    let mut session = open_session()?;
    match action {
        SettingsAction::Show => {
            let snapshot = session.store().snapshot();
            println!("{}", serde_json::to_string_pretty(&snapshot.settings)?);
            println!("darkMode: {}", snapshot.dark_mode);
        }
        SettingsAction::Set { key, value } => {
            let patch = SettingsPatch::single(&key, value)
                .ok_or_else(|| format!("unknown setting: {key}"))?;
            let _ = session.apply(|store| store.update_settings(patch));
            println!("ok");
        }
    }
    Ok(())
}

pub fn dark_mode() -> CliResult {
    let mut session = open_session()?;
    let (enabled, _) = session.apply_plain(|store| store.toggle_dark_mode());
    println!("Dark mode {}", if enabled { "on" } else { "off" });
    Ok(())
}
