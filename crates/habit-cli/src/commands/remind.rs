use habit_core::notify::Notifier;
use habit_core::reports;
use habit_core::{Effect, Permission};

use super::{open_session, CliResult};

/// Warn about streaks that will break today, then send the day's summary.
pub fn run() -> CliResult {
    let mut session = open_session()?;
    let snapshot = session.store().snapshot();
    if !snapshot.settings.notifications {
        println!("Notifications are off");
        return Ok(());
    }
    if session.notifier_mut().request_permission() == Permission::Denied {
        return Err("notification permission denied".into());
    }

    let snapshot = session.store().snapshot();
    let today = session.store().today();
    let sound = snapshot.settings.sound_enabled;
    let mut notifications = reports::streak_warnings(snapshot, today);
    notifications.push(reports::daily_summary(snapshot, today));

    let effects: Vec<Effect> = notifications
        .into_iter()
        .flat_map(|notification| {
            let cue = sound.then(|| Effect::sound(notification.sound()));
            cue.into_iter().chain([Effect::notify(notification)])
        })
        .collect();
    let report = session.announce(&effects);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
