//! Terminal delivery for notifications and sound cues.

use std::io::Write;

use habit_core::notify::{Notifier, Permission};
use habit_core::{Notification, NotifyError, SoundKind};
use tracing::debug;

/// Prints notifications to stderr and rings the terminal bell for sounds.
pub struct TerminalNotifier {
    bell: bool,
}

impl TerminalNotifier {
    pub fn new(bell: bool) -> Self {
        Self { bell }
    }
}

fn backend(e: std::io::Error) -> NotifyError {
    NotifyError::Backend(e.to_string())
}

/// Text block for one notification. Ones that need attention are boxed in
/// rules so they stand out from command output.
fn render(notification: &Notification) -> String {
    let text = format!("{}\n  {}", notification.title(), notification.body());
    if notification.requires_interaction() {
        let rule = "-".repeat(40);
        format!("{rule}\n{text}\n{rule}")
    } else {
        text
    }
}

impl Notifier for TerminalNotifier {
    fn request_permission(&mut self) -> Permission {
        Permission::Granted
    }

    fn notify(&mut self, notification: &Notification) -> Result<(), NotifyError> {
        let mut err = std::io::stderr().lock();
        writeln!(err, "{}", render(notification)).map_err(backend)
    }

    fn play_sound(&mut self, sound: SoundKind) -> Result<(), NotifyError> {
        let (hz, seconds) = sound.tone();
        debug!(?sound, hz, seconds, bell = self.bell, "sound cue");
        if !self.bell {
            return Ok(());
        }
        let mut err = std::io::stderr().lock();
        err.write_all(b"\x07").map_err(backend)?;
        err.flush().map_err(backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn achievements_are_boxed() {
        let text = render(&Notification::Achievement {
            badge_name: "Starter".into(),
            description: "Complete your first habit".into(),
        });
        assert!(text.starts_with("----"));
        assert!(text.contains("🏆 Achievement Unlocked!"));
        assert!(text.ends_with("----"));
    }

    #[test]
    fn summary_is_plain() {
        let text = render(&Notification::Summary {
            completed: 1,
            total: 2,
            points: 10,
        });
        assert!(text.starts_with("📊 Daily Summary"));
        assert!(text.contains("1/2 habits"));
    }
}
