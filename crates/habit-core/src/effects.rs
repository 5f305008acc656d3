//! Side effects a mutation asks its caller to perform: notifications with
//! their texts, and sound cues.

use serde::{Deserialize, Serialize};

/// Side effect produced by a store mutation.
///
/// The store never performs effects itself; it hands them back and the
/// caller dispatches them once the mutation has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Effect {
    Notify { notification: Notification },
    PlaySound { sound: SoundKind },
}

/// Notification category, as understood by a notification backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Reminder,
    Achievement,
    Warning,
    Summary,
}

/// Sound cue to play alongside (or instead of) a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundKind {
    Default,
    Success,
    Reminder,
    Achievement,
    Warning,
}

impl SoundKind {
    /// Tone frequency (Hz) and length (seconds) of the cue.
    pub fn tone(&self) -> (u32, f32) {
        match self {
            SoundKind::Default | SoundKind::Success => (800, 0.3),
            SoundKind::Reminder => (600, 0.5),
            SoundKind::Achievement => (1000, 0.7),
            SoundKind::Warning => (400, 0.4),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    /// A habit's streak hit a milestone, or a plain nudge when `streak` is 0.
    Reminder { habit_name: String, streak: u32 },
    /// A badge was earned.
    Achievement {
        badge_name: String,
        description: String,
    },
    /// A running streak is about to break.
    Warning { habit_name: String, streak: u32 },
    /// End-of-day tally.
    Summary {
        completed: usize,
        total: usize,
        points: u64,
    },
}

impl Notification {
    pub fn kind(&self) -> NotificationKind {
        match self {
            Notification::Reminder { .. } => NotificationKind::Reminder,
            Notification::Achievement { .. } => NotificationKind::Achievement,
            Notification::Warning { .. } => NotificationKind::Warning,
            Notification::Summary { .. } => NotificationKind::Summary,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Notification::Reminder { .. } => "🎯 Habit Reminder",
            Notification::Achievement { .. } => "🏆 Achievement Unlocked!",
            Notification::Warning { .. } => "⚠️ Streak Alert",
            Notification::Summary { .. } => "📊 Daily Summary",
        }
    }

    pub fn body(&self) -> String {
        match self {
            Notification::Reminder { habit_name, streak } if *streak > 0 => format!(
                "Time to complete \"{habit_name}\"! Keep your {streak}-day streak going! 🔥"
            ),
            Notification::Reminder { habit_name, .. } => {
                format!("Time to complete \"{habit_name}\"! Start building your streak! 💪")
            }
            Notification::Achievement {
                badge_name,
                description,
            } => format!("You earned the \"{badge_name}\" badge! {description}"),
            Notification::Warning { habit_name, streak } => format!(
                "Don't lose your {streak}-day streak for \"{habit_name}\"! Complete it now to keep going."
            ),
            Notification::Summary {
                completed,
                total,
                points,
            } => format!(
                "You completed {completed}/{total} habits today and earned {points} points! 🌟"
            ),
        }
    }

    /// Sound cue that accompanies this notification.
    pub fn sound(&self) -> SoundKind {
        match self.kind() {
            NotificationKind::Reminder => SoundKind::Reminder,
            NotificationKind::Achievement => SoundKind::Achievement,
            NotificationKind::Warning => SoundKind::Warning,
            NotificationKind::Summary => SoundKind::Default,
        }
    }

    /// Whether the notification should stay until dismissed.
    pub fn requires_interaction(&self) -> bool {
        !matches!(self.kind(), NotificationKind::Summary)
    }
}

impl Effect {
    pub fn notify(notification: Notification) -> Self {
        Effect::Notify { notification }
    }

    pub fn sound(sound: SoundKind) -> Self {
        Effect::PlaySound { sound }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reminder_body_depends_on_streak() {
        let with = Notification::Reminder {
            habit_name: "Read".into(),
            streak: 7,
        };
        let without = Notification::Reminder {
            habit_name: "Read".into(),
            streak: 0,
        };
        assert!(with.body().contains("7-day streak"));
        assert!(without.body().contains("Start building"));
    }

    #[test]
    fn achievement_text() {
        let n = Notification::Achievement {
            badge_name: "Starter".into(),
            description: "Complete your first habit".into(),
        };
        assert_eq!(n.title(), "🏆 Achievement Unlocked!");
        assert_eq!(
            n.body(),
            "You earned the \"Starter\" badge! Complete your first habit"
        );
        assert_eq!(n.sound(), SoundKind::Achievement);
    }

    #[test]
    fn only_summaries_dismiss_themselves() {
        let summary = Notification::Summary {
            completed: 0,
            total: 0,
            points: 0,
        };
        let warning = Notification::Warning {
            habit_name: "Read".into(),
            streak: 3,
        };
        assert!(!summary.requires_interaction());
        assert!(warning.requires_interaction());
        assert_eq!(warning.sound().tone(), (400, 0.4));
        assert_eq!(summary.sound().tone(), SoundKind::Success.tone());
    }

    #[test]
    fn effect_serializes_tagged() {
        let json = serde_json::to_value(Effect::sound(SoundKind::Success)).unwrap();
        assert_eq!(json["type"], "PlaySound");
        assert_eq!(json["sound"], "success");
    }
}
