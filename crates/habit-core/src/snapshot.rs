//! The full serializable state of the tracker.

use serde::{Deserialize, Serialize};

use crate::badges::Badge;
use crate::completion::CompletionMap;
use crate::habit::{Habit, HabitId};

/// User-facing notification toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_true")]
    pub notifications: bool,
    #[serde(default = "default_true")]
    pub streak_reminders: bool,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notifications: true,
            streak_reminders: true,
            sound_enabled: true,
        }
    }
}

/// Shallow partial update for [`Settings`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default)]
    pub notifications: Option<bool>,
    #[serde(default)]
    pub streak_reminders: Option<bool>,
    #[serde(default)]
    pub sound_enabled: Option<bool>,
}

impl SettingsPatch {
    /// Build a patch for one setting addressed by its snapshot key.
    pub fn single(key: &str, value: bool) -> Option<Self> {
        let mut patch = Self::default();
        match key {
            "notifications" => patch.notifications = Some(value),
            "streakReminders" | "streak_reminders" => patch.streak_reminders = Some(value),
            "soundEnabled" | "sound_enabled" => patch.sound_enabled = Some(value),
            _ => return None,
        }
        Some(patch)
    }
}

impl Settings {
    pub fn merge(&mut self, patch: SettingsPatch) {
        if let Some(v) = patch.notifications {
            self.notifications = v;
        }
        if let Some(v) = patch.streak_reminders {
            self.streak_reminders = v;
        }
        if let Some(v) = patch.sound_enabled {
            self.sound_enabled = v;
        }
    }
}

/// Everything the tracker persists.
///
/// Missing fields take their initial values, so a partial document merges
/// over the empty snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub habits: Vec<Habit>,
    #[serde(default)]
    pub completions: CompletionMap,
    #[serde(default)]
    pub points: u64,
    #[serde(default)]
    pub badges: Vec<Badge>,
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default)]
    pub settings: Settings,
}

impl Snapshot {
    pub fn habit(&self, id: &HabitId) -> Option<&Habit> {
        self.habits.iter().find(|h| &h.id == id)
    }

    pub fn has_badge(&self, badge: Badge) -> bool {
        self.badges.contains(&badge)
    }

    /// Drop completion entries whose habit no longer exists.
    pub(crate) fn prune_orphans(&mut self) -> usize {
        let before = self.completions.habit_ids().count();
        let habits = &self.habits;
        self.completions
            .retain(|id| habits.iter().any(|h| &h.id == id));
        before - self.completions.habit_ids().count()
    }
}
