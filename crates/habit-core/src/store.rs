//! The habit store: sole owner of the tracker state.
//!
//! Every mutation takes `&mut self`, is applied in full before it returns,
//! and then re-runs badge evaluation. Side effects (notifications, sounds)
//! come back to the caller as a list of [`Effect`]s; the store never
//! performs them itself.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::badges::{self, Badge};
use crate::clock::{Clock, SystemClock};
use crate::derive::{self, DailyProgress};
use crate::effects::{Effect, Notification, SoundKind};
use crate::error::ValidationError;
use crate::export::{ExportDocument, ImportSummary};
use crate::habit::{HabitId, HabitPatch, NewHabit};
use crate::snapshot::{SettingsPatch, Snapshot};

/// Points added per completion and removed per un-completion.
pub const POINTS_PER_COMPLETION: u64 = 10;

/// Outcome of a mutation: its return value plus the effects to dispatch.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "effects returned by a mutation should be dispatched"]
pub struct Transition<T = ()> {
    pub value: T,
    pub effects: Vec<Effect>,
}

impl<T> Transition<T> {
    fn new(value: T, effects: Vec<Effect>) -> Self {
        Self { value, effects }
    }

    /// Newly earned badges announced by this transition.
    pub fn achievements(&self) -> impl Iterator<Item = &Notification> {
        self.effects.iter().filter_map(|e| match e {
            Effect::Notify { notification } if matches!(notification, Notification::Achievement { .. }) => {
                Some(notification)
            }
            _ => None,
        })
    }
}

pub struct HabitStore<C: Clock = SystemClock> {
    snapshot: Snapshot,
    clock: C,
    /// Badges awarded since the store was created, in award order.
    awarded: Vec<Badge>,
}

impl HabitStore<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(Snapshot::default(), SystemClock)
    }
}

impl Default for HabitStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> HabitStore<C> {
    /// Wrap an existing snapshot without evaluating badges.
    pub fn with_clock(snapshot: Snapshot, clock: C) -> Self {
        Self {
            snapshot,
            clock,
            awarded: Vec::new(),
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Badges awarded by this store instance, oldest first.
    pub fn awarded(&self) -> &[Badge] {
        &self.awarded
    }

    // Queries

    pub fn current_streak(&self, habit_id: &HabitId) -> u32 {
        derive::current_streak(&self.snapshot, habit_id, self.today())
    }

    pub fn longest_streak(&self) -> u32 {
        derive::longest_streak(&self.snapshot, self.today())
    }

    pub fn total_completions(&self) -> usize {
        derive::total_completions(&self.snapshot)
    }

    pub fn daily_progress(&self, date: NaiveDate) -> DailyProgress {
        derive::daily_progress(&self.snapshot, date)
    }

    pub fn is_completed(&self, habit_id: &HabitId, date: NaiveDate) -> bool {
        self.snapshot.completions.is_completed(habit_id, date)
    }

    // Mutations

    /// Validate and append a new active habit.
    pub fn add_habit(&mut self, input: NewHabit) -> Result<Transition<HabitId>, ValidationError> {
        input.validate()?;

        let id = HabitId::generate();
        let habit = input.into_habit(id.clone(), self.clock.now());
        debug!(habit_id = %id, name = %habit.name, category = %habit.category, "habit added");
        self.snapshot.habits.push(habit);

        Ok(Transition::new(id, self.settle(Vec::new())))
    }

    /// Merge `patch` into the habit. Unknown ids are a no-op (`value == false`).
    pub fn update_habit(
        &mut self,
        habit_id: &HabitId,
        patch: HabitPatch,
    ) -> Result<Transition<bool>, ValidationError> {
        patch.validate()?;

        let Some(habit) = self.snapshot.habits.iter_mut().find(|h| &h.id == habit_id) else {
            debug!(habit_id = %habit_id, "update for unknown habit ignored");
            return Ok(Transition::new(false, Vec::new()));
        };
        habit.apply(patch);
        debug!(habit_id = %habit_id, "habit updated");

        Ok(Transition::new(true, self.settle(Vec::new())))
    }

    /// Remove a habit and every completion recorded for it.
    pub fn delete_habit(&mut self, habit_id: &HabitId) -> Transition<bool> {
        let before = self.snapshot.habits.len();
        self.snapshot.habits.retain(|h| &h.id != habit_id);
        if self.snapshot.habits.len() == before {
            debug!(habit_id = %habit_id, "delete for unknown habit ignored");
            return Transition::new(false, Vec::new());
        }

        let removed = self.snapshot.completions.remove_habit(habit_id);
        debug!(habit_id = %habit_id, removed_marks = removed, "habit deleted");

        Transition::new(true, self.settle(Vec::new()))
    }

    /// Flip the mark for `habit_id` on `date` and adjust points.
    ///
    /// Returns the new mark, or `None` when the habit does not exist.
    pub fn toggle_completion(&mut self, habit_id: &HabitId, date: NaiveDate) -> Transition<Option<bool>> {
        let Some(habit_name) = self.snapshot.habit(habit_id).map(|h| h.name.clone()) else {
            debug!(habit_id = %habit_id, %date, "toggle for unknown habit ignored");
            return Transition::new(None, Vec::new());
        };

        let completed = !self.snapshot.completions.is_completed(habit_id, date);
        self.snapshot.completions.set(habit_id, date, completed);
        self.snapshot.points = if completed {
            self.snapshot.points.saturating_add(POINTS_PER_COMPLETION)
        } else {
            self.snapshot.points.saturating_sub(POINTS_PER_COMPLETION)
        };
        debug!(habit_id = %habit_id, %date, completed, points = self.snapshot.points, "completion toggled");

        let mut effects = Vec::new();
        if completed {
            let settings = self.snapshot.settings;
            if settings.notifications && settings.sound_enabled {
                effects.push(Effect::sound(SoundKind::Success));
            }

            let streak = derive::current_streak(&self.snapshot, habit_id, date);
            if settings.streak_reminders && is_streak_milestone(streak) {
                self.announce(
                    Notification::Reminder {
                        habit_name,
                        streak,
                    },
                    &mut effects,
                );
            }
        }

        Transition::new(Some(completed), self.settle(effects))
    }

    /// Record a badge as earned. Returns `false` if it already was.
    pub fn add_badge(&mut self, badge: Badge) -> bool {
        if self.snapshot.has_badge(badge) {
            return false;
        }
        self.snapshot.badges.push(badge);
        self.awarded.push(badge);
        true
    }

    pub fn update_settings(&mut self, patch: SettingsPatch) -> Transition {
        self.snapshot.settings.merge(patch);
        debug!(settings = ?self.snapshot.settings, "settings updated");
        Transition::new((), self.settle(Vec::new()))
    }

    /// Flip the dark-mode flag and return its new value.
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.snapshot.dark_mode = !self.snapshot.dark_mode;
        self.snapshot.dark_mode
    }

    /// Swap in a loaded snapshot, then evaluate badges against it.
    pub fn replace(&mut self, mut snapshot: Snapshot) -> Transition {
        let orphans = snapshot.prune_orphans();
        if orphans > 0 {
            debug!(orphans, "dropped completions for unknown habits");
        }
        self.snapshot = snapshot;
        Transition::new((), self.settle(Vec::new()))
    }

    /// Replace habits and completions with an export's contents.
    ///
    /// Points, badges and settings are kept.
    pub fn import(&mut self, document: ExportDocument) -> Transition<ImportSummary> {
        self.snapshot.habits = document.habits;
        self.snapshot.completions = document.completions;
        let orphans_dropped = self.snapshot.prune_orphans();

        let summary = ImportSummary {
            habits: self.snapshot.habits.len(),
            completions: self.snapshot.completions.total(),
            orphans_dropped,
        };
        info!(?summary, "data imported");

        Transition::new(summary, self.settle(Vec::new()))
    }

    /// Seed sample habits and their history into an empty tracker.
    ///
    /// Refused (`value == false`) while any habit exists. Earned badges,
    /// settings and dark mode are kept; the sample completions add their
    /// points on top of the current total.
    pub fn seed_demo(&mut self, demo: Snapshot) -> Transition<bool> {
        if !self.snapshot.habits.is_empty() {
            debug!(habits = self.snapshot.habits.len(), "demo data refused, habits exist");
            return Transition::new(false, Vec::new());
        }

        self.snapshot.habits = demo.habits;
        self.snapshot.completions = demo.completions;
        self.snapshot.prune_orphans();
        let earned = self.snapshot.completions.total() as u64 * POINTS_PER_COMPLETION;
        self.snapshot.points = self.snapshot.points.saturating_add(earned);
        info!(habits = self.snapshot.habits.len(), points = earned, "demo data loaded");

        Transition::new(true, self.settle(Vec::new()))
    }

    /// Reset to the empty snapshot.
    pub fn clear(&mut self) {
        info!(habits = self.snapshot.habits.len(), "all data cleared");
        self.snapshot = Snapshot::default();
        self.awarded.clear();
    }

    /// Award every newly qualifying badge and append its announcement.
    fn settle(&mut self, mut effects: Vec<Effect>) -> Vec<Effect> {
        let today = self.today();
        for badge in badges::newly_earned(&self.snapshot, today) {
            if self.add_badge(badge) {
                info!(badge = %badge, "badge earned");
                self.announce(
                    Notification::Achievement {
                        badge_name: badge.name().to_string(),
                        description: badge.description().to_string(),
                    },
                    &mut effects,
                );
            }
        }
        effects
    }

    fn announce(&self, notification: Notification, effects: &mut Vec<Effect>) {
        let settings = self.snapshot.settings;
        if !settings.notifications {
            return;
        }
        if settings.sound_enabled {
            effects.push(Effect::sound(notification.sound()));
        }
        effects.push(Effect::notify(notification));
    }
}

/// Streak lengths that trigger a reminder when reached: 7, 30 and every 50.
pub fn is_streak_milestone(streak: u32) -> bool {
    streak == 7 || streak == 30 || (streak > 0 && streak % 50 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::habit::Category;
    use chrono::Duration;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
    }

    fn store() -> HabitStore<FixedClock> {
        HabitStore::with_clock(Snapshot::default(), FixedClock::at_date(start()))
    }

    #[test]
    fn add_habit_rejects_short_names_without_mutating() {
        let mut s = store();
        let err = s.add_habit(NewHabit::new("ab", Category::Health)).unwrap_err();
        assert_eq!(err.field(), "name");
        assert!(s.snapshot().habits.is_empty());
    }

    #[test]
    fn add_habit_assigns_distinct_ids() {
        let mut s = store();
        let a = s.add_habit(NewHabit::new("Walk", Category::Fitness)).unwrap().value;
        let b = s.add_habit(NewHabit::new("Walk", Category::Fitness)).unwrap().value;
        assert_ne!(a, b);
        let habit = s.snapshot().habit(&a).unwrap();
        assert!(habit.is_active);
        assert_eq!(habit.created_on(), start());
    }

    #[test]
    fn toggle_adjusts_points_with_floor() {
        let mut s = store();
        let id = s.add_habit(NewHabit::new("Walk", Category::Fitness)).unwrap().value;

        assert_eq!(s.toggle_completion(&id, start()).value, Some(true));
        assert_eq!(s.snapshot().points, 10);
        assert_eq!(s.toggle_completion(&id, start()).value, Some(false));
        assert_eq!(s.snapshot().points, 0);

        // A `true` mark loaded alongside zero points cannot push below zero.
        let mut snapshot = s.snapshot().clone();
        snapshot.completions.set(&id, start(), true);
        snapshot.points = 0;
        let _ = s.replace(snapshot);
        let _ = s.toggle_completion(&id, start());
        assert_eq!(s.snapshot().points, 0);
    }

    #[test]
    fn toggle_on_unknown_habit_is_a_noop() {
        let mut s = store();
        let t = s.toggle_completion(&HabitId::from("ghost"), start());
        assert_eq!(t.value, None);
        assert!(s.snapshot().completions.is_empty());
        assert_eq!(s.snapshot().points, 0);
    }

    #[test]
    fn first_completion_earns_starter_with_sound() {
        let mut s = store();
        let id = s.add_habit(NewHabit::new("Walk", Category::Fitness)).unwrap().value;
        let t = s.toggle_completion(&id, start());

        assert_eq!(
            t.effects,
            vec![
                Effect::sound(SoundKind::Success),
                Effect::sound(SoundKind::Achievement),
                Effect::notify(Notification::Achievement {
                    badge_name: "Starter".into(),
                    description: "Complete your first habit".into(),
                }),
                // The only habit was done on its first day, so that day is perfect.
                Effect::sound(SoundKind::Achievement),
                Effect::notify(Notification::Achievement {
                    badge_name: "Perfectionist".into(),
                    description: "Complete all habits for a day".into(),
                }),
            ]
        );
        assert!(s.snapshot().has_badge(Badge::Starter));
        assert!(s.snapshot().has_badge(Badge::Perfectionist));
    }

    #[test]
    fn muted_settings_suppress_effects_not_badges() {
        let mut s = store();
        let _ = s.update_settings(SettingsPatch {
            notifications: Some(false),
            ..SettingsPatch::default()
        });
        let id = s.add_habit(NewHabit::new("Walk", Category::Fitness)).unwrap().value;
        let t = s.toggle_completion(&id, start());
        assert!(t.effects.is_empty());
        assert!(s.snapshot().has_badge(Badge::Starter));
    }

    #[test]
    fn badges_survive_untoggling() {
        let mut s = store();
        let id = s.add_habit(NewHabit::new("Walk", Category::Fitness)).unwrap().value;
        let _ = s.toggle_completion(&id, start());
        let t = s.toggle_completion(&id, start());
        assert_eq!(t.achievements().count(), 0);
        assert!(s.snapshot().has_badge(Badge::Starter));
        assert_eq!(s.awarded(), &[Badge::Starter, Badge::Perfectionist]);
    }

    #[test]
    fn seventh_day_sends_streak_reminder() {
        let mut s = store();
        let id = s.add_habit(NewHabit::new("Walk", Category::Fitness)).unwrap().value;
        for d in 0..6 {
            s.clock_mut().advance_days(if d == 0 { 0 } else { 1 });
            let _ = s.toggle_completion(&id, start() + Duration::days(d));
        }
        s.clock_mut().advance_days(1);
        let t = s.toggle_completion(&id, start() + Duration::days(6));

        assert!(t.effects.contains(&Effect::notify(Notification::Reminder {
            habit_name: "Walk".into(),
            streak: 7,
        })));
        assert!(t.achievements().any(|n| matches!(
            n,
            Notification::Achievement { badge_name, .. } if badge_name == "Consistent"
        )));
    }

    #[test]
    fn delete_cascades_completions() {
        let mut s = store();
        let id = s.add_habit(NewHabit::new("Walk", Category::Fitness)).unwrap().value;
        let _ = s.toggle_completion(&id, start());
        assert!(s.delete_habit(&id).value);
        assert!(!s.snapshot().completions.contains_habit(&id));
        assert_eq!(s.current_streak(&id), 0);
        assert!(!s.delete_habit(&id).value);
    }

    #[test]
    fn update_unknown_habit_is_noop_but_invalid_name_is_rejected() {
        let mut s = store();
        let id = s.add_habit(NewHabit::new("Walk", Category::Fitness)).unwrap().value;

        let t = s.update_habit(&HabitId::from("nope"), HabitPatch::active(false)).unwrap();
        assert!(!t.value);

        let bad = HabitPatch {
            name: Some("x".into()),
            ..HabitPatch::default()
        };
        assert!(s.update_habit(&id, bad).is_err());
        assert_eq!(s.snapshot().habit(&id).unwrap().name, "Walk");
    }

    #[test]
    fn add_badge_is_idempotent() {
        let mut s = store();
        assert!(s.add_badge(Badge::Diverse));
        assert!(!s.add_badge(Badge::Diverse));
        assert_eq!(s.snapshot().badges, vec![Badge::Diverse]);
    }

    #[test]
    fn dark_mode_flips() {
        let mut s = store();
        assert!(s.toggle_dark_mode());
        assert!(!s.toggle_dark_mode());
    }

    #[test]
    fn demo_seed_keeps_earned_badges_and_settings() {
        let mut s = store();
        let id = s.add_habit(NewHabit::new("Walk", Category::Fitness)).unwrap().value;
        for d in 0..7 {
            let _ = s.toggle_completion(&id, start() + Duration::days(d));
            if d < 6 {
                s.clock_mut().advance_days(1);
            }
        }
        assert!(s.snapshot().has_badge(Badge::Consistent));
        let _ = s.delete_habit(&id);
        assert!(s.toggle_dark_mode());
        let earned = s.snapshot().badges.clone();
        let points = s.snapshot().points;

        let demo = crate::demo::demo_snapshot(s.clock().now());
        let t = s.seed_demo(demo);
        assert!(t.value);
        assert_eq!(s.snapshot().habits.len(), 4);
        assert!(s.snapshot().badges.starts_with(&earned));
        assert_eq!(s.snapshot().points, points + 170);
        assert!(s.snapshot().dark_mode);

        // A second seed is refused while habits exist.
        let again = crate::demo::demo_snapshot(s.clock().now());
        assert!(!s.seed_demo(again).value);
        assert_eq!(s.snapshot().habits.len(), 4);
    }

    #[test]
    fn clear_forgets_awarded_badges() {
        let mut s = store();
        let id = s.add_habit(NewHabit::new("Walk", Category::Fitness)).unwrap().value;
        let _ = s.toggle_completion(&id, start());
        assert!(!s.awarded().is_empty());

        s.clear();
        assert!(s.awarded().is_empty());
        assert!(s.snapshot().badges.is_empty());
        assert_eq!(s.snapshot().points, 0);
    }

    #[test]
    fn milestones() {
        assert!(is_streak_milestone(7));
        assert!(is_streak_milestone(30));
        assert!(is_streak_milestone(100));
        assert!(!is_streak_milestone(0));
        assert!(!is_streak_milestone(8));
    }
}
