//! Pure queries over a [`Snapshot`].
//!
//! Nothing here is cached: every value is recomputed from the snapshot it is
//! given, so a caller can never observe a stale derivation. Dates are plain
//! calendar dates; there is no timezone arithmetic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::habit::{Category, HabitId};
use crate::snapshot::Snapshot;

/// Completion ratio for a single day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyProgress {
    pub total: usize,
    pub completed: usize,
    /// 0.0 to 100.0; 0.0 when `total` is zero.
    pub percentage: f64,
}

/// Consecutive completed days ending at `as_of`, walking backwards.
///
/// Zero when `as_of` itself is not completed.
pub fn current_streak(snapshot: &Snapshot, habit_id: &HabitId, as_of: NaiveDate) -> u32 {
    let Some(marks) = snapshot.completions.entries(habit_id) else {
        return 0;
    };

    let mut streak = 0;
    let mut date = Some(as_of);
    while let Some(day) = date {
        if !marks.get(&day).copied().unwrap_or(false) {
            break;
        }
        streak += 1;
        date = day.pred_opt();
    }
    streak
}

/// Largest current streak (as of `today`) across all habits.
///
/// This is not a scan for the longest historical run: a streak that was
/// broken before `today` no longer counts.
pub fn longest_streak(snapshot: &Snapshot, today: NaiveDate) -> u32 {
    snapshot
        .habits
        .iter()
        .map(|h| current_streak(snapshot, &h.id, today))
        .max()
        .unwrap_or(0)
}

/// Count of `true` marks over every habit and date.
pub fn total_completions(snapshot: &Snapshot) -> usize {
    snapshot.completions.total()
}

/// Progress of active habits that existed on `date`.
pub fn daily_progress(snapshot: &Snapshot, date: NaiveDate) -> DailyProgress {
    let (total, completed) = snapshot
        .habits
        .iter()
        .filter(|h| h.is_active && h.exists_on(date))
        .fold((0, 0), |(total, completed), h| {
            let done = snapshot.completions.is_completed(&h.id, date);
            (total + 1, completed + usize::from(done))
        });

    let percentage = if total > 0 {
        completed as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    DailyProgress {
        total,
        completed,
        percentage,
    }
}

/// Categories of habits with at least one completion ever.
pub fn completed_categories(snapshot: &Snapshot) -> BTreeSet<Category> {
    snapshot
        .habits
        .iter()
        .filter(|h| snapshot.completions.count_for(&h.id) > 0)
        .map(|h| h.category)
        .collect()
}

/// Whether some day had every then-existing habit completed.
///
/// Active and inactive habits both count. A day on which no habit existed
/// is never perfect.
pub fn has_perfect_day(snapshot: &Snapshot) -> bool {
    perfect_days(snapshot).next().is_some()
}

/// All perfect days in ascending order.
pub fn perfect_days(snapshot: &Snapshot) -> impl Iterator<Item = NaiveDate> + '_ {
    snapshot
        .completions
        .completed_dates()
        .into_iter()
        .filter(move |date| {
            let mut existing = snapshot.habits.iter().filter(|h| h.exists_on(*date)).peekable();
            existing.peek().is_some()
                && existing.all(|h| snapshot.completions.is_completed(&h.id, *date))
        })
}
