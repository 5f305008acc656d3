//! Per-habit, per-day completion marks.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::habit::HabitId;

/// Marks for a single habit, keyed by calendar date.
pub type DayMarks = BTreeMap<NaiveDate, bool>;

/// Completion marks: habit id -> date -> completed.
///
/// A missing date reads as `false`. Explicit `false` entries are kept
/// (they count as a recorded day for success rates).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionMap(BTreeMap<HabitId, DayMarks>);

impl CompletionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_completed(&self, habit_id: &HabitId, date: NaiveDate) -> bool {
        self.0
            .get(habit_id)
            .and_then(|marks| marks.get(&date))
            .copied()
            .unwrap_or(false)
    }

    pub fn set(&mut self, habit_id: &HabitId, date: NaiveDate, completed: bool) {
        self.0
            .entry(habit_id.clone())
            .or_default()
            .insert(date, completed);
    }

    /// Drop every mark for a habit. Returns how many marks were removed.
    pub fn remove_habit(&mut self, habit_id: &HabitId) -> usize {
        self.0.remove(habit_id).map(|marks| marks.len()).unwrap_or(0)
    }

    /// Marks recorded for a habit, if any.
    pub fn entries(&self, habit_id: &HabitId) -> Option<&DayMarks> {
        self.0.get(habit_id)
    }

    pub fn contains_habit(&self, habit_id: &HabitId) -> bool {
        self.0.contains_key(habit_id)
    }

    pub fn habit_ids(&self) -> impl Iterator<Item = &HabitId> {
        self.0.keys()
    }

    /// Number of `true` marks for one habit.
    pub fn count_for(&self, habit_id: &HabitId) -> usize {
        self.0
            .get(habit_id)
            .map(|marks| marks.values().filter(|done| **done).count())
            .unwrap_or(0)
    }

    /// Number of `true` marks across all habits.
    pub fn total(&self) -> usize {
        self.0
            .values()
            .map(|marks| marks.values().filter(|done| **done).count())
            .sum()
    }

    /// Every date carrying at least one `true` mark.
    pub fn completed_dates(&self) -> BTreeSet<NaiveDate> {
        self.0
            .values()
            .flat_map(|marks| {
                marks
                    .iter()
                    .filter(|(_, done)| **done)
                    .map(|(date, _)| *date)
            })
            .collect()
    }

    /// Keep only the habits `keep` accepts.
    pub fn retain(&mut self, mut keep: impl FnMut(&HabitId) -> bool) {
        self.0.retain(|id, _| keep(id));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn absent_reads_as_false() {
        let map = CompletionMap::new();
        assert!(!map.is_completed(&HabitId::from("x"), day(1)));
    }

    #[test]
    fn totals_ignore_false_marks() {
        let mut map = CompletionMap::new();
        let a = HabitId::from("a");
        let b = HabitId::from("b");
        map.set(&a, day(1), true);
        map.set(&a, day(2), false);
        map.set(&b, day(2), true);
        assert_eq!(map.total(), 2);
        assert_eq!(map.count_for(&a), 1);
        assert_eq!(map.completed_dates().into_iter().collect::<Vec<_>>(), vec![day(1), day(2)]);
    }

    #[test]
    fn remove_habit_drops_all_marks() {
        let mut map = CompletionMap::new();
        let a = HabitId::from("a");
        map.set(&a, day(1), true);
        map.set(&a, day(3), true);
        assert_eq!(map.remove_habit(&a), 2);
        assert!(!map.contains_habit(&a));
        assert_eq!(map.remove_habit(&a), 0);
    }

    #[test]
    fn serializes_as_nested_date_keys() {
        let mut map = CompletionMap::new();
        map.set(&HabitId::from("demo-1"), day(7), true);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"demo-1":{"2024-05-07":true}}"#);
    }
}
