//! Achievement badges and their thresholds.
//!
//! Evaluation is a pure function of the snapshot: every threshold is
//! re-checked from scratch, so the order badges are checked in has no
//! effect on the result.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::derive;
use crate::snapshot::Snapshot;

/// Streak length that earns [`Badge::Consistent`].
pub const CONSISTENT_STREAK: u32 = 7;
/// Streak length that earns [`Badge::Dedicated`].
pub const DEDICATED_STREAK: u32 = 30;
/// Distinct completed categories that earn [`Badge::Diverse`].
pub const DIVERSE_CATEGORIES: usize = 5;
/// Total completions that earn [`Badge::Milestone`].
pub const MILESTONE_COMPLETIONS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Badge {
    Starter,
    Consistent,
    Dedicated,
    Diverse,
    Perfectionist,
    Milestone,
}

impl Badge {
    pub const ALL: [Badge; 6] = [
        Badge::Starter,
        Badge::Consistent,
        Badge::Dedicated,
        Badge::Diverse,
        Badge::Perfectionist,
        Badge::Milestone,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Badge::Starter => "Starter",
            Badge::Consistent => "Consistent",
            Badge::Dedicated => "Dedicated",
            Badge::Diverse => "Diverse",
            Badge::Perfectionist => "Perfectionist",
            Badge::Milestone => "Milestone",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Badge::Starter => "🌱",
            Badge::Consistent => "🔥",
            Badge::Dedicated => "💎",
            Badge::Diverse => "🌈",
            Badge::Perfectionist => "⭐",
            Badge::Milestone => "🏆",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Badge::Starter => "Complete your first habit",
            Badge::Consistent => "Maintain a 7-day streak",
            Badge::Dedicated => "Maintain a 30-day streak",
            Badge::Diverse => "Complete habits in 5 different categories",
            Badge::Perfectionist => "Complete all habits for a day",
            Badge::Milestone => "Complete 100 total habits",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Metrics the badge thresholds are checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeMetrics {
    pub total_completions: usize,
    pub longest_streak: u32,
    pub completed_categories: usize,
    pub perfect_day: bool,
}

impl BadgeMetrics {
    pub fn collect(snapshot: &Snapshot, today: NaiveDate) -> Self {
        Self {
            total_completions: derive::total_completions(snapshot),
            longest_streak: derive::longest_streak(snapshot, today),
            completed_categories: derive::completed_categories(snapshot).len(),
            perfect_day: derive::has_perfect_day(snapshot),
        }
    }

    pub fn qualifies(&self, badge: Badge) -> bool {
        match badge {
            Badge::Starter => self.total_completions >= 1,
            Badge::Consistent => self.longest_streak >= CONSISTENT_STREAK,
            Badge::Dedicated => self.longest_streak >= DEDICATED_STREAK,
            Badge::Diverse => self.completed_categories >= DIVERSE_CATEGORIES,
            Badge::Perfectionist => self.perfect_day,
            Badge::Milestone => self.total_completions >= MILESTONE_COMPLETIONS,
        }
    }
}

/// Badges whose threshold currently holds, earned or not.
pub fn qualifying(snapshot: &Snapshot, today: NaiveDate) -> Vec<Badge> {
    let metrics = BadgeMetrics::collect(snapshot, today);
    Badge::ALL
        .into_iter()
        .filter(|b| metrics.qualifies(*b))
        .collect()
}

/// Qualifying badges not yet in the earned set.
pub fn newly_earned(snapshot: &Snapshot, today: NaiveDate) -> Vec<Badge> {
    qualifying(snapshot, today)
        .into_iter()
        .filter(|b| !snapshot.has_badge(*b))
        .collect()
}
