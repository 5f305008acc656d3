//! Aggregate views over the snapshot: completion rates, category totals,
//! weekly progress, top habits and per-habit year heatmaps.
//!
//! Like [`crate::derive`], everything here is a pure function of the
//! snapshot and an explicit reference date.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::derive::{self, current_streak};
use crate::effects::Notification;
use crate::error::ValidationError;
use crate::habit::{Category, HabitId};
use crate::snapshot::Snapshot;

/// Look-back window for completion rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportRange {
    #[default]
    Week,
    Month,
    Year,
}

impl ReportRange {
    pub fn days(&self) -> i64 {
        match self {
            ReportRange::Week => 7,
            ReportRange::Month => 30,
            ReportRange::Year => 365,
        }
    }
}

impl fmt::Display for ReportRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReportRange::Week => "week",
            ReportRange::Month => "month",
            ReportRange::Year => "year",
        })
    }
}

impl FromStr for ReportRange {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(ReportRange::Week),
            "month" => Ok(ReportRange::Month),
            "year" => Ok(ReportRange::Year),
            other => Err(ValidationError::InvalidValue {
                field: "range".to_string(),
                message: format!("expected week, month or year, got '{other}'"),
            }),
        }
    }
}

fn round_percent(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (completed as f64 / total as f64 * 100.0).round() as u32
}

/// Rounded percentage of possible completions achieved over the window
/// ending at `today`.
pub fn completion_rate(snapshot: &Snapshot, range: ReportRange, today: NaiveDate) -> u32 {
    let (possible, completed) = (0..range.days())
        .map(|offset| today - Duration::days(offset))
        .fold((0, 0), |(possible, completed), date| {
            let progress = derive::daily_progress(snapshot, date);
            (possible + progress.total, completed + progress.completed)
        });
    round_percent(completed, possible)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category: Category,
    pub habit_count: usize,
    pub completions: usize,
}

/// Habit and completion counts for every category, in category order.
pub fn category_stats(snapshot: &Snapshot) -> Vec<CategoryStats> {
    Category::ALL
        .into_iter()
        .map(|category| {
            let habits: Vec<_> = snapshot
                .habits
                .iter()
                .filter(|h| h.category == category)
                .collect();
            CategoryStats {
                category,
                habit_count: habits.len(),
                completions: habits
                    .iter()
                    .map(|h| snapshot.completions.count_for(&h.id))
                    .sum(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayProgress {
    pub date: NaiveDate,
    /// Short weekday name ("Mon").
    pub weekday: String,
    pub total: usize,
    pub completed: usize,
    pub percentage: u32,
}

/// Progress for the seven days ending at `today`, oldest first.
pub fn weekly_progress(snapshot: &Snapshot, today: NaiveDate) -> Vec<DayProgress> {
    (0..7)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            let progress = derive::daily_progress(snapshot, date);
            DayProgress {
                date,
                weekday: date.format("%a").to_string(),
                total: progress.total,
                completed: progress.completed,
                percentage: round_percent(progress.completed, progress.total),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitPerformance {
    pub id: HabitId,
    pub name: String,
    pub category: Category,
    /// Completed days over recorded days, rounded percent.
    pub success_rate: u32,
    pub total_completions: usize,
    pub recorded_days: usize,
}

/// Habits ranked by success rate, highest first, at most `limit` of them.
///
/// Ties keep habit insertion order.
pub fn best_performing(snapshot: &Snapshot, limit: usize) -> Vec<HabitPerformance> {
    let mut ranked: Vec<_> = snapshot
        .habits
        .iter()
        .map(|h| {
            let recorded_days = snapshot.completions.entries(&h.id).map_or(0, |m| m.len());
            let total_completions = snapshot.completions.count_for(&h.id);
            HabitPerformance {
                id: h.id.clone(),
                name: h.name.clone(),
                category: h.category,
                success_rate: round_percent(total_completions, recorded_days),
                total_completions,
                recorded_days,
            }
        })
        .collect();
    ranked.sort_by(|a, b| b.success_rate.cmp(&a.success_rate));
    ranked.truncate(limit);
    ranked
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapDay {
    pub date: NaiveDate,
    pub count: u8,
}

/// One calendar year of a habit's completions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearHeatmap {
    pub habit_id: HabitId,
    pub year: i32,
    /// Sunday-first weeks; cells outside the year are `None`.
    pub weeks: Vec<[Option<HeatmapDay>; 7]>,
    pub completed_days: usize,
}

/// Day-by-day completion grid for `year`.
pub fn year_heatmap(snapshot: &Snapshot, habit_id: &HabitId, year: i32) -> Option<YearHeatmap> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let last = NaiveDate::from_ymd_opt(year, 12, 31)?;

    let mut weeks = Vec::new();
    let mut week: [Option<HeatmapDay>; 7] = [None; 7];
    let mut completed_days = 0;

    for date in first.iter_days().take_while(|d| *d <= last) {
        let slot = date.weekday().num_days_from_sunday() as usize;
        let done = snapshot.completions.is_completed(habit_id, date);
        completed_days += usize::from(done);
        week[slot] = Some(HeatmapDay {
            date,
            count: u8::from(done),
        });
        if date.weekday() == Weekday::Sat {
            weeks.push(week);
            week = [None; 7];
        }
    }
    if week.iter().any(Option::is_some) {
        weeks.push(week);
    }

    Some(YearHeatmap {
        habit_id: habit_id.clone(),
        year,
        weeks,
        completed_days,
    })
}

/// Warnings for active habits whose streak (through yesterday) will break
/// unless they are completed today.
pub fn streak_warnings(snapshot: &Snapshot, today: NaiveDate) -> Vec<Notification> {
    let Some(yesterday) = today.pred_opt() else {
        return Vec::new();
    };
    snapshot
        .habits
        .iter()
        .filter(|h| h.is_active && !snapshot.completions.is_completed(&h.id, today))
        .filter_map(|h| {
            let streak = current_streak(snapshot, &h.id, yesterday);
            (streak > 0).then(|| Notification::Warning {
                habit_name: h.name.clone(),
                streak,
            })
        })
        .collect()
}

/// End-of-day summary for `today`.
pub fn daily_summary(snapshot: &Snapshot, today: NaiveDate) -> Notification {
    let progress = derive::daily_progress(snapshot, today);
    Notification::Summary {
        completed: progress.completed,
        total: progress.total,
        points: snapshot.points,
    }
}
