use chrono::Datelike;
use clap::Subcommand;
use habit_core::reports::{self, ReportRange};
use habit_core::Config;
use serde::Serialize;

use super::{existing_habit, open_session, CliResult};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's progress
    Today,
    /// All-time totals
    All,
    /// Current streak of one habit
    Streak {
        /// Habit ID
        id: String,
    },
    /// Habits and completions per category
    Categories,
    /// Completion rate, last 7 days and best habits
    Report {
        /// Range: week, month or year (default from config)
        #[arg(long)]
        range: Option<ReportRange>,
    },
    /// Year of completions for one habit
    Heatmap {
        /// Habit ID
        id: String,
        /// Year (default: this year)
        #[arg(long)]
        year: Option<i32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Totals {
    habits: usize,
    active_habits: usize,
    total_completions: usize,
    longest_streak: u32,
    points: u64,
    badges: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    range: ReportRange,
    completion_rate: u32,
    weekly_progress: Vec<reports::DayProgress>,
    best_performing: Vec<reports::HabitPerformance>,
}

pub fn run(action: StatsAction) -> CliResult {
    let session = open_session()?;
    let store = session.store();
    let snapshot = store.snapshot();
    let today = store.today();

    match action {
        StatsAction::Today => {
            let progress = store.daily_progress(today);
            println!("{}", serde_json::to_string_pretty(&progress)?);
        }
        StatsAction::All => {
            let totals = Totals {
                habits: snapshot.habits.len(),
                active_habits: snapshot.habits.iter().filter(|h| h.is_active).count(),
                total_completions: store.total_completions(),
                longest_streak: store.longest_streak(),
                points: snapshot.points,
                badges: snapshot.badges.len(),
            };
            println!("{}", serde_json::to_string_pretty(&totals)?);
        }
        StatsAction::Streak { id } => {
            let id = existing_habit(&session, &id)?;
            println!("{}", store.current_streak(&id));
        }
        StatsAction::Categories => {
            let stats = reports::category_stats(snapshot);
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        StatsAction::Report { range } => {
            let config = Config::load()?;
            let range = range.unwrap_or(config.reports.default_range);
            let report = Report {
                range,
                completion_rate: reports::completion_rate(snapshot, range, today),
                weekly_progress: reports::weekly_progress(snapshot, today),
                best_performing: reports::best_performing(snapshot, config.reports.top_habits),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        StatsAction::Heatmap { id, year, json } => {
            let id = existing_habit(&session, &id)?;
            let year = year.unwrap_or_else(|| today.year());
            let heatmap = reports::year_heatmap(snapshot, &id, year)
                .ok_or_else(|| format!("year out of range: {year}"))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&heatmap)?);
                return Ok(());
            }
            print_heatmap(&heatmap);
        }
    }
    Ok(())
}

/// Seven rows (Sunday first), one column per week.
fn print_heatmap(heatmap: &reports::YearHeatmap) {
    for weekday in 0..7 {
        let row: String = heatmap
            .weeks
            .iter()
            .map(|week| match week[weekday] {
                Some(day) if day.count > 0 => '#',
                Some(_) => '.',
                None => ' ',
            })
            .collect();
        println!("{row}");
    }
    println!(
        "{} days completed in {}",
        heatmap.completed_days, heatmap.year
    );
}
