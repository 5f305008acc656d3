//! Habit management commands for CLI.

use clap::Args;
use habit_core::{Category, Frequency, HabitPatch, NewHabit};
use serde::Serialize;

use super::{existing_habit, open_session, parse_date, CliResult};

#[derive(Args)]
pub struct AddArgs {
    /// Habit name (at least 3 characters)
    name: String,
    /// Habit description
    #[arg(long)]
    description: Option<String>,
    /// Category: health, productivity, wellness, fitness, creativity, social, learning, mindfulness
    #[arg(long, default_value = "health")]
    category: Category,
    /// Frequency: daily, weekly, weekdays, weekends
    #[arg(long, default_value = "daily")]
    frequency: Frequency,
    /// Target duration (e.g. "2 minutes")
    #[arg(long)]
    target: Option<String>,
    /// Preferred reminder time (HH:MM)
    #[arg(long)]
    reminder: Option<String>,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Habit ID
    id: String,
    /// New name
    #[arg(long)]
    name: Option<String>,
    /// New description
    #[arg(long)]
    description: Option<String>,
    /// New category
    #[arg(long)]
    category: Option<Category>,
    /// New frequency
    #[arg(long)]
    frequency: Option<Frequency>,
    /// New target duration
    #[arg(long)]
    target: Option<String>,
    /// New reminder time
    #[arg(long)]
    reminder: Option<String>,
}

/// One row of `habit list`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HabitRow<'a> {
    #[serde(flatten)]
    habit: &'a habit_core::Habit,
    completed_today: bool,
    streak: u32,
}

pub fn add(args: AddArgs) -> CliResult {
    let mut session = open_session()?;
    let input = NewHabit {
        name: args.name,
        description: args.description,
        category: args.category,
        frequency: args.frequency,
        target_duration: args.target,
        reminder_time: args.reminder,
    };
    let (id, _) = session.try_apply(|store| store.add_habit(input))?;
    println!("Habit created: {id}");
    if let Some(habit) = session.store().snapshot().habit(&id) {
        println!("{}", serde_json::to_string_pretty(habit)?);
    }
    Ok(())
}

pub fn list(json: bool) -> CliResult {
    let session = open_session()?;
    let store = session.store();
    let today = store.today();
    let rows: Vec<_> = store
        .snapshot()
        .habits
        .iter()
        .map(|habit| HabitRow {
            habit,
            completed_today: store.is_completed(&habit.id, today),
            streak: store.current_streak(&habit.id),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    if rows.is_empty() {
        println!("No habits yet. Add one with `habit add <name>`.");
        return Ok(());
    }
    for row in rows {
        let mark = if row.completed_today { "[x]" } else { "[ ]" };
        let archived = if row.habit.is_active { "" } else { " (archived)" };
        println!(
            "{mark} {} {}{archived}  streak {}  {}",
            row.habit.category.emoji(),
            row.habit.name,
            row.streak,
            row.habit.id
        );
    }
    Ok(())
}

pub fn update(args: UpdateArgs) -> CliResult {
    let mut session = open_session()?;
    let id = existing_habit(&session, &args.id)?;
    let patch = HabitPatch {
        name: args.name,
        description: args.description,
        category: args.category,
        frequency: args.frequency,
        target_duration: args.target,
        reminder_time: args.reminder,
        is_active: None,
    };
    if patch.is_empty() {
        return Err("nothing to update".into());
    }
    session.try_apply(|store| store.update_habit(&id, patch))?;
    println!("Habit updated: {id}");
    Ok(())
}

pub fn delete(id: &str) -> CliResult {
    let mut session = open_session()?;
    let id = existing_habit(&session, id)?;
    let _ = session.apply(|store| store.delete_habit(&id));
    println!("Habit deleted: {id}");
    Ok(())
}

pub fn toggle(id: &str, date: Option<&str>) -> CliResult {
    let mut session = open_session()?;
    let id = existing_habit(&session, id)?;
    let date = match date {
        Some(value) => parse_date(value)?,
        None => session.store().today(),
    };
    let (completed, _) = session.apply(|store| store.toggle_completion(&id, date));
    match completed {
        Some(true) => println!("Completed {id} on {date}"),
        Some(false) => println!("Unmarked {id} on {date}"),
        None => return Err(format!("habit not found: {id}").into()),
    }
    println!("Points: {}", session.store().snapshot().points);
    Ok(())
}

pub fn set_active(id: &str, active: bool) -> CliResult {
    let mut session = open_session()?;
    let id = existing_habit(&session, id)?;
    session.try_apply(|store| store.update_habit(&id, HabitPatch::active(active)))?;
    if active {
        println!("Habit activated: {id}");
    } else {
        println!("Habit archived: {id}");
    }
    Ok(())
}
