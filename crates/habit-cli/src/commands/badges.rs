use habit_core::Badge;
use serde::Serialize;

use super::{open_session, CliResult};

#[derive(Serialize)]
struct BadgeRow {
    id: Badge,
    name: &'static str,
    description: &'static str,
    earned: bool,
}

pub fn run(json: bool) -> CliResult {
    let session = open_session()?;
    let snapshot = session.store().snapshot();
    let rows: Vec<_> = Badge::ALL
        .into_iter()
        .map(|badge| BadgeRow {
            id: badge,
            name: badge.name(),
            description: badge.description(),
            earned: snapshot.has_badge(badge),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    for row in &rows {
        let icon = if row.earned { row.id.emoji() } else { "🔒" };
        println!("{icon} {:<14} {}", row.name, row.description);
    }
    println!(
        "{}/{} earned, {} points",
        snapshot.badges.len(),
        Badge::ALL.len(),
        snapshot.points
    );
    Ok(())
}
