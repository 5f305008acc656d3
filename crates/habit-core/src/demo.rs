//! Sample data for a first run.

use chrono::{DateTime, Duration, FixedOffset};

use crate::habit::{Category, HabitId, NewHabit};
use crate::snapshot::Snapshot;
use crate::store::POINTS_PER_COMPLETION;

struct DemoHabit {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    category: Category,
    target: &'static str,
    created_days_ago: i64,
    completed_days_ago: &'static [i64],
}

const DEMO_HABITS: &[DemoHabit] = &[
    DemoHabit {
        id: "demo-1",
        name: "Drink a glass of water",
        description: "Start the day with hydration",
        category: Category::Health,
        target: "1 minute",
        created_days_ago: 7,
        completed_days_ago: &[6, 5, 4, 3, 2, 1],
    },
    DemoHabit {
        id: "demo-2",
        name: "Write one sentence",
        description: "Daily writing practice",
        category: Category::Productivity,
        target: "5 minutes",
        created_days_ago: 5,
        completed_days_ago: &[4, 3, 2, 1],
    },
    DemoHabit {
        id: "demo-3",
        name: "Take 10 deep breaths",
        description: "Mindful breathing exercise",
        category: Category::Wellness,
        target: "2 minutes",
        created_days_ago: 3,
        completed_days_ago: &[2, 1],
    },
    DemoHabit {
        id: "demo-4",
        name: "10 push-ups",
        description: "Quick strength exercise",
        category: Category::Fitness,
        target: "2 minutes",
        created_days_ago: 10,
        completed_days_ago: &[9, 8, 7, 6, 5],
    },
];

/// Four starter habits with a few days of history ending yesterday.
///
/// Points match the completions; badges are left for the evaluator.
pub fn demo_snapshot(now: DateTime<FixedOffset>) -> Snapshot {
    let today = now.date_naive();
    let mut snapshot = Snapshot::default();

    for demo in DEMO_HABITS {
        let id = HabitId::from(demo.id);
        let input = NewHabit {
            name: demo.name.to_string(),
            description: Some(demo.description.to_string()),
            target_duration: Some(demo.target.to_string()),
            ..NewHabit::new("", demo.category)
        };
        snapshot
            .habits
            .push(input.into_habit(id.clone(), now - Duration::days(demo.created_days_ago)));

        for days_ago in demo.completed_days_ago {
            snapshot
                .completions
                .set(&id, today - Duration::days(*days_ago), true);
        }
    }

    snapshot.points = snapshot.completions.total() as u64 * POINTS_PER_COMPLETION;
    snapshot
}
