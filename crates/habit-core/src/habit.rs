//! Habit definitions and creation-time validation.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::ValidationError;

/// Minimum length of a trimmed habit name.
pub const MIN_NAME_LEN: usize = 3;

/// Opaque habit identifier.
///
/// New habits get a v4 UUID. Identifiers loaded from a snapshot are kept
/// verbatim, whatever their shape.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(String);

impl HabitId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HabitId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for HabitId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Fixed set of habit categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Health,
    Productivity,
    Wellness,
    Fitness,
    Creativity,
    Social,
    Learning,
    Mindfulness,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Health,
        Category::Productivity,
        Category::Wellness,
        Category::Fitness,
        Category::Creativity,
        Category::Social,
        Category::Learning,
        Category::Mindfulness,
    ];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Health => "Health",
            Category::Productivity => "Productivity",
            Category::Wellness => "Wellness",
            Category::Fitness => "Fitness",
            Category::Creativity => "Creativity",
            Category::Social => "Social",
            Category::Learning => "Learning",
            Category::Mindfulness => "Mindfulness",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Category::Health => "🍎",
            Category::Productivity => "📚",
            Category::Wellness => "💧",
            Category::Fitness => "💪",
            Category::Creativity => "🎨",
            Category::Social => "👥",
            Category::Learning => "🧠",
            Category::Mindfulness => "🧘",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "category".to_string(),
                message: format!("unknown category '{s}'"),
            })
    }
}

/// How often a habit is meant to be done.
///
/// Descriptive only: every calendar date can be marked regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Weekdays,
    Weekends,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Weekdays => "Weekdays",
            Frequency::Weekends => "Weekends",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Frequency::Daily,
            Frequency::Weekly,
            Frequency::Weekdays,
            Frequency::Weekends,
        ]
        .into_iter()
        .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
        .ok_or_else(|| ValidationError::InvalidValue {
            field: "frequency".to_string(),
            message: format!("unknown frequency '{s}'"),
        })
    }
}

/// A tracked habit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: Category,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_duration: Option<String>,
    /// Preferred reminder time (HH:mm), informational.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<String>,
    /// Creation instant, kept with the local offset it was created under.
    pub created_at: DateTime<FixedOffset>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Habit {
    /// Calendar date the habit was created on, in its creation offset.
    pub fn created_on(&self) -> NaiveDate {
        self.created_at.date_naive()
    }

    /// Whether the habit existed on `date`.
    pub fn exists_on(&self, date: NaiveDate) -> bool {
        self.created_on() <= date
    }

    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: HabitPatch) {
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = patch.description {
            self.description = non_empty(description);
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(frequency) = patch.frequency {
            self.frequency = frequency;
        }
        if let Some(target) = patch.target_duration {
            self.target_duration = non_empty(target);
        }
        if let Some(reminder) = patch.reminder_time {
            self.reminder_time = non_empty(reminder);
        }
        if let Some(active) = patch.is_active {
            self.is_active = active;
        }
    }
}

/// Input for creating a habit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHabit {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_category")]
    pub category: Category,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default)]
    pub target_duration: Option<String>,
    #[serde(default)]
    pub reminder_time: Option<String>,
}

fn default_category() -> Category {
    Category::Health
}

impl Default for Category {
    fn default() -> Self {
        default_category()
    }
}

impl NewHabit {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            category,
            ..Self::default()
        }
    }

    /// Check the fields a habit must satisfy before it is stored.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)
    }

    /// Build the stored habit. Callers validate first.
    pub(crate) fn into_habit(self, id: HabitId, created_at: DateTime<FixedOffset>) -> Habit {
        Habit {
            id,
            name: self.name.trim().to_string(),
            description: self.description.and_then(non_empty),
            category: self.category,
            frequency: self.frequency,
            target_duration: self.target_duration.and_then(non_empty),
            reminder_time: self.reminder_time.and_then(non_empty),
            created_at,
            is_active: true,
        }
    }
}

/// Partial update for an existing habit. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub frequency: Option<Frequency>,
    pub target_duration: Option<String>,
    pub reminder_time: Option<String>,
    pub is_active: Option<bool>,
}

impl HabitPatch {
    pub fn active(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.name {
            Some(name) => validate_name(name),
            None => Ok(()),
        }
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
            message: "Habit name is required".to_string(),
        });
    }
    if trimmed.chars().count() < MIN_NAME_LEN {
        return Err(ValidationError::InvalidValue {
            field: "name".to_string(),
            message: format!("Habit name must be at least {MIN_NAME_LEN} characters"),
        });
    }
    Ok(())
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
