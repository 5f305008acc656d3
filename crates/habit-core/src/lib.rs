//! # Habit Core Library
//!
//! This library provides the core logic for the habit tracker. Front ends
//! (the bundled CLI, or anything else) hold one [`HabitStore`], drive it
//! through its mutation methods, and get back the side effects to perform.
//!
//! ## Architecture
//!
//! - **Store**: sole owner of habits, completions, points, badges and
//!   settings; applies one mutation at a time
//! - **Derivations**: pure streak/progress/category queries over a snapshot
//! - **Badges**: threshold checks re-run after every mutation
//! - **Effects**: notifications and sounds returned to the caller, never
//!   performed by the store
//! - **Storage**: whole-snapshot JSON persistence and TOML configuration
//!
//! ## Key Components
//!
//! - [`HabitStore`]: state container and mutation surface
//! - [`HabitSession`]: store wired to persistence and a notifier
//! - [`Snapshot`]: the full serializable state
//! - [`Persistence`] / [`Notifier`]: adapter seams

pub mod badges;
pub mod clock;
pub mod completion;
pub mod demo;
pub mod derive;
pub mod effects;
pub mod error;
pub mod export;
pub mod habit;
pub mod notify;
pub mod reports;
pub mod session;
pub mod snapshot;
pub mod storage;
pub mod store;

pub use badges::Badge;
pub use clock::{Clock, FixedClock, SystemClock};
pub use completion::CompletionMap;
pub use derive::DailyProgress;
pub use effects::{Effect, Notification, NotificationKind, SoundKind};
pub use error::{ConfigError, CoreError, NotifyError, StorageError, ValidationError};
pub use export::{ExportDocument, ImportSummary};
pub use habit::{Category, Frequency, Habit, HabitId, HabitPatch, NewHabit};
pub use notify::{Notifier, Permission};
pub use reports::ReportRange;
pub use session::{ApplyReport, HabitSession};
pub use snapshot::{Settings, SettingsPatch, Snapshot};
pub use storage::{Config, JsonFileStore, MemoryStore, Persistence};
pub use store::{HabitStore, Transition};
