//! Core data store for Life OS.
//! This crate owns the persisted document and every rule applied to it.

pub mod bridge;
pub mod calendar;
pub mod clock;
pub mod db;
pub mod ids;
pub mod insights;
pub mod logging;
pub mod model;
pub mod observer;
pub mod storage;
pub mod store;
pub mod streak;

pub use bridge::{
    BridgeError, HapticDispatcher, HapticEffect, NoopNotificationPort, NotificationPort,
    UnknownHapticEffect,
};
pub use calendar::WeekDay;
pub use clock::{Clock, FixedClock, SystemClock};
pub use ids::IdScheme;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::document::{
    Activity, Habit, HabitFrequency, Impact, LifeOsData, MoodEntry, Settings, StressLevel, Task,
    TaskStatus, RESET_USER_NAME, SEEDED_USER_NAME,
};
pub use model::input::{NewActivity, NewHabit, NewMoodEntry, NewTask, SettingsPatch, TaskPatch};
pub use observer::{ChangeKind, Listener, StoreChange, SubscriptionId};
pub use storage::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError, StorageResult,
};
pub use store::{LocalStore, StoreConfig, StoreError, StoreResult, DEFAULT_STORAGE_KEY};
pub use streak::calculate_streak;

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
