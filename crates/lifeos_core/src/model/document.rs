//! Root document and entity records.
//!
//! # Responsibility
//! - Define `LifeOsData` and its task/habit/mood/activity/settings records.
//! - Provide the two built-in payloads: the seeded default and the reset
//!   document.
//!
//! # Invariants
//! - `id` values are unique within their list and never rewritten.
//! - `Habit::streak` is derived from `completed_dates`; only the store sets it.
//! - Seeded default and reset document differ (`ARCHITECT-01` vs `USER`).

use serde::{Deserialize, Serialize};

/// User name carried by the seeded default document.
pub const SEEDED_USER_NAME: &str = "ARCHITECT-01";
/// User name carried by the document written on reset.
pub const RESET_USER_NAME: &str = "USER";

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Currently being worked on.
    Active,
    /// Not started yet.
    #[default]
    Pending,
    /// Done.
    Completed,
}

impl TaskStatus {
    /// Status after one toggle.
    ///
    /// Only `completed` flips back to `pending`; `active` and `pending` both
    /// become `completed`, so `active` cannot be reached by toggling.
    pub fn toggled(self) -> Self {
        match self {
            Self::Completed => Self::Pending,
            Self::Active | Self::Pending => Self::Completed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

/// How often a habit is expected to be completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitFrequency {
    Daily,
    Weekly,
}

/// Self-reported stress level of a mood entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StressLevel {
    Low,
    Medium,
    High,
}

/// Perceived impact of a journaled activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    /// Free-text time label, e.g. `14:00`.
    pub time: String,
    pub status: TaskStatus,
    /// ISO-8601 creation timestamp.
    pub created_at: String,
}

/// Recurring habit with its completion history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    /// Icon tag resolved by the presentation layer (`brain`, `book`, ...).
    pub icon: String,
    pub frequency: HabitFrequency,
    /// `YYYY-MM-DD` dates, no duplicates. Order carries no meaning.
    pub completed_dates: Vec<String>,
    /// Cached consecutive-day count, see [`crate::streak::calculate_streak`].
    pub streak: u32,
    pub created_at: String,
}

impl Habit {
    /// Returns whether `date` is marked complete.
    pub fn is_done_on(&self, date: &str) -> bool {
        self.completed_dates.iter().any(|value| value == date)
    }
}

/// One mood log entry. Several entries may share a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: String,
    pub date: String,
    /// 0..=100.
    pub energy: u32,
    pub stress: StressLevel,
    /// 0..=100.
    pub focus: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub title: String,
    /// Free text, e.g. `45 mins`.
    pub duration: String,
    pub impact: Impact,
    /// ISO-8601 timestamp string.
    pub date: String,
    pub category: String,
}

/// Singleton user preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub haptic_feedback: bool,
    pub neural_sync: bool,
    /// Screen brightness percentage. The UI keeps it within 10..=100.
    pub brightness: u32,
    pub user_name: String,
}

impl Settings {
    fn with_user_name(user_name: &str) -> Self {
        Self {
            haptic_feedback: true,
            neural_sync: false,
            brightness: 50,
            user_name: user_name.to_string(),
        }
    }
}

/// The whole persisted application state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeOsData {
    pub tasks: Vec<Task>,
    pub habits: Vec<Habit>,
    pub moods: Vec<MoodEntry>,
    pub activities: Vec<Activity>,
    pub settings: Settings,
}

impl LifeOsData {
    /// Example document served when nothing has been persisted yet.
    ///
    /// `now` is used for every creation/activity timestamp.
    pub fn seeded(now: &str) -> Self {
        let habit = |id: &str, name: &str, icon: &str| Habit {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            frequency: HabitFrequency::Daily,
            completed_dates: Vec::new(),
            streak: 0,
            created_at: now.to_string(),
        };

        Self {
            tasks: vec![
                Task {
                    id: "1".to_string(),
                    title: "Neural Mapping".to_string(),
                    time: "14:00".to_string(),
                    status: TaskStatus::Active,
                    created_at: now.to_string(),
                },
                Task {
                    id: "2".to_string(),
                    title: "Data Synthesis".to_string(),
                    time: "16:30".to_string(),
                    status: TaskStatus::Pending,
                    created_at: now.to_string(),
                },
            ],
            habits: vec![
                habit("1", "Morning Meditation", "brain"),
                habit("2", "Deep Work", "target"),
                habit("3", "Exercise", "activity"),
                habit("4", "Reading", "book"),
            ],
            moods: Vec::new(),
            activities: vec![
                Activity {
                    id: "1".to_string(),
                    title: "Deep Work Session".to_string(),
                    duration: "3 hours".to_string(),
                    impact: Impact::High,
                    date: now.to_string(),
                    category: "work".to_string(),
                },
                Activity {
                    id: "2".to_string(),
                    title: "Physical Reboot".to_string(),
                    duration: "45 mins".to_string(),
                    impact: Impact::Moderate,
                    date: now.to_string(),
                    category: "health".to_string(),
                },
            ],
            settings: Settings::with_user_name(SEEDED_USER_NAME),
        }
    }

    /// Empty document written by an explicit reset.
    pub fn reset() -> Self {
        Self {
            tasks: Vec::new(),
            habits: Vec::new(),
            moods: Vec::new(),
            activities: Vec::new(),
            settings: Settings::with_user_name(RESET_USER_NAME),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LifeOsData, TaskStatus};

    #[test]
    fn toggled_never_returns_active() {
        assert_eq!(TaskStatus::Active.toggled(), TaskStatus::Completed);
        assert_eq!(TaskStatus::Pending.toggled(), TaskStatus::Completed);
        assert_eq!(TaskStatus::Completed.toggled(), TaskStatus::Pending);
    }

    #[test]
    fn seeded_and_reset_settings_differ_only_by_name() {
        let seeded = LifeOsData::seeded("2026-01-01T00:00:00.000Z").settings;
        let reset = LifeOsData::reset().settings;
        assert_ne!(seeded.user_name, reset.user_name);
        assert_eq!(seeded.haptic_feedback, reset.haptic_feedback);
        assert_eq!(seeded.neural_sync, reset.neural_sync);
        assert_eq!(seeded.brightness, reset.brightness);
    }
}
