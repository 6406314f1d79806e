//! Read-only summaries derived from a loaded document.
//!
//! Pure functions, no persistence access.

use crate::model::document::{Activity, Habit, LifeOsData, MoodEntry, TaskStatus};
use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use std::cmp::Ordering;

/// Entries considered by the mood screen.
pub const MOOD_WINDOW: usize = 7;
/// Entries listed on the activity recorder.
pub const RECENT_ACTIVITY_LIMIT: usize = 10;
/// Average energy shown before anything was logged.
pub const DEFAULT_AVERAGE_ENERGY: u32 = 75;

const TREND_GROUP_SIZE: usize = 3;
const TREND_THRESHOLD: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    pub total: usize,
    pub completed: usize,
    /// Completed share in percent; 100 with no tasks.
    pub focus_score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyTrend {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub total_habits: usize,
    /// Habits whose cached streak is above zero.
    pub active_streaks: usize,
}

pub fn task_summary(doc: &LifeOsData) -> TaskSummary {
    let total = doc.tasks.len();
    let completed = completed_tasks(doc);
    let focus_score = if total == 0 {
        100
    } else {
        (completed as f64 / total as f64 * 100.0).round() as u32
    };
    TaskSummary {
        total,
        completed,
        focus_score,
    }
}

pub fn profile_stats(doc: &LifeOsData) -> ProfileStats {
    ProfileStats {
        total_tasks: doc.tasks.len(),
        completed_tasks: completed_tasks(doc),
        total_habits: doc.habits.len(),
        active_streaks: doc.habits.iter().filter(|habit| habit.streak > 0).count(),
    }
}

/// First entry logged for `date`, in insertion order.
pub fn mood_for_date<'a>(doc: &'a LifeOsData, date: &str) -> Option<&'a MoodEntry> {
    doc.moods.iter().find(|mood| mood.date == date)
}

/// Most recent `limit` entries by date, newest first.
pub fn recent_moods(doc: &LifeOsData, limit: usize) -> Vec<&MoodEntry> {
    let mut moods = doc.moods.iter().collect::<Vec<_>>();
    moods.sort_by(|left, right| newest_first(parse_day(&left.date), parse_day(&right.date)));
    moods.truncate(limit);
    moods
}

/// Rounded mean energy, or [`DEFAULT_AVERAGE_ENERGY`] when empty.
pub fn average_energy(moods: &[&MoodEntry]) -> u32 {
    if moods.is_empty() {
        return DEFAULT_AVERAGE_ENERGY;
    }
    mean_energy(moods).round() as u32
}

/// Compares the three newest entries against the three before them.
///
/// `moods` must be ordered newest first, as returned by [`recent_moods`].
pub fn energy_trend(moods: &[&MoodEntry]) -> Option<EnergyTrend> {
    if moods.len() < 2 {
        return None;
    }
    let recent = &moods[..TREND_GROUP_SIZE.min(moods.len())];
    let older_end = (TREND_GROUP_SIZE * 2).min(moods.len());
    let older = &moods[recent.len()..older_end];
    if older.is_empty() {
        return None;
    }

    let recent_avg = mean_energy(recent);
    let older_avg = mean_energy(older);
    if recent_avg > older_avg + TREND_THRESHOLD {
        Some(EnergyTrend::Up)
    } else if recent_avg < older_avg - TREND_THRESHOLD {
        Some(EnergyTrend::Down)
    } else {
        Some(EnergyTrend::Stable)
    }
}

/// Most recent `limit` activities by timestamp, newest first.
///
/// Unparseable timestamps sort after every valid one.
pub fn recent_activities(doc: &LifeOsData, limit: usize) -> Vec<&Activity> {
    let mut activities = doc.activities.iter().collect::<Vec<_>>();
    activities.sort_by(|left, right| {
        newest_first(
            DateTime::parse_from_rfc3339(&left.date).ok(),
            DateTime::parse_from_rfc3339(&right.date).ok(),
        )
    });
    activities.truncate(limit);
    activities
}

pub fn is_habit_done_on(habit: &Habit, date: &str) -> bool {
    habit.is_done_on(date)
}

fn completed_tasks(doc: &LifeOsData) -> usize {
    doc.tasks
        .iter()
        .filter(|task| task.status == TaskStatus::Completed)
        .count()
}

fn mean_energy(moods: &[&MoodEntry]) -> f64 {
    let sum = moods.iter().map(|mood| f64::from(mood.energy)).sum::<f64>();
    sum / moods.len() as f64
}

fn parse_day(value: &str) -> Option<NaiveDate> {
    crate::clock::parse_date(value)
}

fn newest_first<T: Ord>(left: Option<T>, right: Option<T>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => right.cmp(&left),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
