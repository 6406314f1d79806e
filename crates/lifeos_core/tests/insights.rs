use lifeos_core::insights::{
    average_energy, energy_trend, is_habit_done_on, mood_for_date, profile_stats,
    recent_activities, recent_moods, task_summary, EnergyTrend, DEFAULT_AVERAGE_ENERGY,
    MOOD_WINDOW, RECENT_ACTIVITY_LIMIT,
};
use lifeos_core::{Activity, Impact, LifeOsData, MoodEntry, StressLevel, TaskStatus};

fn seeded() -> LifeOsData {
    LifeOsData::seeded("2026-10-19T08:00:00.000Z")
}

fn mood(id: &str, date: &str, energy: u32) -> MoodEntry {
    MoodEntry {
        id: id.to_string(),
        date: date.to_string(),
        energy,
        stress: StressLevel::Low,
        focus: 60,
        notes: None,
    }
}

fn activity(id: &str, date: &str) -> Activity {
    Activity {
        id: id.to_string(),
        title: format!("activity {id}"),
        duration: "1 hour".to_string(),
        impact: Impact::Moderate,
        date: date.to_string(),
        category: "work".to_string(),
    }
}

#[test]
fn empty_task_list_scores_full_focus() {
    let summary = task_summary(&LifeOsData::reset());
    assert_eq!(summary.total, 0);
    assert_eq!(summary.focus_score, 100);
}

#[test]
fn profile_counts_completed_tasks_and_active_streaks() {
    let mut doc = seeded();
    doc.tasks[0].status = TaskStatus::Completed;
    doc.habits[2].streak = 4;

    let stats = profile_stats(&doc);
    assert_eq!(stats.total_tasks, 2);
    assert_eq!(stats.completed_tasks, 1);
    assert_eq!(stats.total_habits, 4);
    assert_eq!(stats.active_streaks, 1);
    assert_eq!(task_summary(&doc).focus_score, 50);
}

#[test]
fn mood_for_date_returns_first_logged_entry() {
    let mut doc = seeded();
    doc.moods = vec![
        mood("a", "2026-10-18", 10),
        mood("b", "2026-10-19", 20),
        mood("c", "2026-10-19", 30),
    ];

    assert_eq!(mood_for_date(&doc, "2026-10-19").unwrap().id, "b");
    assert!(mood_for_date(&doc, "2026-10-17").is_none());
}

#[test]
fn recent_moods_are_newest_first_and_capped() {
    let mut doc = seeded();
    doc.moods = (1..=9)
        .map(|day| mood(&day.to_string(), &format!("2026-10-{day:02}"), 50))
        .collect();

    let recent = recent_moods(&doc, MOOD_WINDOW);
    assert_eq!(recent.len(), 7);
    assert_eq!(recent[0].date, "2026-10-09");
    assert_eq!(recent[6].date, "2026-10-03");
}

#[test]
fn average_energy_defaults_and_rounds() {
    assert_eq!(average_energy(&[]), DEFAULT_AVERAGE_ENERGY);

    let a = mood("a", "2026-10-19", 70);
    let b = mood("b", "2026-10-18", 75);
    assert_eq!(average_energy(&[&a, &b]), 73);
}

#[test]
fn energy_trend_compares_recent_and_older_groups() {
    let high = mood("h", "2026-10-19", 90);
    let low = mood("l", "2026-10-10", 40);
    let mid = mood("m", "2026-10-10", 43);

    assert_eq!(energy_trend(&[&high]), None);
    assert_eq!(energy_trend(&[&high, &high]), None);
    assert_eq!(
        energy_trend(&[&high, &high, &high, &low]),
        Some(EnergyTrend::Up)
    );
    assert_eq!(
        energy_trend(&[&low, &low, &low, &high, &high]),
        Some(EnergyTrend::Down)
    );
    assert_eq!(
        energy_trend(&[&low, &low, &low, &mid, &mid, &mid, &high]),
        Some(EnergyTrend::Stable)
    );
}

#[test]
fn recent_activities_sort_by_timestamp() {
    let mut doc = seeded();
    doc.activities = vec![
        activity("old", "2026-10-01T09:00:00.000Z"),
        activity("broken", "yesterday"),
        activity("new", "2026-10-19T07:30:00.000Z"),
        activity("mid", "2026-10-10T12:00:00+02:00"),
    ];

    let ids = recent_activities(&doc, RECENT_ACTIVITY_LIMIT)
        .into_iter()
        .map(|activity| activity.id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["new", "mid", "old", "broken"]);
    assert_eq!(recent_activities(&doc, 1).len(), 1);
}

#[test]
fn habit_completion_lookup() {
    let mut doc = seeded();
    doc.habits[0].completed_dates.push("2026-10-19".to_string());
    assert!(is_habit_done_on(&doc.habits[0], "2026-10-19"));
    assert!(!is_habit_done_on(&doc.habits[0], "2026-10-18"));
}
