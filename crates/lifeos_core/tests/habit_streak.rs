use chrono::{Duration, NaiveDate};
use lifeos_core::{
    FixedClock, HabitFrequency, LocalStore, MemoryKeyValueStore, NewHabit, StoreConfig,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn day(offset: i64) -> String {
    (today() + Duration::days(offset))
        .format("%Y-%m-%d")
        .to_string()
}

fn store(storage: &MemoryKeyValueStore) -> LocalStore<&MemoryKeyValueStore, FixedClock> {
    LocalStore::with_clock(storage, FixedClock::at_date(today()), StoreConfig::default())
}

fn toggle_all(
    store: &mut LocalStore<&MemoryKeyValueStore, FixedClock>,
    habit_id: &str,
    offsets: &[i64],
) -> u32 {
    let mut streak = 0;
    for offset in offsets {
        streak = store
            .toggle_habit_for_date(habit_id, &day(*offset))
            .unwrap()
            .unwrap()
            .streak;
    }
    streak
}

#[test]
fn add_habit_starts_without_history() {
    let storage = MemoryKeyValueStore::new();
    let mut store = store(&storage);

    let habit = store
        .add_habit(NewHabit {
            name: "Stretch".to_string(),
            icon: "activity".to_string(),
            frequency: HabitFrequency::Weekly,
        })
        .unwrap();

    assert!(habit.completed_dates.is_empty());
    assert_eq!(habit.streak, 0);
    assert_eq!(habit.frequency, HabitFrequency::Weekly);
    assert_eq!(store.load().habits.len(), 5);
    assert_eq!(store.load().habits[4], habit);
}

#[test]
fn streak_cases_relative_to_today() {
    let cases: [(&[i64], u32); 4] = [
        (&[0], 1),
        (&[0, -1, -2], 3),
        (&[-2], 0),
        (&[0, -1, -3], 2),
    ];

    for (offsets, expected) in cases {
        let storage = MemoryKeyValueStore::new();
        let mut store = store(&storage);
        assert_eq!(toggle_all(&mut store, "1", offsets), expected, "{offsets:?}");
    }
}

#[test]
fn toggling_same_date_twice_clears_it() {
    let storage = MemoryKeyValueStore::new();
    let mut store = store(&storage);

    let marked = store.toggle_habit_for_date("2", &day(0)).unwrap().unwrap();
    assert_eq!(marked.completed_dates, vec![day(0)]);
    assert_eq!(marked.streak, 1);

    let cleared = store.toggle_habit_for_date("2", &day(0)).unwrap().unwrap();
    assert!(cleared.completed_dates.is_empty());
    assert_eq!(cleared.streak, 0);
    assert_eq!(store.load().habits[1], cleared);
}

#[test]
fn removing_a_middle_day_shortens_the_streak() {
    let storage = MemoryKeyValueStore::new();
    let mut store = store(&storage);

    assert_eq!(toggle_all(&mut store, "3", &[-3, -2, -1, 0]), 4);
    assert_eq!(toggle_all(&mut store, "3", &[-1]), 1);
    assert_eq!(toggle_all(&mut store, "3", &[-1]), 4);
}

#[test]
fn streak_ending_yesterday_still_counts() {
    let storage = MemoryKeyValueStore::new();
    let mut store = store(&storage);
    assert_eq!(toggle_all(&mut store, "4", &[-1, -2]), 2);
}

#[test]
fn toggle_unknown_habit_is_a_silent_noop() {
    let storage = MemoryKeyValueStore::new();
    let mut store = store(&storage);
    assert_eq!(store.toggle_habit_for_date("404", &day(0)).unwrap(), None);
    assert!(store.load().habits.iter().all(|habit| habit.completed_dates.is_empty()));
}

#[test]
fn delete_habit_removes_only_matching_entry() {
    let storage = MemoryKeyValueStore::new();
    let mut store = store(&storage);

    assert!(store.delete_habit("2").unwrap());
    assert!(!store.delete_habit("2").unwrap());
    let names = store
        .load()
        .habits
        .into_iter()
        .map(|habit| habit.name)
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Morning Meditation", "Exercise", "Reading"]);
}

#[test]
fn cached_streak_is_recomputed_against_the_toggle_day() {
    let storage = MemoryKeyValueStore::new();
    {
        let mut monday = store(&storage);
        toggle_all(&mut monday, "1", &[0, -1]);
    }

    let thursday = FixedClock::at_date(today() + Duration::days(3));
    let mut later = LocalStore::with_clock(&storage, thursday, StoreConfig::default());
    // Cached value survives until the next toggle.
    assert_eq!(later.load().habits[0].streak, 2);

    let habit = later
        .toggle_habit_for_date("1", &day(-5))
        .unwrap()
        .unwrap();
    assert_eq!(habit.streak, 0);
}
