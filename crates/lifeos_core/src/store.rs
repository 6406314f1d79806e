//! Local document store.
//!
//! # Responsibility
//! - Own the single persisted `LifeOsData` document behind a key-value port.
//! - Expose the fixed set of task/habit/mood/activity/settings mutations.
//! - Keep derived habit streaks in sync with completion history.
//! - Notify subscribers after every write.
//!
//! # Invariants
//! - Every mutation is load -> mutate -> save of the whole document.
//! - A missing or unreadable document loads as the seeded default and is not
//!   reported as an error.
//! - Targeting an unknown id is a silent no-op: nothing is written and no
//!   subscriber is notified.
//! - `Habit::streak` is only written by `toggle_habit_for_date`.

use crate::calendar::{self, WeekDay};
use crate::clock::{format_timestamp, Clock, SystemClock};
use crate::ids::{IdGenerator, IdScheme};
use crate::model::document::{Activity, Habit, LifeOsData, MoodEntry, Settings, Task};
use crate::model::input::{NewActivity, NewHabit, NewMoodEntry, NewTask, SettingsPatch, TaskPatch};
use crate::observer::{ChangeKind, Observers, StoreChange, SubscriptionId};
use crate::storage::{KeyValueStore, StorageError};
use crate::streak::calculate_streak;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key the document is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "life-os-data";

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    /// The persistence port rejected a write.
    Storage(StorageError),
    /// The document could not be encoded.
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to encode document: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Store construction options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Key holding the serialized document.
    pub storage_key: String,
    pub id_scheme: IdScheme,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            id_scheme: IdScheme::default(),
        }
    }
}

/// Document store over a key-value persistence port.
pub struct LocalStore<S: KeyValueStore, C: Clock = SystemClock> {
    storage: S,
    clock: C,
    storage_key: String,
    ids: IdGenerator,
    observers: Observers,
}

impl<S: KeyValueStore> LocalStore<S> {
    /// Creates a store with the wall clock and default configuration.
    pub fn new(storage: S) -> Self {
        Self::with_clock(storage, SystemClock, StoreConfig::default())
    }
}

impl<S: KeyValueStore, C: Clock> LocalStore<S, C> {
    pub fn with_clock(storage: S, clock: C, config: StoreConfig) -> Self {
        Self {
            storage,
            clock,
            storage_key: config.storage_key,
            ids: IdGenerator::new(config.id_scheme),
            observers: Observers::default(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Reads the current document.
    ///
    /// Falls back to [`LifeOsData::seeded`] when nothing is stored, the port
    /// fails, or the stored value does not parse. Never writes.
    pub fn load(&self) -> LifeOsData {
        let raw = match self.storage.get(&self.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("event=store_load module=store status=seeded reason=absent");
                return self.seeded();
            }
            Err(err) => {
                warn!("event=store_load module=store status=seeded reason=read_error error={err}");
                return self.seeded();
            }
        };

        match serde_json::from_str::<LifeOsData>(&raw) {
            Ok(doc) => doc,
            Err(err) => {
                // Error text only; the payload may hold user content.
                warn!(
                    "event=store_load module=store status=seeded reason=parse_error line={} column={}",
                    err.line(),
                    err.column()
                );
                self.seeded()
            }
        }
    }

    /// Serializes `doc` and replaces the stored value.
    pub fn save(&self, doc: &LifeOsData) -> StoreResult<()> {
        let raw = serde_json::to_string(doc)?;
        self.storage.set(&self.storage_key, &raw)?;
        debug!(
            "event=store_save module=store status=ok bytes={} tasks={} habits={} moods={} activities={}",
            raw.len(),
            doc.tasks.len(),
            doc.habits.len(),
            doc.moods.len(),
            doc.activities.len()
        );
        Ok(())
    }

    /// Registers a listener called after every write.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreChange, &LifeOsData) + Send + 'static,
    {
        self.observers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Today's `YYYY-MM-DD` date.
    pub fn today(&self) -> String {
        calendar::today_string(self.clock.today())
    }

    /// Week strip centred on today.
    pub fn week_days(&self) -> Vec<WeekDay> {
        calendar::week_days(self.clock.today())
    }

    pub fn add_task(&mut self, input: NewTask) -> StoreResult<Task> {
        let mut doc = self.load();
        let now = self.clock.now();
        let id = self
            .ids
            .next_id(now, |candidate| doc.tasks.iter().any(|task| task.id == candidate));
        let task = Task {
            id,
            title: input.title,
            time: input.time,
            status: input.status,
            created_at: format_timestamp(now),
        };
        doc.tasks.push(task.clone());
        self.commit(&doc, ChangeKind::TaskAdded, Some(&task.id))?;
        Ok(task)
    }

    /// Shallow-merges `patch` into the task. Returns `None` for unknown ids.
    pub fn update_task(&mut self, id: &str, patch: TaskPatch) -> StoreResult<Option<Task>> {
        let mut doc = self.load();
        let Some(task) = doc.tasks.iter_mut().find(|task| task.id == id) else {
            debug!("event=task_update module=store status=noop reason=not_found");
            return Ok(None);
        };
        patch.apply(task);
        let updated = task.clone();
        self.commit(&doc, ChangeKind::TaskUpdated, Some(id))?;
        Ok(Some(updated))
    }

    /// Removes the task. Returns `false` without writing for unknown ids.
    pub fn delete_task(&mut self, id: &str) -> StoreResult<bool> {
        let mut doc = self.load();
        if !remove_by_id(&mut doc.tasks, id, |task| &task.id) {
            debug!("event=task_delete module=store status=noop reason=not_found");
            return Ok(false);
        }
        self.commit(&doc, ChangeKind::TaskDeleted, Some(id))?;
        Ok(true)
    }

    /// Flips the task between `completed` and `pending`.
    pub fn toggle_task_status(&mut self, id: &str) -> StoreResult<Option<Task>> {
        let mut doc = self.load();
        let Some(task) = doc.tasks.iter_mut().find(|task| task.id == id) else {
            debug!("event=task_toggle module=store status=noop reason=not_found");
            return Ok(None);
        };
        task.status = task.status.toggled();
        let updated = task.clone();
        self.commit(&doc, ChangeKind::TaskToggled, Some(id))?;
        Ok(Some(updated))
    }

    pub fn add_habit(&mut self, input: NewHabit) -> StoreResult<Habit> {
        let mut doc = self.load();
        let now = self.clock.now();
        let id = self
            .ids
            .next_id(now, |candidate| doc.habits.iter().any(|habit| habit.id == candidate));
        let habit = Habit {
            id,
            name: input.name,
            icon: input.icon,
            frequency: input.frequency,
            completed_dates: Vec::new(),
            streak: 0,
            created_at: format_timestamp(now),
        };
        doc.habits.push(habit.clone());
        self.commit(&doc, ChangeKind::HabitAdded, Some(&habit.id))?;
        Ok(habit)
    }

    /// Marks `date` complete, or clears it if already marked, then
    /// recomputes the streak.
    pub fn toggle_habit_for_date(
        &mut self,
        habit_id: &str,
        date: &str,
    ) -> StoreResult<Option<Habit>> {
        let mut doc = self.load();
        let today = self.clock.today();
        let Some(habit) = doc.habits.iter_mut().find(|habit| habit.id == habit_id) else {
            debug!("event=habit_toggle module=store status=noop reason=not_found");
            return Ok(None);
        };

        match habit.completed_dates.iter().position(|value| value == date) {
            Some(index) => {
                habit.completed_dates.remove(index);
            }
            None => habit.completed_dates.push(date.to_string()),
        }
        habit.streak = calculate_streak(&habit.completed_dates, today);

        let updated = habit.clone();
        self.commit(&doc, ChangeKind::HabitToggled, Some(habit_id))?;
        Ok(Some(updated))
    }

    pub fn delete_habit(&mut self, id: &str) -> StoreResult<bool> {
        let mut doc = self.load();
        if !remove_by_id(&mut doc.habits, id, |habit| &habit.id) {
            debug!("event=habit_delete module=store status=noop reason=not_found");
            return Ok(false);
        }
        self.commit(&doc, ChangeKind::HabitDeleted, Some(id))?;
        Ok(true)
    }

    /// Appends a mood entry. Entries sharing a date are all kept.
    pub fn add_mood_entry(&mut self, input: NewMoodEntry) -> StoreResult<MoodEntry> {
        let mut doc = self.load();
        let now = self.clock.now();
        let id = self
            .ids
            .next_id(now, |candidate| doc.moods.iter().any(|mood| mood.id == candidate));
        let entry = MoodEntry {
            id,
            date: input.date,
            energy: input.energy,
            stress: input.stress,
            focus: input.focus,
            notes: input.notes,
        };
        doc.moods.push(entry.clone());
        self.commit(&doc, ChangeKind::MoodAdded, Some(&entry.id))?;
        Ok(entry)
    }

    pub fn add_activity(&mut self, input: NewActivity) -> StoreResult<Activity> {
        let mut doc = self.load();
        let now = self.clock.now();
        let id = self.ids.next_id(now, |candidate| {
            doc.activities
                .iter()
                .any(|activity| activity.id == candidate)
        });
        let activity = Activity {
            id,
            title: input.title,
            duration: input.duration,
            impact: input.impact,
            date: input.date,
            category: input.category,
        };
        doc.activities.push(activity.clone());
        self.commit(&doc, ChangeKind::ActivityAdded, Some(&activity.id))?;
        Ok(activity)
    }

    pub fn delete_activity(&mut self, id: &str) -> StoreResult<bool> {
        let mut doc = self.load();
        if !remove_by_id(&mut doc.activities, id, |activity| &activity.id) {
            debug!("event=activity_delete module=store status=noop reason=not_found");
            return Ok(false);
        }
        self.commit(&doc, ChangeKind::ActivityDeleted, Some(id))?;
        Ok(true)
    }

    /// Shallow-merges `patch` into the settings singleton.
    pub fn update_settings(&mut self, patch: SettingsPatch) -> StoreResult<Settings> {
        let mut doc = self.load();
        patch.apply(&mut doc.settings);
        self.commit(&doc, ChangeKind::SettingsUpdated, None)?;
        Ok(doc.settings)
    }

    /// Drops the stored document and writes [`LifeOsData::reset`].
    pub fn reset_all_data(&mut self) -> StoreResult<LifeOsData> {
        self.storage.remove(&self.storage_key)?;
        let doc = LifeOsData::reset();
        self.commit(&doc, ChangeKind::Reset, None)?;
        info!("event=store_reset module=store status=ok");
        Ok(doc)
    }

    fn seeded(&self) -> LifeOsData {
        LifeOsData::seeded(&format_timestamp(self.clock.now()))
    }

    fn commit(&mut self, doc: &LifeOsData, kind: ChangeKind, id: Option<&str>) -> StoreResult<()> {
        if let Err(err) = self.save(doc) {
            warn!(
                "event=store_commit module=store status=error change={} error={err}",
                kind.as_str()
            );
            return Err(err);
        }
        debug!(
            "event=store_commit module=store status=ok change={}",
            kind.as_str()
        );
        self.observers.emit(&StoreChange::new(kind, id), doc);
        Ok(())
    }
}

fn remove_by_id<T>(items: &mut Vec<T>, id: &str, key: impl Fn(&T) -> &String) -> bool {
    let before = items.len();
    items.retain(|item| key(item) != id);
    items.len() != before
}
