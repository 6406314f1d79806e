//! FFI use-case API for the native mobile shell.
//!
//! # Responsibility
//! - Expose every store operation as a sync, use-case-level function.
//! - Translate enum/patch inputs from plain strings and JSON.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Documents and records cross the boundary as JSON with the persisted
//!   field names.
//! - Every call opens the store, runs one operation and closes it.

use lifeos_core::clock::format_timestamp;
use lifeos_core::db::open_db;
use lifeos_core::insights::{profile_stats, task_summary};
use lifeos_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Clock, HabitFrequency, Impact, LocalStore, NewActivity, NewHabit, NewMoodEntry, NewTask,
    SettingsPatch, SqliteKeyValueStore, StressLevel, SystemClock, TaskPatch, TaskStatus,
};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const STORE_DB_FILE_NAME: &str = "lifeos_store.sqlite3";
static STORE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

type FfiStore<'conn> = LocalStore<SqliteKeyValueStore<'conn>>;

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Result envelope for store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreActionResponse {
    /// Whether the operation completed.
    pub ok: bool,
    /// Id of the created or targeted record, when there is one.
    pub id: Option<String>,
    /// JSON of the resulting record or document. `None` for no-ops.
    pub json: Option<String>,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

impl StoreActionResponse {
    fn success(message: impl Into<String>, id: Option<String>, json: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            json,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            json: None,
            message: message.into(),
        }
    }
}

/// Returns the current document as JSON.
///
/// Falls back to the seeded document when the database cannot be opened.
#[flutter_rust_bridge::frb(sync)]
pub fn load_document() -> String {
    let doc = match with_store(|store| Ok(store.load())) {
        Ok(doc) => doc,
        Err(err) => {
            warn!("event=ffi_load module=ffi status=seeded error={err}");
            lifeos_core::LifeOsData::seeded(&format_timestamp(SystemClock.now()))
        }
    };
    to_json(&doc).unwrap_or_default()
}

/// Today's `YYYY-MM-DD` date.
#[flutter_rust_bridge::frb(sync)]
pub fn today() -> String {
    lifeos_core::calendar::today_string(SystemClock.today())
}

/// Seven-day strip around today as a JSON array.
#[flutter_rust_bridge::frb(sync)]
pub fn week_days() -> String {
    to_json(&lifeos_core::calendar::week_days(SystemClock.today())).unwrap_or_default()
}

/// Dashboard and profile counters as JSON.
#[flutter_rust_bridge::frb(sync)]
pub fn stats() -> StoreActionResponse {
    respond("Stats computed.", |store| {
        let doc = store.load();
        let value = serde_json::json!({
            "tasks": task_summary(&doc),
            "profile": profile_stats(&doc),
        });
        Ok((None, Some(to_json(&value)?)))
    })
}

/// Creates a task. `status` defaults to `pending`.
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(title: String, time: String, status: Option<String>) -> StoreActionResponse {
    respond("Task created.", |store| {
        let status = match status {
            Some(value) => parse_enum::<TaskStatus>("status", &value)?,
            None => TaskStatus::default(),
        };
        let task = store
            .add_task(NewTask {
                title: title.trim().to_string(),
                time: time.trim().to_string(),
                status,
            })
            .map_err(|err| err.to_string())?;
        Ok((Some(task.id.clone()), Some(to_json(&task)?)))
    })
}

/// Applies a camelCase JSON patch (`title`, `time`, `status`) to a task.
#[flutter_rust_bridge::frb(sync)]
pub fn task_update(id: String, patch_json: String) -> StoreActionResponse {
    respond("Task updated.", |store| {
        let patch = parse_json::<TaskPatch>("patch_json", &patch_json)?;
        let task = store
            .update_task(&id, patch)
            .map_err(|err| err.to_string())?;
        record_or_noop(id, task)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(id: String) -> StoreActionResponse {
    respond("Task deleted.", |store| {
        store.delete_task(&id).map_err(|err| err.to_string())?;
        Ok((Some(id), None))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(id: String) -> StoreActionResponse {
    respond("Task toggled.", |store| {
        let task = store
            .toggle_task_status(&id)
            .map_err(|err| err.to_string())?;
        record_or_noop(id, task)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn habit_add(name: String, icon: String, frequency: String) -> StoreActionResponse {
    respond("Habit created.", |store| {
        let frequency = parse_enum::<HabitFrequency>("frequency", &frequency)?;
        let habit = store
            .add_habit(NewHabit {
                name: name.trim().to_string(),
                icon,
                frequency,
            })
            .map_err(|err| err.to_string())?;
        Ok((Some(habit.id.clone()), Some(to_json(&habit)?)))
    })
}

/// Marks or clears `date` (`YYYY-MM-DD`) for a habit.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_toggle(habit_id: String, date: String) -> StoreActionResponse {
    respond("Habit toggled.", |store| {
        let habit = store
            .toggle_habit_for_date(&habit_id, date.trim())
            .map_err(|err| err.to_string())?;
        record_or_noop(habit_id, habit)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn habit_delete(id: String) -> StoreActionResponse {
    respond("Habit deleted.", |store| {
        store.delete_habit(&id).map_err(|err| err.to_string())?;
        Ok((Some(id), None))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn mood_add(
    date: String,
    energy: u32,
    stress: String,
    focus: u32,
    notes: Option<String>,
) -> StoreActionResponse {
    respond("Mood logged.", |store| {
        let stress = parse_enum::<StressLevel>("stress", &stress)?;
        let entry = store
            .add_mood_entry(NewMoodEntry {
                date,
                energy,
                stress,
                focus,
                notes,
            })
            .map_err(|err| err.to_string())?;
        Ok((Some(entry.id.clone()), Some(to_json(&entry)?)))
    })
}

/// Records an activity. `date` defaults to the current timestamp.
#[flutter_rust_bridge::frb(sync)]
pub fn activity_add(
    title: String,
    duration: String,
    impact: String,
    category: String,
    date: Option<String>,
) -> StoreActionResponse {
    respond("Activity recorded.", |store| {
        let impact = parse_enum::<Impact>("impact", &impact)?;
        let activity = store
            .add_activity(NewActivity {
                title: title.trim().to_string(),
                duration: duration.trim().to_string(),
                impact,
                category,
                date: date.unwrap_or_else(|| format_timestamp(SystemClock.now())),
            })
            .map_err(|err| err.to_string())?;
        Ok((Some(activity.id.clone()), Some(to_json(&activity)?)))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn activity_delete(id: String) -> StoreActionResponse {
    respond("Activity deleted.", |store| {
        store.delete_activity(&id).map_err(|err| err.to_string())?;
        Ok((Some(id), None))
    })
}

/// Applies a camelCase JSON settings patch.
#[flutter_rust_bridge::frb(sync)]
pub fn settings_update(patch_json: String) -> StoreActionResponse {
    settings_update_at(&resolve_db_path(), patch_json)
}

fn settings_update_at(db_path: &Path, patch_json: String) -> StoreActionResponse {
    respond_at(db_path, "Settings updated.", |store| {
        let patch = parse_json::<SettingsPatch>("patch_json", &patch_json)?;
        let settings = store
            .update_settings(patch)
            .map_err(|err| err.to_string())?;
        Ok((None, Some(to_json(&settings)?)))
    })
}

/// Replaces all data with the empty reset document.
#[flutter_rust_bridge::frb(sync)]
pub fn reset_all_data() -> StoreActionResponse {
    reset_all_data_at(&resolve_db_path())
}

fn reset_all_data_at(db_path: &Path) -> StoreActionResponse {
    respond_at(db_path, "All data reset.", |store| {
        let doc = store.reset_all_data().map_err(|err| err.to_string())?;
        Ok((None, Some(to_json(&doc)?)))
    })
}

type ActionOutcome = Result<(Option<String>, Option<String>), String>;

fn respond(
    message: &str,
    f: impl FnOnce(&mut FfiStore<'_>) -> ActionOutcome,
) -> StoreActionResponse {
    respond_at(&resolve_db_path(), message, f)
}

fn respond_at(
    db_path: &Path,
    message: &str,
    f: impl FnOnce(&mut FfiStore<'_>) -> ActionOutcome,
) -> StoreActionResponse {
    match with_store_at(db_path, f) {
        Ok((id, json)) => StoreActionResponse::success(message, id, json),
        Err(err) => StoreActionResponse::failure(err),
    }
}

fn record_or_noop<T: Serialize>(id: String, record: Option<T>) -> ActionOutcome {
    match record {
        Some(record) => Ok((Some(id), Some(to_json(&record)?))),
        None => Ok((Some(id), None)),
    }
}

fn resolve_db_path() -> PathBuf {
    STORE_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("LIFEOS_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(STORE_DB_FILE_NAME)
        })
        .clone()
}

fn with_store<T>(f: impl FnOnce(&mut FfiStore<'_>) -> Result<T, String>) -> Result<T, String> {
    with_store_at(&resolve_db_path(), f)
}

fn with_store_at<T>(
    db_path: &Path,
    f: impl FnOnce(&mut FfiStore<'_>) -> Result<T, String>,
) -> Result<T, String> {
    let conn = open_db(db_path).map_err(|err| format!("store DB open failed: {err}"))?;
    let storage =
        SqliteKeyValueStore::try_new(&conn).map_err(|err| format!("store init failed: {err}"))?;
    let mut store = LocalStore::new(storage);
    f(&mut store)
}

fn parse_enum<T: DeserializeOwned>(field: &str, value: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(value.trim().to_ascii_lowercase()))
        .map_err(|_| format!("invalid {field}: `{value}`"))
}

fn parse_json<T: DeserializeOwned>(field: &str, raw: &str) -> Result<T, String> {
    serde_json::from_str(raw).map_err(|err| format!("invalid {field}: {err}"))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|err| format!("failed to encode response: {err}"))
}
