//! Mutation inputs accepted by `LocalStore`.
//!
//! Inputs carry caller-chosen fields only; ids, timestamps and derived fields
//! are filled in by the store. Patches are shallow: `None` keeps the stored
//! value.

use crate::model::document::{
    HabitFrequency, Impact, Settings, StressLevel, Task, TaskStatus,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub time: String,
    /// Defaults to `pending`.
    #[serde(default)]
    pub status: TaskStatus,
}

/// Partial task update. `id` and `createdAt` are not patchable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub time: Option<String>,
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    pub(crate) fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(time) = self.time {
            task.time = time;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHabit {
    pub name: String,
    pub icon: String,
    pub frequency: HabitFrequency,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMoodEntry {
    pub date: String,
    pub energy: u32,
    pub stress: StressLevel,
    pub focus: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    pub title: String,
    pub duration: String,
    pub impact: Impact,
    pub category: String,
    pub date: String,
}

/// Partial settings update merged into the singleton.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub haptic_feedback: Option<bool>,
    pub neural_sync: Option<bool>,
    pub brightness: Option<u32>,
    pub user_name: Option<String>,
}

impl SettingsPatch {
    pub(crate) fn apply(self, settings: &mut Settings) {
        if let Some(haptic_feedback) = self.haptic_feedback {
            settings.haptic_feedback = haptic_feedback;
        }
        if let Some(neural_sync) = self.neural_sync {
            settings.neural_sync = neural_sync;
        }
        if let Some(brightness) = self.brightness {
            settings.brightness = brightness;
        }
        if let Some(user_name) = self.user_name {
            settings.user_name = user_name;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SettingsPatch, TaskPatch};
    use crate::model::document::{LifeOsData, TaskStatus};

    #[test]
    fn task_patch_keeps_unset_fields() {
        let mut task = LifeOsData::seeded("now").tasks.remove(0);
        TaskPatch {
            time: Some("09:00".to_string()),
            ..TaskPatch::default()
        }
        .apply(&mut task);

        assert_eq!(task.title, "Neural Mapping");
        assert_eq!(task.time, "09:00");
        assert_eq!(task.status, TaskStatus::Active);
    }

    #[test]
    fn settings_patch_parses_from_camel_case_json() {
        let patch: SettingsPatch =
            serde_json::from_str(r#"{"neuralSync":true,"brightness":80}"#).unwrap();
        assert_eq!(patch.neural_sync, Some(true));
        assert_eq!(patch.brightness, Some(80));
        assert_eq!(patch.user_name, None);
    }
}
