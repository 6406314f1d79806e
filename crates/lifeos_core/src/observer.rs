//! Change notification for store subscribers.
//!
//! # Invariants
//! - Listeners run synchronously, in subscription order, after the document
//!   has been written.
//! - An unsubscribed listener is never called again.

use crate::model::document::LifeOsData;

/// Which store operation produced a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    TaskAdded,
    TaskUpdated,
    TaskDeleted,
    TaskToggled,
    HabitAdded,
    HabitToggled,
    HabitDeleted,
    MoodAdded,
    ActivityAdded,
    ActivityDeleted,
    SettingsUpdated,
    Reset,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TaskAdded => "task_added",
            Self::TaskUpdated => "task_updated",
            Self::TaskDeleted => "task_deleted",
            Self::TaskToggled => "task_toggled",
            Self::HabitAdded => "habit_added",
            Self::HabitToggled => "habit_toggled",
            Self::HabitDeleted => "habit_deleted",
            Self::MoodAdded => "mood_added",
            Self::ActivityAdded => "activity_added",
            Self::ActivityDeleted => "activity_deleted",
            Self::SettingsUpdated => "settings_updated",
            Self::Reset => "reset",
        }
    }
}

/// Notification payload delivered with the new document snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    pub kind: ChangeKind,
    /// Entity id the operation targeted, when it has one.
    pub id: Option<String>,
}

impl StoreChange {
    pub(crate) fn new(kind: ChangeKind, id: Option<&str>) -> Self {
        Self {
            kind,
            id: id.map(str::to_string),
        }
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

pub type Listener = Box<dyn FnMut(&StoreChange, &LifeOsData) + Send>;

#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl Observers {
    pub(crate) fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreChange, &LifeOsData) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn emit(&mut self, change: &StoreChange, snapshot: &LifeOsData) {
        for (_, listener) in &mut self.listeners {
            listener(change, snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChangeKind, Observers, StoreChange};
    use crate::model::document::LifeOsData;
    use std::sync::{Arc, Mutex};

    #[test]
    fn unsubscribed_listener_is_not_called() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut observers = Observers::default();

        let sink = Arc::clone(&calls);
        let first = observers.subscribe(move |change, _| {
            sink.lock().unwrap().push(change.kind);
        });
        let sink = Arc::clone(&calls);
        observers.subscribe(move |change, _| {
            sink.lock().unwrap().push(change.kind);
        });

        assert!(observers.unsubscribe(first));
        assert!(!observers.unsubscribe(first));
        observers.emit(
            &StoreChange::new(ChangeKind::Reset, None),
            &LifeOsData::reset(),
        );

        assert_eq!(observers.len(), 1);
        assert_eq!(*calls.lock().unwrap(), vec![ChangeKind::Reset]);
    }
}
