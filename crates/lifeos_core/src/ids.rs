//! Entity id generation.
//!
//! # Invariants
//! - Timestamp ids are strictly increasing per generator, even when the clock
//!   does not advance between two creations.
//! - A generated id is never one already present in the target list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Strategy used for newly created entity ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdScheme {
    /// Epoch milliseconds as decimal text, the format older documents use.
    #[default]
    Timestamp,
    /// Random v4 UUID.
    Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    scheme: IdScheme,
    last_millis: Option<i64>,
}

impl IdGenerator {
    pub fn new(scheme: IdScheme) -> Self {
        Self {
            scheme,
            last_millis: None,
        }
    }

    pub fn scheme(&self) -> IdScheme {
        self.scheme
    }

    /// Returns a fresh id for which `is_taken` is false.
    pub fn next_id(&mut self, now: DateTime<Utc>, is_taken: impl Fn(&str) -> bool) -> String {
        loop {
            let candidate = match self.scheme {
                IdScheme::Timestamp => self.next_millis(now).to_string(),
                IdScheme::Uuid => Uuid::new_v4().to_string(),
            };
            if !is_taken(candidate.as_str()) {
                return candidate;
            }
        }
    }

    fn next_millis(&mut self, now: DateTime<Utc>) -> i64 {
        let millis = match self.last_millis {
            Some(last) if now.timestamp_millis() <= last => last + 1,
            _ => now.timestamp_millis(),
        };
        self.last_millis = Some(millis);
        millis
    }
}

#[cfg(test)]
mod tests {
    use super::{IdGenerator, IdScheme};
    use chrono::{TimeZone, Utc};

    #[test]
    fn frozen_clock_still_yields_distinct_ids() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let mut ids = IdGenerator::new(IdScheme::Timestamp);

        let first = ids.next_id(now, |_| false);
        let second = ids.next_id(now, |_| false);

        assert_eq!(first, "1700000000000");
        assert_eq!(second, "1700000000001");
    }

    #[test]
    fn taken_ids_are_skipped() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let mut ids = IdGenerator::new(IdScheme::Timestamp);

        let id = ids.next_id(now, |candidate| candidate == "1700000000000");
        assert_eq!(id, "1700000000001");
    }

    #[test]
    fn uuid_scheme_yields_parseable_uuid() {
        let now = Utc.timestamp_millis_opt(0).unwrap();
        let mut ids = IdGenerator::new(IdScheme::Uuid);
        let id = ids.next_id(now, |_| false);
        assert!(uuid::Uuid::parse_str(&id).is_ok());
    }
}
