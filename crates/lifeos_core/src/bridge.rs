//! Native feedback bridge contract.
//!
//! # Responsibility
//! - Describe the haptic/notification capability a host shell may provide.
//! - Gate feedback on user settings and contain bridge failures.
//!
//! # Invariants
//! - Bridge failures never reach callers of `HapticDispatcher`.
//! - Feedback is skipped entirely when `hapticFeedback` is off.
//! - Store logic never depends on this module.

use crate::model::document::Settings;
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Feedback effect understood by native shells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HapticEffect {
    Light,
    Medium,
    Heavy,
    Success,
    Warning,
    Error,
    Selection,
}

impl HapticEffect {
    pub const ALL: [HapticEffect; 7] = [
        Self::Light,
        Self::Medium,
        Self::Heavy,
        Self::Success,
        Self::Warning,
        Self::Error,
        Self::Selection,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Medium => "medium",
            Self::Heavy => "heavy",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Selection => "selection",
        }
    }
}

/// Effect name that is not one of [`HapticEffect::ALL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownHapticEffect(pub String);

impl Display for UnknownHapticEffect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown haptic effect `{}`; expected light|medium|heavy|success|warning|error|selection",
            self.0
        )
    }
}

impl Error for UnknownHapticEffect {}

impl FromStr for HapticEffect {
    type Err = UnknownHapticEffect;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|effect| effect.as_str() == normalized)
            .ok_or_else(|| UnknownHapticEffect(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// The host has no native bridge for this capability.
    Unavailable,
    /// The bridge call was attempted and failed.
    Failed(String),
}

impl Display for BridgeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "native bridge unavailable"),
            Self::Failed(message) => write!(f, "native bridge call failed: {message}"),
        }
    }
}

impl Error for BridgeError {}

/// Capability implemented by native shells.
pub trait NotificationPort {
    fn trigger(&self, effect: HapticEffect) -> Result<(), BridgeError>;
}

/// Port for hosts without a native bridge.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotificationPort;

impl NotificationPort for NoopNotificationPort {
    fn trigger(&self, _effect: HapticEffect) -> Result<(), BridgeError> {
        Ok(())
    }
}

/// Fire-and-forget front for a [`NotificationPort`].
pub struct HapticDispatcher<P: NotificationPort> {
    port: P,
}

impl<P: NotificationPort> HapticDispatcher<P> {
    pub fn new(port: P) -> Self {
        Self { port }
    }

    /// Fires `effect` if `settings` allow it.
    ///
    /// Returns whether the bridge accepted the call. Failures are logged and
    /// otherwise dropped.
    pub fn fire(&self, settings: &Settings, effect: HapticEffect) -> bool {
        if !settings.haptic_feedback {
            debug!(
                "event=haptic module=bridge status=skipped effect={}",
                effect.as_str()
            );
            return false;
        }

        match self.port.trigger(effect) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    "event=haptic module=bridge status=error effect={} error={err}",
                    effect.as_str()
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BridgeError, HapticDispatcher, HapticEffect, NotificationPort};
    use crate::model::document::LifeOsData;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingPort {
        fail: bool,
        calls: RefCell<Vec<HapticEffect>>,
    }

    impl NotificationPort for RecordingPort {
        fn trigger(&self, effect: HapticEffect) -> Result<(), BridgeError> {
            self.calls.borrow_mut().push(effect);
            if self.fail {
                Err(BridgeError::Failed("vibrator busy".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn effect_names_parse_case_insensitively() {
        assert_eq!(" Success ".parse::<HapticEffect>(), Ok(HapticEffect::Success));
        assert!("buzz".parse::<HapticEffect>().is_err());
        for effect in HapticEffect::ALL {
            assert_eq!(effect.as_str().parse::<HapticEffect>(), Ok(effect));
        }
    }

    #[test]
    fn disabled_setting_skips_the_port() {
        let mut settings = LifeOsData::reset().settings;
        settings.haptic_feedback = false;
        let dispatcher = HapticDispatcher::new(RecordingPort::default());

        assert!(!dispatcher.fire(&settings, HapticEffect::Light));
        assert!(dispatcher.port.calls.borrow().is_empty());
    }

    #[test]
    fn bridge_failure_is_swallowed() {
        let settings = LifeOsData::reset().settings;
        let dispatcher = HapticDispatcher::new(RecordingPort {
            fail: true,
            ..RecordingPort::default()
        });

        assert!(!dispatcher.fire(&settings, HapticEffect::Heavy));
        assert_eq!(*dispatcher.port.calls.borrow(), vec![HapticEffect::Heavy]);
    }
}
