//! Notification adapter seam.
//!
//! Delivery is fire-and-forget: [`dispatch`] logs failures and moves on, it
//! never hands an error back into the mutation path.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::effects::{Effect, Notification, SoundKind};
use crate::error::NotifyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Granted,
    Denied,
}

/// Something that can show notifications and play sounds.
pub trait Notifier {
    fn request_permission(&mut self) -> Permission;

    fn notify(&mut self, notification: &Notification) -> Result<(), NotifyError>;

    fn play_sound(&mut self, sound: SoundKind) -> Result<(), NotifyError>;
}

/// Counts from one [`dispatch`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Deliver every effect, swallowing (and logging) failures.
pub fn dispatch(effects: &[Effect], notifier: &mut dyn Notifier) -> DispatchReport {
    let mut report = DispatchReport::default();
    for effect in effects {
        let result = match effect {
            Effect::Notify { notification } => notifier.notify(notification),
            Effect::PlaySound { sound } => notifier.play_sound(*sound),
        };
        match result {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                warn!(error = %e, ?effect, "effect dispatch failed");
                report.failed += 1;
            }
        }
    }
    report
}

/// Notifier that records what it was asked to do.
///
/// With `permission` set to `Denied`, notifications fail the way a browser
/// without permission would; sounds still play.
#[derive(Debug, Clone)]
pub struct RecordingNotifier {
    pub permission: Permission,
    pub notifications: Vec<Notification>,
    pub sounds: Vec<SoundKind>,
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self {
            permission: Permission::Granted,
            notifications: Vec::new(),
            sounds: Vec::new(),
        }
    }
}

impl RecordingNotifier {
    pub fn denied() -> Self {
        Self {
            permission: Permission::Denied,
            ..Self::default()
        }
    }
}

impl Notifier for RecordingNotifier {
    fn request_permission(&mut self) -> Permission {
        self.permission
    }

    fn notify(&mut self, notification: &Notification) -> Result<(), NotifyError> {
        if self.permission == Permission::Denied {
            return Err(NotifyError::PermissionDenied);
        }
        self.notifications.push(notification.clone());
        Ok(())
    }

    fn play_sound(&mut self, sound: SoundKind) -> Result<(), NotifyError> {
        self.sounds.push(sound);
        Ok(())
    }
}
