//! Single-slot notification banner with auto-hide.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use floward_core::ClientConfig;
use floward_core::domain::Notification;
use floward_core::ports::Notifier;

struct Shown {
    notification: Notification,
    expires_at: Instant,
}

/// Holds the one notification currently on screen. A new one replaces it, and
/// it disappears `ttl` after it was shown.
pub struct BannerPresenter {
    ttl: Duration,
    slot: Mutex<Option<Shown>>,
}

impl BannerPresenter {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.notification_ttl())
    }

    fn slot(&self) -> MutexGuard<'_, Option<Shown>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The notification to render now, if any.
    pub fn current(&self) -> Option<Notification> {
        self.current_at(Instant::now())
    }

    fn current_at(&self, now: Instant) -> Option<Notification> {
        let mut slot = self.slot();
        if slot.as_ref().is_some_and(|shown| now >= shown.expires_at) {
            *slot = None;
        }
        slot.as_ref().map(|shown| shown.notification.clone())
    }
}

impl Notifier for BannerPresenter {
    fn show(&self, notification: Notification) {
        *self.slot() = Some(Shown {
            notification,
            expires_at: Instant::now() + self.ttl,
        });
    }

    fn hide(&self) {
        *self.slot() = None;
    }
}
