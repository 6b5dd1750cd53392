use floward_core::domain::{Notification, NotificationKind};
use floward_core::ports::Notifier;

/// Writes notifications to the log instead of a screen. For headless hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn show(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Error => tracing::warn!(text = %notification.text, "Notification"),
            NotificationKind::Info | NotificationKind::Success => {
                tracing::info!(text = %notification.text, "Notification")
            }
        }
    }

    fn hide(&self) {}
}
