use crate::domain::Notification;

/// Notification presenter - shows one transient status message at a time.
pub trait Notifier: Send + Sync {
    /// Show `notification`, replacing any message currently shown.
    fn show(&self, notification: Notification);

    /// Hide the current message, if any.
    fn hide(&self);
}
