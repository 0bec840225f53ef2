use tracing::{error, info, warn};

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Info,
    Warning,
    Error,
}

/// User-facing notification surface.
///
/// Delivery problems stay inside the implementation; the coordinator never
/// learns whether a notification went out.
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NotificationKind, title: &str, message: &str);
}

/// Notifier that renders through the log stream
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, kind: NotificationKind, title: &str, message: &str) {
        match kind {
            NotificationKind::Error => error!(title = %title, message = %message, "Notification"),
            NotificationKind::Warning => warn!(title = %title, message = %message, "Notification"),
            NotificationKind::Success | NotificationKind::Info => {
                info!(title = %title, message = %message, "Notification")
            }
        }
    }
}
