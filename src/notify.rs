//! User-visible notifications.

use tracing::warn;

/// Fire-and-forget sink for messages shown to the user.
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

/// Emits notifications as structured log events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        warn!(target: "rocket_cart::toast", toast = message, "Notification");
    }
}
