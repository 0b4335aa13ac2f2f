//! Port for delivering change notifications to the host.

use crate::sync::domain::TaskEvent;

/// Host-provided sink for change notifications.
///
/// The coordinator calls [`EventSink::emit`] once per notification, after
/// the refresh that produced it has fully fetched its data and before the
/// new snapshot is published. Delivery must not block: hosts that forward
/// events to slow consumers should buffer internally.
pub trait EventSink: Send + Sync {
    /// Delivers one notification to the host.
    fn emit(&self, event: TaskEvent);
}
