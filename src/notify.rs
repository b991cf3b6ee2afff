//! Change notification keyed by record kind.
//!
//! After every successful write, the store publishes an event naming the
//! record kind whose underlying set changed. Events carry no payload and
//! no ordering guarantee across kinds: each one is a hint to re-read
//! current state, not the state itself.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// The record kinds a subscriber can be notified about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Worker clock entries.
    WorkerTimesheets,
    /// Daily site records.
    SiteTimesheets,
    /// Payroll runs.
    PayrollCycles,
    /// Generated payslips.
    Payslips,
    /// Projects and assignments.
    Projects,
}

type Listener = Box<dyn Fn(RecordKind) + Send + Sync>;

/// Fan-out point for record-set change events.
///
/// # Example
///
/// ```
/// use sitepay_engine::notify::{ChangeHub, RecordKind};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let hub = ChangeHub::default();
/// let seen = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&seen);
/// hub.subscribe(move |kind| {
///     if kind == RecordKind::SiteTimesheets {
///         counter.fetch_add(1, Ordering::SeqCst);
///     }
/// });
///
/// hub.publish(RecordKind::SiteTimesheets);
/// assert_eq!(seen.load(Ordering::SeqCst), 1);
/// ```
#[derive(Default)]
pub struct ChangeHub {
    listeners: Mutex<Vec<Listener>>,
}

impl ChangeHub {
    /// Registers a listener for all subsequent events.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(RecordKind) + Send + Sync + 'static,
    {
        let mut listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
        listeners.push(Box::new(listener));
    }

    /// Delivers an event to every registered listener.
    pub fn publish(&self, kind: RecordKind) {
        let listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
        for listener in listeners.iter() {
            listener(kind);
        }
    }
}

impl std::fmt::Debug for ChangeHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self
            .listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len();
        f.debug_struct("ChangeHub").field("listeners", &count).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_publish_reaches_all_listeners() {
        let hub = ChangeHub::default();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&first);
        hub.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let counter = Arc::clone(&second);
        hub.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        hub.publish(RecordKind::Payslips);
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_listener_receives_the_kind() {
        let hub = ChangeHub::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        hub.subscribe(move |kind| {
            sink.lock().unwrap().push(kind);
        });

        hub.publish(RecordKind::SiteTimesheets);
        hub.publish(RecordKind::PayrollCycles);

        let events = seen.lock().unwrap();
        assert_eq!(
            *events,
            vec![RecordKind::SiteTimesheets, RecordKind::PayrollCycles]
        );
    }

    #[test]
    fn test_publish_without_listeners_is_a_no_op() {
        let hub = ChangeHub::default();
        hub.publish(RecordKind::Projects);
    }

    #[test]
    fn test_record_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&RecordKind::SiteTimesheets).unwrap(),
            "\"site_timesheets\""
        );
    }
}
