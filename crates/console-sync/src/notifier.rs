//! Observer registry for completed poll cycles.

use console_protocol::LogEntry;

/// A callback invoked with each cycle's appended suffix.
pub type RefreshObserver = Box<dyn Fn(&[LogEntry]) + Send + Sync>;

/// Ordered list of observers, each invoked once per completed poll
/// cycle with the cycle's appended suffix (possibly empty).
///
/// Observers run synchronously, in registration order, on the
/// scheduler's own task. Panics are deliberately not caught here —
/// propagation policy belongs to the caller.
#[derive(Default)]
pub struct RefreshNotifier {
    observers: Vec<RefreshObserver>,
}

impl RefreshNotifier {
    /// Creates an empty notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an observer. Invocation order is registration order.
    pub fn register(&mut self, observer: impl Fn(&[LogEntry]) + Send + Sync + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Invokes every observer with the appended suffix.
    pub fn notify(&self, appended: &[LogEntry]) {
        for observer in &self.observers {
            observer(appended);
        }
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Whether no observers are registered.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn observers_run_in_registration_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut notifier = RefreshNotifier::new();
        for tag in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            notifier.register(move |_| order.lock().unwrap().push(tag));
        }

        notifier.notify(&[]);
        assert_eq!(*order.lock().unwrap(), ["first", "second", "third"]);
    }

    #[test]
    fn empty_suffix_still_notifies() {
        let count = Arc::new(Mutex::new(0));
        let mut notifier = RefreshNotifier::new();
        let seen = Arc::clone(&count);
        notifier.register(move |appended| {
            assert!(appended.is_empty());
            *seen.lock().unwrap() += 1;
        });

        notifier.notify(&[]);
        notifier.notify(&[]);
        assert_eq!(*count.lock().unwrap(), 2);
    }
}
