// ============================================================================
// claudio-core/src/publisher.rs
// ============================================================================
//
// STATUS PUBLICATION: Observable Conversion Status
//
// `StatusPublisher` owns the single current `ConversionStatus`. The runner is
// its only writer; any number of readers can poll it, register a
// `StatusObserver` callback, or take a channel receiver from `subscribe`.
//
// Publishing a value equal to the current one is a no-op: observers only ever
// see actual transitions.

use crate::status::ConversionStatus;

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};

/// Receives every status transition.
///
/// Called on the thread that published the change, which for conversions
/// started with `ConversionRunner::spawn_convert` is the worker thread.
pub trait StatusObserver: Send + Sync {
    fn on_status(&self, status: &ConversionStatus);
}

/// Forwards transitions to a closure.
impl<F> StatusObserver for F
where
    F: Fn(&ConversionStatus) + Send + Sync,
{
    fn on_status(&self, status: &ConversionStatus) {
        self(status)
    }
}

struct PublisherState {
    current: ConversionStatus,
    subscribers: Vec<Sender<ConversionStatus>>,
    observers: Vec<Arc<dyn StatusObserver>>,
}

/// Thread-safe holder of the current conversion status.
#[derive(Clone)]
pub struct StatusPublisher {
    state: Arc<Mutex<PublisherState>>,
}

impl StatusPublisher {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(PublisherState {
                current: ConversionStatus::Idle,
                subscribers: Vec::new(),
                observers: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PublisherState> {
        // The state stays consistent even if an observer panicked mid-publish.
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns a snapshot of the current status.
    pub fn current(&self) -> ConversionStatus {
        self.lock().current.clone()
    }

    /// Returns a receiver for every transition published from now on.
    pub fn subscribe(&self) -> Receiver<ConversionStatus> {
        let (tx, rx) = mpsc::channel();
        self.lock().subscribers.push(tx);
        rx
    }

    pub fn add_observer(&self, observer: Arc<dyn StatusObserver>) {
        self.lock().observers.push(observer);
    }

    /// Replaces the current status. Returns false if it was unchanged.
    pub(crate) fn publish(&self, status: ConversionStatus) -> bool {
        let observers = {
            let mut state = self.lock();
            if state.current == status {
                log::trace!("Status unchanged: {:?}", status);
                return false;
            }
            log::debug!("Status: {:?} -> {:?}", state.current, status);
            state.current = status.clone();
            state
                .subscribers
                .retain(|subscriber| subscriber.send(status.clone()).is_ok());
            state.observers.clone()
        };

        // Observers run outside the lock so they may read `current` themselves.
        for observer in observers {
            observer.on_status(&status);
        }
        true
    }
}

impl Default for StatusPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConversionError;

    #[test]
    fn starts_idle() {
        assert_eq!(StatusPublisher::new().current(), ConversionStatus::Idle);
    }

    #[test]
    fn subscribers_receive_transitions_in_order() {
        let publisher = StatusPublisher::new();
        let rx = publisher.subscribe();

        publisher.publish(ConversionStatus::in_progress("a.flac"));
        publisher.publish(ConversionStatus::Completed);

        let seen: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            seen,
            vec![ConversionStatus::in_progress("a.flac"), ConversionStatus::Completed]
        );
        assert_eq!(publisher.current(), ConversionStatus::Completed);
    }

    #[test]
    fn equal_status_is_not_republished() {
        let publisher = StatusPublisher::new();
        let rx = publisher.subscribe();

        assert!(publisher.publish(ConversionStatus::failed(ConversionError::TaskFailed)));
        assert!(!publisher.publish(ConversionStatus::failed(ConversionError::TaskFailed)));
        assert!(!publisher.publish(ConversionStatus::failed(ConversionError::TaskFailed)));

        assert_eq!(rx.try_iter().count(), 1);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let publisher = StatusPublisher::new();
        let kept = publisher.subscribe();
        drop(publisher.subscribe());

        publisher.publish(ConversionStatus::Completed);

        assert_eq!(publisher.lock().subscribers.len(), 1);
        assert_eq!(kept.try_recv().ok(), Some(ConversionStatus::Completed));
    }

    #[test]
    fn closure_observers_are_called() {
        let publisher = StatusPublisher::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        publisher.add_observer(Arc::new(move |status: &ConversionStatus| {
            sink.lock().unwrap().push(status.to_string());
        }));

        publisher.publish(ConversionStatus::in_progress("my song.flac"));
        publisher.publish(ConversionStatus::Completed);

        assert_eq!(*seen.lock().unwrap(), vec!["Converting my song.flac", "Done"]);
    }
}
