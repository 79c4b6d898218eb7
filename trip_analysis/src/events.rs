use std::sync::Arc;

use entities::drivers::DriverId;

/// Events other screens care about. Today that is only the history screen
/// reloading after a save.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TripEvent {
    AnalysisSaved { driver: DriverId },
}

pub trait TripEventSubscriber: Send + Sync {
    fn notify(&self, event: &TripEvent);
}

/// Explicit observer registry. Subscribers are registered up front by the
/// host; there is no ambient global callback slot to mutate.
#[derive(Clone, Default)]
pub struct EventPublisher {
    subscribers: Vec<Arc<dyn TripEventSubscriber>>,
}

impl EventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, subscriber: Arc<dyn TripEventSubscriber>) {
        self.subscribers.push(subscriber);
    }

    pub fn publish(&self, event: TripEvent) {
        for subscriber in &self.subscribers {
            subscriber.notify(&event);
        }
    }
}
