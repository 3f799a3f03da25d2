//! Broadcast channel for store transitions.
//!
//! [`EventBus`] wraps a [`tokio::sync::broadcast`] channel. Every action a
//! persisted store applies is published through its bus so that views can
//! re-render without polling.

use tokio::sync::broadcast;

/// Default channel capacity for store buses.
pub const DEFAULT_CAPACITY: usize = 256;

/// Broadcast bus for store actions.
///
/// When the ring buffer is full, the oldest messages are dropped for
/// lagging receivers.
#[derive(Debug, Clone)]
pub struct EventBus<T> {
    sender: broadcast::Sender<T>,
}

impl<T: Clone> EventBus<T> {
    /// Creates a new `EventBus` with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes a message to all subscribers.
    ///
    /// Returns the number of receivers that received the message.
    /// If there are no active receivers, the message is silently dropped.
    pub fn publish(&self, message: T) -> usize {
        self.sender.send(message).unwrap_or(0)
    }

    /// Creates a new receiver that will receive all future messages.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<T> {
        self.sender.subscribe()
    }

    /// Returns the current number of active receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl<T: Clone> Default for EventBus<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn publish_without_receivers_returns_zero() {
        let bus: EventBus<u32> = EventBus::new(8);
        assert_eq!(bus.publish(1), 0);
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_message() {
        let bus = EventBus::new(8);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        assert_eq!(bus.publish("bookmarked".to_string()), 2);

        let Ok(a) = rx1.recv().await else {
            panic!("rx1 failed");
        };
        let Ok(b) = rx2.recv().await else {
            panic!("rx2 failed");
        };
        assert_eq!(a, b);
    }

    #[test]
    fn receiver_count_tracks_subscribers() {
        let bus: EventBus<u8> = EventBus::default();
        assert_eq!(bus.receiver_count(), 0);
        let rx = bus.subscribe();
        assert_eq!(bus.receiver_count(), 1);
        drop(rx);
        assert_eq!(bus.receiver_count(), 0);
    }
}
