//! Payload-less "state changed" notification.
//!
//! Engines emit after every externally meaningful mutation (card played,
//! turn step resolved, offer bought, node advanced). Subscribers re-read
//! whatever state they render; the signal itself carries nothing.
//!
//! Hosts that poll instead of subscribing can compare [`StateSignal::revision`]
//! against the last value they rendered.

use std::fmt;

/// Handle returned by [`StateSignal::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

/// Single-threaded observer list plus a revision counter.
#[derive(Default)]
pub struct StateSignal {
    subscribers: Vec<(SubscriptionId, Box<dyn FnMut()>)>,
    next_id: u32,
    revision: u64,
}

impl StateSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback invoked on every emit.
    pub fn subscribe(&mut self, callback: impl FnMut() + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns false if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Bump the revision and notify every subscriber in registration order.
    pub fn emit(&mut self) {
        self.revision += 1;
        for (_, callback) in &mut self.subscribers {
            callback();
        }
    }

    /// Number of emits so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl fmt::Debug for StateSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateSignal")
            .field("subscribers", &self.subscribers.len())
            .field("revision", &self.revision)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_emit_notifies_subscribers() {
        let mut signal = StateSignal::new();
        let hits = Rc::new(Cell::new(0));

        let h = Rc::clone(&hits);
        signal.subscribe(move || h.set(h.get() + 1));

        signal.emit();
        signal.emit();

        assert_eq!(hits.get(), 2);
        assert_eq!(signal.revision(), 2);
    }

    #[test]
    fn test_unsubscribe() {
        let mut signal = StateSignal::new();
        let hits = Rc::new(Cell::new(0));

        let h = Rc::clone(&hits);
        let id = signal.subscribe(move || h.set(h.get() + 1));
        assert!(signal.unsubscribe(id));
        assert!(!signal.unsubscribe(id));

        signal.emit();
        assert_eq!(hits.get(), 0);
        assert_eq!(signal.revision(), 1);
        assert_eq!(signal.subscriber_count(), 0);
    }
}
