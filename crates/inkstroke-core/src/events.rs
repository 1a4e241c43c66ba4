//! Capture notifications and their synchronous delivery.

use crate::ink::{InkLine, InkPoint};
use std::sync::mpsc;

/// Notification emitted by the line assembler.
#[derive(Debug, Clone, PartialEq)]
pub enum InkEvent {
    LineStarted(InkPoint),
    PointDrawn(InkPoint),
    LineCompleted(InkLine),
    LineCancelled,
    /// The committed line collection was emptied.
    LinesCleared,
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&InkEvent)>;

/// Ordered subscriber list. Events are delivered synchronously, in emit order.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&InkEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Register a channel; events are cloned into it until the receiver is dropped.
    pub fn subscribe_channel(&mut self) -> mpsc::Receiver<InkEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribe(move |event| {
            // A dropped receiver just stops listening.
            let _ = tx.send(event.clone());
        });
        rx
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: InkEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_delivery_order() {
        let mut bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        bus.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        bus.emit(InkEvent::LineCancelled);
        bus.emit(InkEvent::LinesCleared);

        assert_eq!(*seen.borrow(), vec![InkEvent::LineCancelled, InkEvent::LinesCleared]);
    }

    #[test]
    fn test_unsubscribe() {
        let mut bus = EventBus::new();
        let id = bus.subscribe(|_| {});
        assert_eq!(bus.len(), 1);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        assert!(bus.is_empty());
    }

    #[test]
    fn test_channel_subscription() {
        let mut bus = EventBus::new();
        let rx = bus.subscribe_channel();
        bus.emit(InkEvent::LineCancelled);
        assert_eq!(rx.try_recv().unwrap(), InkEvent::LineCancelled);

        drop(rx);
        bus.emit(InkEvent::LineCancelled);
    }
}
