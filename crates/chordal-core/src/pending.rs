use crate::types::{KeyAddr, KeyCode, KeyEvent, Millis};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A press held back while the engine decides whether it belongs to a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingEvent {
    pub addr: KeyAddr,
    pub key: KeyCode,
    pub t_down: Millis,
}

impl PendingEvent {
    /// The press exactly as it was received.
    pub fn to_event(self) -> KeyEvent {
        KeyEvent::down(self.addr, self.key, self.t_down)
    }
}

impl From<KeyEvent> for PendingEvent {
    fn from(event: KeyEvent) -> Self {
        Self {
            addr: event.addr,
            key: event.key,
            t_down: event.t,
        }
    }
}

/// What to do with a press that arrives while the queue is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowPolicy {
    /// Expire the oldest entry to make room.
    #[default]
    EvictOldest,
    /// Drop the incoming press without forwarding it.
    DropNewest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    Queued,
    /// The returned entry was pushed out and still has to be forwarded.
    Evicted(PendingEvent),
    Dropped,
}

/// Bounded FIFO of unresolved presses, in press order.
#[derive(Debug, Clone)]
pub struct PendingQueue {
    events: VecDeque<PendingEvent>,
    capacity: usize,
    overflow: OverflowPolicy,
}

impl PendingQueue {
    pub fn new(capacity: usize, overflow: OverflowPolicy) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
            overflow,
        }
    }

    pub fn push(&mut self, event: PendingEvent) -> PushOutcome {
        if self.events.len() < self.capacity {
            self.events.push_back(event);
            return PushOutcome::Queued;
        }

        match self.overflow {
            OverflowPolicy::DropNewest => PushOutcome::Dropped,
            OverflowPolicy::EvictOldest => match self.events.pop_front() {
                Some(oldest) => {
                    self.events.push_back(event);
                    PushOutcome::Evicted(oldest)
                }
                // Zero capacity: nothing to evict.
                None => PushOutcome::Dropped,
            },
        }
    }

    pub fn pop_front(&mut self) -> Option<PendingEvent> {
        self.events.pop_front()
    }

    /// Removes the entry for `addr`, leaving the entries around it in place.
    pub fn remove_at(&mut self, addr: KeyAddr) -> Option<PendingEvent> {
        let idx = self.position(addr)?;
        self.events.remove(idx)
    }

    /// Removes the `n` oldest entries.
    pub fn drain_front(&mut self, n: usize) -> Vec<PendingEvent> {
        let n = n.min(self.events.len());
        self.events.drain(..n).collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn front(&self) -> Option<&PendingEvent> {
        self.events.front()
    }

    pub fn position(&self, addr: KeyAddr) -> Option<usize> {
        self.events.iter().position(|e| e.addr == addr)
    }

    pub fn contains(&self, addr: KeyAddr) -> bool {
        self.position(addr).is_some()
    }

    pub fn keys(&self) -> Vec<KeyCode> {
        self.events.iter().map(|e| e.key).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::keys;

    fn pe(col: u8, key: KeyCode, t: Millis) -> PendingEvent {
        PendingEvent {
            addr: KeyAddr::new(0, col),
            key,
            t_down: t,
        }
    }

    #[test]
    fn test_fifo_order() {
        let mut q = PendingQueue::new(4, OverflowPolicy::EvictOldest);
        assert_eq!(q.push(pe(0, keys::A, 0)), PushOutcome::Queued);
        assert_eq!(q.push(pe(1, keys::S, 5)), PushOutcome::Queued);
        assert_eq!(q.keys(), vec![keys::A, keys::S]);
        assert_eq!(q.pop_front(), Some(pe(0, keys::A, 0)));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let mut q = PendingQueue::new(2, OverflowPolicy::EvictOldest);
        q.push(pe(0, keys::A, 0));
        q.push(pe(1, keys::S, 1));
        assert_eq!(
            q.push(pe(2, keys::D, 2)),
            PushOutcome::Evicted(pe(0, keys::A, 0))
        );
        assert_eq!(q.keys(), vec![keys::S, keys::D]);
    }

    #[test]
    fn test_overflow_drops_newest() {
        let mut q = PendingQueue::new(2, OverflowPolicy::DropNewest);
        q.push(pe(0, keys::A, 0));
        q.push(pe(1, keys::S, 1));
        assert_eq!(q.push(pe(2, keys::D, 2)), PushOutcome::Dropped);
        assert_eq!(q.keys(), vec![keys::A, keys::S]);
    }

    #[test]
    fn test_remove_at_keeps_neighbours() {
        let mut q = PendingQueue::new(10, OverflowPolicy::EvictOldest);
        q.push(pe(0, keys::A, 0));
        q.push(pe(1, keys::S, 1));
        q.push(pe(2, keys::D, 2));

        assert_eq!(q.remove_at(KeyAddr::new(0, 1)), Some(pe(1, keys::S, 1)));
        assert_eq!(q.keys(), vec![keys::A, keys::D]);
        assert_eq!(q.remove_at(KeyAddr::new(0, 1)), None);
    }

    #[test]
    fn test_drain_front_and_clear() {
        let mut q = PendingQueue::new(10, OverflowPolicy::EvictOldest);
        q.push(pe(0, keys::A, 0));
        q.push(pe(1, keys::S, 1));
        q.push(pe(2, keys::D, 2));

        let drained = q.drain_front(2);
        assert_eq!(drained, vec![pe(0, keys::A, 0), pe(1, keys::S, 1)]);
        assert_eq!(q.drain_front(5).len(), 1);

        q.push(pe(3, keys::F, 3));
        q.clear();
        assert!(q.is_empty());
    }

    #[test]
    fn test_replayed_press_is_unchanged() {
        let p = pe(4, keys::F, 42);
        assert_eq!(
            p.to_event(),
            KeyEvent::down(KeyAddr::new(0, 4), keys::F, 42)
        );
    }
}
