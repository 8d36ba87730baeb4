use crate::chord_table::ChordId;
use crate::pending::PendingEvent;
use crate::sink::EventSink;
use crate::types::{KeyAddr, KeyCode, KeyEvent, Millis};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// A chord whose action press has been sent downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveChord {
    pub chord: ChordId,
    pub action: KeyCode,
    /// Address the synthetic events are sent with (the first participant pressed).
    pub addr: KeyAddr,
    /// Whether the action key is still held downstream.
    pub pressed: bool,
}

/// Activated chords and the participant addresses they have consumed.
///
/// A chord stays registered until every consumed address has been released,
/// so that late releases are swallowed instead of leaking downstream. Its
/// action key is released on the first of them.
#[derive(Debug, Default)]
pub struct ActiveChords {
    chords: BTreeMap<u32, ActiveChord>,
    consumed: HashMap<KeyAddr, u32>,
    next_slot: u32,
}

impl ActiveChords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes `participants` and sends the action press.
    pub fn activate(
        &mut self,
        chord: ChordId,
        action: KeyCode,
        participants: &[PendingEvent],
        now: Millis,
        sink: &mut dyn EventSink,
    ) {
        let Some(first) = participants.first() else {
            return;
        };

        let slot = self.next_slot;
        self.next_slot = self.next_slot.wrapping_add(1);

        for p in participants {
            let previous = self.consumed.insert(p.addr, slot);
            debug_assert!(previous.is_none(), "{} consumed twice", p.addr);
        }
        self.chords.insert(
            slot,
            ActiveChord {
                chord,
                action,
                addr: first.addr,
                pressed: true,
            },
        );

        debug!(
            "Chord {:?} activated: {} at {} ({} keys)",
            chord,
            action,
            first.addr,
            participants.len()
        );
        sink.forward(KeyEvent::down(first.addr, action, now));
    }

    /// Handles the release of a consumed address. Returns false when the
    /// address was not consumed, in which case nothing happens.
    pub fn release(&mut self, addr: KeyAddr, now: Millis, sink: &mut dyn EventSink) -> bool {
        let Some(slot) = self.consumed.remove(&addr) else {
            return false;
        };

        if let Some(active) = self.chords.get_mut(&slot) {
            if active.pressed {
                active.pressed = false;
                debug!("Chord {:?} released by {}", active.chord, addr);
                sink.forward(KeyEvent::up(active.addr, active.action, now));
            } else {
                debug!("Swallowing late release of {}", addr);
            }
        }

        if !self.consumed.values().any(|s| *s == slot) {
            self.chords.remove(&slot);
        }
        true
    }

    /// Releases every held action key, in activation order. Consumed
    /// addresses stay mapped so their own releases are still swallowed.
    pub fn release_all(&mut self, now: Millis, sink: &mut dyn EventSink) {
        for active in self.chords.values_mut().filter(|a| a.pressed) {
            active.pressed = false;
            debug!("Chord {:?} force-released", active.chord);
            sink.forward(KeyEvent::up(active.addr, active.action, now));
        }
    }

    pub fn is_consumed(&self, addr: KeyAddr) -> bool {
        self.consumed.contains_key(&addr)
    }

    /// Chords still registered, held or waiting for their last releases.
    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    /// Chords whose action key is currently held downstream.
    pub fn held(&self) -> impl Iterator<Item = &ActiveChord> {
        self.chords.values().filter(|a| a.pressed)
    }
}
