use crate::active::ActiveChords;
use crate::chord_table::{ChordId, ChordTable};
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::layers::{LayerMask, LayerOracle};
use crate::matcher::{self, Match};
use crate::pending::{PendingEvent, PendingQueue, PushOutcome};
use crate::sink::EventSink;
use crate::types::{KeyAddr, KeyEdge, KeyEvent, Millis};
use tracing::{debug, trace, warn};

/// Per-address bookkeeping. An address is idle, pending (in the queue) or
/// consumed (absorbed into an active chord), never more than one of these.
#[derive(Debug)]
struct ChordState {
    pending: PendingQueue,
    active: ActiveChords,
}

/// Rewrites a clean key event stream, turning chords into their action key.
///
/// Presses of chord participants are held back until they either complete a
/// chord, can no longer be part of one, time out, or are released. Whatever
/// is held back is forwarded later in its original order; nothing forwarded
/// is ever fed back into the engine.
pub struct ChordEngine {
    table: ChordTable,
    timeout_ms: u64,
    disabled_layers: LayerMask,
    state: ChordState,
}

impl ChordEngine {
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        let table = config.validate()?;
        Ok(Self {
            table,
            timeout_ms: config.timeout_ms,
            disabled_layers: config.disabled_layers,
            state: ChordState {
                pending: PendingQueue::new(config.queue_capacity, config.overflow),
                active: ActiveChords::new(),
            },
        })
    }

    /// Entry point for every raw key transition.
    pub fn on_key_event(
        &mut self,
        event: KeyEvent,
        layers: &dyn LayerOracle,
        sink: &mut dyn EventSink,
    ) {
        match event.edge {
            KeyEdge::Down => self.on_press(event, layers, sink),
            KeyEdge::Up => self.on_release(event, sink),
        }
    }

    /// Called once per scan cycle; expires presses older than the timeout.
    pub fn on_tick(&mut self, now: Millis, sink: &mut dyn EventSink) {
        if self.timeout_ms == 0 {
            return;
        }

        while let Some(&oldest) = self.state.pending.front() {
            if now.saturating_sub(oldest.t_down) <= self.timeout_ms {
                break;
            }

            // Waiting for a longer chord is over; take the shorter one.
            if self.settle_front(now, sink) {
                self.check_chords(now, sink);
                continue;
            }

            debug!("Pending {} timed out after {}ms", oldest.key, now - oldest.t_down);
            self.expire_oldest(sink);
            self.check_chords(now, sink);
        }
    }

    /// Resolves everything in flight: the queue is settled or replayed and
    /// every held action key is released.
    pub fn flush(&mut self, now: Millis, sink: &mut dyn EventSink) {
        self.settle_or_replay(now, sink);
        self.state.active.release_all(now, sink);
    }

    /// Forgets everything in flight without emitting anything. Used once
    /// the host stops routing events here, so no release is owed anymore.
    pub fn reset(&mut self) {
        self.state.pending.clear();
        self.state.active = ActiveChords::new();
    }

    pub fn table(&self) -> &ChordTable {
        &self.table
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    pub fn pending_len(&self) -> usize {
        self.state.pending.len()
    }

    pub fn is_pending(&self, addr: KeyAddr) -> bool {
        self.state.pending.contains(addr)
    }

    pub fn is_consumed(&self, addr: KeyAddr) -> bool {
        self.state.active.is_consumed(addr)
    }

    /// Number of chords whose action key is held downstream.
    pub fn active_len(&self) -> usize {
        self.state.active.held().count()
    }

    fn chording_suppressed(&self, layers: &dyn LayerOracle) -> bool {
        self.disabled_layers
            .iter()
            .any(|layer| layers.is_layer_active(layer))
    }

    fn on_press(&mut self, event: KeyEvent, layers: &dyn LayerOracle, sink: &mut dyn EventSink) {
        if self.chording_suppressed(layers) {
            trace!("Chording disabled on active layer, passing {}", event.key);
            self.replay(sink);
            sink.forward(event);
            return;
        }

        if !self.table.is_participant(event.key) {
            // A foreign key ends any chord in progress; earlier presses go first.
            self.settle_or_replay(event.t, sink);
            sink.forward(event);
            return;
        }

        if self.state.pending.contains(event.addr) || self.state.active.is_consumed(event.addr) {
            debug!("Ignoring repeated press at {}", event.addr);
            return;
        }

        match self.state.pending.push(PendingEvent::from(event)) {
            PushOutcome::Queued => {
                debug!(
                    "Queueing {} at index {}",
                    event.key,
                    self.state.pending.len() - 1
                );
            }
            PushOutcome::Evicted(oldest) => {
                warn!(
                    "Pending queue full ({}), expiring {} early",
                    self.state.pending.capacity(),
                    oldest.key
                );
                sink.forward(oldest.to_event());
            }
            PushOutcome::Dropped => {
                warn!(
                    "Pending queue full ({}), dropping {}",
                    self.state.pending.capacity(),
                    event.key
                );
                return;
            }
        }

        self.check_chords(event.t, sink);
    }

    fn on_release(&mut self, event: KeyEvent, sink: &mut dyn EventSink) {
        if self.state.pending.contains(event.addr) {
            // A settled chord may consume the address; it is released below.
            if self.settle_front(event.t, sink) {
                self.check_chords(event.t, sink);
            }
            if self.state.pending.contains(event.addr) {
                self.release_pending(event, sink);
                return;
            }
        }

        if self.state.active.release(event.addr, event.t, sink) {
            return;
        }

        sink.forward(event);
    }

    /// Forwards a pending key that was released before it resolved. Keys
    /// queued ahead of it are expired first to keep the output in press order.
    fn release_pending(&mut self, event: KeyEvent, sink: &mut dyn EventSink) {
        while let Some(&front) = self.state.pending.front() {
            if front.addr == event.addr {
                break;
            }
            debug!("Expiring {} ahead of released {}", front.key, event.key);
            self.expire_oldest(sink);
        }

        if let Some(pressed) = self.state.pending.remove_at(event.addr) {
            debug!("Sending queued {} for released key", pressed.key);
            sink.forward(pressed.to_event());
        }
        sink.forward(event);

        self.check_chords(event.t, sink);
    }

    /// Runs the matcher until the queue is empty or still worth waiting on.
    fn check_chords(&mut self, now: Millis, sink: &mut dyn EventSink) {
        loop {
            let keys = self.state.pending.keys();
            if keys.is_empty() {
                return;
            }

            match matcher::classify(&keys, &self.table) {
                Match::Exact(id) => {
                    self.activate(id, keys.len(), now, sink);
                    return;
                }
                Match::Partial | Match::Deferred(_) => {
                    trace!("Partial match on {} keys, waiting", keys.len());
                    return;
                }
                Match::Impossible => {
                    // A later key ruled out the longer chord.
                    if !self.settle_front(now, sink) {
                        debug!("No partial chords; expiring oldest");
                        self.expire_oldest(sink);
                    }
                }
            }
        }
    }

    /// Ends the wait for longer chords: the longest front of the queue that
    /// spells a chord, the whole queue included, activates.
    fn settle_front(&mut self, now: Millis, sink: &mut dyn EventSink) -> bool {
        let keys = self.state.pending.keys();
        let settled = matcher::exact_match(&keys, &self.table)
            .map(|id| (id, keys.len()))
            .or_else(|| matcher::longest_exact_prefix(&keys, &self.table));

        match settled {
            Some((id, n)) => {
                debug!("Settling deferred chord {:?} on {} keys", id, n);
                self.activate(id, n, now, sink);
                true
            }
            None => false,
        }
    }

    /// Empties the queue: chords that are already spelled activate, every
    /// other press is forwarded in order.
    fn settle_or_replay(&mut self, now: Millis, sink: &mut dyn EventSink) {
        while !self.state.pending.is_empty() {
            if !self.settle_front(now, sink) {
                self.expire_oldest(sink);
            }
        }
    }

    fn replay(&mut self, sink: &mut dyn EventSink) {
        if !self.state.pending.is_empty() {
            debug!("Replaying {} pending keys", self.state.pending.len());
        }
        while let Some(p) = self.state.pending.pop_front() {
            sink.forward(p.to_event());
        }
    }

    fn expire_oldest(&mut self, sink: &mut dyn EventSink) {
        if let Some(p) = self.state.pending.pop_front() {
            debug!("Expiring {} from {}", p.key, p.addr);
            sink.forward(p.to_event());
        }
    }

    /// Consumes the `n` oldest pending presses into chord `id`.
    fn activate(&mut self, id: ChordId, n: usize, now: Millis, sink: &mut dyn EventSink) {
        let Some(action) = self.table.get(id).map(|c| c.action()) else {
            return;
        };
        let participants = self.state.pending.drain_front(n);
        self.state
            .active
            .activate(id, action, &participants, now, sink);
    }
}
