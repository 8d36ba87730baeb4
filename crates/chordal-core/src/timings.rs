use crate::types::{KeyCode, KeyEdge, KeyEvent, Millis};
use tracing::info;

/// Presses closer together than this, with the first still held, look like
/// an attempted chord.
pub const CHORD_HINT_MS: Millis = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingSample {
    pub key: KeyCode,
    /// Time since the previous raw press, or since tracking started.
    pub since_last_ms: Millis,
    pub chord_hint: bool,
}

/// Records press-to-press intervals of the raw stream, to help tune the
/// chord timeout.
#[derive(Debug, Default)]
pub struct KeyTimings {
    tracking: bool,
    last_press: Option<Millis>,
    last_down: bool,
}

impl KeyTimings {
    pub fn start(&mut self) {
        info!("Key timing started");
        self.tracking = true;
        self.last_press = None;
        self.last_down = false;
    }

    pub fn stop(&mut self) {
        info!("Key timing stopped");
        self.tracking = false;
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn observe(&mut self, event: &KeyEvent) -> Option<TimingSample> {
        if !self.tracking {
            return None;
        }

        match event.edge {
            KeyEdge::Down => {
                let since_last_ms = self
                    .last_press
                    .map_or(0, |last| event.t.saturating_sub(last));
                let chord_hint =
                    self.last_press.is_some() && self.last_down && since_last_ms < CHORD_HINT_MS;

                self.last_press = Some(event.t);
                self.last_down = true;

                info!(
                    "{}ms key pressed {}{}",
                    since_last_ms,
                    event.key,
                    if chord_hint { " chord" } else { "" }
                );
                Some(TimingSample {
                    key: event.key,
                    since_last_ms,
                    chord_hint,
                })
            }
            KeyEdge::Up => {
                self.last_down = false;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::keys;
    use crate::types::KeyAddr;

    fn down(key: KeyCode, t: Millis) -> KeyEvent {
        KeyEvent::down(KeyAddr::new(0, 0), key, t)
    }

    fn up(key: KeyCode, t: Millis) -> KeyEvent {
        KeyEvent::up(KeyAddr::new(0, 0), key, t)
    }

    #[test]
    fn test_idle_until_started() {
        let mut timings = KeyTimings::default();
        assert_eq!(timings.observe(&down(keys::A, 0)), None);
        assert!(!timings.is_tracking());
    }

    #[test]
    fn test_close_presses_hint_chord() {
        let mut timings = KeyTimings::default();
        timings.start();

        let first = timings.observe(&down(keys::F, 100)).unwrap();
        assert_eq!(first.since_last_ms, 0);
        assert!(!first.chord_hint);

        let second = timings.observe(&down(keys::R, 110)).unwrap();
        assert_eq!(second.since_last_ms, 10);
        assert!(second.chord_hint);
    }

    #[test]
    fn test_release_in_between_is_not_a_chord() {
        let mut timings = KeyTimings::default();
        timings.start();

        timings.observe(&down(keys::F, 0));
        assert_eq!(timings.observe(&up(keys::F, 5)), None);
        let s = timings.observe(&down(keys::R, 8)).unwrap();
        assert_eq!(s.since_last_ms, 8);
        assert!(!s.chord_hint);
    }

    #[test]
    fn test_slow_presses_are_not_chords() {
        let mut timings = KeyTimings::default();
        timings.start();
        timings.observe(&down(keys::F, 0));
        let s = timings.observe(&down(keys::R, CHORD_HINT_MS)).unwrap();
        assert!(!s.chord_hint);

        timings.stop();
        assert_eq!(timings.observe(&down(keys::A, 20)), None);
    }
}
