//! Classifies the pending keys against the chord table.
//!
//! Matching is order-independent set containment: the pending keys are a
//! candidate for a chord when every one of them is a participant of it. A
//! candidate of the same size is an exact match; a bigger one keeps the
//! engine waiting.

use crate::chord_table::{ChordId, ChordTable, MIN_CHORD_KEYS};
use crate::types::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    /// No chord contains all pending keys.
    Impossible,
    /// Only longer chords are still possible.
    Partial,
    /// An exact match exists but a longer chord is still possible.
    Deferred(ChordId),
    /// An exact match and nothing longer to wait for.
    Exact(ChordId),
}

impl Match {
    pub fn exact(self) -> Option<ChordId> {
        match self {
            Match::Exact(id) | Match::Deferred(id) => Some(id),
            Match::Impossible | Match::Partial => None,
        }
    }
}

pub fn classify(keys: &[KeyCode], table: &ChordTable) -> Match {
    // Participants are distinct, so a repeated key can never be a subset.
    if keys.is_empty() || has_repeats(keys) {
        return Match::Impossible;
    }

    let mut exact = None;
    let mut longer = false;

    for (id, chord) in table.iter() {
        if chord.len() < keys.len() {
            continue;
        }
        if !keys.iter().all(|k| chord.contains(*k)) {
            continue;
        }

        if chord.len() == keys.len() {
            // Definition order breaks ties.
            exact.get_or_insert(id);
        } else {
            longer = true;
        }
    }

    match (exact, longer) {
        (Some(id), false) => Match::Exact(id),
        (Some(id), true) => Match::Deferred(id),
        (None, true) => Match::Partial,
        (None, false) => Match::Impossible,
    }
}

/// The chord the keys spell exactly, ignoring longer candidates.
pub fn exact_match(keys: &[KeyCode], table: &ChordTable) -> Option<ChordId> {
    classify(keys, table).exact()
}

/// Longest proper prefix (in press order) that spells a chord exactly,
/// with its length.
pub fn longest_exact_prefix(keys: &[KeyCode], table: &ChordTable) -> Option<(ChordId, usize)> {
    (MIN_CHORD_KEYS..keys.len())
        .rev()
        .find_map(|n| exact_match(&keys[..n], table).map(|id| (id, n)))
}

fn has_repeats(keys: &[KeyCode]) -> bool {
    keys.iter()
        .enumerate()
        .any(|(i, k)| keys[..i].contains(k))
}
