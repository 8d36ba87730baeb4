use crate::error::ConfigError;
use crate::types::KeyCode;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const MIN_CHORD_KEYS: usize = 2;
pub const MAX_CHORD_KEYS: usize = 5;

/// Chord as written in a configuration, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordDef {
    pub keys: Vec<KeyCode>,
    pub action: KeyCode,
}

impl ChordDef {
    pub fn new(keys: &[KeyCode], action: KeyCode) -> Self {
        Self {
            keys: keys.to_vec(),
            action,
        }
    }
}

/// Position of a chord in its table. Lower ids win ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChordId(pub usize);

/// A validated chord: 2 to 5 distinct participants and one action key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    keys: [KeyCode; MAX_CHORD_KEYS],
    len: u8,
    action: KeyCode,
}

impl Chord {
    fn from_def(index: usize, def: &ChordDef) -> Result<Self, ConfigError> {
        let count = def.keys.len();
        if count < MIN_CHORD_KEYS {
            return Err(ConfigError::TooFewKeys {
                index,
                count,
                min: MIN_CHORD_KEYS,
            });
        }
        if count > MAX_CHORD_KEYS {
            return Err(ConfigError::TooManyKeys {
                index,
                count,
                max: MAX_CHORD_KEYS,
            });
        }

        let mut keys = [KeyCode::new(0); MAX_CHORD_KEYS];
        for (i, key) in def.keys.iter().enumerate() {
            if keys[..i].contains(key) {
                return Err(ConfigError::DuplicateKey { index, key: *key });
            }
            keys[i] = *key;
        }

        Ok(Self {
            keys,
            len: count as u8,
            action: def.action,
        })
    }

    pub fn keys(&self) -> &[KeyCode] {
        &self.keys[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, key: KeyCode) -> bool {
        self.keys().contains(&key)
    }

    pub fn action(&self) -> KeyCode {
        self.action
    }
}

/// Read-only list of chords, in definition order.
#[derive(Debug, Clone, Default)]
pub struct ChordTable {
    chords: Vec<Chord>,
    participants: HashSet<KeyCode>,
}

impl ChordTable {
    pub fn new(defs: &[ChordDef]) -> Result<Self, ConfigError> {
        let chords = defs
            .iter()
            .enumerate()
            .map(|(i, def)| Chord::from_def(i, def))
            .collect::<Result<Vec<_>, _>>()?;

        let participants = chords
            .iter()
            .flat_map(|c| c.keys().iter().copied())
            .collect();

        Ok(Self {
            chords,
            participants,
        })
    }

    pub fn get(&self, id: ChordId) -> Option<&Chord> {
        self.chords.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChordId, &Chord)> {
        self.chords.iter().enumerate().map(|(i, c)| (ChordId(i), c))
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    /// Whether `key` takes part in at least one chord.
    pub fn is_participant(&self, key: KeyCode) -> bool {
        self.participants.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::keys;

    #[test]
    fn test_valid_table() {
        let table = ChordTable::new(&[
            ChordDef::new(&[keys::F, keys::R], keys::TAB),
            ChordDef::new(&[keys::A, keys::S, keys::D], keys::W),
        ])
        .unwrap();

        assert_eq!(table.len(), 2);
        assert!(table.is_participant(keys::D));
        assert!(!table.is_participant(keys::Q));

        let chord = table.get(ChordId(1)).unwrap();
        assert_eq!(chord.keys(), &[keys::A, keys::S, keys::D]);
        assert_eq!(chord.action(), keys::W);
        assert!(chord.contains(keys::S));
        assert!(table.get(ChordId(2)).is_none());
    }

    #[test]
    fn test_rejects_single_key_chord() {
        let err = ChordTable::new(&[
            ChordDef::new(&[keys::F, keys::R], keys::TAB),
            ChordDef::new(&[keys::A], keys::Q),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::TooFewKeys {
                index: 1,
                count: 1,
                min: 2
            }
        );
    }

    #[test]
    fn test_rejects_six_key_chord() {
        let six = [keys::A, keys::S, keys::D, keys::F, keys::J, keys::K];
        let err = ChordTable::new(&[ChordDef::new(&six, keys::Q)]).unwrap_err();
        assert!(matches!(err, ConfigError::TooManyKeys { count: 6, .. }));
    }

    #[test]
    fn test_rejects_duplicate_participant() {
        let err = ChordTable::new(&[ChordDef::new(&[keys::A, keys::S, keys::A], keys::Q)])
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::DuplicateKey {
                index: 0,
                key: keys::A
            }
        );
    }

    #[test]
    fn test_identical_chords_are_accepted() {
        // Ambiguity is resolved by definition order, not rejected.
        let table = ChordTable::new(&[
            ChordDef::new(&[keys::A, keys::S], keys::Q),
            ChordDef::new(&[keys::S, keys::A], keys::W),
        ])
        .unwrap();
        assert_eq!(table.len(), 2);
    }
}
