use crate::chord_table::{ChordDef, ChordTable};
use crate::error::ConfigError;
use crate::layers::LayerMask;
use crate::pending::OverflowPolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    #[serde(default)]
    pub chords: Vec<ChordDef>,
    /// How long a press may wait for the rest of its chord. 0 waits forever.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Chording is off while any of these layers is active.
    #[serde(default)]
    pub disabled_layers: LayerMask,
    #[serde(default)]
    pub overflow: OverflowPolicy,
}

fn default_timeout_ms() -> u64 {
    1000
}

fn default_queue_capacity() -> usize {
    10
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chords: Vec::new(),
            timeout_ms: default_timeout_ms(),
            queue_capacity: default_queue_capacity(),
            disabled_layers: LayerMask::EMPTY,
            overflow: OverflowPolicy::EvictOldest,
        }
    }
}

impl EngineConfig {
    pub fn with_chords(chords: Vec<ChordDef>) -> Self {
        Self {
            chords,
            ..Self::default()
        }
    }

    /// Builds the chord table, rejecting anything the engine cannot run with.
    pub fn validate(&self) -> Result<ChordTable, ConfigError> {
        if self.queue_capacity == 0 {
            return Err(ConfigError::ZeroQueueCapacity);
        }
        ChordTable::new(&self.chords)
    }
}
