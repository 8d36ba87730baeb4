//! Error types for chord configuration

use crate::types::KeyCode;
use thiserror::Error;

/// A configuration the engine refuses to start with.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("chord #{index} has {count} keys, at least {min} are required")]
    TooFewKeys {
        index: usize,
        count: usize,
        min: usize,
    },

    #[error("chord #{index} has {count} keys, at most {max} are supported")]
    TooManyKeys {
        index: usize,
        count: usize,
        max: usize,
    },

    #[error("chord #{index} lists {key} more than once")]
    DuplicateKey { index: usize, key: KeyCode },

    #[error("pending queue capacity must be at least 1")]
    ZeroQueueCapacity,

    #[error("layer {0} is out of range (0..32)")]
    LayerOutOfRange(u8),
}
