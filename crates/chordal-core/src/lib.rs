pub mod active;
pub mod chord_engine;
pub mod chord_table;
pub mod config;
pub mod engine;
pub mod error;
pub mod keymap;
pub mod layers;
pub mod matcher;
pub mod parser;
pub mod pending;
pub mod sink;
pub mod timings;
pub mod types;

pub use chord_engine::ChordEngine;
pub use chord_table::{ChordDef, ChordId, ChordTable};
pub use config::EngineConfig;
pub use engine::Engine;
pub use error::ConfigError;
pub use layers::{LayerMask, LayerOracle};
pub use sink::EventSink;
pub use types::{KeyAction, KeyAddr, KeyCode, KeyEdge, KeyEvent, Millis};
