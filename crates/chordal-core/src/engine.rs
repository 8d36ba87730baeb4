use crate::chord_engine::ChordEngine;
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::layers::{LayerMask, LayerOracle};
use crate::timings::{KeyTimings, TimingSample};
use crate::types::{KeyAction, KeyAddr, KeyCode, KeyEvent, Millis};
use tracing::{debug, info};

/// Host-facing wrapper around [`ChordEngine`]: one call per raw key event,
/// answered with what the host should do with it.
pub struct Engine {
    chord_engine: ChordEngine,
    config: EngineConfig,
    enabled: bool,
    layers: Box<dyn LayerOracle + Send>,
    timings: KeyTimings,
    last_timing: Option<TimingSample>,
    on_enabled_change: Option<Box<dyn Fn(bool) + Send + Sync>>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let chord_engine = ChordEngine::new(&config)?;
        info!(
            "Engine: {} chords loaded, timeout {}ms",
            chord_engine.table().len(),
            chord_engine.timeout_ms()
        );
        Ok(Self {
            chord_engine,
            config,
            enabled: true,
            layers: Box::new(LayerMask::EMPTY),
            timings: KeyTimings::default(),
            last_timing: None,
            on_enabled_change: None,
        })
    }

    /// Turns chording on or off. Turning it off resolves whatever is in
    /// flight; the returned events must be sent by the host.
    pub fn set_enabled(&mut self, enabled: bool, now: Millis) -> Vec<KeyEvent> {
        let mut out = Vec::new();
        if self.enabled != enabled {
            self.enabled = enabled;
            if !enabled {
                // Releases pass the engine by while it is off.
                self.chord_engine.flush(now, &mut out);
                self.chord_engine.reset();
            }
            if let Some(ref cb) = self.on_enabled_change {
                cb(enabled);
            }
        }
        out
    }

    pub fn set_on_enabled_change(&mut self, cb: impl Fn(bool) + Send + Sync + 'static) {
        self.on_enabled_change = Some(Box::new(cb));
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_layer_oracle(&mut self, layers: impl LayerOracle + Send + 'static) {
        self.layers = Box::new(layers);
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Swaps in a new configuration. The old engine is flushed only once the
    /// new one has been validated; on error nothing changes.
    pub fn load_config(
        &mut self,
        config: EngineConfig,
        now: Millis,
    ) -> Result<Vec<KeyEvent>, ConfigError> {
        let next = ChordEngine::new(&config)?;

        let mut out = Vec::new();
        self.chord_engine.flush(now, &mut out);
        self.chord_engine = next;
        self.config = config;

        info!(
            "Engine: configuration reloaded with {} chords",
            self.chord_engine.table().len()
        );
        Ok(out)
    }

    pub fn timings_mut(&mut self) -> &mut KeyTimings {
        &mut self.timings
    }

    /// Latest sample recorded while timing is tracked.
    pub fn last_timing(&self) -> Option<TimingSample> {
        self.last_timing
    }

    pub fn chord_engine(&self) -> &ChordEngine {
        &self.chord_engine
    }

    pub fn process_key(&mut self, addr: KeyAddr, key: KeyCode, up: bool, now: Millis) -> KeyAction {
        if !self.enabled {
            return KeyAction::Pass;
        }

        let event = if up {
            KeyEvent::up(addr, key, now)
        } else {
            KeyEvent::down(addr, key, now)
        };
        if let Some(sample) = self.timings.observe(&event) {
            self.last_timing = Some(sample);
        }

        let mut out = Vec::new();
        self.chord_engine
            .on_key_event(event, self.layers.as_ref(), &mut out);

        if out.is_empty() {
            return KeyAction::Block;
        }
        if out.len() == 1 && out[0] == event {
            return KeyAction::Pass;
        }
        debug!("Injecting {} events for {}", out.len(), key);
        KeyAction::Inject(out)
    }

    /// Scan-cycle hook; returns presses released by the timeout.
    pub fn tick(&mut self, now: Millis) -> Vec<KeyEvent> {
        let mut out = Vec::new();
        if self.enabled {
            self.chord_engine.on_tick(now, &mut out);
        }
        out
    }
}
