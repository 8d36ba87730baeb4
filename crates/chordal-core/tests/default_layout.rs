use chordal_core::engine::Engine;
use chordal_core::keymap::keys;
use chordal_core::parser;
use chordal_core::{KeyAction, KeyAddr, KeyCode, KeyEvent, LayerMask, Millis};
use std::path::PathBuf;

const A: KeyAddr = KeyAddr::new(2, 1);
const S: KeyAddr = KeyAddr::new(2, 2);
const D: KeyAddr = KeyAddr::new(2, 3);
const F: KeyAddr = KeyAddr::new(2, 4);
const R: KeyAddr = KeyAddr::new(1, 4);

fn default_engine() -> Engine {
    let mut p = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    p.push("layout");
    p.push("default.chords");

    let config = parser::load_chords(&p).expect("load default.chords");
    Engine::new(config).expect("default.chords is valid")
}

fn run_and_collect(
    engine: &mut Engine,
    addr: KeyAddr,
    key: KeyCode,
    up: bool,
    t: Millis,
    out: &mut Vec<KeyEvent>,
) {
    match engine.process_key(addr, key, up, t) {
        KeyAction::Pass => out.push(if up {
            KeyEvent::up(addr, key, t)
        } else {
            KeyEvent::down(addr, key, t)
        }),
        KeyAction::Block => {}
        KeyAction::Inject(evs) => out.extend(evs),
    }
}

fn collect_down_keys(events: &[KeyEvent]) -> Vec<KeyCode> {
    events
        .iter()
        .filter(|e| e.is_down())
        .map(|e| e.key)
        .collect()
}

#[test]
fn default_layout_settings() {
    let engine = default_engine();
    let cfg = engine.config();
    assert_eq!(cfg.timeout_ms, 24);
    assert_eq!(cfg.queue_capacity, 10);
    assert_eq!(cfg.chords.len(), 5);
    assert!(cfg.disabled_layers.contains(1));
    assert!(cfg.disabled_layers.contains(3));
}

#[test]
fn roll_over_three_keys_then_tab() {
    let mut engine = default_engine();
    let mut all = Vec::new();

    // A+S+D held together, released in a different order.
    run_and_collect(&mut engine, A, keys::A, false, 0, &mut all);
    run_and_collect(&mut engine, S, keys::S, false, 6, &mut all);
    run_and_collect(&mut engine, D, keys::D, false, 11, &mut all);
    run_and_collect(&mut engine, D, keys::D, true, 60, &mut all);
    run_and_collect(&mut engine, A, keys::A, true, 62, &mut all);
    run_and_collect(&mut engine, S, keys::S, true, 65, &mut all);

    // F+R, with R first.
    run_and_collect(&mut engine, R, keys::R, false, 100, &mut all);
    run_and_collect(&mut engine, F, keys::F, false, 104, &mut all);
    run_and_collect(&mut engine, F, keys::F, true, 150, &mut all);
    run_and_collect(&mut engine, R, keys::R, true, 151, &mut all);

    assert_eq!(
        all,
        vec![
            KeyEvent::down(A, keys::W, 11),
            KeyEvent::up(A, keys::W, 60),
            KeyEvent::down(R, keys::TAB, 104),
            KeyEvent::up(R, keys::TAB, 150),
        ]
    );
}

#[test]
fn slow_typing_is_not_chorded() {
    let mut engine = default_engine();
    let mut all = Vec::new();

    run_and_collect(&mut engine, A, keys::A, false, 0, &mut all);
    all.extend(engine.tick(10));
    all.extend(engine.tick(30));
    run_and_collect(&mut engine, S, keys::S, false, 40, &mut all);
    run_and_collect(&mut engine, A, keys::A, true, 45, &mut all);
    run_and_collect(&mut engine, S, keys::S, true, 50, &mut all);

    assert_eq!(collect_down_keys(&all), vec![keys::A, keys::S]);
    assert_eq!(
        all,
        vec![
            KeyEvent::down(A, keys::A, 0),
            KeyEvent::up(A, keys::A, 45),
            // S stayed queued until its release.
            KeyEvent::down(S, keys::S, 40),
            KeyEvent::up(S, keys::S, 50),
        ]
    );
}

#[test]
fn numpad_layer_passes_keys_through() {
    let mut engine = default_engine();
    let mut all = Vec::new();

    engine.set_layer_oracle(LayerMask::from_layers(&[3]).expect("layer 3"));
    run_and_collect(&mut engine, F, keys::F, false, 0, &mut all);
    run_and_collect(&mut engine, R, keys::R, false, 2, &mut all);

    assert_eq!(collect_down_keys(&all), vec![keys::F, keys::R]);
    assert_eq!(engine.chord_engine().active_len(), 0);
}
