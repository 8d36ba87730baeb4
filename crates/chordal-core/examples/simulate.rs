use chordal_core::keymap::keys;
use chordal_core::{parser, ChordEngine, KeyAddr, KeyEvent, LayerMask, Millis};
use crossbeam_channel::unbounded;
use std::thread;

const CHORDS: &str = "
timeout = 24
F + R = Tab
A + S = Q
A + S + D = W
";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = parser::parse_chords_content(CHORDS)?;
    let mut engine = ChordEngine::new(&config)?;

    // Downstream consumer: stands in for the USB report writer.
    let (mut tx, rx) = unbounded::<KeyEvent>();
    let printer = thread::spawn(move || {
        for ev in rx {
            println!("{:>4}ms  {:?} {} at {}", ev.t, ev.edge, ev.key, ev.addr);
        }
    });

    let f = KeyAddr::new(2, 4);
    let r = KeyAddr::new(1, 4);
    let a = KeyAddr::new(2, 1);
    let s = KeyAddr::new(2, 2);
    let z = KeyAddr::new(3, 1);

    let script = [
        KeyEvent::down(f, keys::F, 0),
        KeyEvent::down(r, keys::R, 10),
        KeyEvent::up(f, keys::F, 50),
        KeyEvent::up(r, keys::R, 60),
        KeyEvent::down(a, keys::A, 100),
        KeyEvent::down(s, keys::S, 104),
        KeyEvent::up(s, keys::S, 180),
        KeyEvent::up(a, keys::A, 185),
        KeyEvent::down(a, keys::A, 200),
        KeyEvent::down(z, keys::Z, 205),
        KeyEvent::up(a, keys::A, 230),
        KeyEvent::up(z, keys::Z, 240),
    ];

    let mut now: Millis = 0;
    for ev in script {
        // One tick per millisecond of scan time.
        while now < ev.t {
            now += 1;
            engine.on_tick(now, &mut tx);
        }
        engine.on_key_event(ev, &LayerMask::EMPTY, &mut tx);
    }
    engine.flush(now, &mut tx);

    drop(tx);
    let _ = printer.join();
    Ok(())
}
