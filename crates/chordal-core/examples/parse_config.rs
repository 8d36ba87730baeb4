use chordal_core::parser;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("layout/default.chords"));
    println!("Loading {:?}", path);

    let config = parser::load_chords(&path)?;
    let table = config.validate()?;
    println!("Loaded chord file successfully.");
    println!("Timeout: {}ms", config.timeout_ms);
    println!("Queue: {} ({:?})", config.queue_capacity, config.overflow);
    println!(
        "Disabled layers: {:?}",
        config.disabled_layers.iter().collect::<Vec<_>>()
    );

    for (id, chord) in table.iter() {
        let names: Vec<String> = chord.keys().iter().map(|k| k.to_string()).collect();
        println!("  Chord {}: {} -> {}", id.0, names.join(" + "), chord.action());
    }

    Ok(())
}
