use crate::chord_table::ChordDef;
use crate::config::EngineConfig;
use crate::keymap::key_name_to_code;
use crate::layers::LayerMask;
use crate::pending::OverflowPolicy;
use crate::types::KeyCode;
use anyhow::{anyhow, bail, Context, Result};
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, warn};

pub fn load_chords<P: AsRef<Path>>(path: P) -> Result<EngineConfig> {
    let path = path.as_ref();
    let raw = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let text = decode_chord_bytes(&raw);
    parse_chords_content(text.as_ref()).with_context(|| format!("parsing {}", path.display()))
}

fn decode_chord_bytes(raw: &[u8]) -> Cow<'_, str> {
    // 1. Check BOM
    if let Some((enc, bom_len)) = encoding_rs::Encoding::for_bom(raw) {
        debug!("Decoded using BOM: {}", enc.name());
        let (cow, _, had_errors) = enc.decode(&raw[bom_len..]);
        if had_errors {
            warn!("Decode had errors (replacement characters used)");
        }
        return cow;
    }

    // 2. Try UTF-8
    match std::str::from_utf8(raw) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => {
            // 3. Key names are ASCII; anything else only shows up in comments.
            warn!("UTF-8 decode failed, falling back to windows-1252");
            let (cow, _, _) = encoding_rs::WINDOWS_1252.decode(raw);
            cow
        }
    }
}

/// Parses a chord file:
///
/// ```text
/// # comment
/// timeout = 24
/// queue = 10
/// overflow = evict-oldest
/// disable_layers = 1, 3
/// F + R = Tab
/// A + S + D = W
/// ```
///
/// The result is validated before it is returned.
pub fn parse_chords_content(content: &str) -> Result<EngineConfig> {
    let mut config = EngineConfig::default();

    for (idx, raw_line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let (lhs, rhs) = line
            .split_once('=')
            .ok_or_else(|| anyhow!("line {}: expected '=' in \"{}\"", line_no, line))?;
        let (lhs, rhs) = (lhs.trim(), rhs.trim());

        match lhs.to_ascii_lowercase().as_str() {
            "timeout" => {
                config.timeout_ms = rhs
                    .parse()
                    .with_context(|| format!("line {}: invalid timeout \"{}\"", line_no, rhs))?;
            }
            "queue" => {
                config.queue_capacity = rhs
                    .parse()
                    .with_context(|| format!("line {}: invalid queue size \"{}\"", line_no, rhs))?;
            }
            "overflow" => {
                config.overflow = match rhs {
                    "evict-oldest" => OverflowPolicy::EvictOldest,
                    "drop-newest" => OverflowPolicy::DropNewest,
                    other => bail!("line {}: unknown overflow policy \"{}\"", line_no, other),
                };
            }
            "disable_layers" => {
                config.disabled_layers = parse_layers(rhs)
                    .with_context(|| format!("line {}: invalid layer list", line_no))?;
            }
            _ => {
                let keys = lhs
                    .split('+')
                    .map(|name| parse_key(name, line_no))
                    .collect::<Result<Vec<_>>>()?;
                let action = parse_key(rhs, line_no)?;
                config.chords.push(ChordDef { keys, action });
            }
        }
    }

    config.validate()?;
    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    match line.find(&['#', ';'][..]) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_key(name: &str, line_no: usize) -> Result<KeyCode> {
    let name = name.trim();
    if name.is_empty() {
        bail!("line {}: empty key name", line_no);
    }
    key_name_to_code(name).ok_or_else(|| anyhow!("line {}: unknown key \"{}\"", line_no, name))
}

fn parse_layers(list: &str) -> Result<LayerMask> {
    let layers = list
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<u8>().with_context(|| format!("\"{}\"", s)))
        .collect::<Result<Vec<_>>>()?;
    Ok(LayerMask::from_layers(&layers)?)
}
