use crate::types::KeyCode;

/// HID keyboard usage codes with their chord-file names.
/// The first name listed for a code is the canonical one used for display.
pub const KEY_NAMES: &[(KeyCode, &str)] = &[
    // Letters
    (KeyCode::new(0x04), "A"),
    (KeyCode::new(0x05), "B"),
    (KeyCode::new(0x06), "C"),
    (KeyCode::new(0x07), "D"),
    (KeyCode::new(0x08), "E"),
    (KeyCode::new(0x09), "F"),
    (KeyCode::new(0x0A), "G"),
    (KeyCode::new(0x0B), "H"),
    (KeyCode::new(0x0C), "I"),
    (KeyCode::new(0x0D), "J"),
    (KeyCode::new(0x0E), "K"),
    (KeyCode::new(0x0F), "L"),
    (KeyCode::new(0x10), "M"),
    (KeyCode::new(0x11), "N"),
    (KeyCode::new(0x12), "O"),
    (KeyCode::new(0x13), "P"),
    (KeyCode::new(0x14), "Q"),
    (KeyCode::new(0x15), "R"),
    (KeyCode::new(0x16), "S"),
    (KeyCode::new(0x17), "T"),
    (KeyCode::new(0x18), "U"),
    (KeyCode::new(0x19), "V"),
    (KeyCode::new(0x1A), "W"),
    (KeyCode::new(0x1B), "X"),
    (KeyCode::new(0x1C), "Y"),
    (KeyCode::new(0x1D), "Z"),
    // Number row
    (KeyCode::new(0x1E), "1"),
    (KeyCode::new(0x1F), "2"),
    (KeyCode::new(0x20), "3"),
    (KeyCode::new(0x21), "4"),
    (KeyCode::new(0x22), "5"),
    (KeyCode::new(0x23), "6"),
    (KeyCode::new(0x24), "7"),
    (KeyCode::new(0x25), "8"),
    (KeyCode::new(0x26), "9"),
    (KeyCode::new(0x27), "0"),
    // Editing and punctuation
    (KeyCode::new(0x28), "Enter"),
    (KeyCode::new(0x28), "Return"),
    (KeyCode::new(0x29), "Escape"),
    (KeyCode::new(0x29), "Esc"),
    (KeyCode::new(0x2A), "Backspace"),
    (KeyCode::new(0x2B), "Tab"),
    (KeyCode::new(0x2C), "Space"),
    (KeyCode::new(0x2D), "Minus"),
    (KeyCode::new(0x2E), "Equals"),
    (KeyCode::new(0x2F), "LeftBracket"),
    (KeyCode::new(0x30), "RightBracket"),
    (KeyCode::new(0x31), "Backslash"),
    (KeyCode::new(0x33), "Semicolon"),
    (KeyCode::new(0x34), "Quote"),
    (KeyCode::new(0x35), "Backtick"),
    (KeyCode::new(0x36), "Comma"),
    (KeyCode::new(0x37), "Period"),
    (KeyCode::new(0x38), "Slash"),
    (KeyCode::new(0x39), "CapsLock"),
    // Function row
    (KeyCode::new(0x3A), "F1"),
    (KeyCode::new(0x3B), "F2"),
    (KeyCode::new(0x3C), "F3"),
    (KeyCode::new(0x3D), "F4"),
    (KeyCode::new(0x3E), "F5"),
    (KeyCode::new(0x3F), "F6"),
    (KeyCode::new(0x40), "F7"),
    (KeyCode::new(0x41), "F8"),
    (KeyCode::new(0x42), "F9"),
    (KeyCode::new(0x43), "F10"),
    (KeyCode::new(0x44), "F11"),
    (KeyCode::new(0x45), "F12"),
    // Navigation
    (KeyCode::new(0x49), "Insert"),
    (KeyCode::new(0x4A), "Home"),
    (KeyCode::new(0x4B), "PageUp"),
    (KeyCode::new(0x4C), "Delete"),
    (KeyCode::new(0x4D), "End"),
    (KeyCode::new(0x4E), "PageDown"),
    (KeyCode::new(0x4F), "RightArrow"),
    (KeyCode::new(0x50), "LeftArrow"),
    (KeyCode::new(0x51), "DownArrow"),
    (KeyCode::new(0x52), "UpArrow"),
    // Modifiers
    (KeyCode::new(0xE0), "LeftControl"),
    (KeyCode::new(0xE1), "LeftShift"),
    (KeyCode::new(0xE2), "LeftAlt"),
    (KeyCode::new(0xE3), "LeftGui"),
    (KeyCode::new(0xE4), "RightControl"),
    (KeyCode::new(0xE5), "RightShift"),
    (KeyCode::new(0xE6), "RightAlt"),
    (KeyCode::new(0xE7), "RightGui"),
];

/// Frequently used codes, handy for building chord tables in code.
pub mod keys {
    use crate::types::KeyCode;

    pub const A: KeyCode = KeyCode::new(0x04);
    pub const C: KeyCode = KeyCode::new(0x06);
    pub const D: KeyCode = KeyCode::new(0x07);
    pub const F: KeyCode = KeyCode::new(0x09);
    pub const J: KeyCode = KeyCode::new(0x0D);
    pub const K: KeyCode = KeyCode::new(0x0E);
    pub const M: KeyCode = KeyCode::new(0x10);
    pub const Q: KeyCode = KeyCode::new(0x14);
    pub const R: KeyCode = KeyCode::new(0x15);
    pub const S: KeyCode = KeyCode::new(0x16);
    pub const V: KeyCode = KeyCode::new(0x19);
    pub const W: KeyCode = KeyCode::new(0x1A);
    pub const X: KeyCode = KeyCode::new(0x1B);
    pub const Z: KeyCode = KeyCode::new(0x1D);
    pub const ENTER: KeyCode = KeyCode::new(0x28);
    pub const ESCAPE: KeyCode = KeyCode::new(0x29);
    pub const TAB: KeyCode = KeyCode::new(0x2B);
    pub const SPACE: KeyCode = KeyCode::new(0x2C);
    pub const MINUS: KeyCode = KeyCode::new(0x2D);
    pub const LEFT_CONTROL: KeyCode = KeyCode::new(0xE0);
    pub const LEFT_SHIFT: KeyCode = KeyCode::new(0xE1);
    pub const LEFT_ALT: KeyCode = KeyCode::new(0xE2);
    pub const LEFT_GUI: KeyCode = KeyCode::new(0xE3);
}

pub fn code_to_key_name(code: KeyCode) -> Option<&'static str> {
    KEY_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Looks up a key by name (case-insensitive) or by `0x..` usage literal.
pub fn key_name_to_code(name: &str) -> Option<KeyCode> {
    let name = name.trim();
    if let Some(hex) = name
        .strip_prefix("0x")
        .or_else(|| name.strip_prefix("0X"))
    {
        return u16::from_str_radix(hex, 16).ok().map(KeyCode::new);
    }

    KEY_NAMES
        .iter()
        .find(|(_, n)| n.eq_ignore_ascii_case(name))
        .map(|(code, _)| *code)
}
