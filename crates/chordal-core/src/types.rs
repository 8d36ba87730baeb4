use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonic host clock in milliseconds.
pub type Millis = u64;

/// HID usage code identifying what a key means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub const fn new(code: u16) -> Self {
        Self(code)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match crate::keymap::code_to_key_name(*self) {
            Some(name) => f.write_str(name),
            None => write!(f, "0x{:02X}", self.0),
        }
    }
}

/// Row and Column of the switch in the key matrix.
///
/// Events are keyed by where they happened, not by what they mean, so a
/// synthetic chord event borrows the address of one of its participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyAddr {
    pub row: u8,
    pub col: u8,
}

impl KeyAddr {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for KeyAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEdge {
    Down,
    Up,
}

/// A single key transition, both as received and as forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub addr: KeyAddr,
    pub key: KeyCode,
    pub edge: KeyEdge,
    pub t: Millis,
}

impl KeyEvent {
    pub const fn down(addr: KeyAddr, key: KeyCode, t: Millis) -> Self {
        Self {
            addr,
            key,
            edge: KeyEdge::Down,
            t,
        }
    }

    pub const fn up(addr: KeyAddr, key: KeyCode, t: Millis) -> Self {
        Self {
            addr,
            key,
            edge: KeyEdge::Up,
            t,
        }
    }

    pub fn is_down(&self) -> bool {
        self.edge == KeyEdge::Down
    }
}

/// Action to be taken by the host for the event it just handed over.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyAction {
    /// Forward the original event unchanged.
    Pass,
    /// Swallow the original event.
    Block,
    /// Swallow the original event and send these instead, in order.
    Inject(Vec<KeyEvent>),
}
