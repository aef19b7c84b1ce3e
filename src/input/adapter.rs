//! Raw input to sequencer commands.
//!
//! | signal                        | command          |
//! |-------------------------------|------------------|
//! | click, button 0               | advance          |
//! | ArrowRight, ArrowUp, Space    | advance          |
//! | ArrowLeft, ArrowDown          | retreat          |
//! | Enter                         | toggle overlay   |
//!
//! Everything else is ignored.

use std::fmt;
use std::str::FromStr;

use crate::foundation::error::PanslideError;

/// Keys the presenter knows about, plus a catch-all for raw codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Left arrow (code 37).
    ArrowLeft,
    /// Up arrow (code 38).
    ArrowUp,
    /// Right arrow (code 39).
    ArrowRight,
    /// Down arrow (code 40).
    ArrowDown,
    /// Space bar (code 32).
    Space,
    /// Enter / Return (code 13).
    Enter,
    /// Any other key code.
    Other(u32),
}

impl Key {
    /// Key for a legacy DOM key code.
    pub fn from_code(code: u32) -> Self {
        match code {
            37 => Self::ArrowLeft,
            38 => Self::ArrowUp,
            39 => Self::ArrowRight,
            40 => Self::ArrowDown,
            32 => Self::Space,
            13 => Self::Enter,
            other => Self::Other(other),
        }
    }

    /// Legacy DOM key code.
    pub fn code(self) -> u32 {
        match self {
            Self::ArrowLeft => 37,
            Self::ArrowUp => 38,
            Self::ArrowRight => 39,
            Self::ArrowDown => 40,
            Self::Space => 32,
            Self::Enter => 13,
            Self::Other(code) => code,
        }
    }
}

/// A discrete input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Mouse click with the pressed button index.
    Click {
        /// 0 is the primary button.
        button: u8,
    },
    /// Key press.
    Key(Key),
}

impl FromStr for Signal {
    type Err = PanslideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.trim().to_ascii_lowercase().as_str() {
            "click" => return Ok(Self::Click { button: 0 }),
            "left" | "arrowleft" => Key::ArrowLeft,
            "up" | "arrowup" => Key::ArrowUp,
            "right" | "arrowright" => Key::ArrowRight,
            "down" | "arrowdown" => Key::ArrowDown,
            "space" => Key::Space,
            "enter" | "return" => Key::Enter,
            other => match other.parse::<u32>() {
                Ok(code) => Key::from_code(code),
                Err(_) => {
                    return Err(PanslideError::validation(format!("unknown input '{s}'")));
                }
            },
        };
        Ok(Self::Key(key))
    }
}

/// What the sequencer should do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Show the next slide.
    Advance,
    /// Undo the current slide.
    Retreat,
    /// Toggle the host overlay; not part of slide state.
    ToggleOverlay,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Advance => "advance",
            Self::Retreat => "retreat",
            Self::ToggleOverlay => "toggle-overlay",
        })
    }
}

/// Command for `signal`, `None` when it is ignored.
pub fn map_signal(signal: Signal) -> Option<Command> {
    match signal {
        Signal::Click { button: 0 } => Some(Command::Advance),
        Signal::Click { .. } => None,
        Signal::Key(Key::ArrowLeft | Key::ArrowDown) => Some(Command::Retreat),
        Signal::Key(Key::ArrowRight | Key::ArrowUp | Key::Space) => Some(Command::Advance),
        Signal::Key(Key::Enter) => Some(Command::ToggleOverlay),
        Signal::Key(Key::Other(_)) => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/input/adapter.rs"]
mod tests;
