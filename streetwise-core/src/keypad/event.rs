//! Key transition events from the keypad device

/// Linux input event type for key and button transitions
pub const EV_KEY: u16 = 0x01;

/// Raw `value` field of a key release
const VALUE_RELEASE: i32 = 0;
/// Raw `value` field of a key press
const VALUE_PRESS: i32 = 1;
/// Raw `value` field of an auto-repeat
const VALUE_REPEAT: i32 = 2;

/// A single key transition
///
/// Ephemeral: produced by the keypad source, consumed once by the
/// keypress pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    /// Device key code
    pub code: u16,
    /// True when the key went up
    pub is_release: bool,
}

impl KeyEvent {
    /// A key release
    pub const fn release(code: u16) -> Self {
        Self {
            code,
            is_release: true,
        }
    }

    /// A key press
    pub const fn press(code: u16) -> Self {
        Self {
            code,
            is_release: false,
        }
    }

    /// Decode a raw input event (`type`, `code`, `value`)
    ///
    /// Returns `None` for anything that is not a key transition
    /// (sync reports, relative axes, LEDs, ...) and for unknown values.
    /// Auto-repeat is reported as a press.
    pub fn from_raw(ev_type: u16, code: u16, value: i32) -> Option<Self> {
        if ev_type != EV_KEY {
            return None;
        }

        match value {
            VALUE_RELEASE => Some(Self::release(code)),
            VALUE_PRESS | VALUE_REPEAT => Some(Self::press(code)),
            _ => None,
        }
    }
}
