//! Key code to digit mapping
//!
//! Only codes in the configured digit set ever become digits. Everything
//! else is rejected rather than mapped to a default digit.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum number of key code bindings
pub const MAX_BINDINGS: usize = 24;

/// Linux evdev codes for the top-row digit keys, `0` first
const TOP_ROW: [u16; 10] = [11, 2, 3, 4, 5, 6, 7, 8, 9, 10];

/// Linux evdev codes for the numeric keypad, `KP0` first
const NUMPAD: [u16; 10] = [82, 79, 80, 81, 75, 76, 77, 71, 72, 73];

/// Built-in keypad layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum KeypadLayout {
    /// Digit keys above the letters
    TopRow,
    /// Numeric keypad block
    Numpad,
    /// Either of the above
    #[default]
    Both,
}

/// Key map errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeymapError {
    /// Bound character is not an ASCII decimal digit
    NotADigit,
    /// No room for another binding
    Full,
}

/// Mapping from device key codes to digit characters
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyMap {
    bindings: Vec<(u16, char), MAX_BINDINGS>,
}

impl KeyMap {
    /// Create an empty key map (rejects every code)
    pub const fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Create a key map for one of the built-in layouts
    pub fn for_layout(layout: KeypadLayout) -> Self {
        let mut map = Self::new();
        if matches!(layout, KeypadLayout::TopRow | KeypadLayout::Both) {
            map.bind_block(&TOP_ROW);
        }
        if matches!(layout, KeypadLayout::Numpad | KeypadLayout::Both) {
            map.bind_block(&NUMPAD);
        }
        map
    }

    fn bind_block(&mut self, codes: &[u16; 10]) {
        for (digit, &code) in codes.iter().enumerate() {
            // 20 built-in bindings always fit
            let _ = self.bind(code, (b'0' + digit as u8) as char);
        }
    }

    /// Bind a key code to a digit, replacing any previous binding for it
    pub fn bind(&mut self, code: u16, digit: char) -> Result<(), KeymapError> {
        if !digit.is_ascii_digit() {
            return Err(KeymapError::NotADigit);
        }

        if let Some(slot) = self.bindings.iter_mut().find(|(c, _)| *c == code) {
            slot.1 = digit;
            return Ok(());
        }

        self.bindings
            .push((code, digit))
            .map_err(|_| KeymapError::Full)
    }

    /// Look up the digit for a key code
    pub fn digit_for(&self, code: u16) -> Option<char> {
        self.bindings
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, d)| *d)
    }

    /// Check whether a key code is in the digit set
    pub fn is_digit_key(&self, code: u16) -> bool {
        self.digit_for(code).is_some()
    }

    /// Number of bound codes
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True when no codes are bound
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_row_layout() {
        let map = KeyMap::for_layout(KeypadLayout::TopRow);
        assert_eq!(map.digit_for(2), Some('1'));
        assert_eq!(map.digit_for(10), Some('9'));
        assert_eq!(map.digit_for(11), Some('0'));
        assert_eq!(map.digit_for(82), None);
    }

    #[test]
    fn test_numpad_layout() {
        let map = KeyMap::for_layout(KeypadLayout::Numpad);
        assert_eq!(map.digit_for(82), Some('0'));
        assert_eq!(map.digit_for(79), Some('1'));
        assert_eq!(map.digit_for(73), Some('9'));
        assert_eq!(map.digit_for(2), None);
    }

    #[test]
    fn test_both_layout() {
        let map = KeyMap::for_layout(KeypadLayout::Both);
        assert_eq!(map.len(), 20);
        assert_eq!(map.digit_for(5), Some('4'));
        assert_eq!(map.digit_for(75), Some('4'));
    }

    #[test]
    fn test_unknown_codes_rejected() {
        let map = KeyMap::for_layout(KeypadLayout::Both);
        // KEY_Q, KEY_ENTER, KEY_KPDOT
        for code in [16, 28, 83] {
            assert!(!map.is_digit_key(code));
            assert_eq!(map.digit_for(code), None);
        }
    }

    #[test]
    fn test_bind_replaces_existing() {
        let mut map = KeyMap::for_layout(KeypadLayout::TopRow);
        map.bind(2, '7').unwrap();
        assert_eq!(map.digit_for(2), Some('7'));
        assert_eq!(map.len(), 10);
    }

    #[test]
    fn test_bind_rejects_non_digit() {
        let mut map = KeyMap::new();
        assert_eq!(map.bind(30, 'a'), Err(KeymapError::NotADigit));
        assert!(map.is_empty());
    }

    #[test]
    fn test_bind_full() {
        let mut map = KeyMap::new();
        for code in 0..MAX_BINDINGS as u16 {
            map.bind(code, '1').unwrap();
        }
        assert_eq!(map.bind(1000, '1'), Err(KeymapError::Full));
    }
}
