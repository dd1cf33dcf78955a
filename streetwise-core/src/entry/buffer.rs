//! Fixed-size digit accumulator
//!
//! Four slots, each a character or the placeholder, plus the index of the
//! last filled slot (-1 when empty). A fifth digit does not get dropped:
//! the buffer is cleared and the digit becomes the first of a new entry.

use heapless::String;

use super::number::QuestionNumber;

/// Number of digits in an entry
pub const ENTRY_DIGITS: usize = 4;

/// Character shown for an unset slot
pub const PLACEHOLDER: char = '_';

/// Result of pushing a digit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PushOutcome {
    /// Stored; more digits needed
    Stored,
    /// Stored in the last slot; the entry is complete
    Completed,
    /// Buffer was already full; cleared and restarted with this digit
    Restarted,
}

/// Digit entry buffer
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitBuffer {
    slots: [Option<char>; ENTRY_DIGITS],
    position: i8,
}

impl Default for DigitBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DigitBuffer {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self {
            slots: [None; ENTRY_DIGITS],
            position: -1,
        }
    }

    /// Index of the last filled slot, -1 when empty
    pub fn position(&self) -> i8 {
        self.position
    }

    /// Number of filled slots
    pub fn len(&self) -> usize {
        (self.position + 1) as usize
    }

    /// True when no slot is filled
    pub fn is_empty(&self) -> bool {
        self.position < 0
    }

    /// True when every slot is filled
    pub fn is_full(&self) -> bool {
        self.position >= ENTRY_DIGITS as i8 - 1
    }

    /// Reset every slot to the placeholder
    pub fn clear(&mut self) {
        self.slots = [None; ENTRY_DIGITS];
        self.position = -1;
    }

    /// Store a digit in the next slot
    pub fn push(&mut self, digit: char) -> PushOutcome {
        let restarted = if self.is_full() {
            self.clear();
            true
        } else {
            false
        };

        self.position += 1;
        self.slots[self.position as usize] = Some(digit);

        if restarted {
            PushOutcome::Restarted
        } else if self.is_full() {
            PushOutcome::Completed
        } else {
            PushOutcome::Stored
        }
    }

    /// Slot contents with placeholders for unset slots
    pub fn chars(&self) -> [char; ENTRY_DIGITS] {
        self.slots.map(|slot| slot.unwrap_or(PLACEHOLDER))
    }

    /// Render the buffer as display text, e.g. `"12__"`
    pub fn text(&self) -> String<ENTRY_DIGITS> {
        let mut text = String::new();
        for ch in self.chars() {
            // Non-ASCII digits can overflow the byte capacity; show the placeholder
            if text.push(ch).is_err() {
                let _ = text.push(PLACEHOLDER);
            }
        }
        text
    }

    /// Parse the four slots as a question number
    ///
    /// `None` unless the buffer is full and every slot holds a digit.
    pub fn parse(&self) -> Option<QuestionNumber> {
        if !self.is_full() {
            return None;
        }
        QuestionNumber::from_digits(&self.chars())
    }
}
