//! Question numbers

use core::fmt;

/// Largest value representable with four digits
pub const MAX_QUESTION_NUMBER: u16 = 9999;

/// A completed 4-digit entry
///
/// Values are conceptually in 1000..=9999; leading zeros ("0042") and
/// sentinel values are accepted here and left to the consumer's policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QuestionNumber(u16);

impl QuestionNumber {
    /// Create a question number, rejecting values above 9999
    pub const fn new(value: u16) -> Option<Self> {
        if value > MAX_QUESTION_NUMBER {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Parse four characters as a base-10 number
    ///
    /// Returns `None` if any character is not an ASCII digit.
    pub fn from_digits(digits: &[char; 4]) -> Option<Self> {
        let mut value: u16 = 0;
        for ch in digits {
            let d = ch.to_digit(10)?;
            value = value * 10 + d as u16;
        }
        Some(Self(value))
    }

    /// Numeric value
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for QuestionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
