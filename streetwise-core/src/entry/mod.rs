//! Digit entry
//!
//! Accumulates accepted digits into a 4-digit question number.

pub mod buffer;
pub mod number;

pub use buffer::{DigitBuffer, PushOutcome, ENTRY_DIGITS, PLACEHOLDER};
pub use number::QuestionNumber;
