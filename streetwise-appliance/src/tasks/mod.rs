//! Appliance tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod audio;
pub mod controller;
pub mod keypad;

pub use audio::{run_audio, AudioError, AudioSource};
pub use controller::run_controller;
pub use keypad::{run_keypad, KeySource, KeypadError, RawKeyEvent};

use streetwise_core::traits::DisplayError;

/// A resource could not be acquired at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartupError {
    /// Display did not initialize
    Display(DisplayError),
    /// Keyboard device could not be opened
    Keypad(KeypadError),
}

impl From<DisplayError> for StartupError {
    fn from(e: DisplayError) -> Self {
        StartupError::Display(e)
    }
}

impl From<KeypadError> for StartupError {
    fn from(e: KeypadError) -> Self {
        StartupError::Keypad(e)
    }
}
