//! Keypad input
//!
//! Turns raw key transitions from the keypad device into accepted digit
//! characters.

pub mod event;
pub mod keymap;
pub mod pipeline;

pub use event::{KeyEvent, EV_KEY};
pub use keymap::{KeyMap, KeymapError, KeypadLayout, MAX_BINDINGS};
pub use pipeline::{KeypressPipeline, PipelineState};
