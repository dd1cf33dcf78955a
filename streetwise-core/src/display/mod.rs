//! Display frames and the display controller
//!
//! Exactly one frame kind is shown at a time; rendering a frame replaces
//! whatever was on the panel before.

pub mod controller;
pub mod frame;

pub use controller::{DisplayController, PROGRESS_ARC};
pub use frame::{DisplayFrame, FrameKind, Waveform, MAX_WAVEFORM_POINTS};
