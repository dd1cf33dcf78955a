//! Board-agnostic core logic for the StreetWise question appliance
//!
//! This crate contains all appliance logic that does not depend on
//! specific hardware or an async runtime:
//!
//! - Keypad event filtering and the inactivity-timeout pipeline
//! - The 4-digit entry buffer and question numbers
//! - Appliance phase state machine
//! - Display frames and the single-owner display controller
//! - Oscilloscope sampling and the progress spinner
//! - Configuration type definitions
//!
//! All timing is expressed as explicit millisecond timestamps so that the
//! owner (an async task on the device, or a test) decides what "now" is.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod display;
pub mod entry;
pub mod keypad;
pub mod progress;
pub mod scope;
pub mod state;
pub mod timer;
pub mod traits;

pub use controller::{Appliance, Notice, Subscriptions};
pub use entry::{DigitBuffer, QuestionNumber};
pub use keypad::{KeyEvent, KeyMap, KeypressPipeline};
pub use state::{Event, Phase};
