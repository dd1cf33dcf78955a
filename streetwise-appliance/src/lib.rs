//! StreetWise appliance runtime
//!
//! Runs the board-agnostic [`streetwise_core::Appliance`] as a single-owner
//! actor on `embassy`. Producers never touch appliance state directly:
//!
//! ```text
//!  KeySource ──► run_keypad ──► key channel ─────┐
//!                                               ▼
//!  ApplianceHandle ──► command channel ──► run_controller ──► DisplayDriver
//!                                               ▲    │
//!  AudioSource ──► run_audio ──► latest frame ──┘    └──► question numbers
//! ```
//!
//! The crate does not pick an executor. The device binary spawns the three
//! futures as tasks; host tests join them under `block_on`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// Must come first so the logging macros are visible to every module
mod fmt;

pub mod channels;
pub mod config;
pub mod handle;
pub mod tasks;

pub use channels::{ApplianceChannels, Command, NumberSubscriber};
pub use config::{load_config, parse_config, ConfigError};
pub use handle::{ApplianceHandle, ControlError};
pub use tasks::{
    run_audio, run_controller, run_keypad, AudioError, AudioSource, KeySource, KeypadError,
    RawKeyEvent, StartupError,
};

#[cfg(test)]
mod testing;
