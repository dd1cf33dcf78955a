//! Configuration types
//!
//! Board-agnostic appliance settings. Defaults reproduce the timings of the
//! deployed appliance.

pub mod types;

pub use types::*;
