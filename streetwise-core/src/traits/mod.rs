//! Hardware abstraction traits
//!
//! These traits define the interface between the appliance logic
//! and hardware-specific implementations.

pub mod display;

pub use display::{ArcSpec, DisplayDriver, DisplayError, Point};
