//! OLED rendering for the StreetWise appliance
//!
//! This crate provides:
//! - `FrameBuffer`, a 128x64 1-bpp page buffer usable as an
//!   `embedded-graphics` draw target
//! - `Panel` trait for the physical transfer of a finished frame
//! - `Ssd1306`, a `Panel` for SSD1306 controllers on a 4-wire SPI bus
//! - `OledDisplay`, the `DisplayDriver` implementation used by the
//!   appliance controller
//!
//! # Architecture
//!
//! All drawing happens in the frame buffer. Nothing reaches the glass until
//! `DisplayDriver::flush` hands the whole frame to the panel, so a frame is
//! never shown half drawn.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod framebuffer;
pub mod oled;
pub mod panel;
pub mod ssd1306;

pub use framebuffer::{FrameBuffer, HEIGHT, PAGES, WIDTH};
pub use oled::OledDisplay;
pub use panel::Panel;
pub use ssd1306::Ssd1306;
