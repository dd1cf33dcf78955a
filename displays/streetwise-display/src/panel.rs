//! Physical panel abstraction

use streetwise_core::traits::DisplayError;

use crate::framebuffer::FrameBuffer;

/// A monochrome panel that accepts whole frames
pub trait Panel {
    /// Reset and configure the controller, leaving the panel on and blank
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Transfer a complete frame
    fn write_frame(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError>;
}
