//! Display driver trait for the appliance OLED

/// Errors that can occur with the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Display did not respond during initialization
    NotResponding,
    /// Bus error while sending a frame
    Communication,
    /// Drawing outside the frame buffer
    OutOfBounds,
}

/// A pixel coordinate, origin top-left, y pointing down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An arc inscribed in a square bounding box
///
/// Angles are in degrees, zero at three o'clock, positive
/// counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ArcSpec {
    /// Top-left corner of the bounding box
    pub top_left: Point,
    /// Bounding box edge length in pixels
    pub diameter: u32,
    /// Start angle
    pub start_deg: i32,
    /// Angular extent from the start angle
    pub sweep_deg: i32,
    /// Stroke width in pixels
    pub stroke_width: u32,
}

/// Trait for the monochrome display
///
/// Drawing calls compose into an off-screen frame; nothing is visible until
/// [`flush`](DisplayDriver::flush).
pub trait DisplayDriver {
    /// Bring up the display hardware
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Blank the off-screen frame
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text in the large numeral font on the text row
    fn draw_text(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Draw a one-pixel line
    fn draw_line(&mut self, from: Point, to: Point) -> Result<(), DisplayError>;

    /// Draw an arc outline
    fn draw_arc(&mut self, arc: &ArcSpec) -> Result<(), DisplayError>;

    /// Push the off-screen frame to the panel
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Pixel dimensions (width, height)
    fn size(&self) -> (u32, u32);
}
