//! Display controller
//!
//! Owns the display driver and serializes every draw. Each render clears
//! the off-screen frame, draws exactly one [`DisplayFrame`] and flushes, so
//! two frame kinds are never composited.

use core::fmt::Write;

use heapless::String;

use super::frame::{DisplayFrame, FrameKind, Waveform};
use crate::traits::{ArcSpec, DisplayDriver, DisplayError, Point};

/// Geometry of the progress arc on a 128x64 panel
pub const PROGRESS_ARC: ArcSpec = ArcSpec {
    top_left: Point::new(41, 9),
    diameter: 46,
    start_deg: 0,
    sweep_deg: 0,
    stroke_width: 3,
};

/// Single owner of the display
///
/// Until a driver is attached every operation is a no-op returning `Ok`.
#[derive(Debug)]
pub struct DisplayController<D> {
    driver: Option<D>,
    active: FrameKind,
}

impl<D> Default for DisplayController<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> DisplayController<D> {
    /// Create a controller with no driver
    pub const fn new() -> Self {
        Self {
            driver: None,
            active: FrameKind::Blank,
        }
    }

    /// Check if a driver is attached
    pub fn is_attached(&self) -> bool {
        self.driver.is_some()
    }

    /// Kind of frame last rendered
    pub fn active(&self) -> FrameKind {
        self.active
    }

    /// The attached driver
    pub fn driver(&self) -> Option<&D> {
        self.driver.as_ref()
    }

    /// Release the driver
    pub fn detach(&mut self) -> Option<D> {
        self.active = FrameKind::Blank;
        self.driver.take()
    }
}

impl<D: DisplayDriver> DisplayController<D> {
    /// Initialize `driver` and take ownership of it
    ///
    /// On failure the driver is dropped and the controller stays detached.
    pub fn attach(&mut self, mut driver: D) -> Result<(), DisplayError> {
        driver.init()?;
        driver.clear()?;
        driver.flush()?;
        self.driver = Some(driver);
        self.active = FrameKind::Blank;
        Ok(())
    }

    /// Replace whatever is shown with `frame`
    pub fn render(&mut self, frame: &DisplayFrame) -> Result<(), DisplayError> {
        let Some(driver) = self.driver.as_mut() else {
            return Ok(());
        };

        driver.clear()?;
        if let Err(e) = draw_frame(driver, frame) {
            // Leave no partial frame behind for a later flush; the panel
            // still shows the previous one
            let _ = driver.clear();
            return Err(e);
        }
        driver.flush()?;

        self.active = frame.kind();
        Ok(())
    }

    /// Blank the display
    pub fn clear(&mut self) -> Result<(), DisplayError> {
        self.render(&DisplayFrame::Blank)
    }
}

/// Draw one frame into the off-screen buffer
fn draw_frame<D: DisplayDriver>(driver: &mut D, frame: &DisplayFrame) -> Result<(), DisplayError> {
    match frame {
        DisplayFrame::Buffer(text) => driver.draw_text(text)?,
        DisplayFrame::Number(number) => {
            let mut text: String<8> = String::new();
            // Four digits always fit
            let _ = write!(text, "{}", number);
            driver.draw_text(&text)?;
        }
        DisplayFrame::ProgressArc {
            start_deg,
            sweep_deg,
        } => {
            driver.draw_arc(&ArcSpec {
                start_deg: *start_deg,
                sweep_deg: *sweep_deg,
                ..PROGRESS_ARC
            })?;
        }
        DisplayFrame::Waveform(waveform) => draw_waveform(driver, waveform)?,
        DisplayFrame::Blank => {}
    }
    Ok(())
}

/// One vertical line per column from the centre row, positive down
fn draw_waveform<D: DisplayDriver>(driver: &mut D, waveform: &Waveform) -> Result<(), DisplayError> {
    let (width, height) = driver.size();
    let centre = (height / 2) as i32;

    for (x, &y) in waveform.points().iter().enumerate().take(width as usize) {
        let x = x as i32;
        driver.draw_line(Point::new(x, centre), Point::new(x, centre + y as i32))?;
    }
    Ok(())
}
