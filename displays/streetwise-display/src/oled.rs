//! `DisplayDriver` over an OLED panel

use embedded_graphics::geometry::AngleUnit;
use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Arc, Line, PrimitiveStyle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use streetwise_core::traits::{self, ArcSpec, DisplayDriver, DisplayError};

use crate::framebuffer::{FrameBuffer, HEIGHT, WIDTH};
use crate::panel::Panel;

/// Centre of the text row
const TEXT_CENTRE: Point = Point::new(WIDTH as i32 / 2, HEIGHT as i32 / 2);

/// Monochrome OLED display
///
/// Draws into an off-screen [`FrameBuffer`] and sends it to the panel on
/// [`flush`](DisplayDriver::flush).
pub struct OledDisplay<P> {
    panel: P,
    frame: FrameBuffer,
}

impl<P: Panel> OledDisplay<P> {
    pub fn new(panel: P) -> Self {
        Self {
            panel,
            frame: FrameBuffer::new(),
        }
    }

    /// The off-screen frame
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Release the panel
    pub fn release(self) -> P {
        self.panel
    }
}

fn point(p: traits::Point) -> Point {
    Point::new(p.x, p.y)
}

impl<P: Panel> DisplayDriver for OledDisplay<P> {
    fn init(&mut self) -> Result<(), DisplayError> {
        self.frame.clear();
        self.panel.init()
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.frame.clear();
        Ok(())
    }

    fn draw_text(&mut self, text: &str) -> Result<(), DisplayError> {
        let character_style = MonoTextStyle::new(&FONT_10X20, BinaryColor::On);
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();

        Text::with_text_style(text, TEXT_CENTRE, character_style, text_style)
            .draw(&mut self.frame)?;
        Ok(())
    }

    fn draw_line(&mut self, from: traits::Point, to: traits::Point) -> Result<(), DisplayError> {
        Line::new(point(from), point(to))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut self.frame)
    }

    fn draw_arc(&mut self, arc: &ArcSpec) -> Result<(), DisplayError> {
        // embedded-graphics measures angles clockwise (y points down)
        Arc::new(
            point(arc.top_left),
            arc.diameter,
            (-(arc.start_deg as f32)).deg(),
            (-(arc.sweep_deg as f32)).deg(),
        )
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, arc.stroke_width))
        .draw(&mut self.frame)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.panel.write_frame(&self.frame)
    }

    fn size(&self) -> (u32, u32) {
        (WIDTH as u32, HEIGHT as u32)
    }
}
