//! Drawable frames

use heapless::{String, Vec};

use crate::entry::{QuestionNumber, ENTRY_DIGITS};

/// Maximum number of waveform columns (panel width)
pub const MAX_WAVEFORM_POINTS: usize = 128;

/// Down-sampled audio snapshot, one signed deflection per column
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Waveform {
    points: Vec<i8, MAX_WAVEFORM_POINTS>,
}

impl Waveform {
    /// Create an empty waveform
    pub const fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Append a column; fails when the waveform is as wide as the panel
    pub fn push(&mut self, deflection: i8) -> Result<(), i8> {
        self.points.push(deflection)
    }

    /// Column deflections, positive pointing down
    pub fn points(&self) -> &[i8] {
        &self.points
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Kind of frame currently on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameKind {
    /// Digit entry in progress
    Buffer,
    /// A question number
    Number,
    /// Indeterminate progress arc
    ProgressArc,
    /// Live audio waveform
    Waveform,
    /// Nothing shown
    #[default]
    Blank,
}

/// A drawable frame
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayFrame {
    /// Entry buffer text with placeholders, e.g. `"12__"`
    Buffer(String<ENTRY_DIGITS>),
    /// A number
    Number(QuestionNumber),
    /// Arc between two angles (degrees, counter-clockwise positive)
    ProgressArc { start_deg: i32, sweep_deg: i32 },
    /// Audio snapshot
    Waveform(Waveform),
    /// Blank panel
    Blank,
}

impl DisplayFrame {
    /// The kind of this frame
    pub fn kind(&self) -> FrameKind {
        match self {
            DisplayFrame::Buffer(_) => FrameKind::Buffer,
            DisplayFrame::Number(_) => FrameKind::Number,
            DisplayFrame::ProgressArc { .. } => FrameKind::ProgressArc,
            DisplayFrame::Waveform(_) => FrameKind::Waveform,
            DisplayFrame::Blank => FrameKind::Blank,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_kinds() {
        assert_eq!(DisplayFrame::Blank.kind(), FrameKind::Blank);
        assert_eq!(
            DisplayFrame::ProgressArc {
                start_deg: 0,
                sweep_deg: 120
            }
            .kind(),
            FrameKind::ProgressArc
        );
        assert_eq!(
            DisplayFrame::Waveform(Waveform::new()).kind(),
            FrameKind::Waveform
        );
    }

    #[test]
    fn test_waveform_capacity() {
        let mut wave = Waveform::new();
        for _ in 0..MAX_WAVEFORM_POINTS {
            wave.push(1).unwrap();
        }
        assert_eq!(wave.push(1), Err(1));
        assert_eq!(wave.len(), MAX_WAVEFORM_POINTS);
    }
}
