//! Indeterminate progress spinner
//!
//! A fixed-length arc that rotates clockwise by a few degrees per frame.

use crate::config::ProgressConfig;
use crate::timer::Deadline;

/// Spinner animation state
#[derive(Debug, Clone)]
pub struct Spinner {
    config: ProgressConfig,
    angle_deg: u16,
    next_frame: Deadline,
}

impl Spinner {
    /// Create a stopped spinner
    pub fn new(config: ProgressConfig) -> Self {
        Self {
            config,
            angle_deg: 0,
            next_frame: Deadline::new(),
        }
    }

    /// Start from the top of the rotation; the first frame is due now
    pub fn start(&mut self, now_ms: u64) {
        self.angle_deg = 0;
        self.next_frame.arm(now_ms, 0);
    }

    /// Stop animating. Stopping a stopped spinner is a no-op.
    pub fn stop(&mut self) {
        self.next_frame.cancel();
    }

    /// Check if the spinner is animating
    pub fn is_running(&self) -> bool {
        self.next_frame.is_armed()
    }

    /// Time of the next frame
    pub fn next_frame(&self) -> Option<u64> {
        self.next_frame.at()
    }

    /// Produce the arc for the frame due at `now_ms`, if any
    ///
    /// Returns `(start_deg, sweep_deg)`; the start angle runs negative so the
    /// arc turns clockwise.
    pub fn frame(&mut self, now_ms: u64) -> Option<(i32, i32)> {
        if !self.next_frame.expired(now_ms) {
            return None;
        }

        let arc = (-(self.angle_deg as i32), self.config.sweep_deg as i32);
        self.angle_deg = ((self.angle_deg as u32 + self.config.step_deg as u32) % 360) as u16;
        self.next_frame.arm(now_ms, self.config.frame_ms.max(1));
        Some(arc)
    }
}
