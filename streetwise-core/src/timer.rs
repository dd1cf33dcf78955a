//! One-shot deadlines
//!
//! A cancellable deadline in absolute milliseconds. Cancelling, or
//! cancelling twice, is always a no-op on an inactive deadline.

/// A one-shot deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Deadline {
    at_ms: Option<u64>,
}

impl Deadline {
    /// Create an inactive deadline
    pub const fn new() -> Self {
        Self { at_ms: None }
    }

    /// Arm for `duration_ms` after `now_ms`, replacing any pending deadline
    pub fn arm(&mut self, now_ms: u64, duration_ms: u32) {
        self.at_ms = Some(now_ms.saturating_add(duration_ms as u64));
    }

    /// Disarm
    pub fn cancel(&mut self) {
        self.at_ms = None;
    }

    /// Check if a deadline is pending
    pub fn is_armed(&self) -> bool {
        self.at_ms.is_some()
    }

    /// Pending deadline
    pub fn at(&self) -> Option<u64> {
        self.at_ms
    }

    /// Check for expiry; an expired deadline disarms itself
    pub fn expired(&mut self, now_ms: u64) -> bool {
        match self.at_ms {
            Some(at) if now_ms >= at => {
                self.at_ms = None;
                true
            }
            _ => false,
        }
    }
}
