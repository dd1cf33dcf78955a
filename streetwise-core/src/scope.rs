//! Oscilloscope
//!
//! Turns the continuous microphone stream into periodic waveform
//! snapshots. This is rate limiting, not buffering: at each sample tick
//! only the most recent frame is drawn and anything older is dropped.

use heapless::Vec;

use crate::config::ScopeConfig;
use crate::display::Waveform;

/// Samples per captured audio frame
pub const AUDIO_FRAME_LEN: usize = 1024;

/// One captured audio frame, samples in -1.0..=1.0
pub type AudioFrame = Vec<f32, AUDIO_FRAME_LEN>;

/// Audio visualizer sampler
#[derive(Debug, Clone)]
pub struct Oscilloscope {
    config: ScopeConfig,
    next_sample_ms: Option<u64>,
}

impl Oscilloscope {
    /// Create a stopped oscilloscope
    pub fn new(config: ScopeConfig) -> Self {
        Self {
            config,
            next_sample_ms: None,
        }
    }

    /// Start sampling; restarting replaces the previous schedule
    pub fn start(&mut self, now_ms: u64) {
        self.next_sample_ms = Some(now_ms.saturating_add(self.interval()));
    }

    /// Stop sampling. Stopping a stopped oscilloscope is a no-op.
    pub fn stop(&mut self) {
        self.next_sample_ms = None;
    }

    /// Check if sampling is active
    pub fn is_running(&self) -> bool {
        self.next_sample_ms.is_some()
    }

    /// Time of the next sample tick
    pub fn next_sample(&self) -> Option<u64> {
        self.next_sample_ms
    }

    /// Check if a sample tick has been reached
    pub fn due(&self, now_ms: u64) -> bool {
        matches!(self.next_sample_ms, Some(at) if now_ms >= at)
    }

    /// Consume the current tick and schedule the next one
    ///
    /// Ticks missed while the owner was busy are skipped, not replayed.
    pub fn advance(&mut self, now_ms: u64) {
        if let Some(at) = self.next_sample_ms {
            let mut next = at.saturating_add(self.interval());
            if next <= now_ms {
                next = now_ms.saturating_add(self.interval());
            }
            self.next_sample_ms = Some(next);
        }
    }

    fn interval(&self) -> u64 {
        self.config.interval_ms.max(1) as u64
    }

    /// Down-sample a frame into at most `width` columns
    ///
    /// Takes every `stride`-th sample starting at `first_sample`, scales by
    /// `gain` and clamps to `±max_deflection`.
    pub fn waveform(&self, samples: &[f32], width: usize) -> Waveform {
        // Deflections are stored as i8
        let limit = self.config.max_deflection.min(i8::MAX as u8) as i32;
        let mut waveform = Waveform::new();

        let picked = samples
            .iter()
            .skip(self.config.first_sample as usize)
            .step_by(self.config.stride.max(1) as usize)
            .take(width);

        for &sample in picked {
            // NaN casts to 0
            let y = ((sample * self.config.gain) as i32).clamp(-limit, limit);
            let y = i8::try_from(y).unwrap_or(0);
            if waveform.push(y).is_err() {
                break;
            }
        }

        waveform
    }
}
