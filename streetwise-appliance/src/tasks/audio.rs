//! Audio task
//!
//! Publishes captured microphone frames as "latest frame". The controller
//! samples it on its own cadence, so frames it never looks at are simply
//! overwritten.

use core::future::Future;

use embassy_time::Timer;

use streetwise_core::scope::AudioFrame;

use crate::channels::ApplianceChannels;

/// Back-off after a capture overrun
const OVERRUN_RETRY_MS: u64 = 10;

/// Capture errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AudioError {
    /// Samples were lost; capture continues
    Overrun,
    /// Capture ended
    Closed,
}

/// Microphone capture
pub trait AudioSource {
    /// Wait for the next captured frame
    fn next_frame(&mut self) -> impl Future<Output = Result<AudioFrame, AudioError>>;
}

/// Audio task; returns when the source closes
pub async fn run_audio<S: AudioSource>(channels: &ApplianceChannels, mut source: S) {
    info!("Audio task started");

    loop {
        match source.next_frame().await {
            Ok(frame) => channels.audio.signal(frame),
            Err(AudioError::Overrun) => {
                trace!("Audio overrun");
                Timer::after_millis(OVERRUN_RETRY_MS).await;
            }
            Err(AudioError::Closed) => {
                info!("Audio source closed");
                return;
            }
        }
    }
}
