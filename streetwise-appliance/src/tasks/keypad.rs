//! Keypad task
//!
//! Reads raw transitions from the keyboard device, decodes them and
//! forwards key events to the controller in arrival order.

use core::future::Future;

use embassy_futures::select::select;
use embassy_time::Timer;

use streetwise_core::KeyEvent;

use super::StartupError;
use crate::channels::ApplianceChannels;

/// Back-off after a failed read
const READ_RETRY_MS: u64 = 100;

/// Keyboard device errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeypadError {
    /// Device missing or not accessible
    Unavailable,
    /// Read failed
    Read,
}

/// One raw input event as reported by the device (`type`, `code`, `value`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawKeyEvent {
    pub ev_type: u16,
    pub code: u16,
    pub value: i32,
}

/// Keyboard device
pub trait KeySource {
    /// Open the device
    fn open(&mut self) -> impl Future<Output = Result<(), KeypadError>>;

    /// Wait for the next raw event
    fn next_event(&mut self) -> impl Future<Output = Result<RawKeyEvent, KeypadError>>;

    /// Close the device
    fn close(&mut self);
}

/// Keypad task
///
/// Runs until the controller is destroyed or fails to start, then closes
/// the device. A release signalled before this task starts still applies.
/// Read errors are logged and retried; only a failed open is returned.
pub async fn run_keypad<S: KeySource>(
    channels: &ApplianceChannels,
    mut source: S,
) -> Result<(), StartupError> {
    source.open().await.map_err(|e| {
        error!("Keypad open failed: {:?}", e);
        StartupError::Keypad(e)
    })?;
    info!("Keypad task started");

    let forward = async {
        loop {
            match source.next_event().await {
                Ok(raw) => {
                    if let Some(event) = KeyEvent::from_raw(raw.ev_type, raw.code, raw.value) {
                        trace!("Key {} release={}", event.code, event.is_release);
                        channels.keys.send(event).await;
                    }
                }
                Err(e) => {
                    warn!("Keypad read error: {:?}", e);
                    Timer::after_millis(READ_RETRY_MS).await;
                }
            }
        }
    };

    select(channels.keypad_release.wait(), forward).await;

    source.close();
    info!("Keypad released");
    Ok(())
}
