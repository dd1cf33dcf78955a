//! Inter-task communication channels
//!
//! Everything the tasks share lives in one [`ApplianceChannels`]. It is
//! `const`-constructible, so the device binary keeps it in a `static` while
//! tests use a fresh local instance each.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::pubsub::{ImmediatePublisher, PubSubChannel, Subscriber};
use embassy_sync::signal::Signal;

use streetwise_core::scope::AudioFrame;
use streetwise_core::{KeyEvent, QuestionNumber};

use crate::handle::ApplianceHandle;

/// Channel capacity for control commands
pub const COMMAND_CHANNEL_SIZE: usize = 8;

/// Channel capacity for decoded key transitions
pub const KEY_CHANNEL_SIZE: usize = 16;

/// Question numbers buffered per subscriber
pub const NUMBER_CAPACITY: usize = 4;

/// Maximum question-number subscribers
pub const NUMBER_SUBSCRIBERS: usize = 4;

/// Publishers (the controller task only)
pub const NUMBER_PUBLISHERS: usize = 1;

/// Control operations, executed in order by the controller task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    EnableUserInput { fade: bool },
    BlockUserInput,
    DisplayNumber(QuestionNumber),
    DisplayProgress { start_deg: i32, sweep_deg: i32 },
    ClearDisplay,
    StartOscilloscope,
    StopOscilloscope,
    StartSpinner,
    StopSpinner(Option<QuestionNumber>),
    Destroy,
}

/// Subscriber for completed question numbers
pub type NumberSubscriber<'a> = Subscriber<
    'a,
    CriticalSectionRawMutex,
    QuestionNumber,
    NUMBER_CAPACITY,
    NUMBER_SUBSCRIBERS,
    NUMBER_PUBLISHERS,
>;

pub(crate) type NumberPublisher<'a> = ImmediatePublisher<
    'a,
    CriticalSectionRawMutex,
    QuestionNumber,
    NUMBER_CAPACITY,
    NUMBER_SUBSCRIBERS,
    NUMBER_PUBLISHERS,
>;

/// Shared channels between the appliance tasks
pub struct ApplianceChannels {
    /// Control commands from [`ApplianceHandle`]
    pub(crate) commands: Channel<CriticalSectionRawMutex, Command, COMMAND_CHANNEL_SIZE>,
    /// Key transitions from the keypad task
    pub(crate) keys: Channel<CriticalSectionRawMutex, KeyEvent, KEY_CHANNEL_SIZE>,
    /// Most recent audio frame; a newer frame replaces an unread one
    pub(crate) audio: Signal<CriticalSectionRawMutex, AudioFrame>,
    /// Tells the keypad task to close its device
    pub(crate) keypad_release: Signal<CriticalSectionRawMutex, ()>,
    /// Completed question numbers
    pub(crate) numbers: PubSubChannel<
        CriticalSectionRawMutex,
        QuestionNumber,
        NUMBER_CAPACITY,
        NUMBER_SUBSCRIBERS,
        NUMBER_PUBLISHERS,
    >,
}

impl Default for ApplianceChannels {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplianceChannels {
    pub const fn new() -> Self {
        Self {
            commands: Channel::new(),
            keys: Channel::new(),
            audio: Signal::new(),
            keypad_release: Signal::new(),
            numbers: PubSubChannel::new(),
        }
    }

    /// Control surface for application logic
    pub fn handle(&self) -> ApplianceHandle<'_> {
        ApplianceHandle::new(self)
    }
}
