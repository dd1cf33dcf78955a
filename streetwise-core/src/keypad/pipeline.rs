//! Keypress pipeline
//!
//! Filters key transitions down to accepted digit characters and tracks
//! the inactivity timeout. The pipeline is an explicit state machine:
//!
//! ```text
//!            subscribe()             poll() past deadline
//!   Idle ───────────────► Listening ─────────────────────► Restarting
//!    ▲                      ▲  │                                │
//!    └──── cancel() ────────┘  └── accepted digit: new deadline │
//!                           └──────────── restart() ◄───────────┘
//! ```
//!
//! A timeout is routine entry abandonment, not a failure: the owner clears
//! the entry and calls [`KeypressPipeline::restart`] so input keeps flowing.

use super::event::KeyEvent;
use super::keymap::KeyMap;

/// Subscription state of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PipelineState {
    /// Not subscribed; every event is dropped
    Idle,
    /// Subscribed and waiting for a digit before the deadline
    Listening {
        /// Absolute time (ms) at which the entry times out
        deadline_ms: u64,
    },
    /// Timed out; waiting for the owner to re-enter `Listening`
    Restarting,
}

/// Keypress pipeline
#[derive(Debug, Clone)]
pub struct KeypressPipeline {
    keymap: KeyMap,
    timeout_ms: u64,
    state: PipelineState,
}

impl KeypressPipeline {
    /// Build a pipeline (not yet subscribed)
    pub fn new(keymap: KeyMap, timeout_ms: u32) -> Self {
        Self {
            keymap,
            timeout_ms: timeout_ms.max(1) as u64,
            state: PipelineState::Idle,
        }
    }

    /// Current state
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// The key map in use
    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    /// Check if the pipeline holds an active subscription
    pub fn is_subscribed(&self) -> bool {
        !matches!(self.state, PipelineState::Idle)
    }

    /// Pending timeout deadline, if listening
    pub fn deadline(&self) -> Option<u64> {
        match self.state {
            PipelineState::Listening { deadline_ms } => Some(deadline_ms),
            _ => None,
        }
    }

    /// Start listening, replacing any previous subscription
    pub fn subscribe(&mut self, now_ms: u64) {
        self.state = PipelineState::Listening {
            deadline_ms: now_ms.saturating_add(self.timeout_ms),
        };
    }

    /// Cancel the subscription. Cancelling an idle pipeline is a no-op.
    pub fn cancel(&mut self) {
        self.state = PipelineState::Idle;
    }

    /// Re-enter `Listening` after a timeout
    ///
    /// Has no effect unless the pipeline is `Restarting`.
    pub fn restart(&mut self, now_ms: u64) {
        if self.state == PipelineState::Restarting {
            self.subscribe(now_ms);
        }
    }

    /// Feed one key transition through the pipeline
    ///
    /// Returns the digit if the event is a release of a digit key, the
    /// pipeline is listening and `input_enabled` is set. An accepted digit
    /// pushes the inactivity deadline out by the full timeout window.
    pub fn accept(&mut self, event: KeyEvent, input_enabled: bool, now_ms: u64) -> Option<char> {
        if !event.is_release {
            return None;
        }

        let digit = self.keymap.digit_for(event.code)?;

        if !input_enabled {
            return None;
        }

        match self.state {
            PipelineState::Listening { .. } => {
                self.subscribe(now_ms);
                Some(digit)
            }
            PipelineState::Idle | PipelineState::Restarting => None,
        }
    }

    /// Check the inactivity deadline
    ///
    /// Returns true exactly once per expiry; the pipeline then sits in
    /// `Restarting` until [`restart`](Self::restart) is called.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.state {
            PipelineState::Listening { deadline_ms } if now_ms >= deadline_ms => {
                self.state = PipelineState::Restarting;
                true
            }
            _ => false,
        }
    }
}
