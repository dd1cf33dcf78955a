//! Appliance controller
//!
//! Single owner of the entry buffer, the keypress pipeline, the fade timer,
//! the oscilloscope, the spinner and the display. Every mutation goes
//! through `&mut self`, so whoever owns the `Appliance` (one async task on
//! the device) serializes all draws.
//!
//! Time is passed in explicitly. The owner calls [`Appliance::poll`] at or
//! after [`Appliance::next_deadline`]; the controller never blocks.
//!
//! Nothing here returns a steady-state error. Faults and diagnostics are
//! queued as [`Notice`]s for the owner to log or forward.

use heapless::Deque;

use crate::config::ApplianceConfig;
use crate::display::{DisplayController, DisplayFrame, FrameKind, MAX_WAVEFORM_POINTS};
use crate::entry::{DigitBuffer, PushOutcome, QuestionNumber};
use crate::keypad::{KeyEvent, KeypressPipeline};
use crate::progress::Spinner;
use crate::scope::Oscilloscope;
use crate::state::{Event, Phase};
use crate::timer::Deadline;
use crate::traits::{DisplayDriver, DisplayError};

/// Pending notices kept before the oldest is dropped
pub const NOTICE_CAPACITY: usize = 16;

/// Something the owner should know about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Notice {
    /// A digit was stored in the buffer
    DigitAccepted(char),
    /// A non-empty buffer was discarded
    PartialInputCleared,
    /// No digit arrived within the entry timeout
    EntryTimedOut,
    /// The fade window elapsed without input
    FadeExpired,
    /// A digit arrived during the fade window
    FadeCancelled,
    /// An entry completed
    QuestionNumber(QuestionNumber),
    /// An entry completed but did not parse; nothing is published
    EntryRejected,
    /// A number was displayed while input was enabled; input was blocked
    InputBlockedForNumber,
    /// A draw failed
    DisplayFault(DisplayError),
}

/// Which subscriptions are currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Subscriptions {
    pub keypad: bool,
    pub fade: bool,
    pub scope: bool,
    pub spinner: bool,
}

/// The appliance I/O controller
pub struct Appliance<D> {
    display: DisplayController<D>,
    pipeline: KeypressPipeline,
    buffer: DigitBuffer,
    phase: Phase,
    fade: Deadline,
    fade_window_ms: u32,
    scope: Oscilloscope,
    spinner: Spinner,
    notices: Deque<Notice, NOTICE_CAPACITY>,
}

impl<D: DisplayDriver> Appliance<D> {
    /// Build the controller; the pipeline exists but is not subscribed
    pub fn new(config: &ApplianceConfig) -> Self {
        Self {
            display: DisplayController::new(),
            pipeline: KeypressPipeline::new(config.keypad.keymap(), config.entry.timeout_ms),
            buffer: DigitBuffer::new(),
            phase: Phase::Disabled,
            fade: Deadline::new(),
            fade_window_ms: config.fade.window_ms,
            scope: Oscilloscope::new(config.scope),
            spinner: Spinner::new(config.progress),
            notices: Deque::new(),
        }
    }

    /// Take ownership of the display and bring it up
    pub fn initialize(&mut self, display: D) -> Result<(), DisplayError> {
        self.display.attach(display)
    }

    /// Check if a display is attached
    pub fn is_initialized(&self) -> bool {
        self.display.is_attached()
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current entry buffer
    pub fn buffer(&self) -> &DigitBuffer {
        &self.buffer
    }

    /// Kind of frame currently shown
    pub fn active_frame(&self) -> FrameKind {
        self.display.active()
    }

    /// Active subscriptions and timers
    pub fn subscriptions(&self) -> Subscriptions {
        Subscriptions {
            keypad: self.pipeline.is_subscribed(),
            fade: self.fade.is_armed(),
            scope: self.scope.is_running(),
            spinner: self.spinner.is_running(),
        }
    }

    /// Take the oldest pending notice
    pub fn pop_notice(&mut self) -> Option<Notice> {
        self.notices.pop_front()
    }

    /// Earliest time at which [`poll`](Self::poll) has work to do
    pub fn next_deadline(&self) -> Option<u64> {
        [
            self.pipeline.deadline(),
            self.fade.at(),
            self.scope.next_sample(),
            self.spinner.next_frame(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Start accepting digits
    ///
    /// With `fade` the current frame stays up for the fade window instead
    /// of being cleared. Any previous subscription and fade timer are
    /// cancelled first.
    pub fn enable_user_input(&mut self, fade: bool, now_ms: u64) {
        self.fade.cancel();
        self.pipeline.cancel();

        self.phase = self.phase.transition(Event::InputEnabled { fade });
        if fade {
            self.buffer.clear();
            self.fade.arm(now_ms, self.fade_window_ms);
        } else {
            self.clear_display();
        }

        self.pipeline.subscribe(now_ms);
    }

    /// Stop accepting digits and cancel the fade timer
    pub fn block_user_input(&mut self) {
        self.fade.cancel();
        self.pipeline.cancel();
        self.phase = self.phase.transition(Event::InputBlocked);
    }

    /// Feed one key transition
    pub fn handle_key(&mut self, event: KeyEvent, now_ms: u64) {
        if let Some(digit) = self
            .pipeline
            .accept(event, self.phase.accepts_input(), now_ms)
        {
            self.accept_digit(digit);
        }
    }

    fn accept_digit(&mut self, digit: char) {
        let was_fading = self.phase.is_fading();
        self.phase = self.phase.transition(Event::DigitAccepted);

        if was_fading {
            self.fade.cancel();
            self.notify(Notice::FadeCancelled);
            self.clear_display();
        }

        if self.buffer.push(digit) == PushOutcome::Restarted {
            self.notify(Notice::PartialInputCleared);
        }
        self.notify(Notice::DigitAccepted(digit));

        let text = self.buffer.text();
        self.render(&DisplayFrame::Buffer(text));

        if self.buffer.is_full() {
            self.phase = self.phase.transition(Event::EntryCompleted);
            self.pipeline.cancel();
            match self.buffer.parse() {
                Some(number) => self.notify(Notice::QuestionNumber(number)),
                None => self.notify(Notice::EntryRejected),
            }
        }
    }

    /// Handle expired timers: entry timeout, fade window, spinner frames
    pub fn poll(&mut self, now_ms: u64) {
        if self.pipeline.poll(now_ms) {
            self.notify(Notice::EntryTimedOut);
            self.phase = self.phase.transition(Event::EntryTimedOut);
            self.clear_display();
            self.pipeline.restart(now_ms);
        }

        if self.fade.expired(now_ms) {
            self.phase = self.phase.transition(Event::FadeExpired);
            self.notify(Notice::FadeExpired);
            self.clear_display();
        }

        if let Some((start_deg, sweep_deg)) = self.spinner.frame(now_ms) {
            self.display_indeterminate_progress(start_deg, sweep_deg);
        }
    }

    /// Blank the display and discard the entry buffer
    ///
    /// The blank is not drawn during the fade window.
    pub fn clear_display(&mut self) {
        if !self.buffer.is_empty() {
            self.notify(Notice::PartialInputCleared);
        }

        if !self.phase.is_fading() && self.display.active() != FrameKind::Blank {
            let result = self.display.clear();
            self.check(result);
        }

        self.buffer.clear();
    }

    /// Show a number
    ///
    /// Callers are expected to block input first; if input is still enabled
    /// it is blocked here and [`Notice::InputBlockedForNumber`] is raised.
    pub fn display_number(&mut self, number: QuestionNumber) {
        if self.phase.accepts_input() {
            self.block_user_input();
            self.notify(Notice::InputBlockedForNumber);
        }

        if !self.buffer.is_empty() {
            self.notify(Notice::PartialInputCleared);
            self.buffer.clear();
        }
        self.render(&DisplayFrame::Number(number));
    }

    /// Draw the progress arc; input state is unchanged
    pub fn display_indeterminate_progress(&mut self, start_deg: i32, sweep_deg: i32) {
        self.render(&DisplayFrame::ProgressArc {
            start_deg,
            sweep_deg,
        });
    }

    /// Start sampling audio frames
    pub fn start_oscilloscope(&mut self, now_ms: u64) {
        self.scope.start(now_ms);
    }

    /// Stop sampling and clear the display
    pub fn stop_oscilloscope(&mut self) {
        self.scope.stop();
        self.clear_display();
    }

    /// Check if an audio sample tick has been reached
    pub fn scope_due(&self, now_ms: u64) -> bool {
        self.scope.due(now_ms)
    }

    /// Consume a sample tick, drawing the most recent frame if there is one
    ///
    /// Returns true if a waveform was drawn. Frames offered between ticks
    /// are ignored.
    pub fn sample_audio(&mut self, now_ms: u64, samples: Option<&[f32]>) -> bool {
        if !self.scope.due(now_ms) {
            return false;
        }
        self.scope.advance(now_ms);

        let Some(samples) = samples else {
            return false;
        };
        let waveform = self.scope.waveform(samples, MAX_WAVEFORM_POINTS);
        self.render(&DisplayFrame::Waveform(waveform));
        true
    }

    /// Start the progress spinner; the first frame is drawn on the next poll
    pub fn start_progress_spinner(&mut self, now_ms: u64) {
        self.spinner.start(now_ms);
    }

    /// Stop the spinner, then show `then` or clear
    pub fn stop_progress_spinner(&mut self, then: Option<QuestionNumber>) {
        self.spinner.stop();
        match then {
            Some(number) => self.display_number(number),
            None => self.clear_display(),
        }
    }

    /// Cancel everything, clear the display and release it
    ///
    /// Safe to call without [`initialize`](Self::initialize) and more than
    /// once; an uninitialised controller performs no display writes.
    pub fn destroy(&mut self) -> Option<D> {
        self.pipeline.cancel();
        self.fade.cancel();
        self.scope.stop();
        self.spinner.stop();
        self.phase = self.phase.transition(Event::Destroyed);
        self.clear_display();
        self.display.detach()
    }

    fn render(&mut self, frame: &DisplayFrame) {
        let result = self.display.render(frame);
        self.check(result);
    }

    fn check(&mut self, result: Result<(), DisplayError>) {
        if let Err(e) = result {
            self.notify(Notice::DisplayFault(e));
        }
    }

    fn notify(&mut self, notice: Notice) {
        if self.notices.is_full() {
            self.notices.pop_front();
        }
        let _ = self.notices.push_back(notice);
    }
}
