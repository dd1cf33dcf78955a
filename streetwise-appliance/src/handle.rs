//! Control surface
//!
//! [`ApplianceHandle`] is the only way application logic changes what the
//! appliance does. Every call enqueues a [`Command`]; the controller task
//! executes them in order.

use streetwise_core::QuestionNumber;

use crate::channels::{ApplianceChannels, Command, NumberSubscriber};

/// Errors from the non-waiting control calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlError {
    /// Command queue is full
    Busy,
    /// Every question-number subscriber slot is taken
    TooManySubscribers,
}

/// Cloneable handle to a running appliance
#[derive(Clone, Copy)]
pub struct ApplianceHandle<'a> {
    channels: &'a ApplianceChannels,
}

impl<'a> ApplianceHandle<'a> {
    pub(crate) fn new(channels: &'a ApplianceChannels) -> Self {
        Self { channels }
    }

    /// Enqueue a command, waiting for queue space
    pub async fn send(&self, command: Command) {
        self.channels.commands.send(command).await;
    }

    /// Enqueue a command without waiting
    pub fn try_send(&self, command: Command) -> Result<(), ControlError> {
        self.channels
            .commands
            .try_send(command)
            .map_err(|_| ControlError::Busy)
    }

    /// Subscribe to completed question numbers
    ///
    /// Exactly one number is published per completed 4-digit entry.
    pub fn question_numbers(&self) -> Result<NumberSubscriber<'a>, ControlError> {
        self.channels
            .numbers
            .subscriber()
            .map_err(|_| ControlError::TooManySubscribers)
    }

    /// Start accepting digits, optionally keeping the current screen up
    /// for the fade window
    pub async fn enable_user_input(&self, fade: bool) {
        self.send(Command::EnableUserInput { fade }).await
    }

    pub fn try_enable_user_input(&self, fade: bool) -> Result<(), ControlError> {
        self.try_send(Command::EnableUserInput { fade })
    }

    /// Stop accepting digits
    pub async fn block_user_input(&self) {
        self.send(Command::BlockUserInput).await
    }

    pub fn try_block_user_input(&self) -> Result<(), ControlError> {
        self.try_send(Command::BlockUserInput)
    }

    /// Show a number; input is blocked first if it is still enabled
    pub async fn display_number(&self, number: QuestionNumber) {
        self.send(Command::DisplayNumber(number)).await
    }

    pub fn try_display_number(&self, number: QuestionNumber) -> Result<(), ControlError> {
        self.try_send(Command::DisplayNumber(number))
    }

    /// Draw one progress arc (degrees, counter-clockwise positive)
    pub async fn display_indeterminate_progress(&self, start_deg: i32, sweep_deg: i32) {
        self.send(Command::DisplayProgress {
            start_deg,
            sweep_deg,
        })
        .await
    }

    pub fn try_display_indeterminate_progress(
        &self,
        start_deg: i32,
        sweep_deg: i32,
    ) -> Result<(), ControlError> {
        self.try_send(Command::DisplayProgress {
            start_deg,
            sweep_deg,
        })
    }

    /// Blank the display (not drawn during the fade window)
    pub async fn clear_display(&self) {
        self.send(Command::ClearDisplay).await
    }

    pub fn try_clear_display(&self) -> Result<(), ControlError> {
        self.try_send(Command::ClearDisplay)
    }

    /// Start drawing the microphone waveform
    pub async fn start_oscilloscope(&self) {
        self.send(Command::StartOscilloscope).await
    }

    pub fn try_start_oscilloscope(&self) -> Result<(), ControlError> {
        self.try_send(Command::StartOscilloscope)
    }

    /// Stop drawing the waveform and clear the display
    pub async fn stop_oscilloscope(&self) {
        self.send(Command::StopOscilloscope).await
    }

    pub fn try_stop_oscilloscope(&self) -> Result<(), ControlError> {
        self.try_send(Command::StopOscilloscope)
    }

    /// Animate the progress arc until stopped
    pub async fn start_progress_spinner(&self) {
        self.send(Command::StartSpinner).await
    }

    pub fn try_start_progress_spinner(&self) -> Result<(), ControlError> {
        self.try_send(Command::StartSpinner)
    }

    /// Stop the spinner, then show `then` or clear the display
    pub async fn stop_progress_spinner(&self, then: Option<QuestionNumber>) {
        self.send(Command::StopSpinner(then)).await
    }

    pub fn try_stop_progress_spinner(
        &self,
        then: Option<QuestionNumber>,
    ) -> Result<(), ControlError> {
        self.try_send(Command::StopSpinner(then))
    }

    /// Release the keypad and display; the controller task returns
    pub async fn destroy(&self) {
        self.send(Command::Destroy).await
    }

    pub fn try_destroy(&self) -> Result<(), ControlError> {
        self.try_send(Command::Destroy)
    }
}
