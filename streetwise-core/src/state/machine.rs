//! Phase definition
//!
//! Whether digits are accepted, and whether a clear is visible, is a
//! function of the current phase only.

use super::events::Event;

/// Appliance phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Input blocked (also the phase before first enable and after destroy)
    #[default]
    Disabled,
    /// Input enabled, buffer empty
    AwaitingFirstInput {
        /// Previous frame still shown "soft"; clears are suppressed
        fading: bool,
    },
    /// At least one digit entered
    AwaitingInput,
    /// Four digits entered; input disabled until re-enabled
    Complete,
}

impl Phase {
    /// Check if key events are forwarded to the entry buffer
    pub fn accepts_input(&self) -> bool {
        matches!(self, Phase::AwaitingFirstInput { .. } | Phase::AwaitingInput)
    }

    /// Check if the display is in the fade grace window
    pub fn is_fading(&self) -> bool {
        matches!(self, Phase::AwaitingFirstInput { fading: true })
    }

    /// Process an event and return the next phase
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use Phase::*;

        match (self, event) {
            // Control surface wins from any phase
            (_, InputEnabled { fade }) => AwaitingFirstInput { fading: fade },
            (_, InputBlocked) => Disabled,
            (_, Destroyed) => Disabled,

            // Entry
            (AwaitingFirstInput { .. }, DigitAccepted) => AwaitingInput,
            (AwaitingInput, DigitAccepted) => AwaitingInput,
            (AwaitingFirstInput { .. } | AwaitingInput, EntryCompleted) => Complete,

            // Timeout abandons a partial entry; a fading screen keeps fading
            (AwaitingInput, EntryTimedOut) => AwaitingFirstInput { fading: false },

            // Fade window over
            (AwaitingFirstInput { fading: true }, FadeExpired) => {
                AwaitingFirstInput { fading: false }
            }

            // Default: stay in current phase
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enable_from_any_phase() {
        let phases = [
            Phase::Disabled,
            Phase::AwaitingInput,
            Phase::Complete,
            Phase::AwaitingFirstInput { fading: false },
        ];

        for phase in phases {
            assert_eq!(
                phase.transition(Event::InputEnabled { fade: true }),
                Phase::AwaitingFirstInput { fading: true }
            );
            assert_eq!(phase.transition(Event::InputBlocked), Phase::Disabled);
        }
    }

    #[test]
    fn test_entry_flow() {
        let phase = Phase::Disabled.transition(Event::InputEnabled { fade: false });
        assert!(phase.accepts_input());
        assert!(!phase.is_fading());

        let phase = phase.transition(Event::DigitAccepted);
        assert_eq!(phase, Phase::AwaitingInput);

        let phase = phase.transition(Event::DigitAccepted);
        assert_eq!(phase, Phase::AwaitingInput);

        let phase = phase.transition(Event::EntryCompleted);
        assert_eq!(phase, Phase::Complete);
        assert!(!phase.accepts_input());
    }

    #[test]
    fn test_first_digit_ends_fade() {
        let phase = Phase::AwaitingFirstInput { fading: true };
        assert!(phase.is_fading());
        assert_eq!(phase.transition(Event::DigitAccepted), Phase::AwaitingInput);
    }

    #[test]
    fn test_timeout_abandons_entry() {
        assert_eq!(
            Phase::AwaitingInput.transition(Event::EntryTimedOut),
            Phase::AwaitingFirstInput { fading: false }
        );
        // Still fading: the fade timer decides when the screen clears
        assert_eq!(
            Phase::AwaitingFirstInput { fading: true }.transition(Event::EntryTimedOut),
            Phase::AwaitingFirstInput { fading: true }
        );
    }

    #[test]
    fn test_fade_expiry() {
        assert_eq!(
            Phase::AwaitingFirstInput { fading: true }.transition(Event::FadeExpired),
            Phase::AwaitingFirstInput { fading: false }
        );
        // Stale expiry after input is ignored
        assert_eq!(
            Phase::AwaitingInput.transition(Event::FadeExpired),
            Phase::AwaitingInput
        );
    }

    #[test]
    fn test_disabled_ignores_entry_events() {
        for event in [
            Event::DigitAccepted,
            Event::EntryCompleted,
            Event::EntryTimedOut,
            Event::FadeExpired,
        ] {
            assert_eq!(Phase::Disabled.transition(event), Phase::Disabled);
        }
    }
}
