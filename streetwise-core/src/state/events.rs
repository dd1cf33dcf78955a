//! Events that trigger phase transitions

/// Events that can trigger phase transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Control surface
    /// Caller enabled user input, optionally keeping the old frame visible
    InputEnabled {
        /// Keep previous content "soft" until the first digit or fade expiry
        fade: bool,
    },
    /// Caller blocked user input
    InputBlocked,
    /// Controller destroyed
    Destroyed,

    // Entry events
    /// A digit was accepted into the buffer
    DigitAccepted,
    /// Fourth digit accepted
    EntryCompleted,
    /// No digit within the inactivity window
    EntryTimedOut,

    // Timer events
    /// Fade grace window elapsed without input
    FadeExpired,
}
