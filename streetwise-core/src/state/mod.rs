//! Appliance phase state machine
//!
//! Decides whether the keypad is listened to and how the display treats
//! clears. The phase is explicit and only changed by the appliance owner.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::Phase;
