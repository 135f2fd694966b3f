//! Check-in screen logic: roster, scan/admit/remove state machine and its effects.

pub mod effects;
pub mod roster;
pub mod state;


pub use roster::{NOT_PRESENT_TITLE, PRESENT_TITLE, Roster, RosterStore};
pub use state::{AdmitOrigin, CheckInError, Command, ErrorOrigin, Event, Phase, ScreenState};
