//! GUI panels and application state.

pub mod app;
pub mod components;
pub mod dialogs;
pub mod roster_panel;


pub use app::CheckInApp;
