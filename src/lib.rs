pub mod checkin;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod scan;
pub mod ui;

pub use error::{AppError, Result};
