//! HTTP handlers for the appointment routes.

pub mod appointment;
pub use appointment::*;
