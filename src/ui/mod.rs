//! egui front end. Screens draw from and write to the [`Session`]; the only
//! state kept here is which screen and dialog are showing.
//!
//! [`Session`]: crate::session::Session

mod app;
mod components;
mod screens;
mod state;

pub use app::{launch_gui, PreferenceCardApp};
