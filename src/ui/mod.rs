//! GUI screens and application state.

pub mod app;
pub mod components;
pub mod otp_view;
pub mod sign_in;
pub mod staff_panel;

pub use app::App;
