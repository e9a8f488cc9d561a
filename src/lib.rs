pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod mock;
pub mod models;
pub mod otp;
pub mod session;
pub mod table;
pub mod ui;

pub use error::{AppError, Result};
