//! Core types shared across the wordpic services: configuration, the
//! unified error taxonomy, and wire-facing models.

pub mod config;
pub mod error;
pub mod models;

pub use config::Config;
pub use error::{AppError, LogLevel};
