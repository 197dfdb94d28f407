//! Wordpic API
//!
//! HTTP surface for the upload-and-transform pipeline: route handlers,
//! upload orchestration, application state, and server setup.

// Module declarations
mod handlers;

// Public modules
pub mod error;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;

// Re-exports
pub use error::ErrorResponse;
pub use state::AppState;
