//! # chromastat Library
//!
//! This library exposes the chromastat modules for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod cli;
pub mod config;
pub mod error;
pub mod source;
pub mod store;

pub use error::AppError;

// Re-export chromastat_core for convenience
pub use chromastat_core;
