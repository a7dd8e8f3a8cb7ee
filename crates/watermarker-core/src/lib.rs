//! Watermarker Core Library
//!
//! This crate provides the error types and configuration shared by the
//! watermarker components.

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::{BaseConfig, Config, LogFormat, WatermarkServiceConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
