//! Image processing module
//!
//! This module provides the watermark pipeline stages:
//! - Decoding uploads (decode)
//! - Watermark sizing and placement (geometry, anchor)
//! - Blur, resize and blending (filters, resize, compositor)
//! - The end-to-end operation (watermark)

pub mod anchor;
pub mod compositor;
pub mod decode;
pub mod filters;
pub mod geometry;
pub mod resize;
pub mod watermark;

// Re-export commonly used types
pub use filters::ImageFilters;
pub use resize::ImageResize;
