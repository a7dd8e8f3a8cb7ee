//! Watermarker Processing Library
//!
//! Watermark placement and compositing: geometry, anchors, blending and
//! encoding, plus validation of the raw request parameters that drive them.

pub mod compression;
pub mod error;
pub mod image;
pub mod params;

pub use compression::{ImageEncoder, OutputFormat};
pub use error::WatermarkError;
pub use crate::image::anchor::{compute_offset, Anchor, Offset};
pub use crate::image::compositor::composite;
pub use crate::image::decode::{decode_image, open_image};
pub use crate::image::geometry::{compute_watermark_dimensions, Dimensions, ScaledSize};
pub use crate::image::watermark::{apply_watermark, WatermarkOutput};
pub use params::{PlacementConfig, WatermarkParams};
