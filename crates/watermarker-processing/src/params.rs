//! Request parameters.
//!
//! [`WatermarkParams`] holds the raw, optional form fields exactly as the
//! client sent them. [`WatermarkParams::validate`] turns them into a
//! [`PlacementConfig`] with every default filled in.

use crate::compression::OutputFormat;
use crate::error::WatermarkError;
use crate::image::anchor::Anchor;

pub const DEFAULT_SIZE_PERCENT: f64 = 75.0;
pub const DEFAULT_PADDING: u32 = 10;
pub const DEFAULT_OPACITY_PERCENT: f64 = 75.0;
pub const DEFAULT_QUALITY: u32 = 100;
/// Largest accepted `blur` radius, in pixels
pub const MAX_BLUR_RADIUS: f64 = 100.0;

/// Validated placement and output settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementConfig {
    /// Fraction of the base the watermark may occupy, in (0, 1]
    pub size_ratio: f64,
    pub anchor: Anchor,
    pub padding: u32,
    /// Watermark opacity in [0, 1]
    pub opacity: f32,
    pub blur_radius: Option<f32>,
    /// Encoder quality in 1..=100
    pub quality: u32,
    pub output_format: OutputFormat,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            size_ratio: DEFAULT_SIZE_PERCENT / 100.0,
            anchor: Anchor::default(),
            padding: DEFAULT_PADDING,
            opacity: (DEFAULT_OPACITY_PERCENT / 100.0) as f32,
            blur_radius: None,
            quality: DEFAULT_QUALITY,
            output_format: OutputFormat::default(),
        }
    }
}

/// Raw form fields. Blank values count as absent.
#[derive(Debug, Clone, Default)]
pub struct WatermarkParams {
    pub size: Option<String>,
    pub position: Option<String>,
    pub padding: Option<String>,
    pub opacity: Option<String>,
    pub blur: Option<String>,
    pub quality: Option<String>,
    pub format: Option<String>,
}

impl WatermarkParams {
    /// Assign a form field by name. Returns `false` for unknown names.
    pub fn set(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "size" => &mut self.size,
            "position" => &mut self.position,
            "padding" => &mut self.padding,
            "opacity" => &mut self.opacity,
            "blur" => &mut self.blur,
            "quality" => &mut self.quality,
            "format" => &mut self.format,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    pub fn validate(&self) -> Result<PlacementConfig, WatermarkError> {
        let mut config = PlacementConfig::default();

        if let Some(size) = present(&self.size) {
            let percent = parse_number("size", size)?;
            if !(1.0..=100.0).contains(&percent) {
                return Err(WatermarkError::InvalidConfig(format!(
                    "size must be between 1 and 100, got {}",
                    size
                )));
            }
            config.size_ratio = percent / 100.0;
        }

        if let Some(position) = present(&self.position) {
            config.anchor = Anchor::parse(position);
        }

        if let Some(padding) = present(&self.padding) {
            config.padding = padding.parse::<u32>().map_err(|_| {
                WatermarkError::InvalidConfig(format!(
                    "padding must be a non-negative integer, got {}",
                    padding
                ))
            })?;
        }

        if let Some(opacity) = present(&self.opacity) {
            let percent = parse_number("opacity", opacity)?;
            if !(0.0..=100.0).contains(&percent) {
                return Err(WatermarkError::InvalidConfig(format!(
                    "opacity must be between 0 and 100, got {}",
                    opacity
                )));
            }
            config.opacity = (percent / 100.0) as f32;
        }

        if let Some(blur) = present(&self.blur) {
            let radius = parse_number("blur", blur)?;
            if !(0.0..=MAX_BLUR_RADIUS).contains(&radius) {
                return Err(WatermarkError::InvalidConfig(format!(
                    "blur must be between 0 and {}, got {}",
                    MAX_BLUR_RADIUS, blur
                )));
            }
            config.blur_radius = (radius > 0.0).then_some(radius as f32);
        }

        if let Some(quality) = present(&self.quality) {
            let value = quality.parse::<u32>().map_err(|_| {
                WatermarkError::InvalidConfig(format!(
                    "quality must be an integer between 1 and 100, got {}",
                    quality
                ))
            })?;
            if !(1..=100).contains(&value) {
                return Err(WatermarkError::InvalidConfig(format!(
                    "quality must be between 1 and 100, got {}",
                    value
                )));
            }
            config.quality = value;
        }

        if let Some(format) = present(&self.format) {
            config.output_format = OutputFormat::parse(format)?;
        }

        Ok(config)
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_number(field: &str, value: &str) -> Result<f64, WatermarkError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            WatermarkError::InvalidConfig(format!("{} must be a number, got {}", field, value))
        })
}
