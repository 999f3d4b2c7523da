//! Vector icon rasterization
//!
//! Turns SVG resources into bitmaps that fit a bounding box without
//! distorting the aspect ratio. Parsed documents are cached per
//! [`Rasterizer`]; bitmaps are not.

mod error;
mod fit;
mod rasterizer;

pub use error::RasterizationError;
pub use fit::{aspect_fit, Dimension, ParseDimensionError};
pub use rasterizer::{RasterImage, Rasterizer, RenderQuality};
