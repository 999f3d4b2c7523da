//! kmcaster: key-cast overlay core
//!
//! Shows keyboard and mouse activity on screen for recordings and
//! presentations. This library holds:
//! - `switch`: classification of keys and buttons into hardware switches
//! - `raster`: aspect-preserving SVG rasterization for switch icons
//! - `state`: the per-switch display state driven by input events
//! - `overlay`: the icon cache and the hand-off to a compositor
//!
//! The `kmcaster` binary wires these to an input source.

pub mod config;
pub mod events;
pub mod input;
pub mod lifecycle;
pub mod overlay;
pub mod raster;
pub mod state;
pub mod switch;

pub use raster::{Dimension, RasterImage, RasterizationError, Rasterizer, RenderQuality};
pub use switch::{HardwareSwitch, Modifier, SwitchError};
