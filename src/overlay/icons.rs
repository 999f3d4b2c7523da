//! Bitmap cache holding one icon per switch and state

use std::collections::HashMap;

use tracing::info;

use crate::raster::{Dimension, RasterImage, RasterizationError, Rasterizer};
use crate::switch::HardwareSwitch;

/// Rasterized icons keyed by switch and pressed state
pub struct IconSet {
    icons: HashMap<(HardwareSwitch, bool), RasterImage>,
}

impl IconSet {
    /// Resource path of a switch icon, e.g. `/mouse/button-1-pressed.svg`
    pub fn resource_path(switch: HardwareSwitch, pressed: bool) -> String {
        let device = if switch.is_mouse() { "mouse" } else { "key" };
        let slug = switch.name().replace(' ', "-");
        let state = if pressed { "pressed" } else { "released" };
        format!("/{device}/{slug}-{state}.svg")
    }

    /// Rasterize every icon, stopping at the first failure
    pub fn load(
        rasterizer: &mut Rasterizer,
        key_size: Dimension,
        mouse_size: Dimension,
    ) -> Result<Self, RasterizationError> {
        let mut icons = HashMap::new();

        for switch in HardwareSwitch::ALL {
            let size = if switch.is_mouse() { mouse_size } else { key_size };
            for pressed in [false, true] {
                let image = rasterizer.rasterize(&Self::resource_path(switch, pressed), size)?;
                icons.insert((switch, pressed), image);
            }
        }

        info!(
            icons = icons.len(),
            documents = rasterizer.cached_documents(),
            "icon set loaded"
        );

        Ok(Self { icons })
    }

    pub fn get(&self, switch: HardwareSwitch, pressed: bool) -> Option<&RasterImage> {
        self.icons.get(&(switch, pressed))
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}
