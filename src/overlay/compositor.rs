//! Compositors receive the bitmap to show for a switch
//!
//! The overlay window itself lives outside this daemon; a compositor is
//! the hand-off point. Two are provided: one that only logs, and one that
//! writes each frame to disk as a PNG.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::raster::RasterImage;
use crate::switch::HardwareSwitch;

/// Receives ready-to-composite bitmaps, already at their final size
pub trait Compositor {
    fn present(
        &mut self,
        switch: HardwareSwitch,
        image: &RasterImage,
        label: Option<&str>,
    ) -> Result<()>;
}

/// Logs every frame instead of drawing it
#[derive(Debug, Default)]
pub struct LogCompositor;

impl Compositor for LogCompositor {
    fn present(
        &mut self,
        switch: HardwareSwitch,
        image: &RasterImage,
        label: Option<&str>,
    ) -> Result<()> {
        info!(
            %switch,
            icon = image.resource(),
            size = %image.size(),
            label,
            "frame presented"
        );
        Ok(())
    }
}

/// Writes each frame as `NNNNNN-<switch>.png` into a directory
#[derive(Debug)]
pub struct SnapshotCompositor {
    dir: PathBuf,
    frame: u64,
}

impl SnapshotCompositor {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            frame: 0,
        }
    }
}

impl Compositor for SnapshotCompositor {
    fn present(
        &mut self,
        switch: HardwareSwitch,
        image: &RasterImage,
        _label: Option<&str>,
    ) -> Result<()> {
        let name = format!("{:06}-{}.png", self.frame, switch.name().replace(' ', "-"));
        let path = self.dir.join(name);

        let png = image.encode_png()?;
        std::fs::write(&path, png)
            .with_context(|| format!("failed to write snapshot {}", path.display()))?;

        debug!(path = %path.display(), "snapshot written");
        self.frame += 1;
        Ok(())
    }
}
