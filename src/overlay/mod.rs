//! Overlay glue between switch events and the window compositor
//!
//! Icons for every switch state are rasterized once at startup; a
//! missing or broken icon stops the daemon before anything is shown.

mod compositor;
mod icons;

use anyhow::Result;
use tracing::warn;

use crate::events::SwitchEvent;

pub use compositor::{Compositor, LogCompositor, SnapshotCompositor};
pub use icons::IconSet;

/// Presents the icon matching each switch event
pub struct Overlay {
    icons: IconSet,
    compositor: Box<dyn Compositor + Send>,
}

impl Overlay {
    pub fn new(icons: IconSet, compositor: Box<dyn Compositor + Send>) -> Self {
        Self { icons, compositor }
    }

    /// Hand the icon for the switch's new state to the compositor
    pub fn apply(&mut self, event: &SwitchEvent) -> Result<()> {
        let switch = event.switch();
        match self.icons.get(switch, event.is_pressed()) {
            Some(image) => self.compositor.present(switch, image, event.label()),
            None => {
                warn!(%switch, "no icon loaded for switch");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::raster::{Dimension, RasterImage, Rasterizer, RenderQuality};
    use crate::switch::HardwareSwitch;

    pub(crate) use super::icons::tests::write_icons;

    pub(crate) type Presented = Arc<Mutex<Vec<(HardwareSwitch, String, Option<String>)>>>;

    /// Compositor that records what it was asked to present
    pub(crate) struct Recorder(pub(crate) Presented);

    impl Compositor for Recorder {
        fn present(
            &mut self,
            switch: HardwareSwitch,
            image: &RasterImage,
            label: Option<&str>,
        ) -> Result<()> {
            let mut presented = self.0.lock().unwrap();
            presented.push((switch, image.resource().to_string(), label.map(str::to_string)));
            Ok(())
        }
    }

    #[test]
    fn test_apply_presents_matching_icon() {
        let dir = tempfile::tempdir().unwrap();
        write_icons(dir.path());

        let mut rasterizer = Rasterizer::new(dir.path(), RenderQuality::HIGH);
        let icons = IconSet::load(&mut rasterizer, Dimension::new(32, 32), Dimension::new(16, 32))
            .unwrap();

        let presented = Presented::default();
        let mut overlay = Overlay::new(icons, Box::new(Recorder(Arc::clone(&presented))));

        overlay
            .apply(&SwitchEvent::Pressed {
                switch: HardwareSwitch::KeyRegular,
                label: Some("z".into()),
            })
            .unwrap();
        overlay
            .apply(&SwitchEvent::Released {
                switch: HardwareSwitch::MouseLr,
                label: None,
            })
            .unwrap();

        let presented = presented.lock().unwrap();
        assert_eq!(
            *presented,
            vec![
                (
                    HardwareSwitch::KeyRegular,
                    "/key/regular-pressed.svg".to_string(),
                    Some("z".to_string()),
                ),
                (HardwareSwitch::MouseLr, "/mouse/button-1-3-released.svg".to_string(), None),
            ]
        );
    }
}
