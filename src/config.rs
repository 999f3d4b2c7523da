//! Configuration loading and management

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::raster::Dimension;

/// Where input events come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Platform event tap (macOS only)
    Native,
    /// Newline-delimited JSON on stdin
    Stdin,
}

impl InputKind {
    fn platform_default() -> Self {
        if cfg!(target_os = "macos") {
            InputKind::Native
        } else {
            InputKind::Stdin
        }
    }
}

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the `key/` and `mouse/` SVG icons
    pub resource_dir: PathBuf,

    /// Bounding box for keyboard icons
    pub key_size: Dimension,

    /// Bounding box for mouse icons
    pub mouse_size: Dimension,

    pub input: InputKind,

    /// Write a PNG of every presented frame here, when set
    pub snapshot_dir: Option<PathBuf>,

    /// Load system fonts so icon text is drawn
    pub system_fonts: bool,
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from any variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let resource_dir = lookup("KMCASTER_RESOURCES")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("resources"));

        let key_size = parse_size(&lookup, "KMCASTER_KEY_SIZE", Dimension::new(72, 72))?;
        let mouse_size = parse_size(&lookup, "KMCASTER_MOUSE_SIZE", Dimension::new(48, 72))?;

        let input = match lookup("KMCASTER_INPUT").as_deref().map(str::to_ascii_lowercase) {
            None => InputKind::platform_default(),
            Some(kind) => match kind.as_str() {
                "native" => InputKind::Native,
                "stdin" => InputKind::Stdin,
                other => bail!("KMCASTER_INPUT must be `native` or `stdin`, got `{other}`"),
            },
        };

        let snapshot_dir = lookup("KMCASTER_SNAPSHOT_DIR")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        let system_fonts = match lookup("KMCASTER_SYSTEM_FONTS").as_deref() {
            None | Some("1" | "true" | "yes" | "on") => true,
            Some("0" | "false" | "no" | "off") => false,
            Some(other) => bail!("KMCASTER_SYSTEM_FONTS must be a boolean, got `{other}`"),
        };

        Ok(Self {
            resource_dir,
            key_size,
            mouse_size,
            input,
            snapshot_dir,
            system_fonts,
        })
    }

    /// Ensure the snapshot directory exists
    pub fn ensure_dirs(&self) -> Result<()> {
        if let Some(dir) = &self.snapshot_dir {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create snapshot directory {}", dir.display()))?;
        }
        Ok(())
    }
}

fn parse_size(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: Dimension,
) -> Result<Dimension> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value.parse().with_context(|| format!("invalid {name}")),
    }
}
