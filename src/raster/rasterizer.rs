//! SVG rasterizer with a per-instance document cache

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg;
use tracing::{debug, info};

use super::error::RasterizationError;
use super::fit::{aspect_fit, Dimension};

/// Fixed rendering quality policy
///
/// The overlay is small and always on screen, so crispness wins over
/// speed: anti-aliased geometry with pure strokes, anti-aliased text with
/// fractional glyph metrics, and high-quality (bicubic) sampling for any
/// embedded raster images. The renderer never dithers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderQuality {
    shape: usvg::ShapeRendering,
    text: usvg::TextRendering,
    image: usvg::ImageRendering,
}

impl RenderQuality {
    /// The only policy the overlay renders with
    pub const HIGH: RenderQuality = RenderQuality {
        shape: usvg::ShapeRendering::GeometricPrecision,
        text: usvg::TextRendering::GeometricPrecision,
        image: usvg::ImageRendering::OptimizeQuality,
    };

    fn apply(&self, options: &mut usvg::Options<'_>) {
        options.shape_rendering = self.shape;
        options.text_rendering = self.text;
        options.image_rendering = self.image;
    }
}

impl Default for RenderQuality {
    fn default() -> Self {
        Self::HIGH
    }
}

/// A bitmap rendered from a vector resource
#[derive(Debug, Clone)]
pub struct RasterImage {
    resource: String,
    requested: Dimension,
    pixmap: Pixmap,
}

impl RasterImage {
    /// Resource path the image was rendered from
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Bounding box the image was fitted into
    pub fn requested(&self) -> Dimension {
        self.requested
    }

    /// Actual pixel size, never larger than [`RasterImage::requested`]
    pub fn size(&self) -> Dimension {
        Dimension::new(self.pixmap.width(), self.pixmap.height())
    }

    /// Premultiplied RGBA bytes, row-major
    pub fn premultiplied(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Straight-alpha RGBA bytes, row-major
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|pixel| {
                let c = pixel.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    /// Encode the bitmap as a PNG file
    pub fn encode_png(&self) -> Result<Vec<u8>, RasterizationError> {
        self.pixmap
            .encode_png()
            .map_err(|e| RasterizationError::Encode {
                resource: self.resource.clone(),
                message: e.to_string(),
            })
    }
}

/// Renders SVG resources found below a resource directory
///
/// Parsed documents are kept for the life of the rasterizer, so a second
/// call for the same resource only pays for rendering. Not meant to be
/// shared between threads.
pub struct Rasterizer {
    root: PathBuf,
    options: usvg::Options<'static>,
    /// Keyed by the path relative to `root`
    documents: HashMap<PathBuf, usvg::Tree>,
}

impl Rasterizer {
    /// Create a rasterizer that resolves resource paths below `root`
    pub fn new(root: impl Into<PathBuf>, quality: RenderQuality) -> Self {
        let root = root.into();
        let mut options = usvg::Options {
            resources_dir: Some(root.clone()),
            ..usvg::Options::default()
        };
        quality.apply(&mut options);

        Self {
            root,
            options,
            documents: HashMap::new(),
        }
    }

    /// Load the system fonts so `<text>` elements can be drawn
    pub fn with_system_fonts(mut self) -> Self {
        self.options.fontdb_mut().load_system_fonts();
        info!(faces = self.options.fontdb.len(), "system fonts loaded");
        self
    }

    /// Directory resource paths are resolved against
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of parsed documents held in the cache
    pub fn cached_documents(&self) -> usize {
        self.documents.len()
    }

    /// Drop every cached document
    pub fn clear_cache(&mut self) {
        self.documents.clear();
    }

    /// Render `resource` into a transparent bitmap that fits inside `target`
    ///
    /// The document is scaled by a single transform before rendering, never
    /// rendered at its own size and resampled afterwards.
    pub fn rasterize(
        &mut self,
        resource: &str,
        target: Dimension,
    ) -> Result<RasterImage, RasterizationError> {
        let relative = resolve(resource)?;
        let tree = match self.documents.entry(relative) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let path = self.root.join(entry.key());
                let tree = load_document(&path, &self.options, resource)?;
                entry.insert(tree)
            }
        };

        let source = tree.size();
        let (width, height) = (source.width(), source.height());

        let zero_extent = || RasterizationError::ZeroExtent {
            resource: resource.to_string(),
            width,
            height,
            target,
        };

        let scaled =
            aspect_fit(f64::from(width), f64::from(height), target).ok_or_else(zero_extent)?;
        let mut pixmap = Pixmap::new(scaled.width, scaled.height).ok_or_else(|| {
            RasterizationError::Allocation {
                resource: resource.to_string(),
                size: scaled,
            }
        })?;

        let transform = Transform::from_scale(
            scaled.width as f32 / width,
            scaled.height as f32 / height,
        );
        resvg::render(tree, transform, &mut pixmap.as_mut());

        debug!(resource, %target, %scaled, "rasterized vector resource");

        Ok(RasterImage {
            resource: resource.to_string(),
            requested: target,
            pixmap,
        })
    }
}

/// Normalize a resource path such as `/key/ctrl-pressed.svg` to a path
/// relative to the resource directory
fn resolve(resource: &str) -> Result<PathBuf, RasterizationError> {
    let relative = Path::new(resource.trim_start_matches('/'));
    let contained = relative
        .components()
        .all(|component| matches!(component, Component::Normal(_)));

    if relative.as_os_str().is_empty() || !contained {
        return Err(RasterizationError::InvalidPath {
            resource: resource.to_string(),
        });
    }

    Ok(relative.to_path_buf())
}

/// Read and parse a document; gzip-compressed SVG is accepted as well
fn load_document(
    path: &Path,
    options: &usvg::Options<'_>,
    resource: &str,
) -> Result<usvg::Tree, RasterizationError> {
    let data = std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            RasterizationError::NotFound {
                resource: resource.to_string(),
                path: path.to_path_buf(),
            }
        } else {
            RasterizationError::Read {
                resource: resource.to_string(),
                source,
            }
        }
    })?;

    let tree = usvg::Tree::from_data(&data, options).map_err(|source| RasterizationError::Parse {
        resource: resource.to_string(),
        source,
    })?;

    info!(
        resource,
        width = tree.size().width(),
        height = tree.size().height(),
        "loaded vector document"
    );

    Ok(tree)
}
