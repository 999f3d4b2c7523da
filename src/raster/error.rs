//! Rasterization failures

use std::path::PathBuf;

use super::fit::Dimension;

/// Errors that can occur while turning a vector resource into a bitmap
#[derive(Debug, thiserror::Error)]
pub enum RasterizationError {
    #[error("vector resource `{resource}` not found at {}", .path.display())]
    NotFound { resource: String, path: PathBuf },

    #[error("vector resource path `{resource}` must stay inside the resource directory")]
    InvalidPath { resource: String },

    #[error("failed to read vector resource `{resource}`")]
    Read {
        resource: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse vector resource `{resource}`")]
    Parse {
        resource: String,
        #[source]
        source: resvg::usvg::Error,
    },

    #[error("vector resource `{resource}` ({width}x{height}) cannot be fitted into {target}")]
    ZeroExtent {
        resource: String,
        width: f32,
        height: f32,
        target: Dimension,
    },

    #[error("cannot allocate a {size} bitmap for vector resource `{resource}`")]
    Allocation { resource: String, size: Dimension },

    #[error("failed to encode `{resource}` as PNG: {message}")]
    Encode { resource: String, message: String },
}

impl RasterizationError {
    /// The resource path the failing call was made with
    pub fn resource(&self) -> &str {
        match self {
            RasterizationError::NotFound { resource, .. }
            | RasterizationError::InvalidPath { resource }
            | RasterizationError::Read { resource, .. }
            | RasterizationError::Parse { resource, .. }
            | RasterizationError::ZeroExtent { resource, .. }
            | RasterizationError::Allocation { resource, .. }
            | RasterizationError::Encode { resource, .. } => resource,
        }
    }

    /// Check if the resource is missing, as opposed to unreadable or malformed
    pub fn is_missing(&self) -> bool {
        matches!(self, RasterizationError::NotFound { .. })
    }
}
