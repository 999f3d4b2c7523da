//! Pixel dimensions and aspect-ratio fitting

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Width and height in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    pub width: u32,
    pub height: u32,
}

impl Dimension {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Error returned when a `WIDTHxHEIGHT` string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid dimension `{0}`, expected WIDTHxHEIGHT (e.g. 64x48)")]
pub struct ParseDimensionError(String);

impl FromStr for Dimension {
    type Err = ParseDimensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseDimensionError(s.to_string());
        let (width, height) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let width = width.trim().parse().map_err(|_| invalid())?;
        let height = height.trim().parse().map_err(|_| invalid())?;
        Ok(Self::new(width, height))
    }
}

/// Scale `source` to the largest size that fits inside `target` while
/// keeping its aspect ratio
///
/// Both sides are truncated towards zero, so the result never exceeds the
/// box. Returns `None` when the source has no usable extent or the fitted
/// size truncates to zero pixels on either side.
pub fn aspect_fit(source_width: f64, source_height: f64, target: Dimension) -> Option<Dimension> {
    let usable = |v: f64| v.is_finite() && v > 0.0;
    if !usable(source_width) || !usable(source_height) {
        return None;
    }

    let ratio = f64::min(
        f64::from(target.width) / source_width,
        f64::from(target.height) / source_height,
    );

    let width = (source_width * ratio).floor() as u32;
    let height = (source_height * ratio).floor() as u32;

    (width > 0 && height > 0).then_some(Dimension::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_wide_source() {
        let fitted = aspect_fit(100.0, 50.0, Dimension::new(200, 200));
        assert_eq!(fitted, Some(Dimension::new(200, 100)));
    }

    #[test]
    fn test_fit_tall_source() {
        let fitted = aspect_fit(50.0, 100.0, Dimension::new(200, 200));
        assert_eq!(fitted, Some(Dimension::new(100, 200)));
    }

    #[test]
    fn test_fit_shrinks_and_truncates() {
        // ratio = min(10/30, 10/20) = 1/3, 20/3 = 6.67 truncates to 6
        let fitted = aspect_fit(30.0, 20.0, Dimension::new(10, 10));
        assert_eq!(fitted, Some(Dimension::new(10, 6)));
    }

    #[test]
    fn test_fit_never_exceeds_box() {
        let target = Dimension::new(73, 41);
        for (w, h) in [(1.0, 1.0), (3.0, 7.0), (17.5, 2.25), (640.0, 480.0), (0.5, 900.0)] {
            if let Some(fitted) = aspect_fit(w, h, target) {
                assert!(fitted.width <= target.width, "{w}x{h}");
                assert!(fitted.height <= target.height, "{w}x{h}");
            }
        }
    }

    #[test]
    fn test_fit_rejects_zero_extent() {
        assert_eq!(aspect_fit(0.0, 50.0, Dimension::new(200, 200)), None);
        assert_eq!(aspect_fit(50.0, 0.0, Dimension::new(200, 200)), None);
        assert_eq!(aspect_fit(-1.0, 50.0, Dimension::new(200, 200)), None);
        assert_eq!(aspect_fit(f64::NAN, 50.0, Dimension::new(200, 200)), None);
    }

    #[test]
    fn test_fit_rejects_empty_result() {
        assert_eq!(aspect_fit(100.0, 50.0, Dimension::new(0, 200)), None);
        // 1000x1 into 10x10 gives a height of 0.01
        assert_eq!(aspect_fit(1000.0, 1.0, Dimension::new(10, 10)), None);
    }

    #[test]
    fn test_parse_dimension() {
        assert_eq!("64x48".parse(), Ok(Dimension::new(64, 48)));
        assert_eq!(" 10 X 20 ".parse(), Ok(Dimension::new(10, 20)));
        assert!("64".parse::<Dimension>().is_err());
        assert!("axb".parse::<Dimension>().is_err());
        assert!("-1x5".parse::<Dimension>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        let dim = Dimension::new(72, 36);
        assert_eq!(dim.to_string().parse(), Ok(dim));
    }
}
