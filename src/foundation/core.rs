use crate::foundation::error::{FxError, FxResult};

pub use kurbo::{BezPath, Point};

/// Monotonic 0-based index of a host display refresh.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Index of the frame after this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Host viewport dimensions in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Create a validated viewport with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> FxResult<Self> {
        if width == 0 || height == 0 {
            return Err(FxError::validation(format!(
                "viewport must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Horizontal center line in viewport coordinates.
    pub fn center_x(self) -> f64 {
        f64::from(self.width) / 2.0
    }
}

/// Backing pixel buffer dimensions of a drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl SurfaceSize {
    /// Horizontal center of the surface in surface-local coordinates.
    pub fn center_x(self) -> f64 {
        f64::from(self.width) / 2.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
