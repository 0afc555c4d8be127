use crate::foundation::color::Rgba8;
use crate::foundation::core::{BezPath, SurfaceSize};
use crate::foundation::error::FxResult;

/// Stroke paint and width for a line effect.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StrokeStyle {
    /// Stroke color.
    pub color: Rgba8,
    /// Stroke width in pixels.
    pub width: f64,
}

/// Brand orange shared by the line effects.
pub const LINE_COLOR: Rgba8 = Rgba8::rgb(0xFF, 0x61, 0x00);

/// A 2D drawing target owned by one effect.
///
/// A frame is `clear`, zero or more `stroke_path` calls, then `present`.
pub trait DrawSurface {
    /// Backing buffer size in pixels.
    fn size(&self) -> SurfaceSize;
    /// Reallocate the backing buffer if `size` differs from the current one.
    fn resize(&mut self, size: SurfaceSize) -> FxResult<()>;
    /// Start a new frame with an empty surface.
    fn clear(&mut self);
    /// Stroke `path` (surface-local coordinates) with `style`.
    fn stroke_path(&mut self, path: &BezPath, style: &StrokeStyle);
    /// Finish the frame.
    fn present(&mut self) {}
}

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copy of the pixel data with straight (non-premultiplied) alpha.
    pub fn to_straight_rgba(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if !self.premultiplied {
            return out;
        }
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// Drawing call captured by [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    /// `clear`
    Clear,
    /// `stroke_path`
    Stroke {
        /// Path as stroked.
        path: BezPath,
        /// Style as stroked.
        style: StrokeStyle,
    },
    /// `present`
    Present,
}

/// Surface that records calls instead of rasterizing, for tests and debugging.
#[derive(Debug)]
pub struct RecordingSurface {
    size: SurfaceSize,
    calls: Vec<DrawCall>,
    resizes: usize,
}

impl RecordingSurface {
    /// Create a recording surface of the given size.
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            calls: Vec::new(),
            resizes: 0,
        }
    }

    /// Every call since creation, in order.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Paths stroked since the most recent `clear`.
    pub fn last_frame_strokes(&self) -> Vec<&BezPath> {
        let start = self
            .calls
            .iter()
            .rposition(|c| *c == DrawCall::Clear)
            .map_or(0, |i| i + 1);
        self.calls[start..]
            .iter()
            .filter_map(|c| match c {
                DrawCall::Stroke { path, .. } => Some(path),
                _ => None,
            })
            .collect()
    }

    /// Number of `present` calls, i.e. completed frames.
    pub fn presented_frames(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Present))
            .count()
    }

    /// Number of resizes that changed the size.
    pub fn resizes(&self) -> usize {
        self.resizes
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) -> FxResult<()> {
        if size != self.size {
            self.size = size;
            self.resizes += 1;
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn stroke_path(&mut self, path: &BezPath, style: &StrokeStyle) {
        self.calls.push(DrawCall::Stroke {
            path: path.clone(),
            style: *style,
        });
    }

    fn present(&mut self) {
        self.calls.push(DrawCall::Present);
    }
}
