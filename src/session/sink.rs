use crate::foundation::core::FrameIndex;
use crate::foundation::error::{FxError, FxResult};
use crate::render::surface::FrameRGBA;
use std::path::PathBuf;

/// Sink contract for consuming rendered frames in order.
///
/// `push_frame` is called with strictly increasing `FrameIndex` values.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, width: u32, height: u32) -> FxResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> FxResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> FxResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    size: Option<(u32, u32)>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size captured in `begin`, if any.
    pub fn size(&self) -> Option<(u32, u32)> {
        self.size
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, width: u32, height: u32) -> FxResult<()> {
        self.size = Some((width, height));
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> FxResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> FxResult<()> {
        Ok(())
    }
}

/// Writes each frame as `frame_NNNNN.png` into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Paths written so far, in frame order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _width: u32, _height: u32) -> FxResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            FxError::render(format!(
                "failed to create output dir '{}': {e}",
                self.dir.display()
            ))
        })?;
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> FxResult<()> {
        let path = self.dir.join(format!("frame_{:05}.png", idx.0));
        image::save_buffer_with_format(
            &path,
            &frame.to_straight_rgba(),
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| FxError::render(format!("failed to write '{}': {e}", path.display())))?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> FxResult<()> {
        tracing::debug!(frames = self.written.len(), dir = %self.dir.display(), "png sequence done");
        Ok(())
    }
}
