use crate::foundation::color::Rgba8;
use crate::foundation::core::{BezPath, SurfaceSize};
use crate::foundation::error::{FxError, FxResult};
use crate::render::surface::{DrawSurface, FrameRGBA, StrokeStyle};

/// Options for [`CpuSurface`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuSurfaceOpts {
    pub(crate) clear_rgba: Option<Rgba8>,
}

impl CpuSurfaceOpts {
    /// Return options with a background painted under every frame.
    ///
    /// Without one, cleared pixels are fully transparent.
    pub fn with_clear_rgba(mut self, clear: Option<Rgba8>) -> Self {
        self.clear_rgba = clear;
        self
    }
}

/// Drawing surface rasterized on the CPU by `vello_cpu`.
pub struct CpuSurface {
    width: u16,
    height: u16,
    opts: CpuSurfaceOpts,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("opts", &self.opts)
            .finish_non_exhaustive()
    }
}

impl CpuSurface {
    /// Allocate a surface; both dimensions must be in `1..=u16::MAX`.
    pub fn new(size: SurfaceSize, opts: CpuSurfaceOpts) -> FxResult<Self> {
        let (width, height) = checked_dims(size)?;
        let mut out = Self {
            width,
            height,
            opts,
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
        };
        out.clear();
        Ok(out)
    }

    /// Read back the most recently presented frame.
    pub fn frame(&self) -> FrameRGBA {
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

impl DrawSurface for CpuSurface {
    fn size(&self) -> SurfaceSize {
        SurfaceSize {
            width: u32::from(self.width),
            height: u32::from(self.height),
        }
    }

    fn resize(&mut self, size: SurfaceSize) -> FxResult<()> {
        let (width, height) = checked_dims(size)?;
        if width == self.width && height == self.height {
            return Ok(());
        }
        tracing::debug!(width, height, "cpu surface resized");
        self.width = width;
        self.height = height;
        self.ctx = vello_cpu::RenderContext::new(width, height);
        self.pixmap = vello_cpu::Pixmap::new(width, height);
        self.clear();
        Ok(())
    }

    fn clear(&mut self) {
        self.ctx.reset();
        // `render_to_pixmap` overwrites every pixel, so the background is painted as scene content.
        if let Some(c) = self.opts.clear_rgba {
            self.ctx
                .set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
            self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(self.width),
                f64::from(self.height),
            ));
        }
    }

    fn stroke_path(&mut self, path: &BezPath, style: &StrokeStyle) {
        let c = style.color;
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
        self.ctx
            .set_stroke(vello_cpu::kurbo::Stroke::new(style.width));
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }

    fn present(&mut self) {
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
    }
}

fn checked_dims(size: SurfaceSize) -> FxResult<(u16, u16)> {
    let width: u16 = size
        .width
        .try_into()
        .map_err(|_| FxError::render("surface width exceeds u16"))?;
    let height: u16 = size
        .height
        .try_into()
        .map_err(|_| FxError::render("surface height exceeds u16"))?;
    if width == 0 || height == 0 {
        return Err(FxError::render(format!(
            "surface must be non-empty, got {width}x{height}"
        )));
    }
    Ok((width, height))
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
