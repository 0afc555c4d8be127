use crate::foundation::core::{Point, SurfaceSize, Viewport};
use crate::foundation::error::{FxError, FxResult};
use crate::motion::hover::HoverParams;
use crate::motion::spring::{Spring, SpringParams};
use crate::render::line::{WaveShape, column_path};
use crate::render::surface::{DrawSurface, LINE_COLOR, StrokeStyle};
use crate::schedule::frame::{FrameRequest, FrameScheduler};
use std::f64::consts::PI;

/// Pointer position before the first pointer event, far enough out that no force applies.
pub const OFFSCREEN_POINTER: Point = Point::new(-1000.0, -1000.0);

/// Straight column that slides toward the pointer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnConfig {
    pub spring: SpringParams,
    pub hover: HoverParams,
    pub stroke: StrokeStyle,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            spring: SpringParams::default(),
            hover: HoverParams::default(),
            stroke: StrokeStyle {
                color: LINE_COLOR,
                width: 2.5,
            },
        }
    }
}

/// Vertical sine wave whose phase is driven by the spring.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WaveConfig {
    pub spring: SpringParams,
    pub hover: HoverParams,
    pub stroke: StrokeStyle,
    /// Peak horizontal swing of the wave in px.
    pub amplitude: f64,
    /// Radians per px along the line.
    pub frequency: f64,
    /// Vertical distance between polyline samples in px.
    pub sample_step: f64,
    /// Fixed backing width of the wave's surface in px.
    pub surface_width: u32,
    /// Radians of phase per px of spring offset. Defaults to `4π / max_distortion`.
    pub phase_scale: Option<f64>,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            spring: SpringParams::default(),
            hover: HoverParams::default(),
            stroke: StrokeStyle {
                color: LINE_COLOR,
                width: 3.0,
            },
            amplitude: 60.0,
            frequency: 0.012,
            sample_step: 4.0,
            surface_width: 80,
            phase_scale: None,
        }
    }
}

impl WaveConfig {
    /// Phase scale in effect, resolving the default.
    pub fn resolved_phase_scale(&self) -> f64 {
        match self.phase_scale {
            Some(s) => s,
            None if self.hover.max_distortion != 0.0 => 4.0 * PI / self.hover.max_distortion,
            None => 0.0,
        }
    }
}

/// Which line an animator draws, with its constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineEffect {
    /// See [`ColumnConfig`].
    Column(ColumnConfig),
    /// See [`WaveConfig`].
    Wave(WaveConfig),
}

impl LineEffect {
    fn spring(&self) -> &SpringParams {
        match self {
            Self::Column(c) => &c.spring,
            Self::Wave(w) => &w.spring,
        }
    }

    fn hover(&self) -> &HoverParams {
        match self {
            Self::Column(c) => &c.hover,
            Self::Wave(w) => &w.hover,
        }
    }

    fn stroke(&self) -> &StrokeStyle {
        match self {
            Self::Column(c) => &c.stroke,
            Self::Wave(w) => &w.stroke,
        }
    }

    /// Check every constant before an animator is built from it.
    pub fn validate(&self) -> FxResult<()> {
        self.spring().validate()?;
        self.hover().validate()?;
        let stroke = self.stroke();
        if !(stroke.width.is_finite() && stroke.width > 0.0) {
            return Err(FxError::validation(format!(
                "stroke width must be finite and > 0, got {}",
                stroke.width
            )));
        }
        if let Self::Wave(w) = self {
            if !(w.sample_step.is_finite() && w.sample_step > 0.0) {
                return Err(FxError::validation("wave sample_step must be finite and > 0"));
            }
            if w.surface_width == 0 {
                return Err(FxError::validation("wave surface_width must be > 0"));
            }
            let scale = w.resolved_phase_scale();
            if !(w.amplitude.is_finite() && w.frequency.is_finite() && scale.is_finite()) {
                return Err(FxError::validation(
                    "wave amplitude, frequency and phase_scale must be finite",
                ));
            }
        }
        Ok(())
    }

    /// Backing buffer size for a surface in `viewport`.
    pub fn surface_size(&self, viewport: Viewport) -> SurfaceSize {
        match self {
            Self::Column(_) => SurfaceSize {
                width: viewport.width,
                height: viewport.height,
            },
            Self::Wave(w) => SurfaceSize {
                width: w.surface_width,
                height: viewport.height,
            },
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Column(_) => "column",
            Self::Wave(_) => "wave",
        }
    }
}

/// A spring-animated line bound to one drawing surface.
///
/// Mounting draws the first frame immediately and arms the frame loop; every frame callback
/// steps the spring exactly once, redraws, and re-arms. The loop only stops on
/// [`LineAnimator::unmount`]. Without a surface the animator stays inert.
#[derive(Debug)]
pub struct LineAnimator<S> {
    effect: LineEffect,
    spring: Spring,
    pointer: Point,
    viewport: Viewport,
    surface: Option<S>,
    pending: Option<FrameRequest>,
    frames: u64,
}

impl<S: DrawSurface> LineAnimator<S> {
    pub fn mount(
        effect: LineEffect,
        viewport: Viewport,
        surface: Option<S>,
        sched: &mut dyn FrameScheduler,
    ) -> FxResult<Self> {
        effect.validate()?;
        let mut out = Self {
            effect,
            spring: Spring::new(),
            pointer: OFFSCREEN_POINTER,
            viewport,
            surface,
            pending: None,
            frames: 0,
        };

        match out.surface.as_mut() {
            Some(surface) => surface.resize(effect.surface_size(viewport))?,
            None => {
                tracing::debug!(effect = effect.name(), "no drawing surface, animator inert");
                return Ok(out);
            }
        }
        tracing::debug!(
            effect = effect.name(),
            width = viewport.width,
            height = viewport.height,
            "line animator mounted"
        );

        out.render_frame();
        out.pending = Some(sched.request_frame());
        Ok(out)
    }

    /// Record the latest pointer position in viewport coordinates.
    pub fn pointer_moved(&mut self, p: Point) {
        if self.is_mounted() {
            self.pointer = p;
        }
    }

    /// Match the surface to a new viewport. Spring state is kept.
    pub fn resized(&mut self, viewport: Viewport) -> FxResult<()> {
        let size = self.effect.surface_size(viewport);
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };
        surface.resize(size)?;
        self.viewport = viewport;
        tracing::debug!(width = size.width, height = size.height, "line surface resized");
        Ok(())
    }

    /// Frame callback. Returns `true` when this call drew a frame.
    ///
    /// Callbacks for requests other than the current one (stale, or after unmount) are ignored.
    pub fn on_frame(&mut self, req: FrameRequest, sched: &mut dyn FrameScheduler) -> bool {
        if self.surface.is_none() || self.pending != Some(req) {
            return false;
        }
        self.render_frame();
        self.pending = Some(sched.request_frame());
        true
    }

    /// Stop the frame loop and hand the surface back. Later events and frames are ignored.
    pub fn unmount(&mut self, sched: &mut dyn FrameScheduler) -> Option<S> {
        if let Some(req) = self.pending.take() {
            sched.cancel_frame(req);
        }
        let surface = self.surface.take();
        if surface.is_some() {
            tracing::debug!(
                effect = self.effect.name(),
                frames = self.frames,
                "line animator unmounted"
            );
        }
        surface
    }

    fn render_frame(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        let dx = self.pointer.x - self.viewport.center_x();
        let target = self.effect.hover().target(dx);
        let offset = self.spring.step(target, self.effect.spring());
        self.frames += 1;

        let size = surface.size();
        let height = f64::from(size.height);
        let path = match &self.effect {
            LineEffect::Column(_) => column_path(size.center_x() + offset, height),
            LineEffect::Wave(w) => WaveShape {
                center_x: size.center_x(),
                amplitude: w.amplitude,
                frequency: w.frequency,
                step: w.sample_step,
            }
            .path(height, offset * w.resolved_phase_scale()),
        };

        surface.clear();
        surface.stroke_path(&path, self.effect.stroke());
        surface.present();
        tracing::trace!(pull = target, offset, frame = self.frames, "line frame");
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    pub fn effect(&self) -> &LineEffect {
        &self.effect
    }

    pub fn spring(&self) -> &Spring {
        &self.spring
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Request the animator is waiting on, if any.
    pub fn pending_request(&self) -> Option<FrameRequest> {
        self.pending
    }

    /// Frames drawn since mount.
    pub fn frames_drawn(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/animator.rs"]
mod tests;
