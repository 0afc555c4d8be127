use crate::contrast::foreground::{Foreground, pick_foreground};
use crate::foundation::color::Rgba8;
use crate::foundation::core::{Point, Viewport};
use crate::foundation::error::{FxError, FxResult};
use crate::schedule::frame::{FrameRequest, FrameScheduler};

/// Host query: background colors of the elements rendered at a point, nearest first.
pub trait BackgroundStack {
    /// `point` is in document coordinates.
    fn backgrounds_at(&self, point: Point) -> Vec<Rgba8>;
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamplerConfig {
    /// Distance below the top of the viewport at which the background is read, in px.
    pub offset_y: f64,
    /// Foreground reported before any opaque background has been seen.
    pub initial: Foreground,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            offset_y: 60.0,
            initial: Foreground::White,
        }
    }
}

impl SamplerConfig {
    pub fn validate(&self) -> FxResult<()> {
        if !self.offset_y.is_finite() {
            return Err(FxError::validation("sampler offset_y must be finite"));
        }
        Ok(())
    }
}

/// Result of one recomputation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleOutcome {
    /// Point that was queried, in document coordinates.
    pub point: Point,
    /// Background the decision came from; `None` when the stack had nothing opaque.
    pub background: Option<Rgba8>,
    /// Foreground after the recomputation.
    pub foreground: Foreground,
    /// Whether the foreground differs from before.
    pub changed: bool,
}

/// Scroll-driven black/white foreground picker.
///
/// Scroll events only mark the sampler dirty and request a frame; the recomputation happens in
/// the frame callback, so a burst of scrolls inside one frame costs one query against the
/// latest scroll offset.
#[derive(Debug)]
pub struct ContrastSampler {
    config: SamplerConfig,
    viewport: Viewport,
    scroll_y: f64,
    foreground: Foreground,
    pending: Option<FrameRequest>,
    mounted: bool,
    recomputes: u64,
}

impl ContrastSampler {
    /// Create the sampler and take the first sample synchronously.
    pub fn mount(
        config: SamplerConfig,
        viewport: Viewport,
        scroll_y: f64,
        stack: &dyn BackgroundStack,
    ) -> FxResult<Self> {
        config.validate()?;
        let mut out = Self {
            config,
            viewport,
            scroll_y,
            foreground: config.initial,
            pending: None,
            mounted: true,
            recomputes: 0,
        };
        let first = out.sample_now(stack);
        tracing::debug!(
            foreground = %first.foreground,
            scroll_y,
            "contrast sampler mounted"
        );
        Ok(out)
    }

    /// Scroll listener. Returns `true` if this event armed a new frame request.
    pub fn scrolled(&mut self, scroll_y: f64, sched: &mut dyn FrameScheduler) -> bool {
        if !self.mounted {
            return false;
        }
        self.scroll_y = scroll_y;

        if let Some(req) = self.pending {
            if sched.is_pending(req) {
                return false;
            }
            // The host dropped our frame without running it; re-arm instead of staying stuck.
            tracing::debug!(request = req.0, "pending sample frame was dropped, re-arming");
        }
        self.pending = Some(sched.request_frame());
        true
    }

    /// Track viewport changes; the sample point's x follows the viewport center.
    pub fn resized(&mut self, viewport: Viewport) {
        tracing::debug!(width = viewport.width, "contrast sampler resized");
        self.viewport = viewport;
    }

    /// Frame callback. Recomputes only for the request this sampler armed.
    pub fn on_frame(
        &mut self,
        req: FrameRequest,
        stack: &dyn BackgroundStack,
    ) -> Option<SampleOutcome> {
        if !self.mounted || self.pending != Some(req) {
            return None;
        }
        self.pending = None;
        Some(self.sample_now(stack))
    }

    /// Recompute immediately at the current scroll offset.
    #[tracing::instrument(level = "trace", skip(self, stack), fields(scroll_y = self.scroll_y))]
    pub fn sample_now(&mut self, stack: &dyn BackgroundStack) -> SampleOutcome {
        let point = self.sample_point();
        let before = self.foreground;
        let picked = pick_foreground(stack.backgrounds_at(point));
        if let Some((_, fg)) = picked {
            self.foreground = fg;
        }
        self.recomputes += 1;

        let outcome = SampleOutcome {
            point,
            background: picked.map(|(bg, _)| bg),
            foreground: self.foreground,
            changed: self.foreground != before,
        };
        if outcome.changed {
            tracing::debug!(foreground = %outcome.foreground, "foreground switched");
        }
        outcome
    }

    /// Detach from scroll events and drop any pending frame.
    pub fn unmount(&mut self, sched: &mut dyn FrameScheduler) {
        if let Some(req) = self.pending.take() {
            sched.cancel_frame(req);
        }
        if self.mounted {
            tracing::debug!(recomputes = self.recomputes, "contrast sampler unmounted");
        }
        self.mounted = false;
    }

    /// Viewport center, `offset_y` below the current scroll offset.
    pub fn sample_point(&self) -> Point {
        Point::new(self.viewport.center_x(), self.scroll_y + self.config.offset_y)
    }

    pub fn foreground(&self) -> Foreground {
        self.foreground
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn pending_request(&self) -> Option<FrameRequest> {
        self.pending
    }

    /// Recomputations since mount, including the initial one.
    pub fn recomputes(&self) -> u64 {
        self.recomputes
    }
}

#[cfg(test)]
#[path = "../../tests/unit/contrast/sampler.rs"]
mod tests;
