use crate::contrast::foreground::Foreground;
use crate::contrast::sampler::{BackgroundStack, ContrastSampler, SampleOutcome, SamplerConfig};
use crate::foundation::core::{FrameIndex, Point, Viewport};
use crate::foundation::error::{FxError, FxResult};
use crate::motion::animator::{LineAnimator, LineEffect};
use crate::render::surface::DrawSurface;
use crate::schedule::frame::FrameClock;

/// Input delivered by the host window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    /// Pointer moved to a viewport position.
    PointerMove(Point),
    /// Document scrolled to a vertical offset.
    Scroll(f64),
    /// Viewport changed size.
    Resize(Viewport),
}

/// What one frame did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepReport {
    pub frame: FrameIndex,
    /// The line animator drew on this frame.
    pub line_drawn: bool,
    /// The contrast sampler recomputed on this frame.
    pub sample: Option<SampleOutcome>,
}

/// Single-threaded host: owns the frame clock, routes events, and fires due frame callbacks.
///
/// Each effect is optional and independent; a stage may run either or both.
pub struct Stage<S, C> {
    clock: C,
    viewport: Viewport,
    scroll_y: f64,
    line: Option<LineAnimator<S>>,
    contrast: Option<(ContrastSampler, Box<dyn BackgroundStack>)>,
}

impl<S, C> Stage<S, C>
where
    S: DrawSurface,
    C: FrameClock,
{
    pub fn new(clock: C, viewport: Viewport) -> Self {
        Self {
            clock,
            viewport,
            scroll_y: 0.0,
            line: None,
            contrast: None,
        }
    }

    /// Mount a line animator on `surface`, replacing any previous one.
    pub fn mount_line(&mut self, effect: LineEffect, surface: Option<S>) -> FxResult<()> {
        self.unmount_line();
        let animator = LineAnimator::mount(effect, self.viewport, surface, &mut self.clock)?;
        self.line = Some(animator);
        Ok(())
    }

    /// Mount a contrast sampler over `stack`, replacing any previous one.
    pub fn mount_contrast(
        &mut self,
        config: SamplerConfig,
        stack: Box<dyn BackgroundStack>,
    ) -> FxResult<Foreground> {
        self.unmount_contrast();
        let sampler = ContrastSampler::mount(config, self.viewport, self.scroll_y, stack.as_ref())?;
        let fg = sampler.foreground();
        self.contrast = Some((sampler, stack));
        Ok(fg)
    }

    /// Unmount the line animator, returning its surface.
    pub fn unmount_line(&mut self) -> Option<S> {
        let mut animator = self.line.take()?;
        animator.unmount(&mut self.clock)
    }

    pub fn unmount_contrast(&mut self) {
        if let Some((mut sampler, _)) = self.contrast.take() {
            sampler.unmount(&mut self.clock);
        }
    }

    /// Deliver one host event to every mounted effect.
    pub fn dispatch(&mut self, event: HostEvent) -> FxResult<()> {
        match event {
            HostEvent::PointerMove(p) => {
                if let Some(line) = self.line.as_mut() {
                    line.pointer_moved(p);
                }
            }
            HostEvent::Scroll(y) => {
                if !y.is_finite() {
                    return Err(FxError::validation("scroll offset must be finite"));
                }
                self.scroll_y = y;
                if let Some((sampler, _)) = self.contrast.as_mut() {
                    sampler.scrolled(y, &mut self.clock);
                }
            }
            HostEvent::Resize(v) => {
                let v = Viewport::new(v.width, v.height)?;
                self.viewport = v;
                if let Some(line) = self.line.as_mut() {
                    line.resized(v)?;
                }
                if let Some((sampler, _)) = self.contrast.as_mut() {
                    sampler.resized(v);
                }
            }
        }
        Ok(())
    }

    /// Advance to the next frame and run the callbacks due on it.
    pub fn step(&mut self) -> StepReport {
        let tick = self.clock.next_tick();
        let mut report = StepReport {
            frame: tick.frame,
            line_drawn: false,
            sample: None,
        };
        for req in tick.due {
            if let Some(line) = self.line.as_mut() {
                report.line_drawn |= line.on_frame(req, &mut self.clock);
            }
            if let Some((sampler, stack)) = self.contrast.as_mut() {
                if let Some(outcome) = sampler.on_frame(req, stack.as_ref()) {
                    report.sample = Some(outcome);
                }
            }
        }
        report
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn line(&self) -> Option<&LineAnimator<S>> {
        self.line.as_ref()
    }

    pub fn contrast(&self) -> Option<&ContrastSampler> {
        self.contrast.as_ref().map(|(s, _)| s)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/stage.rs"]
mod tests;
