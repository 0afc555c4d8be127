use crate::foundation::error::{FxError, FxResult};
use crate::schedule::frame::{
    FrameClock, FrameRequest, FrameScheduler, FrameTick, ManualScheduler,
};
use std::time::{Duration, Instant};

/// Fixed-interval stand-in for a display refresh signal.
///
/// Frames are paced against absolute deadlines so a slow frame does not shift the ones after it;
/// when the caller falls behind, the next frame starts immediately.
#[derive(Debug)]
pub struct IntervalScheduler {
    inner: ManualScheduler,
    interval: Duration,
    next_deadline: Option<Instant>,
}

impl IntervalScheduler {
    /// Refresh rate used when the host has no display signal.
    pub const DEFAULT_HZ: u32 = 60;

    /// Create a scheduler ticking at `hz` frames per second.
    pub fn new(hz: u32) -> FxResult<Self> {
        if hz == 0 {
            return Err(FxError::validation("refresh rate must be > 0"));
        }
        Ok(Self {
            inner: ManualScheduler::new(),
            interval: Duration::from_secs(1) / hz,
            next_deadline: None,
        })
    }

    /// Time between frames.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Block until the next frame boundary, then take the requests due on it.
    pub fn wait_next(&mut self) -> FrameTick {
        let now = Instant::now();
        let deadline = self.next_deadline.unwrap_or(now);
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
        let after = deadline.max(now) + self.interval;
        self.next_deadline = Some(after);
        self.inner.advance()
    }
}

impl FrameScheduler for IntervalScheduler {
    fn request_frame(&mut self) -> FrameRequest {
        self.inner.request_frame()
    }

    fn cancel_frame(&mut self, req: FrameRequest) {
        self.inner.cancel_frame(req);
    }

    fn is_pending(&self, req: FrameRequest) -> bool {
        self.inner.is_pending(req)
    }
}

impl FrameClock for IntervalScheduler {
    fn next_tick(&mut self) -> FrameTick {
        self.wait_next()
    }
}
