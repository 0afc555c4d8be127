use crate::foundation::core::FrameIndex;
use std::collections::BTreeSet;

/// Handle for one "run on next display refresh" request.
///
/// Ids are never reused within a scheduler, so a stale handle can be told apart from a live one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameRequest(pub u64);

/// Host per-frame scheduling primitive.
///
/// Requests are one-shot: a request fires at most once, on the next frame boundary after it was
/// made. Re-arming is the caller's job (request again from inside the frame callback).
pub trait FrameScheduler {
    /// Ask to be called back on the next frame.
    fn request_frame(&mut self) -> FrameRequest;
    /// Withdraw a request. Cancelling a fired or unknown request is a no-op.
    fn cancel_frame(&mut self, req: FrameRequest);
    /// `true` while `req` is still waiting to fire.
    fn is_pending(&self, req: FrameRequest) -> bool;
}

/// Source of frame boundaries for a host loop.
pub trait FrameClock: FrameScheduler {
    /// Wait for the next frame boundary and take the requests due on it.
    fn next_tick(&mut self) -> FrameTick;
}

/// Deterministic scheduler that only advances when told to.
///
/// Each [`ManualScheduler::advance`] models one display refresh: it returns the requests that
/// were pending when the frame began, in request order. Requests made while those callbacks run
/// are due on the following frame.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    frame: FrameIndex,
    pending: BTreeSet<FrameRequest>,
}

impl ManualScheduler {
    /// Create a scheduler positioned before frame 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the next frame [`ManualScheduler::advance`] will produce.
    pub fn frame(&self) -> FrameIndex {
        self.frame
    }

    /// Number of requests waiting for the next frame.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Begin the next frame and take every request due on it.
    pub fn advance(&mut self) -> FrameTick {
        let due: Vec<FrameRequest> = std::mem::take(&mut self.pending).into_iter().collect();
        let tick = FrameTick {
            frame: self.frame,
            due,
        };
        self.frame = self.frame.next();
        tracing::trace!(frame = tick.frame.0, due = tick.due.len(), "frame tick");
        tick
    }

    /// Drop every pending request without firing it.
    ///
    /// Models a host that stops delivering frames, e.g. a backgrounded tab.
    pub fn drop_pending(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameRequest {
        let req = FrameRequest(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.pending.insert(req);
        req
    }

    fn cancel_frame(&mut self, req: FrameRequest) {
        self.pending.remove(&req);
    }

    fn is_pending(&self, req: FrameRequest) -> bool {
        self.pending.contains(&req)
    }
}

impl FrameClock for ManualScheduler {
    fn next_tick(&mut self) -> FrameTick {
        self.advance()
    }
}

/// Requests due on one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameTick {
    /// The frame being produced.
    pub frame: FrameIndex,
    /// Requests to fire, in request order.
    pub due: Vec<FrameRequest>,
}

impl FrameTick {
    /// `true` when no callback is due this frame.
    pub fn is_idle(&self) -> bool {
        self.due.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/frame.rs"]
mod tests;
