//! Fixed-rate frame scheduler.
//!
//! Stands in for the display-refresh callback: a frame is requested with a
//! deadline one interval away, the event loop asks for due frames, and a
//! request can be cancelled by id. At most one request is pending.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequestId(u64);

#[derive(Debug)]
pub struct FrameScheduler {
    interval: Duration,
    next_id: u64,
    pending: Option<(FrameRequestId, Instant)>,
}

impl FrameScheduler {
    pub fn new(fps: u32) -> Self {
        Self {
            interval: Duration::from_secs(1) / fps.max(1),
            next_id: 0,
            pending: None,
        }
    }

    #[cfg(test)]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Request a frame one interval after `now`, replacing any pending one.
    pub fn request(&mut self, now: Instant) -> FrameRequestId {
        let id = FrameRequestId(self.next_id);
        self.next_id += 1;
        self.pending = Some((id, now + self.interval));
        id
    }

    /// Cancel `id` if it is still pending.
    pub fn cancel(&mut self, id: FrameRequestId) -> bool {
        match self.pending {
            Some((pending, _)) if pending == id => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Hand out the pending request once its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<FrameRequestId> {
        match self.pending {
            Some((id, deadline)) if deadline <= now => {
                self.pending = None;
                Some(id)
            }
            _ => None,
        }
    }

    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|(_, deadline)| deadline.saturating_duration_since(now))
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
