use std::time::{Duration, Instant};

/// How long a scroll-state change waits before it takes effect.  A newer
/// change posted within this window replaces the pending one.
pub(super) const SCROLL_CHANGE_DELAY: Duration = Duration::from_millis(40);

pub(super) const GOTO_SCROLL_DURATION: Duration = Duration::from_millis(250);

pub(super) const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum ScrollState {
    Idle,
    /// The user is moving the list directly (mouse wheel or line scrolling)
    TouchScroll,
    /// The list is moving on its own (paging, animated jumps, snapping)
    Fling,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct PendingStateChange {
    pub(super) state: ScrollState,
    pub(super) due: Instant,
}

impl PendingStateChange {
    pub(super) fn new(state: ScrollState, now: Instant) -> PendingStateChange {
        PendingStateChange {
            state,
            due: now + SCROLL_CHANGE_DELAY,
        }
    }

    pub(super) fn is_due(&self, now: Instant) -> bool {
        self.due <= now
    }
}

/// A linear animation of the list's scroll offset
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct SmoothScroll {
    from: u32,
    to: u32,
    start: Instant,
    duration: Duration,
}

impl SmoothScroll {
    pub(super) fn new(from: u32, to: u32, start: Instant) -> SmoothScroll {
        SmoothScroll {
            from,
            to,
            start,
            duration: GOTO_SCROLL_DURATION,
        }
    }

    pub(super) fn offset_at(&self, now: Instant) -> u32 {
        if self.is_finished(now) {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.start).as_micros();
        let distance =
            u128::from(self.from.abs_diff(self.to)) * elapsed / self.duration.as_micros();
        let distance = u32::try_from(distance).unwrap_or(u32::MAX);
        if self.to >= self.from {
            self.from.saturating_add(distance)
        } else {
            self.from.saturating_sub(distance)
        }
    }

    pub(super) fn is_finished(&self, now: Instant) -> bool {
        self.duration.is_zero() || now.saturating_duration_since(self.start) >= self.duration
    }

    pub(super) fn next_frame(&self, now: Instant) -> Instant {
        (now + FRAME_INTERVAL).min(self.start + self.duration)
    }
}
