//! Time-driven scroll animation for the tablature transport.
//!
//! The controller holds no clock. The host passes its frame time to
//! [`ScrollController::start_scroll`] and then polls
//! [`ScrollController::compute_scroll_offset`] once per frame; as long as that
//! returns `true` another frame must be scheduled. All calls are expected from
//! the one thread that drives rendering; the type is not meant to be shared.

use std::time::Duration;

use bevy::log::debug;
use bevy::math::Vec2;

pub const DEFAULT_SCROLL_DURATION: Duration = Duration::from_millis(250);

/// Progress curve applied to elapsed/duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// Fast start, slowing into the target.
    Decelerate,
}

impl Easing {
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub start_offset: Vec2,
    pub current_offset: Vec2,
    pub final_offset: Vec2,
    pub start_time: Duration,
    pub planned_duration: Duration,
    pub finished: bool,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            start_offset: Vec2::ZERO,
            current_offset: Vec2::ZERO,
            final_offset: Vec2::ZERO,
            start_time: Duration::ZERO,
            planned_duration: Duration::ZERO,
            finished: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScrollController {
    state: ScrollState,
    easing: Easing,
}

impl ScrollController {
    pub fn new(easing: Easing) -> Self {
        Self {
            state: ScrollState::default(),
            easing,
        }
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    pub fn current_offset(&self) -> Vec2 {
        self.state.current_offset
    }

    pub fn final_offset(&self) -> Vec2 {
        self.state.final_offset
    }

    pub fn is_finished(&self) -> bool {
        self.state.finished
    }

    /// Begin animating from the current offset by `delta` over `duration`,
    /// starting at frame time `now`. Replaces any scroll in flight.
    pub fn start_scroll(&mut self, delta: Vec2, duration: Duration, now: Duration) {
        let start = self.state.current_offset;
        self.state = ScrollState {
            start_offset: start,
            current_offset: start,
            final_offset: start + delta,
            start_time: now,
            planned_duration: duration,
            finished: false,
        };
        debug!(
            "scroll from {start} by {delta} over {}ms",
            duration.as_millis()
        );
    }

    /// Advance the animation to frame time `now`. Returns `false` once the
    /// scroll had already finished before this call, i.e. when no further
    /// frame is needed.
    pub fn compute_scroll_offset(&mut self, now: Duration) -> bool {
        if self.state.finished {
            return false;
        }

        let elapsed = now.saturating_sub(self.state.start_time);
        if elapsed < self.state.planned_duration {
            let t = elapsed.as_secs_f32() / self.state.planned_duration.as_secs_f32();
            let travel = self.state.final_offset - self.state.start_offset;
            self.state.current_offset = self.state.start_offset + travel * self.easing.apply(t);
        } else {
            self.state.current_offset = self.state.final_offset;
            self.state.finished = true;
        }
        true
    }

    /// Fraction of the planned duration that has passed at `now`, in 0..=1.
    pub fn progress(&self, now: Duration) -> f32 {
        if self.state.finished || self.state.planned_duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.state.start_time);
        (elapsed.as_secs_f32() / self.state.planned_duration.as_secs_f32()).min(1.0)
    }

    /// Hard cut back to the origin, no animation.
    pub fn reset(&mut self) {
        self.state = ScrollState::default();
    }
}
