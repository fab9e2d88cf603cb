// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Revert animation: fly the dragged representation back before teardown.
//!
//! The engine drives a [`RevertAnimator`] from
//! [`Sortable::tick`](crate::Sortable::tick), which hosts call from their
//! timer or animation-frame callback. When the animator reports
//! [`AnimationStep::Finished`] the session is cleared.
//!
//! ```
//! use kurbo::Point;
//! use understory_sortable::revert::{AnimationStep, LinearRevert, RevertAnimator};
//!
//! let mut anim = LinearRevert::default();
//! anim.start(Point::new(100.0, 0.0), Point::ZERO, 500, 1_000);
//!
//! assert_eq!(anim.step(1_250), AnimationStep::Running(Point::new(50.0, 0.0)));
//! assert_eq!(anim.step(1_500), AnimationStep::Finished(Point::ZERO));
//! assert_eq!(anim.step(1_600), AnimationStep::Idle);
//! ```

use kurbo::Point;

/// Progress reported by a [`RevertAnimator`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AnimationStep {
    /// No animation is running.
    Idle,
    /// Still running; the representation is at this position.
    Running(Point),
    /// Reached the target on this step.
    Finished(Point),
}

/// Strategy that animates the dragged representation back to rest.
pub trait RevertAnimator {
    /// Start moving from `from` to `to` over `duration` milliseconds, beginning at `now`.
    fn start(&mut self, from: Point, to: Point, duration: u32, now: u64);

    /// Advance to `now`.
    fn step(&mut self, now: u64) -> AnimationStep;

    /// Stop without finishing.
    fn cancel(&mut self);

    /// Returns `true` between `start` and the finishing step.
    fn is_running(&self) -> bool;
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Flight {
    from: Point,
    to: Point,
    started: u64,
    duration: u32,
}

/// Linear interpolation between start and target.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LinearRevert {
    flight: Option<Flight>,
}

impl RevertAnimator for LinearRevert {
    fn start(&mut self, from: Point, to: Point, duration: u32, now: u64) {
        self.flight = Some(Flight {
            from,
            to,
            started: now,
            duration,
        });
    }

    fn step(&mut self, now: u64) -> AnimationStep {
        let Some(flight) = self.flight else {
            return AnimationStep::Idle;
        };
        let elapsed = now.saturating_sub(flight.started);
        if elapsed >= u64::from(flight.duration) {
            self.flight = None;
            return AnimationStep::Finished(flight.to);
        }
        let elapsed = u32::try_from(elapsed).unwrap_or(flight.duration);
        let t = f64::from(elapsed) / f64::from(flight.duration);
        AnimationStep::Running(flight.from.lerp(flight.to, t))
    }

    fn cancel(&mut self) {
        self.flight = None;
    }

    fn is_running(&self) -> bool {
        self.flight.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_duration_finishes_on_first_step() {
        let mut anim = LinearRevert::default();
        anim.start(Point::new(5.0, 5.0), Point::ZERO, 0, 10);
        assert!(anim.is_running());
        assert_eq!(anim.step(10), AnimationStep::Finished(Point::ZERO));
        assert!(!anim.is_running());
    }

    #[test]
    fn clock_going_backwards_holds_start() {
        let mut anim = LinearRevert::default();
        anim.start(Point::new(10.0, 10.0), Point::ZERO, 100, 50);
        assert_eq!(anim.step(40), AnimationStep::Running(Point::new(10.0, 10.0)));
    }

    #[test]
    fn cancel_stops_without_finishing() {
        let mut anim = LinearRevert::default();
        anim.start(Point::ZERO, Point::new(10.0, 0.0), 100, 0);
        anim.cancel();
        assert_eq!(anim.step(200), AnimationStep::Idle);
    }
}
