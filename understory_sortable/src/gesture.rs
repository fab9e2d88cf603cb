// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture recognizer: turn raw down/move/up samples into start/drag/stop steps.
//!
//! ## States
//!
//! `Idle → Armed → Dragging → Idle`
//!
//! - A press arms the recognizer and records the press sample.
//! - While armed, a move starts the drag once the pointer has travelled at
//!   least the distance threshold (larger of |dx| and |dy|) *and* the delay
//!   threshold has elapsed since the press.
//! - A release from any non-idle state returns to `Idle`.
//! - A move sample that reports no held button is treated as a release. Hosts
//!   can lose the release event (focus loss, pointer leaving the window); this
//!   rule keeps the recognizer from staying in `Dragging` forever.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_sortable::gesture::{GestureRecognizer, GestureState, GestureStep};
//! use understory_sortable::pointer::PointerSample;
//!
//! let mut gesture = GestureRecognizer::new(5.0, 0);
//! assert_eq!(gesture.on_down(PointerSample::pressed(Point::ZERO, 0)), GestureStep::Armed);
//!
//! // Too short: still armed.
//! let step = gesture.on_move(PointerSample::pressed(Point::new(2.0, 1.0), 10));
//! assert_eq!(step, GestureStep::Pending);
//!
//! let step = gesture.on_move(PointerSample::pressed(Point::new(2.0, 6.0), 20));
//! assert_eq!(step, GestureStep::Started);
//! assert_eq!(gesture.state(), GestureState::Dragging);
//!
//! // Button state lost mid-drag: treated as a release.
//! let step = gesture.on_move(PointerSample::released(Point::new(3.0, 6.0), 30));
//! assert_eq!(step, GestureStep::Released { was_dragging: true });
//! assert_eq!(gesture.state(), GestureState::Idle);
//! ```

use crate::pointer::PointerSample;

/// Recognizer state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum GestureState {
    /// No button held.
    #[default]
    Idle,
    /// Pressed, thresholds not yet met.
    Armed,
    /// Drag in progress.
    Dragging,
}

/// Result of feeding one sample to the recognizer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GestureStep {
    /// The sample does not apply in the current state.
    Ignored,
    /// A press armed the recognizer.
    Armed,
    /// Still armed; thresholds not met.
    Pending,
    /// Thresholds met on this sample; the caller should start the drag.
    Started,
    /// Move during an active drag.
    Dragged,
    /// Gesture ended.
    Released {
        /// `true` if the gesture had reached `Dragging`.
        was_dragging: bool,
    },
}

/// Distance/delay gated press-drag-release state machine.
#[derive(Clone, Debug, Default)]
pub struct GestureRecognizer {
    state: GestureState,
    down: Option<PointerSample>,
    distance: f64,
    delay: u64,
}

impl GestureRecognizer {
    /// Create an idle recognizer with the given thresholds (pixels, milliseconds).
    #[must_use]
    pub const fn new(distance: f64, delay: u64) -> Self {
        Self {
            state: GestureState::Idle,
            down: None,
            distance,
            delay,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> GestureState {
        self.state
    }

    /// The press that armed the current gesture, if any.
    #[must_use]
    pub const fn down_sample(&self) -> Option<PointerSample> {
        self.down
    }

    /// Update thresholds. Takes effect from the next move.
    pub fn set_thresholds(&mut self, distance: f64, delay: u64) {
        self.distance = distance;
        self.delay = delay;
    }

    /// Handle a press.
    pub fn on_down(&mut self, sample: PointerSample) -> GestureStep {
        if self.state != GestureState::Idle {
            return GestureStep::Ignored;
        }
        self.state = GestureState::Armed;
        self.down = Some(sample);
        GestureStep::Armed
    }

    /// Handle a move.
    pub fn on_move(&mut self, sample: PointerSample) -> GestureStep {
        if !sample.pressed {
            return self.on_up(sample);
        }
        match self.state {
            GestureState::Idle => GestureStep::Ignored,
            GestureState::Dragging => GestureStep::Dragged,
            GestureState::Armed => {
                if self.distance_met(sample) && self.delay_met(sample) {
                    self.state = GestureState::Dragging;
                    GestureStep::Started
                } else {
                    GestureStep::Pending
                }
            }
        }
    }

    /// Handle a release.
    pub fn on_up(&mut self, _sample: PointerSample) -> GestureStep {
        let was_dragging = match self.state {
            GestureState::Idle => return GestureStep::Ignored,
            GestureState::Armed => false,
            GestureState::Dragging => true,
        };
        self.reset();
        GestureStep::Released { was_dragging }
    }

    /// Return to `Idle` without producing a step.
    ///
    /// Used when the caller refuses to start a drag after [`GestureStep::Started`],
    /// or hands the gesture over to a revert animation.
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
        self.down = None;
    }

    fn distance_met(&self, sample: PointerSample) -> bool {
        let Some(down) = self.down else {
            return false;
        };
        let delta = sample.position - down.position;
        delta.x.abs().max(delta.y.abs()) >= self.distance
    }

    fn delay_met(&self, sample: PointerSample) -> bool {
        self.down
            .is_some_and(|down| sample.time.saturating_sub(down.time) >= self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn pressed(x: f64, y: f64, time: u64) -> PointerSample {
        PointerSample::pressed(Point::new(x, y), time)
    }

    #[test]
    fn move_while_idle_is_ignored() {
        let mut gesture = GestureRecognizer::new(1.0, 0);
        assert_eq!(gesture.on_move(pressed(5.0, 5.0, 0)), GestureStep::Ignored);
        assert_eq!(gesture.state(), GestureState::Idle);
    }

    #[test]
    fn second_press_is_ignored() {
        let mut gesture = GestureRecognizer::new(1.0, 0);
        gesture.on_down(pressed(0.0, 0.0, 0));
        assert_eq!(gesture.on_down(pressed(9.0, 9.0, 5)), GestureStep::Ignored);
        assert_eq!(gesture.down_sample().unwrap().position, Point::ZERO);
    }

    #[test]
    fn delay_gates_start_even_after_distance() {
        let mut gesture = GestureRecognizer::new(1.0, 100);
        gesture.on_down(pressed(0.0, 0.0, 1000));
        assert_eq!(gesture.on_move(pressed(50.0, 0.0, 1050)), GestureStep::Pending);
        assert_eq!(gesture.on_move(pressed(51.0, 0.0, 1100)), GestureStep::Started);
    }

    #[test]
    fn distance_uses_larger_axis() {
        let mut gesture = GestureRecognizer::new(4.0, 0);
        gesture.on_down(pressed(10.0, 10.0, 0));
        assert_eq!(gesture.on_move(pressed(13.0, 13.0, 1)), GestureStep::Pending);
        assert_eq!(gesture.on_move(pressed(10.0, 6.0, 2)), GestureStep::Started);
    }

    #[test]
    fn release_while_armed_is_not_a_drag() {
        let mut gesture = GestureRecognizer::new(10.0, 0);
        gesture.on_down(pressed(0.0, 0.0, 0));
        let step = gesture.on_up(PointerSample::released(Point::ZERO, 1));
        assert_eq!(step, GestureStep::Released { was_dragging: false });
        assert_eq!(gesture.state(), GestureState::Idle);
        assert!(gesture.down_sample().is_none());
    }

    #[test]
    fn unpressed_move_while_armed_releases() {
        let mut gesture = GestureRecognizer::new(10.0, 0);
        gesture.on_down(pressed(0.0, 0.0, 0));
        let step = gesture.on_move(PointerSample::released(Point::new(20.0, 0.0), 1));
        assert_eq!(step, GestureStep::Released { was_dragging: false });
    }

    #[test]
    fn release_while_idle_is_ignored() {
        let mut gesture = GestureRecognizer::new(1.0, 0);
        let step = gesture.on_up(PointerSample::released(Point::ZERO, 0));
        assert_eq!(step, GestureStep::Ignored);
    }

    #[test]
    fn dragging_moves_report_dragged() {
        let mut gesture = GestureRecognizer::new(1.0, 0);
        gesture.on_down(pressed(0.0, 0.0, 0));
        gesture.on_move(pressed(2.0, 0.0, 1));
        assert_eq!(gesture.on_move(pressed(2.0, 0.0, 2)), GestureStep::Dragged);
    }
}
