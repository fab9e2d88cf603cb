// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer samples and per-drag pointer tracking.
//!
//! [`PointerState`] follows the pointer through one drag: it remembers where
//! the drag started, the last sampled position, and the direction of travel on
//! each axis as of the most recent sample. A zero delta on an axis clears that
//! axis' direction, which the [placement resolver](crate::placement) reads as
//! "no decision".
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_sortable::pointer::{HorizontalDirection, PointerState, VerticalDirection};
//!
//! let mut pointer = PointerState::default();
//! pointer.start(Point::new(10.0, 20.0));
//!
//! let delta = pointer.update(Point::new(15.0, 20.0)).unwrap();
//! assert_eq!(delta, Vec2::new(5.0, 0.0));
//! assert_eq!(pointer.horizontal, Some(HorizontalDirection::Right));
//! assert_eq!(pointer.vertical, None);
//!
//! pointer.update(Point::new(15.0, 12.0));
//! assert_eq!(pointer.vertical, Some(VerticalDirection::Up));
//! assert_eq!(pointer.horizontal, None);
//! ```

use kurbo::{Point, Vec2};

/// One raw pointer event as seen by the engine.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerSample {
    /// Absolute pointer position.
    pub position: Point,
    /// Whether the primary button is reported as held.
    ///
    /// A move sample with this unset ends any gesture in progress.
    pub pressed: bool,
    /// Event timestamp in milliseconds.
    pub time: u64,
}

impl PointerSample {
    /// A sample with the primary button held.
    #[must_use]
    pub const fn pressed(position: Point, time: u64) -> Self {
        Self {
            position,
            pressed: true,
            time,
        }
    }

    /// A sample with no button held.
    #[must_use]
    pub const fn released(position: Point, time: u64) -> Self {
        Self {
            position,
            pressed: false,
            time,
        }
    }
}

/// Vertical travel direction of the latest sample.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VerticalDirection {
    /// Towards smaller `y`.
    Up,
    /// Towards larger `y`.
    Down,
}

/// Horizontal travel direction of the latest sample.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HorizontalDirection {
    /// Towards smaller `x`.
    Left,
    /// Towards larger `x`.
    Right,
}

/// Tracks pointer position and travel direction during a drag.
#[derive(Debug, Clone, Default, Copy, PartialEq)]
pub struct PointerState {
    /// Position where tracking started.
    pub start_pos: Option<Point>,
    /// Last recorded position.
    pub last_pos: Option<Point>,
    /// Vertical direction of the latest movement, if it moved vertically.
    pub vertical: Option<VerticalDirection>,
    /// Horizontal direction of the latest movement, if it moved horizontally.
    pub horizontal: Option<HorizontalDirection>,
}

impl PointerState {
    /// Start tracking from `pos`, forgetting any previous direction.
    pub fn start(&mut self, pos: Point) {
        *self = Self {
            start_pos: Some(pos),
            last_pos: Some(pos),
            vertical: None,
            horizontal: None,
        };
    }

    /// Record a new position, returning the delta since the previous one.
    ///
    /// Returns `None` when tracking has not started. Directions are derived
    /// from the sign of the returned delta.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        self.start_pos?;
        let Some(last_pos) = self.last_pos.replace(pos) else {
            return None;
        };
        let delta = pos - last_pos;
        self.vertical = if delta.y > 0.0 {
            Some(VerticalDirection::Down)
        } else if delta.y < 0.0 {
            Some(VerticalDirection::Up)
        } else {
            None
        };
        self.horizontal = if delta.x > 0.0 {
            Some(HorizontalDirection::Right)
        } else if delta.x < 0.0 {
            Some(HorizontalDirection::Left)
        } else {
            None
        };
        Some(delta)
    }

    /// Offset of `current_pos` from the start position.
    #[must_use]
    pub fn total_offset(&self, current_pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start_pos| current_pos - start_pos)
    }

    /// Last recorded position.
    #[must_use]
    pub fn position(&self) -> Option<Point> {
        self.last_pos
    }

    /// Stop tracking and reset all state.
    pub fn end(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` while tracking is active.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.start_pos.is_some()
    }
}
