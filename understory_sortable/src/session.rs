// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag session and placeholder.
//!
//! A [`DragSession`] exists from drag start until teardown. It exclusively
//! owns the [`Placeholder`] for that time, including while a revert animation
//! is running, so a new gesture can never reuse it early.
//!
//! Slots are expressed relative to the items that stay put: `after: None` is
//! the start of a container, `after: Some(k)` is directly behind `k`. The
//! dragged item is never an anchor, so a slot stays meaningful no matter
//! where the placeholder has wandered.

use kurbo::{Point, Rect, Size, Vec2};

use crate::container::ContainerId;
use crate::pointer::PointerState;

/// An insertion point inside a container.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Slot<K> {
    /// Container holding the slot.
    pub container: ContainerId,
    /// Item directly before the slot, or `None` for the first position.
    pub after: Option<K>,
}

/// Stand-in marking where the dragged item would land.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placeholder<K> {
    slot: Slot<K>,
    origin: Point,
    size: Size,
    visible: bool,
}

impl<K: Copy + PartialEq> Placeholder<K> {
    /// A visible placeholder at `slot`, drawn at `origin`.
    #[must_use]
    pub const fn new(slot: Slot<K>, origin: Point, size: Size) -> Self {
        Self {
            slot,
            origin,
            size,
            visible: true,
        }
    }

    /// Current slot.
    #[must_use]
    pub const fn slot(&self) -> Slot<K> {
        self.slot
    }

    /// Current on-screen origin.
    #[must_use]
    pub const fn origin(&self) -> Point {
        self.origin
    }

    /// On-screen bounds.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }

    /// Returns `true` while shown.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show the placeholder at its current slot.
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hide the placeholder; its slot and origin are kept.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Move to `slot` and show. Returns `true` if the slot changed.
    pub fn move_to(&mut self, slot: Slot<K>, origin: Point) -> bool {
        let changed = self.slot != slot;
        self.slot = slot;
        self.origin = origin;
        self.visible = true;
        changed
    }
}

/// How a finished session ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome<K> {
    /// The item moved to a new slot.
    Moved {
        /// Where it started.
        from: Slot<K>,
        /// Where it lands.
        to: Slot<K>,
    },
    /// The item goes back where it started.
    Returned {
        /// Where it started.
        origin: Slot<K>,
    },
}

/// State of one drag, from start to teardown.
#[derive(Clone, Debug)]
pub struct DragSession<K> {
    item: K,
    origin: Slot<K>,
    placeholder: Placeholder<K>,
    click_offset: Vec2,
    helper: Point,
    pointer: PointerState,
    start_offset: Option<Point>,
    reverting: bool,
}

impl<K: Copy + PartialEq> DragSession<K> {
    /// Begin dragging `item` out of `origin`.
    ///
    /// `bounds` is the item's rect at grab time, if known, and `grab` is the
    /// pointer position of the press. The helper starts on top of the item and
    /// the placeholder takes over the item's slot.
    #[must_use]
    pub fn begin(item: K, origin: Slot<K>, bounds: Option<Rect>, grab: Point) -> Self {
        let rect = bounds.unwrap_or_else(|| Rect::from_origin_size(grab, Size::ZERO));
        let mut pointer = PointerState::default();
        pointer.start(grab);
        Self {
            item,
            origin,
            placeholder: Placeholder::new(origin, rect.origin(), rect.size()),
            click_offset: grab - rect.origin(),
            helper: rect.origin(),
            pointer,
            start_offset: bounds.map(|b| b.origin()),
            reverting: false,
        }
    }

    /// The dragged item.
    #[must_use]
    pub const fn item(&self) -> K {
        self.item
    }

    /// Slot the item was dragged out of.
    #[must_use]
    pub const fn origin(&self) -> Slot<K> {
        self.origin
    }

    /// The placeholder.
    #[must_use]
    pub const fn placeholder(&self) -> &Placeholder<K> {
        &self.placeholder
    }

    /// Mutable access to the placeholder.
    pub fn placeholder_mut(&mut self) -> &mut Placeholder<K> {
        &mut self.placeholder
    }

    /// Pointer offset relative to the item at grab time.
    #[must_use]
    pub const fn click_offset(&self) -> Vec2 {
        self.click_offset
    }

    /// Current origin of the dragged representation.
    #[must_use]
    pub const fn helper(&self) -> Point {
        self.helper
    }

    /// Pointer tracking for this drag.
    #[must_use]
    pub const fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// Item origin captured at grab time.
    #[must_use]
    pub const fn start_offset(&self) -> Option<Point> {
        self.start_offset
    }

    /// Returns `true` while a revert animation owns the session.
    #[must_use]
    pub const fn is_reverting(&self) -> bool {
        self.reverting
    }

    /// Follow the pointer to `pos`.
    pub fn drag_to(&mut self, pos: Point) {
        self.pointer.update(pos);
        self.helper = pos - self.click_offset;
    }

    /// Where a revert animation should head.
    ///
    /// The start offset is used when the placeholder is hidden at release
    /// time, since no container holds the item; otherwise the placeholder's
    /// current origin.
    #[must_use]
    pub fn revert_target(&self) -> Point {
        match self.start_offset {
            Some(start) if !self.placeholder.is_visible() => start,
            _ => self.placeholder.origin(),
        }
    }

    /// Mark the session as reverting. Returns `false` if it already was.
    pub fn begin_revert(&mut self) -> bool {
        !core::mem::replace(&mut self.reverting, true)
    }

    /// Move the dragged representation (used by animation frames).
    pub fn set_helper(&mut self, pos: Point) {
        self.helper = pos;
    }

    /// How the session ends if torn down now.
    ///
    /// A hidden placeholder, or one still at the origin slot, returns the item.
    #[must_use]
    pub fn outcome(&self) -> Outcome<K> {
        let to = self.placeholder.slot();
        if !self.placeholder.is_visible() || to == self.origin {
            Outcome::Returned {
                origin: self.origin,
            }
        } else {
            Outcome::Moved {
                from: self.origin,
                to,
            }
        }
    }
}
