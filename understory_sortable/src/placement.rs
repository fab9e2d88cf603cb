// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement resolution: where would the dragged item land right now?
//!
//! A [`PlacementResolver`] is consulted on every drag move. It sees the
//! registry snapshot, the pointer, and the placeholder's current slot, and
//! answers with a [`Resolution`]. [`PointerPlacement`] is the default
//! strategy; hosts can plug in their own through
//! [`Sortable::with_resolver`](crate::Sortable::with_resolver).
//!
//! ## Insertion side
//!
//! [`insertion_side`] turns the latest travel direction into a [`Side`]:
//!
//! - Floating layouts: moving right, or moving down, inserts after; any other
//!   movement inserts before.
//! - Stacked layouts: moving down inserts after, moving up inserts before, and
//!   no vertical movement is no decision.
//!
//! ```
//! use understory_sortable::placement::{Side, insertion_side};
//! use understory_sortable::pointer::{HorizontalDirection, VerticalDirection};
//!
//! assert_eq!(insertion_side(true, None, Some(HorizontalDirection::Right)), Some(Side::After));
//! assert_eq!(insertion_side(true, None, Some(HorizontalDirection::Left)), Some(Side::Before));
//! assert_eq!(insertion_side(false, Some(VerticalDirection::Up), None), Some(Side::Before));
//! assert_eq!(insertion_side(false, None, Some(HorizontalDirection::Right)), None);
//! assert_eq!(Side::After.signal(), 2);
//! ```

use core::fmt;
use core::hash::Hash;

use kurbo::{Point, Rect};

use crate::container::ContainerId;
use crate::geometry::{contains_rect, intersects_with, intersects_with_pointer, pointer_box};
use crate::pointer::{HorizontalDirection, PointerState, VerticalDirection};
use crate::registry::{ContainerRecord, Registry};
use crate::session::Slot;

/// Which side of an anchor item to insert on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Side {
    /// Insert before the anchor.
    Before = 1,
    /// Insert after the anchor.
    After = 2,
}

impl Side {
    /// Numeric intersection signal: `1` for before, `2` for after.
    #[must_use]
    pub const fn signal(self) -> u8 {
        self as u8
    }
}

/// A candidate insertion point relative to an anchor item.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DropTarget<K> {
    /// Container to insert into.
    pub container: ContainerId,
    /// Anchor item, or `None` for the start of an empty container.
    pub anchor: Option<K>,
    /// Side of the anchor.
    pub side: Side,
}

/// Outcome of one placement query.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Resolution<K> {
    /// Move the placeholder to a new target.
    Target(DropTarget<K>),
    /// The pointer is over an accepting container, but the placeholder stays put.
    Keep,
    /// The pointer is over no accepting container.
    ///
    /// The placeholder keeps its last position but is hidden.
    Outside,
}

/// Inputs to a placement query.
#[derive(Debug)]
pub struct PlacementQuery<'a, K> {
    /// Registry snapshot for the current gesture.
    pub registry: &'a Registry<K>,
    /// Pointer tracking, already updated with the current sample.
    pub pointer: &'a PointerState,
    /// The dragged item.
    pub item: K,
    /// Where the placeholder currently sits.
    pub current: Slot<K>,
}

/// Strategy deciding the insertion point during a drag.
pub trait PlacementResolver<K> {
    /// Resolve the current sample.
    fn resolve(&mut self, query: &PlacementQuery<'_, K>) -> Resolution<K>;
}

/// Map travel direction to an insertion side.
#[must_use]
pub fn insertion_side(
    floating: bool,
    vertical: Option<VerticalDirection>,
    horizontal: Option<HorizontalDirection>,
) -> Option<Side> {
    if floating {
        let after = horizontal == Some(HorizontalDirection::Right)
            || vertical == Some(VerticalDirection::Down);
        Some(if after { Side::After } else { Side::Before })
    } else {
        vertical.map(|v| match v {
            VerticalDirection::Down => Side::After,
            VerticalDirection::Up => Side::Before,
        })
    }
}

/// Default resolver: item intersection first, then container contact.
///
/// Item pass: walk items from last to first and take the first one that is
/// under the pointer, whose parent container is itself under the pointer,
/// that yields an insertion side, and that would actually move the
/// placeholder.
///
/// Container pass: find the innermost registered container under the
/// pointer. If there is none the result is [`Resolution::Outside`]. If it is
/// the placeholder's container the result is [`Resolution::Keep`]. Otherwise
/// the placeholder moves next to the item nearest the pointer along the
/// container's main axis, or to the start of an empty container.
#[derive(Copy, Clone, Debug, Default)]
pub struct PointerPlacement;

impl<K: Copy + Eq + Hash + fmt::Debug> PlacementResolver<K> for PointerPlacement {
    fn resolve(&mut self, query: &PlacementQuery<'_, K>) -> Resolution<K> {
        let Some(pointer) = query.pointer.position() else {
            return Resolution::Keep;
        };
        let registry = query.registry;
        let hit = pointer_box(pointer);

        for record in registry.items().iter().rev() {
            if record.key == query.item || !intersects_with_pointer(pointer, record.rect) {
                continue;
            }
            if !registry.container_hit(record.parent, hit) {
                continue;
            }
            let floating = registry
                .container(record.parent)
                .is_some_and(|c| c.layout.is_floating());
            let Some(side) =
                insertion_side(floating, query.pointer.vertical, query.pointer.horizontal)
            else {
                continue;
            };
            let target = DropTarget {
                container: record.parent,
                anchor: Some(record.key),
                side,
            };
            if registry.slot_for(&target) == query.current {
                continue;
            }
            return Resolution::Target(target);
        }

        let Some(container) = innermost_container(registry, hit) else {
            return Resolution::Outside;
        };
        if container.id == query.current.container {
            return Resolution::Keep;
        }
        match nearest_item(registry, container, pointer) {
            Some((anchor, side)) => Resolution::Target(DropTarget {
                container: container.id,
                anchor: Some(anchor),
                side,
            }),
            None if container.drop_on_empty => Resolution::Target(DropTarget {
                container: container.id,
                anchor: None,
                side: Side::After,
            }),
            None => Resolution::Keep,
        }
    }
}

/// The highest-priority container under `hit`, preferring nested containers.
fn innermost_container<K: Copy + Eq + Hash + fmt::Debug>(
    registry: &Registry<K>,
    hit: Rect,
) -> Option<&ContainerRecord> {
    let mut best: Option<&ContainerRecord> = None;
    for candidate in registry.containers().iter().rev() {
        if !intersects_with(hit, candidate.rect) {
            continue;
        }
        match best {
            None => best = Some(candidate),
            Some(current) => {
                if contains_rect(current.rect, candidate.rect)
                    && !contains_rect(candidate.rect, current.rect)
                {
                    best = Some(candidate);
                }
            }
        }
    }
    best
}

/// Item in `container` whose leading or trailing edge is nearest the pointer.
fn nearest_item<K: Copy + Eq + Hash + fmt::Debug>(
    registry: &Registry<K>,
    container: &ContainerRecord,
    pointer: Point,
) -> Option<(K, Side)> {
    let floating = container.layout.is_floating();
    let base = if floating { pointer.x } else { pointer.y };
    let mut best: Option<(f64, K, Side)> = None;
    for record in registry.items_in(container.id) {
        let (start, size) = if floating {
            (record.rect.x0, record.rect.width())
        } else {
            (record.rect.y0, record.rect.height())
        };
        let to_start = distance(start, base);
        let to_end = distance(start + size, base);
        let (dist, side) = if to_start > to_end {
            (to_end, Side::After)
        } else {
            (to_start, Side::Before)
        };
        if best.is_none_or(|(d, _, _)| dist < d) {
            best = Some((dist, record.key, side));
        }
    }
    best.map(|(_, key, side)| (key, side))
}

fn distance(a: f64, b: f64) -> f64 {
    (a - b).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{ContainerSet, ContainerSpec, Layout};
    use crate::registry::{ItemSource, QueryContext, QueryError};
    use alloc::vec;
    use alloc::vec::Vec;

    const A: ContainerId = ContainerId::new(1);
    const B: ContainerId = ContainerId::new(2);

    /// A holds 1..=3 stacked 20px tall at x 0..100; B is empty at x 200..300.
    struct Lists;

    impl ItemSource<u32> for Lists {
        fn items(&self, container: ContainerId, _ctx: &QueryContext<u32>) -> Result<Vec<u32>, QueryError> {
            Ok(match container.get() {
                1 => vec![1, 2, 3],
                _ => Vec::new(),
            })
        }

        fn item_bounds(&self, item: &u32) -> Option<Rect> {
            let top = f64::from(item - 1) * 20.0;
            Some(Rect::new(0.0, top, 100.0, top + 20.0))
        }

        fn container_bounds(&self, container: ContainerId) -> Option<Rect> {
            Some(match container.get() {
                1 => Rect::new(0.0, 0.0, 100.0, 100.0),
                _ => Rect::new(200.0, 0.0, 300.0, 100.0),
            })
        }
    }

    fn registry(layout: Layout) -> Registry<u32> {
        let mut set = ContainerSet::new();
        set.insert(A, ContainerSpec::new().connect_with([A, B]).layout(layout));
        set.insert(B, ContainerSpec::new());
        let mut registry = Registry::new();
        registry.refresh(&set, &Lists, &QueryContext { item: 1, origin: A });
        registry
    }

    fn pointer(from: Point, to: Point) -> PointerState {
        let mut pointer = PointerState::default();
        pointer.start(from);
        pointer.update(to);
        pointer
    }

    fn resolve(registry: &Registry<u32>, pointer: &PointerState, current: Slot<u32>) -> Resolution<u32> {
        PointerPlacement.resolve(&PlacementQuery {
            registry,
            pointer,
            item: 1,
            current,
        })
    }

    const ORIGIN: Slot<u32> = Slot {
        container: A,
        after: None,
    };

    #[test]
    fn stacked_down_over_item_inserts_after() {
        let registry = registry(Layout::Stacked);
        let p = pointer(Point::new(50.0, 40.0), Point::new(50.0, 45.0));
        let expected = DropTarget {
            container: A,
            anchor: Some(3),
            side: Side::After,
        };
        assert_eq!(resolve(&registry, &p, ORIGIN), Resolution::Target(expected));
    }

    #[test]
    fn stacked_without_vertical_travel_is_no_decision() {
        let registry = registry(Layout::Stacked);
        let p = pointer(Point::new(40.0, 45.0), Point::new(50.0, 45.0));
        assert_eq!(resolve(&registry, &p, ORIGIN), Resolution::Keep);
    }

    #[test]
    fn unchanged_slot_is_skipped() {
        let registry = registry(Layout::Stacked);
        // Moving up over item 2 means "before 2", which is where the placeholder already is.
        let p = pointer(Point::new(50.0, 30.0), Point::new(50.0, 25.0));
        assert_eq!(resolve(&registry, &p, ORIGIN), Resolution::Keep);
    }

    #[test]
    fn floating_horizontal_tie_break() {
        let registry = registry(Layout::Floating);
        let right = pointer(Point::new(40.0, 45.0), Point::new(50.0, 45.0));
        let left = pointer(Point::new(60.0, 45.0), Point::new(50.0, 45.0));
        let current = Slot {
            container: B,
            after: None,
        };

        match resolve(&registry, &right, current) {
            Resolution::Target(t) => assert_eq!(t.side.signal(), 2),
            other => panic!("expected a target, got {other:?}"),
        }
        match resolve(&registry, &left, current) {
            Resolution::Target(t) => assert_eq!(t.side.signal(), 1),
            other => panic!("expected a target, got {other:?}"),
        }
    }

    #[test]
    fn entering_empty_container_targets_its_start() {
        let registry = registry(Layout::Stacked);
        let p = pointer(Point::new(150.0, 50.0), Point::new(250.0, 90.0));
        let expected = DropTarget {
            container: B,
            anchor: None,
            side: Side::After,
        };
        assert_eq!(resolve(&registry, &p, ORIGIN), Resolution::Target(expected));
    }

    #[test]
    fn outside_every_container() {
        let registry = registry(Layout::Stacked);
        let p = pointer(Point::new(150.0, 50.0), Point::new(150.0, 60.0));
        assert_eq!(resolve(&registry, &p, ORIGIN), Resolution::Outside);
    }

    #[test]
    fn entering_populated_container_picks_nearest_edge() {
        let registry = registry(Layout::Stacked);
        let current = Slot {
            container: B,
            after: None,
        };
        // Below all items inside A: nearest edge is the bottom of item 3.
        let p = pointer(Point::new(50.0, 95.0), Point::new(50.0, 95.0));
        let expected = DropTarget {
            container: A,
            anchor: Some(3),
            side: Side::After,
        };
        assert_eq!(resolve(&registry, &p, current), Resolution::Target(expected));
    }

    /// Empty containers at fixed rects, for priority checks.
    struct Boxes(Vec<(ContainerId, Rect)>);

    impl ItemSource<u32> for Boxes {
        fn items(&self, _container: ContainerId, _ctx: &QueryContext<u32>) -> Result<Vec<u32>, QueryError> {
            Ok(Vec::new())
        }

        fn item_bounds(&self, _item: &u32) -> Option<Rect> {
            None
        }

        fn container_bounds(&self, container: ContainerId) -> Option<Rect> {
            self.0.iter().find(|(id, _)| *id == container).map(|(_, r)| *r)
        }
    }

    const ELSEWHERE: Slot<u32> = Slot {
        container: ContainerId::new(9),
        after: None,
    };

    /// Container hit by a drag out of `A` whose partners are `order`.
    fn winner(boxes: &Boxes, order: &[ContainerId], at: Point) -> Option<ContainerId> {
        let mut set = ContainerSet::new();
        set.insert(A, ContainerSpec::new().connect_with(order.iter().copied()));
        for (id, _) in &boxes.0 {
            if *id != A {
                set.insert(*id, ContainerSpec::new());
            }
        }
        let mut registry = Registry::new();
        registry.refresh(&set, boxes, &QueryContext { item: 1, origin: A });
        match resolve(&registry, &pointer(at, at), ELSEWHERE) {
            Resolution::Target(t) => Some(t.container),
            _ => None,
        }
    }

    #[test]
    fn nested_container_beats_its_ancestor() {
        let boxes = Boxes(vec![
            (A, Rect::new(0.0, 0.0, 300.0, 300.0)),
            (B, Rect::new(50.0, 100.0, 250.0, 200.0)),
        ]);
        let inside = Point::new(150.0, 150.0);
        assert_eq!(winner(&boxes, &[A, B], inside), Some(B));
        assert_eq!(winner(&boxes, &[B, A], inside), Some(B));
        // Outside the nested container only the ancestor is hit.
        assert_eq!(winner(&boxes, &[A, B], Point::new(20.0, 20.0)), Some(A));
    }

    #[test]
    fn overlapping_containers_follow_declared_order() {
        let same = Boxes(vec![
            (A, Rect::new(0.0, 0.0, 100.0, 100.0)),
            (B, Rect::new(0.0, 0.0, 100.0, 100.0)),
        ]);
        let at = Point::new(50.0, 50.0);
        assert_eq!(winner(&same, &[A, B], at), Some(A));
        assert_eq!(winner(&same, &[B, A], at), Some(B));

        let partial = Boxes(vec![
            (A, Rect::new(0.0, 0.0, 100.0, 100.0)),
            (B, Rect::new(50.0, 0.0, 150.0, 100.0)),
        ]);
        let at = Point::new(75.0, 50.0);
        assert_eq!(winner(&partial, &[A, B], at), Some(A));
        assert_eq!(winner(&partial, &[B, A], at), Some(B));
    }

    #[test]
    fn side_signals() {
        assert_eq!(Side::Before.signal(), 1);
        assert_eq!(Side::After.signal(), 2);
        assert_eq!(
            insertion_side(true, Some(VerticalDirection::Down), Some(HorizontalDirection::Left)),
            Some(Side::After)
        );
        assert_eq!(insertion_side(true, None, None), Some(Side::Before));
        assert_eq!(insertion_side(false, None, None), None);
    }
}
