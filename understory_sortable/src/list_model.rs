// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small [`ItemSource`] over ordered lists with fixed-size cells.
//!
//! `ListModel` is enough to drive the engine without a real UI: each list has
//! absolute bounds, a [`Layout`], and a cell size. Stacked lists place item
//! `i` at `i * height` below the top; floating lists fill rows left to right
//! and wrap when the next cell would overflow the list's width.
//!
//! Hosts apply committed drops with [`ListModel::apply`].
//!
//! ```
//! use kurbo::{Rect, Size};
//! use understory_sortable::container::{ContainerId, Layout};
//! use understory_sortable::list_model::ListModel;
//! use understory_sortable::SortEvent;
//!
//! let a = ContainerId::new(1);
//! let b = ContainerId::new(2);
//! let mut model = ListModel::new();
//! model.add_list(a, Rect::new(0.0, 0.0, 100.0, 200.0), Layout::Stacked, Size::new(100.0, 20.0));
//! model.add_list(b, Rect::new(200.0, 0.0, 300.0, 200.0), Layout::Stacked, Size::new(100.0, 20.0));
//! model.extend(a, ["x", "y"]);
//!
//! assert!(model.apply(&SortEvent::Drop { item: "x", from: a, to: b, after: None }));
//! assert_eq!(model.items(a), &["y"]);
//! assert_eq!(model.items(b), &["x"]);
//! ```

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::container::{ContainerId, Layout};
use crate::event::SortEvent;
use crate::registry::{ItemSource, QueryContext, QueryError};

#[derive(Clone, Debug)]
struct List<K> {
    id: ContainerId,
    bounds: Rect,
    layout: Layout,
    cell: Size,
    items: Vec<K>,
    available: bool,
}

impl<K> List<K> {
    fn cell_rect(&self, index: usize) -> Rect {
        let (col, row) = match self.layout {
            Layout::Stacked => (0, index),
            Layout::Floating => {
                let per_row = self.per_row();
                (index % per_row, index / per_row)
            }
        };
        let origin = Point::new(
            self.bounds.x0 + self.cell.width * to_f64(col),
            self.bounds.y0 + self.cell.height * to_f64(row),
        );
        Rect::from_origin_size(origin, self.cell)
    }

    fn per_row(&self) -> usize {
        #[expect(clippy::cast_possible_truncation, reason = "saturating, floored by the cast")]
        let fits = (self.bounds.width() / self.cell.width) as usize;
        fits.max(1)
    }
}

fn to_f64(n: usize) -> f64 {
    f64::from(u32::try_from(n).unwrap_or(u32::MAX))
}

/// Ordered lists of items with computed geometry.
#[derive(Clone, Debug)]
pub struct ListModel<K> {
    lists: Vec<List<K>>,
}

impl<K> Default for ListModel<K> {
    fn default() -> Self {
        Self { lists: Vec::new() }
    }
}

impl<K: Copy + PartialEq> ListModel<K> {
    /// An empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) an empty list.
    ///
    /// Non-positive cell widths are clamped to one pixel.
    pub fn add_list(&mut self, id: ContainerId, bounds: Rect, layout: Layout, cell: Size) {
        let cell = Size::new(cell.width.max(1.0), cell.height);
        let list = List {
            id,
            bounds,
            layout,
            cell,
            items: Vec::new(),
            available: true,
        };
        match self.lists.iter_mut().find(|l| l.id == id) {
            Some(existing) => *existing = list,
            None => self.lists.push(list),
        }
    }

    /// Append an item to a list. Returns `false` for unknown lists.
    pub fn push(&mut self, id: ContainerId, item: K) -> bool {
        match self.list_mut(id) {
            Some(list) => {
                list.items.push(item);
                true
            }
            None => false,
        }
    }

    /// Append several items to a list.
    pub fn extend(&mut self, id: ContainerId, items: impl IntoIterator<Item = K>) {
        if let Some(list) = self.list_mut(id) {
            list.items.extend(items);
        }
    }

    /// Make a list's item query fail (or succeed again).
    pub fn set_available(&mut self, id: ContainerId, available: bool) {
        if let Some(list) = self.list_mut(id) {
            list.available = available;
        }
    }

    /// Items of a list in order; empty for unknown lists.
    #[must_use]
    pub fn items(&self, id: ContainerId) -> &[K] {
        self.list(id).map(|l| l.items.as_slice()).unwrap_or(&[])
    }

    /// Find an item's list and index.
    #[must_use]
    pub fn position(&self, item: &K) -> Option<(ContainerId, usize)> {
        self.lists.iter().find_map(|l| {
            l.items
                .iter()
                .position(|k| k == item)
                .map(|index| (l.id, index))
        })
    }

    /// Center point of the cell at `index` in list `id`, handy for pointer scripts.
    #[must_use]
    pub fn cell_center(&self, id: ContainerId, index: usize) -> Option<Point> {
        self.list(id).map(|l| l.cell_rect(index).center())
    }

    /// Apply a committed drop. Other events are ignored.
    ///
    /// Returns `true` if the model changed.
    pub fn apply(&mut self, event: &SortEvent<K>) -> bool {
        let SortEvent::Drop {
            item,
            from,
            to,
            after,
        } = *event
        else {
            return false;
        };
        if self.list(to).is_none() {
            return false;
        }
        let Some(source) = self.list_mut(from) else {
            return false;
        };
        let Some(index) = source.items.iter().position(|k| *k == item) else {
            return false;
        };
        source.items.remove(index);
        let Some(target) = self.list_mut(to) else {
            return false;
        };
        let index = match after {
            Some(anchor) => target
                .items
                .iter()
                .position(|k| *k == anchor)
                .map_or(target.items.len(), |i| i + 1),
            None => 0,
        };
        target.items.insert(index, item);
        true
    }

    fn list(&self, id: ContainerId) -> Option<&List<K>> {
        self.lists.iter().find(|l| l.id == id)
    }

    fn list_mut(&mut self, id: ContainerId) -> Option<&mut List<K>> {
        self.lists.iter_mut().find(|l| l.id == id)
    }
}

impl<K: Copy + PartialEq> ItemSource<K> for ListModel<K> {
    fn items(&self, container: ContainerId, _ctx: &QueryContext<K>) -> Result<Vec<K>, QueryError> {
        let list = self
            .list(container)
            .ok_or(QueryError::UnknownContainer(container))?;
        if !list.available {
            return Err(QueryError::Unavailable("list marked unavailable"));
        }
        Ok(list.items.clone())
    }

    fn item_bounds(&self, item: &K) -> Option<Rect> {
        let (id, index) = self.position(item)?;
        self.list(id).map(|l| l.cell_rect(index))
    }

    fn container_bounds(&self, container: ContainerId) -> Option<Rect> {
        self.list(container).map(|l| l.bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ContainerId = ContainerId::new(1);
    const B: ContainerId = ContainerId::new(2);

    fn model() -> ListModel<u32> {
        let mut model = ListModel::new();
        model.add_list(A, Rect::new(0.0, 0.0, 100.0, 100.0), Layout::Stacked, Size::new(100.0, 20.0));
        model.add_list(B, Rect::new(200.0, 0.0, 330.0, 100.0), Layout::Floating, Size::new(40.0, 40.0));
        model.extend(A, [1, 2, 3]);
        model.extend(B, [4, 5, 6, 7]);
        model
    }

    #[test]
    fn stacked_and_floating_geometry() {
        let model = model();
        assert_eq!(model.item_bounds(&2), Some(Rect::new(0.0, 20.0, 100.0, 40.0)));
        // 130px wide with 40px cells: three per row.
        assert_eq!(model.item_bounds(&6), Some(Rect::new(280.0, 0.0, 320.0, 40.0)));
        assert_eq!(model.item_bounds(&7), Some(Rect::new(200.0, 40.0, 240.0, 80.0)));
        assert_eq!(model.item_bounds(&99), None);
    }

    #[test]
    fn wide_and_narrow_floating_rows() {
        let mut model = ListModel::new();
        model.add_list(A, Rect::new(0.0, 0.0, 1e12, 100.0), Layout::Floating, Size::new(10.0, 10.0));
        model.add_list(B, Rect::new(0.0, 0.0, 5.0, 100.0), Layout::Floating, Size::new(10.0, 10.0));
        model.extend(A, [1, 2]);
        model.extend(B, [3, 4]);
        assert_eq!(model.item_bounds(&2), Some(Rect::new(10.0, 0.0, 20.0, 10.0)));
        // Narrower than one cell still places one item per row.
        assert_eq!(model.item_bounds(&4), Some(Rect::new(0.0, 10.0, 10.0, 20.0)));
    }

    #[test]
    fn apply_moves_within_and_across_lists() {
        let mut model = model();
        assert!(model.apply(&SortEvent::Drop {
            item: 1,
            from: A,
            to: A,
            after: Some(3),
        }));
        assert_eq!(model.items(A), &[2, 3, 1]);

        assert!(model.apply(&SortEvent::Drop {
            item: 3,
            from: A,
            to: B,
            after: Some(5),
        }));
        assert_eq!(model.items(A), &[2, 1]);
        assert_eq!(model.items(B), &[4, 5, 3, 6, 7]);
    }

    #[test]
    fn apply_ignores_non_drops_and_unknown_items() {
        let mut model = model();
        assert!(!model.apply(&SortEvent::Cancel { item: 1, origin: A }));
        assert!(!model.apply(&SortEvent::Drop {
            item: 42,
            from: A,
            to: B,
            after: None,
        }));
        assert!(!model.apply(&SortEvent::Drop {
            item: 1,
            from: A,
            to: ContainerId::new(9),
            after: None,
        }));
        assert_eq!(model.items(A), &[1, 2, 3]);
    }

    #[test]
    fn unavailable_list_fails_its_query() {
        let mut model = model();
        model.set_available(B, false);
        let ctx = QueryContext { item: 1, origin: A };
        assert_eq!(model.items(A).len(), 3);
        assert_eq!(
            ItemSource::items(&model, B, &ctx),
            Err(QueryError::Unavailable("list marked unavailable"))
        );
    }
}
