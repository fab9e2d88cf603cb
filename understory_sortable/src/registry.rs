// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item/container registry: the per-gesture snapshot of drop candidates.
//!
//! The registry is rebuilt wholesale at drag start by [`Registry::refresh`].
//! Nothing is diffed; cached geometry is only valid for the gesture that
//! produced it.
//!
//! ## Ordering
//!
//! Refresh walks the origin's connected containers (see
//! [`ContainerSet::connected`]) from last declared to first. Each enabled
//! container whose item query succeeds is appended to the container list and
//! its query result is recorded. Item records are then instantiated by walking
//! the recorded queries in reverse, which restores declared order. So:
//!
//! - [`Registry::containers`] is in reverse declared order, and
//! - [`Registry::query_order`] (the order item records were built per
//!   container) is exactly [`Registry::containers`] reversed.
//!
//! Placement walks containers from the back of the list, so the first
//! declared partner has the highest priority.
//!
//! ## Host access
//!
//! Hosts implement [`ItemSource`] to enumerate a container's items and report
//! geometry. A container whose query fails is skipped for this refresh only.
//! Missing geometry becomes [`Rect::ZERO`], which never intersects anything.
//!
//! ## Back-references
//!
//! Every enumerated item, including the one being dragged, is mapped to the
//! container whose query produced it. Hosts use [`Registry::container_of`] to
//! turn a raw pointer target back into structured data.

use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use tracing::{trace, warn};

use crate::container::{ContainerId, ContainerSet, Layout};
use crate::geometry::intersects_with;
use crate::placement::{DropTarget, Side};
use crate::session::Slot;

/// Context passed to item queries.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QueryContext<K> {
    /// The item about to be dragged.
    pub item: K,
    /// The container the drag starts in.
    pub origin: ContainerId,
}

/// Error returned by [`ItemSource::items`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryError {
    /// The host does not know this container.
    UnknownContainer(ContainerId),
    /// The container exists but cannot be enumerated right now.
    Unavailable(&'static str),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownContainer(id) => write!(f, "unknown container {}", id.get()),
            Self::Unavailable(reason) => write!(f, "items unavailable: {reason}"),
        }
    }
}

impl core::error::Error for QueryError {}

/// Host-side view of containers and their items.
pub trait ItemSource<K> {
    /// Items currently inside `container`, in document order.
    fn items(&self, container: ContainerId, ctx: &QueryContext<K>) -> Result<Vec<K>, QueryError>;

    /// Absolute bounds of an item.
    fn item_bounds(&self, item: &K) -> Option<Rect>;

    /// Absolute bounds of a container.
    fn container_bounds(&self, container: ContainerId) -> Option<Rect>;

    /// The container an item physically sits in.
    ///
    /// Hosts with nested containers return the innermost one. The default
    /// trusts the container whose query produced the item.
    fn item_parent(&self, item: &K) -> Option<ContainerId> {
        let _ = item;
        None
    }
}

/// Cached data for one registered item.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ItemRecord<K> {
    /// Host key.
    pub key: K,
    /// Container whose query produced the item.
    pub container: ContainerId,
    /// Container the item physically sits in.
    pub parent: ContainerId,
    /// Bounds at refresh time.
    pub rect: Rect,
}

/// Cached data for one registered container.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContainerRecord {
    /// Container id.
    pub id: ContainerId,
    /// Bounds at refresh time.
    pub rect: Rect,
    /// Item arrangement.
    pub layout: Layout,
    /// Whether the container accepts the placeholder while empty.
    pub drop_on_empty: bool,
}

/// Snapshot of drop candidates for one gesture.
#[derive(Clone, Debug)]
pub struct Registry<K> {
    items: Vec<ItemRecord<K>>,
    containers: Vec<ContainerRecord>,
    query_order: Vec<ContainerId>,
    owners: HashMap<K, ContainerId>,
    origin_slot: Option<Slot<K>>,
}

impl<K> Default for Registry<K> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            containers: Vec::new(),
            query_order: Vec::new(),
            owners: HashMap::new(),
            origin_slot: None,
        }
    }
}

impl<K: Copy + Eq + Hash + fmt::Debug> Registry<K> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild items and containers for a drag of `ctx.item` out of `ctx.origin`.
    ///
    /// The new collections are assembled off to the side and swapped in with a
    /// single assignment, so readers never observe a half-built registry.
    pub fn refresh<S: ItemSource<K> + ?Sized>(
        &mut self,
        containers: &ContainerSet,
        source: &S,
        ctx: &QueryContext<K>,
    ) {
        let mut queries: Vec<(ContainerId, Vec<K>)> = Vec::new();
        let mut records = Vec::new();

        for id in containers.connected(ctx.origin).iter().rev().copied() {
            let Some(spec) = containers.get(id) else {
                warn!(container = id.get(), "connected container is not declared; skipping");
                continue;
            };
            if spec.disabled {
                continue;
            }
            match source.items(id, ctx) {
                Ok(keys) => {
                    queries.push((id, keys));
                    records.push(ContainerRecord {
                        id,
                        rect: source.container_bounds(id).unwrap_or(Rect::ZERO),
                        layout: spec.layout,
                        drop_on_empty: spec.drop_on_empty,
                    });
                }
                Err(err) => {
                    warn!(container = id.get(), %err, "item query failed; skipping container");
                }
            }
        }

        let mut items = Vec::new();
        let mut query_order = Vec::with_capacity(queries.len());
        let mut owners = HashMap::new();
        let mut origin_slot = None;

        for (id, keys) in queries.into_iter().rev() {
            query_order.push(id);
            let mut previous = None;
            for key in keys {
                owners.insert(key, id);
                if key == ctx.item {
                    origin_slot = Some(Slot {
                        container: id,
                        after: previous,
                    });
                    continue;
                }
                items.push(ItemRecord {
                    key,
                    container: id,
                    parent: source.item_parent(&key).unwrap_or(id),
                    rect: source.item_bounds(&key).unwrap_or(Rect::ZERO),
                });
                previous = Some(key);
            }
        }

        trace!(
            items = items.len(),
            containers = records.len(),
            "registry refreshed"
        );

        *self = Self {
            items,
            containers: records,
            query_order,
            owners,
            origin_slot,
        };
    }

    /// Drop all cached data.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Registered items, dragged item excluded.
    #[must_use]
    pub fn items(&self) -> &[ItemRecord<K>] {
        &self.items
    }

    /// Registered containers, lowest priority first.
    #[must_use]
    pub fn containers(&self) -> &[ContainerRecord] {
        &self.containers
    }

    /// Containers in the order their items were instantiated.
    #[must_use]
    pub fn query_order(&self) -> &[ContainerId] {
        &self.query_order
    }

    /// Look up a registered container.
    #[must_use]
    pub fn container(&self, id: ContainerId) -> Option<&ContainerRecord> {
        self.containers.iter().find(|c| c.id == id)
    }

    /// Look up a registered item.
    #[must_use]
    pub fn item(&self, key: &K) -> Option<&ItemRecord<K>> {
        self.items.iter().find(|r| r.key == *key)
    }

    /// The container whose query produced `key` during the last refresh.
    #[must_use]
    pub fn container_of(&self, key: &K) -> Option<ContainerId> {
        self.owners.get(key).copied()
    }

    /// Where the dragged item sat when the registry was refreshed.
    #[must_use]
    pub fn origin_slot(&self) -> Option<Slot<K>> {
        self.origin_slot
    }

    /// Items physically inside `container`, in document order.
    pub fn items_in(&self, container: ContainerId) -> impl Iterator<Item = &ItemRecord<K>> + '_ {
        self.items.iter().filter(move |r| r.parent == container)
    }

    /// Returns `true` if `container` is registered and its bounds intersect `hit`.
    #[must_use]
    pub fn container_hit(&self, container: ContainerId, hit: Rect) -> bool {
        self.containers
            .iter()
            .rev()
            .any(|c| c.id == container && intersects_with(hit, c.rect))
    }

    /// Resolve a drop target to the slot it describes.
    #[must_use]
    pub fn slot_for(&self, target: &DropTarget<K>) -> Slot<K> {
        let after = match (target.anchor, target.side) {
            (None, _) => None,
            (Some(anchor), Side::After) => Some(anchor),
            (Some(anchor), Side::Before) => {
                let mut previous = None;
                for record in self.items_in(target.container) {
                    if record.key == anchor {
                        break;
                    }
                    previous = Some(record.key);
                }
                previous
            }
        };
        Slot {
            container: target.container,
            after,
        }
    }

    /// On-screen origin the placeholder takes for `target`.
    #[must_use]
    pub fn placeholder_origin(&self, target: &DropTarget<K>) -> Point {
        let container = self.container(target.container);
        let anchor = target.anchor.and_then(|key| self.item(&key));
        match (anchor, target.side) {
            (Some(anchor), Side::Before) => anchor.rect.origin(),
            (Some(anchor), Side::After) => {
                let floating = container.is_some_and(|c| c.layout.is_floating());
                if floating {
                    Point::new(anchor.rect.x1, anchor.rect.y0)
                } else {
                    Point::new(anchor.rect.x0, anchor.rect.y1)
                }
            }
            (None, _) => container.map_or(Point::ZERO, |c| c.rect.origin()),
        }
    }
}
