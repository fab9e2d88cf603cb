// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop containers and the connect-with relation between them.
//!
//! A container is a region that owns zero or more items and can accept drops.
//! The engine never stores items here; it only keeps the per-container policy
//! that the [registry](crate::registry) consults on every refresh.
//!
//! ## Priority
//!
//! The order of [`ContainerSpec::connect_with`] is the caller-controlled
//! priority: when two connected containers overlap under the pointer, the one
//! declared first wins. A container that should take part in drops started
//! from itself must list itself when it declares any partners.
//!
//! ```
//! use understory_sortable::container::{ContainerId, ContainerSet, ContainerSpec};
//!
//! let a = ContainerId::new(1);
//! let b = ContainerId::new(2);
//!
//! let mut set = ContainerSet::new();
//! set.insert(a, ContainerSpec::new().connect_with([a, b]));
//! set.insert(b, ContainerSpec::new());
//!
//! assert_eq!(set.connected(a).as_slice(), &[a, b]);
//! // No partners declared: a container is only connected to itself.
//! assert_eq!(set.connected(b).as_slice(), &[b]);
//! ```

use alloc::vec::Vec;
use smallvec::SmallVec;

/// Inline list of container ids, sized for the common "a few partners" case.
pub type ContainerList = SmallVec<[ContainerId; 4]>;

/// Caller-chosen identifier for a drop container.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(pub u32);

impl ContainerId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Return the raw identifier.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// How items are arranged inside a container.
///
/// This drives the insertion-side tie-break and where the placeholder lands
/// when inserted after an anchor item.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Items are strictly stacked top to bottom.
    #[default]
    Stacked,
    /// Items may sit side by side and wrap.
    Floating,
}

impl Layout {
    /// Returns `true` for [`Layout::Floating`].
    #[must_use]
    pub const fn is_floating(self) -> bool {
        matches!(self, Self::Floating)
    }
}

/// Per-container drag policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerSpec {
    /// Containers a drag started here may drop into, in priority order.
    ///
    /// When empty the container is only connected to itself.
    pub connect_with: ContainerList,
    /// Disabled containers never start drags and never accept drops.
    pub disabled: bool,
    /// Arrangement of the container's items.
    pub layout: Layout,
    /// Whether the placeholder may move into this container while it has no items.
    pub drop_on_empty: bool,
}

impl Default for ContainerSpec {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerSpec {
    /// An enabled, stacked container with no declared partners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connect_with: ContainerList::new(),
            disabled: false,
            layout: Layout::Stacked,
            drop_on_empty: true,
        }
    }

    /// Replace the connect-with list. Order is priority order.
    #[must_use]
    pub fn connect_with(mut self, partners: impl IntoIterator<Item = ContainerId>) -> Self {
        self.connect_with = partners.into_iter().collect();
        self
    }

    /// Set the disabled flag.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the item layout.
    #[must_use]
    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Set whether empty containers accept the placeholder.
    #[must_use]
    pub fn drop_on_empty(mut self, drop_on_empty: bool) -> Self {
        self.drop_on_empty = drop_on_empty;
        self
    }
}

/// The set of declared containers.
#[derive(Clone, Debug, Default)]
pub struct ContainerSet {
    entries: Vec<(ContainerId, ContainerSpec)>,
}

impl ContainerSet {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace the spec for `id`.
    pub fn insert(&mut self, id: ContainerId, spec: ContainerSpec) {
        match self.entries.iter_mut().find(|(k, _)| *k == id) {
            Some((_, existing)) => *existing = spec,
            None => self.entries.push((id, spec)),
        }
    }

    /// Remove a container, returning its spec.
    pub fn remove(&mut self, id: ContainerId) -> Option<ContainerSpec> {
        let pos = self.entries.iter().position(|(k, _)| *k == id)?;
        Some(self.entries.remove(pos).1)
    }

    /// Look up a container's spec.
    #[must_use]
    pub fn get(&self, id: ContainerId) -> Option<&ContainerSpec> {
        self.entries.iter().find(|(k, _)| *k == id).map(|(_, s)| s)
    }

    /// Mutable lookup of a container's spec.
    pub fn get_mut(&mut self, id: ContainerId) -> Option<&mut ContainerSpec> {
        self.entries
            .iter_mut()
            .find(|(k, _)| *k == id)
            .map(|(_, s)| s)
    }

    /// Returns `true` if `id` is declared and not disabled.
    #[must_use]
    pub fn is_enabled(&self, id: ContainerId) -> bool {
        self.get(id).is_some_and(|spec| !spec.disabled)
    }

    /// Containers reachable from `origin`: its declared partners, or `origin` alone.
    ///
    /// Unknown origins yield an empty list.
    #[must_use]
    pub fn connected(&self, origin: ContainerId) -> ContainerList {
        match self.get(origin) {
            Some(spec) if !spec.connect_with.is_empty() => spec.connect_with.clone(),
            Some(_) => core::iter::once(origin).collect(),
            None => ContainerList::new(),
        }
    }

    /// Number of declared containers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no containers are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ContainerId = ContainerId::new(1);
    const B: ContainerId = ContainerId::new(2);
    const C: ContainerId = ContainerId::new(3);

    #[test]
    fn connected_keeps_declared_order() {
        let mut set = ContainerSet::new();
        set.insert(A, ContainerSpec::new().connect_with([C, A, B]));
        assert_eq!(set.connected(A).as_slice(), &[C, A, B]);
    }

    #[test]
    fn unknown_origin_is_not_connected() {
        let set = ContainerSet::new();
        assert!(set.connected(A).is_empty());
    }

    #[test]
    fn insert_replaces_existing_spec() {
        let mut set = ContainerSet::new();
        set.insert(A, ContainerSpec::new());
        set.insert(A, ContainerSpec::new().disabled(true));
        assert_eq!(set.len(), 1);
        assert!(!set.is_enabled(A));
    }

    #[test]
    fn remove_and_toggle() {
        let mut set = ContainerSet::new();
        set.insert(A, ContainerSpec::new());
        set.insert(B, ContainerSpec::new().layout(Layout::Floating));
        set.get_mut(A).unwrap().disabled = true;
        assert!(!set.is_enabled(A));
        assert!(set.get(B).unwrap().layout.is_floating());

        assert!(set.remove(A).is_some());
        assert!(set.remove(A).is_none());
        assert!(!set.is_enabled(A));
        assert_eq!(set.len(), 1);
    }
}
