// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Events emitted by the engine.

use alloc::vec::Vec;

use crate::container::ContainerId;
use crate::placement::Side;

/// Lifecycle notification for hosts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SortEvent<K> {
    /// A drag started.
    DragStart {
        /// Dragged item.
        item: K,
        /// Container it was dragged out of.
        container: ContainerId,
    },
    /// The placeholder moved.
    PlacementChanged {
        /// Container now holding the placeholder.
        container: ContainerId,
        /// Item the placeholder was placed against, `None` for an empty container.
        anchor: Option<K>,
        /// Side of `anchor`.
        side: Side,
    },
    /// The item was committed to a new position.
    Drop {
        /// Dropped item.
        item: K,
        /// Container it left.
        from: ContainerId,
        /// Container it lands in (may equal `from`).
        to: ContainerId,
        /// Item it now follows, `None` for the first position.
        after: Option<K>,
    },
    /// The item returned to where it started.
    Cancel {
        /// The item.
        item: K,
        /// Its container.
        origin: ContainerId,
    },
}

/// Result of feeding an input to the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response<K> {
    /// Events in emission order.
    pub events: Vec<SortEvent<K>>,
    /// The host should suppress the input's default action.
    pub prevent_default: bool,
}

impl<K> Default for Response<K> {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            prevent_default: false,
        }
    }
}

impl<K> Response<K> {
    /// An empty response.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// A response carrying `events`.
    #[must_use]
    pub fn with_events(events: Vec<SortEvent<K>>) -> Self {
        Self {
            events,
            prevent_default: false,
        }
    }

    /// Returns `true` if a [`SortEvent::Drop`] was emitted.
    #[must_use]
    pub fn dropped(&self) -> bool {
        self.events.iter().any(|e| matches!(e, SortEvent::Drop { .. }))
    }

    /// Returns `true` if a [`SortEvent::Cancel`] was emitted.
    #[must_use]
    pub fn cancelled(&self) -> bool {
        self.events.iter().any(|e| matches!(e, SortEvent::Cancel { .. }))
    }
}
