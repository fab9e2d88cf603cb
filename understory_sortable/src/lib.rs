// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_sortable --heading-base-level=0

//! Understory Sortable: a pointer-driven drag-and-reorder engine.
//!
//! This crate tracks one pointer gesture at a time over a set of draggable
//! items spread across connected drop containers. It decides, on every move,
//! where the dragged item would land, keeps a placeholder there, and on
//! release either commits the reorder or animates the item back to where it
//! started.
//!
//! It does not render anything and does not own your data. Hosts:
//!
//! - declare containers with a [`ContainerSpec`] (connect-with partners,
//!   disabled flag, layout),
//! - expose items and geometry through [`ItemSource`],
//! - feed pointer samples and animation ticks to [`Sortable`], and
//! - apply the [`SortEvent`]s they get back.
//!
//! ## Pieces
//!
//! - [`geometry`]: axis overlap, pointer/slot and rectangle intersection.
//! - [`container`]: container ids, specs, and the connect-with relation.
//! - [`registry`]: the per-gesture snapshot of items and containers.
//! - [`gesture`]: the `Idle → Armed → Dragging` recognizer with distance and
//!   delay thresholds.
//! - [`placement`]: the pluggable [`PlacementResolver`] and its default.
//! - [`session`]: the [`DragSession`] and its placeholder.
//! - [`revert`]: the pluggable [`RevertAnimator`] and a linear default.
//! - [`list_model`]: a ready-made [`ItemSource`] over ordered lists.
//!
//! ## Minimal example
//!
//! Move the first item of `A` into the empty container `B`:
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use understory_sortable::{
//!     ContainerId, ContainerSpec, Layout, ListModel, PointerSample, SortEvent, Sortable,
//!     SortableConfig,
//! };
//!
//! let a = ContainerId::new(1);
//! let b = ContainerId::new(2);
//!
//! let mut model = ListModel::new();
//! model.add_list(a, Rect::new(0.0, 0.0, 100.0, 200.0), Layout::Stacked, Size::new(100.0, 20.0));
//! model.add_list(b, Rect::new(200.0, 0.0, 300.0, 200.0), Layout::Stacked, Size::new(100.0, 20.0));
//! model.extend(a, [1_u32, 2]);
//!
//! let mut sortable = Sortable::startup(SortableConfig::new()).unwrap();
//! sortable.insert_container(a, ContainerSpec::new().connect_with([a, b]));
//! sortable.insert_container(b, ContainerSpec::new().connect_with([a, b]));
//!
//! sortable.pointer_down(1, a, PointerSample::pressed(Point::new(50.0, 10.0), 0));
//! let started = sortable.pointer_move(&model, PointerSample::pressed(Point::new(60.0, 10.0), 1));
//! assert_eq!(started.events[0], SortEvent::DragStart { item: 1, container: a });
//! assert!(started.prevent_default);
//!
//! sortable.pointer_move(&model, PointerSample::pressed(Point::new(250.0, 100.0), 2));
//! let released = sortable.pointer_up(PointerSample::released(Point::new(250.0, 100.0), 3));
//!
//! let moved = SortEvent::Drop { item: 1, from: a, to: b, after: None };
//! assert_eq!(released.events, vec![moved]);
//! model.apply(&moved);
//! assert_eq!(model.items(a), &[2]);
//! assert_eq!(model.items(b), &[1]);
//! ```
//!
//! ## Releasing outside
//!
//! When the pointer leaves every accepting container the placeholder is
//! hidden. Releasing then cancels: with [`Revert`] enabled the dragged
//! representation flies back to where it was grabbed and the session is torn
//! down once [`Sortable::tick`] reports the animation finished.
//!
//! ## Robustness
//!
//! - A move sample reporting no held button ends the gesture as a release
//!   would. [`Sortable::abort`] feeds the same path for focus loss.
//! - [`Sortable::finalize`] is idempotent: a second call during a revert, or
//!   after teardown, does nothing, and exactly one `Drop`/`Cancel` is emitted.
//! - Presses and moves that arrive while a revert animation is running are
//!   ignored.
//! - Item queries that fail skip their container for that gesture; missing
//!   geometry never intersects anything.
//!
//! ## Logging
//!
//! The engine emits `tracing` events at `debug` (gesture start/stop, revert),
//! `trace` (placement, refresh), and `warn` (skipped containers). Install any
//! subscriber to see them.
//!
//! ## Features
//!
//! - `std` (default): forwarded to `kurbo` and `tracing`.
//! - `libm`: use `kurbo`'s `libm` backend in `no_std` builds.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod container;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod list_model;
pub mod placement;
pub mod pointer;
pub mod registry;
pub mod revert;
pub mod session;
mod sortable;

pub use config::{ConfigError, DropBehaviour, Revert, SortableConfig};
pub use container::{ContainerId, ContainerSet, ContainerSpec, Layout};
pub use event::{Response, SortEvent};
pub use gesture::GestureState;
pub use list_model::ListModel;
pub use placement::{DropTarget, PlacementResolver, PointerPlacement, Resolution, Side};
pub use pointer::PointerSample;
pub use registry::{ItemSource, QueryContext, QueryError, Registry};
pub use revert::{LinearRevert, RevertAnimator};
pub use session::{DragSession, Placeholder, Slot};
pub use sortable::{DropGovernor, Sortable};
