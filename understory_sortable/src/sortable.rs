// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag-and-reorder engine.
//!
//! [`Sortable`] owns the gesture recognizer, the registry snapshot, and at
//! most one [`DragSession`]. Hosts feed it pointer samples and animation
//! ticks and get back a [`Response`] with the resulting events.
//!
//! ## Lifecycle
//!
//! 1. [`Sortable::pointer_down`] arms the recognizer for an item.
//! 2. [`Sortable::pointer_move`] starts the drag once thresholds are met
//!    (refreshing the registry first), then resolves placement on every move.
//! 3. [`Sortable::pointer_up`] finalizes: either tears down right away or
//!    starts a revert animation that [`Sortable::tick`] completes.
//! 4. [`Sortable::abort`] ends a gesture whose release was lost.
//!
//! A press that arrives while a revert animation is still running is
//! ignored; the previous session keeps its placeholder until the animation
//! completes.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use kurbo::Point;
use tracing::{debug, trace};

use crate::config::{ConfigError, DropBehaviour, SortableConfig};
use crate::container::{ContainerId, ContainerSet, ContainerSpec};
use crate::event::{Response, SortEvent};
use crate::gesture::{GestureRecognizer, GestureState, GestureStep};
use crate::placement::{PlacementQuery, PlacementResolver, PointerPlacement, Resolution};
use crate::pointer::PointerSample;
use crate::registry::{ItemSource, QueryContext, Registry};
use crate::revert::{AnimationStep, LinearRevert, RevertAnimator};
use crate::session::{DragSession, Outcome, Slot};

/// Drop-target governance hook, notified at release.
pub trait DropGovernor<K> {
    /// The gesture dragging `item` is being finalized with `sample`.
    fn notify_drop(&mut self, item: K, sample: PointerSample);
}

/// Pointer-driven reorder engine over a set of connected containers.
pub struct Sortable<K> {
    config: SortableConfig,
    containers: ContainerSet,
    registry: Registry<K>,
    gesture: GestureRecognizer,
    pressed: Option<(K, ContainerId)>,
    session: Option<DragSession<K>>,
    resolver: Box<dyn PlacementResolver<K>>,
    animator: Box<dyn RevertAnimator>,
    governor: Option<Box<dyn DropGovernor<K>>>,
}

impl<K: fmt::Debug> fmt::Debug for Sortable<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sortable")
            .field("config", &self.config)
            .field("containers", &self.containers)
            .field("registry", &self.registry)
            .field("gesture", &self.gesture)
            .field("pressed", &self.pressed)
            .field("session", &self.session)
            .field("has_governor", &self.governor.is_some())
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Eq + Hash + fmt::Debug + 'static> Sortable<K> {
    /// Validate `config` and create an idle engine with the default strategies.
    pub fn startup(config: SortableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            containers: ContainerSet::new(),
            registry: Registry::new(),
            gesture: GestureRecognizer::new(config.distance, config.delay),
            pressed: None,
            session: None,
            resolver: Box::new(PointerPlacement),
            animator: Box::new(LinearRevert::default()),
            governor: None,
        })
    }

    /// Replace the placement strategy.
    #[must_use]
    pub fn with_resolver(mut self, resolver: impl PlacementResolver<K> + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Replace the revert animation strategy.
    #[must_use]
    pub fn with_animator(mut self, animator: impl RevertAnimator + 'static) -> Self {
        self.animator = Box::new(animator);
        self
    }

    /// Install or remove the drop-target governance hook.
    pub fn set_governor(&mut self, governor: Option<Box<dyn DropGovernor<K>>>) {
        self.governor = governor;
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &SortableConfig {
        &self.config
    }

    /// Replace the configuration. Thresholds apply from the next move.
    pub fn set_config(&mut self, config: SortableConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.gesture.set_thresholds(config.distance, config.delay);
        self.config = config;
        Ok(())
    }

    /// Declare or replace a container.
    pub fn insert_container(&mut self, id: ContainerId, spec: ContainerSpec) {
        self.containers.insert(id, spec);
    }

    /// Enable or disable a container. Returns `false` for unknown ids.
    ///
    /// Takes effect at the next registry refresh.
    pub fn set_container_disabled(&mut self, id: ContainerId, disabled: bool) -> bool {
        match self.containers.get_mut(id) {
            Some(spec) => {
                spec.disabled = disabled;
                true
            }
            None => false,
        }
    }

    /// Declared containers.
    #[must_use]
    pub const fn containers(&self) -> &ContainerSet {
        &self.containers
    }

    /// Snapshot built at the last drag start.
    #[must_use]
    pub const fn registry(&self) -> &Registry<K> {
        &self.registry
    }

    /// The container an item was enumerated from at the last refresh.
    #[must_use]
    pub fn item_container(&self, item: &K) -> Option<ContainerId> {
        self.registry.container_of(item)
    }

    /// Recognizer state.
    #[must_use]
    pub const fn state(&self) -> GestureState {
        self.gesture.state()
    }

    /// The active session, including one that is reverting.
    #[must_use]
    pub const fn session(&self) -> Option<&DragSession<K>> {
        self.session.as_ref()
    }

    /// Returns `true` while a revert animation owns the session.
    #[must_use]
    pub fn is_reverting(&self) -> bool {
        self.session.as_ref().is_some_and(DragSession::is_reverting)
    }

    /// Rebuild the registry for a drag of `ctx.item`.
    ///
    /// Called automatically at drag start; exposed for hosts that want to
    /// refresh geometry mid-drag after a layout change.
    pub fn refresh<S: ItemSource<K> + ?Sized>(&mut self, source: &S, ctx: &QueryContext<K>) {
        self.registry.refresh(&self.containers, source, ctx);
    }

    /// Press on `item`, which sits in `container`.
    pub fn pointer_down(&mut self, item: K, container: ContainerId, sample: PointerSample) -> Response<K> {
        if self.config.disabled || !self.containers.is_enabled(container) {
            return Response::none();
        }
        if self.is_reverting() {
            debug!(?item, "press ignored while a revert animation is running");
            return Response::none();
        }
        if self.gesture.on_down(sample) == GestureStep::Armed {
            self.pressed = Some((item, container));
        }
        Response::none()
    }

    /// Pointer moved.
    ///
    /// A sample without a held button ends the gesture as a release would.
    pub fn pointer_move<S: ItemSource<K> + ?Sized>(&mut self, source: &S, sample: PointerSample) -> Response<K> {
        match self.gesture.on_move(sample) {
            GestureStep::Started => self.start_drag(source, sample),
            GestureStep::Dragged => {
                let events = self.drag(sample);
                Response {
                    events,
                    prevent_default: true,
                }
            }
            GestureStep::Released { was_dragging } => self.release(was_dragging, sample),
            GestureStep::Pending | GestureStep::Armed | GestureStep::Ignored => Response::none(),
        }
    }

    /// Pointer released.
    pub fn pointer_up(&mut self, sample: PointerSample) -> Response<K> {
        match self.gesture.on_up(sample) {
            GestureStep::Released { was_dragging } => self.release(was_dragging, sample),
            _ => Response::none(),
        }
    }

    /// End the current gesture as if its release was lost (focus loss, window change).
    pub fn abort(&mut self, now: u64) -> Response<K> {
        let position = self
            .session
            .as_ref()
            .filter(|s| !s.is_reverting())
            .and_then(|s| s.pointer().position())
            .or_else(|| self.gesture.down_sample().map(|d| d.position))
            .unwrap_or(Point::ZERO);
        let sample = PointerSample::released(position, now);
        match self.gesture.on_move(sample) {
            GestureStep::Released { was_dragging } => self.release(was_dragging, sample),
            _ => Response::none(),
        }
    }

    /// Advance a running revert animation to `now`.
    ///
    /// Tears the session down once the animation finishes.
    pub fn tick(&mut self, now: u64) -> Response<K> {
        let Some(session) = self.session.as_mut().filter(|s| s.is_reverting()) else {
            return Response::none();
        };
        match self.animator.step(now) {
            AnimationStep::Running(pos) => {
                session.set_helper(pos);
                Response::none()
            }
            AnimationStep::Finished(pos) => {
                session.set_helper(pos);
                Response::with_events(self.clear(false))
            }
            AnimationStep::Idle => Response::with_events(self.clear(false)),
        }
    }

    /// Finalize the active session with the releasing `sample`.
    ///
    /// Notifies the drop governor (unless self-managed), then either starts
    /// the revert animation or clears immediately. Calling this again while a
    /// revert is in flight, or after teardown, does nothing.
    pub fn finalize(&mut self, sample: PointerSample, suppress_propagation: bool) -> Vec<SortEvent<K>> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        if session.is_reverting() {
            return Vec::new();
        }
        if self.config.drop_behaviour == DropBehaviour::Managed {
            if let Some(governor) = self.governor.as_mut() {
                governor.notify_drop(session.item(), sample);
            }
        }
        let Some(duration) = self.config.revert.duration() else {
            return self.clear(suppress_propagation);
        };
        let target = session.revert_target();
        session.begin_revert();
        self.gesture.reset();
        self.pressed = None;
        debug!(item = ?session.item(), ?target, duration, "reverting");
        self.animator.start(session.helper(), target, duration, sample.time);
        Vec::new()
    }

    /// Tear down the active session and report how it ended.
    ///
    /// Emits [`SortEvent::Drop`] when the placeholder sits visibly in a new
    /// slot and [`SortEvent::Cancel`] otherwise, unless `suppress_propagation`.
    pub fn clear(&mut self, suppress_propagation: bool) -> Vec<SortEvent<K>> {
        let Some(session) = self.session.take() else {
            return Vec::new();
        };
        self.animator.cancel();
        if self.gesture.state() != GestureState::Idle {
            self.gesture.reset();
        }
        self.pressed = None;
        let item = session.item();
        let outcome = session.outcome();
        debug!(?item, ?outcome, "drag session cleared");
        if suppress_propagation {
            return Vec::new();
        }
        let event = match outcome {
            Outcome::Moved { from, to } => SortEvent::Drop {
                item,
                from: from.container,
                to: to.container,
                after: to.after,
            },
            Outcome::Returned { origin } => SortEvent::Cancel {
                item,
                origin: origin.container,
            },
        };
        vec![event]
    }

    fn start_drag<S: ItemSource<K> + ?Sized>(&mut self, source: &S, sample: PointerSample) -> Response<K> {
        let down = self.gesture.down_sample();
        let (Some((item, origin)), Some(down)) = (self.pressed.take(), down) else {
            self.gesture.reset();
            return Response::none();
        };
        if !self.containers.is_enabled(origin) {
            debug!(?item, container = origin.get(), "origin disabled before drag start");
            self.gesture.reset();
            return Response::none();
        }

        let ctx = QueryContext { item, origin };
        self.registry.refresh(&self.containers, source, &ctx);
        let slot = self.registry.origin_slot().unwrap_or(Slot {
            container: origin,
            after: None,
        });
        self.session = Some(DragSession::begin(
            item,
            slot,
            source.item_bounds(&item),
            down.position,
        ));
        debug!(?item, container = origin.get(), "drag started");

        let mut events = vec![SortEvent::DragStart {
            item,
            container: origin,
        }];
        events.extend(self.drag(sample));
        Response {
            events,
            prevent_default: true,
        }
    }

    fn drag(&mut self, sample: PointerSample) -> Vec<SortEvent<K>> {
        let Some(session) = self.session.as_mut().filter(|s| !s.is_reverting()) else {
            return Vec::new();
        };
        session.drag_to(sample.position);
        let resolution = self.resolver.resolve(&PlacementQuery {
            registry: &self.registry,
            pointer: session.pointer(),
            item: session.item(),
            current: session.placeholder().slot(),
        });
        match resolution {
            Resolution::Target(target) => {
                let slot = self.registry.slot_for(&target);
                let origin = self.registry.placeholder_origin(&target);
                if session.placeholder_mut().move_to(slot, origin) {
                    trace!(container = target.container.get(), anchor = ?target.anchor, side = ?target.side, "placement changed");
                    return vec![SortEvent::PlacementChanged {
                        container: target.container,
                        anchor: target.anchor,
                        side: target.side,
                    }];
                }
            }
            Resolution::Keep => session.placeholder_mut().show(),
            Resolution::Outside => session.placeholder_mut().hide(),
        }
        Vec::new()
    }

    fn release(&mut self, was_dragging: bool, sample: PointerSample) -> Response<K> {
        self.pressed = None;
        if !was_dragging {
            return Response::none();
        }
        Response::with_events(self.finalize(sample, false))
    }
}
