//! Drag session controller.
//!
//! [`DragRef`] owns one draggable element's pointer lifecycle. The host feeds
//! it raw pointer input; it moves the element and broadcasts notifications.
//!
//! # State Machine
//!
//! ```text
//!            pointer_down              move ≥ threshold
//!   Idle ─────────────────▶ Armed ─────────────────────▶ Dragging
//!    ▲                        │                              │ move
//!    │        pointer_up      │          pointer_up          ▼
//!    └────────────────────────┴──────────────────────────────┘
//! ```
//!
//! - **Idle → Armed** on a primary mouse button or any touch. Captures the
//!   pickup point in page and element space, the scroll offset, and (once per
//!   root element) the element's pre-existing inline transform.
//! - **Armed → Dragging** when the Manhattan distance from the pickup point
//!   reaches `drag_start_threshold`. The crossing move is also the first
//!   dragging move, so the element follows the pointer immediately.
//! - **Dragging → Dragging** on every move: direction hysteresis, active
//!   transform, element style, optional `moved` broadcast.
//! - **→ Idle** on pointer up. A drag that never started ends silently.
//!   Otherwise `released` fires, the active transform folds into the passive
//!   transform, and `ended` fires.
//!
//! # Invariants
//!
//! 1. Exactly one [`DragState`] holds at any time.
//! 2. `has_moved()` implies `has_started_dragging()`.
//! 3. `started` fires at most once per pointer sequence.
//! 4. The reported direction on an axis changes only after movement on that
//!    axis exceeds `pointer_direction_change_threshold` since the last change.
//!    It never decays back to neutral.
//! 5. Nothing is emitted after [`dispose`](DragRef::dispose).
//!
//! # Failure Modes
//!
//! Invalid input is never an error. Each entry point returns a
//! [`DragDispatch`] whose outcome says why an event was ignored.
//!
//! Subscribers run while the host is inside a `pointer_*` call. A subscriber
//! that needs to call back into the session should either queue the work or
//! the host should wrap its input handling in a
//! [`BatchScope`](crate::BatchScope) with a [`BatchDispatcher`](crate::BatchDispatcher).

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use dragline_core::config::{DragConfig, MOUSE_EVENT_IGNORE_TIME};
use dragline_core::event::{PointerInput, PointerKind, is_touch_event};
use dragline_core::geometry::{Point, Rect, rounded_translate, svg_translate};
use tracing::{debug, trace};
use web_time::Instant;

use crate::host::{
    DragElement, GlobalListeners, NotificationDispatcher, RootListeners, ScrollPositionProvider,
};
use crate::reactive::channel::EventChannel;

static NEXT_DRAG_REF_ID: AtomicU64 = AtomicU64::new(1);

// ---------------------------------------------------------------------------
// Identifiers and small value types
// ---------------------------------------------------------------------------

/// Process-unique identity of a [`DragRef`], carried by every notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DragRefId(u64);

impl DragRefId {
    fn next() -> Self {
        Self(NEXT_DRAG_REF_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DragRefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "drag#{}", self.0)
    }
}

/// Identity of a drop container, assigned by the drop-target layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(pub u64);

/// Lifecycle state of a drag session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragState {
    /// No pointer is down.
    #[default]
    Idle,
    /// Pointer is down, start threshold not yet crossed.
    Armed,
    /// Threshold crossed; the element follows the pointer.
    Dragging,
}

impl DragState {
    /// Whether a pointer sequence is in progress (Armed or Dragging).
    #[inline]
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Axis to which movement can be locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragAxis {
    X,
    Y,
}

/// Last known direction on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AxisDirection {
    Negative,
    #[default]
    Neutral,
    Positive,
}

impl AxisDirection {
    /// `-1`, `0`, or `1`.
    #[inline]
    #[must_use]
    pub const fn signum(self) -> i8 {
        match self {
            Self::Negative => -1,
            Self::Neutral => 0,
            Self::Positive => 1,
        }
    }
}

/// Horizontal and vertical drag direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DirectionDelta {
    pub x: AxisDirection,
    pub y: AxisDirection,
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// Payload of the before-started, started, released, and ended channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragLifecycleEvent {
    pub source: DragRefId,
}

/// Payload of the continuous move channel.
#[derive(Debug, Clone, PartialEq)]
pub struct DragMoveEvent {
    pub source: DragRefId,
    /// Constrained pointer position in scroll-compensated page space.
    pub pointer_position: Point,
    /// The raw event that produced this move.
    pub event: PointerInput,
    pub delta: DirectionDelta,
}

/// Payload of the dropped channel, produced by the drop-target layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropEvent {
    pub source: DragRefId,
    pub previous_index: usize,
    pub current_index: usize,
    pub container: ContainerId,
    pub previous_container: ContainerId,
}

impl DropEvent {
    /// Whether the item was dropped back into the list it came from.
    #[inline]
    #[must_use]
    pub fn is_same_container(&self) -> bool {
        self.container == self.previous_container
    }
}

struct DragChannels {
    before_started: EventChannel<DragLifecycleEvent>,
    started: EventChannel<DragLifecycleEvent>,
    released: EventChannel<DragLifecycleEvent>,
    ended: EventChannel<DragLifecycleEvent>,
    dropped: EventChannel<DropEvent>,
    moved: EventChannel<DragMoveEvent>,
}

impl DragChannels {
    fn new() -> Self {
        Self {
            before_started: EventChannel::new("before_started"),
            started: EventChannel::new("started"),
            released: EventChannel::new("released"),
            ended: EventChannel::new("ended"),
            dropped: EventChannel::new("dropped"),
            moved: EventChannel::new("moved"),
        }
    }

    fn close_all(&self) {
        self.before_started.close();
        self.started.close();
        self.released.close();
        self.ended.close();
        self.dropped.close();
        self.moved.close();
    }
}

// ---------------------------------------------------------------------------
// Dispatch results
// ---------------------------------------------------------------------------

/// Which entry point produced a [`DragDispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    PointerDown,
    PointerMove,
    PointerUp,
}

/// Why an input event was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragIgnoredReason {
    Disposed,
    Disabled,
    AlreadyDragging,
    NonPrimaryButton,
    SyntheticMouseEvent,
    NoActivePointer,
    PointerKindMismatch,
}

/// What one input event did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// The state machine changed state.
    Transition { from: DragState, to: DragState },
    /// The event was consumed without a state change.
    Tracked,
    /// The event was dropped.
    Ignored(DragIgnoredReason),
}

/// Result of one input dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragDispatch {
    pub phase: DragPhase,
    pub outcome: DragOutcome,
    /// The host should suppress the platform's default handling.
    pub default_prevented: bool,
}

impl DragDispatch {
    const fn ignored(phase: DragPhase, reason: DragIgnoredReason) -> Self {
        Self {
            phase,
            outcome: DragOutcome::Ignored(reason),
            default_prevented: false,
        }
    }

    const fn transition(phase: DragPhase, from: DragState, to: DragState) -> Self {
        Self {
            phase,
            outcome: DragOutcome::Transition { from, to },
            default_prevented: false,
        }
    }

    const fn tracked(phase: DragPhase) -> Self {
        Self {
            phase,
            outcome: DragOutcome::Tracked,
            default_prevented: false,
        }
    }

    /// Whether the event was dropped.
    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        matches!(self.outcome, DragOutcome::Ignored(_))
    }
}

// ---------------------------------------------------------------------------
// DragRef
// ---------------------------------------------------------------------------

/// Drag session controller for one element.
pub struct DragRef<E: DragElement> {
    id: DragRefId,
    root: E,
    config: DragConfig,
    dispatcher: Rc<dyn NotificationDispatcher>,
    scroll: Rc<dyn ScrollPositionProvider>,
    channels: DragChannels,

    state: DragState,
    has_moved: bool,
    disabled: bool,
    disposed: bool,
    lock_axis: Option<DragAxis>,
    native_interactions_enabled: bool,

    root_listeners: Option<RootListeners>,
    global_listeners: Option<GlobalListeners>,

    pickup_position_in_element: Point,
    pickup_position_on_page: Point,
    scroll_position: Point,
    /// `None` until the first arming on the current root element.
    initial_transform: Option<String>,
    passive_transform: Point,
    active_transform: Point,
    pointer_direction_delta: DirectionDelta,
    pointer_position_at_last_direction_change: Point,
    last_touch_event_time: Option<Instant>,
}

impl<E: DragElement> fmt::Debug for DragRef<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragRef")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("disabled", &self.disabled)
            .field("disposed", &self.disposed)
            .field("active_transform", &self.active_transform)
            .field("passive_transform", &self.passive_transform)
            .finish_non_exhaustive()
    }
}

impl<E: DragElement> DragRef<E> {
    /// Create a session for `element` and bind its pointer-down listeners.
    pub fn new(
        element: E,
        config: DragConfig,
        dispatcher: Rc<dyn NotificationDispatcher>,
        scroll: Rc<dyn ScrollPositionProvider>,
    ) -> Self {
        let mut drag = Self {
            id: DragRefId::next(),
            root: element,
            config,
            dispatcher,
            scroll,
            channels: DragChannels::new(),
            state: DragState::Idle,
            has_moved: false,
            disabled: false,
            disposed: false,
            lock_axis: None,
            native_interactions_enabled: true,
            root_listeners: Some(RootListeners::default()),
            global_listeners: None,
            pickup_position_in_element: Point::ZERO,
            pickup_position_on_page: Point::ZERO,
            scroll_position: Point::ZERO,
            initial_transform: None,
            passive_transform: Point::ZERO,
            active_transform: Point::ZERO,
            pointer_direction_delta: DirectionDelta::default(),
            pointer_position_at_last_direction_change: Point::ZERO,
            last_touch_event_time: None,
        };
        drag.toggle_native_drag_interactions();
        debug!(drag = %drag.id, "drag session created");
        drag
    }

    // --- Accessors ---------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn id(&self) -> DragRefId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// The element being dragged.
    #[inline]
    #[must_use]
    pub fn root_element(&self) -> &E {
        &self.root
    }

    #[inline]
    pub fn root_element_mut(&mut self) -> &mut E {
        &mut self.root
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Whether the start threshold has been crossed in the current pointer
    /// sequence.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.state == DragState::Dragging
    }

    /// Whether a pointer sequence is in progress, including the armed phase
    /// before the start threshold is crossed.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    #[inline]
    #[must_use]
    pub fn has_started_dragging(&self) -> bool {
        self.state == DragState::Dragging
    }

    /// Whether at least one dragging move has been applied in the current
    /// sequence.
    #[inline]
    #[must_use]
    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    #[inline]
    #[must_use]
    pub fn active_transform(&self) -> Point {
        self.active_transform
    }

    #[inline]
    #[must_use]
    pub fn passive_transform(&self) -> Point {
        self.passive_transform
    }

    #[inline]
    #[must_use]
    pub fn pointer_direction_delta(&self) -> DirectionDelta {
        self.pointer_direction_delta
    }

    /// Where inside the element the pointer grabbed it.
    #[inline]
    #[must_use]
    pub fn pickup_position_in_element(&self) -> Point {
        self.pickup_position_in_element
    }

    #[inline]
    #[must_use]
    pub fn pickup_position_on_page(&self) -> Point {
        self.pickup_position_on_page
    }

    #[inline]
    #[must_use]
    pub fn root_listeners(&self) -> Option<RootListeners> {
        self.root_listeners
    }

    /// Move/up listeners, present only while a pointer sequence is active.
    #[inline]
    #[must_use]
    pub fn global_listeners(&self) -> Option<GlobalListeners> {
        self.global_listeners
    }

    #[inline]
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    #[inline]
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    #[inline]
    #[must_use]
    pub fn lock_axis(&self) -> Option<DragAxis> {
        self.lock_axis
    }

    /// Constrain movement to one axis, or `None` for free movement.
    pub fn set_lock_axis(&mut self, axis: Option<DragAxis>) {
        self.lock_axis = axis;
    }

    /// Enable or disable the session. Disabling also hands native drag
    /// affordances back to the platform.
    pub fn set_disabled(&mut self, disabled: bool) {
        if disabled != self.disabled {
            self.disabled = disabled;
            self.toggle_native_drag_interactions();
        }
    }

    // --- Channels ----------------------------------------------------------

    /// Fires on every pointer-down, before any arming checks.
    pub fn before_started(&self) -> &EventChannel<DragLifecycleEvent> {
        &self.channels.before_started
    }

    pub fn started(&self) -> &EventChannel<DragLifecycleEvent> {
        &self.channels.started
    }

    pub fn released(&self) -> &EventChannel<DragLifecycleEvent> {
        &self.channels.released
    }

    pub fn ended(&self) -> &EventChannel<DragLifecycleEvent> {
        &self.channels.ended
    }

    pub fn dropped(&self) -> &EventChannel<DropEvent> {
        &self.channels.dropped
    }

    /// Fires on every dragging move, but only does any work while it has
    /// subscribers.
    pub fn moved(&self) -> &EventChannel<DragMoveEvent> {
        &self.channels.moved
    }

    /// Broadcast a drop decided by the drop-target layer.
    pub fn notify_dropped(&self, event: DropEvent) {
        debug!(
            drag = %self.id,
            previous_index = event.previous_index,
            current_index = event.current_index,
            same_container = event.is_same_container(),
            "dropped"
        );
        self.notify(&self.channels.dropped, &event);
    }

    // --- Root element ------------------------------------------------------

    /// Replace the root element and return the previous one.
    ///
    /// Pointer-down listeners move to the new element, and the cached
    /// initial transform is dropped so it is re-read from the new element on
    /// the next arming.
    pub fn with_root_element(&mut self, element: E) -> E {
        let previous = std::mem::replace(&mut self.root, element);
        if self.disposed {
            return previous;
        }
        self.root_listeners = Some(RootListeners::default());
        self.initial_transform = None;
        // The new element starts with the platform defaults.
        self.native_interactions_enabled = true;
        self.toggle_native_drag_interactions();
        debug!(drag = %self.id, "root element replaced");
        previous
    }

    // --- Input -------------------------------------------------------------

    /// Handle a pointer-down on the root element or on one of its handles.
    ///
    /// `handle` is the element that received the event when it is not the
    /// root itself.
    pub fn pointer_down(&mut self, event: &PointerInput, handle: Option<&E>) -> DragDispatch {
        const PHASE: DragPhase = DragPhase::PointerDown;

        if self.root_listeners.is_none() {
            return DragDispatch::ignored(PHASE, DragIgnoredReason::Disposed);
        }

        self.notify(
            &self.channels.before_started,
            &DragLifecycleEvent { source: self.id },
        );

        let reason = if self.disabled {
            Some(DragIgnoredReason::Disabled)
        } else if self.state.is_active() {
            Some(DragIgnoredReason::AlreadyDragging)
        } else if event.button().is_some_and(|button| !button.is_primary()) {
            Some(DragIgnoredReason::NonPrimaryButton)
        } else if self.is_synthetic_mouse_event(event) {
            Some(DragIgnoredReason::SyntheticMouseEvent)
        } else {
            None
        };
        if let Some(reason) = reason {
            debug!(drag = %self.id, ?reason, "pointer down ignored");
            return DragDispatch::ignored(PHASE, reason);
        }

        let reference_rect = handle.map_or_else(
            || self.root.bounding_client_rect(),
            |handle| handle.bounding_client_rect(),
        );
        self.initialize_drag_sequence(reference_rect, event);
        self.set_state(DragState::Armed);
        DragDispatch::transition(PHASE, DragState::Idle, DragState::Armed)
    }

    /// Handle a document-level pointer move.
    pub fn pointer_move(&mut self, event: &PointerInput) -> DragDispatch {
        const PHASE: DragPhase = DragPhase::PointerMove;

        if let Err(reason) = self.check_tracking(event) {
            return DragDispatch::ignored(PHASE, reason);
        }

        let from = self.state;
        if from == DragState::Armed {
            let pointer = self.pointer_position_on_page(event);
            let distance = pointer.manhattan_distance(self.pickup_position_on_page);
            if distance < self.config.drag_start_threshold {
                return DragDispatch::tracked(PHASE);
            }
            self.start_drag_sequence(event);
        }

        let default_prevented = self.update_active_drag(event);
        let mut dispatch = if from == self.state {
            DragDispatch::tracked(PHASE)
        } else {
            DragDispatch::transition(PHASE, from, self.state)
        };
        dispatch.default_prevented = default_prevented;
        dispatch
    }

    /// Handle a document-level pointer up.
    pub fn pointer_up(&mut self, event: &PointerInput) -> DragDispatch {
        const PHASE: DragPhase = DragPhase::PointerUp;

        if let Err(reason) = self.check_tracking(event) {
            return DragDispatch::ignored(PHASE, reason);
        }

        self.remove_global_listeners();
        let from = self.state;
        self.set_state(DragState::Idle);
        self.has_moved = false;

        if from == DragState::Dragging {
            let lifecycle = DragLifecycleEvent { source: self.id };
            self.notify(&self.channels.released, &lifecycle);
            // The next drag continues from where this one stopped.
            self.passive_transform = self.active_transform;
            self.notify(&self.channels.ended, &lifecycle);
        }

        DragDispatch::transition(PHASE, from, DragState::Idle)
    }

    // --- Lifecycle ---------------------------------------------------------

    /// Restore the element's pre-drag inline transform and zero both the
    /// active and passive transforms. Does not change [`state`](Self::state).
    pub fn reset(&mut self) {
        let initial = self.initial_transform.as_deref().filter(|t| !t.is_empty());
        self.root.set_inline_transform(initial);
        self.active_transform = Point::ZERO;
        self.passive_transform = Point::ZERO;
        debug!(drag = %self.id, "drag transforms reset");
    }

    /// Tear the session down. Safe to call more than once.
    ///
    /// Detaches every listener, removes the element from its document if a
    /// drag has started, and closes every channel. An armed press that never
    /// crossed the threshold leaves the element in place.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.root_listeners = None;
        if self.state == DragState::Dragging {
            self.root.detach();
        }
        self.remove_global_listeners();
        self.state = DragState::Idle;
        self.has_moved = false;
        self.channels.close_all();
        self.disposed = true;
        debug!(drag = %self.id, "drag session disposed");
    }

    // --- Internals ---------------------------------------------------------

    fn notify<T: Clone + 'static>(&self, channel: &EventChannel<T>, event: &T) {
        self.dispatcher.dispatch(&mut || {
            channel.emit(event);
        });
    }

    fn set_state(&mut self, to: DragState) {
        if self.state != to {
            debug!(drag = %self.id, from = ?self.state, to = ?to, "drag state transition");
            self.state = to;
        }
    }

    fn check_tracking(&self, event: &PointerInput) -> Result<(), DragIgnoredReason> {
        if self.disposed {
            return Err(DragIgnoredReason::Disposed);
        }
        let Some(listeners) = self.global_listeners else {
            return Err(DragIgnoredReason::NoActivePointer);
        };
        if listeners.kind != event.kind() {
            return Err(DragIgnoredReason::PointerKindMismatch);
        }
        Ok(())
    }

    fn is_synthetic_mouse_event(&self, event: &PointerInput) -> bool {
        !is_touch_event(event)
            && self.last_touch_event_time.is_some_and(|touched| {
                event.time().saturating_duration_since(touched) < MOUSE_EVENT_IGNORE_TIME
            })
    }

    fn initialize_drag_sequence(&mut self, reference_rect: Rect, event: &PointerInput) {
        // Captured once per root so our own transforms never stack.
        if self.initial_transform.is_none() {
            self.initial_transform = Some(self.root.inline_transform().unwrap_or_default());
        }

        self.has_moved = false;
        self.scroll_position = self.scroll.scroll_position();
        self.pickup_position_in_element = self.pointer_position_in_element(reference_rect, event);
        let pointer = self.pointer_position_on_page(event);
        self.pickup_position_on_page = pointer;
        self.pointer_direction_delta = DirectionDelta::default();
        self.pointer_position_at_last_direction_change = pointer;

        let listeners = GlobalListeners::for_kind(event.kind());
        let slot = &mut self.global_listeners;
        self.dispatcher.run_outside(&mut || *slot = Some(listeners));

        trace!(
            drag = %self.id,
            x = pointer.x,
            y = pointer.y,
            touch = is_touch_event(event),
            "drag sequence armed"
        );
    }

    fn start_drag_sequence(&mut self, event: &PointerInput) {
        self.set_state(DragState::Dragging);
        self.notify(
            &self.channels.started,
            &DragLifecycleEvent { source: self.id },
        );
        if event.kind() == PointerKind::Touch {
            self.last_touch_event_time = Some(event.time());
        }
    }

    /// Apply one dragging move. Returns whether default handling should be
    /// suppressed.
    fn update_active_drag(&mut self, event: &PointerInput) -> bool {
        let pointer = self.constrained_pointer_position(event);
        self.has_moved = true;
        self.update_pointer_direction_delta(pointer);

        self.active_transform = pointer - self.pickup_position_on_page + self.passive_transform;
        self.apply_root_transform();

        trace!(
            drag = %self.id,
            x = self.active_transform.x,
            y = self.active_transform.y,
            "drag moved"
        );

        if self.channels.moved.has_subscribers() {
            let moved = DragMoveEvent {
                source: self.id,
                pointer_position: pointer,
                event: event.clone(),
                delta: self.pointer_direction_delta,
            };
            self.notify(&self.channels.moved, &moved);
        }

        self.global_listeners
            .is_some_and(|listeners| listeners.pointer_move.wants_prevent_default)
    }

    fn apply_root_transform(&mut self) {
        let Point { x, y } = self.active_transform;
        let translate = rounded_translate(x, y);
        let style = match self.initial_transform.as_deref() {
            Some(initial) if !initial.is_empty() => format!("{translate} {initial}"),
            _ => translate.to_string(),
        };
        self.root.set_inline_transform(Some(&style));

        if self.root.is_graphics_element() {
            self.root.set_transform_attribute(&svg_translate(x, y));
        }
    }

    fn update_pointer_direction_delta(&mut self, pointer: Point) {
        let threshold = self.config.pointer_direction_change_threshold;
        let last = &mut self.pointer_position_at_last_direction_change;
        let delta = &mut self.pointer_direction_delta;

        if (pointer.x - last.x).abs() > threshold {
            delta.x = if pointer.x > last.x {
                AxisDirection::Positive
            } else {
                AxisDirection::Negative
            };
            last.x = pointer.x;
        }
        if (pointer.y - last.y).abs() > threshold {
            delta.y = if pointer.y > last.y {
                AxisDirection::Positive
            } else {
                AxisDirection::Negative
            };
            last.y = pointer.y;
        }
    }

    fn remove_global_listeners(&mut self) {
        let slot = &mut self.global_listeners;
        self.dispatcher.run_outside(&mut || *slot = None);
    }

    fn toggle_native_drag_interactions(&mut self) {
        let should_enable = self.disabled;
        if should_enable != self.native_interactions_enabled {
            self.native_interactions_enabled = should_enable;
            self.root.set_native_drag_interactions(should_enable);
        }
    }

    /// Scroll-compensated page position of the pointer.
    fn pointer_position_on_page(&self, event: &PointerInput) -> Point {
        event.page_point() - self.scroll_position
    }

    fn constrained_pointer_position(&self, event: &PointerInput) -> Point {
        let mut point = self.pointer_position_on_page(event);
        match self.lock_axis {
            Some(DragAxis::X) => point.y = self.pickup_position_on_page.y,
            Some(DragAxis::Y) => point.x = self.pickup_position_on_page.x,
            None => {}
        }
        point
    }

    /// Pointer position relative to the root's top-left corner, measured
    /// through whichever element received the pointer-down.
    fn pointer_position_in_element(&self, reference_rect: Rect, event: &PointerInput) -> Point {
        let element_rect = self.root.bounding_client_rect();
        let point = event.page_point();
        let x = point.x - reference_rect.left - self.scroll_position.x;
        let y = point.y - reference_rect.top - self.scroll_position.y;
        Point::new(
            reference_rect.left - element_rect.left + x,
            reference_rect.top - element_rect.top + y,
        )
    }
}
