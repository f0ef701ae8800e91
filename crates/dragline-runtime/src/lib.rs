#![forbid(unsafe_code)]

//! Dragline Runtime
//!
//! Stateful pieces of a pointer-driven drag interaction.
//!
//! # Key Components
//!
//! - [`DragRef`] - Drag session controller: Idle → Armed → Dragging → Idle
//! - [`EventChannel`] - Multi-subscriber broadcast channel with RAII [`Subscription`]s
//! - [`BatchScope`] - Defers channel deliveries until the outermost scope exits
//! - [`DragElement`], [`ScrollPositionProvider`], [`NotificationDispatcher`] -
//!   the host collaborators a session is built from
//!
//! # Role in Dragline
//! The host owns real elements and real input. It feeds raw pointer events
//! into a [`DragRef`], which updates its state machine, moves the element,
//! and broadcasts lifecycle notifications. Drop targets listen for those
//! notifications and reorder their data with `dragline_core::reorder`.
//!
//! # Threading
//! Everything here is single-threaded (`Rc`, `RefCell`, thread-local batch
//! state). All transitions happen synchronously inside the input call.

pub mod drag_ref;
pub mod host;
pub mod reactive;

pub use drag_ref::{
    AxisDirection, ContainerId, DirectionDelta, DragAxis, DragDispatch, DragIgnoredReason,
    DragLifecycleEvent, DragMoveEvent, DragOutcome, DragPhase, DragRef, DragRefId, DragState,
    DropEvent,
};
pub use host::{
    BatchDispatcher, DragElement, GlobalListeners, HeadlessElement, ImmediateDispatcher,
    ListenerOptions, NotificationDispatcher, RootListeners, ScrollPositionProvider,
    StaticScrollPosition,
};
pub use reactive::batch::BatchScope;
pub use reactive::channel::{ChannelClosed, EventChannel, Subscription};
