#![forbid(unsafe_code)]

//! Dragline public facade crate.
//!
//! Re-exports the geometry, input, and reordering primitives from
//! `dragline-core` and the drag session controller from `dragline-runtime`,
//! plus a prelude for hosts wiring up a drag-and-drop list.

use std::fmt;
use std::rc::Rc;

// --- Core re-exports -------------------------------------------------------

pub use dragline_core::config::{
    DEFAULT_DRAG_START_THRESHOLD, DEFAULT_POINTER_DIRECTION_CHANGE_THRESHOLD, DragConfig,
    DragConfigError, MOUSE_EVENT_IGNORE_TIME,
};
pub use dragline_core::event::{
    MouseButton, MouseInput, PointerInput, PointerKind, TouchInput, is_touch_event,
};
pub use dragline_core::geometry::{
    Point, Rect, Translate3d, clamp, rounded_translate, svg_translate,
};
pub use dragline_core::reorder::{ReorderOutcome, copy_between, move_within, transfer_between};

// --- Runtime re-exports ----------------------------------------------------

pub use dragline_runtime::{
    AxisDirection, BatchDispatcher, BatchScope, ChannelClosed, ContainerId, DirectionDelta,
    DragAxis, DragDispatch, DragElement, DragIgnoredReason, DragLifecycleEvent, DragMoveEvent,
    DragOutcome, DragPhase, DragRef, DragRefId, DragState, DropEvent, EventChannel, GlobalListeners,
    HeadlessElement, ImmediateDispatcher, ListenerOptions, NotificationDispatcher, RootListeners,
    ScrollPositionProvider, StaticScrollPosition, Subscription,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for dragline hosts.
#[derive(Debug)]
pub enum Error {
    /// Invalid or unreadable drag configuration.
    Config(DragConfigError),
    /// Subscription attempted on a disposed session's channel.
    Closed(ChannelClosed),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Closed(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Closed(err) => Some(err),
        }
    }
}

impl From<DragConfigError> for Error {
    fn from(err: DragConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<ChannelClosed> for Error {
    fn from(err: ChannelClosed) -> Self {
        Self::Closed(err)
    }
}

/// Standard result type for dragline APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Constructors ----------------------------------------------------------

/// Create a drag session that notifies synchronously and assumes an
/// unscrolled document.
///
/// Hosts with a scrolling viewport or an event-loop zone should call
/// [`DragRef::new`] with their own providers.
#[must_use]
pub fn draggable<E: DragElement>(element: E, config: DragConfig) -> DragRef<E> {
    DragRef::new(
        element,
        config,
        Rc::new(ImmediateDispatcher),
        Rc::new(StaticScrollPosition::default()),
    )
}

/// Like [`draggable`], with thresholds loaded from a TOML file.
#[cfg(feature = "config-file")]
pub fn draggable_from_config_file<E: DragElement>(
    element: E,
    path: impl AsRef<std::path::Path>,
) -> Result<DragRef<E>> {
    let config = DragConfig::from_toml_file(path)?;
    Ok(draggable(element, config))
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        DragConfig, DragElement, DragRef, DragState, DropEvent, Error, HeadlessElement, Point,
        PointerInput, Rect, Result, copy_between, draggable, move_within, transfer_between,
    };

    pub use crate::{core, runtime};
}

pub use dragline_core as core;
pub use dragline_runtime as runtime;
