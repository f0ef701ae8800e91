#![forbid(unsafe_code)]

//! Host collaborators for a drag session.
//!
//! A [`DragRef`](crate::DragRef) never touches a real UI toolkit. Everything
//! it needs from its host goes through the traits in this module:
//!
//! - [`DragElement`]: the element being dragged (and optional drag handles).
//! - [`ScrollPositionProvider`]: page scroll offsets at a point in time.
//! - [`NotificationDispatcher`]: where notifications are delivered, and where
//!   low-level listener bookkeeping runs.
//!
//! Listener registrations are described by [`ListenerOptions`] so a host can
//! mirror them onto its own event targets. On platforms without passive
//! listeners the capability flag is simply ignored.

use std::cell::Cell;

use dragline_core::event::PointerKind;
use dragline_core::geometry::{Point, Rect};

use crate::reactive::batch::BatchScope;

/// The element a drag session moves.
pub trait DragElement {
    /// Client-space bounding rectangle.
    fn bounding_client_rect(&self) -> Rect;

    /// Current inline style transform, if any.
    fn inline_transform(&self) -> Option<String>;

    /// Replace the inline style transform. `None` clears it.
    fn set_inline_transform(&mut self, transform: Option<&str>);

    /// Whether this is a graphics-markup (SVG) element, which ignores style
    /// transforms and needs the attribute form as well.
    fn is_graphics_element(&self) -> bool {
        false
    }

    /// Set the `transform` attribute. Only called for graphics elements.
    fn set_transform_attribute(&mut self, _transform: &str) {}

    /// Enable or disable the platform's own drag affordances (text selection,
    /// native image drag, touch panning) on this element.
    fn set_native_drag_interactions(&mut self, enabled: bool);

    /// Remove the element from its document.
    fn detach(&mut self);
}

/// Source of page scroll offsets.
pub trait ScrollPositionProvider {
    /// Current scroll offset (`x` = left, `y` = top).
    fn scroll_position(&self) -> Point;
}

/// A scroll provider with a settable position, for headless hosts and tests.
#[derive(Debug, Default)]
pub struct StaticScrollPosition {
    position: Cell<Point>,
}

impl StaticScrollPosition {
    #[must_use]
    pub fn new(position: Point) -> Self {
        Self {
            position: Cell::new(position),
        }
    }

    pub fn set(&self, position: Point) {
        self.position.set(position);
    }
}

impl ScrollPositionProvider for StaticScrollPosition {
    fn scroll_position(&self) -> Point {
        self.position.get()
    }
}

/// Delivery discipline for notifications.
///
/// `dispatch` must be synchronous and must call `notify` exactly once. How it
/// wraps the call (batching, change detection, logging) is up to the host.
pub trait NotificationDispatcher {
    /// Run `notify`, which emits one notification.
    fn dispatch(&self, notify: &mut dyn FnMut());

    /// Run listener bookkeeping that must stay out of the host's batching
    /// context. High-frequency pointer tracking lives here.
    fn run_outside(&self, work: &mut dyn FnMut()) {
        work();
    }
}

/// Delivers every notification inline.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateDispatcher;

impl NotificationDispatcher for ImmediateDispatcher {
    fn dispatch(&self, notify: &mut dyn FnMut()) {
        notify();
    }
}

/// Delivers every notification inside a [`BatchScope`].
///
/// On its own this behaves like [`ImmediateDispatcher`]. When the host holds
/// an outer `BatchScope` around its input handling, deliveries queue until
/// that outer scope exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct BatchDispatcher;

impl NotificationDispatcher for BatchDispatcher {
    fn dispatch(&self, notify: &mut dyn FnMut()) {
        let _scope = BatchScope::new();
        notify();
    }
}

/// Capability record attached to a listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerOptions {
    /// The listener may suppress the platform's default handling.
    pub wants_prevent_default: bool,
}

impl ListenerOptions {
    /// May call prevent-default.
    pub const ACTIVE: Self = Self {
        wants_prevent_default: true,
    };
    /// Never calls prevent-default; the platform may scroll without waiting.
    pub const PASSIVE: Self = Self {
        wants_prevent_default: false,
    };
}

/// Pointer-down listeners bound to the root element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootListeners {
    pub mouse_down: ListenerOptions,
    pub touch_start: ListenerOptions,
}

impl Default for RootListeners {
    fn default() -> Self {
        Self {
            mouse_down: ListenerOptions::ACTIVE,
            touch_start: ListenerOptions::PASSIVE,
        }
    }
}

/// Document-level move/up listeners held for the length of one pointer
/// sequence, for the pointer kind that started it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalListeners {
    pub kind: PointerKind,
    pub pointer_move: ListenerOptions,
    pub pointer_up: ListenerOptions,
}

impl GlobalListeners {
    #[must_use]
    pub const fn for_kind(kind: PointerKind) -> Self {
        Self {
            kind,
            pointer_move: ListenerOptions::ACTIVE,
            pointer_up: ListenerOptions::PASSIVE,
        }
    }
}

/// In-memory [`DragElement`] for headless hosts and tests.
///
/// Records every write so callers can inspect what a session did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadlessElement {
    pub rect: Rect,
    pub transform: Option<String>,
    pub transform_attribute: Option<String>,
    pub graphics: bool,
    /// `None` until the session first toggles native interactions.
    pub native_drag_interactions: Option<bool>,
    pub detached: bool,
}

impl HeadlessElement {
    #[must_use]
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            ..Self::default()
        }
    }

    /// Start with a pre-existing inline transform.
    #[must_use]
    pub fn with_transform(mut self, transform: impl Into<String>) -> Self {
        self.transform = Some(transform.into());
        self
    }

    /// Mark as a graphics-markup element.
    #[must_use]
    pub fn graphics(mut self) -> Self {
        self.graphics = true;
        self
    }
}

impl DragElement for HeadlessElement {
    fn bounding_client_rect(&self) -> Rect {
        self.rect
    }

    fn inline_transform(&self) -> Option<String> {
        self.transform.clone()
    }

    fn set_inline_transform(&mut self, transform: Option<&str>) {
        self.transform = transform.map(str::to_owned);
    }

    fn is_graphics_element(&self) -> bool {
        self.graphics
    }

    fn set_transform_attribute(&mut self, transform: &str) {
        self.transform_attribute = Some(transform.to_owned());
    }

    fn set_native_drag_interactions(&mut self, enabled: bool) {
        self.native_drag_interactions = Some(enabled);
    }

    fn detach(&mut self) {
        self.detached = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_scroll_position_is_settable() {
        let scroll = StaticScrollPosition::new(Point::new(0.0, 10.0));
        assert_eq!(scroll.scroll_position(), Point::new(0.0, 10.0));
        scroll.set(Point::new(5.0, 5.0));
        assert_eq!(scroll.scroll_position(), Point::new(5.0, 5.0));
    }

    #[test]
    fn immediate_dispatcher_runs_inline() {
        let mut hit = false;
        ImmediateDispatcher.dispatch(&mut || hit = true);
        assert!(hit);
        let mut outside = false;
        ImmediateDispatcher.run_outside(&mut || outside = true);
        assert!(outside);
    }

    #[test]
    fn batch_dispatcher_opens_a_scope() {
        let mut batching = false;
        BatchDispatcher.dispatch(&mut || batching = crate::reactive::batch::is_batching());
        assert!(batching);
        assert!(!crate::reactive::batch::is_batching());
    }

    #[test]
    fn listener_defaults() {
        let root = RootListeners::default();
        assert!(root.mouse_down.wants_prevent_default);
        assert!(!root.touch_start.wants_prevent_default);

        let global = GlobalListeners::for_kind(PointerKind::Touch);
        assert_eq!(global.kind, PointerKind::Touch);
        assert_eq!(global.pointer_move, ListenerOptions::ACTIVE);
        assert_eq!(global.pointer_up, ListenerOptions::PASSIVE);
    }

    #[test]
    fn headless_element_records_writes() {
        let mut el = HeadlessElement::new(Rect::new(0.0, 0.0, 10.0, 10.0)).graphics();
        el.set_inline_transform(Some("scale(2)"));
        el.set_transform_attribute("translate(1 2)");
        el.set_native_drag_interactions(false);
        el.detach();
        assert_eq!(el.inline_transform().as_deref(), Some("scale(2)"));
        assert_eq!(el.transform_attribute.as_deref(), Some("translate(1 2)"));
        assert_eq!(el.native_drag_interactions, Some(false));
        assert!(el.is_graphics_element());
        assert!(el.detached);

        el.set_inline_transform(None);
        assert!(el.inline_transform().is_none());
    }
}
