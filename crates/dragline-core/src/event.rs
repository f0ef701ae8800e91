#![forbid(unsafe_code)]

//! Canonical pointer input types.
//!
//! A drag session consumes exactly two kinds of raw input: mouse events and
//! touch events. They differ in where coordinates live: a mouse event carries
//! its page position directly, a touch event carries a list of touch points.
//!
//! # Design Notes
//!
//! - Coordinates are page coordinates as delivered by the host, before any
//!   scroll compensation.
//! - Timestamps use [`web_time::Instant`] so the same code runs on wasm hosts.
//! - Only [`MouseButton::Left`] is the primary button.

use smallvec::SmallVec;
use web_time::Instant;

use crate::geometry::Point;

/// Touch point storage. Single-pointer sessions rarely see more than two.
pub type TouchPoints = SmallVec<[Point; 2]>;

/// Canonical pointer input event.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    /// A mouse event.
    Mouse(MouseInput),
    /// A touch event.
    Touch(TouchInput),
}

/// Which input surface an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (usually left).
    Left,
    /// Secondary button (usually right).
    Right,
    /// Middle button (scroll wheel click).
    Middle,
}

impl MouseButton {
    /// Whether this is the primary button.
    #[inline]
    #[must_use]
    pub const fn is_primary(self) -> bool {
        matches!(self, Self::Left)
    }
}

/// A mouse event.
#[derive(Debug, Clone, PartialEq)]
pub struct MouseInput {
    /// Page position of the pointer.
    pub page: Point,
    /// Button involved in the event.
    pub button: MouseButton,
    /// When the host received the event.
    pub time: Instant,
}

impl MouseInput {
    /// Create a primary-button mouse event.
    #[must_use]
    pub fn new(page: Point, time: Instant) -> Self {
        Self {
            page,
            button: MouseButton::Left,
            time,
        }
    }

    /// Set the button.
    #[must_use]
    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }
}

/// A touch event.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchInput {
    /// Touch points currently on the surface.
    pub touches: TouchPoints,
    /// Touch points that changed in this event. A touch-end event lists the
    /// lifted finger here and nowhere else.
    pub changed_touches: TouchPoints,
    /// When the host received the event.
    pub time: Instant,
}

impl TouchInput {
    /// Create a touch event with a single active touch point.
    #[must_use]
    pub fn single(page: Point, time: Instant) -> Self {
        let mut touches = TouchPoints::new();
        touches.push(page);
        Self {
            changed_touches: touches.clone(),
            touches,
            time,
        }
    }

    /// Create a touch-end event for a finger lifted at `page`.
    #[must_use]
    pub fn ended(page: Point, time: Instant) -> Self {
        let mut changed_touches = TouchPoints::new();
        changed_touches.push(page);
        Self {
            touches: TouchPoints::new(),
            changed_touches,
            time,
        }
    }
}

impl PointerInput {
    /// Shorthand for a primary-button mouse event at `(x, y)`.
    #[must_use]
    pub fn mouse(x: f64, y: f64, time: Instant) -> Self {
        Self::Mouse(MouseInput::new(Point::new(x, y), time))
    }

    /// Shorthand for a single-finger touch event at `(x, y)`.
    #[must_use]
    pub fn touch(x: f64, y: f64, time: Instant) -> Self {
        Self::Touch(TouchInput::single(Point::new(x, y), time))
    }

    /// Input surface of this event.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> PointerKind {
        match self {
            Self::Mouse(_) => PointerKind::Mouse,
            Self::Touch(_) => PointerKind::Touch,
        }
    }

    /// When the host received the event.
    #[inline]
    #[must_use]
    pub fn time(&self) -> Instant {
        match self {
            Self::Mouse(mouse) => mouse.time,
            Self::Touch(touch) => touch.time,
        }
    }

    /// Mouse button, if this is a mouse event.
    #[inline]
    #[must_use]
    pub fn button(&self) -> Option<MouseButton> {
        match self {
            Self::Mouse(mouse) => Some(mouse.button),
            Self::Touch(_) => None,
        }
    }

    /// Raw page position of the pointer.
    ///
    /// For touch events this is the first active touch, falling back to the
    /// first changed touch, falling back to the origin.
    #[must_use]
    pub fn page_point(&self) -> Point {
        match self {
            Self::Mouse(mouse) => mouse.page,
            Self::Touch(touch) => touch
                .touches
                .first()
                .or_else(|| touch.changed_touches.first())
                .copied()
                .unwrap_or(Point::ZERO),
        }
    }
}

/// Whether an input event came from a touch surface.
#[inline]
#[must_use]
pub fn is_touch_event(event: &PointerInput) -> bool {
    event.kind() == PointerKind::Touch
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn classifies_touch_and_mouse() {
        let t = Instant::now();
        assert!(is_touch_event(&PointerInput::touch(1.0, 2.0, t)));
        assert!(!is_touch_event(&PointerInput::mouse(1.0, 2.0, t)));
    }

    #[test]
    fn mouse_page_point_is_direct() {
        let t = Instant::now();
        let event = PointerInput::mouse(12.5, 40.0, t);
        assert_eq!(event.page_point(), Point::new(12.5, 40.0));
        assert_eq!(event.button(), Some(MouseButton::Left));
    }

    #[test]
    fn touch_page_point_uses_first_touch() {
        let t = Instant::now();
        let mut touch = TouchInput::single(Point::new(3.0, 4.0), t);
        touch.touches.push(Point::new(99.0, 99.0));
        let event = PointerInput::Touch(touch);
        assert_eq!(event.page_point(), Point::new(3.0, 4.0));
        assert_eq!(event.button(), None);
    }

    #[test]
    fn touch_end_falls_back_to_changed_touches() {
        let t = Instant::now();
        let event = PointerInput::Touch(TouchInput::ended(Point::new(7.0, 8.0), t));
        assert_eq!(event.page_point(), Point::new(7.0, 8.0));
    }

    #[test]
    fn empty_touch_list_yields_origin() {
        let t = Instant::now();
        let event = PointerInput::Touch(TouchInput {
            touches: TouchPoints::new(),
            changed_touches: TouchPoints::new(),
            time: t,
        });
        assert_eq!(event.page_point(), Point::ZERO);
    }

    #[test]
    fn only_left_is_primary() {
        assert!(MouseButton::Left.is_primary());
        assert!(!MouseButton::Right.is_primary());
        assert!(!MouseButton::Middle.is_primary());
    }

    #[test]
    fn time_accessor_reads_either_kind() {
        let t = Instant::now();
        let later = t + Duration::from_millis(5);
        assert_eq!(PointerInput::mouse(0.0, 0.0, t).time(), t);
        assert_eq!(PointerInput::touch(0.0, 0.0, later).time(), later);
    }

    #[test]
    fn with_button_overrides_default() {
        let t = Instant::now();
        let mouse = MouseInput::new(Point::ZERO, t).with_button(MouseButton::Right);
        assert_eq!(mouse.button, MouseButton::Right);
    }
}
