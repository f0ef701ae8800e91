#![forbid(unsafe_code)]

//! Geometric primitives for drag math.
//!
//! All coordinates are `f64` CSS-style pixels. Page space is absolute and
//! scroll-relative; element space is relative to a dragged element's top-left
//! corner.

use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// A point in page or element space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Manhattan distance (`|dx| + |dy|`) to another point.
    #[inline]
    #[must_use]
    pub fn manhattan_distance(self, other: Self) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A client-space rectangle, as reported by a host's bounding-rect query.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge.
    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge.
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Top-left corner.
    #[inline]
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }
}

/// Bound `value` to `[min, max]`.
///
/// Evaluated literally as `max(min, min(max, value))`: with an inverted range
/// (`min > max`) the result is `min`. Callers must not rely on that.
#[inline]
#[must_use]
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    let upper = if max < value { max } else { value };
    if min > upper { min } else { upper }
}

/// Round to the nearest integer with halves going toward positive infinity.
///
/// `2.5 -> 3`, `-2.5 -> -2`. This differs from [`f64::round`], which rounds
/// halves away from zero.
#[inline]
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// A 3D translation with whole-pixel components.
///
/// Displays as `translate3d(Xpx, Ypx, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Translate3d {
    pub x: i64,
    pub y: i64,
}

impl fmt::Display for Translate3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translate3d({}px, {}px, 0)", self.x, self.y)
    }
}

/// Build a translation with both coordinates rounded to whole pixels.
///
/// Sub-pixel offsets blur text in most renderers, so the dragged element is
/// always placed on the pixel grid.
#[must_use]
pub fn rounded_translate(x: f64, y: f64) -> Translate3d {
    Translate3d {
        x: round_half_up(x) as i64,
        y: round_half_up(y) as i64,
    }
}

/// Attribute form of a translation for graphics-markup (SVG) elements,
/// which ignore style transforms. Values are not rounded.
#[must_use]
pub fn svg_translate(x: f64, y: f64) -> String {
    format!("translate({x} {y})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_in_range_is_identity() {
        assert_eq!(clamp(5, 0, 10), 5);
        assert_eq!(clamp(0, 0, 10), 0);
        assert_eq!(clamp(10, 0, 10), 10);
    }

    #[test]
    fn clamp_bounds_out_of_range() {
        assert_eq!(clamp(-3, 0, 10), 0);
        assert_eq!(clamp(42, 0, 10), 10);
        assert_eq!(clamp(1.5, 2.0, 3.0), 2.0);
    }

    #[test]
    fn clamp_inverted_range_prefers_min() {
        assert_eq!(clamp(5, 8, 2), 8);
        assert_eq!(clamp(0, 8, 2), 8);
    }

    #[test]
    fn round_half_up_matches_renderer_rounding() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(1.4), 1.0);
        assert_eq!(round_half_up(-1.6), -2.0);
    }

    #[test]
    fn rounded_translate_formats_whole_pixels() {
        let t = rounded_translate(6.4, -0.5);
        assert_eq!(t, Translate3d { x: 6, y: 0 });
        assert_eq!(t.to_string(), "translate3d(6px, 0px, 0)");
        assert_eq!(
            rounded_translate(-10.6, 3.5).to_string(),
            "translate3d(-11px, 4px, 0)"
        );
    }

    #[test]
    fn svg_translate_keeps_fractions() {
        assert_eq!(svg_translate(6.0, 1.0), "translate(6 1)");
        assert_eq!(svg_translate(2.5, -3.25), "translate(2.5 -3.25)");
    }

    #[test]
    fn point_arithmetic() {
        let a = Point::new(10.0, 20.0);
        let b = Point::new(4.0, -2.0);
        assert_eq!(a + b, Point::new(14.0, 18.0));
        assert_eq!(a - b, Point::new(6.0, 22.0));
        let mut c = a;
        c += b;
        assert_eq!(c, a + b);
    }

    #[test]
    fn manhattan_distance_sums_axes() {
        let a = Point::new(100.0, 100.0);
        assert_eq!(a.manhattan_distance(Point::new(102.0, 101.0)), 3.0);
        assert_eq!(a.manhattan_distance(Point::new(94.0, 99.0)), 7.0);
        assert_eq!(a.manhattan_distance(a), 0.0);
    }

    #[test]
    fn rect_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.origin(), Point::new(10.0, 20.0));
    }
}
