// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Geometry data types
//!
//! All dimensions use the `f32` type: positions are fractional in the host
//! coordinate system and invalid input must degrade to inert `NaN`
//! arithmetic rather than panic.

use crate::dir::Axis;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// 2D vector
///
/// Used for touch coordinates, element sizes and visual translations.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2(pub f32, pub f32);

impl Vec2 {
    /// Zero
    pub const ZERO: Vec2 = Vec2::splat(0.0);

    /// Constructs a new instance with each element initialized to `value`.
    #[inline]
    pub const fn splat(value: f32) -> Self {
        Vec2(value, value)
    }

    /// Return the minimum, componentwise
    #[inline]
    #[must_use = "method does not modify self but returns a new value"]
    pub fn min(self, other: Self) -> Self {
        Vec2(self.0.min(other.0), self.1.min(other.1))
    }

    /// Return the maximum, componentwise
    #[inline]
    #[must_use = "method does not modify self but returns a new value"]
    pub fn max(self, other: Self) -> Self {
        Vec2(self.0.max(other.0), self.1.max(other.1))
    }

    /// Take the absolute value of each component
    #[inline]
    #[must_use = "method does not modify self but returns a new value"]
    pub fn abs(self) -> Self {
        Vec2(self.0.abs(), self.1.abs())
    }

    /// Extract one component, based on the scrolled axis
    #[inline]
    pub fn extract(self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.0,
            Axis::Vertical => self.1,
        }
    }

    /// Set one component of self, based on the scrolled axis
    #[inline]
    pub fn set_component(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::Horizontal => self.0 = value,
            Axis::Vertical => self.1 = value,
        }
    }

    /// Construct with `value` on the given axis and zero on the other
    #[inline]
    pub fn from_axis(axis: Axis, value: f32) -> Self {
        let mut v = Vec2::ZERO;
        v.set_component(axis, value);
        v
    }
}

impl Add for Vec2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Vec2(self.0 + rhs.0, self.1 + rhs.1)
    }
}
impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
        self.1 += rhs.1;
    }
}
impl Sub for Vec2 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Vec2(self.0 - rhs.0, self.1 - rhs.1)
    }
}
impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
        self.1 -= rhs.1;
    }
}
impl Neg for Vec2 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Vec2(-self.0, -self.1)
    }
}

impl From<(f32, f32)> for Vec2 {
    #[inline]
    fn from(v: (f32, f32)) -> Self {
        Vec2(v.0, v.1)
    }
}

/// Maximum scroll extent from content and viewport sizes
///
/// Content smaller than the viewport yields zero (nothing to scroll).
/// The result is rounded to whole units, matching the integral positions
/// produced by the easing loop.
pub fn max_scroll_extent(content_extent: f32, viewport_extent: f32) -> f32 {
    (content_extent - viewport_extent).round().max(0.0)
}

/// Maximum scroll extent from an explicit total-content override
///
/// Unlike [`max_scroll_extent`], a zero-or-negative result collapses to
/// `+∞`: the region scrolls without clamping. This preserves support for
/// decorative/non-bounded scroll regions where the host declares content
/// no larger than the viewport yet still expects motion.
pub fn max_scroll_override(total_content_extent: f32, viewport_extent: f32) -> f32 {
    let bound = (total_content_extent - viewport_extent).max(0.0);
    if bound == 0.0 { f32::INFINITY } else { bound }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn extract_set() {
        let mut v = Vec2(3.0, 4.0);
        assert_eq!(v.extract(Axis::Horizontal), 3.0);
        assert_eq!(v.extract(Axis::Vertical), 4.0);
        v.set_component(Axis::Vertical, 7.0);
        assert_eq!(v, Vec2(3.0, 7.0));
        assert_eq!(Vec2::from_axis(Axis::Horizontal, 2.0), Vec2(2.0, 0.0));
    }

    #[test]
    fn max_scroll() {
        assert_eq!(max_scroll_extent(500.0, 200.0), 300.0);
        assert_eq!(max_scroll_extent(150.0, 200.0), 0.0);
        assert_eq!(max_scroll_extent(500.4, 200.0), 300.0);
    }

    #[test]
    fn max_scroll_override_unbounded() {
        assert_eq!(max_scroll_override(500.0, 200.0), 300.0);
        assert_eq!(max_scroll_override(200.0, 200.0), f32::INFINITY);
        assert_eq!(max_scroll_override(100.0, 200.0), f32::INFINITY);
    }
}
