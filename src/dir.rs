// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Direction types

use impl_tools::impl_default;
use std::fmt;

/// The scrolled axis
///
/// Scrolling is one-dimensional: a session moves content along exactly one
/// of these axes. The default matches the most common usage: `Vertical`.
#[impl_default(Axis::Vertical)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// True for [`Axis::Vertical`]
    #[inline]
    pub fn is_vertical(self) -> bool {
        self == Axis::Vertical
    }

    /// True for [`Axis::Horizontal`]
    #[inline]
    pub fn is_horizontal(self) -> bool {
        self == Axis::Horizontal
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", match self {
            Axis::Horizontal => "Horizontal",
            Axis::Vertical => "Vertical",
        })
    }
}

/// Direction of travel used for snap-point lookup
///
/// `Forward` is motion deeper into the content (position decreasing);
/// `Backward` is motion toward the content start (position increasing).
/// There is no zero variant: a lookup without motion has no direction
/// (see [`ScrollDirection::from_displacement`]).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    Backward,
    Forward,
}

impl ScrollDirection {
    /// Classify a raw drag displacement
    ///
    /// A positive displacement drags content toward its start (`Backward`);
    /// a negative one advances it (`Forward`). Zero or non-finite
    /// displacement yields `None`.
    pub fn from_displacement(displacement: f32) -> Option<Self> {
        if displacement > 0.0 {
            Some(ScrollDirection::Backward)
        } else if displacement < 0.0 {
            Some(ScrollDirection::Forward)
        } else {
            None
        }
    }

    /// Reverse the direction
    #[must_use = "method does not modify self but returns a new value"]
    pub fn reversed(self) -> Self {
        match self {
            ScrollDirection::Backward => ScrollDirection::Forward,
            ScrollDirection::Forward => ScrollDirection::Backward,
        }
    }
}
