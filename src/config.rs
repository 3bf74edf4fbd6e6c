// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Engine configuration

use crate::cast::Cast;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Scrolling configuration
///
/// This is serializable (using `feature = "serde"`) with the following fields:
///
/// > `snap_size`: `f32` (pixels) \
/// > `flick_threshold`: `f32` (pixels per millisecond) \
/// > `flick_projection_ms`: `u32` (milliseconds) \
/// > `bar_fade_ms`: `u32` (milliseconds) \
/// > `bar_margin`: `f32` (pixels) \
/// > `circular_bar_size`: `f32` (degrees) \
/// > `circular_min_thumb_size`: `f32` (degrees) \
/// > `circular_bar_radius`: `f32` (pixels) \
/// > `overscroll`: `f32` (pixels)
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScrollConfig {
    /// Uniform snap granularity used when no snap points are set
    #[cfg_attr(feature = "serde", serde(default = "defaults::snap_size"))]
    pub snap_size: f32,

    /// Release speed above which a drag becomes a flick
    #[cfg_attr(feature = "serde", serde(default = "defaults::flick_threshold"))]
    pub flick_threshold: f32,

    /// Time horizon used to project the flick end position
    #[cfg_attr(feature = "serde", serde(default = "defaults::flick_projection_ms"))]
    pub flick_projection_ms: u32,

    /// Scrollbar visibility timeout after the last scroll signal
    #[cfg_attr(feature = "serde", serde(default = "defaults::bar_fade_ms"))]
    pub bar_fade_ms: u32,

    /// Gap between a linear scrollbar track and each viewport edge
    #[cfg_attr(feature = "serde", serde(default = "defaults::bar_margin"))]
    pub bar_margin: f32,

    /// Angular width of the circular scrollbar track
    #[cfg_attr(feature = "serde", serde(default = "defaults::circular_bar_size"))]
    pub circular_bar_size: f32,

    /// Minimum angular size of the circular scrollbar thumb
    #[cfg_attr(feature = "serde", serde(default = "defaults::circular_min_thumb_size"))]
    pub circular_min_thumb_size: f32,

    /// Radius of the circular scrollbar arc
    #[cfg_attr(feature = "serde", serde(default = "defaults::circular_bar_radius"))]
    pub circular_bar_radius: f32,

    /// Extra scrollable distance beyond the content extent
    #[cfg_attr(feature = "serde", serde(default = "defaults::overscroll"))]
    pub overscroll: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        ScrollConfig {
            snap_size: defaults::snap_size(),
            flick_threshold: defaults::flick_threshold(),
            flick_projection_ms: defaults::flick_projection_ms(),
            bar_fade_ms: defaults::bar_fade_ms(),
            bar_margin: defaults::bar_margin(),
            circular_bar_size: defaults::circular_bar_size(),
            circular_min_thumb_size: defaults::circular_min_thumb_size(),
            circular_bar_radius: defaults::circular_bar_radius(),
            overscroll: defaults::overscroll(),
        }
    }
}

impl ScrollConfig {
    /// Delay before the scrollbar fades out
    #[inline]
    pub fn bar_fade_delay(&self) -> Duration {
        Duration::from_millis(self.bar_fade_ms.cast())
    }

    /// Flick projection horizon as a scale factor on px/ms speed
    #[inline]
    pub fn flick_projection(&self) -> f32 {
        self.flick_projection_ms as f32
    }
}

mod defaults {
    pub fn snap_size() -> f32 {
        90.0
    }
    pub fn flick_threshold() -> f32 {
        1.0
    }
    pub fn flick_projection_ms() -> u32 {
        1000
    }
    pub fn bar_fade_ms() -> u32 {
        2000
    }
    pub fn bar_margin() -> f32 {
        11.0
    }
    pub fn circular_bar_size() -> f32 {
        60.0
    }
    pub fn circular_min_thumb_size() -> f32 {
        6.0
    }
    pub fn circular_bar_radius() -> f32 {
        174.0
    }
    pub fn overscroll() -> f32 {
        0.0
    }
}
