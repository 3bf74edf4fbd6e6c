// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Input events and lifecycle notifications

use crate::geom::Vec2;
use std::time::Instant;

pub use IsUsed::{Unused, Used};

/// A timer handle
///
/// Used to identify frame and delayed timer requests made through
/// [`ScrollCx`](crate::cx::ScrollCx).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TimerHandle(i64);
impl TimerHandle {
    /// Construct a new handle
    ///
    /// The code must be positive. Components using multiple timers must
    /// assign each a unique code.
    ///
    /// When a timer is requested multiple times before delivery using the
    /// same `TimerHandle`, the requests are merged, choosing the earliest
    /// time if `earliest`, otherwise the latest time. The scrollbar fade
    /// timer relies on latest-time merging for its debounce behavior.
    pub const fn new(code: i64, earliest: bool) -> Self {
        assert!(code >= 0);
        if earliest {
            TimerHandle(-code - 1)
        } else {
            TimerHandle(code)
        }
    }

    /// Check whether this timer chooses the earliest time when merging
    pub fn earliest(self) -> bool {
        self.0 < 0
    }
}

/// Turn direction of a rotary detent
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RotaryDirection {
    Clockwise,
    CounterClockwise,
}

/// Raw input delivered to [`ScrollEngine::handle_event`]
///
/// Touch events carry the coordinate of the first active touch point and
/// the total number of active touch points; the host is responsible for
/// hit-testing (`in_target`) since element trees are host territory.
///
/// Timestamps are carried on the events themselves (rather than sampled on
/// receipt) so that flick speed reflects input time, not processing time.
///
/// [`ScrollEngine::handle_event`]: crate::ScrollEngine::handle_event
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Event {
    /// A new touch contact
    TouchStart {
        coord: Vec2,
        touch_count: usize,
        /// True when the touch originates within the owned element subtree
        in_target: bool,
        time: Instant,
    },
    /// Movement of an active touch contact
    TouchMove { coord: Vec2, touch_count: usize },
    /// Release of the touch contact
    TouchEnd { time: Instant },
    /// One discrete step of a rotary input control
    RotaryDetent(RotaryDirection),
    /// A previously requested frame or delayed timer
    Timer(TimerHandle),
}

/// Return value of event handlers: was the event used?
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IsUsed {
    Unused,
    Used,
}

/// Payload of every lifecycle notification
///
/// Offsets are directional: only the component matching the session's axis
/// carries a non-zero value, and it is the sign-inverted scroll position
/// (a positive number of pixels scrolled).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ScrollOffsets {
    pub scroll_left: f32,
    pub scroll_top: f32,
    /// Whether the reported position lies within `[0, max_scroll]`
    pub in_bounds: bool,
    /// True when the motion originated from [`ScrollEngine::scroll_to`]
    /// rather than user input
    ///
    /// [`ScrollEngine::scroll_to`]: crate::ScrollEngine::scroll_to
    pub from_api: bool,
}

/// Scroll lifecycle notifications
///
/// Within one gesture these are delivered in the order
/// `BeforeStart → Start → Scroll* → (Flick → Scroll*)? → End`: a flick is
/// announced once at release, then settle motion keeps reporting `Scroll`
/// until coming to rest with a single `End`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ScrollEvent {
    /// A qualifying touch landed; motion may follow
    BeforeStart(ScrollOffsets),
    /// First qualifying movement of a gesture (or a rotary step)
    Start(ScrollOffsets),
    /// The position changed
    Scroll(ScrollOffsets),
    /// Motion came to rest
    End(ScrollOffsets),
    /// A release was fast enough to project momentum motion; the payload
    /// carries the projected (snap-resolved) end offsets
    Flick(ScrollOffsets),
}

impl ScrollEvent {
    /// Access the payload regardless of variant
    pub fn offsets(&self) -> &ScrollOffsets {
        match self {
            ScrollEvent::BeforeStart(o)
            | ScrollEvent::Start(o)
            | ScrollEvent::Scroll(o)
            | ScrollEvent::End(o)
            | ScrollEvent::Flick(o) => o,
        }
    }
}
