// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Host abstractions
//!
//! The engine is host-agnostic: everything it needs from its surroundings
//! is expressed by two traits. [`Element`] is the scrollable container,
//! owned exclusively by the engine while a session is enabled. [`ScrollCx`]
//! is the per-call context: frame and delayed timer scheduling, lifecycle
//! notification delivery and scrollbar painting.

use crate::dir::Axis;
use crate::event::{ScrollEvent, TimerHandle};
use crate::geom::Vec2;
use crate::scrollbar::ArcSpan;
use std::time::Duration;

/// Overflow style of a container element
///
/// The engine forces `Hidden` while enabled and restores the captured
/// previous value on disable.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Scroll,
    Auto,
}

/// A scrollable container element
///
/// While a session is enabled the engine owns the element and is the only
/// writer of its translation and overflow styles.
pub trait Element {
    /// Bounding size of the container (the viewport)
    fn size(&self) -> Vec2;

    /// Bounding size of the scrolled content
    fn content_size(&self) -> Vec2;

    /// Apply a visual translation to the content
    ///
    /// Not called in virtual mode.
    fn set_translation(&mut self, offset: Vec2);

    /// Current overflow style
    fn overflow(&self) -> Overflow;

    /// Set the overflow style
    fn set_overflow(&mut self, overflow: Overflow);
}

/// Host context for engine calls
///
/// Timer semantics follow a merge-on-re-request contract: re-requesting a
/// pending timer with the same [`TimerHandle`] replaces it (choosing the
/// earliest or latest time per the handle), it does not stack. Requested
/// timers are delivered back as [`Event::Timer`](crate::Event::Timer);
/// frame timers fire around the next painted frame.
///
/// The `bar_*` methods drive the visual scrollbar proxy and have no-op
/// defaults: hosts without a scrollbar surface implement nothing. Linear
/// bars are built from a track placement plus a thumb the host may clamp
/// to a minimum length (hence the applied length is returned); circular
/// bars are built from two arc primitives whose thumb span is updated as
/// the position changes.
pub trait ScrollCx {
    /// Schedule a timer update for the next frame
    fn request_frame_timer(&mut self, handle: TimerHandle);

    /// Schedule a timer update at `now + delay`
    fn request_timer(&mut self, handle: TimerHandle, delay: Duration);

    /// Deliver a lifecycle notification
    fn emit(&mut self, event: ScrollEvent);

    /// Make the scrollbar visible
    fn bar_show(&mut self) {}

    /// Hide the scrollbar
    fn bar_hide(&mut self) {}

    /// Create a linear track and thumb
    ///
    /// `track_start` is the offset of the track from the viewport edge
    /// along `axis` and `track_len` its length; `thumb_len` is the
    /// requested thumb length. Returns the applied thumb length (the host
    /// may enforce a minimum).
    fn bar_build_linear(
        &mut self,
        _axis: Axis,
        _track_start: f32,
        _track_len: f32,
        thumb_len: f32,
    ) -> f32 {
        thumb_len
    }

    /// Resize the linear thumb; returns the applied length
    fn bar_set_thumb_len(&mut self, _axis: Axis, len: f32) -> f32 {
        len
    }

    /// Translate the linear thumb along its track
    fn bar_move_thumb(&mut self, _axis: Axis, _offset: f32) {}

    /// Create a circular track arc and thumb arc
    fn bar_build_arcs(&mut self, _track: ArcSpan, _thumb: ArcSpan) {}

    /// Update the circular thumb arc span
    fn bar_update_arc(&mut self, _thumb: ArcSpan) {}

    /// Remove the scrollbar elements
    fn bar_teardown(&mut self) {}
}
