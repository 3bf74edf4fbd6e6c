// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Scrollbar state
//!
//! The scrollbar is a visual proxy of the scroll position: a rectangular
//! track-and-thumb pair, or on circular displays an arc spanning a fixed
//! angular width centered on the leading edge. The engine computes all
//! geometry; painting goes through the `bar_*` methods of
//! [`ScrollCx`](crate::cx::ScrollCx).

use crate::config::ScrollConfig;
use crate::cx::ScrollCx;
use crate::dir::Axis;
use crate::event::TimerHandle;

pub(crate) const TIMER_FADE: TimerHandle = TimerHandle::new((1 << 60) + 2, false);

/// An arc segment, in degrees on a circle of the given radius
///
/// Degrees follow the host's screen convention: the vertical bar is
/// centered on 90° (trailing screen edge), the horizontal bar on 0°.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ArcSpan {
    pub start: f32,
    pub end: f32,
    pub radius: f32,
}

/// Thumb length as a fraction of the track
///
/// An unbounded (`+∞`) scroll range yields a zero-length thumb; hosts and
/// the circular variant enforce their own minimum.
fn thumb_ratio(viewport_extent: f32, max_scroll: f32) -> f32 {
    viewport_extent / (max_scroll + viewport_extent)
}

#[derive(Clone, Debug, PartialEq)]
enum Variant {
    Linear {
        track_len: f32,
        thumb_len: f32,
    },
    Circular {
        /// Start degree of the track arc
        origin: f32,
        thumb_size: f32,
        radius: f32,
    },
}

/// State of the visual scrollbar proxy
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollBar {
    axis: Axis,
    variant: Variant,
    position: f32,
    max_position: f32,
    visible: bool,
}

impl ScrollBar {
    /// Build a rectangular track and thumb
    ///
    /// The track spans the viewport minus a fixed margin on each side; the
    /// thumb length is proportional to
    /// `viewport / (max_scroll + viewport)`. The host may clamp the thumb
    /// to a minimum length, so the applied length is read back and used
    /// for travel computation.
    pub(crate) fn new_linear(
        cx: &mut impl ScrollCx,
        axis: Axis,
        viewport_extent: f32,
        max_scroll: f32,
        config: &ScrollConfig,
    ) -> Self {
        let track_len = viewport_extent - 2.0 * config.bar_margin;
        let requested = thumb_ratio(viewport_extent, max_scroll) * track_len;
        let thumb_len = cx.bar_build_linear(axis, config.bar_margin, track_len, requested);
        ScrollBar {
            axis,
            variant: Variant::Linear { track_len, thumb_len },
            position: 0.0,
            max_position: (track_len - thumb_len).max(0.0),
            visible: false,
        }
    }

    /// Build a circular track arc and thumb arc
    pub(crate) fn new_circular(
        cx: &mut impl ScrollCx,
        axis: Axis,
        viewport_extent: f32,
        max_scroll: f32,
        config: &ScrollConfig,
    ) -> Self {
        let center = if axis.is_vertical() { 90.0 } else { 0.0 };
        let origin = center - config.circular_bar_size / 2.0;
        let radius = config.circular_bar_radius;
        let thumb_size = (thumb_ratio(viewport_extent, max_scroll) * config.circular_bar_size)
            .max(config.circular_min_thumb_size);

        cx.bar_build_arcs(
            ArcSpan {
                start: origin,
                end: origin + config.circular_bar_size,
                radius,
            },
            ArcSpan {
                start: origin,
                end: origin + thumb_size,
                radius,
            },
        );

        ScrollBar {
            axis,
            variant: Variant::Circular { origin, thumb_size, radius },
            position: 0.0,
            max_position: config.circular_bar_size - thumb_size,
            visible: false,
        }
    }

    /// Recompute thumb geometry after the scroll bound changed
    pub(crate) fn set_limits(
        &mut self,
        cx: &mut impl ScrollCx,
        viewport_extent: f32,
        max_scroll: f32,
        config: &ScrollConfig,
    ) {
        match &mut self.variant {
            Variant::Linear { track_len, thumb_len } => {
                let requested = thumb_ratio(viewport_extent, max_scroll) * *track_len;
                *thumb_len = cx.bar_set_thumb_len(self.axis, requested);
                self.max_position = (*track_len - *thumb_len).max(0.0);
            }
            Variant::Circular { origin, thumb_size, radius } => {
                *thumb_size = (thumb_ratio(viewport_extent, max_scroll)
                    * config.circular_bar_size)
                    .max(config.circular_min_thumb_size);
                self.max_position = config.circular_bar_size - *thumb_size;
                cx.bar_update_arc(ArcSpan {
                    start: *origin + self.position,
                    end: *origin + self.position + *thumb_size,
                    radius: *radius,
                });
            }
        }
    }

    /// Map a rendered scroll position onto the thumb and paint it
    pub(crate) fn update_position(
        &mut self,
        cx: &mut impl ScrollCx,
        rendered_position: f32,
        max_scroll: f32,
    ) {
        let mut position = if -rendered_position < max_scroll {
            -rendered_position / max_scroll * self.max_position
        } else {
            self.max_position
        };
        if position < 0.0 {
            position = 0.0;
        }
        self.position = position;

        match &self.variant {
            Variant::Linear { .. } => cx.bar_move_thumb(self.axis, position),
            Variant::Circular { origin, thumb_size, radius } => {
                cx.bar_update_arc(ArcSpan {
                    start: origin + position,
                    end: origin + position + thumb_size,
                    radius: *radius,
                });
            }
        }
    }

    /// Show the bar and restart the fade-out timer
    ///
    /// The fade timer uses latest-time merging, so each scroll signal
    /// replaces the pending timeout rather than stacking a new one.
    pub(crate) fn fade_in(&mut self, cx: &mut impl ScrollCx, config: &ScrollConfig) {
        self.visible = true;
        cx.bar_show();
        cx.request_timer(TIMER_FADE, config.bar_fade_delay());
    }

    /// Hide the bar (fade timeout fired)
    pub(crate) fn fade_timeout(&mut self, cx: &mut impl ScrollCx) {
        self.visible = false;
        cx.bar_hide();
    }

    pub(crate) fn teardown(&mut self, cx: &mut impl ScrollCx) {
        cx.bar_teardown();
    }

    /// Current thumb offset along its travel (px or degrees)
    #[inline]
    pub fn position(&self) -> f32 {
        self.position
    }

    /// Maximum thumb travel (px or degrees)
    #[inline]
    pub fn max_position(&self) -> f32 {
        self.max_position
    }

    /// Thumb length (px) or arc span (degrees)
    pub fn thumb_size(&self) -> f32 {
        match &self.variant {
            Variant::Linear { thumb_len, .. } => *thumb_len,
            Variant::Circular { thumb_size, .. } => *thumb_size,
        }
    }

    /// Whether the bar is currently shown
    #[inline]
    pub fn visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::ScrollEvent;
    use std::time::Duration;

    #[derive(Default)]
    struct Paint {
        thumb_offset: f32,
        thumb_len: f32,
        arc: Option<ArcSpan>,
        shown: bool,
        timers: Vec<(TimerHandle, Duration)>,
    }

    impl ScrollCx for Paint {
        fn request_frame_timer(&mut self, _: TimerHandle) {}
        fn request_timer(&mut self, handle: TimerHandle, delay: Duration) {
            self.timers.push((handle, delay));
        }
        fn emit(&mut self, _: ScrollEvent) {}

        fn bar_show(&mut self) {
            self.shown = true;
        }
        fn bar_hide(&mut self) {
            self.shown = false;
        }
        fn bar_build_linear(&mut self, _: Axis, _: f32, _: f32, thumb_len: f32) -> f32 {
            // hosts may enforce a minimum thumb length
            self.thumb_len = thumb_len.max(20.0);
            self.thumb_len
        }
        fn bar_set_thumb_len(&mut self, _: Axis, len: f32) -> f32 {
            self.thumb_len = len.max(20.0);
            self.thumb_len
        }
        fn bar_move_thumb(&mut self, _: Axis, offset: f32) {
            self.thumb_offset = offset;
        }
        fn bar_build_arcs(&mut self, _: ArcSpan, thumb: ArcSpan) {
            self.arc = Some(thumb);
        }
        fn bar_update_arc(&mut self, thumb: ArcSpan) {
            self.arc = Some(thumb);
        }
    }

    #[test]
    fn linear_geometry() {
        let mut cx = Paint::default();
        let config = ScrollConfig::default();
        // viewport 222, content 222 + 300
        let mut bar = ScrollBar::new_linear(&mut cx, Axis::Vertical, 222.0, 300.0, &config);
        let track = 222.0 - 2.0 * config.bar_margin;
        let expected = 222.0 / (300.0 + 222.0) * track;
        assert_eq!(bar.thumb_size(), expected.max(20.0));
        assert_eq!(bar.max_position(), track - bar.thumb_size());

        bar.update_position(&mut cx, -150.0, 300.0);
        assert_eq!(cx.thumb_offset, 150.0 / 300.0 * bar.max_position());
        // at rest the thumb sits at zero
        bar.update_position(&mut cx, 0.0, 300.0);
        assert_eq!(cx.thumb_offset, 0.0);
        // beyond the end the thumb pins to its maximum travel
        bar.update_position(&mut cx, -400.0, 300.0);
        assert_eq!(cx.thumb_offset, bar.max_position());
        // overscroll above the start clamps at zero
        bar.update_position(&mut cx, 25.0, 300.0);
        assert_eq!(cx.thumb_offset, 0.0);
    }

    #[test]
    fn unbounded_scroll_pins_thumb_home() {
        let mut cx = Paint::default();
        let config = ScrollConfig::default();
        let mut bar =
            ScrollBar::new_linear(&mut cx, Axis::Vertical, 222.0, f32::INFINITY, &config);
        bar.update_position(&mut cx, -5000.0, f32::INFINITY);
        assert_eq!(cx.thumb_offset, 0.0);
    }

    #[test]
    fn circular_minimum_thumb() {
        let mut cx = Paint::default();
        let config = ScrollConfig::default();
        // huge content: proportional span would be far below the minimum
        let bar = ScrollBar::new_circular(&mut cx, Axis::Vertical, 360.0, 100_000.0, &config);
        assert_eq!(bar.thumb_size(), config.circular_min_thumb_size);
        assert_eq!(
            bar.max_position(),
            config.circular_bar_size - config.circular_min_thumb_size
        );
        // vertical track is centered on 90°
        let arc = cx.arc.unwrap();
        assert_eq!(arc.start, 90.0 - config.circular_bar_size / 2.0);
        assert_eq!(arc.radius, config.circular_bar_radius);
    }

    #[test]
    fn circular_thumb_follows_position() {
        let mut cx = Paint::default();
        let config = ScrollConfig::default();
        let mut bar = ScrollBar::new_circular(&mut cx, Axis::Vertical, 300.0, 300.0, &config);
        bar.update_position(&mut cx, -150.0, 300.0);
        let arc = cx.arc.unwrap();
        let origin = 90.0 - config.circular_bar_size / 2.0;
        assert_eq!(arc.start, origin + bar.max_position() / 2.0);
        assert_eq!(arc.end - arc.start, bar.thumb_size());
    }

    #[test]
    fn fade_uses_replacing_timer() {
        let mut cx = Paint::default();
        let config = ScrollConfig::default();
        let mut bar = ScrollBar::new_linear(&mut cx, Axis::Vertical, 222.0, 300.0, &config);
        bar.fade_in(&mut cx, &config);
        bar.fade_in(&mut cx, &config);
        assert!(bar.visible());
        assert!(cx.shown);
        assert_eq!(cx.timers.len(), 2);
        assert_eq!(cx.timers[0].0, TIMER_FADE);
        assert!(!TIMER_FADE.earliest());
        assert_eq!(cx.timers[0].1, Duration::from_millis(2000));

        bar.fade_timeout(&mut cx);
        assert!(!bar.visible());
        assert!(!cx.shown);
    }
}
