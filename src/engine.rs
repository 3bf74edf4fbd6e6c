// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Scrolling engine

use crate::config::ScrollConfig;
use crate::cx::{Element, Overflow, ScrollCx};
use crate::dir::{Axis, ScrollDirection};
use crate::ease::{EaseStep, Easing, StepEase};
use crate::event::{Event, IsUsed, RotaryDirection, ScrollEvent, ScrollOffsets, TimerHandle};
use crate::event::{Unused, Used};
use crate::geom::{self, Vec2};
use crate::scrollbar::{ScrollBar, TIMER_FADE};
use crate::snap::{SnapPoint, SnapPoints, round_to_grid};
use impl_tools::autoimpl;
use std::time::Instant;

const TIMER_MOVE: TimerHandle = TimerHandle::new(1 << 60, true);
const TIMER_RENDER: TimerHandle = TimerHandle::new((1 << 60) + 1, true);

/// Clamp a scroll position into `[-max_scroll, 0]`
///
/// Written as two comparisons so that non-finite input passes through
/// unchanged (inert motion rather than a spurious jump to a bound).
fn clamp_position(mut value: f32, max_scroll: f32) -> f32 {
    if value < -max_scroll {
        value = -max_scroll;
    }
    if value > 0.0 {
        value = 0.0;
    }
    value
}

/// One enabled scroll region
#[autoimpl(Debug where E: trait)]
struct Session<E: Element> {
    element: E,
    axis: Axis,
    virtual_mode: bool,
    bounce_back: bool,
    previous_overflow: Overflow,

    /// Touch-start coordinate along the axis
    start_position: f32,
    /// Committed scroll position; `-max_scroll ≤ position ≤ 0` at rest
    /// when bounce is disabled
    position: f32,
    /// In-progress drag displacement, merged into `position` at touch end
    displacement: f32,
    /// Position the easing loop moves toward
    target: f32,
    /// Last position applied by the render loop
    rendered: f32,
    max_scroll: f32,
    /// Viewport extent along the axis; half of it is the snap
    /// qualification radius
    container_size: f32,
    touch_time: Instant,

    is_dragging: bool,
    in_target: bool,
    from_api: bool,

    snap_size: f32,
    snap_points: SnapPoints,
    current_index: Option<usize>,

    scroll_bar: Option<ScrollBar>,
}

/// Touch/flick/rotary scrolling engine
///
/// One engine drives at most one scroll region at a time: [`Self::enable`]
/// acquires exclusive ownership of a container [`Element`] and
/// [`Self::disable`] releases it. Raw input and requested timers are fed
/// through [`Self::handle_event`]; lifecycle notifications and scrollbar
/// painting flow back through the [`ScrollCx`] passed to each call.
#[autoimpl(Debug ignore self.easing where E: trait)]
pub struct ScrollEngine<E: Element> {
    config: ScrollConfig,
    easing: Box<dyn Easing>,
    session: Option<Session<E>>,
}

impl<E: Element> Default for ScrollEngine<E> {
    fn default() -> Self {
        ScrollEngine::new()
    }
}

impl<E: Element> ScrollEngine<E> {
    /// Construct with default configuration
    pub fn new() -> Self {
        ScrollEngine::new_with_config(ScrollConfig::default())
    }

    /// Construct with the given configuration
    pub fn new_with_config(config: ScrollConfig) -> Self {
        ScrollEngine {
            config,
            easing: Box::new(StepEase),
            session: None,
        }
    }

    /// Replace the interpolation strategy used by the easing loop
    pub fn set_easing(&mut self, easing: Box<dyn Easing>) {
        self.easing = easing;
    }

    /// Access the configuration
    #[inline]
    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Whether a session is currently enabled
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.session.is_some()
    }

    /// Access the owned element, if enabled
    pub fn element(&self) -> Option<&E> {
        self.session.as_ref().map(|s| &s.element)
    }

    /// Enable scrolling on `element`
    ///
    /// Takes exclusive ownership of the element, captures its overflow
    /// style (restored on [`Self::disable`]) and derives the scroll bound
    /// from its content and viewport extents along `axis`.
    ///
    /// In virtual mode the engine reports scroll intent through events
    /// without ever translating the element.
    ///
    /// Calling while already enabled is a usage error: a warning is
    /// logged and `element` is handed back unchanged.
    pub fn enable(&mut self, mut element: E, axis: Axis, virtual_mode: bool) -> Option<E> {
        if self.session.is_some() {
            log::warn!(
                target: "kinetic_scroll::engine",
                "enable: already enabled on another element; call disable first"
            );
            return Some(element);
        }

        let viewport = element.size().extract(axis);
        let content = element.content_size().extract(axis);
        let max_scroll = geom::max_scroll_extent(content, viewport) + self.config.overscroll;

        let previous_overflow = element.overflow();
        element.set_overflow(Overflow::Hidden);

        log::trace!(
            target: "kinetic_scroll::engine",
            "enable: axis={axis}, max_scroll={max_scroll}, virtual={virtual_mode}"
        );

        self.session = Some(Session {
            element,
            axis,
            virtual_mode,
            bounce_back: false,
            previous_overflow,
            start_position: 0.0,
            position: 0.0,
            displacement: 0.0,
            target: 0.0,
            rendered: 0.0,
            max_scroll,
            container_size: viewport,
            touch_time: Instant::now(),
            is_dragging: false,
            in_target: false,
            from_api: false,
            snap_size: self.config.snap_size,
            snap_points: SnapPoints::default(),
            current_index: None,
            scroll_bar: None,
        });
        None
    }

    /// Disable scrolling, releasing the owned element
    ///
    /// The element's captured overflow style is restored and the scrollbar
    /// (if any) is torn down. Frames already scheduled before this call
    /// are no-ops once delivered. Idempotent: a second call returns
    /// `None`.
    pub fn disable(&mut self, cx: &mut impl ScrollCx) -> Option<E> {
        let mut session = self.session.take()?;
        if let Some(bar) = &mut session.scroll_bar {
            bar.teardown(cx);
        }
        session.element.set_overflow(session.previous_overflow);
        log::trace!(target: "kinetic_scroll::engine", "disable");
        Some(session.element)
    }

    /// Attach the visual scrollbar proxy
    ///
    /// `circular` selects the arc variant for round displays.
    pub fn enable_scroll_bar(&mut self, cx: &mut impl ScrollCx, circular: bool) {
        let Some(session) = self.session.as_mut() else {
            log::warn!(target: "kinetic_scroll::engine", "enable_scroll_bar: not enabled");
            return;
        };
        let viewport = session.element.size().extract(session.axis);
        let bar = if circular {
            ScrollBar::new_circular(cx, session.axis, viewport, session.max_scroll, &self.config)
        } else {
            ScrollBar::new_linear(cx, session.axis, viewport, session.max_scroll, &self.config)
        };
        session.scroll_bar = Some(bar);
    }

    /// Detach the visual scrollbar proxy
    pub fn disable_scroll_bar(&mut self, cx: &mut impl ScrollCx) {
        if let Some(session) = self.session.as_mut()
            && let Some(mut bar) = session.scroll_bar.take()
        {
            bar.teardown(cx);
        }
    }

    /// Scrollbar state, if a scrollbar is attached
    pub fn scroll_bar(&self) -> Option<&ScrollBar> {
        self.session.as_ref().and_then(|s| s.scroll_bar.as_ref())
    }

    /// Current scroll position as a positive offset from the content start
    pub fn scroll_position(&self) -> f32 {
        self.session.as_ref().map(|s| -s.position).unwrap_or(0.0)
    }

    /// Maximum scroll extent (`+∞` when unbounded)
    pub fn max_scroll(&self) -> f32 {
        self.session.as_ref().map(|s| s.max_scroll).unwrap_or(0.0)
    }

    /// Programmatic scroll to an absolute position
    ///
    /// `value` is a scroll-space position (`0` is the content start,
    /// negative values scroll forward). Motion is marked API-originated:
    /// emitted events carry `from_api = true` until user input resumes.
    /// The render loop is stepped immediately; easing starts on the next
    /// frame.
    pub fn scroll_to(&mut self, cx: &mut impl ScrollCx, value: f32) {
        let Some(session) = self.session.as_mut() else {
            log::warn!(target: "kinetic_scroll::engine", "scroll_to: not enabled");
            return;
        };
        // an unreachable target would leave the easing loop pinned at the
        // bound without converging
        session.target = if session.bounce_back {
            value
        } else {
            clamp_position(value, session.max_scroll)
        };
        session.from_api = true;
        let offsets = session.offsets(session.position);
        cx.emit(ScrollEvent::BeforeStart(offsets));
        cx.request_frame_timer(TIMER_MOVE);
        session.render_tick(cx);
    }

    /// Scroll to a snap index
    ///
    /// With snap points set, the index is clamped into range and the
    /// uniform snap granularity is updated to the distance from the
    /// previously resolved index (or from the content start). Without
    /// snap points the target is `index` uniform steps into the content.
    pub fn scroll_to_index(&mut self, cx: &mut impl ScrollCx, index: usize) {
        let Some(session) = self.session.as_mut() else {
            log::warn!(target: "kinetic_scroll::engine", "scroll_to_index: not enabled");
            return;
        };
        if !session.snap_points.is_empty() {
            let previous = session.current_index;
            let index = index.min(session.snap_points.len() - 1);
            session.current_index = Some(index);
            session.target = session.snap_points.position_by_index(index);
            session.snap_size = match previous {
                Some(prev) => {
                    (session.snap_points.position_by_index(prev) - session.target).abs()
                }
                None => session.target.abs(),
            };
        } else {
            session.target = -(session.snap_size * index as f32);
        }
        session.target = clamp_position(session.target, session.max_scroll);
        cx.request_frame_timer(TIMER_MOVE);
        cx.request_frame_timer(TIMER_RENDER);
    }

    /// Override the scroll bound from a total content extent
    ///
    /// The bound becomes `total_content_extent` minus the viewport extent.
    /// A zero-or-negative result collapses to `+∞` (unbounded: clamping
    /// is disabled), supporting decorative scroll regions without content
    /// overflow. Scrollbar thumb geometry is recomputed when the bound
    /// changes.
    pub fn set_max_scroll(&mut self, cx: &mut impl ScrollCx, total_content_extent: f32) {
        let Some(session) = self.session.as_mut() else {
            log::warn!(target: "kinetic_scroll::engine", "set_max_scroll: not enabled");
            return;
        };
        let viewport = session.element.size().extract(session.axis);
        let bound = (total_content_extent - viewport).max(0.0);
        if bound != session.max_scroll {
            session.max_scroll = geom::max_scroll_override(total_content_extent, viewport);
            if let Some(bar) = &mut session.scroll_bar {
                bar.set_limits(cx, viewport, session.max_scroll, &self.config);
            }
        }
    }

    /// Set the uniform snap granularity
    ///
    /// Also re-derives the scroll bound and viewport extent: snap
    /// resolution assumes up-to-date geometry.
    pub fn set_snap_size(&mut self, size: f32) {
        let Some(session) = self.session.as_mut() else {
            log::warn!(target: "kinetic_scroll::engine", "set_snap_size: not enabled");
            return;
        };
        session.snap_size = size;
        session.refresh_geometry(&self.config);
    }

    /// Replace the snap points
    ///
    /// Points are scroll-space positions, first anchor first; when
    /// non-empty they override the uniform snap granularity. Index
    /// identity is positional and may churn between calls. Geometry is
    /// re-derived as for [`Self::set_snap_size`].
    pub fn set_snap_points(&mut self, points: Vec<SnapPoint>) {
        let Some(session) = self.session.as_mut() else {
            log::warn!(target: "kinetic_scroll::engine", "set_snap_points: not enabled");
            return;
        };
        session.snap_points.set(points);
        session.refresh_geometry(&self.config);
    }

    /// Allow (or disallow) transient excursion beyond the scroll bounds
    pub fn set_bounce_back(&mut self, bounce_back: bool) {
        if let Some(session) = self.session.as_mut() {
            session.bounce_back = bounce_back;
        }
    }

    /// Is `element` the currently owned container?
    pub fn is_element(&self, element: &E) -> bool
    where
        E: PartialEq,
    {
        self.session.as_ref().is_some_and(|s| s.element == *element)
    }

    /// Feed one input event or requested timer
    ///
    /// Consumes touch events, rotary detents and the engine's own timers.
    /// Events delivered after [`Self::disable`] are `Unused` no-ops.
    pub fn handle_event(&mut self, cx: &mut impl ScrollCx, event: Event) -> IsUsed {
        let Some(session) = self.session.as_mut() else {
            return Unused;
        };
        match event {
            Event::TouchStart { coord, touch_count, in_target, time } => {
                session.touch_start(cx, coord, touch_count, in_target, time)
            }
            Event::TouchMove { coord, touch_count } => {
                session.touch_move(cx, coord, touch_count, &self.config)
            }
            Event::TouchEnd { time } => session.touch_end(cx, time, &self.config),
            Event::RotaryDetent(direction) => session.rotary(cx, direction),
            Event::Timer(TIMER_MOVE) => session.move_tick(cx, &*self.easing, &self.config),
            Event::Timer(TIMER_RENDER) => session.render_tick(cx),
            Event::Timer(TIMER_FADE) => {
                if let Some(bar) = &mut session.scroll_bar {
                    bar.fade_timeout(cx);
                }
                Used
            }
            _ => Unused,
        }
    }
}

impl<E: Element> Session<E> {
    /// Directional event payload for a scroll-space position
    fn offsets(&self, position: f32) -> ScrollOffsets {
        let mut offsets = ScrollOffsets {
            in_bounds: position >= -self.max_scroll && position <= 0.0,
            from_api: self.from_api,
            ..Default::default()
        };
        match self.axis {
            Axis::Horizontal => offsets.scroll_left = -position,
            Axis::Vertical => offsets.scroll_top = -position,
        }
        offsets
    }

    fn half_extent(&self) -> f32 {
        self.container_size / 2.0
    }

    /// Re-derive viewport extent and scroll bound from the element
    fn refresh_geometry(&mut self, config: &ScrollConfig) {
        let viewport = self.element.size().extract(self.axis);
        let content = self.element.content_size().extract(self.axis);
        self.container_size = viewport;
        self.max_scroll = geom::max_scroll_extent(content, viewport) + config.overscroll;
    }

    fn fade_in_bar(&mut self, cx: &mut impl ScrollCx, config: &ScrollConfig) {
        if let Some(bar) = &mut self.scroll_bar {
            bar.fade_in(cx, config);
        }
    }

    fn touch_start(
        &mut self,
        cx: &mut impl ScrollCx,
        coord: Vec2,
        touch_count: usize,
        in_target: bool,
        time: Instant,
    ) -> IsUsed {
        self.in_target = in_target;
        if !in_target {
            return Unused;
        }
        if touch_count == 1 {
            self.start_position = coord.extract(self.axis);
            // start of the speed measurement window for a later flick
            self.touch_time = time;
            let offsets = self.offsets(self.position);
            cx.emit(ScrollEvent::BeforeStart(offsets));
        }
        Used
    }

    fn touch_move(
        &mut self,
        cx: &mut impl ScrollCx,
        coord: Vec2,
        touch_count: usize,
        config: &ScrollConfig,
    ) -> IsUsed {
        if !self.in_target {
            return Unused;
        }
        if touch_count == 1 {
            self.from_api = false;
            self.displacement = coord.extract(self.axis) - self.start_position;

            if !self.bounce_back {
                // clamp the displacement so the followed position stays in bounds
                if self.position + self.displacement > 0.0 {
                    self.displacement = -self.position;
                }
                if self.position + self.displacement < -self.max_scroll {
                    self.displacement = -self.max_scroll - self.position;
                }
            }

            let offsets = self.offsets(self.position + self.displacement);
            if !self.is_dragging {
                cx.emit(ScrollEvent::Start(offsets));
            }
            cx.emit(ScrollEvent::Scroll(offsets));
            self.fade_in_bar(cx, config);
        }
        if !self.is_dragging {
            self.is_dragging = true;
        }
        cx.request_frame_timer(TIMER_RENDER);
        Used
    }

    fn touch_end(&mut self, cx: &mut impl ScrollCx, time: Instant, config: &ScrollConfig) -> IsUsed {
        if !self.is_dragging {
            return Unused;
        }
        self.position += self.displacement;
        let in_bounds = self.position >= -self.max_scroll && self.position <= 0.0;

        let mut animating = self.resolve_release_speed(cx, time, in_bounds, config);
        animating |= self.resolve_release_bounds(cx, in_bounds);

        self.displacement = 0.0;
        let mut offsets = self.offsets(self.position);
        offsets.in_bounds = in_bounds;
        cx.emit(ScrollEvent::Scroll(offsets));
        if !animating {
            // nothing left to settle: motion rests here
            cx.emit(ScrollEvent::End(offsets));
        }
        self.fade_in_bar(cx, config);

        self.in_target = false;
        self.is_dragging = false;
        cx.request_frame_timer(TIMER_RENDER);
        Used
    }

    /// Release correction: flick projection or slow-move settle
    ///
    /// Returns true when a settle animation was scheduled.
    fn resolve_release_speed(
        &mut self,
        cx: &mut impl ScrollCx,
        time: Instant,
        in_bounds: bool,
        config: &ScrollConfig,
    ) -> bool {
        let elapsed_ms =
            time.saturating_duration_since(self.touch_time).as_secs_f64() as f32 * 1000.0;
        let speed = (self.displacement / elapsed_ms).abs();
        let direction = ScrollDirection::from_displacement(self.displacement);

        if in_bounds && speed > config.flick_threshold {
            // project an end position from the release velocity
            let projected =
                (self.position + config.flick_projection() * self.displacement / elapsed_ms).round();
            self.target = clamp_position(projected, self.max_scroll);

            self.current_index = direction.and_then(|dir| {
                self.snap_points
                    .index_by_direction(self.target, self.half_extent(), dir)
            });
            match self.current_index {
                Some(index) => self.target = self.snap_points.position_by_index(index),
                None => self.target = round_to_grid(self.snap_size, self.target),
            }
            // grid rounding at the bound may overshoot it
            self.target = clamp_position(self.target, self.max_scroll);

            log::trace!(
                target: "kinetic_scroll::engine",
                "flick: speed={speed:.2}, target={}", self.target
            );
            let offsets = self.offsets(self.target);
            cx.emit(ScrollEvent::Flick(offsets));
            cx.request_frame_timer(TIMER_MOVE);
            true
        } else if self.displacement != 0.0 {
            // too slow to flick: settle onto the nearest anchor
            self.current_index = direction.and_then(|dir| {
                self.snap_points
                    .index_by_direction(self.position, self.half_extent(), dir)
            });
            match self.current_index {
                Some(index) => self.target = self.snap_points.position_by_index(index),
                None => self.target = round_to_grid(self.snap_size, self.position),
            }
            self.target = clamp_position(self.target, self.max_scroll);
            cx.request_frame_timer(TIMER_MOVE);
            true
        } else {
            false
        }
    }

    /// Release correction: bounce back to the nearer bound, or clamp
    ///
    /// Returns true when a bounce animation was scheduled.
    fn resolve_release_bounds(&mut self, cx: &mut impl ScrollCx, in_bounds: bool) -> bool {
        if self.bounce_back {
            if !in_bounds {
                self.target = if self.position > 0.0 {
                    0.0
                } else {
                    -self.max_scroll
                };
                cx.request_frame_timer(TIMER_MOVE);
                return true;
            }
        } else {
            self.position = clamp_position(self.position, self.max_scroll);
        }
        false
    }

    fn rotary(&mut self, cx: &mut impl ScrollCx, direction: RotaryDirection) -> IsUsed {
        // a hidden element has no extent to step within
        if self.element.size().extract(self.axis) == 0.0 {
            return Used;
        }

        if self.is_dragging {
            self.displacement = 0.0;
            self.is_dragging = false;
        }

        let direction = match direction {
            RotaryDirection::Clockwise => ScrollDirection::Forward,
            RotaryDirection::CounterClockwise => ScrollDirection::Backward,
        };

        // one uniform step, shortened when the next anchor is nearer
        let mut step = self.snap_size;
        if !self.snap_points.is_empty()
            && let Some(index) =
                self.snap_points
                    .index_by_direction(self.target, self.half_extent(), direction)
        {
            let anchor = self.snap_points.position_by_index(index);
            let distance = match direction {
                ScrollDirection::Forward => self.target - anchor,
                ScrollDirection::Backward => anchor - self.target,
            };
            if distance > 0.0 && distance < self.snap_size {
                step = distance;
            }
        }

        match direction {
            ScrollDirection::Forward => self.target -= step,
            ScrollDirection::Backward => self.target += step,
        }
        self.target = clamp_position(self.target, self.max_scroll);

        self.current_index =
            self.snap_points
                .index_by_direction(self.target, self.half_extent(), direction);
        if let Some(index) = self.current_index {
            self.target = self.snap_points.position_by_index(index);
        } else if self.snap_size != 0.0 {
            self.target = self.target.round();
        }
        self.target = clamp_position(self.target, self.max_scroll);

        log::trace!(
            target: "kinetic_scroll::engine",
            "rotary: {direction:?}, target={}", self.target
        );
        cx.request_frame_timer(TIMER_MOVE);
        cx.request_frame_timer(TIMER_RENDER);

        let mut offsets = self.offsets(self.target);
        offsets.from_api = false;
        cx.emit(ScrollEvent::Start(offsets));
        Used
    }

    /// One step of the easing loop
    ///
    /// Moves the position toward the target and re-requests the frame
    /// timer until the interpolation finishes; the final tick lands
    /// exactly on the target.
    fn move_tick(
        &mut self,
        cx: &mut impl ScrollCx,
        easing: &dyn Easing,
        config: &ScrollConfig,
    ) -> IsUsed {
        let finished = match easing.step(self.position, self.target) {
            EaseStep::Continue(position) => {
                self.position = position;
                cx.request_frame_timer(TIMER_MOVE);
                false
            }
            EaseStep::Finish => {
                self.position = self.target;
                true
            }
        };
        if !self.bounce_back {
            self.position = clamp_position(self.position, self.max_scroll);
        }

        let offsets = self.offsets(self.position);
        cx.emit(ScrollEvent::Scroll(offsets));
        if finished && !self.is_dragging {
            cx.emit(ScrollEvent::End(offsets));
        }

        self.fade_in_bar(cx, config);
        cx.request_frame_timer(TIMER_RENDER);
        Used
    }

    /// One step of the render loop
    ///
    /// Applies the visual translation and scrollbar position, then
    /// re-requests the frame timer only while the rendered position keeps
    /// changing.
    fn render_tick(&mut self, cx: &mut impl ScrollCx) -> IsUsed {
        let new_rendered = self.position + self.displacement;
        if new_rendered != self.rendered {
            self.rendered = new_rendered;
            if let Some(bar) = &mut self.scroll_bar {
                bar.update_position(cx, new_rendered, self.max_scroll);
            }
            if !self.virtual_mode {
                let translation = Vec2::from_axis(self.axis, new_rendered);
                self.element.set_translation(translation);
            }
            cx.request_frame_timer(TIMER_RENDER);
        }
        Used
    }
}
