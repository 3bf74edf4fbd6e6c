// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! End-to-end gesture tests driving [`ScrollEngine`] with a mock host

use kinetic_scroll::dir::Axis;
use kinetic_scroll::geom::Vec2;
use kinetic_scroll::snap::SnapPoint;
use kinetic_scroll::{
    Element, Event, Overflow, ScrollCx, ScrollEngine, ScrollEvent, TimerHandle,
};
use std::time::{Duration, Instant};

#[derive(Clone, Debug, PartialEq)]
struct Pane {
    size: Vec2,
    content: Vec2,
    translation: Vec2,
    overflow: Overflow,
}

impl Pane {
    /// A vertical pane: viewport 200, content 500 (max scroll 300)
    fn standard() -> Self {
        Pane {
            size: Vec2(200.0, 200.0),
            content: Vec2(200.0, 500.0),
            translation: Vec2::ZERO,
            overflow: Overflow::Auto,
        }
    }
}

impl Element for Pane {
    fn size(&self) -> Vec2 {
        self.size
    }
    fn content_size(&self) -> Vec2 {
        self.content
    }
    fn set_translation(&mut self, offset: Vec2) {
        self.translation = offset;
    }
    fn overflow(&self) -> Overflow {
        self.overflow
    }
    fn set_overflow(&mut self, overflow: Overflow) {
        self.overflow = overflow;
    }
}

#[derive(Default)]
struct Host {
    events: Vec<ScrollEvent>,
    frame_timers: Vec<TimerHandle>,
    delayed_timers: Vec<(TimerHandle, Duration)>,
    bar_shown: bool,
}

impl ScrollCx for Host {
    fn request_frame_timer(&mut self, handle: TimerHandle) {
        if !self.frame_timers.contains(&handle) {
            self.frame_timers.push(handle);
        }
    }
    fn request_timer(&mut self, handle: TimerHandle, delay: Duration) {
        self.delayed_timers.retain(|(h, _)| *h != handle);
        self.delayed_timers.push((handle, delay));
    }
    fn emit(&mut self, event: ScrollEvent) {
        self.events.push(event);
    }
    fn bar_show(&mut self) {
        self.bar_shown = true;
    }
    fn bar_hide(&mut self) {
        self.bar_shown = false;
    }
}

/// Deliver pending frame timers until both loops go quiet
fn pump(engine: &mut ScrollEngine<Pane>, host: &mut Host) {
    for _ in 0..10_000 {
        if host.frame_timers.is_empty() {
            return;
        }
        let pending = std::mem::take(&mut host.frame_timers);
        for handle in pending {
            engine.handle_event(host, Event::Timer(handle));
        }
    }
    panic!("frame loops did not reach a fixed point");
}

fn touch_start(y: f32, time: Instant) -> Event {
    Event::TouchStart {
        coord: Vec2(0.0, y),
        touch_count: 1,
        in_target: true,
        time,
    }
}

fn touch_move(y: f32) -> Event {
    Event::TouchMove { coord: Vec2(0.0, y), touch_count: 1 }
}

/// Drag from `from` to `to` over `ms` milliseconds, then release
fn drag(
    engine: &mut ScrollEngine<Pane>,
    host: &mut Host,
    from: f32,
    to: f32,
    ms: u64,
) {
    let t0 = Instant::now();
    engine.handle_event(host, touch_start(from, t0));
    engine.handle_event(host, touch_move(to));
    engine.handle_event(host, Event::TouchEnd { time: t0 + Duration::from_millis(ms) });
}

fn kinds(events: &[ScrollEvent]) -> Vec<&'static str> {
    events
        .iter()
        .map(|ev| match ev {
            ScrollEvent::BeforeStart(_) => "before-start",
            ScrollEvent::Start(_) => "start",
            ScrollEvent::Scroll(_) => "scroll",
            ScrollEvent::End(_) => "end",
            ScrollEvent::Flick(_) => "flick",
        })
        .collect()
}

#[test]
fn enable_is_exclusive_and_disable_idempotent() {
    let mut host = Host::default();
    let mut engine = ScrollEngine::new();
    assert!(engine.enable(Pane::standard(), Axis::Vertical, false).is_none());
    assert!(engine.is_enabled());
    assert_eq!(engine.element().unwrap().overflow, Overflow::Hidden);

    // a second element is handed back untouched
    let rejected = engine.enable(Pane::standard(), Axis::Vertical, false);
    assert_eq!(rejected.unwrap().overflow, Overflow::Auto);

    let released = engine.disable(&mut host).unwrap();
    assert_eq!(released.overflow, Overflow::Auto);
    assert!(engine.disable(&mut host).is_none());
    assert!(!engine.is_enabled());

    // events after disable are ignored
    let used = engine.handle_event(&mut host, touch_move(50.0));
    assert_eq!(used, kinetic_scroll::event::Unused);
}

#[test]
fn drag_follows_touch_with_inverted_sign() {
    let mut host = Host::default();
    let mut engine = ScrollEngine::new();
    engine.enable(Pane::standard(), Axis::Vertical, false);

    let t0 = Instant::now();
    engine.handle_event(&mut host, touch_start(180.0, t0));
    engine.handle_event(&mut host, touch_move(60.0));
    pump(&mut engine, &mut host);

    // content moved up by 120 while scroll offsets report +120
    assert_eq!(engine.element().unwrap().translation, Vec2(0.0, -120.0));
    let last = host.events.last().unwrap();
    assert!(matches!(last, ScrollEvent::Scroll(_)));
    assert_eq!(last.offsets().scroll_top, 120.0);
    assert_eq!(last.offsets().scroll_left, 0.0);
    assert!(last.offsets().in_bounds);
    assert!(!last.offsets().from_api);
}

#[test]
fn drag_is_clamped_to_bounds() {
    let mut host = Host::default();
    let mut engine = ScrollEngine::new();
    engine.enable(Pane::standard(), Axis::Vertical, false);

    // drag far past the end of 300 scrollable pixels
    let t0 = Instant::now();
    engine.handle_event(&mut host, touch_start(500.0, t0));
    engine.handle_event(&mut host, touch_move(0.0));
    pump(&mut engine, &mut host);
    assert_eq!(engine.element().unwrap().translation, Vec2(0.0, -300.0));

    for ev in &host.events {
        let o = ev.offsets();
        assert!(o.scroll_top >= 0.0 && o.scroll_top <= 300.0);
        assert!(o.in_bounds);
    }
}

#[test]
fn fast_release_flicks() {
    let mut host = Host::default();
    let mut engine = ScrollEngine::new();
    engine.enable(Pane::standard(), Axis::Vertical, false);

    // 120 px in 50 ms: 2.4 px/ms, above the 1.0 threshold
    drag(&mut engine, &mut host, 180.0, 60.0, 50);

    let flick = host
        .events
        .iter()
        .find_map(|ev| match ev {
            ScrollEvent::Flick(o) => Some(*o),
            _ => None,
        })
        .expect("flick fired");
    // projection overshoots the bound; clamped to 300 then grid-rounded
    assert_eq!(flick.scroll_top, 270.0);

    pump(&mut engine, &mut host);
    assert_eq!(engine.scroll_position(), 270.0);
    assert!(matches!(host.events.last(), Some(ScrollEvent::End(_))));
}

#[test]
fn slow_release_settles_without_flick() {
    let mut host = Host::default();
    let mut engine = ScrollEngine::new();
    engine.enable(Pane::standard(), Axis::Vertical, false);

    // 10 px in 50 ms: 0.2 px/ms, below the threshold
    drag(&mut engine, &mut host, 180.0, 170.0, 50);
    pump(&mut engine, &mut host);

    assert!(!host.events.iter().any(|ev| matches!(ev, ScrollEvent::Flick(_))));
    // nearest multiple of the default 90 px grid
    assert_eq!(engine.scroll_position(), 0.0);
}

#[test]
fn settle_resolves_to_nearest_snap_point_from_both_sides() {
    // +30 px leaves the position at -90; -10 px leaves it at -130
    for (from, to) in [(60.0, 90.0), (180.0, 170.0)] {
        let mut host = Host::default();
        let mut engine = ScrollEngine::new();
        engine.enable(Pane::standard(), Axis::Vertical, false);
        engine.set_snap_points(vec![
            SnapPoint::from(0.0),
            SnapPoint::from(-100.0),
            SnapPoint::from(-250.0),
        ]);

        // park at -120 first, then nudge so release lands near the anchor
        engine.scroll_to(&mut host, -120.0);
        pump(&mut engine, &mut host);
        drag(&mut engine, &mut host, from, to, 400);
        pump(&mut engine, &mut host);

        assert_eq!(engine.scroll_position(), 100.0);
    }
}

#[test]
fn gesture_event_order() {
    let mut host = Host::default();
    let mut engine = ScrollEngine::new();
    engine.enable(Pane::standard(), Axis::Vertical, false);

    drag(&mut engine, &mut host, 180.0, 170.0, 400);
    pump(&mut engine, &mut host);

    let kinds = kinds(&host.events);
    assert_eq!(kinds[..3], ["before-start", "start", "scroll"]);
    assert_eq!(kinds.iter().filter(|k| **k == "end").count(), 1);
    assert_eq!(*kinds.last().unwrap(), "end");
}

#[test]
fn scroll_to_settles_exactly() {
    let mut host = Host::default();
    let mut engine = ScrollEngine::new();
    engine.enable(Pane::standard(), Axis::Vertical, false);

    engine.scroll_to(&mut host, -300.0);
    assert!(matches!(host.events.first(), Some(ScrollEvent::BeforeStart(_))));
    pump(&mut engine, &mut host);

    assert_eq!(engine.scroll_position(), 300.0);
    assert_eq!(engine.element().unwrap().translation, Vec2(0.0, -300.0));

    let n = host.events.len();
    match (&host.events[n - 2], &host.events[n - 1]) {
        (ScrollEvent::Scroll(scroll), ScrollEvent::End(end)) => {
            assert_eq!(scroll.scroll_top, 300.0);
            assert!(scroll.in_bounds);
            assert!(scroll.from_api);
            assert_eq!(end.scroll_top, 300.0);
        }
        other => panic!("expected Scroll then End, got {other:?}"),
    }
}

#[test]
fn api_flag_clears_on_user_input() {
    let mut host = Host::default();
    let mut engine = ScrollEngine::new();
    engine.enable(Pane::standard(), Axis::Vertical, false);

    engine.scroll_to(&mut host, -90.0);
    pump(&mut engine, &mut host);
    assert!(host.events.iter().all(|ev| ev.offsets().from_api));

    host.events.clear();
    drag(&mut engine, &mut host, 180.0, 170.0, 400);
    pump(&mut engine, &mut host);
    // the touch-move resets the flag; only the initial BeforeStart
    // (emitted before any movement) still carries it
    assert!(host.events[1..].iter().all(|ev| !ev.offsets().from_api));
}

#[test]
fn rotary_steps_one_grid_unit() {
    use kinetic_scroll::event::RotaryDirection::{Clockwise, CounterClockwise};

    let mut host = Host::default();
    let mut engine = ScrollEngine::new();
    engine.enable(Pane::standard(), Axis::Vertical, false);

    engine.handle_event(&mut host, Event::RotaryDetent(Clockwise));
    let start = host
        .events
        .iter()
        .find_map(|ev| match ev {
            ScrollEvent::Start(o) => Some(*o),
            _ => None,
        })
        .expect("start fired");
    assert_eq!(start.scroll_top, 90.0);
    pump(&mut engine, &mut host);
    assert_eq!(engine.scroll_position(), 90.0);

    engine.handle_event(&mut host, Event::RotaryDetent(Clockwise));
    pump(&mut engine, &mut host);
    assert_eq!(engine.scroll_position(), 180.0);

    engine.handle_event(&mut host, Event::RotaryDetent(CounterClockwise));
    pump(&mut engine, &mut host);
    assert_eq!(engine.scroll_position(), 90.0);

    // the first step up from rest stops at the content start
    engine.handle_event(&mut host, Event::RotaryDetent(CounterClockwise));
    engine.handle_event(&mut host, Event::RotaryDetent(CounterClockwise));
    pump(&mut engine, &mut host);
    assert_eq!(engine.scroll_position(), 0.0);
}

#[test]
fn rotary_takes_partial_step_onto_snap_point() {
    use kinetic_scroll::event::RotaryDirection::CounterClockwise;

    let mut host = Host::default();
    let mut engine = ScrollEngine::new();
    engine.enable(Pane::standard(), Axis::Vertical, false);
    engine.set_snap_points(vec![
        SnapPoint::from(0.0),
        SnapPoint::from(-100.0),
        SnapPoint::from(-250.0),
    ]);

    engine.scroll_to(&mut host, -120.0);
    pump(&mut engine, &mut host);
    assert_eq!(engine.scroll_position(), 120.0);

    // -100 is only 20 px back: step shrinks to land on the anchor
    engine.handle_event(&mut host, Event::RotaryDetent(CounterClockwise));
    pump(&mut engine, &mut host);
    assert_eq!(engine.scroll_position(), 100.0);
}

#[test]
fn virtual_mode_never_translates() {
    let mut host = Host::default();
    let mut engine = ScrollEngine::new();
    engine.enable(Pane::standard(), Axis::Vertical, true);

    drag(&mut engine, &mut host, 180.0, 60.0, 50);
    pump(&mut engine, &mut host);

    assert_eq!(engine.element().unwrap().translation, Vec2::ZERO);
    // scroll intent is still reported
    assert!(engine.scroll_position() > 0.0);
    assert!(host.events.iter().any(|ev| matches!(ev, ScrollEvent::Scroll(_))));
}

#[test]
fn max_scroll_override_collapses_to_unbounded() {
    let mut host = Host::default();
    let mut engine = ScrollEngine::new();
    engine.enable(Pane::standard(), Axis::Vertical, false);
    assert_eq!(engine.max_scroll(), 300.0);

    engine.set_max_scroll(&mut host, 700.0);
    assert_eq!(engine.max_scroll(), 500.0);

    // total content no larger than the viewport: clamping disabled
    engine.set_max_scroll(&mut host, 150.0);
    assert_eq!(engine.max_scroll(), f32::INFINITY);

    drag(&mut engine, &mut host, 2000.0, 0.0, 400);
    pump(&mut engine, &mut host);
    assert!(engine.scroll_position() > 500.0);
}

#[test]
fn bounce_back_returns_to_bound() {
    let mut host = Host::default();
    let mut engine = ScrollEngine::new();
    engine.enable(Pane::standard(), Axis::Vertical, false);
    engine.set_bounce_back(true);

    // slow drag 50 px past the content start
    drag(&mut engine, &mut host, 100.0, 150.0, 400);

    let out_of_bounds = host
        .events
        .iter()
        .any(|ev| matches!(ev, ScrollEvent::Scroll(o) if !o.in_bounds));
    assert!(out_of_bounds);

    pump(&mut engine, &mut host);
    assert_eq!(engine.scroll_position(), 0.0);
    assert!(matches!(host.events.last(), Some(ScrollEvent::End(_))));
}

#[test]
fn scroll_to_index_targets_snap_point() {
    let mut host = Host::default();
    let mut engine = ScrollEngine::new();
    engine.enable(Pane::standard(), Axis::Vertical, false);
    engine.set_snap_points(vec![
        SnapPoint::from(0.0),
        SnapPoint::from(-100.0),
        SnapPoint::from(-250.0),
    ]);

    engine.scroll_to_index(&mut host, 2);
    pump(&mut engine, &mut host);
    assert_eq!(engine.scroll_position(), 250.0);

    // out-of-range indices clamp to the last point
    engine.scroll_to_index(&mut host, 99);
    pump(&mut engine, &mut host);
    assert_eq!(engine.scroll_position(), 250.0);
}

#[test]
fn scroll_to_index_uses_uniform_grid_without_points() {
    let mut host = Host::default();
    let mut engine = ScrollEngine::new();
    engine.enable(Pane::standard(), Axis::Vertical, false);

    engine.scroll_to_index(&mut host, 2);
    pump(&mut engine, &mut host);
    assert_eq!(engine.scroll_position(), 180.0);
}

#[test]
fn scrollbar_fades_after_timeout() {
    let mut host = Host::default();
    let mut engine = ScrollEngine::new();
    engine.enable(Pane::standard(), Axis::Vertical, false);
    engine.enable_scroll_bar(&mut host, false);

    drag(&mut engine, &mut host, 180.0, 170.0, 400);
    pump(&mut engine, &mut host);
    assert!(host.bar_shown);
    assert!(engine.scroll_bar().unwrap().visible());

    let (handle, delay) = *host.delayed_timers.last().unwrap();
    assert_eq!(delay, Duration::from_millis(2000));
    // the fade handle merges to the latest request: each scroll signal
    // pushes the timeout out instead of stacking timers
    assert!(!handle.earliest());

    engine.handle_event(&mut host, Event::Timer(handle));
    assert!(!host.bar_shown);
    assert!(!engine.scroll_bar().unwrap().visible());
}
