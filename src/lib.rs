// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Kinetic scrolling engine
//!
//! This crate converts raw touch, drag and rotary-dial input into smooth
//! one-dimensional scroll motion for a host-supplied container element:
//! direct follow while touching, momentum ("flick") projection on release,
//! optional snap-to-anchor resolution, bounce-at-edge correction and a
//! synchronized linear or circular scrollbar.
//!
//! The crate does not talk to any windowing system or DOM itself. The host
//! supplies:
//!
//! -   an [`Element`]: the owned scrollable container (size queries, visual
//!     translation, overflow style);
//! -   a [`ScrollCx`]: frame/timer scheduling, scrollbar painting and
//!     delivery of [`ScrollEvent`] lifecycle notifications.
//!
//! Input events are fed to [`ScrollEngine::handle_event`]; requested frame
//! timers must be delivered back as [`Event::Timer`]. Both the easing loop
//! and the render loop run to a local fixed point and stop requesting
//! frames, so there is no always-on timer.

pub extern crate easy_cast as cast;

mod engine;

pub mod config;
pub mod cx;
pub mod dir;
pub mod ease;
pub mod event;
pub mod geom;
pub mod scrollbar;
pub mod snap;

pub use config::ScrollConfig;
pub use cx::{Element, Overflow, ScrollCx};
pub use engine::ScrollEngine;
pub use event::{Event, ScrollEvent, ScrollOffsets, TimerHandle};
