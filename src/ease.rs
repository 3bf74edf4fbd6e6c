// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Interpolation strategies
//!
//! The easing loop moves the current position toward the target once per
//! frame. The strategy is pluggable so tests can substitute a direct jump
//! and hosts can tune the feel.

/// Result of one interpolation step
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EaseStep {
    /// Motion continues from the given position; another frame is needed
    Continue(f32),
    /// Motion finished exactly on the target
    Finish,
}

/// Per-frame interpolation toward a target position
pub trait Easing: std::fmt::Debug {
    /// Compute the next position given the current and target positions
    ///
    /// Returning [`EaseStep::Finish`] ends the loop; the caller snaps the
    /// position exactly onto `target`.
    fn step(&self, current: f32, target: f32) -> EaseStep;
}

/// Geometric-decay ease
///
/// Moves 10% of the remaining distance while far from the target (more
/// than 10 units away), 50% while closer (more than 2 units), and snaps
/// exactly onto the target from 2 units or less. Steps are rounded to
/// whole units. Duration is implicit: proportional to the logarithm of
/// the initial distance rather than fixed.
///
/// The branch order matters for `NaN` targets: both distance comparisons
/// are false, so the loop terminates on the spot instead of iterating
/// forever.
#[derive(Copy, Clone, Debug, Default)]
pub struct StepEase;

impl Easing for StepEase {
    fn step(&self, current: f32, target: f32) -> EaseStep {
        let diff = target - current;
        if diff.abs() > 10.0 {
            EaseStep::Continue((current + diff / 10.0).round())
        } else if diff.abs() > 2.0 {
            EaseStep::Continue((current + diff / 2.0).round())
        } else {
            EaseStep::Finish
        }
    }
}
