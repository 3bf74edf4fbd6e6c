// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Snap-point index
//!
//! Snap points are anchor offsets the content should rest at after motion
//! ends. They live in scroll-position space (values in `[-max_scroll, 0]`)
//! and are expected sorted by position, first anchor first (descending
//! values), so that distance to a query position is locally unimodal.

use crate::dir::ScrollDirection;

/// A named anchor position
///
/// Identity is positional within the sequence passed to
/// [`ScrollEngine::set_snap_points`]; indices may churn between calls.
///
/// [`ScrollEngine::set_snap_points`]: crate::ScrollEngine::set_snap_points
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapPoint {
    pub position: f32,
}

impl From<f32> for SnapPoint {
    #[inline]
    fn from(position: f32) -> Self {
        SnapPoint { position }
    }
}

/// Ordered sequence of snap points
///
/// When non-empty this overrides the uniform snap granularity (see
/// [`round_to_grid`]).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SnapPoints {
    points: Vec<SnapPoint>,
}

impl SnapPoints {
    /// Replace all points
    pub fn set(&mut self, points: Vec<SnapPoint>) {
        self.points = points;
    }

    /// Remove all points
    pub fn clear(&mut self) {
        self.points.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Get a point by index
    #[inline]
    pub fn get(&self, index: usize) -> Option<SnapPoint> {
        self.points.get(index).copied()
    }

    /// Position of the point at `index`, with the index clamped into range
    ///
    /// Returns `0.0` when no points exist.
    pub fn position_by_index(&self, index: usize) -> f32 {
        if self.points.is_empty() {
            return 0.0;
        }
        self.points[index.min(self.points.len() - 1)].position
    }

    /// Find the nearest point to `position`
    ///
    /// Linear scan keeping the minimum-distance candidate. A candidate
    /// farther than `half_extent` (half the viewport extent along the
    /// active axis) is not selected on its own, though a closer later
    /// candidate may still be. Once distance grows past the selected
    /// minimum the search short-circuits (points are sorted).
    pub fn nearest(&self, position: f32, half_extent: f32) -> Option<usize> {
        let first = self.points.first()?;
        let mut min_distance = (position - first.position).abs();
        let mut result = None;

        for (index, point) in self.points.iter().enumerate() {
            let distance = (position - point.position).abs();

            if distance <= min_distance {
                min_distance = distance;
                if distance > half_extent {
                    continue;
                }
                result = Some(index);
            } else if result.is_some() {
                return result;
            }
        }
        result
    }

    /// Find the nearest point, excluding edge anchors passed in an
    /// outward direction
    ///
    /// The first point is excluded when moving backward past it and the
    /// last when moving forward past it: this lets a gesture scroll into a
    /// header/footer overscroll region instead of being snapped back onto
    /// the edge anchor.
    pub fn index_by_direction(
        &self,
        position: f32,
        half_extent: f32,
        direction: ScrollDirection,
    ) -> Option<usize> {
        let index = self.nearest(position, half_extent)?;

        match direction {
            ScrollDirection::Backward => {
                if index == 0 && position - self.points[index].position > 0.0 {
                    return None;
                }
            }
            ScrollDirection::Forward => {
                if index + 1 == self.points.len()
                    && position - self.points[index].position < 0.0
                {
                    return None;
                }
            }
        }
        Some(index)
    }
}

/// Round `position` to the nearest multiple of `snap_size`
///
/// Non-finite input propagates (inert motion, not a panic).
pub fn round_to_grid(snap_size: f32, position: f32) -> f32 {
    snap_size * (position / snap_size).round()
}
