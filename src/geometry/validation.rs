//! Polygon well-formedness checks
//!
//! Rejects point lists that cannot be stored as a polygon:
//! - Too few vertices
//! - Identical consecutive vertices (closing edge included)
//! - Coordinates outside the drawable range

use serde::Deserialize;
use thiserror::Error;

use crate::domain::Point;

/// Default lowest accepted coordinate value
pub const MIN_COORDINATE: f64 = -1000.0;
/// Default highest accepted coordinate value
pub const MAX_COORDINATE: f64 = 10000.0;
/// Default smallest vertex count for a polygon
pub const MIN_POINTS: usize = 3;

/// Why a point list was rejected. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PointsError {
    #[error("Polygon must have at least {min} points")]
    InsufficientPoints { min: usize },

    #[error("Consecutive points cannot be identical")]
    DuplicateConsecutivePoints,

    #[error("Point coordinates must be between {min} and {max}")]
    OutOfBounds { min: f64, max: f64 },
}

fn default_min_points() -> usize {
    MIN_POINTS
}
fn default_min_coordinate() -> f64 {
    MIN_COORDINATE
}
fn default_max_coordinate() -> f64 {
    MAX_COORDINATE
}

/// Tunable limits applied by [`validate_points_with`]
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ValidationLimits {
    #[serde(default = "default_min_points")]
    pub min_points: usize,
    #[serde(default = "default_min_coordinate")]
    pub min_coordinate: f64,
    #[serde(default = "default_max_coordinate")]
    pub max_coordinate: f64,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            min_points: MIN_POINTS,
            min_coordinate: MIN_COORDINATE,
            max_coordinate: MAX_COORDINATE,
        }
    }
}

impl ValidationLimits {
    /// Whether a single coordinate lies outside the accepted range.
    ///
    /// NaN is never outside: every ordering comparison with NaN is false.
    fn is_out_of_range(&self, v: f64) -> bool {
        v < self.min_coordinate || v > self.max_coordinate
    }
}

/// Validate a point list against the default limits
pub fn validate_points(points: &[Point]) -> Result<(), PointsError> {
    validate_points_with(points, &ValidationLimits::default())
}

/// Validate a point list, stopping at the first failed check
///
/// Checks, in order:
/// 1. At least `limits.min_points` vertices
/// 2. No vertex equal to the next one, wrapping from last to first
/// 3. Every coordinate within `[min_coordinate, max_coordinate]`
pub fn validate_points_with(
    points: &[Point],
    limits: &ValidationLimits,
) -> Result<(), PointsError> {
    if points.len() < limits.min_points {
        return Err(PointsError::InsufficientPoints {
            min: limits.min_points,
        });
    }

    if has_duplicate_consecutive(points) {
        return Err(PointsError::DuplicateConsecutivePoints);
    }

    let out_of_bounds = points
        .iter()
        .any(|p| limits.is_out_of_range(p.x) || limits.is_out_of_range(p.y));
    if out_of_bounds {
        return Err(PointsError::OutOfBounds {
            min: limits.min_coordinate,
            max: limits.max_coordinate,
        });
    }

    Ok(())
}

/// Check whether any vertex equals its successor, closing edge included
fn has_duplicate_consecutive(points: &[Point]) -> bool {
    let n = points.len();
    (0..n).any(|i| {
        let current = points[i];
        let next = points[(i + 1) % n];
        current.x == next.x && current.y == next.y
    })
}
