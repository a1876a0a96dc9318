pub mod intersection;
pub mod validation;

pub use intersection::{is_polygon_self_intersecting, segments_intersect};
pub use validation::{PointsError, ValidationLimits, validate_points, validate_points_with};
