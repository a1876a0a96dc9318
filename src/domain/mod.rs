pub mod point;
pub mod polygon;

pub use point::{Point, parse_points};
pub use polygon::{MAX_NAME_LEN, NewPolygon, Polygon, PolygonId, PolygonStats, validate_name};
