use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PolygonError;

/// A vertex in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Build a point list from `(x, y)` pairs
pub fn points_from_pairs(pairs: &[(f64, f64)]) -> Vec<Point> {
    pairs.iter().copied().map(Point::from).collect()
}

/// Parse a JSON array of `{"x": number, "y": number}` objects
///
/// Each element is checked field by field so the error names the missing or
/// mistyped coordinate.
pub fn parse_points(input: &str) -> Result<Vec<Point>, PolygonError> {
    let value: Value = serde_json::from_str(input)
        .map_err(|e| malformed(format!("Points must be valid JSON: {}", e)))?;

    let items = value
        .as_array()
        .ok_or_else(|| malformed("Points must be an array".to_string()))?;

    items
        .iter()
        .map(|item| {
            let object = item
                .as_object()
                .ok_or_else(|| malformed("Each point must be an object".to_string()))?;
            Ok(Point::new(
                coordinate(object, "x")?,
                coordinate(object, "y")?,
            ))
        })
        .collect()
}

fn coordinate(object: &Map<String, Value>, axis: &str) -> Result<f64, PolygonError> {
    match object.get(axis) {
        None => Err(malformed(format!("Point {} coordinate is required", axis))),
        Some(value) => value
            .as_f64()
            .ok_or_else(|| malformed(format!("Point {} coordinate must be a number", axis))),
    }
}

fn malformed(message: String) -> PolygonError {
    PolygonError::MalformedPoints(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_json_shape() {
        let p: Point = serde_json::from_str(r#"{"x": 10.5, "y": -3}"#).unwrap();
        assert_eq!(p, Point::new(10.5, -3.0));

        let json = serde_json::to_string(&Point::new(1.0, 2.0)).unwrap();
        assert_eq!(json, r#"{"x":1.0,"y":2.0}"#);
    }

    #[test]
    fn test_point_rejects_missing_coordinate() {
        let result: Result<Point, _> = serde_json::from_str(r#"{"y": 100}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_points() {
        let points = parse_points(r#"[{"x": 0, "y": 0}, {"x": 100.5, "y": -20}]"#).unwrap();
        assert_eq!(points, vec![Point::new(0.0, 0.0), Point::new(100.5, -20.0)]);
    }

    #[test]
    fn test_parse_points_names_missing_coordinate() {
        let err = parse_points(r#"[{"y": 1}, {"x": 2, "y": 3}, {"x": 4, "y": 0}]"#).unwrap_err();
        assert_eq!(err.to_string(), "Point x coordinate is required");
        assert_eq!(err.status(), 400);
    }

    #[test]
    fn test_parse_points_names_non_numeric_coordinate() {
        let err = parse_points(r#"[{"x": 1, "y": "up"}]"#).unwrap_err();
        assert_eq!(err.to_string(), "Point y coordinate must be a number");
    }

    #[test]
    fn test_parse_points_rejects_wrong_shapes() {
        assert_eq!(
            parse_points(r#"{"x": 1, "y": 2}"#).unwrap_err().to_string(),
            "Points must be an array"
        );
        assert_eq!(
            parse_points("[1, 2]").unwrap_err().to_string(),
            "Each point must be an object"
        );
        assert!(matches!(
            parse_points("[{"),
            Err(PolygonError::MalformedPoints(_))
        ));
    }

    #[test]
    fn test_point_rejects_non_numeric_coordinate() {
        let result: Result<Point, _> = serde_json::from_str(r#"{"x": "invalid", "y": 100}"#);
        assert!(result.is_err());
    }
}
