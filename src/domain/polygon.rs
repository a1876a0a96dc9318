use serde::{Deserialize, Serialize};
use std::fmt;

use super::Point;
use crate::error::PolygonError;

/// Longest accepted polygon name, counted in characters after trimming
pub const MAX_NAME_LEN: usize = 100;

/// Positive numeric identifier assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolygonId(u64);

impl PolygonId {
    /// Wrap a raw id, rejecting zero
    pub fn new(raw: u64) -> Result<Self, PolygonError> {
        if raw == 0 {
            return Err(PolygonError::InvalidId(
                "Polygon ID must be positive".to_string(),
            ));
        }
        Ok(Self(raw))
    }

    /// Parse a user-supplied id such as a CLI argument
    pub fn parse(input: &str) -> Result<Self, PolygonError> {
        let trimmed = input.trim();
        let value: i128 = match trimmed.parse() {
            Ok(value) => value,
            Err(_) => integral_float(trimmed)?,
        };

        if value <= 0 {
            return Err(PolygonError::InvalidId(
                "Polygon ID must be positive".to_string(),
            ));
        }

        u64::try_from(value)
            .map(Self)
            .map_err(|_| PolygonError::InvalidId("Polygon ID is out of range".to_string()))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    pub(crate) const FIRST: PolygonId = PolygonId(1);
}

impl fmt::Display for PolygonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored polygon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Polygon {
    pub id: PolygonId,
    pub name: String,
    pub points: Vec<Point>,
    /// Unix time in milliseconds
    pub created_at: u64,
    /// Unix time in milliseconds
    pub updated_at: u64,
}

/// A polygon as submitted for creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPolygon {
    pub name: String,
    pub points: Vec<Point>,
}

impl NewPolygon {
    pub fn new(name: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }
}

/// Aggregate figures over every stored polygon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonStats {
    pub total_polygons: usize,
    /// Mean vertex count, rounded to two decimals
    pub average_points: f64,
    pub oldest_polygon: Option<u64>,
    pub newest_polygon: Option<u64>,
}

impl PolygonStats {
    pub fn empty() -> Self {
        Self {
            total_polygons: 0,
            average_points: 0.0,
            oldest_polygon: None,
            newest_polygon: None,
        }
    }
}

/// Accept numeric spellings such as `1e3` or `7.0` that denote an integer
fn integral_float(input: &str) -> Result<i128, PolygonError> {
    let invalid = |message: &str| PolygonError::InvalidId(message.to_string());

    let value: f64 = input
        .parse()
        .map_err(|_| invalid("Polygon ID must be a number"))?;
    if !value.is_finite() {
        return Err(invalid("Polygon ID must be a number"));
    }
    if value.fract() != 0.0 {
        return Err(invalid("Polygon ID must be an integer"));
    }
    if value.abs() > u64::MAX as f64 {
        return Err(invalid("Polygon ID is out of range"));
    }
    Ok(value as i128)
}

/// Trim a polygon name and check that it is non-empty and short enough
pub fn validate_name(name: &str) -> Result<String, PolygonError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PolygonError::InvalidName(
            "Polygon name cannot be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(PolygonError::InvalidName(format!(
            "Polygon name cannot be longer than {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(trimmed.to_string())
}
