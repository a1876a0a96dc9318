//! Error types for polygon storage and the creation path.

use std::path::PathBuf;
use thiserror::Error;

use crate::geometry::PointsError;

/// Failures while reading or writing the polygon store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access polygon store at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("polygon store at {path:?} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// JSON has no representation for NaN or infinity
    #[error("polygon '{name}' has a non-finite coordinate and cannot be stored")]
    NonFiniteCoordinate { name: String },

    #[error("polygon store has no free ids left")]
    IdsExhausted,
}

/// Rejections and failures reported by the polygon service.
///
/// The `Display` text of every input-related variant is meant to be shown
/// to the user as-is.
#[derive(Debug, Error)]
pub enum PolygonError {
    #[error("{0}")]
    InvalidName(String),

    #[error("{0}")]
    InvalidId(String),

    #[error(transparent)]
    InvalidPoints(#[from] PointsError),

    /// Point input that does not have the `[{"x": number, "y": number}]` shape
    #[error("{0}")]
    MalformedPoints(String),

    #[error("Polygon cannot be self-intersecting")]
    SelfIntersecting,

    #[error("Polygon with name '{0}' already exists")]
    NameTaken(String),

    #[error("Polygon not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PolygonError {
    /// HTTP-style status code for the failure class
    pub fn status(&self) -> u16 {
        match self {
            PolygonError::InvalidName(_)
            | PolygonError::InvalidId(_)
            | PolygonError::InvalidPoints(_)
            | PolygonError::MalformedPoints(_)
            | PolygonError::SelfIntersecting => 400,
            PolygonError::NotFound => 404,
            PolygonError::NameTaken(_) => 409,
            PolygonError::Store(_) => 500,
        }
    }

    /// Whether the caller can fix the failure by changing its input
    pub fn is_client_error(&self) -> bool {
        self.status() < 500
    }
}
