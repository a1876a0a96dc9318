//! Request handling behind the CLI subcommands
//!
//! Every request produces a JSON envelope. Rejected requests still produce
//! one, with `success: false` and the user-facing error text.

use serde::Serialize;
use serde_json::{Value, json};

use super::{ApiResponse, PolygonService};
use crate::domain::{NewPolygon, PolygonId, parse_points};
use crate::error::PolygonError;
use crate::geometry::{ValidationLimits, is_polygon_self_intersecting, validate_points_with};
use crate::store::PolygonStore;

/// A store-backed request. Point lists arrive as raw JSON text.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Create { name: String, points: String },
    List,
    Get { id: String },
    Delete { id: String },
    Stats,
    Seed,
}

/// Rendered envelope plus the status it was produced with
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub body: Value,
    /// HTTP-style status, 200 or 201 on success
    pub status: u16,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        self.status < 300
    }

    fn ok<T: Serialize>(
        status: u16,
        data: T,
        message: impl Into<String>,
    ) -> serde_json::Result<Self> {
        Ok(Self {
            body: serde_json::to_value(ApiResponse::ok(data, message))?,
            status,
        })
    }

    fn failure(error: &PolygonError) -> serde_json::Result<Self> {
        if error.is_client_error() {
            tracing::debug!(status = error.status(), error = %error, "request rejected");
        } else {
            tracing::error!(status = error.status(), error = %error, "request failed");
        }
        Ok(Self {
            body: serde_json::to_value(ApiResponse::failure(error))?,
            status: error.status(),
        })
    }

    fn from_result(
        result: Result<serde_json::Result<Self>, PolygonError>,
    ) -> serde_json::Result<Self> {
        result.unwrap_or_else(|e| Self::failure(&e))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PointsReport {
    valid: bool,
    point_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    /// Only computed once the basic checks pass
    #[serde(skip_serializing_if = "Option::is_none")]
    self_intersecting: Option<bool>,
}

/// Check a raw JSON point list without touching any store
pub fn validate_request(points: &str, limits: &ValidationLimits) -> serde_json::Result<Outcome> {
    let points = match parse_points(points) {
        Ok(points) => points,
        Err(e) => return Outcome::failure(&e),
    };

    let report = match validate_points_with(&points, limits) {
        Ok(()) => {
            let self_intersecting = is_polygon_self_intersecting(&points);
            PointsReport {
                valid: !self_intersecting,
                point_count: points.len(),
                error: self_intersecting.then(|| PolygonError::SelfIntersecting.to_string()),
                self_intersecting: Some(self_intersecting),
            }
        }
        Err(e) => PointsReport {
            valid: false,
            point_count: points.len(),
            error: Some(e.to_string()),
            self_intersecting: None,
        },
    };

    // A well-formed request was answered either way; the verdict is in the body.
    let (status, message) = if report.valid {
        (200, "Polygon is valid")
    } else {
        (422, "Polygon is invalid")
    };
    Outcome::ok(status, report, message)
}

/// Run one store-backed request against the service
pub fn handle<S: PolygonStore>(
    service: &mut PolygonService<S>,
    request: Request,
) -> serde_json::Result<Outcome> {
    let result = match request {
        Request::Create { name, points } => parse_points(&points)
            .and_then(|points| service.create(NewPolygon::new(name, points)))
            .map(|polygon| Outcome::ok(201, polygon, "Polygon created successfully")),
        Request::List => {
            let polygons = service.list();
            let message = format!("Retrieved {} polygons", polygons.len());
            Ok(Outcome::ok(200, polygons, message))
        }
        Request::Get { id } => PolygonId::parse(&id)
            .and_then(|id| service.get(id))
            .map(|polygon| Outcome::ok(200, polygon, "Polygon retrieved successfully")),
        Request::Delete { id } => PolygonId::parse(&id)
            .and_then(|id| service.delete(id))
            .map(|id| Outcome::ok(200, json!({ "id": id }), "Polygon deleted successfully")),
        Request::Stats => Ok(Outcome::ok(
            200,
            service.stats(),
            "Statistics retrieved successfully",
        )),
        Request::Seed => service.seed().map(|created| {
            let message = format!("Seeded {} polygons", created.len());
            Outcome::ok(201, created, message)
        }),
    };

    Outcome::from_result(result)
}
