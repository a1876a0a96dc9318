//! Polygon creation, lookup, deletion and statistics
//!
//! Every shape goes through the geometry checks before it reaches a store.

pub mod commands;
pub mod response;
pub mod seed;

pub use commands::{Outcome, Request, handle, validate_request};
pub use response::ApiResponse;

use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::{NewPolygon, Polygon, PolygonId, PolygonStats, validate_name};
use crate::error::PolygonError;
use crate::geometry::{ValidationLimits, is_polygon_self_intersecting, validate_points_with};
use crate::store::PolygonStore;

pub struct PolygonService<S> {
    store: S,
    limits: ValidationLimits,
}

impl<S: PolygonStore> PolygonService<S> {
    pub fn new(store: S) -> Self {
        Self::with_limits(store, ValidationLimits::default())
    }

    pub fn with_limits(store: S, limits: ValidationLimits) -> Self {
        Self { store, limits }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate and persist a new polygon
    ///
    /// Order of checks: name, point list, self-intersection, name uniqueness.
    pub fn create(&mut self, request: NewPolygon) -> Result<Polygon, PolygonError> {
        let name = validate_name(&request.name)?;
        let points = request.points;

        validate_points_with(&points, &self.limits)?;

        if is_polygon_self_intersecting(&points) {
            tracing::warn!(%name, "attempted to create self-intersecting polygon");
            return Err(PolygonError::SelfIntersecting);
        }

        if self.store.find_by_name(&name).is_some() {
            return Err(PolygonError::NameTaken(name));
        }

        let count = points.len();
        let polygon = self
            .store
            .insert(name, points, now_millis())
            .inspect_err(|e| tracing::error!(error = %e, "failed to create polygon"))?;

        tracing::info!(id = %polygon.id, name = %polygon.name, points = count, "created polygon");
        Ok(polygon)
    }

    /// All polygons, newest first
    pub fn list(&self) -> Vec<Polygon> {
        let mut polygons = self.store.records().to_vec();
        polygons.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        tracing::debug!(count = polygons.len(), "retrieved polygons");
        polygons
    }

    pub fn get(&self, id: PolygonId) -> Result<Polygon, PolygonError> {
        self.store
            .find_by_id(id)
            .cloned()
            .ok_or(PolygonError::NotFound)
    }

    pub fn delete(&mut self, id: PolygonId) -> Result<PolygonId, PolygonError> {
        if self.store.find_by_id(id).is_none() {
            return Err(PolygonError::NotFound);
        }

        self.store
            .delete(id)
            .inspect_err(|e| tracing::error!(%id, error = %e, "failed to delete polygon"))?;

        tracing::info!(%id, "deleted polygon");
        Ok(id)
    }

    pub fn stats(&self) -> PolygonStats {
        let records = self.store.records();
        if records.is_empty() {
            return PolygonStats::empty();
        }

        let total_points: usize = records.iter().map(|p| p.points.len()).sum();
        let average = total_points as f64 / records.len() as f64;

        PolygonStats {
            total_polygons: records.len(),
            average_points: (average * 100.0).round() / 100.0,
            oldest_polygon: records.iter().map(|p| p.created_at).min(),
            newest_polygon: records.iter().map(|p| p.created_at).max(),
        }
    }

    /// Replace the store contents with the sample shapes
    pub fn seed(&mut self) -> Result<Vec<Polygon>, PolygonError> {
        self.store.clear()?;
        tracing::info!("cleared existing polygons");

        let created = seed::sample_polygons()
            .into_iter()
            .map(|sample| self.create(sample))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(count = created.len(), "seeded polygon store");
        Ok(created)
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::point::points_from_pairs;
    use crate::error::StoreError;
    use crate::geometry::PointsError;
    use crate::store::{JsonFileStore, MemoryStore};

    fn service() -> PolygonService<MemoryStore> {
        PolygonService::new(MemoryStore::new())
    }

    fn triangle(name: &str) -> NewPolygon {
        NewPolygon::new(
            name,
            points_from_pairs(&[(100.0, 100.0), (200.0, 100.0), (150.0, 50.0)]),
        )
    }

    #[test]
    fn test_create_valid_polygon() {
        let mut service = service();
        let polygon = service.create(triangle("  Triangle  ")).unwrap();

        assert_eq!(polygon.name, "Triangle");
        assert_eq!(polygon.points.len(), 3);
        assert_eq!(service.get(polygon.id).unwrap(), polygon);
    }

    #[test]
    fn test_create_rejects_invalid_points() {
        let mut service = service();
        let request = NewPolygon::new(
            "Dup",
            points_from_pairs(&[(100.0, 100.0), (100.0, 100.0), (150.0, 50.0)]),
        );

        let err = service.create(request).unwrap_err();
        assert!(matches!(
            err,
            PolygonError::InvalidPoints(PointsError::DuplicateConsecutivePoints)
        ));
        assert!(service.store().is_empty());
    }

    #[test]
    fn test_create_rejects_self_intersecting() {
        let mut service = service();
        let bow_tie = NewPolygon::new(
            "Bow tie",
            points_from_pairs(&[(0.0, 0.0), (100.0, 100.0), (100.0, 0.0), (0.0, 100.0)]),
        );

        let err = service.create(bow_tie).unwrap_err();
        assert_eq!(err.to_string(), "Polygon cannot be self-intersecting");
        assert_eq!(err.status(), 400);
        assert!(service.store().is_empty());
    }

    #[test]
    fn test_create_rejects_duplicate_name() {
        let mut service = service();
        service.create(triangle("Triangle")).unwrap();

        let err = service.create(triangle("Triangle ")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Polygon with name 'Triangle' already exists"
        );
        assert_eq!(err.status(), 409);
        assert_eq!(service.store().len(), 1);
    }

    #[test]
    fn test_create_uses_configured_limits() {
        let limits = ValidationLimits {
            max_coordinate: 150.0,
            ..ValidationLimits::default()
        };
        let mut service = PolygonService::with_limits(MemoryStore::new(), limits);

        let err = service.create(triangle("Triangle")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Point coordinates must be between -1000 and 150"
        );
    }

    #[test]
    fn test_nan_polygon_is_not_persisted_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("polygons.json");
        let mut service = PolygonService::new(JsonFileStore::open(&path).unwrap());
        service.create(triangle("Triangle")).unwrap();

        let nan = NewPolygon::new(
            "NaN",
            points_from_pairs(&[(100.0, 100.0), (f64::NAN, 100.0), (150.0, 50.0)]),
        );
        let err = service.create(nan).unwrap_err();
        assert!(matches!(
            err,
            PolygonError::Store(StoreError::NonFiniteCoordinate { .. })
        ));

        let reopened = PolygonService::new(JsonFileStore::open(&path).unwrap());
        let names: Vec<_> = reopened.list().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Triangle"]);
    }

    #[test]
    fn test_list_newest_first() {
        let mut service = service();
        let first = service.create(triangle("first")).unwrap();
        let second = service.create(triangle("second")).unwrap();

        let ids: Vec<_> = service.list().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    fn test_get_and_delete_missing() {
        let mut service = service();
        let id = PolygonId::new(99).unwrap();

        assert!(matches!(service.get(id), Err(PolygonError::NotFound)));
        let err = service.delete(id).unwrap_err();
        assert_eq!(err.to_string(), "Polygon not found");
        assert_eq!(err.status(), 404);
    }

    #[test]
    fn test_delete() {
        let mut service = service();
        let polygon = service.create(triangle("Triangle")).unwrap();

        assert_eq!(service.delete(polygon.id).unwrap(), polygon.id);
        assert!(matches!(service.get(polygon.id), Err(PolygonError::NotFound)));
    }

    #[test]
    fn test_stats_empty() {
        assert_eq!(service().stats(), PolygonStats::empty());
    }

    #[test]
    fn test_stats_rounds_average() {
        let mut service = service();
        service.create(triangle("a")).unwrap();
        service.create(triangle("b")).unwrap();
        service
            .create(NewPolygon::new(
                "square",
                points_from_pairs(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]),
            ))
            .unwrap();

        let stats = service.stats();
        assert_eq!(stats.total_polygons, 3);
        assert_eq!(stats.average_points, 3.33);
        assert!(stats.oldest_polygon <= stats.newest_polygon);
        assert!(stats.oldest_polygon.is_some());
    }

    #[test]
    fn test_seed_replaces_contents() {
        let mut service = service();
        service.create(triangle("Leftover")).unwrap();

        let created = service.seed().unwrap();
        let names: Vec<_> = created.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Triangle", "Square", "Pentagon", "Hexagon"]);
        assert!(service.store().find_by_name("Leftover").is_none());
        assert_eq!(service.stats().average_points, 4.5);
    }
}
