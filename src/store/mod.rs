//! Polygon persistence backends
//!
//! The service only needs ordered record access plus insert/delete, so every
//! backend keeps the full record list in memory. [`JsonFileStore`] writes the
//! list back to disk after each mutation.

pub mod json;

pub use json::JsonFileStore;

use crate::domain::{Point, Polygon, PolygonId};
use crate::error::StoreError;

pub trait PolygonStore {
    /// All records in insertion order
    fn records(&self) -> &[Polygon];

    /// Append a record under the next free id
    fn insert(
        &mut self,
        name: String,
        points: Vec<Point>,
        timestamp: u64,
    ) -> Result<Polygon, StoreError>;

    /// Remove a record, returning whether it existed
    fn delete(&mut self, id: PolygonId) -> Result<bool, StoreError>;

    /// Remove every record
    fn clear(&mut self) -> Result<(), StoreError>;

    fn find_by_id(&self, id: PolygonId) -> Option<&Polygon> {
        self.records().iter().find(|p| p.id == id)
    }

    fn find_by_name(&self, name: &str) -> Option<&Polygon> {
        self.records().iter().find(|p| p.name == name)
    }

    fn len(&self) -> usize {
        self.records().len()
    }

    fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}

/// Non-persistent store; also the in-memory half of [`JsonFileStore`]
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    polygons: Vec<Polygon>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    /// Ids are never reused while higher ids exist
    fn next_id(&self) -> Result<PolygonId, StoreError> {
        match self.polygons.iter().map(|p| p.id).max() {
            Some(max) => max.next().ok_or(StoreError::IdsExhausted),
            None => Ok(PolygonId::FIRST),
        }
    }
}

impl PolygonStore for MemoryStore {
    fn records(&self) -> &[Polygon] {
        &self.polygons
    }

    fn insert(
        &mut self,
        name: String,
        points: Vec<Point>,
        timestamp: u64,
    ) -> Result<Polygon, StoreError> {
        let polygon = Polygon {
            id: self.next_id()?,
            name,
            points,
            created_at: timestamp,
            updated_at: timestamp,
        };
        self.polygons.push(polygon.clone());
        Ok(polygon)
    }

    fn delete(&mut self, id: PolygonId) -> Result<bool, StoreError> {
        let before = self.polygons.len();
        self.polygons.retain(|p| p.id != id);
        Ok(self.polygons.len() != before)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.polygons.clear();
        Ok(())
    }
}
