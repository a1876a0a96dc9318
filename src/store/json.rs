use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::{MemoryStore, PolygonStore};
use crate::domain::{Point, Polygon, PolygonId};
use crate::error::StoreError;

/// Store backed by a JSON array on disk
///
/// The whole file is read on open and rewritten after every mutation.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Open a store file. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let polygons: Vec<Polygon> = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => Vec::new(),
            Ok(contents) => serde_json::from_str(&contents).map_err(|source| {
                StoreError::Corrupt {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        tracing::debug!(path = %path.display(), count = polygons.len(), "opened polygon store");

        Ok(Self {
            path,
            inner: MemoryStore::from_records(polygons),
        })
    }

    fn flush(&self) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(self.inner.records()).map_err(|source| {
            StoreError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, json).map_err(io_err)?;

        tracing::debug!(
            path = %self.path.display(),
            count = self.inner.len(),
            "wrote polygon store"
        );
        Ok(())
    }
}

impl PolygonStore for JsonFileStore {
    fn records(&self) -> &[Polygon] {
        self.inner.records()
    }

    fn insert(
        &mut self,
        name: String,
        points: Vec<Point>,
        timestamp: u64,
    ) -> Result<Polygon, StoreError> {
        if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(StoreError::NonFiniteCoordinate { name });
        }

        let polygon = self.inner.insert(name, points, timestamp)?;
        if let Err(e) = self.flush() {
            self.inner.delete(polygon.id)?;
            return Err(e);
        }
        Ok(polygon)
    }

    fn delete(&mut self, id: PolygonId) -> Result<bool, StoreError> {
        let removed = self.inner.delete(id)?;
        if removed {
            self.flush()?;
        }
        Ok(removed)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.inner.clear()?;
        self.flush()
    }
}
