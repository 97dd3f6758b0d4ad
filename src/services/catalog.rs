use std::collections::HashSet;
use std::path::Path;
use tracing::info;

use crate::models::{Category, Point, PointId};

/// Catalog shipped with the service
const EMBEDDED_CATALOG: &str = include_str!("../../data/points.json");

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate point id {0} in catalog")]
    DuplicateId(PointId),

    #[error("Point {0} has an empty name")]
    EmptyName(PointId),
}

/// The ordered, immutable collection of Wi-Fi points.
///
/// Order matters: it breaks distance ties in proximity searches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    points: Vec<Point>,
}

impl Catalog {
    pub fn new(points: Vec<Point>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(points.len());

        for point in &points {
            if !seen.insert(point.id) {
                return Err(CatalogError::DuplicateId(point.id));
            }
            if point.name.trim().is_empty() {
                return Err(CatalogError::EmptyName(point.id));
            }
        }

        Ok(Self { points })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a JSON array of points. Coordinates are validated while parsing.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let points: Vec<Point> = serde_json::from_str(json)?;
        Self::new(points)
    }

    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Io {
                path: path.display().to_string(),
                source,
            })?;

        let catalog = Self::from_json(&json)?;
        info!("Loaded {} points from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, id: PointId) -> Option<&Point> {
        self.points.iter().find(|point| point.id == id)
    }

    /// Points of one category, in catalog order
    pub fn by_category(&self, category: Category) -> Vec<&Point> {
        self.points
            .iter()
            .filter(|point| point.category == category)
            .collect()
    }
}
