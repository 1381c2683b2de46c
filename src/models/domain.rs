use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use validator::Validate;

pub type PartnerId = i64;
pub type MaterialId = i64;
pub type CategoryId = i64;

/// Errors raised while building a [`MatchQuery`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("at least one material is required")]
    EmptyMaterials,

    #[error("coordinate out of range: lat={latitude}, long={longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
}

/// A point on the globe in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct Coordinate {
    #[serde(rename = "lat")]
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[serde(rename = "long")]
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, QueryError> {
        let coordinate = Self { latitude, longitude };
        if coordinate.is_valid() {
            Ok(coordinate)
        } else {
            Err(QueryError::InvalidCoordinate { latitude, longitude })
        }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Great-circle distance to `other` in kilometers
    #[inline]
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        crate::core::distance::haversine_distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

/// A material a partner is experienced with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub id: MaterialId,
    pub description: String,
}

/// A display-only classification of a partner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub description: String,
}

/// Partner record as held by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: PartnerId,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(rename = "address")]
    pub location: Coordinate,
    #[serde(rename = "radius")]
    pub service_radius_km: f64,
    pub rating: i32,
}

impl Partner {
    pub fn material_ids(&self) -> BTreeSet<MaterialId> {
        self.materials.iter().map(|m| m.id).collect()
    }
}

/// Validated matching request handed to the engine
#[derive(Debug, Clone, PartialEq)]
pub struct MatchQuery {
    required_materials: BTreeSet<MaterialId>,
    origin: Coordinate,
}

impl MatchQuery {
    /// Build a query, rejecting an empty material set or an out-of-range origin.
    /// Duplicate material ids collapse into one requirement.
    pub fn new<I>(materials: I, origin: Coordinate) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = MaterialId>,
    {
        let required_materials: BTreeSet<MaterialId> = materials.into_iter().collect();
        if required_materials.is_empty() {
            return Err(QueryError::EmptyMaterials);
        }
        let origin = Coordinate::new(origin.latitude, origin.longitude)?;

        Ok(Self {
            required_materials,
            origin,
        })
    }

    pub fn required_materials(&self) -> &BTreeSet<MaterialId> {
        &self.required_materials
    }

    pub fn origin(&self) -> Coordinate {
        self.origin
    }
}

/// Geospatial bounding box in degrees.
///
/// Longitudes may extend past ±180 when the box crosses the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// A partner that passed both filters, with its distance to the query origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedPartner {
    #[serde(flatten)]
    pub partner: Partner,
    pub distance_km: f64,
}
