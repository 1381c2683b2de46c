use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use thiserror::Error;

use crate::core::distance::{calculate_bounding_box, is_within_bounding_box};
use crate::core::filters::covers_materials;
use crate::models::{Coordinate, MaterialId, Partner, PartnerId};

/// Extra room added to the bounding-box pre-filter so rounding at the box edge
/// can never drop a partner the radius filter would accept
const PREFILTER_MARGIN_KM: f64 = 1.0;

/// Errors that can occur when reading from a partner catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Partner not found: {0}")]
    NotFound(PartnerId),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Failed to load seed data: {0}")]
    Seed(String),

    #[error("Invalid partner record {id}: {reason}")]
    InvalidRecord { id: PartnerId, reason: String },
}

/// Read access to partner records
///
/// Implementations may pre-filter in `find_candidates` (coverage, location) but the
/// matcher re-applies every filter, so returning extra partners is always safe.
/// Every partner returned must carry its full materials and categories.
#[async_trait]
pub trait PartnerCatalog: Send + Sync {
    /// Partners plausibly able to serve a job needing `material_ids` at `origin`
    async fn find_candidates(
        &self,
        material_ids: &BTreeSet<MaterialId>,
        origin: Coordinate,
    ) -> Result<Vec<Partner>, CatalogError>;

    /// Fetch a single partner, failing with [`CatalogError::NotFound`] if absent
    async fn get_by_id(&self, id: PartnerId) -> Result<Partner, CatalogError>;

    async fn health_check(&self) -> Result<bool, CatalogError> {
        Ok(true)
    }
}

/// Catalog held entirely in memory, keyed by partner id
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    partners: BTreeMap<PartnerId, Partner>,
    max_radius_km: f64,
}

impl InMemoryCatalog {
    pub fn new(partners: Vec<Partner>) -> Result<Self, CatalogError> {
        let mut by_id = BTreeMap::new();
        let mut max_radius_km: f64 = 0.0;

        for partner in partners {
            validate_record(&partner)?;
            max_radius_km = max_radius_km.max(partner.service_radius_km);
            let id = partner.id;
            if by_id.insert(id, partner).is_some() {
                tracing::warn!("Duplicate partner id {} in catalog, keeping the last record", id);
            }
        }

        Ok(Self {
            partners: by_id,
            max_radius_km,
        })
    }

    /// Load partners from a JSON array on disk
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Seed(format!("{}: {}", path.display(), e)))?;
        let partners: Vec<Partner> = serde_json::from_str(&raw)
            .map_err(|e| CatalogError::Seed(format!("{}: {}", path.display(), e)))?;

        tracing::info!("Loaded {} partners from {}", partners.len(), path.display());
        Self::new(partners)
    }

    pub fn len(&self) -> usize {
        self.partners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }
}

fn validate_record(partner: &Partner) -> Result<(), CatalogError> {
    if !partner.location.is_valid() {
        return Err(CatalogError::InvalidRecord {
            id: partner.id,
            reason: "address out of range".to_string(),
        });
    }
    if partner.service_radius_km.is_nan() || partner.service_radius_km <= 0.0 {
        return Err(CatalogError::InvalidRecord {
            id: partner.id,
            reason: format!("radius must be positive, got {}", partner.service_radius_km),
        });
    }
    Ok(())
}

#[async_trait]
impl PartnerCatalog for InMemoryCatalog {
    async fn find_candidates(
        &self,
        material_ids: &BTreeSet<MaterialId>,
        origin: Coordinate,
    ) -> Result<Vec<Partner>, CatalogError> {
        // No partner can reach the origin from outside this box
        let bbox = calculate_bounding_box(origin, self.max_radius_km + PREFILTER_MARGIN_KM);

        Ok(self
            .partners
            .values()
            .filter(|p| is_within_bounding_box(p.location, &bbox))
            .filter(|p| covers_materials(p, material_ids))
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: PartnerId) -> Result<Partner, CatalogError> {
        self.partners
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }
}
