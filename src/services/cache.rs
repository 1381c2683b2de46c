use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use crate::models::{Coordinate, MaterialId, Partner, PartnerId};
use crate::services::catalog::{CatalogError, PartnerCatalog};

/// Catalog decorator caching partner lookups by id
///
/// Only successful `get_by_id` results are cached; a missing partner is asked
/// for again on the next lookup. Candidate scans always reach the inner catalog.
pub struct CachedCatalog {
    inner: Arc<dyn PartnerCatalog>,
    partners: moka::future::Cache<PartnerId, Partner>,
}

impl CachedCatalog {
    pub fn new(inner: Arc<dyn PartnerCatalog>, capacity: u64, ttl_secs: u64) -> Self {
        let partners = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner, partners }
    }

    /// Drop a cached partner so the next lookup reads through
    pub async fn invalidate(&self, id: PartnerId) {
        self.partners.invalidate(&id).await;
    }
}

#[async_trait]
impl PartnerCatalog for CachedCatalog {
    async fn find_candidates(
        &self,
        material_ids: &BTreeSet<MaterialId>,
        origin: Coordinate,
    ) -> Result<Vec<Partner>, CatalogError> {
        self.inner.find_candidates(material_ids, origin).await
    }

    async fn get_by_id(&self, id: PartnerId) -> Result<Partner, CatalogError> {
        if let Some(partner) = self.partners.get(&id).await {
            tracing::trace!("Partner cache hit: {}", id);
            return Ok(partner);
        }

        let partner = self.inner.get_by_id(id).await?;
        self.partners.insert(id, partner.clone()).await;
        tracing::trace!("Partner cache fill: {}", id);

        Ok(partner)
    }

    async fn health_check(&self) -> Result<bool, CatalogError> {
        self.inner.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts lookups so tests can tell cache hits from read-throughs
    struct CountingCatalog {
        lookups: AtomicUsize,
    }

    #[async_trait]
    impl PartnerCatalog for CountingCatalog {
        async fn find_candidates(
            &self,
            _material_ids: &BTreeSet<MaterialId>,
            _origin: Coordinate,
        ) -> Result<Vec<Partner>, CatalogError> {
            Ok(vec![])
        }

        async fn get_by_id(&self, id: PartnerId) -> Result<Partner, CatalogError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if id != 1 {
                return Err(CatalogError::NotFound(id));
            }
            Ok(Partner {
                id,
                categories: vec![],
                materials: vec![],
                location: Coordinate::new(0.0, 0.0).unwrap(),
                service_radius_km: 10.0,
                rating: 1,
            })
        }
    }

    #[tokio::test]
    async fn test_lookup_is_cached() {
        let inner = Arc::new(CountingCatalog {
            lookups: AtomicUsize::new(0),
        });
        let cached = CachedCatalog::new(inner.clone(), 100, 60);

        assert_eq!(cached.get_by_id(1).await.unwrap().id, 1);
        assert_eq!(cached.get_by_id(1).await.unwrap().id, 1);
        assert_eq!(inner.lookups.load(Ordering::SeqCst), 1);

        cached.invalidate(1).await;
        cached.get_by_id(1).await.unwrap();
        assert_eq!(inner.lookups.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_not_found_is_not_cached() {
        let inner = Arc::new(CountingCatalog {
            lookups: AtomicUsize::new(0),
        });
        let cached = CachedCatalog::new(inner.clone(), 100, 60);

        assert!(matches!(cached.get_by_id(2).await, Err(CatalogError::NotFound(2))));
        assert!(matches!(cached.get_by_id(2).await, Err(CatalogError::NotFound(2))));
        assert_eq!(inner.lookups.load(Ordering::SeqCst), 2);
    }
}
