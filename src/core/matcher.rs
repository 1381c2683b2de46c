use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::core::{
    filters::{covers_materials, distance_within_radius},
    ranking::rank_and_truncate,
};
use crate::models::{MatchQuery, MatchedPartner, Partner};
use crate::services::catalog::{CatalogError, PartnerCatalog};

/// Upper bound on partners returned for one query
pub const MAX_RESULT_LIMIT: usize = 10;

/// Errors surfaced by the matcher
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Catalog backend failure: {0}")]
    Backend(#[from] CatalogError),
}

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<MatchedPartner>,
    /// Partners that passed both filters, counted before truncation
    pub total_matches: usize,
}

/// Run the filter-then-rank pipeline over an already fetched candidate set
///
/// # Pipeline Stages
/// 1. Material coverage
/// 2. Service radius (strict)
/// 3. Rating, distance and id ordering
/// 4. Truncation to `limit`
pub fn rank_candidates(query: &MatchQuery, candidates: Vec<Partner>, limit: usize) -> MatchResult {
    let origin = query.origin();

    let mut matches: Vec<MatchedPartner> = candidates
        .into_iter()
        .filter(|partner| covers_materials(partner, query.required_materials()))
        .filter_map(|partner| {
            distance_within_radius(&partner, &origin)
                .map(|distance_km| MatchedPartner { partner, distance_km })
        })
        .collect();
    let total_matches = matches.len();

    rank_and_truncate(&mut matches, limit);

    MatchResult {
        matches,
        total_matches,
    }
}

/// Matching orchestrator: fetches candidates from the injected catalog and ranks them
///
/// Holds no mutable state, so one instance is shared by every worker.
#[derive(Clone)]
pub struct Matcher {
    catalog: Arc<dyn PartnerCatalog>,
    result_limit: usize,
}

impl Matcher {
    pub fn new(catalog: Arc<dyn PartnerCatalog>) -> Self {
        Self {
            catalog,
            result_limit: MAX_RESULT_LIMIT,
        }
    }

    /// Set the result limit, clamped to `1..=MAX_RESULT_LIMIT`
    pub fn with_result_limit(mut self, limit: usize) -> Self {
        self.result_limit = limit.clamp(1, MAX_RESULT_LIMIT);
        self
    }

    pub fn result_limit(&self) -> usize {
        self.result_limit
    }

    /// Find the best partners for a validated query
    ///
    /// An empty result is a normal outcome. Errors only come from the catalog
    /// and are passed up without retry.
    pub async fn find_matches(&self, query: &MatchQuery) -> Result<MatchResult, MatchError> {
        let candidates = self
            .catalog
            .find_candidates(query.required_materials(), query.origin())
            .await?;

        tracing::debug!("Ranking {} candidates", candidates.len());

        Ok(rank_candidates(query, candidates, self.result_limit))
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("result_limit", &self.result_limit)
            .finish_non_exhaustive()
    }
}
