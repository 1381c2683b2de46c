//! Partner Match - finds flooring partners able to serve a customer job
//!
//! A partner qualifies when it supplies every requested material and its service
//! radius covers the customer's address. Qualifying partners are ranked by rating,
//! then distance, then id, and the best ten are returned.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{Matcher, MatchError, MatchResult, distance::haversine_distance};
pub use models::{Coordinate, FindMatchesRequest, FindMatchesResponse, MatchQuery, MatchedPartner, Partner};
pub use services::{CachedCatalog, CatalogError, InMemoryCatalog, PartnerCatalog, PostgresCatalog};
