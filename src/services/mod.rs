// Service exports
pub mod cache;
pub mod catalog;
pub mod postgres;

pub use cache::CachedCatalog;
pub use catalog::{CatalogError, InMemoryCatalog, PartnerCatalog};
pub use postgres::PostgresCatalog;
