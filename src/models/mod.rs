// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BoundingBox, Category, CategoryId, Coordinate, MatchQuery, MatchedPartner, Material, MaterialId, Partner,
    PartnerId, QueryError,
};
pub use requests::FindMatchesRequest;
pub use responses::{ErrorResponse, FindMatchesResponse, HealthResponse};
