use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Coordinate, MatchQuery, MaterialId, QueryError};

/// Request to find partners for a job
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(length(min = 1))]
    pub materials: Vec<MaterialId>,
    #[validate(nested)]
    pub address: Coordinate,
    #[serde(default)]
    pub square_meters: Option<u32>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl FindMatchesRequest {
    pub fn to_query(&self) -> Result<MatchQuery, QueryError> {
        MatchQuery::new(self.materials.iter().copied(), self.address)
    }
}
