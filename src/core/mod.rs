// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod ranking;

pub use distance::{calculate_bounding_box, haversine_distance, is_within_bounding_box};
pub use filters::{covers_materials, distance_within_radius};
pub use matcher::{rank_candidates, MatchError, MatchResult, Matcher, MAX_RESULT_LIMIT};
pub use ranking::{rank_and_truncate, rank_order};
