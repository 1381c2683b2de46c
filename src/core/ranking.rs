use std::cmp::Ordering;

use crate::models::MatchedPartner;

/// Ordering between two qualifying partners.
///
/// Rating descending, then distance ascending, then partner id ascending.
/// Distances use IEEE total ordering so the comparison is total.
#[inline]
pub fn rank_order(a: &MatchedPartner, b: &MatchedPartner) -> Ordering {
    b.partner
        .rating
        .cmp(&a.partner.rating)
        .then_with(|| a.distance_km.total_cmp(&b.distance_km))
        .then_with(|| a.partner.id.cmp(&b.partner.id))
}

/// Sort matches into result order and keep at most `limit` of them
pub fn rank_and_truncate(matches: &mut Vec<MatchedPartner>, limit: usize) {
    matches.sort_by(rank_order);
    matches.truncate(limit);
}
