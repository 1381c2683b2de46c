use std::collections::BTreeSet;

use crate::models::{Coordinate, MaterialId, Partner};

/// Check that a partner can supply every required material
///
/// Partial coverage never qualifies. An empty requirement set is never produced
/// by [`crate::models::MatchQuery`], so a partner without materials never passes.
#[inline]
pub fn covers_materials(partner: &Partner, required: &BTreeSet<MaterialId>) -> bool {
    required
        .iter()
        .all(|id| partner.materials.iter().any(|m| m.id == *id))
}

/// Distance from the partner to `origin` when the origin lies strictly inside
/// the partner's service radius
#[inline]
pub fn distance_within_radius(partner: &Partner, origin: &Coordinate) -> Option<f64> {
    let distance_km = partner.location.distance_to(origin);
    (distance_km < partner.service_radius_km).then_some(distance_km)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Material;

    fn partner(material_ids: &[MaterialId], radius_km: f64) -> Partner {
        Partner {
            id: 1,
            categories: vec![],
            materials: material_ids
                .iter()
                .map(|id| Material {
                    id: *id,
                    description: format!("material {}", id),
                })
                .collect(),
            location: Coordinate::new(1.1, 1.1).unwrap(),
            service_radius_km: radius_km,
            rating: 1,
        }
    }

    fn required(ids: &[MaterialId]) -> BTreeSet<MaterialId> {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_full_coverage() {
        let p = partner(&[1, 2, 3], 10.0);
        assert!(covers_materials(&p, &required(&[1, 3])));
        assert!(covers_materials(&p, &required(&[1, 2, 3])));
    }

    #[test]
    fn test_partial_coverage_rejected() {
        let p = partner(&[1, 2], 10.0);
        assert!(!covers_materials(&p, &required(&[1, 2, 3])));
    }

    #[test]
    fn test_partner_without_materials() {
        let p = partner(&[], 10.0);
        assert!(!covers_materials(&p, &required(&[1])));
    }

    #[test]
    fn test_radius_is_exclusive() {
        let origin = Coordinate::new(1.2, 1.2).unwrap();
        let exact = partner(&[1], 0.0).location.distance_to(&origin);

        assert_eq!(distance_within_radius(&partner(&[1], exact), &origin), None);
        assert_eq!(
            distance_within_radius(&partner(&[1], exact + 1e-9), &origin),
            Some(exact)
        );
    }
}
