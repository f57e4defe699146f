//! Circle-vs-circle collision
//!
//! Every entity is a square sprite drawn as a circle. Two entities touch when
//! the distance between their centers is strictly less than the SUM OF RADII.

use glam::Vec2;

use super::state::Entity;

/// Radius-sum overlap test on explicit centers/radii
#[inline]
pub fn circles_overlap(center_a: Vec2, radius_a: f32, center_b: Vec2, radius_b: f32) -> bool {
    center_a.distance(center_b) < radius_a + radius_b
}

/// Overlap test between two anchored entities
#[inline]
pub fn entities_overlap(a: &Entity, b: &Entity) -> bool {
    circles_overlap(a.center(), a.radius(), b.center(), b.radius())
}

/// Indices of every target the player currently overlaps, in target order.
///
/// An empty target set yields an empty result.
pub fn hits(player: &Entity, targets: &[Entity]) -> Vec<usize> {
    targets
        .iter()
        .enumerate()
        .filter(|(_, target)| entities_overlap(player, target))
        .map(|(i, _)| i)
        .collect()
}

/// Whether any target overlaps the player
pub fn any_hit(player: &Entity, targets: &[Entity]) -> bool {
    targets.iter().any(|target| entities_overlap(player, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_radius_sum_boundary() {
        // Radii 25 + 15 = 40
        let a = Vec2::new(0.0, 0.0);
        assert!(!circles_overlap(a, 25.0, Vec2::new(40.0, 0.0), 15.0));
        assert!(circles_overlap(a, 25.0, Vec2::new(39.99, 0.0), 15.0));
    }

    #[test]
    fn test_diameter_sum_range_is_not_a_hit() {
        // Inside the diameter sum (80) but outside the radius sum (40)
        let player = Entity::new(Vec2::new(0.0, 0.0), 50.0);
        let orb = Entity::new(Vec2::new(60.0, 10.0), 30.0);
        assert!(!entities_overlap(&player, &orb));
    }

    #[test]
    fn test_centers_use_anchor_plus_half_size() {
        let player = Entity::new(Vec2::new(100.0, 100.0), 50.0);
        // Orb centered exactly on the player's center
        let orb = Entity::new(Vec2::new(110.0, 110.0), 30.0);
        assert_eq!(player.center(), orb.center());
        assert!(entities_overlap(&player, &orb));
    }

    #[test]
    fn test_empty_target_set() {
        let player = Entity::new(Vec2::ZERO, 50.0);
        assert!(hits(&player, &[]).is_empty());
        assert!(!any_hit(&player, &[]));
    }

    #[test]
    fn test_hits_reports_indices_in_order() {
        let player = Entity::new(Vec2::new(100.0, 100.0), 50.0);
        let targets = [
            Entity::new(Vec2::new(120.0, 110.0), 30.0),
            Entity::new(Vec2::new(300.0, 300.0), 30.0),
            Entity::new(Vec2::new(80.0, 90.0), 30.0),
        ];
        assert_eq!(hits(&player, &targets), vec![0, 2]);
        assert!(any_hit(&player, &targets));
    }

    proptest! {
        #[test]
        fn prop_matches_distance_formula(
            cx in -500.0f32..500.0,
            cy in -500.0f32..500.0,
            tx in -500.0f32..500.0,
            ty in -500.0f32..500.0,
            rp in 1.0f32..100.0,
            rt in 1.0f32..100.0,
        ) {
            let (dx, dy) = (cx - tx, cy - ty);
            let expected = (dx * dx + dy * dy).sqrt() < rp + rt;
            prop_assert_eq!(
                circles_overlap(Vec2::new(cx, cy), rp, Vec2::new(tx, ty), rt),
                expected
            );
        }
    }
}
