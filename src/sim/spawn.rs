//! Target placement
//!
//! Random draws subtract the entity's own size from the upper bound so a
//! spawned sprite is always fully on screen.

use glam::Vec2;
use rand::Rng;

use super::state::Entity;
use crate::Bounds;

/// Uniform top-left anchor with the whole square inside `bounds`
pub fn random_anchor<R: Rng + ?Sized>(rng: &mut R, bounds: &Bounds, size: f32) -> Vec2 {
    let max = bounds.max_anchor(size);
    Vec2::new(rng.random_range(0.0..=max.x), rng.random_range(0.0..=max.y))
}

/// Orb at a fresh random position
pub fn spawn_orb<R: Rng + ?Sized>(rng: &mut R, bounds: &Bounds, size: f32) -> Entity {
    Entity::new(random_anchor(rng, bounds, size), size)
}

/// Asteroid entering from just above the top edge at a random column
pub fn spawn_asteroid<R: Rng + ?Sized>(rng: &mut R, bounds: &Bounds, size: f32) -> Entity {
    let max_x = bounds.max_anchor(size).x;
    Entity::new(Vec2::new(rng.random_range(0.0..=max_x), -size), size)
}

/// Move every asteroid down by `step` and drop those past the bottom edge.
///
/// Returns how many were discarded.
pub fn advance_asteroids(asteroids: &mut Vec<Entity>, step: f32, height: f32) -> usize {
    let before = asteroids.len();
    for asteroid in asteroids.iter_mut() {
        asteroid.pos.y += step;
    }
    asteroids.retain(|a| a.pos.y < height);
    before - asteroids.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_orb_spawns_fully_inside() {
        let bounds = Bounds::new(400.0, 800.0);
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..10_000 {
            let orb = spawn_orb(&mut rng, &bounds, 30.0);
            assert!(orb.pos.x >= 0.0 && orb.pos.x <= 370.0, "x = {}", orb.pos.x);
            assert!(orb.pos.y >= 0.0 && orb.pos.y <= 770.0, "y = {}", orb.pos.y);
        }
    }

    #[test]
    fn test_spawn_when_entity_fills_axis() {
        let bounds = Bounds::new(50.0, 300.0);
        let mut rng = Pcg32::seed_from_u64(1);
        let orb = spawn_orb(&mut rng, &bounds, 50.0);
        assert_eq!(orb.pos.x, 0.0);
    }

    #[test]
    fn test_asteroid_enters_above_screen() {
        let bounds = Bounds::new(400.0, 800.0);
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1_000 {
            let asteroid = spawn_asteroid(&mut rng, &bounds, 50.0);
            assert_eq!(asteroid.pos.y, -50.0);
            assert!(asteroid.pos.x >= 0.0 && asteroid.pos.x <= 350.0);
        }
    }

    #[test]
    fn test_advance_discards_past_bottom() {
        let mut field = vec![
            Entity::new(Vec2::new(10.0, -50.0), 50.0),
            Entity::new(Vec2::new(10.0, 794.0), 50.0),
            Entity::new(Vec2::new(10.0, 796.0), 50.0),
        ];
        let dropped = advance_asteroids(&mut field, 5.0, 800.0);
        assert_eq!(dropped, 1);
        assert_eq!(field.len(), 2);
        assert_eq!(field[0].pos.y, -45.0);
        assert_eq!(field[1].pos.y, 799.0);
    }

    #[test]
    fn test_advance_empty_field() {
        let mut field = Vec::new();
        assert_eq!(advance_asteroids(&mut field, 5.0, 800.0), 0);
    }
}
