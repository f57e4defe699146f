//! Tilt-to-position mapping
//!
//! Screen X follows the sensor's Y axis and screen Y follows the sensor's X
//! axis, both subtracted: tilting right raises `sample.y`, which moves the
//! player right for the intended (landscape-held) device orientation.

use glam::Vec2;

use super::motion::OrientationSample;
use crate::Bounds;

/// Which axes the player may move along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisLock {
    /// Free 2D movement
    Free,
    /// Y fixed on a horizontal track, only X moves
    TrackY,
}

/// Compute the next top-left position for a player of `size`
pub fn apply_tilt(
    pos: Vec2,
    sample: OrientationSample,
    sensitivity: f32,
    bounds: &Bounds,
    size: f32,
    lock: AxisLock,
) -> Vec2 {
    let raw = Vec2::new(
        pos.x - sample.y * sensitivity,
        pos.y - sample.x * sensitivity,
    );
    let max = bounds.max_anchor(size);

    match lock {
        AxisLock::Free => raw.clamp(Vec2::ZERO, max),
        AxisLock::TrackY => Vec2::new(raw.x.clamp(0.0, max.x), pos.y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BOUNDS: Bounds = Bounds {
        width: 400.0,
        height: 800.0,
    };

    #[test]
    fn test_cross_axis_and_sign() {
        let start = Vec2::new(200.0, 300.0);
        let next = apply_tilt(
            start,
            OrientationSample::new(0.0, 1.0, 0.0),
            10.0,
            &BOUNDS,
            50.0,
            AxisLock::Free,
        );
        assert_eq!(next, Vec2::new(190.0, 300.0));

        let next = apply_tilt(
            start,
            OrientationSample::new(2.0, 0.0, 0.0),
            10.0,
            &BOUNDS,
            50.0,
            AxisLock::Free,
        );
        assert_eq!(next, Vec2::new(200.0, 280.0));
    }

    #[test]
    fn test_z_axis_ignored() {
        let start = Vec2::new(100.0, 100.0);
        let next = apply_tilt(
            start,
            OrientationSample::new(0.0, 0.0, 9.0),
            10.0,
            &BOUNDS,
            50.0,
            AxisLock::Free,
        );
        assert_eq!(next, start);
    }

    #[test]
    fn test_clamps_at_edges() {
        let hard_right = OrientationSample::new(-100.0, -100.0, 0.0);
        let next = apply_tilt(Vec2::new(300.0, 700.0), hard_right, 10.0, &BOUNDS, 50.0, AxisLock::Free);
        assert_eq!(next, Vec2::new(350.0, 750.0));

        let hard_left = OrientationSample::new(100.0, 100.0, 0.0);
        let next = apply_tilt(Vec2::new(10.0, 10.0), hard_left, 10.0, &BOUNDS, 50.0, AxisLock::Free);
        assert_eq!(next, Vec2::ZERO);
    }

    #[test]
    fn test_track_keeps_y() {
        let start = Vec2::new(145.0, 640.0);
        let next = apply_tilt(
            start,
            OrientationSample::new(50.0, -3.0, 0.0),
            10.0,
            &BOUNDS,
            110.0,
            AxisLock::TrackY,
        );
        assert_eq!(next, Vec2::new(175.0, 640.0));
    }

    proptest! {
        #[test]
        fn prop_always_within_bounds(
            px in 0.0f32..=350.0,
            py in 0.0f32..=750.0,
            sx in -50.0f32..50.0,
            sy in -50.0f32..50.0,
        ) {
            let next = apply_tilt(
                Vec2::new(px, py),
                OrientationSample::new(sx, sy, 0.0),
                10.0,
                &BOUNDS,
                50.0,
                AxisLock::Free,
            );
            prop_assert!(next.x >= 0.0 && next.x <= 350.0);
            prop_assert!(next.y >= 0.0 && next.y <= 750.0);
        }

        #[test]
        fn prop_track_within_width(px in 0.0f32..=290.0, sy in -50.0f32..50.0) {
            let next = apply_tilt(
                Vec2::new(px, 640.0),
                OrientationSample::new(0.0, sy, 0.0),
                10.0,
                &BOUNDS,
                110.0,
                AxisLock::TrackY,
            );
            prop_assert!(next.x >= 0.0 && next.x <= 290.0);
            prop_assert_eq!(next.y, 640.0);
        }
    }
}
