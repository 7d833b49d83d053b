use glam::Vec2;
use rand::Rng;

/// Rotates a vector counterclockwise by the given angle in radians.
#[inline]
pub fn rotate(v: Vec2, radians: f32) -> Vec2 {
    Vec2::from_angle(radians).rotate(v)
}

/// Rotates a vector counterclockwise by a uniformly random angle.
///
/// The angle is drawn from `[min, max)`, in radians.
///
/// ### Parameters
/// - `v` - Vector to rotate.
/// - `min` - Lower bound of the rotation angle.
/// - `max` - Upper bound of the rotation angle; must be greater than `min`.
/// - `rng` - Random source used for the angle draw.
pub fn random_rotate(v: Vec2, min: f32, max: f32, rng: &mut impl Rng) -> Vec2 {
    rotate(v, rng.random_range(min..max))
}

/// Quartic ease-in-out timing curve.
///
/// Input outside `[0, 1]` is clamped to the corresponding endpoint.
/// Inside the interval the curve is `8t^4` for `t < 0.5` and
/// `1 - (-2t + 2)^4 / 2` otherwise, giving slow-start/slow-end motion.
///
/// Taken from <https://easings.net/#easeInOutQuart>.
pub fn ease_in_out_quart(t: f32) -> f32 {
    if t >= 1.0 {
        return 1.0;
    }
    if t <= 0.0 {
        return 0.0;
    }

    if t < 0.5 {
        8.0 * t * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::f32::consts::{FRAC_PI_3, PI};

    #[test]
    fn easing_hits_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_quart(0.0), 0.0);
        assert_eq!(ease_in_out_quart(1.0), 1.0);
        // The two quartic pieces meet at exactly 0.5.
        assert!((ease_in_out_quart(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn easing_clamps_outside_unit_interval() {
        assert_eq!(ease_in_out_quart(-0.5), 0.0);
        assert_eq!(ease_in_out_quart(1.5), 1.0);
        assert_eq!(ease_in_out_quart(f32::INFINITY), 1.0);
    }

    #[test]
    fn easing_is_monotone_on_unit_interval() {
        let mut prev = 0.0;
        for i in 0..=1000 {
            let t = i as f32 / 1000.0;
            let v = ease_in_out_quart(t);
            assert!(v >= prev, "easing decreased at t = {t}: {v} < {prev}");
            prev = v;
        }
    }

    #[test]
    fn rotate_and_unrotate_is_identity() {
        let v = Vec2::new(3.0, -4.0);
        for angle in [0.1, FRAC_PI_3, PI, 5.5] {
            let back = rotate(rotate(v, angle), -angle);
            assert!(
                (back - v).length() < 1e-4,
                "roundtrip mismatch for angle {angle}: {back:?}"
            );
        }
    }

    #[test]
    fn rotate_preserves_length() {
        let v = Vec2::new(3.0, 4.0);
        let r = rotate(v, 1.234);
        assert!((r.length() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn random_rotate_stays_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let v = Vec2::new(1.0, 0.0);
        for _ in 0..1000 {
            let r = random_rotate(v, 0.2, 0.3, &mut rng);
            let angle = r.y.atan2(r.x);
            assert!(
                (0.2 - 1e-4..0.3 + 1e-4).contains(&angle),
                "rotation angle {angle} outside [0.2, 0.3)"
            );
        }
    }

    #[test]
    fn normalized_nonzero_vector_has_unit_length() {
        let v = Vec2::new(0.3, -7.2).normalize();
        assert!((v.length() - 1.0).abs() < 1e-5);
    }
}
