//! 2D vector helpers
//!
//! Positions and velocities are `glam::DVec2`. Construction uses glam's named
//! constructors (`DVec2::new`, `DVec2::ZERO`) and copies are plain `Copy`.
//! This trait adds the few operations glam does not provide with the exact
//! semantics the simulation needs: zero vectors are always left untouched.

use glam::DVec2;

pub trait VectorExt: Sized {
    /// Unit vector in the same direction, or `self` when the length is zero
    fn normalized(self) -> Self;

    /// Scale so the length lies within `[min, max]`; zero stays zero
    fn clamped_length(self, min: f64, max: f64) -> Self;

    /// Rotate by `angle` radians with the standard rotation matrix.
    /// With y pointing down the screen, positive angles turn clockwise.
    fn rotated(self, angle: f64) -> Self;

    /// Unit vector pointing from `self` to `target` (zero if they coincide)
    fn direction_to(self, target: Self) -> Self;
}

impl VectorExt for DVec2 {
    #[inline]
    fn normalized(self) -> Self {
        let len = self.length();
        if len == 0.0 { self } else { self * (1.0 / len) }
    }

    #[inline]
    fn clamped_length(self, min: f64, max: f64) -> Self {
        let len = self.length();
        if len == 0.0 {
            self
        } else if len < min {
            self * (min / len)
        } else if len > max {
            self * (max / len)
        } else {
            self
        }
    }

    #[inline]
    fn rotated(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        DVec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    #[inline]
    fn direction_to(self, target: Self) -> Self {
        (target - self).normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_zero_vector_is_untouched() {
        assert_eq!(DVec2::ZERO.normalized(), DVec2::ZERO);
        assert_eq!(DVec2::ZERO.clamped_length(1.0, 4.0), DVec2::ZERO);
        assert_eq!(DVec2::ZERO.direction_to(DVec2::ZERO), DVec2::ZERO);
    }

    #[test]
    fn test_clamp_scales_both_ways() {
        let long = DVec2::new(4.0, 4.0).clamped_length(0.0, 4.0);
        assert!((long.length() - 4.0).abs() < 1e-9);
        let short = DVec2::new(0.5, 0.0).clamped_length(2.0, 4.0);
        assert_eq!(short, DVec2::new(2.0, 0.0));
        let inside = DVec2::new(3.0, 0.0).clamped_length(2.0, 4.0);
        assert_eq!(inside, DVec2::new(3.0, 0.0));
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let v = DVec2::new(1.0, 0.0).rotated(FRAC_PI_2);
        assert!(v.x.abs() < 1e-12);
        assert!((v.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_direction_to() {
        let d = DVec2::new(100.0, 100.0).direction_to(DVec2::new(108.0, 100.0));
        assert_eq!(d, DVec2::new(1.0, 0.0));
    }

    proptest! {
        #[test]
        fn normalized_is_unit_or_zero(x in -1e6f64..1e6, y in -1e6f64..1e6) {
            let n = DVec2::new(x, y).normalized();
            prop_assert!(!n.x.is_nan() && !n.y.is_nan());
            let len = n.length();
            prop_assert!(len == 0.0 || (len - 1.0).abs() < 1e-9);
        }

        #[test]
        fn clamp_respects_bounds(x in -1e3f64..1e3, y in -1e3f64..1e3, max in 0.1f64..50.0) {
            let v = DVec2::new(x, y);
            let c = v.clamped_length(0.0, max);
            prop_assert!(c.length() <= max + 1e-9);
            if v.length() <= max {
                prop_assert_eq!(c, v);
            }
        }

        #[test]
        fn rotation_preserves_length(x in -1e3f64..1e3, y in -1e3f64..1e3, a in -10.0f64..10.0) {
            let v = DVec2::new(x, y);
            prop_assert!((v.rotated(a).length() - v.length()).abs() < 1e-6);
        }
    }
}
