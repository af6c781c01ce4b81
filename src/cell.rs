//! Cell noise: one random value per unit lattice cell
//!
//! **NOTE: the `cell` feature must be enabled to use this code**
use crate::{
    utils::{hash_to_unit, lattice_cell, lattice_hash, lattice_hash3},
    NoiseGenerator, RgbD, Vec3d,
};

/// Piecewise constant noise. Every point of a unit cell `[i, i+1) x [j, j+1) x [k, k+1)` gets the
/// same value in `[0, 1)`. The per cell hash is the same one [`crate::voronoi::Voronoi`] uses to
/// place its feature points.
///
/// The output is unsigned. Use [`crate::signed_noise`] to feed it into a combinator that expects
/// a signed basis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellNoise;

impl NoiseGenerator for CellNoise {
    fn evaluate(&self, p: Vec3d) -> f64 {
        let (ix, iy, iz) = lattice_cell(p);
        hash_to_unit(lattice_hash(ix, iy, iz))
    }
}

/// A random color per unit cell, every channel in `[0, 1)`. The red channel equals
/// [`CellNoise`] at the same point. Mostly useful to color voronoi cells by their feature point.
#[must_use]
pub fn cell_noise_color(p: Vec3d) -> RgbD {
    let (ix, iy, iz) = lattice_cell(p);
    let [r, g, b] = lattice_hash3(ix, iy, iz);
    RgbD::new(hash_to_unit(r), hash_to_unit(g), hash_to_unit(b))
}

#[cfg(test)]
mod tests {
    use super::{cell_noise_color, CellNoise};
    use crate::{
        test_utils::{self, assert_eq_approx_abs, assert_in_range, SamplerExt},
        NoiseGenerator, Vec3d,
    };

    #[test]
    fn constant_inside_a_cell() {
        let mut rd = fastrand::Rng::with_seed(1);
        for _ in 0..1000 {
            let cell = rd.point(100.0).floor();
            let reference = CellNoise.evaluate(cell);
            for _ in 0..8 {
                let p = cell + rd.vec3d() * 0.999;
                assert_eq!(CellNoise.evaluate(p), reference);
            }
        }
    }

    #[test]
    fn range_and_mean() {
        let mean = test_utils::test_noise_range(&CellNoise, 0.0, 1.0, 100_000);
        assert_eq_approx_abs!(mean, 0.5, 0.02);
    }

    #[test]
    fn neighbours_differ() {
        let mut distinct = 0;
        for x in 0..100 {
            let a = CellNoise.evaluate(Vec3d::new(f64::from(x) + 0.5, 0.5, 0.5));
            let b = CellNoise.evaluate(Vec3d::new(f64::from(x) + 1.5, 0.5, 0.5));
            if a != b {
                distinct += 1;
            }
        }
        assert!(distinct > 95);
    }

    #[test]
    fn color_channels() {
        let mut rd = fastrand::Rng::with_seed(2);
        for _ in 0..1000 {
            let p = rd.point(30.0);
            let color = cell_noise_color(p);
            assert!(color.min_element() >= 0.0 && color.max_element() < 1.0);
            assert_eq!(color.x, CellNoise.evaluate(p));
        }
    }

    #[test]
    fn far_from_the_origin() {
        for x in [3.0e9, -3.0e9, 1e12, f64::MAX, f64::MIN] {
            let p = Vec3d::new(x, 0.5, 0.5);
            assert_in_range!(CellNoise.evaluate(p), 0.0, 1.0);
            assert_eq!(cell_noise_color(p).x, CellNoise.evaluate(p));
        }
    }

    #[test]
    fn negative_cells_are_distinct_from_positive() {
        let a = CellNoise.evaluate(Vec3d::new(-0.5, -0.5, -0.5));
        let b = CellNoise.evaluate(Vec3d::new(0.5, 0.5, 0.5));
        assert_ne!(a, b);
    }
}
