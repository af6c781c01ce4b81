//! Perlin's original gradient noise
//!
//! **NOTE: the `perlin` feature must be enabled to use this code**
use crate::{rng::Rng, utils::FloatExt, NoiseGenerator, Vec3d};

const TABLE_SIZE: usize = 256;

/// Cubic s-curve `3t^2 - 2t^3`. Only C1 at the lattice, which is what distinguishes this basis
/// from [`crate::improved_perlin::ImprovedPerlin`] visually.
#[inline]
fn s_curve(t: f64) -> f64 {
    t.sq() * (3.0 - 2.0 * t)
}

/// Classic Perlin noise.
///
/// The gradient and permutation tables are built once at construction from the crate's
/// [`Rng`], so the field is a pure function of the seed. Returns values in `[-1, 1]`, exactly zero
/// at every integer lattice point.
#[derive(Clone, Debug, PartialEq)]
pub struct Perlin {
    perm: Box<[u8; TABLE_SIZE]>,
    gradients: Box<[Vec3d; TABLE_SIZE]>,
}

impl Default for Perlin {
    fn default() -> Self {
        Self::new()
    }
}

impl Perlin {
    /// Builds the tables with [`crate::rng::DEFAULT_SEED`]
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(&mut Rng::default())
    }

    /// Builds the tables from a specific seed. Different seeds give uncorrelated fields.
    #[must_use]
    pub fn with_seed(seed: i32) -> Self {
        Self::with_rng(&mut Rng::new(seed))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn with_rng(rng: &mut Rng) -> Self {
        let mut gradients = Box::new([Vec3d::ZERO; TABLE_SIZE]);
        for gradient in &mut *gradients {
            // rejection sampling keeps the directions uniform on the sphere
            *gradient = loop {
                let candidate = Vec3d::new(rng.next_f64(), rng.next_f64(), rng.next_f64())
                    * 2.0
                    - Vec3d::ONE;
                let length_squared = candidate.length_squared();
                if length_squared > 1e-6 && length_squared <= 1.0 {
                    break candidate / length_squared.sqrt();
                }
            };
        }

        let mut perm = Box::new([0_u8; TABLE_SIZE]);
        for (i, entry) in perm.iter_mut().enumerate() {
            *entry = i as u8;
        }
        for i in (1..TABLE_SIZE).rev() {
            let j = rng.next_below(i as u32 + 1) as usize;
            perm.swap(i, j);
        }

        Self { perm, gradients }
    }

    #[inline]
    fn perm(&self, i: usize) -> usize {
        self.perm[i & (TABLE_SIZE - 1)] as usize
    }

    #[inline]
    fn at(&self, hash: usize, offset: Vec3d) -> f64 {
        self.gradients[hash & (TABLE_SIZE - 1)].dot(offset)
    }
}

impl NoiseGenerator for Perlin {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn evaluate(&self, p: Vec3d) -> f64 {
        let floor = p.floor();
        let bx0 = (floor.x as i64 & 255) as usize;
        let by0 = (floor.y as i64 & 255) as usize;
        let bz0 = (floor.z as i64 & 255) as usize;
        let (bx1, by1, bz1) = (bx0 + 1, by0 + 1, bz0 + 1);

        let r0 = p - floor;
        let r1 = r0 - Vec3d::ONE;

        let i = self.perm(bx0);
        let j = self.perm(bx1);
        let b00 = self.perm(i + by0);
        let b10 = self.perm(j + by0);
        let b01 = self.perm(i + by1);
        let b11 = self.perm(j + by1);

        let sx = s_curve(r0.x);
        let sy = s_curve(r0.y);
        let sz = s_curve(r0.z);

        let a = self
            .at(b00 + bz0, r0)
            .lerp(self.at(b10 + bz0, Vec3d::new(r1.x, r0.y, r0.z)), sx);
        let b = self
            .at(b01 + bz0, Vec3d::new(r0.x, r1.y, r0.z))
            .lerp(self.at(b11 + bz0, Vec3d::new(r1.x, r1.y, r0.z)), sx);
        let c = a.lerp(b, sy);

        let a = self
            .at(b00 + bz1, Vec3d::new(r0.x, r0.y, r1.z))
            .lerp(self.at(b10 + bz1, Vec3d::new(r1.x, r0.y, r1.z)), sx);
        let b = self
            .at(b01 + bz1, Vec3d::new(r0.x, r1.y, r1.z))
            .lerp(self.at(b11 + bz1, r1), sx);
        let d = a.lerp(b, sy);

        c.lerp(d, sz)
    }
}

#[cfg(test)]
mod tests {
    use super::Perlin;
    use crate::{
        test_utils::{self, assert_eq_approx_abs},
        NoiseGenerator, Vec3d,
    };

    #[test]
    fn zero_on_lattice() {
        let noise = Perlin::new();
        for p in test_utils::lattice_points(6) {
            assert_eq!(noise.evaluate(p), 0.0, "{p:?}");
        }
    }

    #[test]
    fn gradients_are_unit_length() {
        let noise = Perlin::with_seed(99);
        for g in &*noise.gradients {
            assert_eq_approx_abs!(g.length(), 1.0, 1e-12);
        }
    }

    #[test]
    fn permutation_is_a_bijection() {
        let noise = Perlin::new();
        let mut seen = [false; 256];
        for &entry in &*noise.perm {
            assert!(!seen[entry as usize]);
            seen[entry as usize] = true;
        }
    }

    #[test]
    fn range_and_mean() {
        let mean = test_utils::test_noise_range(&Perlin::new(), -1.0, 1.0, 100_000);
        assert_eq_approx_abs!(mean, 0.0, 0.03);
    }

    #[test]
    fn same_seed_same_field() {
        let a = Perlin::with_seed(5);
        let b = Perlin::with_seed(5);
        assert_eq!(a, b);
        let c = Perlin::with_seed(6);
        let p = Vec3d::new(0.5, 1.25, -7.75);
        assert_ne!(a.evaluate(p), c.evaluate(p));
    }

    #[test]
    fn continuity() {
        test_utils::test_continuity(&Perlin::new(), 8.0);
    }

    #[test]
    fn parallel_determinism() {
        test_utils::test_parallel_determinism(&Perlin::new());
    }
}
