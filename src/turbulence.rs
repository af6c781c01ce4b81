//! Classic turbulence: octaves of doubling frequency and halving amplitude
//!
//! **NOTE: the `turbulence` feature must be enabled to use this code**
use crate::{
    error::{ensure_finite, rejected, ConfigError},
    NoiseGenerator, Vec3d,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sums `octaves` samples of a signed basis at `offset(p) / size · 2^i` with amplitude `2^-i` and
/// normalizes the sum into `[0, 1]`.
///
/// With `hard` every sample contributes its absolute value, which gives sharp creases where the
/// basis crosses zero. Otherwise samples are remapped from `[-1, 1]` to `[0, 1]`.
///
/// Degenerate input never panics: zero octaves, a non-positive `size` and a non-finite `size`
/// all evaluate to `0.0`. Use [`Turbulence::new`] to reject such a configuration up front.
#[must_use]
pub fn turbulence<N: NoiseGenerator + ?Sized>(
    noise: &N,
    p: Vec3d,
    octaves: u32,
    size: f64,
    hard: bool,
) -> f64 {
    if octaves == 0 || !size.is_finite() || size <= 0.0 {
        return 0.0;
    }

    let mut tp = noise.offset(p) / size;
    let mut amplitude = 1.0;
    let mut sum = 0.0;
    let mut norm = 0.0;
    for _ in 0..octaves {
        let n = noise.evaluate(tp);
        #[allow(clippy::suboptimal_flops)]
        let sample = if hard { n.abs() } else { 0.5 * n + 0.5 };
        sum += amplitude * sample;
        norm += amplitude;
        amplitude *= 0.5;
        tp *= 2.0;
    }
    (sum / norm).clamp(0.0, 1.0)
}

/// A validated turbulence configuration
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Turbulence {
    octaves: u32,
    size: f64,
    hard: bool,
}

impl Turbulence {
    /// # Errors
    /// Fails if `size` is not a positive finite number
    pub fn new(octaves: u32, size: f64, hard: bool) -> Result<Self, ConfigError> {
        let size = ensure_finite("size", size)?;
        if size <= 0.0 {
            return Err(rejected(ConfigError::NonPositiveSize(size)));
        }
        log::debug!("turbulence with {octaves} octaves, size {size}, hard {hard}");
        Ok(Self {
            octaves,
            size,
            hard,
        })
    }

    #[must_use]
    pub const fn octaves(&self) -> u32 {
        self.octaves
    }

    #[must_use]
    pub const fn size(&self) -> f64 {
        self.size
    }

    #[must_use]
    pub const fn hard(&self) -> bool {
        self.hard
    }

    #[must_use]
    pub fn evaluate<N: NoiseGenerator + ?Sized>(&self, noise: &N, p: Vec3d) -> f64 {
        turbulence(noise, p, self.octaves, self.size, self.hard)
    }
}

#[cfg(test)]
mod tests {
    use super::{turbulence, Turbulence};
    use crate::{
        blender::BlenderNoise,
        error::ConfigError,
        improved_perlin::ImprovedPerlin,
        perlin::Perlin,
        test_utils::{assert_eq_approx, assert_in_range, SamplerExt},
        NoiseGenerator, Vec3d,
    };

    #[test]
    fn zero_octaves_is_zero() {
        let perlin = Perlin::new();
        let mut rd = fastrand::Rng::with_seed(1);
        for _ in 0..1000 {
            let p = rd.point(100.0);
            assert_eq!(turbulence(&perlin, p, 0, 1.0, true), 0.0);
            assert_eq!(turbulence(&ImprovedPerlin, p, 0, 0.5, false), 0.0);
        }
    }

    #[test]
    fn degenerate_size_is_zero() {
        let p = Vec3d::new(0.3, 0.6, 0.9);
        for size in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert_eq!(turbulence(&ImprovedPerlin, p, 4, size, true), 0.0);
        }
    }

    #[test]
    fn stays_in_unit_range() {
        let perlin = Perlin::with_seed(3);
        let mut rd = fastrand::Rng::with_seed(2);
        for octaves in 1..8 {
            for _ in 0..2000 {
                let p = rd.point(50.0);
                let size = 0.1 + rd.f64() * 4.0;
                for hard in [true, false] {
                    assert_in_range!(turbulence(&perlin, p, octaves, size, hard), 0.0, 1.0);
                    assert_in_range!(
                        turbulence(&ImprovedPerlin, p, octaves, size, hard),
                        0.0,
                        1.0
                    );
                }
            }
        }
    }

    #[test]
    fn single_octave_is_one_sample() {
        let mut rd = fastrand::Rng::with_seed(4);
        for _ in 0..1000 {
            let p = rd.point(20.0);
            let n = ImprovedPerlin.evaluate(p / 2.0);
            assert_eq_approx!(
                turbulence(&ImprovedPerlin, p, 1, 2.0, true),
                n.abs(),
                1e-15,
                1e-12
            );
            assert_eq_approx!(
                turbulence(&ImprovedPerlin, p, 1, 2.0, false),
                0.5 * n + 0.5,
                1e-15,
                1e-12
            );
        }
    }

    #[test]
    fn octaves_halve_in_amplitude() {
        let p = Vec3d::new(1.1, -2.3, 0.7);
        let n0 = ImprovedPerlin.evaluate(p).abs();
        let n1 = ImprovedPerlin.evaluate(p * 2.0).abs();
        assert_eq_approx!(
            turbulence(&ImprovedPerlin, p, 2, 1.0, true),
            (n0 + 0.5 * n1) / 1.5,
            1e-15,
            1e-12
        );
    }

    #[test]
    fn offset_basis_is_sampled_shifted() {
        let mut rd = fastrand::Rng::with_seed(5);
        for _ in 0..500 {
            let p = rd.point(20.0);
            assert_eq!(
                turbulence(&BlenderNoise::new(), p, 5, 1.5, true),
                turbulence(&ImprovedPerlin, p + Vec3d::ONE, 5, 1.5, true)
            );
        }
    }

    #[test]
    fn validated_config() {
        assert_eq!(
            Turbulence::new(3, 0.0, true),
            Err(ConfigError::NonPositiveSize(0.0))
        );
        assert!(matches!(
            Turbulence::new(3, f64::NAN, true),
            Err(ConfigError::NonFiniteParameter { name: "size", .. })
        ));

        let turb = Turbulence::new(6, 0.75, false).unwrap();
        assert_eq!((turb.octaves(), turb.size(), turb.hard()), (6, 0.75, false));
        let p = Vec3d::new(9.0, -1.5, 4.25);
        assert_eq!(
            turb.evaluate(&ImprovedPerlin, p),
            turbulence(&ImprovedPerlin, p, 6, 0.75, false)
        );
    }
}
