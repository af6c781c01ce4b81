pub trait ApproxEqual: Copy {
    fn equals_approx(self, other: Self, eps: Self, eps_rel: Self) -> bool;
    fn equals_approx_abs(self, other: Self, eps: Self) -> bool;
    fn equals_approx_rel(self, other: Self, eps: Self) -> bool;
}

macro_rules! assert_eq_approx {
    ($lhs:expr, $rhs:expr, $eps_abs:expr, $eps_rel:expr) => {
        assert!(
            $crate::test_utils::ApproxEqual::equals_approx($lhs, $rhs, $eps_abs, $eps_rel),
            r#"assert_eq_abs failed:
    {}: {:?}
    {}: {:?}
    {} (maximum absolute error): {:?}
    {} (maximum relative error): {:?}"#,
            stringify!($lhs),
            $lhs,
            stringify!($rhs),
            $rhs,
            stringify!($eps_abs),
            $eps_abs,
            stringify!($eps_rel),
            $eps_rel,
        );
    };

    ($lhs:expr, $rhs:expr, $eps_abs: expr, $eps_rel:expr, $($arg:tt)+) => {
        assert!($crate::test_utils::ApproxEqual::equals_approx($lhs, $rhs, $eps_abs, $eps_rel), $($arg)*);
    }
}

macro_rules! assert_eq_approx_abs {
    ($lhs:expr, $rhs:expr, $eps_abs:expr) => {
        assert!(
            $crate::test_utils::ApproxEqual::equals_approx_abs($lhs, $rhs, $eps_abs),
            r#"assert_eq_abs failed:
    {}: {:?}
    {}: {:?}
    {} (maximum absolute error): {:?}"#,
            stringify!($lhs),
            $lhs,
            stringify!($rhs),
            $rhs,
            stringify!($eps_abs),
            $eps_abs,
        )
    };

    ($lhs:expr, $rhs:expr, $eps_abs:expr, $($arg:tt)+) => {
        assert!($crate::test_utils::ApproxEqual::equals_approx_abs($lhs, $rhs, $eps_abs),
        $($arg)*);
    };
}

macro_rules! assert_eq_approx_rel {
    ($lhs:expr, $rhs:expr, $eps_rel:expr) => {
        assert!(
            $crate::test_utils::ApproxEqual::equals_approx_rel($lhs, $rhs, $eps_rel),
            r#"assert_eq_rel failed:
    {}: {:?}
    {}: {:?}
    {} (maximum relative error): {:?}"#,
            stringify!($lhs),
            $lhs,
            stringify!($rhs),
            $rhs,
            stringify!($eps_rel),
            $eps_rel,
        )
    };

    ($lhs:expr, $rhs:expr, $eps_rel:expr, $($arg:tt)+) => {
        assert!($crate::test_utils::ApproxEqual::equals_approx_rel($lhs, $rhs, $eps_rel),
        $($arg)*);
    };
}

macro_rules! assert_in_range {
    ($value:expr, $lower:expr, $upper:expr) => {
        assert!(
            $lower <= $value && $value <= $upper,
            r#"assert_in_range failed:
    {} (value): {:?}
    {} (lower bound): {:?}
    {} (upper bound): {:?}"#,
            stringify!($value),
            $value,
            stringify!($lower),
            $lower,
            stringify!($upper),
            $upper
        )
    };

    ($value:expr, $lower:expr, $upper:expr, $($arg:tt)+) => {
        assert!($lower <= $value && $value <= $upper, $($arg)*);
    };
}

macro_rules! impl_approx_equal {
    ($scalar:ty, $vector:ty) => {
        impl ApproxEqual for $scalar {
            fn equals_approx(self, other: Self, eps: Self, eps_rel: Self) -> bool {
                #[allow(clippy::float_cmp)]
                if self == other || (self - other).abs() <= eps {
                    true
                } else {
                    let diff = (self - other).abs();
                    let max = self.abs().max(other.abs());
                    diff <= max * eps_rel
                }
            }

            fn equals_approx_abs(self, other: Self, eps: Self) -> bool {
                #[allow(clippy::float_cmp)]
                if self == other {
                    true
                } else {
                    (self - other).abs() <= eps
                }
            }

            fn equals_approx_rel(self, other: Self, eps: Self) -> bool {
                #[allow(clippy::float_cmp)]
                if self == other {
                    return true;
                }
                let diff = (self - other).abs();
                let max = self.abs().max(other.abs());
                diff <= max * eps
            }
        }

        impl ApproxEqual for $vector {
            fn equals_approx_rel(self, other: Self, eps: Self) -> bool {
                $crate::test_utils::ApproxEqual::equals_approx_rel(self.x, other.x, eps.x)
                    && $crate::test_utils::ApproxEqual::equals_approx_rel(self.y, other.y, eps.y)
                    && $crate::test_utils::ApproxEqual::equals_approx_rel(self.z, other.z, eps.z)
            }
            fn equals_approx_abs(self, other: Self, eps: Self) -> bool {
                $crate::test_utils::ApproxEqual::equals_approx_abs(self.x, other.x, eps.x)
                    && $crate::test_utils::ApproxEqual::equals_approx_abs(self.y, other.y, eps.y)
                    && $crate::test_utils::ApproxEqual::equals_approx_abs(self.z, other.z, eps.z)
            }
            fn equals_approx(self, other: Self, eps_abs: Self, eps_rel: Self) -> bool {
                $crate::test_utils::ApproxEqual::equals_approx(
                    self.x, other.x, eps_abs.x, eps_rel.x,
                ) && $crate::test_utils::ApproxEqual::equals_approx(
                    self.y, other.y, eps_abs.y, eps_rel.y,
                ) && $crate::test_utils::ApproxEqual::equals_approx(
                    self.z, other.z, eps_abs.z, eps_rel.z,
                )
            }
        }
    };
}

impl_approx_equal!(f64, Vec3d);

use std::f64::consts;

pub(crate) use assert_eq_approx;
pub(crate) use assert_eq_approx_abs;
pub(crate) use assert_eq_approx_rel;
pub(crate) use assert_in_range;

use crate::{NoiseGenerator, Vec3d};

pub trait SamplerExt {
    fn vec3d(&mut self) -> Vec3d;
    /// point with every component in `-extent..extent`
    fn point(&mut self, extent: f64) -> Vec3d;
}

impl SamplerExt for fastrand::Rng {
    fn vec3d(&mut self) -> Vec3d {
        Vec3d::new(self.f64(), self.f64(), self.f64())
    }

    fn point(&mut self, extent: f64) -> Vec3d {
        (self.vec3d() * 2.0 - Vec3d::ONE) * extent
    }
}

/** sample a direction with density 1 / 4pi */
pub fn spherical_sample(rd: &mut fastrand::Rng) -> Vec3d {
    let u = rd.f64();
    let v = rd.f64();
    spherical_sample_uv(u, v)
}

fn spherical_sample_uv(u: f64, v: f64) -> Vec3d {
    #[allow(clippy::suboptimal_flops)]
    let cos_theta = 2.0 * u - 1.0;
    #[allow(clippy::suboptimal_flops)]
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
    let phi = v * 2.0 * consts::PI;
    let (sin_phi, cos_phi) = phi.sin_cos();
    Vec3d::new(sin_theta * sin_phi, sin_theta * cos_phi, cos_theta)
}

/// Every integer lattice point in `-extent..=extent` on all three axes
pub fn lattice_points(extent: i32) -> impl Iterator<Item = Vec3d> {
    (-extent..=extent).flat_map(move |x| {
        (-extent..=extent).flat_map(move |y| {
            (-extent..=extent).map(move |z| Vec3d::new(f64::from(x), f64::from(y), f64::from(z)))
        })
    })
}

/// Samples the generator at `runs` random points and checks every value is inside the range.
/// Returns the mean, which most callers want to check as well.
pub fn test_noise_range<N: NoiseGenerator + ?Sized>(
    generator: &N,
    lower: f64,
    upper: f64,
    runs: usize,
) -> f64 {
    let mut rd = fastrand::Rng::with_seed(0x5eed);
    let mut sum = 0.0;
    for _ in 0..runs {
        let p = rd.point(64.0);
        let value = generator.evaluate(p);
        assert_in_range!(
            value,
            lower,
            upper,
            r#"
    noise value out of range
    value: {value},
    p: {p:?}"#
        );
        sum += value;
    }
    #[allow(clippy::cast_precision_loss)]
    {
        sum / runs as f64
    }
}

/// Evaluates the generator on a rayon pool and sequentially and requires bitwise identical
/// results. Catches any hidden shared state.
pub fn test_parallel_determinism<N: NoiseGenerator + ?Sized>(generator: &N) {
    use rayon::prelude::*;

    let mut rd = fastrand::Rng::with_seed(7);
    let points: Vec<Vec3d> = (0..20_000).map(|_| rd.point(16.0)).collect();
    let sequential: Vec<u64> = points
        .iter()
        .map(|&p| generator.evaluate(p).to_bits())
        .collect();
    let parallel: Vec<u64> = points
        .par_iter()
        .map(|&p| generator.evaluate(p).to_bits())
        .collect();
    assert_eq!(sequential, parallel);
}

/// Neighbouring points must have close values.
pub fn test_continuity<N: NoiseGenerator + ?Sized>(generator: &N, max_slope: f64) {
    let mut rd = fastrand::Rng::with_seed(11);
    let eps = 1e-4;
    for _ in 0..10_000 {
        let p = rd.point(32.0);
        let q = p + spherical_sample(&mut rd) * eps;
        let delta = (generator.evaluate(p) - generator.evaluate(q)).abs();
        assert!(
            delta <= max_slope * eps,
            "jump of {delta} between {p:?} and {q:?}"
        );
    }
}
