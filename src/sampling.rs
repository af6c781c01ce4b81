//! Local frames, disk samples and direction sampling in cones.
//!
//! The `z1, z2` / `r1, r2` parameters are uniform numbers in `[0, 1)` supplied by the caller. That
//! way the same routines serve plain random sampling, stratified sampling and low discrepancy
//! sequences. [`cone_sample`] and [`random_hemisphere_direction`] draw them from the crate
//! [`Rng`] instead.
use std::{f64::consts, num::NonZeroU32};

use glam::f64::DMat3;

use crate::{rng::Rng, Vec2d, Vec3d};

/// Two unit vectors `(u, v)` perpendicular to the normalized `n`, such that `(u, v, n)` is a right
/// handed orthonormal frame.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn create_cs(n: Vec3d) -> (Vec3d, Vec3d) {
    if n.x == 0.0 && n.y == 0.0 {
        let u = if n.z < 0.0 { -Vec3d::X } else { Vec3d::X };
        (u, Vec3d::Y)
    } else {
        // x and y are not both zero, so the root is positive. Divide rather than multiply by
        // the reciprocal, which overflows for subnormal roots.
        let d = n.x.hypot(n.y);
        let u = Vec3d::new(n.y / d, -n.x / d, 0.0);
        (u, n.cross(u))
    }
}

/// Shirley's concentric mapping from the unit square onto the unit disk.
///
/// Preserves area, so uniform inputs give uniform points on the disk, and keeps strata compact.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn shirley_disk(r1: f64, r2: f64) -> Vec2d {
    #[allow(clippy::suboptimal_flops)]
    let (a, b) = (2.0 * r1 - 1.0, 2.0 * r2 - 1.0);
    let (r, phi) = if a > -b {
        if a > b {
            (a, consts::FRAC_PI_4 * (b / a))
        } else {
            (b, consts::FRAC_PI_4 * (2.0 - a / b))
        }
    } else if a < b {
        (-a, consts::FRAC_PI_4 * (4.0 + b / a))
    } else if b != 0.0 {
        (-b, consts::FRAC_PI_4 * (6.0 - a / b))
    } else {
        (-b, 0.0)
    };
    let (sin, cos) = phi.sin_cos();
    Vec2d::new(r * cos, r * sin)
}

/// Samples a direction uniformly (by solid angle) in the cone of half angle `acos(cos_angle)`
/// around the axis `d`, given the frame `u, v` perpendicular to it.
///
/// `d`, `u` and `v` have to be an orthonormal frame, see [`create_cs`].
#[must_use]
pub fn random_vector_cone_basis(
    d: Vec3d,
    u: Vec3d,
    v: Vec3d,
    cos_angle: f64,
    z1: f64,
    z2: f64,
) -> Vec3d {
    let cos_angle = cos_angle.clamp(-1.0, 1.0);
    let t1 = consts::TAU * z1;
    #[allow(clippy::suboptimal_flops)]
    let t2 = 1.0 - (1.0 - cos_angle) * z2;
    let (sin, cos) = t1.sin_cos();
    #[allow(clippy::suboptimal_flops)]
    {
        (u * cos + v * sin) * (1.0 - t2 * t2).max(0.0).sqrt() + d * t2
    }
}

/// Like [`random_vector_cone_basis`], but builds the frame around `dir` itself. `dir` does not
/// need to be normalized; the zero vector gives the zero vector.
///
/// With `cos_angle == 1` the result is exactly the normalized `dir`.
#[must_use]
pub fn random_vector_cone(dir: Vec3d, cos_angle: f64, z1: f64, z2: f64) -> Vec3d {
    let d = dir.normalize_or_zero();
    if d == Vec3d::ZERO {
        return d;
    }
    let (u, v) = create_cs(d);
    random_vector_cone_basis(d, u, v, cos_angle, z1, z2)
}

/// [`random_vector_cone`] with both numbers drawn from `rng`
pub fn cone_sample(dir: Vec3d, cos_angle: f64, rng: &mut Rng) -> Vec3d {
    let z1 = rng.next_f64();
    let z2 = rng.next_f64();
    random_vector_cone(dir, cos_angle, z1, z2)
}

/// Stratified direction in the cone of half angle `acos(cos_angle)` around `dir`.
///
/// The cone is split into `grid x grid` strata in azimuth and in cosine of the polar angle. Sample
/// `sample` lies at the corner of stratum `(sample / grid, sample % grid)`, so the sample indices
/// `0..grid²` enumerate every stratum once and the result is fully reproducible.
#[must_use]
pub fn discrete_vector_cone(
    dir: Vec3d,
    cos_angle: f64,
    sample: u32,
    grid: NonZeroU32,
) -> Vec3d {
    let dir = dir.normalize_or_zero();
    if dir == Vec3d::ZERO {
        return dir;
    }
    let cos_angle = cos_angle.clamp(-1.0, 1.0);
    let grid = grid.get();
    let r1 = f64::from(sample / grid) / f64::from(grid);
    let r2 = f64::from(sample % grid) / f64::from(grid);

    let azimuth = consts::TAU * r1;
    #[allow(clippy::suboptimal_flops)]
    let polar = (1.0 - (1.0 - cos_angle) * r2).acos();
    let (sin_polar, cos_polar) = polar.sin_cos();
    let (sin_azimuth, cos_azimuth) = azimuth.sin_cos();
    let local = Vec3d::new(
        cos_polar,
        sin_polar * cos_azimuth,
        sin_polar * sin_azimuth,
    );

    // frame with dir as the first axis. `X × dir` is `(0, -z, y)`, its length is taken with
    // hypot so a direction barely off the x axis does not underflow to a zero vector.
    let yz = dir.y.hypot(dir.z);
    let frame = if yz > 0.0 {
        let c = Vec3d::new(0.0, -dir.z / yz, dir.y / yz);
        DMat3::from_cols(dir, c, dir.cross(c).normalize())
    } else if dir.x < 0.0 {
        DMat3::from_diagonal(Vec3d::new(-1.0, 1.0, 1.0))
    } else {
        DMat3::IDENTITY
    };
    frame * local
}

/// Uniformly distributed direction on the hemisphere `z >= 0`
pub fn random_hemisphere_direction(rng: &mut Rng) -> Vec3d {
    let z = rng.next_f64();
    #[allow(clippy::suboptimal_flops)]
    let r2 = 1.0 - z * z;
    if r2 > 0.0 {
        let (sin, cos) = (consts::TAU * rng.next_f64()).sin_cos();
        let r = r2.sqrt();
        Vec3d::new(r * cos, r * sin, z)
    } else {
        Vec3d::Z
    }
}
