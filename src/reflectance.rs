//! Mirror and transmission directions and dielectric Fresnel terms.
//!
//! All directions point away from the surface: `v` is the direction towards the viewer, not the
//! direction of travel. The normal may face either side, the functions flip it as needed.
//!
//! A zero normal or direction never produces NaN. It counts as grazing incidence: the Fresnel
//! terms report total reflection and [`refract`] degrades to a finite direction or zero.
use crate::{
    utils::{pow5, FloatExt},
    Vec3d,
};

/// Fraction of light reflected (`kr`) and transmitted (`kt`) at an interface. `kr + kt == 1`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FresnelTerms {
    pub kr: f64,
    pub kt: f64,
}

impl FresnelTerms {
    fn from_reflectance(kr: f64) -> Self {
        let kr = if kr.is_finite() { kr.clamp(0.0, 1.0) } else { 1.0 };
        Self { kr, kt: 1.0 - kr }
    }
}

/// Mirrors `v` about `n`. If `v` is below the surface defined by `n` it is simply negated.
#[must_use]
pub fn reflect(n: Vec3d, v: Vec3d) -> Vec3d {
    let vn = v.dot(n);
    if vn < 0.0 {
        -v
    } else {
        n * (vn * 2.0) - v
    }
}

/// Direction of the ray transmitted through an interface with relative index of refraction `ior`.
///
/// `v` on the side `n` points to means entering the denser medium. The result is normalized, or
/// the zero vector if the light is totally internally reflected.
#[must_use]
pub fn refract(n: Vec3d, v: Vec3d, ior: f64) -> Vec3d {
    let (n, eta) = if v.dot(n) < 0.0 {
        (-n, ior)
    } else {
        (n, ior.recip())
    };
    let cos_i = v.dot(n);
    #[allow(clippy::suboptimal_flops)]
    let k = 1.0 - eta.sq() * (1.0 - cos_i.sq());
    if k < 0.0 {
        // total internal reflection
        return Vec3d::ZERO;
    }
    #[allow(clippy::suboptimal_flops)]
    let t = -v * eta + n * (eta * cos_i - k.sqrt());
    t.normalize_or_zero()
}

/// Unpolarized Fresnel reflectance of a dielectric.
///
/// `i` points away from the surface, `ior` is the ratio of the indices of refraction across
/// the interface. Total internal reflection and grazing incidence give `kr == 1`.
#[must_use]
pub fn fresnel(i: Vec3d, n: Vec3d, ior: f64) -> FresnelTerms {
    let n = if i.dot(n) < 0.0 { -n } else { n };
    let c = i.dot(n);
    #[allow(clippy::suboptimal_flops)]
    let g = (ior.sq() + c.sq() - 1.0).max(0.0).sqrt();
    if g + c == 0.0 {
        return FresnelTerms::from_reflectance(1.0);
    }
    let f1 = (g - c) / (g + c);
    #[allow(clippy::suboptimal_flops)]
    let f2 = (c * (g + c) - 1.0) / (c * (g - c) + 1.0);
    FresnelTerms::from_reflectance(0.5 * f1.sq() * (1.0 + f2.sq()))
}

/// Schlick's approximation of [`fresnel`]. `f0` is the reflectance at normal incidence, see
/// [`schlick_f0`].
#[must_use]
#[allow(clippy::suboptimal_flops)]
pub fn fast_fresnel(i: Vec3d, n: Vec3d, f0: f64) -> FresnelTerms {
    let t = (1.0 - i.dot(n).abs()).clamp(0.0, 1.0);
    FresnelTerms::from_reflectance(f0 + (1.0 - f0) * pow5(t))
}

/// Reflectance at normal incidence for a relative index of refraction
#[must_use]
pub fn schlick_f0(ior: f64) -> f64 {
    ((ior - 1.0) / (ior + 1.0)).sq()
}
