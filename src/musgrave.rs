//! Musgrave's fractal combinators
//!
//! **NOTE: the `musgrave` feature must be enabled to use this code**
//!
//! Every combinator samples a basis at `p · lacunarity^i` for octave `i` and weights the sample
//! with `lacunarity^(-H·i)`. They differ in how the octaves are combined. The formulas are the
//! ones from F. K. Musgrave's chapter in *Texturing and Modeling: A Procedural Approach*, in the
//! form Blender's texture nodes use them.
//!
//! The octave count is real valued. The fractional part of it blends in one additional octave
//! for [`Fbm`], [`MultiFractal`], [`HeteroTerrain`] and [`HybridMultiFractal`]. A count of zero
//! always evaluates to `0.0`.
//!
//! [`HeteroTerrain`] and [`HybridMultiFractal`] always evaluate their first octave in full, so
//! below two octaves the whole part makes no difference: `0.5` and `1.5` octaves give the same
//! value. [`RidgedMultiFractal`] ignores the fractional part.
//!
//! The basis output is combined as is. Unsigned bases should be wrapped in [`crate::Signed`].
use crate::{
    error::{ensure_finite, rejected, ConfigError},
    utils::FloatExt,
    NoiseGenerator, Vec3d,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A fractal sum over some noise basis
pub trait Musgrave {
    fn evaluate(&self, p: Vec3d) -> f64;
}

/// The octave schedule shared by all combinators
#[derive(Clone, Copy, Debug, PartialEq)]
struct Octaves {
    lacunarity: f64,
    /// `lacunarity^(-H)`, the amplitude ratio between neighbouring octaves
    pw_hl: f64,
    total: f64,
    whole: u32,
    remainder: f64,
}

impl Octaves {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn new(h: f64, lacunarity: f64, octaves: f64) -> Result<Self, ConfigError> {
        let h = ensure_finite("h", h)?;
        let lacunarity = ensure_finite("lacunarity", lacunarity)?;
        if lacunarity <= 0.0 {
            return Err(rejected(ConfigError::NonPositiveLacunarity(lacunarity)));
        }
        let octaves = ensure_finite("octaves", octaves)?;
        if octaves < 0.0 {
            return Err(rejected(ConfigError::NegativeOctaves(octaves)));
        }

        let whole = octaves.floor();
        Ok(Self {
            lacunarity,
            pw_hl: lacunarity.powf(-h),
            total: octaves,
            whole: whole as u32,
            remainder: octaves - whole,
        })
    }

    fn is_empty(&self) -> bool {
        self.total <= 0.0
    }
}

/// Fractional Brownian motion: the plain weighted sum of all octaves
#[derive(Debug)]
pub struct Fbm<'a, N: ?Sized> {
    noise: &'a N,
    octaves: Octaves,
}

impl<'a, N: NoiseGenerator + ?Sized> Fbm<'a, N> {
    /// # Errors
    /// Fails for non-finite parameters, a lacunarity `<= 0` or a negative octave count
    pub fn new(noise: &'a N, h: f64, lacunarity: f64, octaves: f64) -> Result<Self, ConfigError> {
        let octaves = Octaves::new(h, lacunarity, octaves)?;
        log::debug!("fbm with {octaves:?}");
        Ok(Self { noise, octaves })
    }
}

impl<N: NoiseGenerator + ?Sized> Musgrave for Fbm<'_, N> {
    fn evaluate(&self, p: Vec3d) -> f64 {
        let Octaves {
            lacunarity,
            pw_hl,
            whole,
            remainder,
            ..
        } = self.octaves;
        let mut p = self.noise.offset(p);
        let mut value = 0.0;
        let mut pwr = 1.0;

        for _ in 0..whole {
            value += self.noise.evaluate(p) * pwr;
            pwr *= pw_hl;
            p *= lacunarity;
        }

        if remainder > 0.0 {
            value += remainder * self.noise.evaluate(p) * pwr;
        }
        value
    }
}

/// Multifractal: the product of all octaves, so rough areas get rougher
#[derive(Debug)]
pub struct MultiFractal<'a, N: ?Sized> {
    noise: &'a N,
    octaves: Octaves,
}

impl<'a, N: NoiseGenerator + ?Sized> MultiFractal<'a, N> {
    /// # Errors
    /// See [`Fbm::new`]
    pub fn new(noise: &'a N, h: f64, lacunarity: f64, octaves: f64) -> Result<Self, ConfigError> {
        let octaves = Octaves::new(h, lacunarity, octaves)?;
        log::debug!("multifractal with {octaves:?}");
        Ok(Self { noise, octaves })
    }
}

impl<N: NoiseGenerator + ?Sized> Musgrave for MultiFractal<'_, N> {
    #[allow(clippy::suboptimal_flops)]
    fn evaluate(&self, p: Vec3d) -> f64 {
        if self.octaves.is_empty() {
            return 0.0;
        }
        let Octaves {
            lacunarity,
            pw_hl,
            whole,
            remainder,
            ..
        } = self.octaves;
        let mut p = self.noise.offset(p);
        let mut value = 1.0;
        let mut pwr = 1.0;

        for _ in 0..whole {
            value *= pwr * self.noise.evaluate(p) + 1.0;
            pwr *= pw_hl;
            p *= lacunarity;
        }

        if remainder > 0.0 {
            value *= remainder * pwr * self.noise.evaluate(p) + 1.0;
        }
        value
    }
}

/// Heterogeneous terrain: higher octaves are scaled by the value accumulated so far, which keeps
/// low areas smooth
#[derive(Debug)]
pub struct HeteroTerrain<'a, N: ?Sized> {
    noise: &'a N,
    octaves: Octaves,
    offset: f64,
}

impl<'a, N: NoiseGenerator + ?Sized> HeteroTerrain<'a, N> {
    /// `offset` raises the terrain above sea level.
    ///
    /// # Errors
    /// See [`Fbm::new`]
    pub fn new(
        noise: &'a N,
        h: f64,
        lacunarity: f64,
        octaves: f64,
        offset: f64,
    ) -> Result<Self, ConfigError> {
        let octaves = Octaves::new(h, lacunarity, octaves)?;
        let offset = ensure_finite("offset", offset)?;
        log::debug!("hetero terrain with {octaves:?}, offset {offset}");
        Ok(Self {
            noise,
            octaves,
            offset,
        })
    }
}

impl<N: NoiseGenerator + ?Sized> Musgrave for HeteroTerrain<'_, N> {
    fn evaluate(&self, p: Vec3d) -> f64 {
        if self.octaves.is_empty() {
            return 0.0;
        }
        let Octaves {
            lacunarity,
            pw_hl,
            whole,
            remainder,
            ..
        } = self.octaves;
        let mut p = self.noise.offset(p);

        let mut value = self.offset + self.noise.evaluate(p);
        p *= lacunarity;
        let mut pwr = pw_hl;

        for _ in 1..whole {
            let increment = (self.noise.evaluate(p) + self.offset) * pwr * value;
            value += increment;
            pwr *= pw_hl;
            p *= lacunarity;
        }

        if remainder > 0.0 {
            let increment = (self.noise.evaluate(p) + self.offset) * pwr * value;
            value += remainder * increment;
        }
        value
    }
}

/// Hybrid multifractal: a weighted sum where each octave's weight depends on the previous
/// octave, so valleys stay smooth and peaks get detail
#[derive(Debug)]
pub struct HybridMultiFractal<'a, N: ?Sized> {
    noise: &'a N,
    octaves: Octaves,
    offset: f64,
    gain: f64,
}

impl<'a, N: NoiseGenerator + ?Sized> HybridMultiFractal<'a, N> {
    /// # Errors
    /// See [`Fbm::new`]
    pub fn new(
        noise: &'a N,
        h: f64,
        lacunarity: f64,
        octaves: f64,
        offset: f64,
        gain: f64,
    ) -> Result<Self, ConfigError> {
        let octaves = Octaves::new(h, lacunarity, octaves)?;
        let offset = ensure_finite("offset", offset)?;
        let gain = ensure_finite("gain", gain)?;
        log::debug!("hybrid multifractal with {octaves:?}, offset {offset}, gain {gain}");
        Ok(Self {
            noise,
            octaves,
            offset,
            gain,
        })
    }
}

/// Weights below this no longer contribute visibly, the remaining whole octaves are skipped.
const HYBRID_WEIGHT_CUTOFF: f64 = 0.001;

impl<N: NoiseGenerator + ?Sized> Musgrave for HybridMultiFractal<'_, N> {
    fn evaluate(&self, p: Vec3d) -> f64 {
        if self.octaves.is_empty() {
            return 0.0;
        }
        let Octaves {
            lacunarity,
            pw_hl,
            whole,
            remainder,
            ..
        } = self.octaves;
        let mut p = self.noise.offset(p);

        let mut result = self.noise.evaluate(p) + self.offset;
        let mut weight = self.gain * result;
        p *= lacunarity;
        let mut pwr = pw_hl;

        for _ in 1..whole {
            if weight <= HYBRID_WEIGHT_CUTOFF {
                break;
            }
            weight = weight.min(1.0);
            let signal = (self.noise.evaluate(p) + self.offset) * pwr;
            pwr *= pw_hl;
            result += weight * signal;
            weight *= self.gain * signal;
            p *= lacunarity;
        }

        if remainder > 0.0 {
            result += remainder * ((self.noise.evaluate(p) + self.offset) * pwr);
        }
        result
    }
}

/// Ridged multifractal: folds every octave around `offset` and squares it, producing sharp
/// ridges. Each octave is weighted by the previous one, clamped to `[0, 1]`.
///
/// Only whole octaves are evaluated, the fractional part of the octave count is ignored.
#[derive(Debug)]
pub struct RidgedMultiFractal<'a, N: ?Sized> {
    noise: &'a N,
    octaves: Octaves,
    offset: f64,
    gain: f64,
}

impl<'a, N: NoiseGenerator + ?Sized> RidgedMultiFractal<'a, N> {
    /// # Errors
    /// See [`Fbm::new`]
    pub fn new(
        noise: &'a N,
        h: f64,
        lacunarity: f64,
        octaves: f64,
        offset: f64,
        gain: f64,
    ) -> Result<Self, ConfigError> {
        let octaves = Octaves::new(h, lacunarity, octaves)?;
        let offset = ensure_finite("offset", offset)?;
        let gain = ensure_finite("gain", gain)?;
        log::debug!("ridged multifractal with {octaves:?}, offset {offset}, gain {gain}");
        Ok(Self {
            noise,
            octaves,
            offset,
            gain,
        })
    }

    fn ridge(&self, p: Vec3d) -> f64 {
        (self.offset - self.noise.evaluate(p).abs()).sq()
    }
}

impl<N: NoiseGenerator + ?Sized> Musgrave for RidgedMultiFractal<'_, N> {
    fn evaluate(&self, p: Vec3d) -> f64 {
        if self.octaves.is_empty() {
            return 0.0;
        }
        let Octaves {
            lacunarity,
            pw_hl,
            whole,
            ..
        } = self.octaves;
        let mut p = self.noise.offset(p);

        let mut signal = self.ridge(p);
        let mut result = signal;
        let mut pwr = pw_hl;

        for _ in 1..whole {
            p *= lacunarity;
            let weight = (signal * self.gain).clamp(0.0, 1.0);
            signal = self.ridge(p) * weight;
            result += signal * pwr;
            pwr *= pw_hl;
        }
        result
    }
}

/// Selects one of the combinators
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FractalKind {
    Fbm,
    MultiFractal,
    HeteroTerrain,
    HybridMultiFractal,
    RidgedMultiFractal,
}

/// Plain data description of a [`Fractal`]. `offset` and `gain` are ignored by the kinds that
/// do not use them.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FractalParams {
    pub kind: FractalKind,
    /// Hurst exponent, the fractal increment. Higher values give smoother results
    pub h: f64,
    /// Frequency multiplier between octaves
    pub lacunarity: f64,
    pub octaves: f64,
    pub offset: f64,
    pub gain: f64,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            kind: FractalKind::Fbm,
            h: 1.0,
            lacunarity: 2.0,
            octaves: 2.0,
            offset: 1.0,
            gain: 1.0,
        }
    }
}

impl FractalParams {
    #[must_use]
    pub fn new(kind: FractalKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Checks every field, including the ones `kind` ignores.
    ///
    /// # Errors
    /// Returns the first invalid parameter
    pub fn validate(&self) -> Result<(), ConfigError> {
        Octaves::new(self.h, self.lacunarity, self.octaves)?;
        ensure_finite("offset", self.offset)?;
        ensure_finite("gain", self.gain)?;
        Ok(())
    }
}

/// Any combinator over a borrowed basis
#[derive(Debug)]
pub enum Fractal<'a, N: ?Sized> {
    Fbm(Fbm<'a, N>),
    MultiFractal(MultiFractal<'a, N>),
    HeteroTerrain(HeteroTerrain<'a, N>),
    HybridMultiFractal(HybridMultiFractal<'a, N>),
    RidgedMultiFractal(RidgedMultiFractal<'a, N>),
}

impl<'a, N: NoiseGenerator + ?Sized> Fractal<'a, N> {
    /// # Errors
    /// Fails for the parameters the selected combinator rejects
    pub fn new(params: &FractalParams, noise: &'a N) -> Result<Self, ConfigError> {
        let &FractalParams {
            kind,
            h,
            lacunarity,
            octaves,
            offset,
            gain,
        } = params;
        Ok(match kind {
            FractalKind::Fbm => Self::Fbm(Fbm::new(noise, h, lacunarity, octaves)?),
            FractalKind::MultiFractal => {
                Self::MultiFractal(MultiFractal::new(noise, h, lacunarity, octaves)?)
            }
            FractalKind::HeteroTerrain => {
                Self::HeteroTerrain(HeteroTerrain::new(noise, h, lacunarity, octaves, offset)?)
            }
            FractalKind::HybridMultiFractal => Self::HybridMultiFractal(HybridMultiFractal::new(
                noise, h, lacunarity, octaves, offset, gain,
            )?),
            FractalKind::RidgedMultiFractal => Self::RidgedMultiFractal(RidgedMultiFractal::new(
                noise, h, lacunarity, octaves, offset, gain,
            )?),
        })
    }

    #[must_use]
    pub const fn kind(&self) -> FractalKind {
        match self {
            Self::Fbm(_) => FractalKind::Fbm,
            Self::MultiFractal(_) => FractalKind::MultiFractal,
            Self::HeteroTerrain(_) => FractalKind::HeteroTerrain,
            Self::HybridMultiFractal(_) => FractalKind::HybridMultiFractal,
            Self::RidgedMultiFractal(_) => FractalKind::RidgedMultiFractal,
        }
    }
}

impl<N: NoiseGenerator + ?Sized> Musgrave for Fractal<'_, N> {
    fn evaluate(&self, p: Vec3d) -> f64 {
        match self {
            Self::Fbm(f) => f.evaluate(p),
            Self::MultiFractal(f) => f.evaluate(p),
            Self::HeteroTerrain(f) => f.evaluate(p),
            Self::HybridMultiFractal(f) => f.evaluate(p),
            Self::RidgedMultiFractal(f) => f.evaluate(p),
        }
    }
}

/// Builds the described combinator over `noise` and evaluates it once.
///
/// # Errors
/// See [`Fractal::new`]
pub fn fractal<N: NoiseGenerator + ?Sized>(
    params: &FractalParams,
    noise: &N,
    p: Vec3d,
) -> Result<f64, ConfigError> {
    Ok(Fractal::new(params, noise)?.evaluate(p))
}
