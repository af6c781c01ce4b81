//! A closed set of every noise basis in this crate, buildable from plain parameters.
//!
//! Generic code should take `N: NoiseGenerator` directly. [`Noise`] exists for the case where
//! the basis is only known at runtime, for example when it comes from a scene description.
#[cfg(feature = "blender")]
use crate::blender::BlenderNoise;
#[cfg(feature = "cell")]
use crate::cell::CellNoise;
#[cfg(feature = "improved-perlin")]
use crate::improved_perlin::ImprovedPerlin;
#[cfg(feature = "perlin")]
use crate::perlin::Perlin;
#[cfg(feature = "voronoi")]
use crate::voronoi::{Voronoi, VoronoiParams};
use crate::{error::ConfigError, rng::DEFAULT_SEED, NoiseGenerator, Vec3d};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Selects a noise basis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NoiseKind {
    #[cfg(feature = "perlin")]
    Perlin,
    #[cfg(feature = "improved-perlin")]
    ImprovedPerlin,
    #[cfg(feature = "blender")]
    Blender,
    #[cfg(feature = "cell")]
    Cell,
    #[cfg(feature = "voronoi")]
    Voronoi,
}

/// Plain data description of a [`Noise`]. Fields that do not apply to `kind` are ignored.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NoiseParams {
    pub kind: NoiseKind,
    /// Seed for the gradient table of [`NoiseKind::Perlin`]
    pub seed: i32,
    #[cfg(feature = "voronoi")]
    pub voronoi: VoronoiParams,
}

#[cfg(feature = "improved-perlin")]
impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            kind: NoiseKind::ImprovedPerlin,
            seed: DEFAULT_SEED,
            #[cfg(feature = "voronoi")]
            voronoi: VoronoiParams::default(),
        }
    }
}

impl NoiseParams {
    #[must_use]
    pub fn new(kind: NoiseKind) -> Self {
        Self {
            kind,
            seed: DEFAULT_SEED,
            #[cfg(feature = "voronoi")]
            voronoi: VoronoiParams::default(),
        }
    }
}

/// Any noise basis of this crate
#[derive(Clone, Debug, PartialEq)]
pub enum Noise {
    #[cfg(feature = "perlin")]
    Perlin(Perlin),
    #[cfg(feature = "improved-perlin")]
    ImprovedPerlin(ImprovedPerlin),
    #[cfg(feature = "blender")]
    Blender(BlenderNoise),
    #[cfg(feature = "cell")]
    Cell(CellNoise),
    #[cfg(feature = "voronoi")]
    Voronoi(Voronoi),
}

impl Noise {
    /// Builds the basis described by `params`.
    ///
    /// # Errors
    /// Fails if the voronoi distance metric is invalid, see [`Voronoi::new`]
    pub fn from_params(params: &NoiseParams) -> Result<Self, ConfigError> {
        log::debug!("building {:?} noise", params.kind);
        Ok(match params.kind {
            #[cfg(feature = "perlin")]
            NoiseKind::Perlin => Self::Perlin(Perlin::with_seed(params.seed)),
            #[cfg(feature = "improved-perlin")]
            NoiseKind::ImprovedPerlin => Self::ImprovedPerlin(ImprovedPerlin::new()),
            #[cfg(feature = "blender")]
            NoiseKind::Blender => Self::Blender(BlenderNoise::new()),
            #[cfg(feature = "cell")]
            NoiseKind::Cell => Self::Cell(CellNoise),
            #[cfg(feature = "voronoi")]
            NoiseKind::Voronoi => Self::Voronoi(Voronoi::from_params(&params.voronoi)?),
        })
    }

    #[must_use]
    pub const fn kind(&self) -> NoiseKind {
        match self {
            #[cfg(feature = "perlin")]
            Self::Perlin(_) => NoiseKind::Perlin,
            #[cfg(feature = "improved-perlin")]
            Self::ImprovedPerlin(_) => NoiseKind::ImprovedPerlin,
            #[cfg(feature = "blender")]
            Self::Blender(_) => NoiseKind::Blender,
            #[cfg(feature = "cell")]
            Self::Cell(_) => NoiseKind::Cell,
            #[cfg(feature = "voronoi")]
            Self::Voronoi(_) => NoiseKind::Voronoi,
        }
    }
}

impl NoiseGenerator for Noise {
    fn evaluate(&self, p: Vec3d) -> f64 {
        match self {
            #[cfg(feature = "perlin")]
            Self::Perlin(n) => n.evaluate(p),
            #[cfg(feature = "improved-perlin")]
            Self::ImprovedPerlin(n) => n.evaluate(p),
            #[cfg(feature = "blender")]
            Self::Blender(n) => n.evaluate(p),
            #[cfg(feature = "cell")]
            Self::Cell(n) => n.evaluate(p),
            #[cfg(feature = "voronoi")]
            Self::Voronoi(n) => n.evaluate(p),
        }
    }

    fn offset(&self, p: Vec3d) -> Vec3d {
        match self {
            #[cfg(feature = "perlin")]
            Self::Perlin(n) => n.offset(p),
            #[cfg(feature = "improved-perlin")]
            Self::ImprovedPerlin(n) => n.offset(p),
            #[cfg(feature = "blender")]
            Self::Blender(n) => n.offset(p),
            #[cfg(feature = "cell")]
            Self::Cell(n) => n.offset(p),
            #[cfg(feature = "voronoi")]
            Self::Voronoi(n) => n.offset(p),
        }
    }
}

/// Builds the described basis and evaluates it once.
///
/// Convenient for one-off lookups. Building a [`NoiseKind::Perlin`] generates its gradient
/// table, so callers that sample many points should keep a [`Noise`] around instead.
///
/// # Errors
/// See [`Noise::from_params`]
pub fn noise(params: &NoiseParams, p: Vec3d) -> Result<f64, ConfigError> {
    Ok(Noise::from_params(params)?.evaluate(p))
}
