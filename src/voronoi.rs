//! Voronoi (Worley) cellular basis with selectable feature and distance metric
//!
//! **NOTE: the `voronoi` feature must be enabled to use this code**
//!
//! Every unit lattice cell holds exactly one pseudo random feature point. A query visits the
//! cell containing the point and its 26 neighbours and keeps the four nearest features, sorted by
//! distance.
use crate::{
    error::{ensure_finite, rejected, ConfigError},
    utils::{hash_to_unit, lattice_cell, lattice_hash3},
    NoiseGenerator, Vec3d,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Exponent used for [`DistanceMetric::Minkowski`] when a scene does not specify one
pub const DEFAULT_MINKOWSKI_EXPONENT: f64 = 2.5;

/// How the distance between a point and a feature point is measured
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DistanceMetric {
    /// `sqrt(dx² + dy² + dz²)`
    #[default]
    Euclidean,
    /// `dx² + dy² + dz²`, same ordering as euclidean but cheaper and with rounder cells
    Squared,
    /// `|dx| + |dy| + |dz|`
    Manhattan,
    /// `max(|dx|, |dy|, |dz|)`
    Chebyshev,
    /// Minkowski distance with exponent `0.5`, star shaped cells
    MinkowskiHalf,
    /// Minkowski distance with exponent `4`, rounded box cells
    MinkowskiFour,
    /// Minkowski distance with an arbitrary positive exponent. Slow, since it uses `powf`.
    Minkowski(f64),
}

impl DistanceMetric {
    /// Checks that the metric is well defined. Only [`DistanceMetric::Minkowski`] carries a
    /// parameter that can be invalid.
    ///
    /// # Errors
    /// Fails for a non positive or non finite minkowski exponent
    pub fn validate(self) -> Result<Self, ConfigError> {
        if let Self::Minkowski(exponent) = self {
            ensure_finite("minkowski exponent", exponent)?;
            if exponent <= 0.0 {
                return Err(rejected(ConfigError::NonPositiveMinkowskiExponent(exponent)));
            }
        }
        Ok(self)
    }

    /// Distance of the offset `(dx, dy, dz)`. Always non negative.
    #[must_use]
    #[allow(clippy::suboptimal_flops)]
    pub fn distance(self, dx: f64, dy: f64, dz: f64) -> f64 {
        match self {
            Self::Euclidean => (dx * dx + dy * dy + dz * dz).sqrt(),
            Self::Squared => dx * dx + dy * dy + dz * dz,
            Self::Manhattan => dx.abs() + dy.abs() + dz.abs(),
            Self::Chebyshev => dx.abs().max(dy.abs()).max(dz.abs()),
            Self::MinkowskiHalf => {
                let d = dx.abs().sqrt() + dy.abs().sqrt() + dz.abs().sqrt();
                d * d
            }
            Self::MinkowskiFour => {
                let (x, y, z) = (dx * dx, dy * dy, dz * dz);
                (x * x + y * y + z * z).sqrt().sqrt()
            }
            Self::Minkowski(e) => {
                (dx.abs().powf(e) + dy.abs().powf(e) + dz.abs().powf(e)).powf(e.recip())
            }
        }
    }

    fn distance_vec(self, d: Vec3d) -> f64 {
        self.distance(d.x, d.y, d.z)
    }
}

/// Which quantity of the nearest features [`Voronoi::evaluate`] returns
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VoronoiFeature {
    /// distance to the nearest feature
    #[default]
    F1,
    /// distance to the second nearest feature
    F2,
    /// distance to the third nearest feature
    F3,
    /// distance to the fourth nearest feature
    F4,
    /// `F2 - F1`, zero on cell borders
    F2F1,
    /// `F2 - F1` scaled by ten and clipped to one, thin dark cracks on a flat background
    Crackle,
}

/// Plain data description of a [`Voronoi`] generator
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VoronoiParams {
    pub feature: VoronoiFeature,
    pub metric: DistanceMetric,
}

/// The four nearest feature points of a query, ordered by ascending distance.
///
/// Index 0 is the nearest feature. Equal distances keep the order in which the cells were
/// visited.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Features {
    pub distances: [f64; 4],
    pub points: [Vec3d; 4],
}

impl Features {
    const fn empty() -> Self {
        Self {
            distances: [f64::INFINITY; 4],
            points: [Vec3d::ZERO; 4],
        }
    }

    /// Distance to the feature with the given rank, `0` being the nearest
    #[must_use]
    pub fn distance(&self, rank: usize) -> Option<f64> {
        self.distances.get(rank).copied()
    }

    /// Position of the feature with the given rank, `0` being the nearest
    #[must_use]
    pub fn point(&self, rank: usize) -> Option<Vec3d> {
        self.points.get(rank).copied()
    }

    /// Inserts a candidate, keeping the arrays sorted and dropping whatever falls off the end
    fn insert(&mut self, distance: f64, point: Vec3d) {
        if distance >= self.distances[3] {
            return;
        }
        let mut slot = 3;
        while slot > 0 && distance < self.distances[slot - 1] {
            self.distances[slot] = self.distances[slot - 1];
            self.points[slot] = self.points[slot - 1];
            slot -= 1;
        }
        self.distances[slot] = distance;
        self.points[slot] = point;
    }
}

/// The feature point of a lattice cell. Stays strictly inside the cell.
#[allow(clippy::cast_precision_loss)]
fn feature_point(ix: i64, iy: i64, iz: i64) -> Vec3d {
    let [hx, hy, hz] = lattice_hash3(ix, iy, iz);
    Vec3d::new(
        ix as f64 + hash_to_unit(hx),
        iy as f64 + hash_to_unit(hy),
        iz as f64 + hash_to_unit(hz),
    )
}

/// Cellular noise.
///
/// The range depends on the metric. With [`DistanceMetric::Euclidean`], `F1` is at most
/// `sqrt(3)`. [`VoronoiFeature::Crackle`] is always in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Voronoi {
    feature: VoronoiFeature,
    metric: DistanceMetric,
}

impl Voronoi {
    /// # Errors
    /// Fails if `metric` is a [`DistanceMetric::Minkowski`] with a non positive or non finite
    /// exponent
    pub fn new(feature: VoronoiFeature, metric: DistanceMetric) -> Result<Self, ConfigError> {
        Ok(Self {
            feature,
            metric: metric.validate()?,
        })
    }

    /// # Errors
    /// See [`Voronoi::new`]
    pub fn from_params(params: &VoronoiParams) -> Result<Self, ConfigError> {
        Self::new(params.feature, params.metric)
    }

    #[must_use]
    pub const fn feature(&self) -> VoronoiFeature {
        self.feature
    }

    #[must_use]
    pub const fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Returns the four nearest feature points to `p`, sorted by distance
    #[must_use]
    pub fn features(&self, p: Vec3d) -> Features {
        let (cx, cy, cz) = lattice_cell(p);
        let mut features = Features::empty();
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let point = feature_point(
                        cx.saturating_add(dx),
                        cy.saturating_add(dy),
                        cz.saturating_add(dz),
                    );
                    features.insert(self.metric.distance_vec(p - point), point);
                }
            }
        }
        features
    }
}

impl NoiseGenerator for Voronoi {
    fn evaluate(&self, p: Vec3d) -> f64 {
        let Features { distances: d, .. } = self.features(p);
        match self.feature {
            VoronoiFeature::F1 => d[0],
            VoronoiFeature::F2 => d[1],
            VoronoiFeature::F3 => d[2],
            VoronoiFeature::F4 => d[3],
            VoronoiFeature::F2F1 => d[1] - d[0],
            VoronoiFeature::Crackle => (10.0 * (d[1] - d[0])).min(1.0),
        }
    }
}
