//! Blender compatible noise basis
//!
//! **NOTE: the `blender` feature must be enabled to use this code**
use crate::{improved_perlin::ImprovedPerlin, NoiseGenerator, Vec3d};

/// Gradient noise that, like Blender's original basis, is sampled one unit off the texture
/// coordinates. The field itself is [`ImprovedPerlin`]; only [`NoiseGenerator::offset`] differs.
///
/// Note that [`NoiseGenerator::evaluate`] does **not** apply the offset. Consumers that sample
/// several octaves (the Musgrave combinators and [`crate::turbulence::turbulence`]) call
/// [`NoiseGenerator::offset`] once on the input point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlenderNoise {
    basis: ImprovedPerlin,
}

impl BlenderNoise {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            basis: ImprovedPerlin::new(),
        }
    }
}

impl NoiseGenerator for BlenderNoise {
    fn evaluate(&self, p: Vec3d) -> f64 {
        self.basis.evaluate(p)
    }

    fn offset(&self, p: Vec3d) -> Vec3d {
        p + Vec3d::ONE
    }
}
