/// used for colors
pub type RgbD = glam::f64::DVec3;

/// used for points and direction vectors
pub type Vec3d = glam::f64::DVec3;
/// used for disk samples and other planar offsets
pub type Vec2d = glam::f64::DVec2;

/// A scalar field over 3D space. This is the capability every noise basis in this crate shares,
/// and the only thing the fractal combinators and [`crate::turbulence::turbulence`] need from a
/// basis.
///
/// Implementations must be pure functions of the point: no interior mutability, no caches.
/// That is what makes them safe to share between render threads without locking.
pub trait NoiseGenerator: Send + Sync {
    /// Evaluates the field at `p`.
    ///
    /// The range depends on the basis, see the documentation of each implementor.
    fn evaluate(&self, p: Vec3d) -> f64;

    /// Translates a point before it is fed into [`NoiseGenerator::evaluate`] by a consumer that
    /// samples many octaves. Identity for everything except [`crate::blender::BlenderNoise`].
    fn offset(&self, p: Vec3d) -> Vec3d {
        p
    }
}

impl<N: NoiseGenerator + ?Sized> NoiseGenerator for &N {
    fn evaluate(&self, p: Vec3d) -> f64 {
        (**self).evaluate(p)
    }

    fn offset(&self, p: Vec3d) -> Vec3d {
        (**self).offset(p)
    }
}

impl<N: NoiseGenerator + ?Sized> NoiseGenerator for Box<N> {
    fn evaluate(&self, p: Vec3d) -> f64 {
        (**self).evaluate(p)
    }

    fn offset(&self, p: Vec3d) -> Vec3d {
        (**self).offset(p)
    }
}

/// Rescales an unsigned basis (such as [`crate::cell::CellNoise`]) from `[0, 1]` to `[-1, 1]`.
#[must_use]
pub fn signed_noise<N: NoiseGenerator + ?Sized>(generator: &N, p: Vec3d) -> f64 {
    #[allow(clippy::suboptimal_flops)]
    {
        2.0 * generator.evaluate(p) - 1.0
    }
}

/// Adapter that remaps an unsigned basis to `[-1, 1]` on every evaluation, see [`signed_noise`].
///
/// The fractal combinators feed the raw output of their basis into the octave sum. Wrap
/// [`crate::cell::CellNoise`] or [`crate::voronoi::Voronoi`] in this to get a zero centered sum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Signed<N>(pub N);

impl<N: NoiseGenerator> NoiseGenerator for Signed<N> {
    fn evaluate(&self, p: Vec3d) -> f64 {
        signed_noise(&self.0, p)
    }

    fn offset(&self, p: Vec3d) -> Vec3d {
        self.0.offset(p)
    }
}
