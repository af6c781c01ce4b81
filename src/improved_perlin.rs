//! Ken Perlin's improved gradient noise (SIGGRAPH 2002)
//!
//! **NOTE: the `improved-perlin` feature must be enabled to use this code**
use crate::{utils::FloatExt, NoiseGenerator, Vec3d};

/// Reference permutation from Ken Perlin's Java implementation. Changing a single entry changes
/// the whole field, so this must stay verbatim.
const PERM: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

#[inline]
fn perm(i: usize) -> usize {
    PERM[i & 255] as usize
}

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3`, C2 continuous at the lattice
#[inline]
#[must_use]
pub fn fade(t: f64) -> f64 {
    #[allow(clippy::suboptimal_flops)]
    {
        t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
    }
}

/// Dot product of the offset with one of 12 edge-midpoint gradients, chosen by the low 4 bits
/// of the hash (the 4 surplus codes repeat directions).
#[inline]
#[must_use]
pub fn grad(hash: usize, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

/// Improved Perlin noise.
///
/// Returns values in roughly `[-1, 1]` (the exact bound of the 12 gradient variant is a little
/// above one but it is practically never reached). The value is exactly zero at every integer
/// lattice point. The field repeats every 256 units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImprovedPerlin;

impl ImprovedPerlin {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl NoiseGenerator for ImprovedPerlin {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn evaluate(&self, p: Vec3d) -> f64 {
        let floor = p.floor();
        // wrapping to the table period also works for negative cells
        let xi = (floor.x as i64 & 255) as usize;
        let yi = (floor.y as i64 & 255) as usize;
        let zi = (floor.z as i64 & 255) as usize;

        let Vec3d { x, y, z } = p - floor;
        let u = fade(x);
        let v = fade(y);
        let w = fade(z);

        let a = perm(xi) + yi;
        let aa = perm(a) + zi;
        let ab = perm(a + 1) + zi;
        let b = perm(xi + 1) + yi;
        let ba = perm(b) + zi;
        let bb = perm(b + 1) + zi;

        let x1 = grad(perm(aa), x, y, z).lerp(grad(perm(ba), x - 1.0, y, z), u);
        let x2 = grad(perm(ab), x, y - 1.0, z).lerp(grad(perm(bb), x - 1.0, y - 1.0, z), u);
        let y1 = x1.lerp(x2, v);

        let x1 = grad(perm(aa + 1), x, y, z - 1.0).lerp(grad(perm(ba + 1), x - 1.0, y, z - 1.0), u);
        let x2 = grad(perm(ab + 1), x, y - 1.0, z - 1.0)
            .lerp(grad(perm(bb + 1), x - 1.0, y - 1.0, z - 1.0), u);
        let y2 = x1.lerp(x2, v);

        y1.lerp(y2, w)
    }
}

#[cfg(test)]
mod tests {
    use super::{fade, ImprovedPerlin};
    use crate::{
        test_utils::{self, assert_eq_approx_abs},
        NoiseGenerator, Vec3d,
    };

    #[test]
    fn reference_value() {
        // the value printed by Ken Perlin's Java reference for (3.14, 42, 7)
        let value = ImprovedPerlin.evaluate(Vec3d::new(3.14, 42.0, 7.0));
        assert_eq_approx_abs!(value, 0.136_919_958_784_000_12, 1e-12);
        let value = ImprovedPerlin.evaluate(Vec3d::new(-1.25, 2.5, 0.75));
        assert_eq_approx_abs!(value, -0.161_218_166_351_318_36, 1e-12);
    }

    #[test]
    fn zero_on_lattice() {
        for p in test_utils::lattice_points(6) {
            assert_eq!(ImprovedPerlin.evaluate(p), 0.0, "{p:?}");
        }
        // far away cells, including the table wrap
        for p in [
            Vec3d::new(256.0, -512.0, 1000.0),
            Vec3d::new(-1_000_000.0, 3.0, 255.0),
        ] {
            assert_eq!(ImprovedPerlin.evaluate(p), 0.0, "{p:?}");
        }
    }

    #[test]
    fn range_and_mean() {
        let mean = test_utils::test_noise_range(&ImprovedPerlin, -1.05, 1.05, 200_000);
        assert_eq_approx_abs!(mean, 0.0, 0.02);
    }

    #[test]
    fn periodic_in_256() {
        let p = Vec3d::new(0.3, 17.25, -4.6);
        let shifted = p + Vec3d::new(256.0, -256.0, 512.0);
        assert_eq_approx_abs!(
            ImprovedPerlin.evaluate(p),
            ImprovedPerlin.evaluate(shifted),
            1e-9
        );
    }

    #[test]
    fn fade_is_smooth_step() {
        assert_eq!(fade(0.0), 0.0);
        assert_eq!(fade(1.0), 1.0);
        assert_eq!(fade(0.5), 0.5);
    }

    #[test]
    fn continuity() {
        test_utils::test_continuity(&ImprovedPerlin, 8.0);
    }

    #[test]
    fn parallel_determinism() {
        test_utils::test_parallel_determinism(&ImprovedPerlin);
    }
}
