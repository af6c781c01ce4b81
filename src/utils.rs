use crate::Vec3d;

pub trait FloatExt {
    fn sq(self) -> Self;
    fn lerp(self, other: Self, t: Self) -> Self;
}

impl FloatExt for f64 {
    fn sq(self) -> Self {
        self * self
    }
    fn lerp(self, other: Self, t: Self) -> Self {
        #[allow(clippy::suboptimal_flops)]
        {
            self + t * (other - self)
        }
    }
}

pub fn pow5(v: f64) -> f64 {
    let v2 = v * v;
    v2 * v2 * v
}

/// Integer lattice coordinates of the unit cell containing `p`. Saturates at the `i64` range,
/// which is far beyond the point where an `f64` still has a fractional part.
#[allow(clippy::cast_possible_truncation)]
pub fn lattice_cell(p: Vec3d) -> (i64, i64, i64) {
    (p.x.floor() as i64, p.y.floor() as i64, p.z.floor() as i64)
}

/// Avalanche step for the lattice hash
pub const fn mix_u32(mut x: u32) -> u32 {
    x = (x ^ 61) ^ (x >> 16);
    x = x.wrapping_add(x << 3);
    x ^= x >> 4;
    x = x.wrapping_mul(0x27d4_eb2d);
    x ^= x >> 15;
    x
}

/// Hash of an integer lattice cell. Shared by cell noise and the voronoi feature points, so both
/// agree on what "the random value of a cell" is. Only the low 32 bits of each coordinate are
/// hashed, so the pattern repeats every `2^32` cells.
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub const fn lattice_hash(ix: i64, iy: i64, iz: i64) -> u32 {
    mix_u32(
        (ix as u32).wrapping_mul(73_856_093)
            ^ (iy as u32).wrapping_mul(19_349_663)
            ^ (iz as u32).wrapping_mul(83_492_791),
    )
}

/// Maps a hash to `[0, 1)` using its high 24 bits
pub fn hash_to_unit(hash: u32) -> f64 {
    f64::from(hash >> 8) / f64::from(1_u32 << 24)
}

/// Three independent unit values for a cell, derived from [`lattice_hash`]
pub const fn lattice_hash3(ix: i64, iy: i64, iz: i64) -> [u32; 3] {
    let h0 = lattice_hash(ix, iy, iz);
    let h1 = mix_u32(h0 ^ 0x9e37_79b9);
    let h2 = mix_u32(h1 ^ 0x85eb_ca6b);
    [h0, h1, h2]
}
