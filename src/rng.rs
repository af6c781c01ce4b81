//! Minimal standard linear congruential generator (Park & Miller).
//!
//! The generator state is a single integer in `1..M`. There is no process wide instance: either
//! keep an [`Rng`] per worker or thread a plain `i32` seed through [`next_with_state`].

/// Multiplier, `7^5`
const A: i32 = 16_807;
/// Modulus, `2^31 - 1`
const M: i32 = 2_147_483_647;
/// Schrage decomposition `M = A * Q + R`
const Q: i32 = M / A;
const R: i32 = M % A;

/// The seed used by [`Rng::default`]. Also substituted for seeds that are `0 mod M`.
pub const DEFAULT_SEED: i32 = 123_212;

/// Largest value [`Rng::next_u31`] can return
pub const MAX_STATE: i32 = M - 1;

/// A deterministic generator of uniform floats in the open interval `(0, 1)`.
///
/// For a given seed the produced sequence is exactly reproducible across platforms, since only
/// 32 bit integer arithmetic is involved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rng {
    seed: i32,
}

impl Default for Rng {
    fn default() -> Self {
        Self { seed: DEFAULT_SEED }
    }
}

impl Rng {
    /// Creates a generator. Any `i32` is accepted, see [`sanitize_seed`] for how it is mapped into
    /// the valid state range.
    #[must_use]
    pub fn new(seed: i32) -> Self {
        Self {
            seed: sanitize_seed(seed),
        }
    }

    /// The current state. Feeding it back into [`Rng::new`] continues the same sequence.
    #[must_use]
    pub const fn seed(&self) -> i32 {
        self.seed
    }

    /// Advances the state and returns it, a value in `1..=MAX_STATE`
    pub fn next_u31(&mut self) -> i32 {
        self.seed = step(self.seed);
        self.seed
    }

    /// Advances the state and returns a uniform float in `(0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u31()) / f64::from(M)
    }

    /// Uniform integer in `0..bound`. `bound` must not be zero.
    #[allow(clippy::cast_sign_loss)]
    pub fn next_below(&mut self, bound: u32) -> u32 {
        assert!(bound > 0);
        (self.next_u31() as u32 - 1) % bound
    }
}

/// Steps a caller owned seed and returns the next float in `(0, 1)`.
///
/// This is the variant for code that already keeps its own per sample or per thread seed. The
/// seed is sanitized first, so passing `0` behaves like passing [`DEFAULT_SEED`].
pub fn next_with_state(seed: &mut i32) -> f64 {
    *seed = step(sanitize_seed(*seed));
    f64::from(*seed) / f64::from(M)
}

/// Maps an arbitrary integer into the state range `1..M`.
///
/// The recurrence is stuck at zero, so seeds congruent to `0 mod M` are replaced by
/// [`DEFAULT_SEED`]. Negative seeds are reduced with euclidean remainder.
#[must_use]
pub fn sanitize_seed(seed: i32) -> i32 {
    let reduced = seed.rem_euclid(M);
    if reduced == 0 {
        log::debug!("seed {seed} is degenerate, using {DEFAULT_SEED}");
        DEFAULT_SEED
    } else {
        if reduced != seed {
            log::debug!("seed {seed} reduced to {reduced}");
        }
        reduced
    }
}

/// `A * seed mod M` without overflowing 32 bits (Schrage's method)
const fn step(seed: i32) -> i32 {
    let next = A * (seed % Q) - R * (seed / Q);
    if next < 0 {
        next + M
    } else {
        next
    }
}
