#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::nursery)]
#![warn(clippy::suboptimal_flops)]
#![deny(clippy::return_self_not_must_use)]
#![allow(clippy::similar_names)]
#![deny(clippy::semicolon_if_nothing_returned)]
#![deny(clippy::must_use_candidate)]
#![deny(clippy::double_must_use)]
#![deny(clippy::use_self)]
#![deny(clippy::unreadable_literal)]
#![deny(clippy::explicit_iter_loop)]
// these are lints to enable later
#![allow(clippy::cast_lossless)]

//! This crate provides the procedural building blocks of a shading system: noise bases,
//! fractal combinators over them and the geometric helpers a raytracer needs around reflection
//! and direction sampling.
//!
//! # Design Decisions
//! **NOTE: This crate is pretty much in alpha state. Therefore a lot of the following things may
//! or may not change in the future**
//!
//! Everything is computed in [f64]s and built on [glam] for vector math.
//!
//! Every noise basis implements [`NoiseGenerator`]. Generators are immutable after construction
//! and evaluation is a pure function of the point. Therefore a generator can be shared between any
//! number of render threads without locking. The Voronoi basis returns all four nearest features
//! as a value ([`voronoi::Features`]) instead of caching them on the generator.
//!
//! Randomness is explicit. There is no process wide random state: [`rng::Rng`] is a small value
//! you keep per thread or per sample, and the sampling functions take their uniform numbers as
//! arguments. Only the construction of [`perlin::Perlin`] consumes random numbers internally, from
//! a seed you choose.
//!
//! Construction is the only place where things can go wrong. Parameters that can not produce a
//! sensible field, such as a negative lacunarity, are rejected with a [`ConfigError`]. Evaluating
//! a constructed generator or combinator never fails. Rejected configurations are also reported
//! through the [log] facade.
//!
//! Most bases are behind cargo features, all of them enabled by default.
//!
//! # References
//! * Ken Perlin. An image synthesizer. *SIGGRAPH Computer Graphics, 19(3)*, 1985.
//! * Ken Perlin. Improving noise. *ACM Transactions on Graphics, 21(3)*, 2002.
//!     <https://mrl.cs.nyu.edu/~perlin/noise/>
//! * Steven Worley. A cellular texture basis function. In *Proceedings of SIGGRAPH*, 1996.
//! * David S. Ebert, F. Kenton Musgrave, Darwyn Peachey, Ken Perlin, Steven Worley. *Texturing and
//!     Modeling: A Procedural Approach*, 3rd edition, 2003.
//! * Stephen K. Park and Keith W. Miller. Random number generators: good ones are hard to find.
//!     *Communications of the ACM, 31(10)*, 1988.
//! * Peter Shirley and Kenneth Chiu. A low distortion map between disk and square. *Journal of
//!     Graphics Tools, 2(3)*, 1997.
//! * Christophe Schlick. An inexpensive BRDF model for physically-based rendering. *Computer
//!     Graphics Forum, 13(3)*, 1994.
//! * Blenders procedural textures: <https://github.com/blender/blender/blob/main/source/blender/blenlib/intern/noise.cc>

mod core;

pub use core::{signed_noise, NoiseGenerator, RgbD, Signed, Vec2d, Vec3d};
pub use error::ConfigError;

#[cfg(test)]
pub(crate) mod test_utils;
pub(crate) mod utils;

pub mod error;
pub mod noise;
pub mod reflectance;
pub mod rng;
pub mod sampling;

#[cfg(feature = "blender")]
pub mod blender;
#[cfg(feature = "cell")]
pub mod cell;
#[cfg(feature = "improved-perlin")]
pub mod improved_perlin;
#[cfg(feature = "musgrave")]
pub mod musgrave;
#[cfg(feature = "perlin")]
pub mod perlin;
#[cfg(feature = "turbulence")]
pub mod turbulence;
#[cfg(feature = "voronoi")]
pub mod voronoi;

#[cfg(feature = "turbulence")]
pub use turbulence::turbulence;
