//! Random variate generation
//!
//! A small, dependency-free library of reproducible random variates:
//!
//! - [`UnitRandom`]: the Park-Miller minimal standard generator over [0, 1)
//! - [`UniformRandom`], [`NormalRandom`], [`ExponentialRandom`]
//! - [`WeibullRandom`], [`GammaRandom`], [`PearsonVRandom`]
//!
//! Generators are plain values. They start from fixed seeds, so two
//! generators built with the same parameters produce the same sequence
//! until one of them is reseeded.

pub mod families;
pub mod unit;

pub use families::{
    ExponentialRandom, GammaRandom, NormalRandom, PearsonVRandom, UniformRandom, WeibullRandom,
};
pub use unit::{DEFAULT_SEED, HALFWAY_SEED, MODULUS, STREAM_SEEDS, UnitRandom};

/// A source of real-valued random variates
pub trait Variate {
    /// Draw the next value
    fn sample(&mut self) -> f64;
}

impl Variate for UnitRandom {
    fn sample(&mut self) -> f64 {
        self.next_real()
    }
}
