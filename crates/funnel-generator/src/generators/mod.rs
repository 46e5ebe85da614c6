//! Shared value generators used by the four stages.
//!
//! These are the building blocks the stage generators draw from: categorical
//! picks, rounded money amounts, timestamps, bimodal ranges, subset sampling
//! and fake text.

pub mod bimodal;
pub mod sampling;
pub mod text;
pub mod timestamp;

use rand::Rng;

/// Pick a value uniformly from a non-empty vocabulary.
pub fn pick<R: Rng + ?Sized, T: Copy>(rng: &mut R, values: &[T]) -> T {
    values[rng.gen_range(0..values.len())]
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Uniform amount in `[min, max]`, rounded to `places`.
pub fn amount<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64, places: i32) -> f64 {
    round_to(rng.gen_range(min..=max), places)
}
