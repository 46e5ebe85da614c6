//! Subset sampling over an upstream table.
//!
//! Clicks and conversions are a simple random subset of their parent rows:
//! exactly `round(rate × population)` distinct rows, drawn once from a single
//! seeded RNG before any row is generated.

use rand::seq::index;
use rand::Rng;

/// Size of a subset drawn at `rate` from `population` rows.
pub fn subset_size(population: usize, rate: f64) -> usize {
    let size = (population as f64 * rate).round();
    if size <= 0.0 {
        0
    } else {
        (size as usize).min(population)
    }
}

/// Draw row indices without replacement, returned in ascending order.
pub fn sample_subset<R: Rng + ?Sized>(rng: &mut R, population: usize, rate: f64) -> Vec<usize> {
    let amount = subset_size(population, rate);
    let mut selected = index::sample(rng, population, amount).into_vec();
    selected.sort_unstable();
    selected
}
