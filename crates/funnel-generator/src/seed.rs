//! Per-entity random sources.
//!
//! Each unit of work gets its own `StdRng`, seeded from the run seed, the
//! stage it belongs to and a stable entity index. The RNG for entity N can
//! therefore be rebuilt on any thread without replaying entities 0..N.

use rand::rngs::StdRng;
use rand::SeedableRng;

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Generation stage an RNG is drawn for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Campaign,
    Impression,
    ClickSample,
    Click,
    ConversionSample,
    Conversion,
    Append,
}

impl Stage {
    fn salt(self) -> u64 {
        match self {
            Stage::Campaign => 1,
            Stage::Impression => 2,
            Stage::ClickSample => 3,
            Stage::Click => 4,
            Stage::ConversionSample => 5,
            Stage::Conversion => 6,
            Stage::Append => 7,
        }
    }
}

/// SplitMix64 finalizer.
fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Seed for entity `index` of `stage`.
pub fn entity_seed(seed: u64, stage: Stage, index: u64) -> u64 {
    let stage_seed = mix(seed ^ stage.salt().wrapping_mul(GOLDEN_GAMMA));
    mix(stage_seed.wrapping_add(index.wrapping_mul(GOLDEN_GAMMA)))
}

/// RNG for entity `index` of `stage`.
pub fn entity_rng(seed: u64, stage: Stage, index: u64) -> StdRng {
    StdRng::seed_from_u64(entity_seed(seed, stage, index))
}
