//! Two-component integer distributions.
//!
//! Several funnel quantities are a mix of two uniform ranges: conversion
//! delays (deliberate vs. impulse purchases) and time on site (engaged vs.
//! quick-bounce sessions).

use rand::Rng;
use std::ops::RangeInclusive;

/// With probability `primary_share` draw from `primary`, otherwise from
/// `secondary`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bimodal {
    pub primary_share: f64,
    pub primary: RangeInclusive<u32>,
    pub secondary: RangeInclusive<u32>,
}

impl Bimodal {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        if rng.gen_bool(self.primary_share) {
            rng.gen_range(self.primary.clone())
        } else {
            rng.gen_range(self.secondary.clone())
        }
    }

    /// Smallest value either component can produce.
    pub fn min(&self) -> u32 {
        (*self.primary.start()).min(*self.secondary.start())
    }

    /// Largest value either component can produce.
    pub fn max(&self) -> u32 {
        (*self.primary.end()).max(*self.secondary.end())
    }
}

/// Click-to-conversion delay in minutes: 70% within 7 days, 30% within 30 minutes.
pub fn conversion_delay_minutes() -> Bimodal {
    Bimodal {
        primary_share: 0.7,
        primary: 1..=60 * 24 * 7,
        secondary: 1..=30,
    }
}

/// Session length in seconds: 60% engaged, 40% quick bounce.
pub fn time_on_site_seconds() -> Bimodal {
    Bimodal {
        primary_share: 0.6,
        primary: 5..=600,
        secondary: 1..=5,
    }
}
