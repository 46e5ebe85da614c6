//! Human-readable text fields.
//!
//! Names, places and URLs come from `fake`, driven by the caller's RNG so the
//! text is as reproducible as every other field.

use fake::faker::address::en::{CityName, CountryCode};
use fake::faker::company::en::{Bs, BsNoun, Buzzword, CompanyName};
use fake::faker::internet::en::DomainSuffix;
use fake::faker::lorem::en::Word;
use fake::Fake;
use rand::Rng;

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Campaign name such as `Adaptive Synergies Campaign`.
pub fn campaign_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let buzzword: String = Buzzword().fake_with_rng(rng);
    let noun: String = BsNoun().fake_with_rng(rng);
    format!("{} {} Campaign", capitalize(&buzzword), capitalize(&noun))
}

pub fn advertiser_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    CompanyName().fake_with_rng(rng)
}

pub fn advertiser_industry<R: Rng + ?Sized>(rng: &mut R) -> String {
    Bs().fake_with_rng(rng)
}

/// Two-letter country code.
pub fn country_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    CountryCode().fake_with_rng(rng)
}

pub fn city<R: Rng + ?Sized>(rng: &mut R) -> String {
    CityName().fake_with_rng(rng)
}

/// `https://www.<word>.<suffix>/<word>`
pub fn url<R: Rng + ?Sized>(rng: &mut R) -> String {
    let host: String = Word().fake_with_rng(rng);
    let suffix: String = DomainSuffix().fake_with_rng(rng);
    let path: String = Word().fake_with_rng(rng);
    format!("https://www.{host}.{suffix}/{path}")
}
