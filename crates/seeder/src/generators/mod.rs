//! Randomized content generators.
//!
//! Every generator takes an explicit `rng`, so callers control the randomness
//! source and tests can pass a seeded generator for reproducible output:
//! - [`lorem::generate`]: pseudo-Latin filler text with bounded word counts
//! - [`dates::random_between`]: uniform timestamps within a closed range
//! - [`urls::random_url`]: plausible-looking synthetic author URLs

pub mod dates;
pub mod lorem;
pub mod urls;
