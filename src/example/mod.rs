//! Deterministic example-value generation.
//!
//! One seeded RNG stream per generation run, owned by the pipeline driver
//! and threaded through strategy execution order. Same seed + same call
//! sequence = same values; reordering strategies legitimately changes the
//! output.

mod generator;

pub use generator::*;
