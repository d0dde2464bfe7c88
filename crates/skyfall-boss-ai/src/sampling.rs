//! Random draws over configured ranges.

use rand::Rng;

use skyfall_core::config::{CountRange, MsRange};

/// Uniform draw in `[min, max]`. Degenerate ranges return `min`.
pub fn between<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max <= min {
        min
    } else {
        rng.gen_range(min..=max)
    }
}

pub fn duration<R: Rng + ?Sized>(rng: &mut R, range: &MsRange) -> f64 {
    between(rng, range.min, range.max)
}

pub fn count<R: Rng + ?Sized>(rng: &mut R, range: &CountRange) -> u32 {
    if range.max <= range.min {
        range.min
    } else {
        rng.gen_range(range.min..=range.max)
    }
}

/// Symmetric jitter in `[-spread/2, spread/2)`.
pub fn jitter<R: Rng + ?Sized>(rng: &mut R, spread: f64) -> f64 {
    (rng.gen::<f64>() - 0.5) * spread
}
