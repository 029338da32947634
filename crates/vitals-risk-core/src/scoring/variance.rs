//! Sources of the multiplicative variance applied to each probability.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::JitterRange;

/// Draws a variance multiplier. Implementations must be safe to share
/// between threads, since one engine may serve concurrent callers.
pub trait VarianceSource: Send + Sync {
    fn multiplier(&self, range: JitterRange) -> f64;
}

/// Uniform draw from the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngVariance;

impl VarianceSource for ThreadRngVariance {
    fn multiplier(&self, range: JitterRange) -> f64 {
        sample(&mut rand::thread_rng(), range)
    }
}

/// Reproducible uniform draws from a seeded generator.
#[derive(Debug)]
pub struct SeededVariance {
    rng: Mutex<StdRng>,
}

impl SeededVariance {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl VarianceSource for SeededVariance {
    fn multiplier(&self, range: JitterRange) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        sample(&mut *rng, range)
    }
}

/// Always returns the same multiplier, ignoring the configured range.
/// `FixedVariance(1.0)` disables perturbation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedVariance(pub f64);

impl FixedVariance {
    pub fn neutral() -> Self {
        Self(1.0)
    }
}

impl VarianceSource for FixedVariance {
    fn multiplier(&self, _range: JitterRange) -> f64 {
        self.0
    }
}

fn sample<R: Rng + ?Sized>(rng: &mut R, range: JitterRange) -> f64 {
    if range.min >= range.max {
        return range.min;
    }
    rng.gen_range(range.min..=range.max)
}
