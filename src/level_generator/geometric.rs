//! Geometric level generator.

use rand::prelude::*;
use thiserror::Error;

use crate::level_generator::LevelGenerator;

/// Probability used by [`Geometric::default`]: each extra level is a fair coin
/// flip.
pub const DEFAULT_P: f64 = 0.5;

#[derive(Error, Debug, PartialEq, Eq)]
/// Errors that can occur when creating a [`Geometric`] level generator.
#[expect(
    clippy::module_name_repetitions,
    reason = "Using 'Error' would be too generic and may cause confusion."
)]
#[non_exhaustive]
pub enum GeometricError {
    /// The probability `$p$` must be in the range `$(0, 1)$`.
    #[error("p must be in (0, 1).")]
    InvalidProbability,
}

/// A level generator using a geometric distribution.
///
/// Starting from a height of 1, a biased coin is flipped and the height grows
/// by one for every success, stopping at the first failure. The probability
/// of a pillar having height `$k$` is therefore `$(1 - p) p^{k - 1}$`, which
/// for the default `$p = 1/2$` is `$(1/2)^k$`.
///
/// Each flip consumes one Bernoulli sample from a [`SmallRng`]. Seed it with
/// [`Geometric::with_seed`] to obtain a reproducible sequence of heights.
#[derive(Debug, Clone)]
pub struct Geometric {
    /// The probability that a pillar continues to the next level.
    p: f64,
    /// The random number generator.
    rng: SmallRng,
}

impl Geometric {
    /// Create a new geometric level generator with `p` as the probability that
    /// a given pillar continues to the next level. The generator is seeded
    /// from the thread-local random number generator.
    ///
    /// # Errors
    ///
    /// `p` must be strictly between 0 and 1.
    #[inline]
    pub fn new(p: f64) -> Result<Self, GeometricError> {
        Self::with_rng(p, SmallRng::from_rng(&mut rand::rng()))
    }

    /// Create a new geometric level generator whose sequence of heights is
    /// fully determined by `seed`.
    ///
    /// # Errors
    ///
    /// `p` must be strictly between 0 and 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use eventlist::{Geometric, LevelGenerator};
    ///
    /// let mut a = Geometric::with_seed(0.5, 42).unwrap();
    /// let mut b = Geometric::with_seed(0.5, 42).unwrap();
    /// assert_eq!(a.height(), b.height());
    /// ```
    #[inline]
    pub fn with_seed(p: f64, seed: u64) -> Result<Self, GeometricError> {
        Self::with_rng(p, SmallRng::seed_from_u64(seed))
    }

    /// A fair-coin generator (`$p = 1/2$`) seeded with `seed`.
    #[inline]
    #[must_use]
    pub fn fair(seed: u64) -> Self {
        Geometric {
            p: DEFAULT_P,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    fn with_rng(p: f64, rng: SmallRng) -> Result<Self, GeometricError> {
        if !(0.0 < p && p < 1.0) {
            return Err(GeometricError::InvalidProbability);
        }
        Ok(Geometric { p, rng })
    }

    /// The probability that a pillar continues to the next level.
    #[inline]
    #[must_use]
    pub fn probability(&self) -> f64 {
        self.p
    }
}

impl Default for Geometric {
    /// A fair-coin generator seeded from the thread-local generator.
    #[inline]
    fn default() -> Self {
        Geometric {
            p: DEFAULT_P,
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }
}

impl LevelGenerator for Geometric {
    #[inline]
    fn height(&mut self) -> usize {
        let mut h = 1;
        while self.rng.random_bool(self.p) {
            h += 1;
        }
        h
    }
}
