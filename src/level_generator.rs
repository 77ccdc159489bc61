//! Skiplists use a probabilistic distribution of pillar heights, whereby the
//! lowest level (level 0) contains every pillar, and each level $n > 0$
//! contains a random subset of the pillars on level $n - 1$.
//!
//! Most commonly, a geometric distribution is used whereby the chance that a
//! pillar reaches level $n$ is $p$ times the chance of reaching level $n-1$
//! (with $0 < p < 1$).
//!
//! It is very unlikely that this will need to be changed as the default should
//! suffice, but if need be custom level generators can be implemented, for
//! instance to replay a fixed sequence of heights.

pub mod geometric;

pub use geometric::{Geometric, GeometricError};

// ////////////////////////////////////////////////////////////////////////////
// Level Generator
// ////////////////////////////////////////////////////////////////////////////

/// Upon the insertion of a new event in the list, its pillar is given a height
/// as determined by a [`LevelGenerator`].
///
/// There is no upper bound on the height: the list grows its sentinels to
/// accommodate whatever is returned.
pub trait LevelGenerator {
    /// Generate the height of a new pillar.
    ///
    /// This function must _never_ return 0.
    #[must_use]
    fn height(&mut self) -> usize;
}

impl<G: LevelGenerator + ?Sized> LevelGenerator for Box<G> {
    #[inline]
    fn height(&mut self) -> usize {
        (**self).height()
    }
}

/// Replays a fixed list of heights, then falls back to height 1.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct Scripted {
    heights: std::collections::VecDeque<usize>,
}

#[cfg(test)]
impl Scripted {
    pub(crate) fn new(heights: impl IntoIterator<Item = usize>) -> Self {
        Scripted {
            heights: heights.into_iter().collect(),
        }
    }
}

#[cfg(test)]
impl LevelGenerator for Scripted {
    fn height(&mut self) -> usize {
        self.heights.pop_front().unwrap_or(1).max(1)
    }
}
