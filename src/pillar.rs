use crate::arena::PillarId;
use crate::event::{Event, Key};

// ////////////////////////////////////////////////////////////////////////////
// Pillar
// ////////////////////////////////////////////////////////////////////////////

/// What a pillar stands for: one of the two sentinels, or a real event.
#[derive(Debug)]
pub(crate) enum Content {
    Head,
    Event(Event),
    Tail,
}

/// Pillars make up the [`EventList`][crate::EventList]. All pillars are owned
/// by the list's arena; a pillar exclusively owns its event.
///
/// A pillar of height `h` has `h` forward links, one per level, and appears
/// on every level below `h`. `forward[0]` is the successor in key order.
///
/// A link is `None` only on the tail sentinel, where it terminates the level.
/// Every other pillar links to a real pillar or to the tail on each of its
/// levels once it has been spliced in.
#[derive(Debug)]
pub(crate) struct Pillar {
    pub content: Content,
    pub forward: Vec<Option<PillarId>>,
}

impl Pillar {
    /// Create a new sentinel head of the given height.
    pub fn head(height: usize) -> Self {
        Pillar {
            content: Content::Head,
            forward: vec![None; height],
        }
    }

    /// Create a new sentinel tail of the given height.
    pub fn tail(height: usize) -> Self {
        Pillar {
            content: Content::Tail,
            forward: vec![None; height],
        }
    }

    /// Create a new pillar holding `event`. All links start unset.
    pub fn new(event: Event, height: usize) -> Self {
        debug_assert!(height >= 1, "pillars have at least one level");
        Pillar {
            content: Content::Event(event),
            forward: vec![None; height],
        }
    }

    /// The number of levels this pillar spans.
    #[inline]
    pub fn height(&self) -> usize {
        self.forward.len()
    }

    /// The ordering key of this pillar.
    #[inline]
    pub fn key(&self) -> Key {
        match self.content {
            Content::Head => Key::NegInfinity,
            Content::Event(ref event) => Key::Year(event.year()),
            Content::Tail => Key::PosInfinity,
        }
    }

    /// The event held by this pillar, or `None` for a sentinel.
    #[inline]
    pub fn event(&self) -> Option<&Event> {
        match self.content {
            Content::Event(ref event) => Some(event),
            Content::Head | Content::Tail => None,
        }
    }

    /// The successor of this pillar at `level`.
    ///
    /// # Panics
    ///
    /// Panics if called on the tail, or on a pillar whose link at `level` has
    /// not been set yet.
    #[inline]
    pub fn next(&self, level: usize) -> PillarId {
        self.forward[level].expect("only the tail terminates a level")
    }
}
