//! The records stored in an [`EventList`][crate::EventList] and the key
//! ordering used to place them.

use std::fmt;

// ////////////////////////////////////////////////////////////////////////////
// Event
// ////////////////////////////////////////////////////////////////////////////

/// A single historical event: the year it happened and a short description.
///
/// Events are immutable once created. Two events may share the same year.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Event {
    year: i32,
    description: String,
}

impl Event {
    /// Create a new event.
    ///
    /// # Examples
    ///
    /// ```
    /// use eventlist::Event;
    ///
    /// let event = Event::new(1969, "Apollo 11 lands on the Moon");
    /// assert_eq!(event.year(), 1969);
    /// ```
    #[inline]
    pub fn new(year: i32, description: impl Into<String>) -> Self {
        Event {
            year,
            description: description.into(),
        }
    }

    /// The year of the event, used as the ordering key.
    #[inline]
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The description of the event.
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Consumes the event, returning its year and description.
    #[inline]
    #[must_use]
    pub fn into_parts(self) -> (i32, String) {
        (self.year, self.description)
    }
}

impl fmt::Display for Event {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.year, self.description)
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Key
// ////////////////////////////////////////////////////////////////////////////

/// The position of a pillar along the list.
///
/// The sentinels sit at the two infinities so that every real year compares
/// strictly between them, including `i32::MIN` and `i32::MAX`. The derived
/// ordering follows the declaration order of the variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum Key {
    /// Below every year; the key of the head sentinel.
    NegInfinity,
    /// A real year.
    Year(i32),
    /// Above every year; the key of the tail sentinel.
    PosInfinity,
}

impl From<i32> for Key {
    #[inline]
    fn from(year: i32) -> Self {
        Key::Year(year)
    }
}

impl fmt::Display for Key {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Key::NegInfinity => f.write_str("-inf"),
            Key::Year(year) => write!(f, "{year}"),
            Key::PosInfinity => f.write_str("+inf"),
        }
    }
}
