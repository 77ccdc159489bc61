//! An ordered index of events keyed by year.

use std::{cmp, fmt, iter, mem};

use log::{debug, trace};

use crate::{
    arena::{Arena, PillarId},
    event::{Event, Key},
    level_generator::{Geometric, LevelGenerator},
    pillar::{Content, Pillar},
};

// ////////////////////////////////////////////////////////////////////////////
// EventList
// ////////////////////////////////////////////////////////////////////////////

/// A skiplist of [`Event`]s ordered by year.
///
/// Events with the same year are kept in insertion order. The list answers
/// two kinds of queries: all events of the latest year at or before some
/// year ([`find_most_recent`][EventList::find_most_recent]), and all events
/// within an inclusive range of years
/// ([`find_range`][EventList::find_range]). Whole years can be removed at
/// once with [`remove`][EventList::remove].
///
/// The list is bracketed by a head and a tail sentinel which compare below
/// and above every year. Both always share the same height, which starts at 1
/// and doubles whenever a new pillar is taller than the sentinels.
///
/// # Examples
///
/// ```
/// use eventlist::{Event, EventList};
///
/// let mut list = EventList::new();
/// list.insert(Event::new(2000, "a"));
/// list.insert(Event::new(1990, "b"));
/// list.insert(Event::new(1995, "c"));
/// list.insert(Event::new(2000, "d"));
///
/// let recent: Vec<_> = list.find_most_recent(1998).into_iter().map(Event::description).collect();
/// assert_eq!(recent, ["c"]);
///
/// let range: Vec<_> = list.find_range(1990, 2000).into_iter().map(Event::description).collect();
/// assert_eq!(range, ["b", "c", "a", "d"]);
///
/// assert_eq!(list.remove(2000), 2);
/// assert_eq!(list.len(), 2);
/// ```
pub struct EventList<G = Geometric> {
    // Every pillar, the two sentinels included.
    pillars: Arena<Pillar>,
    head: PillarId,
    tail: PillarId,
    // Tallest pillar ever created; the sentinels are at least this tall.
    max_used_height: usize,
    len: usize,
    level_generator: G,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl EventList {
    /// Create a new, empty list using a fair-coin [`Geometric`] level
    /// generator seeded from the thread-local random number generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use eventlist::EventList;
    ///
    /// let list = EventList::new();
    /// assert!(list.is_empty());
    /// assert_eq!(list.height(), 1);
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_generator(Geometric::default())
    }

    /// Create a new, empty list whose pillar heights are fully determined by
    /// `seed`.
    #[inline]
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_generator(Geometric::fair(seed))
    }
}

impl<G> EventList<G> {
    /// Create a new, empty list drawing pillar heights from
    /// `level_generator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use eventlist::{EventList, Geometric};
    ///
    /// let list = EventList::with_generator(Geometric::with_seed(0.25, 7).unwrap());
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub fn with_generator(level_generator: G) -> Self {
        let mut pillars = Arena::new();
        let tail = pillars.allocate(Pillar::tail(1));
        let mut head = Pillar::head(1);
        head.forward[0] = Some(tail);
        let head = pillars.allocate(head);
        EventList {
            pillars,
            head,
            tail,
            max_used_height: 1,
            len: 0,
            level_generator,
        }
    }

    /// Returns the number of events in the list.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list contains no events.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The height of the sentinels, i.e. the number of levels in the list.
    ///
    /// This is always a power of two, and never decreases.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.pillars[self.head].height()
    }

    /// The height of the tallest pillar ever inserted.
    #[inline]
    #[must_use]
    pub fn max_used_height(&self) -> usize {
        self.max_used_height
    }

    /// Removes every event. The height of the list is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use eventlist::{Event, EventList};
    ///
    /// let mut list: EventList = (0..10).map(|y| Event::new(y, "")).collect();
    /// list.clear();
    /// assert!(list.is_empty());
    /// assert!(list.find_range(0, 10).is_empty());
    /// ```
    pub fn clear(&mut self) {
        let height = self.height();
        self.pillars.clear();
        self.tail = self.pillars.allocate(Pillar::tail(height));
        let mut head = Pillar::head(height);
        head.forward.fill(Some(self.tail));
        self.head = self.pillars.allocate(head);
        self.len = 0;
    }

    /// Removes every event of the given year, returning how many were
    /// removed. Removing a year that is not present does nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use eventlist::{Event, EventList};
    ///
    /// let mut list = EventList::new();
    /// list.insert(Event::new(1990, "a"));
    /// list.insert(Event::new(1990, "b"));
    /// list.insert(Event::new(1991, "c"));
    ///
    /// assert_eq!(list.remove(1990), 2);
    /// assert_eq!(list.remove(1990), 0);
    /// assert_eq!(list.len(), 1);
    /// ```
    pub fn remove(&mut self, year: i32) -> usize {
        let key = Key::Year(year);
        let mut cursor = self.head;

        // Above level 0 the run of matching pillars is only unlinked; the
        // pillars themselves are released once, at level 0.
        for level in (1..self.height()).rev() {
            cursor = self.advance_while_at_level(cursor, level, |k| k < key);
            let first = self.pillars[cursor].next(level);
            if self.pillars[first].key() == key {
                let last = self.advance_while_at_level(first, level, |k| k == key);
                let after = self.pillars[last].next(level);
                self.pillars[cursor].forward[level] = Some(after);
            }
        }

        cursor = self.advance_while_at_level(cursor, 0, |k| k < key);
        let mut next = self.pillars[cursor].next(0);
        let mut removed = 0;
        while self.pillars[next].key() == key {
            let pillar = self.pillars.free(next);
            next = pillar.next(0);
            removed += 1;
        }
        self.pillars[cursor].forward[0] = Some(next);
        self.len -= removed;
        debug_assert_eq!(self.pillars.len(), self.len + 2);

        debug!("removed {removed} events from year {year}");
        removed
    }

    /// Returns every event of the latest year at or before `year`, in
    /// insertion order. The result is empty if every event is later than
    /// `year`.
    ///
    /// # Examples
    ///
    /// ```
    /// use eventlist::{Event, EventList};
    ///
    /// let mut list = EventList::new();
    /// list.insert(Event::new(1990, "a"));
    /// list.insert(Event::new(1995, "b"));
    /// list.insert(Event::new(1995, "c"));
    ///
    /// let found: Vec<_> = list.find_most_recent(1999).into_iter().map(Event::description).collect();
    /// assert_eq!(found, ["b", "c"]);
    /// assert!(list.find_most_recent(1989).is_empty());
    /// ```
    #[must_use]
    pub fn find_most_recent(&self, year: i32) -> Vec<&Event> {
        let key = Key::Year(year);
        let path = self.search_path(|k| k < key);

        let next = self.pillars[path[0]].next(0);
        if self.pillars[next].key() == key {
            return self.collect_while(next, |k| k == key);
        }

        // `year` itself is absent, so the run of the floor year ends at
        // `path[0]`. Resume from the lowest level whose cursor lies before
        // that run to find its first pillar.
        let floor = self.pillars[path[0]].key();
        if floor == Key::NegInfinity {
            return Vec::new();
        }
        let (mut cursor, top) = path
            .iter()
            .enumerate()
            .find(|&(_, &id)| self.pillars[id].key() < floor)
            .map_or((self.head, self.height()), |(level, &id)| (id, level));
        for level in (0..top).rev() {
            cursor = self.advance_while_at_level(cursor, level, |k| k < floor);
        }
        self.collect_while(self.pillars[cursor].next(0), |k| k == floor)
    }

    /// Returns every event from `first` to `last` (both inclusive), ordered by
    /// year and then by insertion order. The result is empty when
    /// `first > last`.
    ///
    /// # Examples
    ///
    /// ```
    /// use eventlist::{Event, EventList};
    ///
    /// let list: EventList = (1900..2000).map(|y| Event::new(y, "")).collect();
    /// let years: Vec<_> = list.find_range(1950, 1953).into_iter().map(Event::year).collect();
    /// assert_eq!(years, [1950, 1951, 1952, 1953]);
    /// ```
    #[must_use]
    pub fn find_range(&self, first: i32, last: i32) -> Vec<&Event> {
        let (first, last) = (Key::Year(first), Key::Year(last));
        let before = self.descend(|k| k < first);
        let start = self.pillars[before].next(0);
        if self.pillars[start].key() > last {
            return Vec::new();
        }
        self.collect_while(start, |k| k <= last)
    }

    /// Returns an iterator over all events, ordered by year and then by
    /// insertion order.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            pillars: &self.pillars,
            next: self.pillars[self.head].next(0),
            remaining: self.len,
        }
    }
}

impl<G> EventList<G>
where
    G: LevelGenerator,
{
    /// Inserts an event. Events sharing a year with ones already present are
    /// placed after them.
    ///
    /// # Examples
    ///
    /// ```
    /// use eventlist::{Event, EventList};
    ///
    /// let mut list = EventList::new();
    /// list.insert(Event::new(1789, "first"));
    /// list.insert(Event::new(1789, "second"));
    ///
    /// let found: Vec<_> = list.find_most_recent(1789).into_iter().map(Event::description).collect();
    /// assert_eq!(found, ["first", "second"]);
    /// ```
    pub fn insert(&mut self, event: Event) {
        let height = self.level_generator.height().max(1);
        let key = Key::Year(event.year());
        trace!("inserting {event} with height {height}");
        let new = self.pillars.allocate(Pillar::new(event, height));

        self.max_used_height = cmp::max(self.max_used_height, height);
        while self.height() < self.max_used_height {
            self.enlarge_height();
        }

        // Splice on the first pillar strictly greater than the new key, so
        // that equal keys keep their insertion order. The cursor stays put
        // when descending; the new pillar's lower links are not set yet.
        let mut cursor = self.head;
        for level in (0..self.height()).rev() {
            cursor = self.advance_while_at_level(cursor, level, |k| k <= key);
            if level < height {
                let next = self.pillars[cursor].next(level);
                self.pillars[new].forward[level] = Some(next);
                self.pillars[cursor].forward[level] = Some(new);
            }
        }
        self.len += 1;
        debug_assert_eq!(self.pillars.len(), self.len + 2);
    }
}

// ///////////////////////////////////////////////
// Internal methods
// ///////////////////////////////////////////////

impl<G> EventList<G> {
    /// Doubles the height of the sentinels.
    ///
    /// The last pillar of every existing level is relinked to a new, taller
    /// tail; the new head inherits the old head's links, and links straight to
    /// the new tail on each of the new levels.
    fn enlarge_height(&mut self) {
        let height = self.height();
        let new_height = height * 2;
        trace!("enlarging sentinels from {height} to {new_height} levels");

        let (old_head, old_tail) = (self.head, self.tail);
        let new_tail = self.pillars.allocate(Pillar::tail(new_height));

        // The last pillar of level `l - 1` is at or after the last pillar of
        // level `l`, so a single walk from the top suffices.
        let mut cursor = old_head;
        for level in (0..height).rev() {
            cursor = self.advance_while_at_level(cursor, level, |k| k < Key::PosInfinity);
            self.pillars[cursor].forward[level] = Some(new_tail);
        }

        let mut forward = mem::take(&mut self.pillars[old_head].forward);
        forward.resize(new_height, Some(new_tail));
        self.head = self.pillars.allocate(Pillar {
            content: Content::Head,
            forward,
        });
        self.tail = new_tail;

        self.pillars.free(old_head);
        self.pillars.free(old_tail);
    }

    /// Walks along `level` starting at `cursor` for as long as the key of the
    /// next pillar satisfies `pred`, and returns the last pillar reached.
    ///
    /// `pred` must reject [`Key::PosInfinity`].
    fn advance_while_at_level(
        &self,
        mut cursor: PillarId,
        level: usize,
        mut pred: impl FnMut(Key) -> bool,
    ) -> PillarId {
        loop {
            let next = self.pillars[cursor].next(level);
            if !pred(self.pillars[next].key()) {
                return cursor;
            }
            cursor = next;
        }
    }

    /// Descends from the top of the head to level 0, returning the last pillar
    /// whose key satisfies `pred` (the head if there is none).
    fn descend(&self, mut pred: impl FnMut(Key) -> bool) -> PillarId {
        (0..self.height()).rev().fold(self.head, |cursor, level| {
            self.advance_while_at_level(cursor, level, &mut pred)
        })
    }

    /// Like [`descend`][Self::descend], but keeps the cursor reached on every
    /// level. `path[0]` is the result of `descend`.
    fn search_path(&self, mut pred: impl FnMut(Key) -> bool) -> Vec<PillarId> {
        let mut path = vec![self.head; self.height()];
        let mut cursor = self.head;
        for level in (0..self.height()).rev() {
            cursor = self.advance_while_at_level(cursor, level, &mut pred);
            path[level] = cursor;
        }
        path
    }

    /// Collects the events at level 0 starting at `id`, for as long as their
    /// keys satisfy `pred`.
    fn collect_while(&self, mut id: PillarId, pred: impl Fn(Key) -> bool) -> Vec<&Event> {
        let mut events = Vec::new();
        loop {
            let pillar = &self.pillars[id];
            match pillar.event() {
                Some(event) if pred(pillar.key()) => events.push(event),
                _ => return events,
            }
            id = pillar.next(0);
        }
    }

    /// Checks the integrity of the list.
    #[cfg(test)]
    pub(crate) fn check(&self) {
        use std::collections::HashSet;

        let height = self.height();
        assert!(height.is_power_of_two(), "height {height} is not a power of two");
        assert!(height >= self.max_used_height);
        assert_eq!(self.pillars[self.tail].height(), height);
        assert!(self.pillars[self.tail].forward.iter().all(Option::is_none));
        assert_eq!(self.pillars.len(), self.len + 2, "leaked or lost pillars");

        let mut base = HashSet::new();
        for level in 0..height {
            let mut id = self.head;
            let mut prev = Key::NegInfinity;
            let mut count = 0;
            while id != self.tail {
                let next = self.pillars[id].next(level);
                let pillar = &self.pillars[next];
                assert!(pillar.height() > level, "pillar too short for level {level}");
                assert!(prev <= pillar.key(), "level {level} out of order");
                prev = pillar.key();
                if next != self.tail {
                    count += 1;
                    if level == 0 {
                        base.insert(next);
                    } else {
                        assert!(base.contains(&next), "pillar missing from level 0");
                    }
                }
                id = next;
            }
            if level == 0 {
                assert_eq!(count, self.len);
            }
        }
    }
}

// ///////////////////////////////////////////////
// Iterator
// ///////////////////////////////////////////////

/// An iterator over the events of an [`EventList`], in order.
pub struct Iter<'a> {
    pillars: &'a Arena<Pillar>,
    next: PillarId,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Event;

    #[inline]
    fn next(&mut self) -> Option<&'a Event> {
        let pillar = &self.pillars[self.next];
        let event = pillar.event()?;
        self.next = pillar.next(0);
        self.remaining -= 1;
        Some(event)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}
impl iter::FusedIterator for Iter<'_> {}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl Default for EventList {
    #[inline]
    fn default() -> EventList {
        EventList::new()
    }
}

impl<G: LevelGenerator> Extend<Event> for EventList<G> {
    #[inline]
    fn extend<I: IntoIterator<Item = Event>>(&mut self, iterable: I) {
        for event in iterable {
            self.insert(event);
        }
    }
}

impl iter::FromIterator<Event> for EventList {
    #[inline]
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> EventList {
        let mut list = EventList::new();
        list.extend(iter);
        list
    }
}

impl<'a, G> IntoIterator for &'a EventList<G> {
    type Item = &'a Event;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl<G> fmt::Debug for EventList<G> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Prints the keys present on each level, from the top level down.
impl<G> fmt::Display for EventList<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for level in (0..self.height()).rev() {
            write!(f, "level {level}: {}", Key::NegInfinity)?;
            let mut id = self.head;
            while id != self.tail {
                id = self.pillars[id].next(level);
                write!(f, " {}", self.pillars[id].key())?;
            }
            if level > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use rand::prelude::*;
    use rstest::{fixture, rstest};

    use super::EventList;
    use crate::{
        event::Event,
        level_generator::{Geometric, LevelGenerator, Scripted},
    };

    fn descriptions(events: &[&Event]) -> Vec<String> {
        events.iter().map(|e| e.description().to_owned()).collect()
    }

    fn years(events: &[&Event]) -> Vec<i32> {
        events.iter().map(|e| e.year()).collect()
    }

    /// The list from the module examples: (2000, a), (1990, b), (1995, c),
    /// (2000, d).
    fn history_with(seed: u64) -> EventList {
        let mut list = EventList::with_seed(seed);
        for (year, description) in [(2000, "a"), (1990, "b"), (1995, "c"), (2000, "d")] {
            list.insert(Event::new(year, description));
            list.check();
        }
        list
    }

    #[fixture]
    fn history() -> EventList {
        history_with(0)
    }

    #[test]
    fn empty() {
        let list = EventList::new();
        list.check();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.height(), 1);
        assert_eq!(list.max_used_height(), 1);
        assert!(list.find_most_recent(2020).is_empty());
        assert!(list.find_range(i32::MIN, i32::MAX).is_empty());
        assert_eq!(list.iter().next(), None);
    }

    #[rstest]
    fn most_recent_between_years(#[values(0, 1, 2, 3)] seed: u64) {
        let list = history_with(seed);
        assert_eq!(descriptions(&list.find_most_recent(1998)), ["c"]);
    }

    #[rstest]
    fn range_keeps_insertion_order(#[values(0, 1, 2, 3)] seed: u64) {
        let list = history_with(seed);
        assert_eq!(
            descriptions(&list.find_range(1990, 2000)),
            ["b", "c", "a", "d"]
        );
    }

    #[rstest]
    fn remove_year(#[values(0, 1, 2, 3)] seed: u64) {
        let mut list = history_with(seed);
        assert_eq!(list.remove(2000), 2);
        list.check();
        assert_eq!(descriptions(&list.find_range(1990, 2000)), ["b", "c"]);
        assert_eq!(descriptions(&list.find_most_recent(2000)), ["c"]);
        assert_eq!(list.len(), 2);
    }

    #[rstest]
    #[case(1989, &[])]
    #[case(1990, &["b"])]
    #[case(1994, &["b"])]
    #[case(1995, &["c"])]
    #[case(2000, &["a", "d"])]
    #[case(2001, &["a", "d"])]
    #[case(i32::MAX, &["a", "d"])]
    #[case(i32::MIN, &[])]
    fn most_recent(history: EventList, #[case] year: i32, #[case] expected: &[&str]) {
        assert_eq!(descriptions(&history.find_most_recent(year)), expected);
    }

    #[rstest]
    #[case(1990, 2000, &["b", "c", "a", "d"])]
    #[case(1991, 1999, &["c"])]
    #[case(1995, 1995, &["c"])]
    #[case(2000, 2000, &["a", "d"])]
    #[case(1996, 1999, &[])]
    #[case(2001, 3000, &[])]
    #[case(0, 1989, &[])]
    #[case(2000, 1990, &[])]
    #[case(i32::MIN, i32::MAX, &["b", "c", "a", "d"])]
    fn range(history: EventList, #[case] first: i32, #[case] last: i32, #[case] expected: &[&str]) {
        assert_eq!(descriptions(&history.find_range(first, last)), expected);
    }

    #[rstest]
    fn remove_absent(mut history: EventList) {
        assert_eq!(history.remove(1991), 0);
        assert_eq!(history.remove(i32::MIN), 0);
        assert_eq!(history.remove(i32::MAX), 0);
        history.check();
        assert_eq!(history.len(), 4);
    }

    #[rstest]
    fn remove_everything(mut history: EventList) {
        let height = history.height();
        for year in [1990, 1995, 2000] {
            assert!(history.remove(year) > 0);
            history.check();
        }
        assert!(history.is_empty());
        assert_eq!(history.height(), height);
        assert!(history.find_most_recent(i32::MAX).is_empty());
    }

    #[test]
    fn increasing_1000() {
        let mut list = EventList::with_seed(5);
        for year in 0..1000 {
            list.insert(Event::new(year, year.to_string()));
        }
        list.check();
        let found = list.find_range(0, 999);
        assert_eq!(found.len(), 1000);
        assert_eq!(years(&found), (0..1000).collect::<Vec<_>>());
    }

    #[test]
    fn decreasing_1000() {
        let mut list = EventList::with_seed(6);
        for year in (0..1000).rev() {
            list.insert(Event::new(year, ""));
        }
        list.check();
        assert_eq!(years(&list.find_range(250, 260)), (250..=260).collect::<Vec<_>>());
        assert_eq!(years(&list.find_most_recent(-1)), Vec::<i32>::new());
        assert_eq!(years(&list.find_most_recent(5000)), [999]);
    }

    #[test]
    fn extreme_years() {
        let mut list = EventList::with_seed(9);
        list.insert(Event::new(i32::MAX, "end"));
        list.insert(Event::new(i32::MIN, "start"));
        list.check();
        assert_eq!(descriptions(&list.find_most_recent(i32::MIN)), ["start"]);
        assert_eq!(descriptions(&list.find_most_recent(i32::MAX - 1)), ["start"]);
        assert_eq!(descriptions(&list.find_most_recent(i32::MAX)), ["end"]);
        assert_eq!(list.remove(i32::MIN), 1);
        assert_eq!(descriptions(&list.find_range(i32::MIN, i32::MAX)), ["end"]);
    }

    #[test]
    fn duplicates_keep_insertion_order() {
        let mut list = EventList::with_seed(11);
        for i in 0..200 {
            list.insert(Event::new(i % 4, i.to_string()));
        }
        list.check();

        for year in 0..4 {
            let expected: Vec<_> = (0..200)
                .filter(|i| i % 4 == year)
                .map(|i| i.to_string())
                .collect();
            assert_eq!(descriptions(&list.find_range(year, year)), expected);
            assert_eq!(descriptions(&list.find_most_recent(year)), expected);
        }
    }

    #[test]
    fn floor_run_spanning_tall_pillars() {
        // The last 1995 is tall, so the descent towards 1998 reaches it on a
        // high level while the earlier 1995s are only on level 0.
        let mut list = EventList::with_generator(Scripted::new([1, 1, 1, 4, 1]));
        list.insert(Event::new(1990, "a"));
        list.insert(Event::new(1995, "b"));
        list.insert(Event::new(1995, "c"));
        list.insert(Event::new(1995, "d"));
        list.insert(Event::new(2000, "e"));
        list.check();
        assert_eq!(descriptions(&list.find_most_recent(1998)), ["b", "c", "d"]);

        // Likewise with the run at the very top of the list.
        let mut list = EventList::with_generator(Scripted::new([2, 1, 2]));
        list.insert(Event::new(7, "x"));
        list.insert(Event::new(7, "y"));
        list.insert(Event::new(7, "z"));
        list.check();
        assert_eq!(descriptions(&list.find_most_recent(8)), ["x", "y", "z"]);
    }

    #[rstest]
    #[case(&[1], 1)]
    #[case(&[2], 2)]
    #[case(&[3], 4)]
    #[case(&[1, 4, 2], 4)]
    #[case(&[5], 8)]
    #[case(&[2, 9], 16)]
    fn height_doubles(#[case] heights: &[usize], #[case] expected: usize) {
        let mut list = EventList::with_generator(Scripted::new(heights.iter().copied()));
        for (year, _) in (0..).zip(heights) {
            list.insert(Event::new(year, ""));
            list.check();
        }
        assert_eq!(list.height(), expected);
        assert_eq!(list.max_used_height(), heights.iter().copied().max().unwrap_or(1));
        assert_eq!(years(&list.find_range(0, 100)).len(), heights.len());
    }

    #[test]
    fn height_never_decreases() {
        let mut list = EventList::with_seed(3);
        let mut height = list.height();
        for year in 0..500 {
            list.insert(Event::new(year % 50, ""));
            assert!(list.height() >= height);
            assert!(list.height().is_power_of_two());
            height = list.height();
        }
        for year in 0..50 {
            list.remove(year);
            assert_eq!(list.height(), height);
        }
        list.check();
    }

    #[test]
    fn display() {
        let mut list = EventList::with_generator(Scripted::new([1, 2, 3, 1]));
        for (year, description) in [(2000, "a"), (1990, "b"), (1995, "c"), (2000, "d")] {
            list.insert(Event::new(year, description));
        }
        insta::assert_snapshot!(list.to_string(), @r"
        level 3: -inf +inf
        level 2: -inf 1995 +inf
        level 1: -inf 1990 1995 +inf
        level 0: -inf 1990 1995 2000 2000 +inf
        ");

        list.remove(1995);
        insta::assert_snapshot!(list.to_string(), @r"
        level 3: -inf +inf
        level 2: -inf +inf
        level 1: -inf 1990 +inf
        level 0: -inf 1990 2000 2000 +inf
        ");
    }

    #[rstest]
    fn debug(history: EventList) {
        assert_eq!(
            format!("{history:?}"),
            r#"[Event { year: 1990, description: "b" }, Event { year: 1995, description: "c" }, Event { year: 2000, description: "a" }, Event { year: 2000, description: "d" }]"#
        );
    }

    #[rstest]
    fn iter(history: EventList) {
        let mut iter = history.iter();
        for remaining in (1..=4).rev() {
            assert_eq!(iter.len(), remaining);
            assert!(iter.next().is_some());
        }
        assert_eq!(iter.len(), 0);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);

        let all: Vec<_> = (&history).into_iter().map(Event::description).collect();
        assert_eq!(all, ["b", "c", "a", "d"]);
    }

    #[rstest]
    fn clear(mut history: EventList) {
        let height = history.height();
        history.clear();
        history.check();
        assert!(history.is_empty());
        assert_eq!(history.height(), height);

        history.insert(Event::new(1, "again"));
        history.check();
        assert_eq!(descriptions(&history.find_most_recent(2)), ["again"]);
    }

    #[test]
    fn collect_and_extend() {
        let mut list: EventList = (0..10).map(|y| Event::new(y, "")).collect();
        list.extend((10..20).map(|y| Event::new(y, "")));
        list.check();
        assert_eq!(list.len(), 20);
        assert_eq!(years(&list.find_range(8, 11)), [8, 9, 10, 11]);
    }

    #[test]
    fn custom_generator() -> Result<()> {
        let mut list = EventList::with_generator(Geometric::with_seed(0.25, 1)?);
        list.extend((0..1000).map(|y| Event::new(y, "")));
        list.check();

        let boxed: Box<dyn LevelGenerator> = Box::new(Geometric::with_seed(0.75, 1)?);
        let mut list = EventList::with_generator(boxed);
        list.extend((0..1000).map(|y| Event::new(y, "")));
        list.check();
        assert_eq!(list.len(), 1000);
        Ok(())
    }

    /// Compares the list against a plain vector of events kept in insertion
    /// order under a random mix of operations.
    #[rstest]
    fn matches_model(#[values(0, 1, 2, 3, 4)] seed: u64) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut list = EventList::with_seed(seed);
        let mut model: Vec<Event> = Vec::new();

        for step in 0..2_000 {
            let year = rng.random_range(0..100);
            match rng.random_range(0..10) {
                0..=5 => {
                    let event = Event::new(year, step.to_string());
                    model.push(event.clone());
                    list.insert(event);
                }
                6 => {
                    let before = model.len();
                    model.retain(|e| e.year() != year);
                    assert_eq!(list.remove(year), before - model.len());
                }
                7 | 8 => {
                    let floor = model.iter().map(Event::year).filter(|&y| y <= year).max();
                    let expected: Vec<_> = model
                        .iter()
                        .filter(|e| Some(e.year()) == floor)
                        .collect();
                    assert_eq!(list.find_most_recent(year), expected);
                }
                _ => {
                    let last = year + rng.random_range(0..20);
                    let mut expected: Vec<_> = model
                        .iter()
                        .filter(|e| (year..=last).contains(&e.year()))
                        .collect();
                    expected.sort_by_key(|e| e.year());
                    assert_eq!(list.find_range(year, last), expected);
                }
            }
            assert_eq!(list.len(), model.len());
        }
        list.check();

        let mut sorted: Vec<_> = model.iter().collect();
        sorted.sort_by_key(|e| e.year());
        assert_eq!(list.iter().collect::<Vec<_>>(), sorted);
    }
}
