//! An ordered index of historical events, keyed by year, built on a skiplist.
//!
//! A skiplist stores its elements in such a way that they can be efficiently
//! located, inserted and removed, all in `O(log(n))` on average.
//!
//! Conceptually, a skiplist resembles something like:
//!
//! ```text
//! <head> ----------------------------------------------------------------------------> <tail>
//! <head> ----------> [2] --------------------------------------------------> [9] ----> <tail>
//! <head> ----------> [2] ------------------------------------[7] ----------> [9] ----> <tail>
//! <head> ----------> [2] ----------> [4] ------------------> [7] ----------> [9] ----> <tail>
//! <head> --> [1] --> [2] --> [3] --> [4] --> [5] --> [6] --> [7] --> [8] --> [9] ----> <tail>
//! ```
//!
//! where each pillar `[x]` has links to pillars further down the list,
//! allowing the search to skip ahead. The head and tail sentinels compare
//! below and above every year and are always exactly as tall as each other.
//! Their height starts at 1 and doubles whenever a new pillar outgrows them.
//!
//! [`EventList`] supports:
//!
//! - [`insert`][EventList::insert]: events of the same year keep their
//!   insertion order;
//! - [`remove`][EventList::remove]: every event of a year at once;
//! - [`find_most_recent`][EventList::find_most_recent]: every event of the
//!   latest year at or before a given year;
//! - [`find_range`][EventList::find_range]: every event within an inclusive
//!   range of years.
//!
//! The list is not synchronised; wrap it in a lock to share it between
//! threads.

mod arena;
mod event;
mod event_list;
pub mod level_generator;
mod pillar;

pub use event::Event;
pub use event_list::{EventList, Iter};
pub use level_generator::{Geometric, GeometricError, LevelGenerator};
