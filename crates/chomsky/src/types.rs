//! Utility types.

use std::{collections::VecDeque, hash::Hash};

type BuildHasher = std::hash::BuildHasherDefault<rustc_hash::FxHasher>;

pub type Map<K, V> = indexmap::IndexMap<K, V, BuildHasher>;
pub type Set<T> = indexmap::IndexSet<T, BuildHasher>;

/// A FIFO worklist that admits each value at most once over its lifetime.
///
/// Values that have already been popped are not queued again, so draining
/// the worklist visits every pushed value exactly once.
#[derive(Debug)]
pub struct Worklist<T> {
    queue: VecDeque<T>,
    seen: Set<T>,
}
impl<T> Default for Worklist<T> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
            seen: Set::default(),
        }
    }
}

impl<T> Worklist<T>
where
    T: Clone + Eq + Hash,
{
    /// Queue `value` unless it has been seen before. Returns whether it was queued.
    pub fn push(&mut self, value: T) -> bool {
        if self.seen.insert(value.clone()) {
            self.queue.push_back(value);
            true
        } else {
            false
        }
    }

    pub fn pop(&mut self) -> Option<T> {
        self.queue.pop_front()
    }

    /// All values ever pushed, in the order they were first seen.
    pub fn into_seen(self) -> Set<T> {
        self.seen
    }
}

impl<T> FromIterator<T> for Worklist<T>
where
    T: Clone + Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut worklist = Self::default();
        for value in iter {
            worklist.push(value);
        }
        worklist
    }
}
