//! Set-valued closure over a relation, after DeRemer and Pennello's `Digraph`.

use crate::types::Map;
use std::{cmp, hash::Hash};

pub trait Set: Clone {
    fn union_with(&mut self, other: &Self);
}

/// Compute `F(x) = F'(x) ∪ ⋃{ F(y) | x R y }` in place.
///
/// On entry `result` holds `F'`, and `successors(x)` enumerates every `y` with `x R y`.
/// Successors that are not keys of `result` are ignored.
pub fn digraph<K, T, I>(result: &mut Map<K, T>, successors: impl Fn(&K) -> I)
where
    K: Clone + Eq + Hash,
    T: Set,
    I: IntoIterator<Item = K>,
{
    let keys: Vec<_> = result.keys().cloned().collect();
    let mut digraph = Digraph {
        n: vec![0usize; keys.len()],
        result,
        successors,
        keys: &keys[..],
        stack: vec![],
    };
    for x in 0..keys.len() {
        if digraph.n[x] == 0 {
            digraph.traverse(x);
        }
    }
}

struct Digraph<'a, K, T, F> {
    result: &'a mut Map<K, T>,
    successors: F,
    keys: &'a [K],
    n: Vec<usize>,
    stack: Vec<usize>,
}

impl<K, T, F, I> Digraph<'_, K, T, F>
where
    K: Eq + Hash,
    T: Set,
    F: Fn(&K) -> I,
    I: IntoIterator<Item = K>,
{
    fn traverse(&mut self, x: usize) {
        self.stack.push(x);
        let d = self.stack.len();
        self.n[x] = d;

        let successors: Vec<usize> = (self.successors)(&self.keys[x])
            .into_iter()
            .filter_map(|y| self.result.get_index_of(&y))
            .collect();
        for y in successors {
            if self.n[y] == 0 {
                self.traverse(y);
            }
            self.n[x] = cmp::min(self.n[x], self.n[y]);

            if x != y {
                // F(x) <- F(x) ∪ F(y)
                let added = self.result[y].clone();
                self.result[x].union_with(&added);
            }
        }

        if self.n[x] != d {
            return;
        }

        // x is the root of a strongly connected component; every member shares F(x).
        while let Some(s) = self.stack.pop() {
            self.n[s] = usize::MAX;
            if s == x {
                break;
            }
            self.result[s] = self.result[x].clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Set as IndexSet;

    impl Set for IndexSet<&'static str> {
        fn union_with(&mut self, other: &Self) {
            self.extend(other.iter().copied())
        }
    }

    fn closure(edges: &[(&'static str, &'static str)]) -> Map<&'static str, IndexSet<&'static str>> {
        let mut result: Map<_, IndexSet<_>> = Map::default();
        for &(x, y) in edges {
            result.entry(x).or_default().insert(y);
            result.entry(y).or_default();
        }
        digraph(&mut result, |x| {
            edges
                .iter()
                .filter(|(from, _)| from == x)
                .map(|(_, to)| *to)
                .collect::<Vec<_>>()
        });
        result
    }

    fn sorted(set: &IndexSet<&'static str>) -> Vec<&'static str> {
        let mut v: Vec<_> = set.iter().copied().collect();
        v.sort();
        v
    }

    #[test]
    fn chain() {
        let result = closure(&[("a", "b"), ("b", "c"), ("c", "d")]);
        assert_eq!(sorted(&result["a"]), ["b", "c", "d"]);
        assert_eq!(sorted(&result["c"]), ["d"]);
        assert!(result["d"].is_empty());
    }

    #[test]
    fn cycle_shares_closure() {
        let result = closure(&[("a", "b"), ("b", "a"), ("b", "c")]);
        assert_eq!(sorted(&result["a"]), ["a", "b", "c"]);
        assert_eq!(sorted(&result["b"]), ["a", "b", "c"]);
        assert!(result["c"].is_empty());
    }
}
