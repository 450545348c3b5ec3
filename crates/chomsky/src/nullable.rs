//! Calculation of nullable non-terminals.

use crate::grammar::{Grammar, NonterminalSet, SymbolID};

/// Calculate the set of non-terminals that derive the empty string.
///
/// `A` is nullable iff some body of `A` consists solely of nullable
/// non-terminals; an empty body qualifies trivially.
#[tracing::instrument(skip_all)]
pub fn nullables(g: &Grammar) -> NonterminalSet {
    saturate(g, "nullable", |symbol, nullables| {
        matches!(symbol, SymbolID::N(n) if nullables.contains(n))
    })
}

/// Least fixed point shared by the nullable and productive computations.
///
/// A head joins the set as soon as one of its bodies is made of symbols
/// that `explained` accepts with respect to the set found so far.
pub(crate) fn saturate<F>(g: &Grammar, what: &str, explained: F) -> NonterminalSet
where
    F: Fn(SymbolID, &NonterminalSet) -> bool,
{
    let mut found = NonterminalSet::default();
    let mut round = 0;
    loop {
        round += 1;
        let mut changed = false;
        for p in g.productions() {
            if found.contains(p.left) {
                continue;
            }
            if p.right.iter().all(|s| explained(*s, &found)) {
                changed |= found.insert(p.left);
            }
        }
        tracing::trace!("{} pass #{}: {} symbol(s)", what, round, found.len());
        if !changed {
            break;
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{examples, Grammar};

    fn names(g: &Grammar, set: &NonterminalSet) -> Vec<String> {
        let mut names: Vec<_> = set
            .iter()
            .map(|n| g.display_nonterminal(n).to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn sample() {
        let g = Grammar::define(examples::sample).unwrap();
        assert_eq!(names(&g, &nullables(&g)), ["A"]);
    }

    #[test]
    fn transitive() {
        // S -> A B, A -> ε, B -> A A | b
        let g = Grammar::from_str("S -> AB; A -> ε; B -> AA | b").unwrap();
        assert_eq!(names(&g, &nullables(&g)), ["A", "B", "S"]);
    }

    #[test]
    fn terminal_blocks_nullability() {
        let g = Grammar::from_str("S -> aA | A; A -> aS").unwrap();
        assert!(nullables(&g).is_empty());
    }
}
