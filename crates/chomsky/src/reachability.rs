//! Removal of inaccessible symbols.

use crate::{
    grammar::{Grammar, NonterminalSet, SymbolID, Violation},
    pipeline::{NormalizeError, Productive, Reachable, Stage},
    types::Worklist,
};

/// Calculate the non-terminals reachable from the start symbol by a
/// breadth-first walk over production bodies.
pub fn reachable_set(g: &Grammar) -> NonterminalSet {
    let mut worklist = Worklist::default();
    worklist.push(g.start_symbol());
    while let Some(n) = worklist.pop() {
        for body in g.productions_of(n) {
            for symbol in body {
                if let SymbolID::N(m) = *symbol {
                    worklist.push(m);
                }
            }
        }
    }
    worklist.into_seen().into_iter().collect()
}

/// Restrict the grammar to the non-terminals reachable from the start symbol.
pub fn retain_reachable(g: &Grammar) -> Result<Grammar, Violation> {
    g.validate()?;
    let reachable = reachable_set(g);
    tracing::debug!(
        "{} of {} nonterminal(s) are reachable",
        reachable.len(),
        g.num_nonterminals()
    );

    let mut g = g.clone();
    g.restrict_to(&reachable);
    Ok(g)
}

#[tracing::instrument(skip_all)]
pub fn filter(grammar: Productive) -> Result<Reachable, NormalizeError> {
    let grammar =
        retain_reachable(&grammar).map_err(NormalizeError::at(Stage::ReachabilityFilter))?;
    Reachable::new(grammar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::examples;

    #[test]
    fn drops_unreachable_symbols() {
        let g = Grammar::define(examples::sample).unwrap();
        let pruned = retain_reachable(&g).unwrap();
        assert!(pruned.nonterminal_by_name("C").is_none());
        for name in ["S", "A", "B", "D"] {
            assert!(pruned.nonterminal_by_name(name).is_some(), "{}", name);
        }
        assert_eq!(pruned.num_productions(), g.num_productions() - 1);
    }

    #[test]
    fn idempotent() {
        let g = Grammar::from_str("S -> aA; A -> b; B -> aC; C -> c").unwrap();
        let once = retain_reachable(&g).unwrap();
        let twice = retain_reachable(&once).unwrap();
        assert_eq!(once.num_nonterminals(), 2);
        assert_eq!(once.to_string(), twice.to_string());
    }
}
