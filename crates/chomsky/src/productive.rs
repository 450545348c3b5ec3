//! Removal of non-productive symbols.

use crate::{
    grammar::{Grammar, NonterminalSet, SymbolID, Violation},
    nullable::saturate,
    pipeline::{NormalizeError, Productive, Stage, UnitFree},
};

/// Calculate the non-terminals that derive at least one terminal string.
pub fn productive_set(g: &Grammar) -> NonterminalSet {
    saturate(g, "productive", |symbol, productive| match symbol {
        SymbolID::T(..) => true,
        SymbolID::N(n) => productive.contains(n),
    })
}

/// Drop every non-productive non-terminal and each production mentioning one.
///
/// Fails if the start symbol itself is non-productive, i.e. the language is empty.
pub fn retain_productive(g: &Grammar) -> Result<Grammar, Violation> {
    let productive = productive_set(g);
    if !productive.contains(g.start_symbol()) {
        return Err(Violation::UnproductiveStart(
            g.display_nonterminal(g.start_symbol()).to_string(),
        ));
    }
    tracing::debug!(
        "{} of {} nonterminal(s) are productive",
        productive.len(),
        g.num_nonterminals()
    );

    let mut g = g.clone();
    g.restrict_to(&productive);
    Ok(g)
}

#[tracing::instrument(skip_all)]
pub fn filter(grammar: UnitFree) -> Result<Productive, NormalizeError> {
    let grammar =
        retain_productive(&grammar).map_err(NormalizeError::at(Stage::ProductiveFilter))?;
    Productive::new(grammar)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_unproductive_symbols() {
        let g = Grammar::from_str("S -> aS | AB | b; A -> aA; B -> b").unwrap();
        let pruned = retain_productive(&g).unwrap();

        assert!(pruned.nonterminal_by_name("A").is_none());
        assert!(pruned.nonterminal_by_name("B").is_some());
        assert_eq!(pruned.num_productions(), 3);
        assert!(pruned.validate().is_ok());
    }

    #[test]
    fn idempotent() {
        let g = Grammar::from_str("S -> aS | AB | b | C; A -> aA; B -> b; C -> CA").unwrap();
        let once = retain_productive(&g).unwrap();
        let twice = retain_productive(&once).unwrap();
        assert_eq!(once.to_string(), twice.to_string());
    }

    #[test]
    fn unproductive_start_is_an_error() {
        let g = Grammar::from_str("S -> aS | A; A -> bA").unwrap();
        assert_eq!(
            retain_productive(&g).unwrap_err(),
            Violation::UnproductiveStart("S".into())
        );
    }
}
