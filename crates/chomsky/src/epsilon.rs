//! Elimination of ε-productions.

use crate::{
    grammar::{Grammar, NonterminalSet, Productions, SymbolID},
    pipeline::{EpsilonFree, NormalizeError},
};

/// Rewrite the productions so that none of them has an empty body.
///
/// Every body is replaced by all variants obtained by dropping any subset of
/// its nullable symbols. The language is preserved up to the empty string.
#[tracing::instrument(skip_all)]
pub fn eliminate(grammar: Grammar, nullables: &NonterminalSet) -> Result<EpsilonFree, NormalizeError> {
    let mut productions = Productions::default();
    for p in grammar.productions() {
        for body in expand(p.right, nullables) {
            productions.entry(p.left).or_default().insert(body);
        }
    }
    tracing::debug!(
        "{} production(s) -> {} production(s) without ε",
        grammar.num_productions(),
        productions.values().map(|bodies| bodies.len()).sum::<usize>(),
    );
    EpsilonFree::new(grammar.with_productions(productions))
}

/// Every non-empty subsequence of `body` that keeps all non-nullable symbols.
fn expand(body: &[SymbolID], nullables: &NonterminalSet) -> Vec<Vec<SymbolID>> {
    let mut options = vec![Vec::with_capacity(body.len())];
    for &symbol in body {
        let droppable = matches!(symbol, SymbolID::N(n) if nullables.contains(n));
        if droppable {
            let kept: Vec<_> = options
                .iter()
                .map(|option| {
                    let mut option = option.clone();
                    option.push(symbol);
                    option
                })
                .collect();
            options.extend(kept);
        } else {
            for option in &mut options {
                option.push(symbol);
            }
        }
    }
    options.retain(|option| !option.is_empty());
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{grammar::examples, nullable::nullables};

    fn bodies(g: &Grammar, head: &str) -> Vec<String> {
        let id = g.nonterminal_by_name(head).unwrap();
        let mut bodies: Vec<String> = g
            .productions_of(id)
            .map(|body| {
                body.iter()
                    .map(|s| g.display_symbol(*s).to_string())
                    .collect()
            })
            .collect();
        bodies.sort();
        bodies
    }

    #[test]
    fn sample() {
        let g = Grammar::define(examples::sample).unwrap();
        let nullables = nullables(&g);
        let g = eliminate(g, &nullables).unwrap();

        assert!(g.productions().all(|p| !p.is_epsilon()));
        assert_eq!(bodies(&g, "S"), ["B", "aB", "b", "bA"]);
        assert_eq!(bodies(&g, "A"), ["AS", "S", "aD", "b", "bAB", "bB"]);
        assert_eq!(bodies(&g, "C"), ["AB", "B"]);
    }

    #[test]
    fn expands_every_subset() {
        let g = Grammar::from_str("S -> ABA; A -> a | ε; B -> b").unwrap();
        let nullables = nullables(&g);
        let g = eliminate(g, &nullables).unwrap();
        assert_eq!(bodies(&g, "S"), ["AB", "ABA", "B", "BA"]);
        assert_eq!(bodies(&g, "A"), ["a"]);
    }

    #[test]
    fn fully_nullable_body_vanishes() {
        let g = Grammar::from_str("S -> AA | a; A -> ε").unwrap();
        let nullables = nullables(&g);
        let g = eliminate(g, &nullables).unwrap();
        assert_eq!(bodies(&g, "S"), ["A", "AA", "a"]);
        assert!(g.productions_of(g.nonterminal_by_name("A").unwrap()).next().is_none());
    }
}
