//! Elimination of unit productions.

use crate::{
    digraph::digraph,
    grammar::{Grammar, NonterminalID, NonterminalSet, Productions, SymbolID},
    pipeline::{EpsilonFree, NormalizeError, UnitFree},
    types::Map,
};

/// Calculate the unit pairs of `g`.
///
/// `pairs[A]` holds every `B` such that `A =>+ B` through one or more unit
/// productions. `A` belongs to its own entry only if it sits on a unit cycle.
/// Non-terminals without unit productions have no entry.
pub fn unit_pairs(g: &Grammar) -> Map<NonterminalID, NonterminalSet> {
    let mut pairs: Map<NonterminalID, NonterminalSet> = g
        .nonterminals()
        .map(|n| (n.id(), NonterminalSet::default()))
        .collect();
    for p in g.productions() {
        if let [SymbolID::N(b)] = *p.right {
            pairs.entry(p.left).or_default().insert(b);
        }
    }

    let direct: Map<NonterminalID, Vec<NonterminalID>> = pairs
        .iter()
        .map(|(&a, targets)| (a, targets.iter().collect()))
        .collect();
    digraph(&mut pairs, |a| direct.get(a).cloned().unwrap_or_default());

    pairs.retain(|_, targets| !targets.is_empty());
    pairs
}

/// Replace every unit chain `A =>+ B` by copies of the non-unit bodies of `B` under `A`.
#[tracing::instrument(skip_all)]
pub fn eliminate(grammar: EpsilonFree) -> Result<UnitFree, NormalizeError> {
    let pairs = unit_pairs(&grammar);
    tracing::debug!(
        "{} unit pair(s)",
        pairs.values().map(|targets| targets.len()).sum::<usize>()
    );

    let mut productions = Productions::default();
    for p in grammar.productions().filter(|p| !p.is_unit()) {
        productions
            .entry(p.left)
            .or_default()
            .insert(p.right.to_vec());
    }
    for (&a, targets) in &pairs {
        for b in targets.iter() {
            for body in grammar.productions_of(b) {
                if !matches!(body, [SymbolID::N(..)]) {
                    productions.entry(a).or_default().insert(body.to_vec());
                }
            }
        }
    }

    UnitFree::new(grammar.with_productions(productions))
}
