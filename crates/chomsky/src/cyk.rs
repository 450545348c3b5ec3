//! Membership test for grammars in Chomsky normal form (Cocke–Younger–Kasami).

use crate::{
    grammar::{NonterminalID, NonterminalSet, SymbolID, TerminalID},
    pipeline::Cnf,
    types::Map,
};

/// The position of the span `word[i..i + len]` in the triangular chart of a word of length `n`.
fn chart_index(i: usize, len: usize, n: usize) -> usize {
    // spans shorter than `len` come first.
    (len - 1) * (n + 1) - (len - 1) * len / 2 + i
}

pub fn recognize(g: &Cnf, word: &[TerminalID]) -> bool {
    if word.is_empty() {
        return g.derives_empty();
    }

    let mut lexical: Map<TerminalID, NonterminalSet> = Map::default();
    let mut binary: Vec<(NonterminalID, NonterminalID, NonterminalID)> = vec![];
    for p in g.productions() {
        match *p.right {
            [SymbolID::T(t)] => {
                lexical.entry(t).or_default().insert(p.left);
            }
            [SymbolID::N(b), SymbolID::N(c)] => binary.push((p.left, b, c)),
            _ => (),
        }
    }

    let n = word.len();
    let mut chart = vec![NonterminalSet::default(); n * (n + 1) / 2];
    for (i, t) in word.iter().enumerate() {
        if let Some(heads) = lexical.get(t) {
            chart[chart_index(i, 1, n)] = heads.clone();
        }
    }

    for len in 2..=n {
        for i in 0..=(n - len) {
            let mut cell = NonterminalSet::default();
            for split in 1..len {
                let left = &chart[chart_index(i, split, n)];
                let right = &chart[chart_index(i + split, len - split, n)];
                if left.is_empty() || right.is_empty() {
                    continue;
                }
                for &(a, b, c) in &binary {
                    if left.contains(b) && right.contains(c) {
                        cell.insert(a);
                    }
                }
            }
            chart[chart_index(i, len, n)] = cell;
        }
    }

    chart[chart_index(0, n, n)].contains(g.start_symbol())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{grammar::Grammar, pipeline::normalize};

    #[test]
    fn chart_layout() {
        let n = 4;
        let mut seen = vec![];
        for len in 1..=n {
            for i in 0..=(n - len) {
                seen.push(chart_index(i, len, n));
            }
        }
        assert_eq!(seen, (0..n * (n + 1) / 2).collect::<Vec<_>>());
    }

    #[test]
    fn anbn() {
        let g = Grammar::from_str("S -> aSb | ab").unwrap();
        let cnf = normalize(&g).unwrap();
        for (word, expected) in [
            ("ab", true),
            ("aabb", true),
            ("aaabbb", true),
            ("", false),
            ("a", false),
            ("aab", false),
            ("abab", false),
            ("ba", false),
        ] {
            assert_eq!(
                cnf.accepts(&cnf.word(word).unwrap()),
                expected,
                "word = {:?}",
                word
            );
        }
    }
}
