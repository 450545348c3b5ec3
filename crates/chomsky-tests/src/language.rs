//! A brute-force oracle for the language of a grammar.

use chomsky::{
    grammar::{NonterminalID, SymbolID, TerminalID},
    types::Map,
    Cnf, Grammar,
};
use std::collections::BTreeSet;

pub type Word = Vec<TerminalID>;

/// Collect every terminal string of at most `max_len` symbols derivable
/// from the start symbol.
pub fn words(g: &Grammar, max_len: usize) -> BTreeSet<Word> {
    words_from(g, g.start_symbol(), max_len)
}

/// Collect every terminal string of at most `max_len` symbols derivable from `root`.
///
/// The sets of bounded words per non-terminal are computed as a least fixed
/// point, so ε-productions and unit cycles need no special treatment.
pub fn words_from(g: &Grammar, root: NonterminalID, max_len: usize) -> BTreeSet<Word> {
    let mut lang: Map<NonterminalID, BTreeSet<Word>> = Map::default();
    loop {
        let mut changed = false;
        for p in g.productions() {
            let mut acc: BTreeSet<Word> = BTreeSet::from([vec![]]);
            for symbol in p.right {
                let mut next = BTreeSet::new();
                match *symbol {
                    SymbolID::T(t) => {
                        for prefix in &acc {
                            if prefix.len() < max_len {
                                let mut w = prefix.clone();
                                w.push(t);
                                next.insert(w);
                            }
                        }
                    }
                    SymbolID::N(n) => {
                        let Some(suffixes) = lang.get(&n) else {
                            acc.clear();
                            break;
                        };
                        for prefix in &acc {
                            for suffix in suffixes {
                                if prefix.len() + suffix.len() <= max_len {
                                    next.insert([&prefix[..], &suffix[..]].concat());
                                }
                            }
                        }
                    }
                }
                acc = next;
            }
            if acc.is_empty() {
                continue;
            }
            let entry = lang.entry(p.left).or_default();
            for w in acc {
                changed |= entry.insert(w);
            }
        }
        if !changed {
            break;
        }
    }
    lang.swap_remove(&root).unwrap_or_default()
}

/// Every word over the terminals of `g` of at most `max_len` symbols.
pub fn all_words(g: &Grammar, max_len: usize) -> Vec<Word> {
    let alphabet: Vec<TerminalID> = g.terminals().map(|t| t.id()).collect();
    let mut out = vec![vec![]];
    let mut frontier = vec![vec![]];
    for _ in 0..max_len {
        let mut next = vec![];
        for prefix in &frontier {
            for &t in &alphabet {
                let mut w: Word = prefix.clone();
                w.push(t);
                next.push(w);
            }
        }
        out.extend(next.iter().cloned());
        frontier = next;
    }
    out
}

pub fn render(g: &Grammar, w: &[TerminalID]) -> String {
    w.iter()
        .map(|t| g.terminal(*t).map_or("?", |t| t.name()))
        .collect()
}

/// Check that `cnf` generates the same bounded language as `original`, up
/// to the empty word, and that membership decided by CYK agrees with it.
pub fn assert_equivalent(original: &Grammar, cnf: &Cnf, max_len: usize) {
    let mut expected = words(original, max_len);
    if !cnf.derives_empty() {
        expected.remove(&vec![]);
    }
    let actual = words(cnf, max_len);
    let show = |set: &BTreeSet<Word>| -> Vec<String> {
        set.iter().map(|w| render(original, w)).collect()
    };
    assert_eq!(show(&actual), show(&expected), "bounded languages differ");

    for w in all_words(cnf, max_len) {
        assert_eq!(
            cnf.accepts(&w),
            expected.contains(&w),
            "CYK disagrees on {:?}",
            render(cnf, &w)
        );
    }
}
