//! Conversion into Chomsky normal form.

use crate::{
    grammar::{FreshKind, Grammar, NonterminalID, SymbolID, TerminalID},
    pipeline::{Cnf, NormalizeError, Reachable, Stage},
    types::Map,
};

/// The source of fresh non-terminals for a single normalization run.
///
/// Minted symbols get IDs that no other non-terminal of the grammar uses and
/// names of the form `$T1`, `$X2`, ... which declared names cannot take.
#[derive(Debug, Default)]
pub struct FreshSupply {
    serial: u32,
}

impl FreshSupply {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&mut self, g: &mut Grammar, kind: FreshKind) -> Result<NonterminalID, NormalizeError> {
        let exhausted = || NormalizeError::FreshSymbolsExhausted {
            stage: Stage::Normalization,
        };
        let serial = self.serial.checked_add(1).ok_or_else(exhausted)?;
        let id = g.mint(kind, serial).ok_or_else(exhausted)?;
        self.serial = serial;
        tracing::trace!("minted {}", g.display_nonterminal(id));
        Ok(id)
    }
}

/// Bring a reduced grammar into Chomsky normal form.
///
/// Terminals inside bodies of two or more symbols are replaced by proxy
/// non-terminals (one per terminal), then bodies longer than two are split
/// into a right-branching chain of pairs. With `derives_empty`, a fresh start
/// symbol takes over the old start's bodies plus the empty body.
#[tracing::instrument(skip_all)]
pub fn normalize(grammar: Reachable, derives_empty: bool) -> Result<Cnf, NormalizeError> {
    let mut supply = FreshSupply::new();
    let mut grammar = grammar.into_inner();
    let source = grammar.take_productions();

    let mut proxies: Map<TerminalID, NonterminalID> = Map::default();
    let mut isolated = Vec::with_capacity(source.len());
    for (&left, bodies) in &source {
        for body in bodies {
            if body.len() < 2 {
                isolated.push((left, body.clone()));
                continue;
            }
            let mut replaced = Vec::with_capacity(body.len());
            for &symbol in body {
                let symbol = match symbol {
                    SymbolID::T(t) => match proxies.get(&t) {
                        Some(&proxy) => SymbolID::N(proxy),
                        None => {
                            let proxy = supply.mint(&mut grammar, FreshKind::TerminalProxy)?;
                            grammar.insert_production(proxy, vec![symbol]);
                            proxies.insert(t, proxy);
                            SymbolID::N(proxy)
                        }
                    },
                    SymbolID::N(..) => symbol,
                };
                replaced.push(symbol);
            }
            isolated.push((left, replaced));
        }
    }
    tracing::debug!("{} terminal(s) isolated", proxies.len());

    for (left, body) in isolated {
        binarize(&mut grammar, &mut supply, left, body)?;
    }

    if derives_empty {
        let old_start = grammar.start_symbol();
        let start = supply.mint(&mut grammar, FreshKind::Start)?;
        let bodies: Vec<Vec<SymbolID>> = grammar.productions_of(old_start).map(<[_]>::to_vec).collect();
        for body in bodies {
            grammar.insert_production(start, body);
        }
        grammar.insert_production(start, vec![]);
        grammar.set_start_symbol(start);
    }

    Cnf::new(grammar, derives_empty)
}

/// `A -> s1 s2 ... sn` (n > 2) becomes
/// `A -> s1 X1, X1 -> s2 X2, ..., X(n-2) -> s(n-1) sn`.
fn binarize(
    grammar: &mut Grammar,
    supply: &mut FreshSupply,
    left: NonterminalID,
    body: Vec<SymbolID>,
) -> Result<(), NormalizeError> {
    if body.len() <= 2 {
        grammar.insert_production(left, body);
        return Ok(());
    }

    let (init, last_two) = body.split_at(body.len() - 2);
    let mut head = left;
    for &symbol in init {
        let link = supply.mint(grammar, FreshKind::Chain)?;
        grammar.insert_production(head, vec![symbol, SymbolID::N(link)]);
        head = link;
    }
    grammar.insert_production(head, last_two.to_vec());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        grammar::{examples, Origin},
        pipeline::{normalize as run, Config},
    };

    fn proxies_of(g: &Grammar, t: TerminalID) -> Vec<NonterminalID> {
        g.productions()
            .filter(|p| p.right == [SymbolID::T(t)])
            .filter(|p| {
                matches!(
                    g.nonterminal(p.left).map(|n| n.origin()),
                    Some(Origin::Fresh {
                        kind: FreshKind::TerminalProxy,
                        ..
                    })
                )
            })
            .map(|p| p.left)
            .collect()
    }

    #[test]
    fn terminal_proxies_are_shared() {
        let g = Grammar::from_str("S -> aA | Ba; A -> a; B -> b").unwrap();
        let cnf = run(&g).unwrap();
        let a = cnf.terminal_by_name("a").unwrap();

        let proxies = proxies_of(&cnf, a);
        assert_eq!(proxies.len(), 1);
        let s = cnf.nonterminal_by_name("S").unwrap();
        let na = cnf.nonterminal_by_name("A").unwrap();
        let nb = cnf.nonterminal_by_name("B").unwrap();
        assert!(cnf.has_production(s, &[SymbolID::N(proxies[0]), SymbolID::N(na)]));
        assert!(cnf.has_production(s, &[SymbolID::N(nb), SymbolID::N(proxies[0])]));
    }

    #[test]
    fn long_bodies_become_chains() {
        let g = Grammar::from_str("S -> ABCD; A -> a; B -> b; C -> c; D -> d").unwrap();
        let cnf = run(&g).unwrap();
        let chains = cnf
            .nonterminals()
            .filter(|n| {
                matches!(
                    n.origin(),
                    Origin::Fresh {
                        kind: FreshKind::Chain,
                        ..
                    }
                )
            })
            .count();
        assert_eq!(chains, 2);
        assert!(cnf.productions().all(|p| p.right.len() <= 2));
        assert!(cnf.accepts(&cnf.word("abcd").unwrap()));
        assert!(!cnf.accepts(&cnf.word("abc").unwrap()));
    }

    #[test]
    fn fresh_names_do_not_clash() {
        // `T1` and `X2` are ordinary declared names here.
        let g = Grammar::define(|g| {
            use SymbolID::*;
            let t1 = g.nonterminal("T1")?;
            let x2 = g.nonterminal("X2")?;
            let a = g.terminal("a")?;
            g.rule(t1, [T(a), N(x2), T(a)])?;
            g.rule(x2, [T(a)])?;
            Ok(())
        })
        .unwrap();
        let cnf = run(&g).unwrap();

        let names: Vec<String> = cnf.nonterminals().map(|n| n.to_string()).collect();
        let unique: crate::types::Set<&String> = names.iter().collect();
        assert_eq!(names.len(), unique.len(), "{:?}", names);
        assert!(names.iter().any(|n| n == "$T1"));
        assert!(names.iter().any(|n| n == "T1"));
    }

    #[test]
    fn fresh_symbols_run_out() {
        // 40001 declared symbols leave too few IDs for the 39998 chain links.
        let g = Grammar::define(|g| {
            let s = g.nonterminal("S")?;
            let a = g.terminal("a")?;
            let mut body = vec![];
            for i in 0..40_000 {
                let n = g.nonterminal(&format!("N{}", i))?;
                g.rule(n, [SymbolID::T(a)])?;
                body.push(SymbolID::N(n));
            }
            g.rule(s, body)?;
            Ok(())
        })
        .unwrap();

        let err = run(&g).unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::FreshSymbolsExhausted {
                stage: Stage::Normalization
            }
        ));
    }

    #[test]
    fn preserved_empty_string_uses_fresh_start() {
        let g = Grammar::define(examples::balanced).unwrap();
        let cnf = Config::new().preserve_empty_string(true).normalize(&g).unwrap();

        assert!(cnf.derives_empty());
        let start = cnf.start_symbol();
        assert!(matches!(
            cnf.nonterminal(start).map(|n| n.origin()),
            Some(Origin::Fresh {
                kind: FreshKind::Start,
                ..
            })
        ));
        assert!(cnf.has_production(start, &[]));
        assert!(cnf
            .productions()
            .all(|p| p.right.iter().all(|s| *s != SymbolID::N(start))));
        assert!(cnf.accepts(&[]));
        assert!(cnf.accepts(&cnf.word("(())()").unwrap()));
        assert!(!cnf.accepts(&cnf.word("(()").unwrap()));
    }

    #[test]
    fn dropped_empty_string() {
        let g = Grammar::define(examples::balanced).unwrap();
        let cnf = run(&g).unwrap();
        assert!(!cnf.derives_empty());
        assert!(!cnf.accepts(&[]));
        assert!(cnf.accepts(&cnf.word("()").unwrap()));
        assert!(cnf.productions().all(|p| !p.is_epsilon()));
    }
}
