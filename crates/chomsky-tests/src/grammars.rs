//! Grammar definition for integration tests.

use chomsky::grammar::{GrammarDef, GrammarDefError, SymbolID::*};

pub use chomsky::grammar::examples::{arithmetic, balanced, sample};

/// `a^n b^n` for `n >= 1`.
pub fn anbn(g: &mut GrammarDef) -> Result<(), GrammarDefError> {
    let s = g.nonterminal("S")?;
    let a = g.terminal("a")?;
    let b = g.terminal("b")?;

    g.rule(s, [T(a), N(s), T(b)])?;
    g.rule(s, [T(a), T(b)])?;
    Ok(())
}

/// Even-length palindromes over `{a, b}`, routed through a unit cycle.
pub fn palindromes(g: &mut GrammarDef) -> Result<(), GrammarDefError> {
    let s = g.nonterminal("S")?;
    let p = g.nonterminal("P")?;
    let q = g.nonterminal("Q")?;
    let a = g.terminal("a")?;
    let b = g.terminal("b")?;

    g.rule(s, [N(p)])?;
    g.rule(p, [N(q)])?;
    g.rule(q, [N(s)])?;
    g.rule(q, [T(a), N(p), T(a)])?;
    g.rule(q, [T(b), N(p), T(b)])?;
    g.rule(q, [])?;
    Ok(())
}

/// Nullable symbols three levels deep, each also able to produce a terminal.
pub fn nullable_chain(g: &mut GrammarDef) -> Result<(), GrammarDefError> {
    let s = g.nonterminal("S")?;
    let a = g.nonterminal("A")?;
    let b = g.nonterminal("B")?;
    let c = g.nonterminal("C")?;
    let x = g.terminal("x")?;
    let y = g.terminal("y")?;
    let z = g.terminal("z")?;

    g.rule(s, [N(a), N(b), N(c), N(a)])?;
    g.rule(a, [T(x)])?;
    g.rule(a, [N(b), N(c)])?;
    g.rule(b, [T(y), N(b)])?;
    g.rule(b, [])?;
    g.rule(c, [T(z)])?;
    g.rule(c, [N(b)])?;
    Ok(())
}

/// A long body of mixed symbols next to symbols that are useless in both senses.
pub fn long_bodies(g: &mut GrammarDef) -> Result<(), GrammarDefError> {
    let s = g.nonterminal("S")?;
    let a = g.nonterminal("A")?;
    let dead = g.nonterminal("Dead")?;
    let lost = g.nonterminal("Lost")?;
    let x = g.terminal("x")?;
    let y = g.terminal("y")?;

    g.rule(s, [T(x), N(a), T(y), N(a), T(x)])?;
    g.rule(s, [N(a), N(dead)])?;
    g.rule(a, [T(y)])?;
    g.rule(a, [T(x), T(x)])?;
    g.rule(dead, [T(x), N(dead)])?;
    g.rule(lost, [T(y)])?;
    Ok(())
}
