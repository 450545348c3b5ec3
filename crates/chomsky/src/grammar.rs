//! Grammar types.

use crate::types::{Map, Set};
use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TerminalID(u16);
impl fmt::Debug for TerminalID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T#{:03}", self.0)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NonterminalID(u16);
impl fmt::Debug for NonterminalID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N#{:03}", self.0)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub enum SymbolID {
    T(TerminalID),
    N(NonterminalID),
}
impl SymbolID {
    pub fn nonterminal(self) -> Option<NonterminalID> {
        match self {
            Self::N(n) => Some(n),
            Self::T(..) => None,
        }
    }
}
impl fmt::Debug for SymbolID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::T(t) => write!(f, "{:?}", t),
            Self::N(n) => write!(f, "{:?}", n),
        }
    }
}

/// The set of non-terminals, stored as a bitmap over raw IDs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NonterminalSet {
    inner: bit_set::BitSet,
}
impl NonterminalSet {
    pub fn contains(&self, id: NonterminalID) -> bool {
        self.inner.contains(id.0.into())
    }
    pub fn insert(&mut self, id: NonterminalID) -> bool {
        self.inner.insert(id.0.into())
    }
    pub fn union_with(&mut self, other: &Self) {
        self.inner.union_with(&other.inner)
    }
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
    pub fn len(&self) -> usize {
        self.inner.len()
    }
    pub fn iter(&self) -> impl Iterator<Item = NonterminalID> + '_ {
        self.inner.iter().map(|raw| {
            // only values inserted through `NonterminalID` live in the bitmap.
            NonterminalID(raw as u16)
        })
    }
}
impl FromIterator<NonterminalID> for NonterminalSet {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = NonterminalID>,
    {
        Self {
            inner: iter.into_iter().map(|n| n.0.into()).collect(),
        }
    }
}
impl crate::digraph::Set for NonterminalSet {
    fn union_with(&mut self, other: &Self) {
        self.union_with(other)
    }
}

#[derive(Debug, Clone)]
pub struct Terminal {
    id: TerminalID,
    name: String,
}
impl Terminal {
    pub fn id(&self) -> TerminalID {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
}
impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The reason a non-terminal was minted by the normalizer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FreshKind {
    /// Stands for one terminal inside a body of two or more symbols.
    TerminalProxy,
    /// A link in the chain that splits a long body into pairs.
    Chain,
    /// A new start symbol that may derive the empty word.
    Start,
}
impl FreshKind {
    fn prefix(self) -> char {
        match self {
            Self::TerminalProxy => 'T',
            Self::Chain => 'X',
            Self::Start => 'S',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Origin {
    Declared(String),
    Fresh { kind: FreshKind, serial: u32 },
}

#[derive(Debug, Clone)]
pub struct Nonterminal {
    id: NonterminalID,
    origin: Origin,
}
impl Nonterminal {
    pub fn id(&self) -> NonterminalID {
        self.id
    }
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Return the declared name, or `None` for minted symbols.
    pub fn declared_name(&self) -> Option<&str> {
        match &self.origin {
            Origin::Declared(name) => Some(name),
            Origin::Fresh { .. } => None,
        }
    }
}
impl fmt::Display for Nonterminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.origin {
            Origin::Declared(name) => f.write_str(name),
            // `$` never starts a declared name.
            Origin::Fresh { kind, serial } => write!(f, "${}{}", kind.prefix(), serial),
        }
    }
}

/// A borrowed view of a single production rule.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Production<'g> {
    pub left: NonterminalID,
    pub right: &'g [SymbolID],
}
impl<'g> Production<'g> {
    pub fn is_epsilon(&self) -> bool {
        self.right.is_empty()
    }

    /// Whether the body is exactly one non-terminal.
    pub fn is_unit(&self) -> bool {
        matches!(self.right, [SymbolID::N(..)])
    }

    // `"LHS -> R1 R2 R3"`
    pub fn display(self, g: &'g Grammar) -> DisplayProduction<'g> {
        DisplayProduction {
            production: self,
            grammar: g,
        }
    }
}

pub struct DisplayProduction<'g> {
    production: Production<'g>,
    grammar: &'g Grammar,
}
impl fmt::Display for DisplayProduction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = self.grammar;
        write!(f, "{} -> ", g.display_nonterminal(self.production.left))?;
        if self.production.right.is_empty() {
            return f.write_str("ε");
        }
        for (i, symbol) in self.production.right.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", g.display_symbol(*symbol))?;
        }
        Ok(())
    }
}

pub(crate) type Productions = Map<NonterminalID, Set<Vec<SymbolID>>>;

/// A context-free grammar `(VN, VT, P, S)`.
///
/// Terminals and non-terminals live in disjoint ID spaces. Production bodies
/// of the same head form a set, so inserting a duplicate is a no-op.
#[derive(Debug, Clone)]
pub struct Grammar {
    terminals: Map<TerminalID, Terminal>,
    nonterminals: Map<NonterminalID, Nonterminal>,
    productions: Productions,
    start_symbol: NonterminalID,
    // Exceeds `u16::MAX` once every ID has been handed out.
    next_nonterminal: u32,
}

impl Grammar {
    /// Define a grammar using the specified function.
    pub fn define<F>(f: F) -> Result<Self, GrammarDefError>
    where
        F: FnOnce(&mut GrammarDef) -> Result<(), GrammarDefError>,
    {
        let mut def = GrammarDef {
            terminals: Map::default(),
            nonterminals: Map::default(),
            productions: Map::default(),
            start: None,
            names: Set::default(),
            next_terminal: 0,
            next_nonterminal: 0,
        };
        f(&mut def)?;
        def.end()
    }

    /// Parse a grammar from its textual notation, inferring the alphabets.
    ///
    /// Rule heads become non-terminals, every other symbol a terminal, and
    /// the head of the first rule the start symbol.
    pub fn from_str(source: &str) -> Result<Self, GrammarDefError> {
        Self::from_str_with(source, &Declarations::default())
    }

    /// Parse a grammar from its textual notation over explicitly declared alphabets.
    ///
    /// Symbols missing from `decls` are rejected rather than inferred. If
    /// `decls` declares no symbols at all, the alphabets are inferred as in
    /// [`Grammar::from_str`] and only the start symbol is taken from it.
    pub fn from_str_with(source: &str, decls: &Declarations) -> Result<Self, GrammarDefError> {
        let parsed = crate::syntax::parse(source).map_err(GrammarDefError::Syntax)?;
        let infer = decls.nonterminals.is_empty() && decls.terminals.is_empty();
        Self::define(|g| {
            let mut symbols = Map::default();
            if infer {
                for rule in &parsed.rules {
                    if !symbols.contains_key(&*rule.left) {
                        let n = g.nonterminal(&rule.left)?;
                        symbols.insert(&*rule.left, SymbolID::N(n));
                    }
                }
                for elem in parsed
                    .rules
                    .iter()
                    .flat_map(|r| &r.productions)
                    .flat_map(|p| &p.elems)
                {
                    if !symbols.contains_key(&**elem) {
                        let t = g.terminal(elem)?;
                        symbols.insert(&**elem, SymbolID::T(t));
                    }
                }
            } else {
                for name in &decls.nonterminals {
                    symbols.insert(&**name, SymbolID::N(g.nonterminal(name)?));
                }
                for name in &decls.terminals {
                    symbols.insert(&**name, SymbolID::T(g.terminal(name)?));
                }
            }
            if let Some(name) = &decls.start {
                match symbols.get(&**name) {
                    Some(SymbolID::N(start)) => g.start_symbol(*start)?,
                    Some(SymbolID::T(..)) => return Err(GrammarDefError::TerminalHead(name.clone())),
                    None => return Err(GrammarDefError::UndeclaredSymbol(name.clone())),
                }
            }
            define_rules(g, &parsed, &symbols)
        })
    }

    pub fn terminals(&self) -> impl Iterator<Item = &Terminal> + '_ {
        self.terminals.values()
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = &Nonterminal> + '_ {
        self.nonterminals.values()
    }

    pub fn terminal(&self, id: TerminalID) -> Option<&Terminal> {
        self.terminals.get(&id)
    }

    pub fn nonterminal(&self, id: NonterminalID) -> Option<&Nonterminal> {
        self.nonterminals.get(&id)
    }

    pub fn num_terminals(&self) -> usize {
        self.terminals.len()
    }

    pub fn num_nonterminals(&self) -> usize {
        self.nonterminals.len()
    }

    pub fn start_symbol(&self) -> NonterminalID {
        self.start_symbol
    }

    pub fn has_terminal(&self, id: TerminalID) -> bool {
        self.terminals.contains_key(&id)
    }

    pub fn has_nonterminal(&self, id: NonterminalID) -> bool {
        self.nonterminals.contains_key(&id)
    }

    pub fn has_symbol(&self, symbol: SymbolID) -> bool {
        match symbol {
            SymbolID::T(t) => self.has_terminal(t),
            SymbolID::N(n) => self.has_nonterminal(n),
        }
    }

    pub fn terminal_by_name(&self, name: &str) -> Option<TerminalID> {
        self.terminals
            .values()
            .find(|t| t.name == name)
            .map(|t| t.id)
    }

    pub fn nonterminal_by_name(&self, name: &str) -> Option<NonterminalID> {
        self.nonterminals
            .values()
            .find(|n| n.declared_name() == Some(name))
            .map(|n| n.id)
    }

    /// Translate a string into terminals, one character per terminal.
    ///
    /// Returns `None` if some character does not name a terminal.
    pub fn word(&self, s: &str) -> Option<Vec<TerminalID>> {
        let mut buf = [0u8; 4];
        s.chars()
            .map(|ch| self.terminal_by_name(ch.encode_utf8(&mut buf)))
            .collect()
    }

    pub fn productions(&self) -> impl Iterator<Item = Production<'_>> + '_ {
        self.productions.iter().flat_map(|(&left, bodies)| {
            bodies.iter().map(move |right| Production {
                left,
                right: &right[..],
            })
        })
    }

    /// Return the bodies of all productions whose head is `left`.
    pub fn productions_of(&self, left: NonterminalID) -> impl Iterator<Item = &[SymbolID]> + '_ {
        self.productions
            .get(&left)
            .into_iter()
            .flat_map(|bodies| bodies.iter().map(|body| &body[..]))
    }

    pub fn has_production(&self, left: NonterminalID, right: &[SymbolID]) -> bool {
        self.productions
            .get(&left)
            .map_or(false, |bodies| bodies.contains(right))
    }

    pub fn num_productions(&self) -> usize {
        self.productions.values().map(|bodies| bodies.len()).sum()
    }

    pub fn display_nonterminal(&self, id: NonterminalID) -> impl fmt::Display + '_ {
        DisplaySymbol {
            grammar: self,
            symbol: SymbolID::N(id),
        }
    }

    pub fn display_symbol(&self, symbol: SymbolID) -> impl fmt::Display + '_ {
        DisplaySymbol {
            grammar: self,
            symbol,
        }
    }

    /// Check the structural invariants every grammar value must satisfy.
    pub fn validate(&self) -> Result<(), Violation> {
        if !self.has_nonterminal(self.start_symbol) {
            return Err(Violation::UndeclaredStart(self.start_symbol));
        }

        let terminal_names: Set<&str> = self.terminals.values().map(|t| t.name()).collect();
        for nonterminal in self.nonterminals.values() {
            if let Some(name) = nonterminal.declared_name() {
                if terminal_names.contains(name) {
                    return Err(Violation::SharedName(name.to_owned()));
                }
            }
        }

        for (&left, bodies) in &self.productions {
            if !self.has_nonterminal(left) {
                return Err(Violation::UndeclaredHead(left));
            }
            for body in bodies {
                if let Some(&symbol) = body.iter().find(|s| !self.has_symbol(**s)) {
                    return Err(Violation::UndeclaredSymbol {
                        head: self.display_nonterminal(left).to_string(),
                        symbol,
                    });
                }
            }
        }

        Ok(())
    }

    /// Build a grammar over the same alphabets with the given productions.
    pub(crate) fn with_productions(&self, productions: Productions) -> Self {
        Self {
            terminals: self.terminals.clone(),
            nonterminals: self.nonterminals.clone(),
            productions,
            start_symbol: self.start_symbol,
            next_nonterminal: self.next_nonterminal,
        }
    }

    /// Drop every non-terminal outside `keep`, along with each production
    /// whose head or body mentions one of them.
    pub(crate) fn restrict_to(&mut self, keep: &NonterminalSet) {
        self.nonterminals.retain(|id, _| keep.contains(*id));
        self.productions.retain(|id, _| keep.contains(*id));
        for bodies in self.productions.values_mut() {
            bodies.retain(|body| {
                body.iter()
                    .all(|s| s.nonterminal().map_or(true, |n| keep.contains(n)))
            });
        }
        self.productions.retain(|_, bodies| !bodies.is_empty());
    }

    pub(crate) fn insert_production(&mut self, left: NonterminalID, right: Vec<SymbolID>) -> bool {
        self.productions.entry(left).or_default().insert(right)
    }

    pub(crate) fn set_start_symbol(&mut self, start: NonterminalID) {
        self.start_symbol = start;
    }

    pub(crate) fn take_productions(&mut self) -> Productions {
        std::mem::take(&mut self.productions)
    }

    /// Register a fresh non-terminal. Returns `None` once the ID space is used up.
    pub(crate) fn mint(&mut self, kind: FreshKind, serial: u32) -> Option<NonterminalID> {
        let id = NonterminalID(u16::try_from(self.next_nonterminal).ok()?);
        self.next_nonterminal += 1;
        self.nonterminals.insert(
            id,
            Nonterminal {
                id,
                origin: Origin::Fresh { kind, serial },
            },
        );
        Some(id)
    }
}

struct DisplaySymbol<'g> {
    grammar: &'g Grammar,
    symbol: SymbolID,
}
impl fmt::Display for DisplaySymbol<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol {
            SymbolID::T(t) => match self.grammar.terminal(t) {
                Some(t) => write!(f, "{}", t),
                None => write!(f, "{:?}", t),
            },
            SymbolID::N(n) => match self.grammar.nonterminal(n) {
                Some(n) => write!(f, "{}", n),
                None => write!(f, "{:?}", n),
            },
        }
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#### terminals: ")?;
        for (i, t) in self.terminals.values().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", t)?;
        }
        write!(f, "\n#### nonterminals: ")?;
        for (i, n) in self.nonterminals.values().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", n)?;
        }
        writeln!(
            f,
            "\n#### start: {}",
            self.display_nonterminal(self.start_symbol)
        )?;
        writeln!(f, "#### productions:")?;
        for p in self.productions() {
            writeln!(f, "- {}", p.display(self))?;
        }
        Ok(())
    }
}

/// Explicit alphabets and start symbol for [`Grammar::from_str_with`].
///
/// Without a `start`, the first non-terminal is used.
#[derive(Debug, Default, Clone)]
pub struct Declarations {
    pub nonterminals: Vec<String>,
    pub terminals: Vec<String>,
    pub start: Option<String>,
}

fn define_rules(
    g: &mut GrammarDef,
    parsed: &crate::syntax::ast::Grammar,
    symbols: &Map<&str, SymbolID>,
) -> Result<(), GrammarDefError> {
    let lookup = |name: &str| {
        symbols
            .get(name)
            .copied()
            .ok_or_else(|| GrammarDefError::UndeclaredSymbol(name.to_owned()))
    };
    for rule in &parsed.rules {
        let left = match lookup(&rule.left)? {
            SymbolID::N(n) => n,
            SymbolID::T(..) => return Err(GrammarDefError::TerminalHead(rule.left.clone())),
        };
        for production in &rule.productions {
            let right = production
                .elems
                .iter()
                .map(|elem| lookup(elem))
                .collect::<Result<Vec<_>, _>>()?;
            g.rule(left, right)?;
        }
    }
    Ok(())
}

/// The contextural values for building a `Grammar`.
#[derive(Debug)]
pub struct GrammarDef {
    terminals: Map<TerminalID, Terminal>,
    nonterminals: Map<NonterminalID, Nonterminal>,
    productions: Productions,
    start: Option<NonterminalID>,
    names: Set<String>,
    next_terminal: u32,
    next_nonterminal: u32,
}

impl GrammarDef {
    /// Declare a terminal symbol used in this grammar.
    pub fn terminal(&mut self, name: &str) -> Result<TerminalID, GrammarDefError> {
        let id = TerminalID(
            u16::try_from(self.next_terminal).map_err(|_| GrammarDefError::TooManySymbols)?,
        );
        self.claim_name(name)?;
        self.next_terminal += 1;
        self.terminals.insert(
            id,
            Terminal {
                id,
                name: name.to_owned(),
            },
        );
        Ok(id)
    }

    /// Declare a nonterminal symbol used in this grammar.
    pub fn nonterminal(&mut self, name: &str) -> Result<NonterminalID, GrammarDefError> {
        let id = NonterminalID(
            u16::try_from(self.next_nonterminal).map_err(|_| GrammarDefError::TooManySymbols)?,
        );
        self.claim_name(name)?;
        self.next_nonterminal += 1;
        self.nonterminals.insert(
            id,
            Nonterminal {
                id,
                origin: Origin::Declared(name.to_owned()),
            },
        );
        Ok(id)
    }

    /// Specify a production rule into this grammar. An empty body is an ε-production.
    ///
    /// Adding the same rule twice has no effect.
    pub fn rule<I>(&mut self, left: NonterminalID, right: I) -> Result<(), GrammarDefError>
    where
        I: IntoIterator<Item = SymbolID>,
    {
        self.productions
            .entry(left)
            .or_default()
            .insert(right.into_iter().collect());
        Ok(())
    }

    /// Specify the start symbol for this grammar.
    pub fn start_symbol(&mut self, symbol: NonterminalID) -> Result<(), GrammarDefError> {
        self.start.replace(symbol);
        Ok(())
    }

    fn claim_name(&mut self, name: &str) -> Result<(), GrammarDefError> {
        if name.is_empty() || name.starts_with('$') || name.chars().any(char::is_whitespace) {
            return Err(GrammarDefError::InvalidName(name.to_owned()));
        }
        if !self.names.insert(name.to_owned()) {
            return Err(GrammarDefError::DuplicateSymbol(name.to_owned()));
        }
        Ok(())
    }

    fn end(mut self) -> Result<Grammar, GrammarDefError> {
        // Falls back to the first declared nonterminal.
        let start = match self.start.take() {
            Some(start) => start,
            None => self
                .nonterminals
                .keys()
                .next()
                .copied()
                .ok_or(GrammarDefError::NoNonterminals)?,
        };

        let grammar = Grammar {
            terminals: self.terminals,
            nonterminals: self.nonterminals,
            productions: self.productions,
            start_symbol: start,
            next_nonterminal: self.next_nonterminal,
        };
        grammar.validate()?;
        Ok(grammar)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GrammarDefError {
    #[error("Syntax error: {}", _0)]
    Syntax(anyhow::Error),

    #[error("invalid symbol name: `{}'", _0)]
    InvalidName(String),

    #[error("the symbol `{}' has already been declared", _0)]
    DuplicateSymbol(String),

    #[error("the symbol `{}' is used but not declared", _0)]
    UndeclaredSymbol(String),

    #[error("the terminal `{}' cannot head a production", _0)]
    TerminalHead(String),

    #[error("the grammar has no nonterminal symbols")]
    NoNonterminals,

    #[error("too many symbols")]
    TooManySymbols,

    #[error("malformed grammar: {}", _0)]
    Malformed(#[from] Violation),
}

/// A broken grammar invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("the start symbol {:?} is not a declared nonterminal", _0)]
    UndeclaredStart(NonterminalID),

    #[error("the production head {:?} is not a declared nonterminal", _0)]
    UndeclaredHead(NonterminalID),

    #[error("a production of `{head}' refers to the undeclared symbol {symbol:?}")]
    UndeclaredSymbol { head: String, symbol: SymbolID },

    #[error("`{}' is declared both as a terminal and as a nonterminal", _0)]
    SharedName(String),

    #[error("the start symbol `{}' derives no terminal string", _0)]
    UnproductiveStart(String),

    #[error("the production `{}' is not in Chomsky normal form", _0)]
    NotInNormalForm(String),

    #[error("the production `{}' still derives the empty string", _0)]
    EpsilonProduction(String),

    #[error("the production `{}' is still a unit production", _0)]
    UnitProduction(String),
}

pub mod examples {
    use super::*;
    use SymbolID::*;

    /// ```text
    /// S -> a B | b A | B
    /// A -> b | a D | A S | b A B | ε
    /// B -> a | b S
    /// C -> A B
    /// D -> B B
    /// ```
    #[allow(nonstandard_style)]
    pub fn sample(g: &mut GrammarDef) -> Result<(), GrammarDefError> {
        let S = g.nonterminal("S")?;
        let A = g.nonterminal("A")?;
        let B = g.nonterminal("B")?;
        let C = g.nonterminal("C")?;
        let D = g.nonterminal("D")?;
        let a = g.terminal("a")?;
        let b = g.terminal("b")?;

        g.start_symbol(S)?;

        g.rule(S, [T(a), N(B)])?;
        g.rule(S, [T(b), N(A)])?;
        g.rule(S, [N(B)])?;

        g.rule(A, [T(b)])?;
        g.rule(A, [T(a), N(D)])?;
        g.rule(A, [N(A), N(S)])?;
        g.rule(A, [T(b), N(A), N(B)])?;
        g.rule(A, [])?;

        g.rule(B, [T(a)])?;
        g.rule(B, [T(b), N(S)])?;

        g.rule(C, [N(A), N(B)])?;

        g.rule(D, [N(B), N(B)])?;
        Ok(())
    }

    /// Balanced parentheses, including the empty word.
    ///
    /// ```text
    /// P -> ( P ) P | ε
    /// ```
    #[allow(nonstandard_style)]
    pub fn balanced(g: &mut GrammarDef) -> Result<(), GrammarDefError> {
        let P = g.nonterminal("P")?;
        let lparen = g.terminal("(")?;
        let rparen = g.terminal(")")?;

        g.rule(P, [T(lparen), N(P), T(rparen), N(P)])?;
        g.rule(P, [])?;
        Ok(())
    }

    /// Arithmetic expressions with unit chains and a useless symbol.
    ///
    /// ```text
    /// E -> E + T | T
    /// T -> T * F | F
    /// F -> ( E ) | n
    /// U -> U n
    /// ```
    #[allow(nonstandard_style)]
    pub fn arithmetic(g: &mut GrammarDef) -> Result<(), GrammarDefError> {
        let E = g.nonterminal("E")?;
        let T_ = g.nonterminal("T")?;
        let F = g.nonterminal("F")?;
        let U = g.nonterminal("U")?;
        let plus = g.terminal("+")?;
        let star = g.terminal("*")?;
        let lparen = g.terminal("(")?;
        let rparen = g.terminal(")")?;
        let num = g.terminal("n")?;

        g.start_symbol(E)?;

        g.rule(E, [N(E), T(plus), N(T_)])?;
        g.rule(E, [N(T_)])?;
        g.rule(T_, [N(T_), T(star), N(F)])?;
        g.rule(T_, [N(F)])?;
        g.rule(F, [T(lparen), N(E), T(rparen)])?;
        g.rule(F, [T(num)])?;
        g.rule(U, [N(U), T(num)])?;
        Ok(())
    }
}
