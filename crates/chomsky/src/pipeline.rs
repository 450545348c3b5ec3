//! The typed sequence of rewriting stages.
//!
//! Each stage consumes the grammar type produced by its predecessor, so the
//! order `ε-elimination → unit elimination → productive filter →
//! reachability filter → normalization` is enforced by the compiler:
//!
//! ```text
//! Grammar ─epsilon::eliminate→ EpsilonFree ─unit::eliminate→ UnitFree
//!         ─productive::filter→ Productive ─reachability::filter→ Reachable
//!         ─cnf::normalize→ Cnf
//! ```

use crate::{
    cnf, epsilon,
    grammar::{Grammar, Production, SymbolID, TerminalID, Violation},
    nullable, productive, reachability, unit,
};
use std::{fmt, ops::Deref};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Stage {
    Input,
    EpsilonElimination,
    UnitElimination,
    ProductiveFilter,
    ReachabilityFilter,
    Normalization,
}
impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Input => "input grammar",
            Self::EpsilonElimination => "ε-production elimination",
            Self::UnitElimination => "unit production elimination",
            Self::ProductiveFilter => "non-productive symbol removal",
            Self::ReachabilityFilter => "inaccessible symbol removal",
            Self::Normalization => "Chomsky normalization",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("{stage}: {violation}")]
    Invariant {
        stage: Stage,
        #[source]
        violation: Violation,
    },

    #[error("{stage}: ran out of fresh nonterminal symbols")]
    FreshSymbolsExhausted { stage: Stage },
}

impl NormalizeError {
    pub fn stage(&self) -> Stage {
        match self {
            Self::Invariant { stage, .. } | Self::FreshSymbolsExhausted { stage } => *stage,
        }
    }

    pub(crate) fn at(stage: Stage) -> impl FnOnce(Violation) -> Self {
        move |violation| Self::Invariant { stage, violation }
    }
}

macro_rules! stage_grammar {
    ($(#[$meta:meta])* $Name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $Name(Grammar);

        impl $Name {
            pub fn into_inner(self) -> Grammar {
                self.0
            }
        }

        impl Deref for $Name {
            type Target = Grammar;
            fn deref(&self) -> &Grammar {
                &self.0
            }
        }
    };
}

stage_grammar! {
    /// A grammar without ε-productions.
    EpsilonFree
}
stage_grammar! {
    /// A grammar without ε-productions or unit productions.
    UnitFree
}
stage_grammar! {
    /// A unit-free grammar whose non-terminals all derive some terminal string.
    Productive
}
stage_grammar! {
    /// A productive grammar whose non-terminals are all reachable from the start symbol.
    Reachable
}

impl EpsilonFree {
    pub(crate) fn new(grammar: Grammar) -> Result<Self, NormalizeError> {
        let stage = Stage::EpsilonElimination;
        grammar.validate().map_err(NormalizeError::at(stage))?;
        forbid(&grammar, stage, |p| p.is_epsilon(), Violation::EpsilonProduction)?;
        Ok(Self(grammar))
    }
}

impl UnitFree {
    pub(crate) fn new(grammar: Grammar) -> Result<Self, NormalizeError> {
        let stage = Stage::UnitElimination;
        grammar.validate().map_err(NormalizeError::at(stage))?;
        forbid(&grammar, stage, |p| p.is_epsilon(), Violation::EpsilonProduction)?;
        forbid(&grammar, stage, |p| p.is_unit(), Violation::UnitProduction)?;
        Ok(Self(grammar))
    }
}

impl Productive {
    // Removing symbols cannot introduce ε- or unit productions.
    pub(crate) fn new(grammar: Grammar) -> Result<Self, NormalizeError> {
        grammar
            .validate()
            .map_err(NormalizeError::at(Stage::ProductiveFilter))?;
        Ok(Self(grammar))
    }
}

impl Reachable {
    pub(crate) fn new(grammar: Grammar) -> Result<Self, NormalizeError> {
        grammar
            .validate()
            .map_err(NormalizeError::at(Stage::ReachabilityFilter))?;
        Ok(Self(grammar))
    }
}

fn forbid(
    grammar: &Grammar,
    stage: Stage,
    pred: impl Fn(&Production<'_>) -> bool,
    violation: impl FnOnce(String) -> Violation,
) -> Result<(), NormalizeError> {
    match grammar.productions().find(|p| pred(p)) {
        Some(p) => Err(NormalizeError::Invariant {
            stage,
            violation: violation(p.display(grammar).to_string()),
        }),
        None => Ok(()),
    }
}

/// A grammar in Chomsky normal form.
///
/// Every body is either a single terminal or exactly two non-terminals. The
/// only exception is `S0 -> ε` on a fresh start symbol `S0`, present when
/// the empty string was preserved; `S0` then never occurs in any body.
#[derive(Debug, Clone)]
pub struct Cnf {
    grammar: Grammar,
    derives_empty: bool,
}

impl Cnf {
    pub(crate) fn new(grammar: Grammar, derives_empty: bool) -> Result<Self, NormalizeError> {
        let stage = Stage::Normalization;
        grammar.validate().map_err(NormalizeError::at(stage))?;

        let start = grammar.start_symbol();
        for p in grammar.productions() {
            let ok = match p.right {
                [SymbolID::T(..)] => true,
                [SymbolID::N(b), SymbolID::N(c)] => !derives_empty || (*b != start && *c != start),
                [] => derives_empty && p.left == start,
                _ => false,
            };
            if !ok {
                return Err(NormalizeError::Invariant {
                    stage,
                    violation: Violation::NotInNormalForm(p.display(&grammar).to_string()),
                });
            }
        }

        Ok(Self {
            grammar,
            derives_empty,
        })
    }

    /// Whether the empty string belongs to the language.
    pub fn derives_empty(&self) -> bool {
        self.derives_empty
    }

    /// Decide whether `word` belongs to the language of this grammar.
    pub fn accepts(&self, word: &[TerminalID]) -> bool {
        crate::cyk::recognize(self, word)
    }

    pub fn into_inner(self) -> Grammar {
        self.grammar
    }
}

impl Deref for Cnf {
    type Target = Grammar;
    fn deref(&self) -> &Grammar {
        &self.grammar
    }
}

/// What to do with the empty string when the start symbol is nullable.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum EmptyStringPolicy {
    /// Remove it from the language, as ε-elimination does.
    #[default]
    Drop,
    /// Keep it through a fresh start symbol `S0 -> ε`.
    Preserve,
}

/// The configuration of a normalization run.
#[derive(Debug, Default, Clone)]
pub struct Config {
    empty_string: EmptyStringPolicy,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn empty_string(mut self, policy: EmptyStringPolicy) -> Self {
        self.empty_string = policy;
        self
    }

    pub fn preserve_empty_string(self, enabled: bool) -> Self {
        self.empty_string(if enabled {
            EmptyStringPolicy::Preserve
        } else {
            EmptyStringPolicy::Drop
        })
    }

    pub fn normalize(&self, grammar: &Grammar) -> Result<Cnf, NormalizeError> {
        self.normalize_with(grammar, |_, _| {})
    }

    /// Run every stage, handing each intermediate grammar to `inspect`.
    #[tracing::instrument(skip_all)]
    pub fn normalize_with<F>(&self, grammar: &Grammar, mut inspect: F) -> Result<Cnf, NormalizeError>
    where
        F: FnMut(Stage, &Grammar),
    {
        grammar.validate().map_err(NormalizeError::at(Stage::Input))?;
        inspect(Stage::Input, grammar);

        let nullables = nullable::nullables(grammar);
        let derives_empty = self.empty_string == EmptyStringPolicy::Preserve
            && nullables.contains(grammar.start_symbol());
        tracing::debug!(
            "{} nullable symbol(s), start symbol derives ε: {}",
            nullables.len(),
            nullables.contains(grammar.start_symbol()),
        );

        let g = epsilon::eliminate(grammar.clone(), &nullables)?;
        inspect(Stage::EpsilonElimination, &g);

        let g = unit::eliminate(g)?;
        inspect(Stage::UnitElimination, &g);

        let g = productive::filter(g)?;
        inspect(Stage::ProductiveFilter, &g);

        let g = reachability::filter(g)?;
        inspect(Stage::ReachabilityFilter, &g);

        let g = cnf::normalize(g, derives_empty)?;
        inspect(Stage::Normalization, &g);

        Ok(g)
    }
}

/// Convert `grammar` into Chomsky normal form with the default configuration.
pub fn normalize(grammar: &Grammar) -> Result<Cnf, NormalizeError> {
    Config::new().normalize(grammar)
}
