//! Conversion of context-free grammars into Chomsky normal form.

pub mod cnf;
pub mod cyk;
pub mod digraph;
pub mod epsilon;
pub mod grammar;
pub mod nullable;
pub mod pipeline;
pub mod productive;
pub mod reachability;
pub mod syntax;
pub mod types;
pub mod unit;

pub use crate::{
    grammar::{Declarations, Grammar, GrammarDef, GrammarDefError},
    pipeline::{normalize, Cnf, Config, EmptyStringPolicy, NormalizeError, Stage},
};
