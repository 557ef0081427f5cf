mod automaton;
mod dfa;
mod gnfa;
mod isomorphism;
mod minimise;
mod nfa;
mod nfa_builder;
mod powerset_cons;
mod product;
mod search;
mod tabular_dfa;
mod thompson;
pub mod interchange;
pub mod trace;

use std::collections::BTreeSet;

pub use automaton::{Automaton, Label, Position, State, Transition, EPSILON};
pub use dfa::{BoolOp, Dfa, ValidationError, Verdict};
pub use gnfa::LabelError;
pub use interchange::Document;
pub use nfa::Nfa;
pub use thompson::compile_regex;
pub use trace::{TraceError, Tracer};

/// Insertion-ordered, so that every algorithm visits states in a
/// reproducible order.
pub type Map<K, V> = indexmap::IndexMap<K, V>;

pub type Set<K> = indexmap::IndexSet<K>;

pub type BiMap<K, V> = bimap::BiHashMap<K, V>;

/// Symbols are single characters; iteration is always sorted.
pub type Alphabet = BTreeSet<char>;
