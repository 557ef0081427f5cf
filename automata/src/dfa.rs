use std::fmt::{self, Display};
use std::ops::{Deref, DerefMut};
use itertools::Itertools;
use thiserror::Error;
use crate::automaton::as_symbol;
use crate::tabular_dfa::TabularDfa;
use crate::{isomorphism, minimise, product};
use crate::{Alphabet, Automaton, EPSILON};

/// A deterministic automaton, as far as the type goes.
///
/// Nothing is checked on construction: a graph coming from an editor may
/// be incomplete at any point. Every algorithm validates first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dfa(Automaton);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
  Accept,
  Reject,
  /// The automaton is not a valid DFA, or some input character has no
  /// transition.
  Crash,
}

/// Accepting-state combinators for [`Dfa::combine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
  And,
  Or,
  Xor,
  /// Accepted by the left automaton but not the right one.
  Minus,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("there is no start state")]
  NoStartState,
  #[error("there are {} start states: {}", .0.len(), .0.join(", "))]
  MultipleStartStates(Vec<String>),
  #[error("a transition refers to the unknown state {0}")]
  UnknownState(String),
  #[error("state {state} has a transition with an empty label")]
  EmptyLabel { state: String },
  #[error("state {state} has an ε-transition")]
  Epsilon { state: String },
  #[error("state {state} has a transition on `{token}`, which is not a single symbol")]
  MultiCharSymbol { state: String, token: String },
  #[error("state {state} has more than one transition on {symbol}")]
  DuplicateSymbol { state: String, symbol: char },
  #[error("state {state} has no transition on {}", .symbols.iter().join(", "))]
  MissingSymbols { state: String, symbols: Vec<char> },
  #[error("state {state} has transitions on {}, which are not in the alphabet", .symbols.iter().join(", "))]
  ExtraSymbols { state: String, symbols: Vec<char> },
  #[error("there are no transitions")]
  NoTransitions,
}

/// Checks, in order: a single start state, transitions between existing
/// states, well-formed labels, one transition per state and symbol, and
/// that there is at least one transition.
///
/// Without a fixed `alphabet`, the largest set of symbols leaving any one
/// state is taken to be the alphabet. Returns the alphabet.
pub(crate) fn validate(
  dfa: &Automaton,
  alphabet: Option<&Alphabet>
) -> Result<Alphabet, ValidationError> {
  let starts = dfa.start_states()
    .map(|state| state.name.clone())
    .collect::<Vec<_>>();
  match starts.len() {
    0 => return Err(ValidationError::NoStartState),
    1 => {}
    _ => return Err(ValidationError::MultipleStartStates(starts)),
  }

  for t in &dfa.transitions {
    for name in &[&t.from, &t.to] {
      if !dfa.states.contains_key(*name) {
        return Err(ValidationError::UnknownState((*name).clone()));
      }
    }
  }

  let mut symbol_sets = Vec::with_capacity(dfa.states.len());

  for name in dfa.states.keys() {
    let mut symbols = Alphabet::new();

    for t in dfa.outgoing(name) {
      if t.label.tokens().next().is_none() {
        return Err(ValidationError::EmptyLabel { state: name.clone() });
      }

      for token in t.label.tokens() {
        if token.is_empty() {
          return Err(ValidationError::EmptyLabel { state: name.clone() });
        }
        if token == EPSILON {
          return Err(ValidationError::Epsilon { state: name.clone() });
        }
        let c = as_symbol(token).ok_or_else(|| ValidationError::MultiCharSymbol {
          state: name.clone(),
          token: token.to_owned(),
        })?;
        if !symbols.insert(c) {
          return Err(ValidationError::DuplicateSymbol {
            state: name.clone(),
            symbol: c,
          });
        }
      }
    }

    symbol_sets.push((name, symbols));
  }

  let alphabet = match alphabet {
    Some(alphabet) => alphabet.clone(),
    None => {
      let mut largest = Alphabet::new();
      for (_, symbols) in &symbol_sets {
        if symbols.len() > largest.len() {
          largest = symbols.clone();
        }
      }
      largest
    }
  };

  for (name, symbols) in &symbol_sets {
    let missing = alphabet.difference(symbols).copied().collect::<Vec<_>>();
    if !missing.is_empty() {
      return Err(ValidationError::MissingSymbols {
        state: (*name).clone(),
        symbols: missing,
      });
    }

    let extra = symbols.difference(&alphabet).copied().collect::<Vec<_>>();
    if !extra.is_empty() {
      return Err(ValidationError::ExtraSymbols {
        state: (*name).clone(),
        symbols: extra,
      });
    }
  }

  if dfa.transitions.is_empty() {
    return Err(ValidationError::NoTransitions);
  }

  Ok(alphabet)
}

impl Dfa {
  /// Returns the alphabet if this is a complete DFA.
  pub fn validate(&self) -> Result<Alphabet, ValidationError> {
    validate(self, None)
  }

  /// Like [`Dfa::validate`], against an externally fixed alphabet.
  pub fn validate_with(&self, alphabet: &Alphabet) -> Result<Alphabet, ValidationError> {
    validate(self, Some(alphabet))
  }

  pub fn simulate_word(&self, input: &str) -> Verdict {
    let table = match TabularDfa::new(self, None) {
      Ok(table) => table,
      Err(_) => return Verdict::Crash,
    };

    let mut state = table.start;
    for c in input.chars() {
      match table.transition(state, c) {
        Some(next) => state = next,
        None => return Verdict::Crash,
      }
    }

    if table.accepting[state] {
      Verdict::Accept
    } else {
      Verdict::Reject
    }
  }

  /// The minimal DFA for the same language, without unreachable states.
  pub fn minimise(&self) -> Result<Dfa, ValidationError> {
    let table = TabularDfa::new(self, None)?;
    Ok(minimise::minimise(&table).into_dfa())
  }

  /// A copy with every accepting flag negated. Over a valid DFA this is
  /// the complement language.
  pub fn invert(&self) -> Dfa {
    Dfa(self.0.invert())
  }

  /// Product construction: the pair `(a, b)` accepts iff
  /// `accept(a.accepting, b.accepting)`.
  ///
  /// The automata may have different alphabets; the product runs over
  /// their union.
  pub fn combine<F>(&self, other: &Dfa, accept: F) -> Result<Dfa, ValidationError>
    where F: Fn(bool, bool) -> bool
  {
    let left = TabularDfa::new(self, None)?;
    let right = TabularDfa::new(other, None)?;
    Ok(product::product(&left, &right, accept).into_dfa())
  }

  pub fn combine_with(&self, other: &Dfa, op: BoolOp) -> Result<Dfa, ValidationError> {
    self.combine(other, |a, b| op.apply(a, b))
  }

  /// Whether both automata have the same alphabet and language.
  pub fn equivalent(&self, other: &Dfa) -> Result<bool, ValidationError> {
    if self.validate()? != other.validate()? {
      return Ok(false);
    }
    Ok(self.combine_with(other, BoolOp::Xor)?.empty())
  }

  /// A word accepted by exactly one of the two automata.
  pub fn distinguishing_string(&self, other: &Dfa) -> Result<Option<String>, ValidationError> {
    Ok(self.combine_with(other, BoolOp::Xor)?.find_accepting_string())
  }

  /// Equality up to renaming states, without merging any.
  pub fn isomorphic(&self, other: &Dfa) -> bool {
    match (TabularDfa::new(self, None), TabularDfa::new(other, None)) {
      (Ok(left), Ok(right)) => isomorphism::isomorphic(&left, &right),
      _ => false,
    }
  }

  pub fn into_inner(self) -> Automaton {
    self.0
  }
}

impl BoolOp {
  pub fn apply(self, a: bool, b: bool) -> bool {
    match self {
      Self::And => a && b,
      Self::Or => a || b,
      Self::Xor => a != b,
      Self::Minus => a && !b,
    }
  }
}

impl Display for Verdict {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let s = match self {
      Self::Accept => "Accept",
      Self::Reject => "Reject",
      Self::Crash => "Crash",
    };
    write!(f, "{}", s)
  }
}

impl From<Automaton> for Dfa {
  fn from(automaton: Automaton) -> Self {
    Self(automaton)
  }
}

impl Deref for Dfa {
  type Target = Automaton;

  fn deref(&self) -> &Automaton {
    &self.0
  }
}

impl DerefMut for Dfa {
  fn deref_mut(&mut self) -> &mut Automaton {
    &mut self.0
  }
}
