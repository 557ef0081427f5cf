use std::collections::{BTreeSet, VecDeque};
use std::fmt::{self, Display};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use crate::{Alphabet, Map, Set};

/// The label token of a transition that consumes no input.
pub const EPSILON: &str = "ε";

/// Presentational only; carried through import and export untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
  pub x: f64,
  pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct State {
  pub name: String,
  pub starting: bool,
  pub accepting: bool,
  pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
  pub from: String,
  pub to: String,
  pub label: Label,
}

/// The comma-separated tokens of a transition label, trimmed.
///
/// Tokens are kept as written: a DFA label may only hold single
/// characters, an NFA label may also hold [`EPSILON`], and a GNFA label
/// may be a whole regular expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Label(Vec<String>);

impl Label {
  pub fn parse(source: &str) -> Self {
    Self(source.split(',').map(|token| token.trim().to_owned()).collect())
  }

  pub fn epsilon() -> Self {
    Self(vec![EPSILON.to_owned()])
  }

  pub fn from_symbols<I>(symbols: I) -> Self
    where I: IntoIterator<Item = char>
  {
    let symbols = symbols.into_iter().collect::<BTreeSet<_>>();
    Self(symbols.into_iter().map(String::from).collect())
  }

  pub(crate) fn from_tokens(tokens: Vec<String>) -> Self {
    Self(tokens)
  }

  pub fn tokens(&self) -> impl Iterator<Item = &str> {
    self.0.iter().map(|token| token.as_str())
  }

  /// Single-character tokens other than [`EPSILON`].
  pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
    self.tokens().filter_map(as_symbol)
  }

  pub fn has_epsilon(&self) -> bool {
    self.tokens().any(|token| token == EPSILON)
  }

  /// The label text with the tokens rejoined as written, without spaces.
  pub fn source(&self) -> String {
    self.0.join(",")
  }

  /// Whether every token is a single symbol or [`EPSILON`].
  ///
  /// With an alphabet, symbols must belong to it. Without one, any single
  /// character that is not a regex operator counts as a symbol.
  pub fn is_plain(&self, alphabet: Option<&Alphabet>) -> bool {
    !self.0.is_empty() && self.tokens().all(|token| {
      if token == EPSILON {
        return true;
      }
      match as_symbol(token) {
        Some(c) => match alphabet {
          Some(alphabet) => alphabet.contains(&c),
          None => !matches!(c, '*' | '+' | '|' | '(' | ')'),
        },
        None => false,
      }
    })
  }
}

pub(crate) fn as_symbol(token: &str) -> Option<char> {
  let mut chars = token.chars();
  match (chars.next(), chars.next()) {
    (Some(c), None) if token != EPSILON => Some(c),
    _ => None,
  }
}

impl From<&str> for Label {
  fn from(source: &str) -> Self {
    Self::parse(source)
  }
}

impl Display for Label {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}", self.0.iter().join(", "))
  }
}

/// A state graph shared by NFAs and DFAs.
///
/// States are keyed by name. Nothing here enforces determinism; see
/// [`crate::Dfa::validate`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Automaton {
  pub states: Map<String, State>,
  pub transitions: Vec<Transition>,
}

impl Automaton {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds a state, replacing any state with the same name.
  pub fn add_state(&mut self, name: &str, starting: bool, accepting: bool) {
    self.states.insert(name.to_owned(), State {
      name: name.to_owned(),
      starting,
      accepting,
      position: None,
    });
  }

  pub fn add_transition<L>(&mut self, from: &str, to: &str, label: L)
    where L: Into<Label>
  {
    self.transitions.push(Transition {
      from: from.to_owned(),
      to: to.to_owned(),
      label: label.into(),
    });
  }

  pub fn state(&self, name: &str) -> Option<&State> {
    self.states.get(name)
  }

  pub fn start_states(&self) -> impl Iterator<Item = &State> {
    self.states.values().filter(|state| state.starting)
  }

  pub fn accepting_states(&self) -> impl Iterator<Item = &State> {
    self.states.values().filter(|state| state.accepting)
  }

  pub fn outgoing<'a>(
    &'a self,
    name: &'a str
  ) -> impl Iterator<Item = &'a Transition> + 'a {
    self.transitions.iter().filter(move |t| t.from == name)
  }

  /// Names of the states reachable from any start state, in BFS order.
  pub fn reachable(&self) -> Set<&str> {
    let mut visited = Set::new();
    let mut queue = VecDeque::new();

    for state in self.start_states() {
      if visited.insert(state.name.as_str()) {
        queue.push_back(state.name.as_str());
      }
    }

    while let Some(name) = queue.pop_front() {
      for t in self.outgoing(name) {
        if self.states.contains_key(&t.to) && visited.insert(t.to.as_str()) {
          queue.push_back(t.to.as_str());
        }
      }
    }

    visited
  }

  /// Symbols on transitions leaving reachable states, excluding ε.
  pub fn alphabet(&self) -> Alphabet {
    let reachable = self.reachable();
    self.transitions.iter()
      .filter(|t| reachable.contains(t.from.as_str()))
      .flat_map(|t| t.label.symbols())
      .collect()
  }

  /// A copy with every accepting flag negated.
  pub fn invert(&self) -> Self {
    let mut inverted = self.clone();
    for state in inverted.states.values_mut() {
      state.accepting = !state.accepting;
    }
    inverted
  }
}
