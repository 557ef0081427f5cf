use std::ops::{Deref, DerefMut};
use bit_set::BitSet;
use itertools::Itertools;
use syntax::{parse_regex, RegexError};
use crate::gnfa::{self, LabelError};
use crate::thompson::compile_regex;
use crate::{powerset_cons, Alphabet, Automaton, Dfa};

/// A nondeterministic automaton: any number of transitions per state and
/// symbol, plus ε-transitions, and any number of start states.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Nfa(Automaton);

impl Nfa {
  /// Parses and compiles `source`; states are named `q0`, `q1`, ...
  pub fn from_regex(source: &str) -> Result<Self, RegexError> {
    let regex = parse_regex(source)?;
    Ok(compile_regex(&regex, "q"))
  }

  /// Replaces every transition whose label is a regular expression rather
  /// than a list of symbols with the compiled expression.
  ///
  /// `alphabet` decides which single-character tokens are symbols; see
  /// [`crate::Label::is_plain`].
  pub fn from_gnfa(
    gnfa: &Automaton,
    alphabet: Option<&Alphabet>
  ) -> Result<Self, LabelError> {
    gnfa::reduce(gnfa, alphabet)
  }

  /// Subset construction. The result is total over the symbols of the
  /// NFA's non-ε transitions.
  pub fn to_dfa(&self) -> Dfa {
    powerset_cons::powerset(self)
  }

  pub fn accepts(&self, word: &str) -> bool {
    let graph = Graph::new(self);
    let mut current = graph.closure(graph.start.clone());

    for c in word.chars() {
      current = graph.step(&current, c);
      if current.is_empty() {
        return false;
      }
    }

    !current.is_disjoint(&graph.accepting)
  }

  pub fn into_inner(self) -> Automaton {
    self.0
  }
}

impl From<Automaton> for Nfa {
  fn from(automaton: Automaton) -> Self {
    Self(automaton)
  }
}

impl Deref for Nfa {
  type Target = Automaton;

  fn deref(&self) -> &Automaton {
    &self.0
  }
}

impl DerefMut for Nfa {
  fn deref_mut(&mut self) -> &mut Automaton {
    &mut self.0
  }
}

/// Index-based adjacency of an NFA, with state sets as bit sets.
pub(crate) struct Graph<'a> {
  names: Vec<&'a str>,
  pub start: BitSet,
  pub accepting: BitSet,
  /// Symbols on non-ε transitions.
  pub alphabet: Alphabet,
  epsilon: Vec<Vec<usize>>,
  moves: Vec<Vec<(char, usize)>>,
}

impl<'a> Graph<'a> {
  pub fn new(nfa: &'a Automaton) -> Self {
    let len = nfa.states.len();
    let mut graph = Graph {
      names: nfa.states.keys().map(|name| name.as_str()).collect(),
      start: BitSet::with_capacity(len),
      accepting: BitSet::with_capacity(len),
      alphabet: Alphabet::new(),
      epsilon: vec![vec![]; len],
      moves: vec![vec![]; len],
    };

    for (i, state) in nfa.states.values().enumerate() {
      if state.starting {
        graph.start.insert(i);
      }
      if state.accepting {
        graph.accepting.insert(i);
      }
    }

    for t in &nfa.transitions {
      let (from, to) = match (nfa.states.get_index_of(&t.from), nfa.states.get_index_of(&t.to)) {
        (Some(from), Some(to)) => (from, to),
        _ => continue,
      };
      for c in t.label.symbols() {
        graph.moves[from].push((c, to));
        graph.alphabet.insert(c);
      }
      if t.label.has_epsilon() {
        graph.epsilon[from].push(to);
      }
    }

    graph
  }

  /// Grows `set` by every ε-reachable state until nothing changes.
  pub fn closure(&self, mut set: BitSet) -> BitSet {
    let mut worklist = set.iter().collect::<Vec<_>>();

    while let Some(state) = worklist.pop() {
      for &next in &self.epsilon[state] {
        if set.insert(next) {
          worklist.push(next);
        }
      }
    }

    set
  }

  /// The ε-closure of all `c`-successors of `set`.
  pub fn step(&self, set: &BitSet, c: char) -> BitSet {
    let mut next = BitSet::with_capacity(self.names.len());
    for state in set.iter() {
      for &(d, target) in &self.moves[state] {
        if d == c {
          next.insert(target);
        }
      }
    }
    self.closure(next)
  }

  /// `{a,b,...}` with the member names sorted.
  pub fn set_name(&self, set: &BitSet) -> String {
    let names = set.iter().map(|state| self.names[state]).sorted();
    format!("{{{}}}", names.format(","))
  }
}
