use std::collections::BTreeSet;
use crate::{Automaton, Label, Map, Nfa, EPSILON};

#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub(crate) struct StateId(usize);

/// Allocates states named `{prefix}{n}` and collects transitions.
///
/// Transitions are keyed by their `(src, dest)` pair, so each ordered
/// pair ends up as a single transition whose label is the union of every
/// letter added for it.
pub(crate) struct NfaBuilder<'p> {
  prefix: &'p str,
  counter: usize,
  /// `None` is ε.
  transitions: Map<(StateId, StateId), BTreeSet<Option<char>>>,
}

impl<'p> NfaBuilder<'p> {
  pub fn new(prefix: &'p str) -> Self {
    Self {
      prefix,
      counter: 0,
      transitions: Map::new(),
    }
  }

  pub fn state(&mut self) -> StateId {
    let i = self.counter;
    self.counter += 1;
    StateId(i)
  }

  pub fn transition(&mut self, src: StateId, dest: StateId, c: Option<char>) {
    self.transitions.entry((src, dest)).or_default().insert(c);
  }

  /// A transition with an empty label, which no input can take.
  pub fn blank(&mut self, src: StateId, dest: StateId) {
    self.transitions.entry((src, dest)).or_default();
  }

  pub fn has_incoming(&self, state: StateId) -> bool {
    self.transitions.keys().any(|&(_, dest)| dest == state)
  }

  pub fn has_outgoing(&self, state: StateId) -> bool {
    self.transitions.keys().any(|&(src, _)| src == state)
  }

  pub fn state_count(&self) -> usize {
    self.counter
  }

  pub fn build(self, start: StateId, accept: StateId) -> Nfa {
    let mut automaton = Automaton::new();

    for i in 0..self.counter {
      let name = self.name(StateId(i));
      automaton.add_state(&name, StateId(i) == start, StateId(i) == accept);
    }

    for (&(src, dest), letters) in &self.transitions {
      let mut tokens = letters.iter()
        .filter_map(|c| c.map(String::from))
        .collect::<Vec<_>>();
      if letters.contains(&None) {
        tokens.push(EPSILON.to_owned());
      }
      automaton.add_transition(
        &self.name(src),
        &self.name(dest),
        Label::from_tokens(tokens));
    }

    Nfa::from(automaton)
  }

  fn name(&self, state: StateId) -> String {
    format!("{}{}", self.prefix, state.0)
  }
}
