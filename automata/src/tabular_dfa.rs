use std::collections::VecDeque;
use crate::dfa::validate;
use crate::{Alphabet, Automaton, Dfa, Label, Map, ValidationError};

/// A validated DFA as a dense transition table.
///
/// States are numbered in the order of the source automaton, symbols by
/// their position in the sorted alphabet.
#[derive(Debug, Clone)]
pub(crate) struct TabularDfa {
  pub names: Vec<String>,
  pub accepting: Vec<bool>,
  pub start: usize,
  pub alphabet: Vec<char>,
  /// `state * alphabet.len() + symbol` -> state
  transitions: Vec<usize>,
}

/// Appends primes to `name` until `taken` no longer claims it.
pub(crate) fn unique_name<F>(mut name: String, taken: F) -> String
  where F: Fn(&str) -> bool
{
  while taken(&name) {
    name.push('\'');
  }
  name
}

impl TabularDfa {
  pub fn new(
    dfa: &Automaton,
    alphabet: Option<&Alphabet>
  ) -> Result<Self, ValidationError> {
    let alphabet = validate(dfa, alphabet)?.into_iter().collect::<Vec<_>>();
    let width = alphabet.len();
    let mut transitions = vec![0; dfa.states.len() * width];

    for t in &dfa.transitions {
      // validation guarantees both ends exist and every symbol is in the
      // alphabet exactly once per state.
      let (from, to) = match (dfa.states.get_index_of(&t.from), dfa.states.get_index_of(&t.to)) {
        (Some(from), Some(to)) => (from, to),
        _ => continue,
      };
      for c in t.label.symbols() {
        if let Ok(symbol) = alphabet.binary_search(&c) {
          transitions[from * width + symbol] = to;
        }
      }
    }

    Ok(Self {
      names: dfa.states.keys().cloned().collect(),
      accepting: dfa.states.values().map(|state| state.accepting).collect(),
      start: dfa.states.values().position(|state| state.starting).unwrap_or(0),
      alphabet,
      transitions,
    })
  }

  pub fn from_parts(
    names: Vec<String>,
    accepting: Vec<bool>,
    start: usize,
    alphabet: Vec<char>,
    transitions: Vec<usize>,
  ) -> Self {
    debug_assert_eq!(transitions.len(), names.len() * alphabet.len());
    Self { names, accepting, start, alphabet, transitions }
  }

  pub fn len(&self) -> usize {
    self.names.len()
  }

  pub fn symbol(&self, c: char) -> Option<usize> {
    self.alphabet.binary_search(&c).ok()
  }

  pub fn row(&self, state: usize) -> &[usize] {
    let width = self.alphabet.len();
    &self.transitions[state * width..(state + 1) * width]
  }

  pub fn transition(&self, state: usize, c: char) -> Option<usize> {
    self.symbol(c).map(|symbol| self.row(state)[symbol])
  }

  /// States reachable from the start state, in BFS order.
  pub fn reachable(&self) -> Vec<usize> {
    let mut visited = vec![false; self.len()];
    let mut order = vec![self.start];
    let mut queue = VecDeque::from(vec![self.start]);
    visited[self.start] = true;

    while let Some(state) = queue.pop_front() {
      for &next in self.row(state) {
        if !visited[next] {
          visited[next] = true;
          order.push(next);
          queue.push_back(next);
        }
      }
    }

    order
  }

  /// A copy over `alphabet`, which must include the current alphabet.
  ///
  /// Symbols the table lacks lead to a new rejecting sink that loops on
  /// the whole of `alphabet`.
  pub fn complete_over(&self, alphabet: &[char]) -> Self {
    let missing = alphabet.iter().any(|&c| self.symbol(c).is_none());
    let mut names = self.names.clone();
    let mut accepting = self.accepting.clone();
    let sink = names.len();

    if missing {
      let name = unique_name("∅".to_owned(), |name| names.iter().any(|taken| taken == name));
      names.push(name);
      accepting.push(false);
    }

    let mut transitions = Vec::with_capacity(names.len() * alphabet.len());
    for state in 0..self.len() {
      for &c in alphabet {
        transitions.push(self.transition(state, c).unwrap_or(sink));
      }
    }
    if missing {
      transitions.extend(alphabet.iter().map(|_| sink));
    }

    Self::from_parts(names, accepting, self.start, alphabet.to_vec(), transitions)
  }

  /// One transition per ordered pair of states, labelled with every
  /// symbol that leads from one to the other.
  pub fn into_dfa(self) -> Dfa {
    let mut dfa = Automaton::new();

    for (i, name) in self.names.iter().enumerate() {
      dfa.add_state(name, i == self.start, self.accepting[i]);
    }

    for (i, name) in self.names.iter().enumerate() {
      let mut targets: Map<usize, Vec<char>> = Map::new();
      for (symbol, &next) in self.row(i).iter().enumerate() {
        targets.entry(next).or_default().push(self.alphabet[symbol]);
      }
      for (next, symbols) in targets {
        dfa.add_transition(name, &self.names[next], Label::from_symbols(symbols));
      }
    }

    Dfa::from(dfa)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn even_a() -> Automaton {
    let mut dfa = Automaton::new();
    dfa.add_state("A", true, true);
    dfa.add_state("B", false, false);
    dfa.add_state("C", false, false);
    dfa.add_transition("A", "B", "a");
    dfa.add_transition("B", "A", "a");
    dfa.add_transition("A", "A", "b");
    dfa.add_transition("B", "B", "b");
    dfa.add_transition("C", "C", "a, b");
    dfa
  }

  #[test]
  fn table() {
    let table = TabularDfa::new(&even_a(), None).unwrap();
    assert_eq!(table.alphabet, vec!['a', 'b']);
    assert_eq!(table.row(0), &[1, 0]);
    assert_eq!(table.row(1), &[0, 1]);
    assert_eq!(table.transition(1, 'a'), Some(0));
    assert_eq!(table.transition(1, 'c'), None);
    assert_eq!(table.reachable(), vec![0, 1]);
  }

  #[test]
  fn complete_over_adds_sink() {
    let table = TabularDfa::new(&even_a(), None).unwrap();
    let completed = table.complete_over(&['a', 'b', 'c']);

    assert_eq!(completed.names, vec!["A", "B", "C", "∅"]);
    assert_eq!(completed.row(0), &[1, 0, 3]);
    assert_eq!(completed.row(3), &[3, 3, 3]);
    assert!(!completed.accepting[3]);

    let same = table.complete_over(&['a', 'b']);
    assert_eq!(same.len(), 3);
  }

  #[test]
  fn into_dfa_merges_labels() {
    let dfa = TabularDfa::new(&even_a(), None).unwrap().into_dfa();
    let edges = dfa.transitions.iter()
      .map(|t| format!("{} -[{}]-> {}", t.from, t.label, t.to))
      .collect::<Vec<_>>();
    assert_eq!(edges, vec![
      "A -[a]-> B",
      "A -[b]-> A",
      "B -[a]-> A",
      "B -[b]-> B",
      "C -[a, b]-> C",
    ]);
  }
}
