use std::collections::VecDeque;
use crate::{Automaton, Map, Transition};

impl Automaton {
  /// A shortest word leading from a start state to an accepting state,
  /// found by BFS.
  ///
  /// Edges are explored in order of their smallest symbol, and a label
  /// with several symbols contributes its smallest one, so the witness is
  /// the same on every run. ε-edges are followed first and add no symbol.
  pub fn find_accepting_string(&self) -> Option<String> {
    // state -> (predecessor, symbol read on the way in)
    let mut parents: Map<&str, Option<(&str, Option<char>)>> = Map::new();
    let mut queue = VecDeque::new();

    for state in self.start_states() {
      parents.insert(&state.name, None);
      queue.push_back(state.name.as_str());
    }

    while let Some(name) = queue.pop_front() {
      if self.states[name].accepting {
        return Some(backtrack(&parents, name));
      }

      let mut edges = self.outgoing(name)
        .filter(|t| self.states.contains_key(&t.to))
        .flat_map(|t| edge_symbols(t).map(move |symbol| (symbol, t.to.as_str())))
        .collect::<Vec<_>>();
      edges.sort_by_key(|&(symbol, _)| symbol);

      for (symbol, to) in edges {
        if !parents.contains_key(to) {
          parents.insert(to, Some((name, symbol)));
          queue.push_back(to);
        }
      }
    }

    None
  }

  /// Whether no word is accepted.
  pub fn empty(&self) -> bool {
    self.find_accepting_string().is_none()
  }
}

/// The ways to take `t`: `None` for its ε token, then its smallest symbol.
fn edge_symbols(t: &Transition) -> impl Iterator<Item = Option<char>> {
  let epsilon = t.label.has_epsilon().then_some(None);
  let symbol = t.label.symbols().min().map(Some);
  epsilon.into_iter().chain(symbol)
}

fn backtrack(parents: &Map<&str, Option<(&str, Option<char>)>>, accept: &str) -> String {
  let mut symbols = vec![];
  let mut current = accept;

  while let Some(&Some((parent, symbol))) = parents.get(current) {
    symbols.extend(symbol);
    current = parent;
  }

  symbols.into_iter().rev().collect()
}
