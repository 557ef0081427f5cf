use std::collections::VecDeque;
use bit_set::BitSet;
use log::{debug, trace};
use crate::nfa::Graph;
use crate::tabular_dfa::unique_name;
use crate::{Automaton, Dfa, Label, Map, Nfa};

/// Each DFA state is the ε-closure of a set of NFA states, named by its
/// sorted member names, primed if an earlier subset already took that
/// name. The empty set becomes an ordinary rejecting state
/// that loops on every symbol, which keeps the result total.
pub(crate) fn powerset(nfa: &Nfa) -> Dfa {
  let graph = Graph::new(nfa);
  let mut dfa = Automaton::new();
  let mut subsets: Map<BitSet, String> = Map::new();
  let mut queue = VecDeque::new();

  let start = graph.closure(graph.start.clone());
  let name = graph.set_name(&start);
  dfa.add_state(&name, true, !start.is_disjoint(&graph.accepting));
  subsets.insert(start.clone(), name);
  queue.push_back(start);

  while let Some(set) = queue.pop_front() {
    let from = subsets[&set].clone();
    let mut targets: Map<String, Vec<char>> = Map::new();

    for &c in &graph.alphabet {
      let next = graph.step(&set, c);
      let to = match subsets.get(&next) {
        Some(name) => name.clone(),
        None => {
          let name = unique_name(graph.set_name(&next), |name| dfa.states.contains_key(name));
          trace!("new subset {} on '{}' from {}", name, c, from);
          dfa.add_state(&name, false, !next.is_disjoint(&graph.accepting));
          subsets.insert(next.clone(), name.clone());
          queue.push_back(next);
          name
        }
      };
      targets.entry(to).or_default().push(c);
    }

    for (to, symbols) in targets {
      dfa.add_transition(&from, &to, Label::from_symbols(symbols));
    }
  }

  debug!(
    "subset construction: {} NFA states, {} DFA states, {} symbols",
    nfa.states.len(),
    dfa.states.len(),
    graph.alphabet.len());

  Dfa::from(dfa)
}
