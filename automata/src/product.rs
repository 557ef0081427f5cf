use std::collections::VecDeque;
use log::debug;
use crate::tabular_dfa::{unique_name, TabularDfa};
use crate::{Alphabet, Map, Set};

/// The product of two tables over the union of their alphabets, limited
/// to pairs reachable from the pair of start states.
///
/// Pairs are named `(a,b)`, primed where two pairs would share a name.
///
/// A side lacking some symbols is first completed with a sink state (see
/// [`TabularDfa::complete_over`]); the completed copies are local, so the
/// inputs are never touched.
pub(crate) fn product<F>(
  left: &TabularDfa,
  right: &TabularDfa,
  accept: F
) -> TabularDfa
  where F: Fn(bool, bool) -> bool
{
  let alphabet = left.alphabet.iter()
    .chain(&right.alphabet)
    .copied()
    .collect::<Alphabet>()
    .into_iter()
    .collect::<Vec<_>>();
  let left = left.complete_over(&alphabet);
  let right = right.complete_over(&alphabet);

  let mut pairs: Map<(usize, usize), usize> = Map::new();
  let mut queue = VecDeque::new();
  let mut transitions = vec![];

  pairs.insert((left.start, right.start), 0);
  queue.push_back((left.start, right.start));

  while let Some((a, b)) = queue.pop_front() {
    for symbol in 0..alphabet.len() {
      let next = (left.row(a)[symbol], right.row(b)[symbol]);
      let len = pairs.len();
      let index = *pairs.entry(next).or_insert_with(|| {
        queue.push_back(next);
        len
      });
      transitions.push(index);
    }
  }

  let mut taken = Set::new();
  let names = pairs.keys()
    .map(|&(a, b)| {
      let name = format!("({},{})", left.names[a], right.names[b]);
      let name = unique_name(name, |name| taken.contains(name));
      taken.insert(name.clone());
      name
    })
    .collect::<Vec<_>>();
  let accepting = pairs.keys()
    .map(|&(a, b)| accept(left.accepting[a], right.accepting[b]))
    .collect();

  debug!(
    "product of {} and {} states has {} reachable states",
    left.len(),
    right.len(),
    names.len());

  TabularDfa::from_parts(names, accepting, 0, alphabet, transitions)
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use crate::{Alphabet, Automaton, BoolOp, Dfa, Verdict};

  fn ends_with(c: char, other: char) -> Dfa {
    let mut dfa = Automaton::new();
    dfa.add_state("n", true, false);
    dfa.add_state("y", false, true);
    dfa.add_transition("n", "y", c.to_string().as_str());
    dfa.add_transition("n", "n", other.to_string().as_str());
    dfa.add_transition("y", "y", c.to_string().as_str());
    dfa.add_transition("y", "n", other.to_string().as_str());
    Dfa::from(dfa)
  }

  fn only(c: char) -> Dfa {
    let mut dfa = Automaton::new();
    dfa.add_state("s", true, true);
    dfa.add_transition("s", "s", c.to_string().as_str());
    Dfa::from(dfa)
  }

  #[test]
  fn intersection() {
    let a = ends_with('a', 'b');
    let b = ends_with('b', 'a').invert();
    let both = a.combine(&b, |x, y| x && y).unwrap();

    assert_eq!(
      both.states.keys().cloned().collect::<Vec<_>>(),
      vec!["(n,n)", "(y,n)", "(n,y)"]);
    assert_eq!(both.simulate_word("ba"), Verdict::Accept);
    assert_eq!(both.simulate_word("ab"), Verdict::Reject);
  }

  #[test]
  fn mismatched_alphabets_get_sinks() {
    let a_star = only('a');
    let b_star = only('b');
    let union = a_star.combine_with(&b_star, BoolOp::Or).unwrap();

    assert_eq!(union.validate(), Ok("ab".chars().collect::<Alphabet>()));
    assert_eq!(
      union.states.keys().cloned().collect::<Vec<_>>(),
      vec!["(s,s)", "(s,∅)", "(∅,s)", "(∅,∅)"]);
    assert_eq!(union.simulate_word(""), Verdict::Accept);
    assert_eq!(union.simulate_word("aaa"), Verdict::Accept);
    assert_eq!(union.simulate_word("bb"), Verdict::Accept);
    assert_eq!(union.simulate_word("ab"), Verdict::Reject);

    // the inputs keep their own alphabets.
    assert_eq!(a_star.states.len(), 1);
    assert_eq!(a_star.validate(), Ok("a".chars().collect::<Alphabet>()));
  }

  fn two_cycle(start: &str, other: &str) -> Dfa {
    let mut dfa = Automaton::new();
    dfa.add_state(start, true, true);
    dfa.add_state(other, false, false);
    dfa.add_transition(start, other, "a");
    dfa.add_transition(other, start, "a");
    Dfa::from(dfa)
  }

  #[test]
  fn pair_names_stay_distinct() {
    // (p, q,r) and (p,q, r) would both read (p,q,r).
    let left = two_cycle("p", "p,q");
    let right = two_cycle("q,r", "r");
    let both = left.combine_with(&right, BoolOp::And).unwrap();

    assert_eq!(
      both.states.keys().cloned().collect::<Vec<_>>(),
      vec!["(p,q,r)", "(p,q,r)'"]);
    assert!(both.validate().is_ok());
    assert_eq!(both.simulate_word(""), Verdict::Accept);
    assert_eq!(both.simulate_word("a"), Verdict::Reject);
    assert_eq!(both.simulate_word("aa"), Verdict::Accept);
  }

  #[test]
  fn minus() {
    let a_star = only('a');
    let ends_a = ends_with('a', 'b');
    let diff = a_star.combine_with(&ends_a, BoolOp::Minus).unwrap();
    assert_eq!(diff.find_accepting_string(), Some(String::new()));
    assert_eq!(diff.simulate_word("a"), Verdict::Reject);
  }
}
