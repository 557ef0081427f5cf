use std::collections::VecDeque;
use log::trace;
use crate::tabular_dfa::TabularDfa;
use crate::BiMap;

/// Whether the two tables are the same machine up to renaming of states.
///
/// Both must have the same number of states and the same alphabet. The
/// bijection is grown from the pair of start states by following each
/// symbol on both sides at once; a state already paired with a different
/// partner, or a pair that disagrees on acceptance, breaks it. States not
/// reached from the start take part only in the count.
pub(crate) fn isomorphic(left: &TabularDfa, right: &TabularDfa) -> bool {
  if left.len() != right.len() || left.alphabet != right.alphabet {
    return false;
  }

  let mut pairing: BiMap<usize, usize> = BiMap::new();
  let mut queue = VecDeque::new();
  pairing.insert(left.start, right.start);
  queue.push_back((left.start, right.start));

  while let Some((a, b)) = queue.pop_front() {
    if left.accepting[a] != right.accepting[b] {
      trace!("{} and {} disagree on acceptance", left.names[a], right.names[b]);
      return false;
    }

    for (&next_a, &next_b) in left.row(a).iter().zip(right.row(b)) {
      match (pairing.get_by_left(&next_a), pairing.get_by_right(&next_b)) {
        (None, None) => {
          pairing.insert(next_a, next_b);
          queue.push_back((next_a, next_b));
        }
        (Some(&paired), _) if paired == next_b => {}
        _ => {
          trace!(
            "{} cannot be paired with {}",
            left.names[next_a],
            right.names[next_b]);
          return false;
        }
      }
    }
  }

  true
}
