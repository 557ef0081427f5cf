use log::debug;
use syntax::Regex;
use crate::nfa_builder::{NfaBuilder, StateId};
use crate::Nfa;

/// A compiled sub-expression: its entry and exit states.
#[derive(Clone, Copy, Debug)]
struct Fragment {
  start: StateId,
  accept: StateId,
}

/// Thompson construction. States are named `{prefix}0`, `{prefix}1`, ...;
/// the result has one start state and one accepting state.
///
/// The empty regex compiles to two states joined by a transition with an
/// empty label: it accepts nothing, not even the empty string.
pub fn compile_regex(regex: &Regex, prefix: &str) -> Nfa {
  let mut builder = NfaBuilder::new(prefix);
  let fragment = add_regex_to_nfa(&mut builder, regex);

  debug!("compiled `{}` into {} NFA states", regex, builder.state_count());

  builder.build(fragment.start, fragment.accept)
}

fn add_regex_to_nfa(builder: &mut NfaBuilder, regex: &Regex) -> Fragment {
  match regex {
    Regex::Empty => {
      let start = builder.state();
      let accept = builder.state();
      builder.blank(start, accept);
      Fragment { start, accept }
    }
    Regex::Char(c) => {
      let start = builder.state();
      let accept = builder.state();
      builder.transition(start, accept, Some(*c));
      Fragment { start, accept }
    }
    Regex::Alt(alts) => {
      let start = builder.state();
      let accept = builder.state();
      for alt in alts {
        let inner = add_regex_to_nfa(builder, alt);
        builder.transition(start, inner.start, None);
        builder.transition(inner.accept, accept, None);
      }
      Fragment { start, accept }
    }
    Regex::Concat(items) => {
      let fragments = items.iter()
        .map(|item| add_regex_to_nfa(builder, item))
        .collect::<Vec<_>>();
      for pair in fragments.windows(2) {
        builder.transition(pair[0].accept, pair[1].start, None);
      }
      match (fragments.first(), fragments.last()) {
        (Some(first), Some(last)) => {
          Fragment { start: first.start, accept: last.accept }
        }
        _ => add_regex_to_nfa(builder, &Regex::Empty),
      }
    }
    Regex::Many(item) => {
      let mut inner = add_regex_to_nfa(builder, item);
      // The skip edge would let a path that re-enters `start`, or that
      // leaves `accept`, finish without a complete match.
      if builder.has_incoming(inner.start) || builder.has_outgoing(inner.accept) {
        let start = builder.state();
        let accept = builder.state();
        builder.transition(start, inner.start, None);
        builder.transition(inner.accept, accept, None);
        inner = Fragment { start, accept };
      }
      builder.transition(inner.accept, inner.start, None);
      builder.transition(inner.start, inner.accept, None);
      inner
    }
    Regex::Many1(item) => {
      let inner = add_regex_to_nfa(builder, item);
      builder.transition(inner.accept, inner.start, None);
      inner
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use syntax::parse_regex;

  fn compile(source: &str) -> Nfa {
    compile_regex(&parse_regex(source).unwrap(), "q")
  }

  fn edges(nfa: &Nfa) -> Vec<String> {
    nfa.transitions.iter()
      .map(|t| format!("{} -[{}]-> {}", t.from, t.label, t.to))
      .collect()
  }

  #[test]
  fn literal() {
    let nfa = compile("a");
    assert_eq!(nfa.states.len(), 2);
    assert_eq!(edges(&nfa), vec!["q0 -[a]-> q1"]);
    assert!(nfa.states["q0"].starting);
    assert!(nfa.states["q1"].accepting);
  }

  #[test]
  fn kleene_reuses_fragment_states() {
    let nfa = compile("a*");
    assert_eq!(nfa.states.len(), 2);
    assert_eq!(edges(&nfa), vec!["q0 -[a, ε]-> q1", "q1 -[ε]-> q0"]);
  }

  #[test]
  fn plus_has_no_skip_edge() {
    let nfa = compile("a+");
    assert_eq!(edges(&nfa), vec!["q0 -[a]-> q1", "q1 -[ε]-> q0"]);
  }

  #[test]
  fn alternation() {
    let nfa = compile("a|b");
    assert_eq!(nfa.states.len(), 6);
    assert_eq!(edges(&nfa), vec![
      "q2 -[a]-> q3",
      "q0 -[ε]-> q2",
      "q3 -[ε]-> q1",
      "q4 -[b]-> q5",
      "q0 -[ε]-> q4",
      "q5 -[ε]-> q1",
    ]);
  }

  #[test]
  fn concatenation() {
    let nfa = compile("a*b");
    assert_eq!(edges(&nfa), vec![
      "q0 -[a, ε]-> q1",
      "q1 -[ε]-> q0",
      "q2 -[b]-> q3",
      "q1 -[ε]-> q2",
    ]);
    assert!(nfa.states["q0"].starting);
    assert!(nfa.states["q3"].accepting);
  }

  #[test]
  fn kleene_of_quantified_tail_is_isolated() {
    let nfa = compile("(ab+)*");
    assert!(nfa.accepts(""));
    assert!(nfa.accepts("ab"));
    assert!(nfa.accepts("abbab"));
    assert!(!nfa.accepts("b"));
    assert!(!nfa.accepts("a"));
    assert!(!nfa.accepts("ba"));
  }

  #[test]
  fn kleene_of_quantified_head_is_isolated() {
    let nfa = compile("(a+b)*");
    assert!(nfa.accepts("aab"));
    assert!(nfa.accepts("abab"));
    assert!(!nfa.accepts("a"));
    assert!(!nfa.accepts("aba"));
  }

  #[test]
  fn empty_regex_accepts_nothing() {
    let nfa = compile("");
    assert_eq!(nfa.states.len(), 2);
    assert_eq!(nfa.transitions.len(), 1);
    assert_eq!(nfa.transitions[0].label.tokens().count(), 0);
    assert!(!nfa.accepts(""));
    assert!(!nfa.accepts("a"));
  }

  #[test]
  fn prefix_names_states() {
    let nfa = compile_regex(&parse_regex("ab").unwrap(), "t3.");
    assert_eq!(
      nfa.states.keys().cloned().collect::<Vec<_>>(),
      vec!["t3.0", "t3.1", "t3.2", "t3.3"]);
  }
}
